//! Reference raster used to tell water from land.
//!
//! The reference map is a flat two-color render of the basin: open water is
//! painted in a single known color and everything else counts as land.

use crate::error::StormResult;
use eframe::egui::{Pos2, Vec2};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Anything that can classify a screen position as water or land.
pub trait TerrainSampler {
    fn is_water(&self, pos: Pos2) -> bool;
}

/// Returns true when the pixel at (x, y) has exactly `target` as its color.
///
/// Coordinates outside the image are treated as land.
pub fn sample(image: &RgbImage, x: i64, y: i64, target: [u8; 3]) -> bool {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return false;
    }
    *image.get_pixel(x as u32, y as u32) == Rgb(target)
}

/// Low-resolution basin map sampled in screen coordinates.
pub struct ReferenceRaster {
    image: RgbImage,
    ocean_color: [u8; 3],
    /// Screen size the map is stretched over
    screen_size: Vec2,
}

impl ReferenceRaster {
    pub fn new(image: RgbImage, ocean_color: [u8; 3], screen_size: Vec2) -> Self {
        Self {
            image,
            ocean_color,
            screen_size,
        }
    }

    /// Loads a reference map from disk.
    pub fn load(path: &Path, ocean_color: [u8; 3], screen_size: Vec2) -> StormResult<Self> {
        let image = image::open(path)?.to_rgb8();
        log::info!(
            "Loaded reference raster {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::new(image, ocean_color, screen_size))
    }

    /// Maps a screen position to a pixel of the reference image.
    fn to_pixel(&self, pos: Pos2) -> (i64, i64) {
        let sx = self.image.width() as f32 / self.screen_size.x;
        let sy = self.image.height() as f32 / self.screen_size.y;
        ((pos.x * sx).floor() as i64, (pos.y * sy).floor() as i64)
    }
}

impl TerrainSampler for ReferenceRaster {
    fn is_water(&self, pos: Pos2) -> bool {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return false;
        }
        let (x, y) = self.to_pixel(pos);
        sample(&self.image, x, y, self.ocean_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OCEAN: [u8; 3] = [0, 0, 70];
    const LAND: [u8; 3] = [120, 160, 90];

    /// 10x10 image: left half ocean, right half land.
    fn half_and_half() -> RgbImage {
        RgbImage::from_fn(10, 10, |x, _| if x < 5 { Rgb(OCEAN) } else { Rgb(LAND) })
    }

    #[test]
    fn exact_color_match_is_water() {
        let image = half_and_half();
        assert!(sample(&image, 0, 0, OCEAN));
        assert!(sample(&image, 4, 9, OCEAN));
        assert!(!sample(&image, 5, 0, OCEAN));
    }

    #[test]
    fn near_ocean_color_is_land() {
        let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 71]));
        assert!(!sample(&image, 1, 1, OCEAN));
    }

    #[test]
    fn out_of_bounds_is_not_water() {
        let image = RgbImage::from_pixel(4, 4, Rgb(OCEAN));
        assert!(!sample(&image, -1, 0, OCEAN));
        assert!(!sample(&image, 0, -1, OCEAN));
        assert!(!sample(&image, 4, 0, OCEAN));
        assert!(!sample(&image, 0, 4, OCEAN));
    }

    #[test]
    fn screen_positions_are_rescaled() {
        // 10 pixel image stretched across a 100 pixel wide screen
        let raster = ReferenceRaster::new(half_and_half(), OCEAN, Vec2::new(100.0, 100.0));
        assert!(raster.is_water(Pos2::new(10.0, 50.0)));
        assert!(raster.is_water(Pos2::new(49.9, 50.0)));
        assert!(!raster.is_water(Pos2::new(50.0, 50.0)));
        assert!(!raster.is_water(Pos2::new(-5.0, 50.0)));
        assert!(!raster.is_water(Pos2::new(f32::NAN, 50.0)));
    }
}
