//! Basin background map textures.
//!
//! Decoding happens off the UI thread where possible; uploading to the GPU
//! always happens here, on the UI thread.

use crate::config::AnimationConfig;
use crate::error::StormResult;
use crate::geo::Basin;
use crate::loader::detailed_map_path;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use std::path::Path;

/// Decodes an image file into an egui image.
pub fn load_color_image(path: &Path) -> StormResult<ColorImage> {
    let image = image::open(path)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}

/// Uploaded background map for one basin.
#[derive(Default)]
pub struct MapTextureCache {
    texture: Option<TextureHandle>,
    basin: Option<Basin>,
}

impl MapTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads a decoded map for `basin`, replacing the current one.
    pub fn update(&mut self, ctx: &egui::Context, basin: Basin, image: ColorImage) {
        log::debug!(
            "Uploading {} map texture: {}x{}",
            basin,
            image.width(),
            image.height()
        );

        let texture = ctx.load_texture(
            format!("{}_map", basin.id()),
            image,
            TextureOptions::LINEAR,
        );

        self.texture = Some(texture);
        self.basin = Some(basin);
    }

    /// Makes sure the map for `basin` is loaded, reading it from disk if the
    /// cache holds another basin. A missing file leaves the cache empty.
    pub fn ensure(&mut self, ctx: &egui::Context, basin: Basin, config: &AnimationConfig) {
        if self.basin == Some(basin) {
            return;
        }

        let path = detailed_map_path(config, basin);
        match load_color_image(&path) {
            Ok(image) => self.update(ctx, basin, image),
            Err(e) => {
                log::warn!("Failed to load map {}: {}", path.display(), e);
                self.texture = None;
                self.basin = Some(basin);
            }
        }
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn decodes_png_into_color_image() {
        let path = std::env::temp_dir().join("stormchaser_map_texture_test.png");
        RgbaImage::from_pixel(3, 2, Rgba([0, 0, 70, 255]))
            .save(&path)
            .unwrap();

        let image = load_color_image(&path).unwrap();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(0, 0, 70));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_map_leaves_cache_empty() {
        let ctx = egui::Context::default();
        let config = AnimationConfig {
            resources_dir: "does/not/exist".into(),
            ..Default::default()
        };
        let mut cache = MapTextureCache::new();
        cache.ensure(&ctx, Basin::NorthernIndian, &config);
        assert!(cache.texture().is_none());
        assert_eq!(cache.basin, Some(Basin::NorthernIndian));
    }
}
