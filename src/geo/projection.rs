//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lon) and
//! screen coordinates for a basin map rendered in Plate Carrée.

use crate::error::StormError;
use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;
use std::fmt;
use std::str::FromStr;

/// Geographic bounds of a basin map in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasinExtent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BasinExtent {
    pub const fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn contains(&self, coord: Coord<f64>) -> bool {
        coord.x >= self.min_lon
            && coord.x <= self.max_lon
            && coord.y >= self.min_lat
            && coord.y <= self.max_lat
    }
}

/// Tropical cyclone basins with a prepared map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basin {
    NorthernAtlantic,
    EasternPacific,
    #[default]
    WesternPacific,
    NorthernIndian,
    SouthernIndian,
    SouthernPacific,
}

impl Basin {
    pub fn all() -> &'static [Basin] {
        &[
            Basin::NorthernAtlantic,
            Basin::EasternPacific,
            Basin::WesternPacific,
            Basin::NorthernIndian,
            Basin::SouthernIndian,
            Basin::SouthernPacific,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Basin::NorthernAtlantic => "North Atlantic",
            Basin::EasternPacific => "East Pacific",
            Basin::WesternPacific => "West Pacific",
            Basin::NorthernIndian => "North Indian",
            Basin::SouthernIndian => "South Indian",
            Basin::SouthernPacific => "South Pacific",
        }
    }

    /// Identifier used in resource file names.
    pub fn id(&self) -> &'static str {
        match self {
            Basin::NorthernAtlantic => "northern_atlantic",
            Basin::EasternPacific => "eastern_pacific",
            Basin::WesternPacific => "western_pacific",
            Basin::NorthernIndian => "northern_indian",
            Basin::SouthernIndian => "southern_indian",
            Basin::SouthernPacific => "southern_pacific",
        }
    }

    /// Two-letter code used in dataset file names.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Basin::NorthernAtlantic => "na",
            Basin::EasternPacific => "ep",
            Basin::WesternPacific => "wp",
            Basin::NorthernIndian => "ni",
            Basin::SouthernIndian => "si",
            Basin::SouthernPacific => "sp",
        }
    }

    pub fn extent(&self) -> BasinExtent {
        match self {
            Basin::WesternPacific => BasinExtent::new(100.0, 180.0, 0.0, 60.0),
            Basin::NorthernAtlantic => BasinExtent::new(-100.0, -20.0, 0.0, 60.0),
            Basin::EasternPacific => BasinExtent::new(-175.0, -95.0, 0.0, 60.0),
            Basin::NorthernIndian => BasinExtent::new(40.0, 100.0, -10.0, 35.0),
            Basin::SouthernIndian => BasinExtent::new(20.0, 120.0, -75.0, 0.0),
            Basin::SouthernPacific => BasinExtent::new(135.0, 215.0, -60.0, 0.0),
        }
    }
}

impl fmt::Display for Basin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Basin {
    type Err = StormError;

    /// Accepts the resource id ("western_pacific"), the abbreviation ("wp")
    /// or the display name ("Western Pacific").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(' ', "_");
        Basin::all()
            .iter()
            .copied()
            .find(|basin| {
                basin.id() == normalized
                    || basin.abbreviation() == normalized
                    || basin.label().to_lowercase().replace(' ', "_") == normalized
            })
            .ok_or_else(|| StormError::UnknownBasin(s.to_string()))
    }
}

/// Converts a lat/lon pair to screen coordinates.
///
/// Longitude maps linearly from `min_lon -> 0` to `max_lon -> width`, and
/// latitude from `max_lat -> 0` to `min_lat -> height` (screen Y grows down).
pub fn project(lat: f64, lon: f64, extent: &BasinExtent, width: f32, height: f32) -> Pos2 {
    let x = (lon - extent.min_lon) * (width as f64 / extent.lon_span());
    let y = (extent.max_lat - lat) * (height as f64 / extent.lat_span());
    Pos2::new(x as f32, y as f32)
}

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Geographic bounds drawn across the whole screen rectangle
    pub extent: BasinExtent,
    /// Screen rectangle the map covers
    pub screen_rect: Rect,
}

impl MapProjection {
    /// Creates a projection for a basin covering a `width` x `height` screen.
    pub fn new(basin: Basin, width: f32, height: f32) -> Self {
        Self {
            extent: basin.extent(),
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(width, height)),
        }
    }

    /// Moves the projection onto a new screen rectangle.
    pub fn update(&mut self, screen_rect: Rect) {
        self.screen_rect = screen_rect;
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let local = project(
            coord.y,
            coord.x,
            &self.extent,
            self.screen_rect.width(),
            self.screen_rect.height(),
        );
        self.screen_rect.min + local.to_vec2()
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let local = pos - self.screen_rect.min;
        let lon = self.extent.min_lon
            + local.x as f64 * self.extent.lon_span() / self.screen_rect.width() as f64;
        let lat = self.extent.max_lat
            - local.y as f64 * self.extent.lat_span() / self.screen_rect.height() as f64;
        Coord { x: lon, y: lat }
    }
}
