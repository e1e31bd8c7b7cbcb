//! One running animation.

use super::playback::Playback;
use crate::config::AnimationConfig;
use crate::geo::{Basin, MapProjection, ReferenceRaster};
use crate::loader::LoadedSession;
use crate::storm::{RenderSurface, StepContext};
use chrono::{Datelike, TimeDelta};

/// Everything an animation needs, owned in one place.
pub struct Session {
    pub config: AnimationConfig,
    pub basin: Basin,
    pub playback: Playback,
    /// Maps lat/lon onto the logical screen
    pub projection: MapProjection,
    raster: ReferenceRaster,
}

impl Session {
    /// Builds a paused session from loaded data.
    ///
    /// Playback pauses itself once the clock leaves the start year.
    pub fn new(loaded: LoadedSession, config: AnimationConfig) -> Self {
        let projection = MapProjection::new(loaded.basin, config.screen_width, config.screen_height);
        log::info!(
            "Session ready: {} storms in {} from {} through {}",
            loaded.dataset.len(),
            loaded.basin,
            loaded.start,
            loaded.dataset.last_time()
        );
        let playback =
            Playback::new(loaded.dataset, &config).with_cutoff_year(loaded.start.year());

        Self {
            config,
            basin: loaded.basin,
            playback,
            projection,
            raster: loaded.raster,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.clock.playing
    }

    pub fn toggle_play(&mut self) {
        self.playback.clock.toggle_play();
        log::debug!(
            "Playback {}",
            if self.is_playing() { "resumed" } else { "paused" }
        );
    }

    /// Jumps ahead by the configured number of days.
    pub fn skip_forward(&mut self) {
        match TimeDelta::try_days(self.config.skip_days) {
            Some(step) => self.playback.clock.skip(step),
            None => log::warn!("Skip of {} days is out of range", self.config.skip_days),
        }
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self, real_dt: f64) {
        let ctx = StepContext {
            config: &self.config,
            projection: &self.projection,
            terrain: &self.raster,
        };
        self.playback.tick(real_dt, &ctx);
    }

    pub fn draw(&mut self, surface: &mut dyn RenderSurface, real_dt: f64) {
        self.playback
            .draw(surface, &self.projection, &self.config, real_dt);
    }

    /// On-screen clock text.
    pub fn clock_label(&self) -> String {
        format!("Current Time: {}", self.playback.clock.formatted_time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storm::testing::RecordingSurface;
    use crate::track::Dataset;
    use chrono::NaiveDate;
    use eframe::egui::{ColorImage, Vec2};
    use image::{Rgb, RgbImage};

    const SEASON: &str = r#"[
        {"name": "KROSA", "path": [
            {"time": "2019-08-06 00:00", "lat": 20.0, "long": 140.0, "speed": "65", "pressure": "975", "class": 2},
            {"time": "2019-08-06 12:00", "lat": 21.0, "long": 139.0, "speed": "70", "pressure": "970", "class": 2}
        ]},
        {"name": "LEKIMA", "path": [
            {"time": "2019-08-07 00:00", "lat": 15.0, "long": 130.0, "class": 4}
        ]}
    ]"#;

    fn session() -> Session {
        let config = AnimationConfig::default();
        let dataset = Dataset::from_json(SEASON).unwrap();
        let raster = ReferenceRaster::new(
            RgbImage::from_pixel(4, 3, Rgb(config.ocean_color)),
            config.ocean_color,
            Vec2::new(config.screen_width, config.screen_height),
        );
        let loaded = LoadedSession {
            basin: Basin::WesternPacific,
            start: NaiveDate::from_ymd_opt(2019, 8, 1).unwrap(),
            dataset,
            raster,
            background: ColorImage::from_rgba_unmultiplied([1, 1], &[0, 0, 0, 255]),
        };
        Session::new(loaded, config)
    }

    #[test]
    fn starts_paused_at_the_first_fix() {
        let mut session = session();
        assert!(!session.is_playing());
        assert_eq!(session.clock_label(), "Current Time: 2019-08-06 00:00");

        session.tick(1.0);
        assert_eq!(session.playback.clock.elapsed_secs(), 0.0);
    }

    #[test]
    fn one_real_second_is_twelve_hours() {
        let mut session = session();
        session.toggle_play();
        for _ in 0..10 {
            session.tick(0.1);
        }
        assert_eq!(session.clock_label(), "Current Time: 2019-08-06 12:00");
    }

    #[test]
    fn skip_forward_adds_a_week() {
        let mut session = session();
        session.skip_forward();
        assert_eq!(session.clock_label(), "Current Time: 2019-08-13 00:00");
    }

    #[test]
    fn oversized_skip_leaves_the_clock_alone() {
        let mut session = session();
        session.config.skip_days = i64::MAX;
        session.skip_forward();
        assert_eq!(session.clock_label(), "Current Time: 2019-08-06 00:00");
    }

    #[test]
    fn draws_active_storms_only() {
        let mut session = session();
        session.toggle_play();
        session.tick(0.25);

        let mut surface = RecordingSurface::default();
        session.draw(&mut surface, 0.25);
        assert_eq!(surface.texts(), vec!["KROSA", "65 kt", "975 hPa"]);
    }
}
