//! Playback clock and the storms it drives.

use crate::config::AnimationConfig;
use crate::geo::MapProjection;
use crate::storm::{Lifecycle, RenderSurface, StepContext, StormEntity};
use crate::track::Dataset;
use chrono::{Datelike, NaiveDateTime, TimeDelta};

/// Format of the on-screen clock.
const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Single time cursor shared by every storm.
///
/// Time is kept in simulated seconds since the dataset epoch. Pausing stops
/// accumulation, so resuming carries on from the same instant.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    /// Whether playback is currently active
    pub playing: bool,

    /// Simulated seconds accumulated by ticks
    played_secs: f64,

    /// Simulated seconds added by skips
    skip_offset_secs: f64,

    /// Simulated time at elapsed zero
    epoch: NaiveDateTime,

    /// Playback pauses itself once the clock passes this year
    cutoff_year: Option<i32>,

    /// Real seconds per simulated second
    time_scale_factor: f64,
}

impl PlaybackClock {
    pub fn new(epoch: NaiveDateTime, time_scale_factor: f64) -> Self {
        Self {
            playing: false,
            played_secs: 0.0,
            skip_offset_secs: 0.0,
            epoch,
            cutoff_year: None,
            time_scale_factor,
        }
    }

    pub fn with_cutoff_year(mut self, year: i32) -> Self {
        self.cutoff_year = Some(year);
        self
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    /// Jumps the clock forward without touching the frame delta.
    pub fn skip(&mut self, duration: TimeDelta) {
        self.skip_offset_secs += duration.num_milliseconds() as f64 / 1000.0;
        log::debug!("Skipped forward to {}", self.formatted_time());
    }

    /// Simulated seconds since the epoch.
    pub fn elapsed_secs(&self) -> f64 {
        self.played_secs + self.skip_offset_secs
    }

    pub fn current_datetime(&self) -> NaiveDateTime {
        let millis = (self.elapsed_secs() * 1000.0).round() as i64;
        self.epoch + TimeDelta::milliseconds(millis)
    }

    pub fn formatted_time(&self) -> String {
        self.current_datetime().format(CLOCK_FORMAT).to_string()
    }

    fn past_cutoff(&self) -> bool {
        self.cutoff_year
            .is_some_and(|year| self.current_datetime().year() > year)
    }

    /// Advances by one frame of `real_dt` seconds.
    ///
    /// Returns whether time moved. Playback stops on its own once the clock
    /// has run past the cutoff year.
    pub fn tick(&mut self, real_dt: f64) -> bool {
        if self.playing && self.past_cutoff() {
            self.playing = false;
            if let Some(year) = self.cutoff_year {
                log::info!("Reached the end of {}, pausing", year);
            }
        }
        if !self.playing {
            return false;
        }
        self.played_secs += real_dt / self.time_scale_factor;
        true
    }
}

/// Every storm of a session, driven by one clock.
pub struct Playback {
    pub clock: PlaybackClock,
    storms: Vec<StormEntity>,
}

impl Playback {
    pub fn new(dataset: Dataset, config: &AnimationConfig) -> Self {
        let clock = PlaybackClock::new(dataset.epoch, config.time_scale_factor);
        let storms = dataset.storms.into_iter().map(StormEntity::new).collect();
        Self { clock, storms }
    }

    pub fn with_cutoff_year(mut self, year: i32) -> Self {
        self.clock = self.clock.with_cutoff_year(year);
        self
    }

    /// Advances the clock and every storm, in dataset order.
    pub fn tick(&mut self, real_dt: f64, ctx: &StepContext<'_>) {
        if !self.clock.tick(real_dt) {
            return;
        }
        let elapsed = self.clock.elapsed_secs();
        for storm in &mut self.storms {
            storm.update(elapsed, real_dt, ctx);
        }
    }

    /// Draws every visible storm. Icons keep spinning while paused.
    pub fn draw(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &MapProjection,
        config: &AnimationConfig,
        real_dt: f64,
    ) {
        for storm in &mut self.storms {
            storm.draw(surface, projection, config, real_dt);
        }
    }

    pub fn storms(&self) -> &[StormEntity] {
        &self.storms
    }

    /// Storms currently on the map.
    pub fn visible_count(&self) -> usize {
        self.storms
            .iter()
            .filter(|storm| matches!(storm.lifecycle(), Lifecycle::Active | Lifecycle::Fading))
            .count()
    }

    /// True once every storm has faded out.
    pub fn is_finished(&self) -> bool {
        self.storms
            .iter()
            .all(|storm| storm.lifecycle() == Lifecycle::Done)
    }
}
