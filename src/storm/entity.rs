//! Storm entity: one animated storm moving along its recorded track.
//!
//! Each frame the entity advances at constant speed toward the next fix,
//! fades in while moving and fades out after the last fix, blends its icon
//! color toward the arriving fix's intensity class, and watches the terrain
//! under it to mark landfalls.

use super::icon;
use super::landfall::LandfallMarkerSet;
use super::surface::RenderSurface;
use crate::config::AnimationConfig;
use crate::geo::{MapProjection, TerrainSampler};
use crate::track::{StormTrack, TrackPoint};
use eframe::egui::Color32;
use geo_types::Coord;

pub const MAX_OPACITY: f64 = 255.0;

/// Remaining distance (degrees) under which a storm counts as arrived.
///
/// Absorbs rounding left over from summing many frame deltas.
const SNAP_EPSILON: f64 = 1e-9;

/// Opacity this close to a fade's end point counts as reached.
const OPACITY_EPSILON: f64 = 1e-6;

/// Where a storm is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Playback has not reached the storm's first fix yet
    Pending,
    /// Moving along the track
    Active,
    /// Past the last fix, opacity draining
    Fading,
    /// Fully faded out, no further updates
    Done,
}

/// Shared inputs for one update step.
pub struct StepContext<'a> {
    pub config: &'a AnimationConfig,
    /// Projection into map screen coordinates
    pub projection: &'a MapProjection,
    pub terrain: &'a dyn TerrainSampler,
}

pub struct StormEntity {
    track: StormTrack,
    start_offset_secs: f64,
    segment_index: usize,
    position: Coord<f64>,
    /// Distance covered along the current segment, in degrees
    segment_travelled: f64,
    opacity: f64,
    /// Icon RGB, blended each frame
    color: [f64; 3],
    rotation_deg: f32,
    /// Last sampled terrain; `None` until the first sample
    over_water: Option<bool>,
    lifecycle: Lifecycle,
    markers: LandfallMarkerSet,
}

impl StormEntity {
    pub fn new(track: StormTrack) -> Self {
        let position = track.points[0].position;
        let start_offset_secs = track.start_offset_secs();
        Self {
            track,
            start_offset_secs,
            segment_index: 0,
            position,
            segment_travelled: 0.0,
            opacity: 0.0,
            color: [0.0; 3],
            rotation_deg: 0.0,
            over_water: None,
            lifecycle: Lifecycle::Pending,
            markers: LandfallMarkerSet::default(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn position(&self) -> Coord<f64> {
        self.position
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn is_over_water(&self) -> bool {
        self.over_water.unwrap_or(true)
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    pub fn markers(&self) -> &LandfallMarkerSet {
        &self.markers
    }

    /// Icon color with alpha following opacity.
    pub fn color(&self) -> Color32 {
        let [r, g, b] = self.color.map(|c| c.clamp(0.0, 255.0) as u8);
        Color32::from_rgba_unmultiplied(r, g, b, self.opacity as u8)
    }

    /// Fix the storm is currently departing from.
    pub fn current_point(&self) -> &TrackPoint {
        &self.track.points[self.segment_index]
    }

    fn is_at_last_point(&self) -> bool {
        self.segment_index + 1 >= self.track.points.len()
    }

    /// Advances the storm by one frame.
    ///
    /// `elapsed_secs` is simulated time since the dataset epoch and `dt` is
    /// the frame's real time in seconds.
    pub fn update(&mut self, elapsed_secs: f64, dt: f64, ctx: &StepContext<'_>) {
        let config = ctx.config;
        self.markers.update(
            dt as f32,
            config.marker_shrink_rate,
            self.opacity as f32,
        );

        if self.lifecycle == Lifecycle::Done {
            return;
        }
        if elapsed_secs < self.start_offset_secs {
            self.lifecycle = Lifecycle::Pending;
            return;
        }

        if self.is_at_last_point() {
            self.fade_out(dt, config);
            return;
        }

        if self.lifecycle == Lifecycle::Pending {
            log::debug!("{} entered the map", self.track.name);
        }
        self.lifecycle = Lifecycle::Active;

        self.check_landfall(ctx);
        self.advance_position(dt, config);

        if self.opacity < MAX_OPACITY {
            self.opacity =
                (self.opacity + MAX_OPACITY / config.fade_in_secs * dt).min(MAX_OPACITY);
            if MAX_OPACITY - self.opacity <= OPACITY_EPSILON {
                self.opacity = MAX_OPACITY;
            }
        }

        self.blend_color(dt, config);

        let target = self.track.points[self.segment_index + 1].position;
        if self.position == target {
            self.segment_index += 1;
            self.segment_travelled = 0.0;
        }
    }

    fn fade_out(&mut self, dt: f64, config: &AnimationConfig) {
        if self.lifecycle != Lifecycle::Fading {
            log::debug!("{} reached its last fix", self.track.name);
        }
        self.lifecycle = Lifecycle::Fading;
        self.opacity = (self.opacity - MAX_OPACITY / config.fade_out_secs * dt).max(0.0);

        if self.opacity <= OPACITY_EPSILON {
            self.opacity = 0.0;
            self.lifecycle = Lifecycle::Done;
            log::debug!("{} faded out", self.track.name);
        }
    }

    fn check_landfall(&mut self, ctx: &StepContext<'_>) {
        let screen = ctx.projection.geo_to_screen(self.position);
        let water = ctx.terrain.is_water(screen);

        if self.over_water == Some(true) && !water {
            self.markers.spawn(
                screen,
                ctx.config.marker_initial_scale,
                self.opacity as f32,
            );
            log::info!(
                "{} made landfall at lat {:.1} lon {:.1} ({} on map)",
                self.track.name,
                self.position.y,
                self.position.x,
                self.markers.len()
            );
        }
        self.over_water = Some(water);
    }

    /// Moves toward the next fix at the speed that covers the segment in its
    /// scaled duration, snapping onto the fix once it is reached.
    fn advance_position(&mut self, dt: f64, config: &AnimationConfig) {
        let from = &self.track.points[self.segment_index];
        let to = &self.track.points[self.segment_index + 1];

        let delta = to.position - from.position;
        let length = delta.x.hypot(delta.y);
        let sim_secs = (to.time - from.time).num_milliseconds() as f64 / 1000.0;
        let duration = sim_secs * config.time_scale_factor;

        if length == 0.0 || duration <= 0.0 {
            self.position = to.position;
            return;
        }

        self.segment_travelled += length / duration * dt;
        if self.segment_travelled >= length - SNAP_EPSILON {
            self.segment_travelled = length;
            self.position = to.position;
        } else {
            let fraction = self.segment_travelled / length;
            self.position = from.position + delta * fraction;
        }
    }

    /// Exponential smoothing toward the arriving fix's class color.
    fn blend_color(&mut self, dt: f64, config: &AnimationConfig) {
        let class = self.track.points[self.segment_index + 1].class;
        let target = config.category_color(class);
        let k = (config.color_blend_rate * dt).min(1.0);
        for (channel, goal) in self.color.iter_mut().zip(target) {
            *channel += (goal as f64 - *channel) * k;
        }
    }

    /// Emits draw calls for the storm and its landfall markers.
    ///
    /// Only the icon rotation changes here.
    pub fn draw(
        &mut self,
        surface: &mut dyn RenderSurface,
        projection: &MapProjection,
        config: &AnimationConfig,
        dt: f64,
    ) {
        if self.opacity <= 0.0 {
            return;
        }

        self.markers.draw(surface);

        let point = self.current_point();
        let wind = point.wind_label();
        let pressure = point.pressure_label();
        let spin = icon::spin_rate(point.class, config);

        let center = projection.geo_to_screen(self.position);
        icon::draw_icon(
            surface,
            center,
            self.rotation_deg,
            self.color(),
            [self.track.name.as_str(), wind.as_str(), pressure.as_str()],
        );

        self.rotation_deg = (self.rotation_deg + spin * dt as f32) % 360.0;
    }
}
