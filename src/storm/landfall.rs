//! Landfall markers.
//!
//! A marker is dropped where a storm first crosses from water onto land. It
//! starts large and shrinks to its resting size, and it shares the storm's
//! opacity so it fades out together with the storm.

use super::surface::RenderSurface;
use eframe::egui::{Color32, Pos2, Stroke};

/// Half-length of each cross arm at scale 1.0, in pixels.
const ARM_LENGTH: f32 = 4.5;
const STROKE_WIDTH: f32 = 3.0;
const CROSS_COLOR: [u8; 3] = [255, 0, 0];

#[derive(Debug, Clone, PartialEq)]
pub struct LandfallMarker {
    /// Map screen position, fixed when the marker is created
    pub position: Pos2,
    /// Zoom factor, decays toward 1.0
    pub scale: f32,
    /// Opacity 0-255, mirrors the owning storm
    pub fade_alpha: f32,
}

impl LandfallMarker {
    pub fn new(position: Pos2, scale: f32, fade_alpha: f32) -> Self {
        Self {
            position,
            scale,
            fade_alpha,
        }
    }

    fn update(&mut self, dt: f32, shrink_rate: f32, storm_opacity: f32) {
        if self.scale > 1.0 {
            self.scale = (self.scale - shrink_rate * dt).max(1.0);
        }
        self.fade_alpha = storm_opacity;
    }

    /// Draws a diagonal "X" centered on the marker.
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if self.fade_alpha <= 0.0 {
            return;
        }
        let [r, g, b] = CROSS_COLOR;
        let color = Color32::from_rgba_unmultiplied(r, g, b, self.fade_alpha.min(255.0) as u8);
        let stroke = Stroke::new(STROKE_WIDTH, color);
        let arm = ARM_LENGTH * self.scale;
        let c = self.position;

        surface.line(
            Pos2::new(c.x - arm, c.y - arm),
            Pos2::new(c.x + arm, c.y + arm),
            stroke,
        );
        surface.line(
            Pos2::new(c.x - arm, c.y + arm),
            Pos2::new(c.x + arm, c.y - arm),
            stroke,
        );
    }
}

/// Landfall markers belonging to one storm, oldest first.
#[derive(Debug, Clone, Default)]
pub struct LandfallMarkerSet {
    markers: Vec<LandfallMarker>,
}

impl LandfallMarkerSet {
    pub fn spawn(&mut self, position: Pos2, scale: f32, fade_alpha: f32) {
        self.markers
            .push(LandfallMarker::new(position, scale, fade_alpha));
    }

    /// Advances every marker and drops the ones that have faded out.
    pub fn update(&mut self, dt: f32, shrink_rate: f32, storm_opacity: f32) {
        for marker in &mut self.markers {
            marker.update(dt, shrink_rate, storm_opacity);
        }
        self.markers.retain(|marker| marker.fade_alpha > 0.0);
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        for marker in &self.markers {
            marker.draw(surface);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LandfallMarker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::surface::testing::RecordingSurface;
    use super::*;

    #[test]
    fn scale_shrinks_to_one() {
        let mut set = LandfallMarkerSet::default();
        set.spawn(Pos2::new(10.0, 10.0), 30.0, 255.0);

        set.update(0.1, 80.0, 255.0);
        let scale = set.iter().next().unwrap().scale;
        assert!((scale - 22.0).abs() < 1e-4);

        set.update(1.0, 80.0, 255.0);
        assert_eq!(set.iter().next().unwrap().scale, 1.0);
    }

    #[test]
    fn alpha_follows_storm_and_faded_markers_are_dropped() {
        let mut set = LandfallMarkerSet::default();
        set.spawn(Pos2::new(0.0, 0.0), 30.0, 255.0);
        set.spawn(Pos2::new(5.0, 5.0), 30.0, 255.0);

        set.update(0.016, 80.0, 120.0);
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|m| m.fade_alpha == 120.0));

        set.update(0.016, 80.0, 0.0);
        assert!(set.is_empty());
    }

    #[test]
    fn draws_two_crossing_lines_scaled() {
        let marker = LandfallMarker::new(Pos2::new(100.0, 100.0), 2.0, 200.0);
        let mut surface = RecordingSurface::default();
        marker.draw(&mut surface);

        let lines = surface.lines();
        assert_eq!(lines.len(), 2);
        let (from, to, stroke) = lines[0];
        assert_eq!(from, Pos2::new(91.0, 91.0));
        assert_eq!(to, Pos2::new(109.0, 109.0));
        assert_eq!(stroke.color.a(), 200);
    }

    #[test]
    fn invisible_marker_draws_nothing() {
        let marker = LandfallMarker::new(Pos2::new(1.0, 1.0), 1.0, 0.0);
        let mut surface = RecordingSurface::default();
        marker.draw(&mut surface);
        assert!(surface.commands.is_empty());
    }
}
