//! Drawing surface the storm engine renders into.
//!
//! Storms emit primitive draw calls in map screen coordinates. The app
//! forwards them to an egui painter; tests record them instead.

use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};

pub trait RenderSurface {
    /// Open polyline through `points`.
    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke);

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn circle_filled(&mut self, center: Pos2, radius: f32, color: Color32);

    /// Text centered on `pos`.
    fn text(&mut self, pos: Pos2, text: &str, size: f32, color: Color32);
}

/// egui painter with map coordinates offset to the canvas origin.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    offset: Vec2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            offset: origin.to_vec2(),
        }
    }
}

impl RenderSurface for PainterSurface<'_> {
    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke) {
        let offset = self.offset;
        let points = points.into_iter().map(|p| p + offset).collect();
        self.painter.add(Shape::line(points, stroke));
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([from + self.offset, to + self.offset], stroke);
    }

    fn circle_filled(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(center + self.offset, radius, color);
    }

    fn text(&mut self, pos: Pos2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            pos + self.offset,
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(size),
            color,
        );
    }
}
