//! Rounded text button shared by the menu and the control bar.

use crate::geo::Basin;
use eframe::egui::{self, Align2, Color32, FontId, Response, Sense, Ui, Vec2, Widget};

const HEIGHT: f32 = 50.0;
const CORNER_RADIUS: f32 = 12.0;
const FONT_SIZE: f32 = 20.0;

/// What a button says.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonLabel {
    PlayPause,
    Skip { days: i64 },
    BackToMenu,
    Start,
    Basin(Basin),
}

impl ButtonLabel {
    /// Label text; `on` is the toggle state for toggleable buttons.
    pub fn text(&self, on: bool) -> String {
        match self {
            ButtonLabel::PlayPause if on => "PAUSE".to_string(),
            ButtonLabel::PlayPause => "PLAY".to_string(),
            ButtonLabel::Skip { days: 7 } => ">> 1 WEEK".to_string(),
            ButtonLabel::Skip { days: 1 } => ">> 1 DAY".to_string(),
            ButtonLabel::Skip { days } => format!(">> {} DAYS", days),
            ButtonLabel::BackToMenu => "BACK TO MENU".to_string(),
            ButtonLabel::Start => "START".to_string(),
            ButtonLabel::Basin(basin) => basin.label().to_string(),
        }
    }
}

/// A filled button with an optional on/off state.
///
/// Toggleable buttons show their state through the label and, when
/// `on_fill` is set, through the fill color.
pub struct ControlButton {
    label: ButtonLabel,
    toggled: Option<bool>,
    width: f32,
    fill: Color32,
    on_fill: Option<Color32>,
    text_color: Color32,
}

impl ControlButton {
    pub fn new(label: ButtonLabel, width: f32, fill: Color32) -> Self {
        Self {
            label,
            toggled: None,
            width,
            fill,
            on_fill: None,
            text_color: Color32::WHITE,
        }
    }

    pub fn toggled(mut self, on: bool) -> Self {
        self.toggled = Some(on);
        self
    }

    pub fn on_fill(mut self, fill: Color32) -> Self {
        self.on_fill = Some(fill);
        self
    }

    pub fn text_color(mut self, color: Color32) -> Self {
        self.text_color = color;
        self
    }

    pub fn is_on(&self) -> bool {
        self.toggled.unwrap_or(false)
    }

    pub fn text(&self) -> String {
        self.label.text(self.is_on())
    }

    fn current_fill(&self) -> Color32 {
        match (self.is_on(), self.on_fill) {
            (true, Some(fill)) => fill,
            _ => self.fill,
        }
    }
}

impl Widget for ControlButton {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::new(self.width, HEIGHT), Sense::click());

        if ui.is_rect_visible(rect) {
            let fill = if response.hovered() {
                self.current_fill().gamma_multiply(0.85)
            } else {
                self.current_fill()
            };
            let painter = ui.painter();
            painter.rect_filled(rect, CORNER_RADIUS, fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.text(),
                FontId::proportional(FONT_SIZE),
                self.text_color,
            );
        }

        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_button_label_follows_state() {
        let button = ControlButton::new(ButtonLabel::PlayPause, 100.0, Color32::BLUE);
        assert_eq!(button.text(), "PLAY");
        assert_eq!(button.toggled(true).text(), "PAUSE");
    }

    #[test]
    fn skip_label_names_the_span() {
        assert_eq!(ButtonLabel::Skip { days: 7 }.text(false), ">> 1 WEEK");
        assert_eq!(ButtonLabel::Skip { days: 3 }.text(false), ">> 3 DAYS");
    }

    #[test]
    fn selected_basin_uses_on_fill() {
        let plain = ControlButton::new(ButtonLabel::Basin(Basin::NorthernIndian), 150.0, Color32::GRAY)
            .on_fill(Color32::GREEN);
        assert_eq!(plain.current_fill(), Color32::GRAY);
        assert_eq!(plain.text(), "North Indian");

        let selected = ControlButton::new(ButtonLabel::Basin(Basin::NorthernIndian), 150.0, Color32::GRAY)
            .on_fill(Color32::GREEN)
            .toggled(true);
        assert_eq!(selected.current_fill(), Color32::GREEN);
        // Untoggleable buttons never look pressed
        let back = ControlButton::new(ButtonLabel::BackToMenu, 200.0, Color32::RED).on_fill(Color32::GREEN);
        assert_eq!(back.current_fill(), Color32::RED);
    }
}
