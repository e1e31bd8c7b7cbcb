//! Start menu: start date inputs and basin selector.

use super::colors;
use super::widgets::{ButtonLabel, ControlButton};
use crate::geo::Basin;
use crate::loader::LoadRequest;
use crate::state::{AppState, FIRST_YEAR};
use eframe::egui::{self, Align2, FontId, RichText, Sense, Stroke, StrokeKind, Vec2};

const TITLE: &str = "PROJECT STORMCHASER";
const TITLE_SIZE: f32 = 56.0;
const TITLE_OUTLINE: f32 = 4.0;
const INPUT_WIDTH: f32 = 100.0;
const BASIN_BUTTON_WIDTH: f32 = 170.0;
const BASINS_PER_ROW: usize = 3;

/// Renders the start menu. Returns a load request once the user submits a
/// valid start date.
pub fn render_menu(ctx: &egui::Context, state: &mut AppState) -> Option<LoadRequest> {
    let mut submitted = false;

    egui::Area::new(egui::Id::new("start_menu"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 30.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                render_title(ui);
                ui.add_space(40.0);

                ui.horizontal(|ui| {
                    date_field(ui, "Year", &mut state.menu.year, 4);
                    ui.add_space(20.0);
                    date_field(ui, "Month (optional)", &mut state.menu.month, 2);
                    ui.add_space(20.0);
                    date_field(ui, "Day (optional)", &mut state.menu.day, 2);
                });

                ui.add_space(30.0);
                render_basin_selector(ui, &mut state.menu.basin);
                ui.add_space(30.0);

                let start = ControlButton::new(ButtonLabel::Start, 140.0, colors::controls::BUTTON);
                if ui.add(start).clicked() {
                    submitted = true;
                }

                ui.add_space(8.0);
                ui.label(
                    RichText::new("Press Enter to Submit")
                        .size(18.0)
                        .color(colors::menu::HINT),
                );
                ui.label(
                    RichText::new(format!("Seasons from {} onward", FIRST_YEAR))
                        .size(13.0)
                        .color(colors::menu::HINT),
                );

                if let Some(error) = &state.menu.error {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).size(16.0).color(colors::menu::ERROR));
                }

                ui.add_space(8.0);
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(colors::menu::HINT),
                );
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
        submitted = true;
    }
    if !submitted {
        return None;
    }

    let today = chrono::Local::now().date_naive();
    let start = state.menu.start_date(today)?;
    log::info!("Starting {} from {}", state.menu.basin, start);
    Some(LoadRequest {
        basin: state.menu.basin,
        start,
        config: state.config.clone(),
    })
}

/// Title text with a solid outline.
fn render_title(ui: &mut egui::Ui) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(700.0, TITLE_SIZE + 2.0 * TITLE_OUTLINE), Sense::hover());
    let painter = ui.painter();
    let font = FontId::proportional(TITLE_SIZE);
    let center = rect.center();

    for (dx, dy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        painter.text(
            center + Vec2::new(dx, dy) * TITLE_OUTLINE,
            Align2::CENTER_CENTER,
            TITLE,
            font.clone(),
            colors::menu::TITLE_OUTLINE,
        );
    }
    painter.text(center, Align2::CENTER_CENTER, TITLE, font, colors::menu::TITLE);
}

/// Labelled numeric text field, limited to `max_digits` digits.
fn date_field(ui: &mut egui::Ui, label: &str, text: &mut String, max_digits: usize) {
    ui.vertical(|ui| {
        ui.label(RichText::new(label).size(14.0).color(colors::controls::TEXT));
        let response = ui.add(
            egui::TextEdit::singleline(text)
                .desired_width(INPUT_WIDTH)
                .font(FontId::proportional(24.0)),
        );

        if response.changed() {
            text.retain(|c| c.is_ascii_digit());
            text.truncate(max_digits);
        }

        let border = if response.has_focus() {
            colors::menu::INPUT_ACTIVE
        } else {
            colors::menu::INPUT_INACTIVE
        };
        ui.painter()
            .rect_stroke(response.rect, 6.0, Stroke::new(2.0, border), StrokeKind::Outside);
    });
}

/// One button per basin; exactly one is selected.
fn render_basin_selector(ui: &mut egui::Ui, selected: &mut Basin) {
    for row in Basin::all().chunks(BASINS_PER_ROW) {
        ui.horizontal(|ui| {
            for &basin in row {
                let button = ControlButton::new(
                    ButtonLabel::Basin(basin),
                    BASIN_BUTTON_WIDTH,
                    colors::menu::BASIN,
                )
                .on_fill(colors::menu::BASIN_SELECTED)
                .text_color(colors::menu::BASIN_TEXT)
                .toggled(*selected == basin);

                if ui.add(button).clicked() && *selected != basin {
                    log::debug!("Selected basin {}", basin);
                    *selected = basin;
                }
            }
        });
        ui.add_space(10.0);
    }
}
