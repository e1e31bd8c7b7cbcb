//! Playback control bar drawn over the running animation.

use super::colors;
use super::widgets::{ButtonLabel, ControlButton};
use crate::state::AppState;
use eframe::egui::{self, Align2, RichText, Vec2};

const MARGIN: f32 = 10.0;

/// Renders the play/skip/back buttons, frame rate and clock.
pub fn render_control_bar(ctx: &egui::Context, state: &mut AppState, fps: f32) {
    let mut back_to_menu = false;

    let Some(session) = state.session_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("control_bar"))
        .anchor(Align2::LEFT_TOP, Vec2::new(MARGIN, MARGIN))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = MARGIN;

                let play = ControlButton::new(ButtonLabel::PlayPause, 100.0, colors::controls::BUTTON)
                    .toggled(session.is_playing());
                if ui.add(play).clicked() {
                    session.toggle_play();
                }

                let skip = ControlButton::new(
                    ButtonLabel::Skip {
                        days: session.config.skip_days,
                    },
                    140.0,
                    colors::controls::BUTTON,
                );
                if ui.add(skip).clicked() {
                    session.skip_forward();
                }

                let back =
                    ControlButton::new(ButtonLabel::BackToMenu, 200.0, colors::controls::BACK_BUTTON);
                if ui.add(back).clicked() {
                    back_to_menu = true;
                }
            });

            ui.add_space(MARGIN);
            ui.label(
                RichText::new(format!("FPS: {:.2}", fps))
                    .size(20.0)
                    .color(colors::controls::READOUT),
            );

            let storms = if session.playback.is_finished() {
                "All storms have passed".to_string()
            } else {
                format!("Storms on map: {}", session.playback.visible_count())
            };
            ui.label(
                RichText::new(storms)
                    .size(16.0)
                    .color(colors::controls::READOUT),
            );
        });

    egui::Area::new(egui::Id::new("playback_clock"))
        .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-MARGIN, -MARGIN))
        .show(ctx, |ui| {
            ui.label(
                RichText::new(session.clock_label())
                    .size(20.0)
                    .color(colors::controls::READOUT),
            );
        });

    if back_to_menu {
        state.back_to_menu();
    }
}
