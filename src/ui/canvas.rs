//! Central canvas: basin map, storms and the loading indicator.

use super::colors;
use crate::map_texture::MapTextureCache;
use crate::state::{AppState, Screen};
use crate::storm::PainterSurface;
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Vec2};

/// Draws the map for the current screen and, while animating, the storms
/// on top of it.
pub fn render_canvas(ctx: &egui::Context, state: &mut AppState, map: &MapTextureCache, dt: f64) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) = ui.allocate_painter(available_size, Sense::hover());
            let origin = response.rect.min;
            let map_rect = Rect::from_min_size(
                origin,
                Vec2::new(state.config.screen_width, state.config.screen_height),
            );

            render_background(&painter, map_rect, map);

            match &mut state.screen {
                Screen::Menu => {}
                Screen::Loading => render_loading(ui, map_rect),
                Screen::Animating(session) => {
                    let mut surface = PainterSurface::new(&painter, origin);
                    session.draw(&mut surface, dt);

                    // Hover readout in real window coordinates
                    let mut projection = session.projection.clone();
                    projection.update(map_rect);
                    let hovered = response
                        .hover_pos()
                        .map(|pointer| projection.screen_to_geo(pointer))
                        .filter(|coord| projection.extent.contains(*coord));

                    if let Some(coord) = hovered {
                        painter.text(
                            Pos2::new(map_rect.min.x + 10.0, map_rect.max.y - 10.0),
                            Align2::LEFT_BOTTOM,
                            format!("{:.2}°, {:.2}°", coord.y, coord.x),
                            FontId::monospace(14.0),
                            colors::canvas::HOVER_TEXT,
                        );
                    }
                }
            }
        });
}

/// Basin map stretched over the map area, or a flat ocean fill when the
/// image is unavailable.
fn render_background(painter: &Painter, map_rect: Rect, map: &MapTextureCache) {
    match map.texture() {
        Some(texture) => {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), map_rect, uv, Color32::WHITE);
        }
        None => {
            painter.rect_filled(map_rect, 0.0, colors::canvas::NO_MAP);
        }
    }
}

fn render_loading(ui: &mut egui::Ui, map_rect: Rect) {
    let center = map_rect.center();
    ui.put(
        Rect::from_center_size(center, Vec2::splat(48.0)),
        egui::Spinner::new().size(48.0),
    );
    ui.painter().text(
        center + Vec2::new(0.0, 48.0),
        Align2::CENTER_CENTER,
        "Loading storms...",
        FontId::proportional(20.0),
        colors::canvas::LOADING_TEXT,
    );
}
