#![warn(clippy::all)]

//! Stormchaser - animated tropical cyclone tracks.
//!
//! Pick a basin and a start date, then watch every storm of the season move
//! across the basin map, colored by intensity, with landfalls marked where
//! a storm crosses from water onto land.

mod config;
mod error;
mod geo;
mod loader;
mod map_texture;
mod state;
mod storm;
mod track;
mod ui;

use config::AnimationConfig;
use eframe::egui;
use loader::DatasetChannel;
use map_texture::MapTextureCache;
use state::{AppState, Screen, Session};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AnimationConfig::load();
    let size = [config.screen_width, config.screen_height];

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Stormchaser")
            .with_inner_size(size)
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Stormchaser",
        native_options,
        Box::new(|cc| Ok(Box::new(StormchaserApp::new(cc, config)))),
    )
}

/// Main application state and logic.
pub struct StormchaserApp {
    /// Application state
    state: AppState,

    /// Background loader for dataset and maps
    dataset_channel: DatasetChannel,

    /// Background map for the menu basin or the running session
    map_texture: MapTextureCache,
}

impl StormchaserApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AnimationConfig) -> Self {
        log::info!(
            "Starting at {}x{}, {:.0} simulated seconds per real second",
            config.screen_width,
            config.screen_height,
            config.simulated_per_real()
        );

        Self {
            state: AppState::new(config),
            dataset_channel: DatasetChannel::new(),
            map_texture: MapTextureCache::new(),
        }
    }

    /// Applies a finished background load.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(result) = self.dataset_channel.try_recv() else {
            return;
        };

        match result {
            Ok(mut loaded) => {
                let background = std::mem::take(&mut loaded.background);
                self.map_texture.update(ctx, loaded.basin, background);

                let session = Session::new(loaded, self.state.config.clone());
                self.state.status_message = format!(
                    "{} storms in {}",
                    session.playback.storms().len(),
                    session.basin
                );
                self.state.screen = Screen::Animating(Box::new(session));
            }
            Err(e) => {
                self.state.status_message = format!("Load failed: {}", e);
                self.state.menu.error = Some(e.to_string());
                self.state.screen = Screen::Menu;
            }
        }
    }
}

impl eframe::App for StormchaserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        let dt = ctx.input(|i| i.stable_dt);
        let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };

        if let Some(session) = self.state.session_mut() {
            session.tick(dt as f64);
        }

        if matches!(self.state.screen, Screen::Menu) {
            self.map_texture
                .ensure(ctx, self.state.menu.basin, &self.state.config);
        }

        ui::render_canvas(ctx, &mut self.state, &self.map_texture, dt as f64);

        match self.state.screen {
            Screen::Menu => {
                if let Some(request) = ui::render_menu(ctx, &mut self.state) {
                    self.state.status_message = format!("Loading {}...", request.basin);
                    self.state.screen = Screen::Loading;
                    self.dataset_channel.load(ctx.clone(), request);
                }
            }
            Screen::Loading => {}
            Screen::Animating(_) => {
                ui::render_control_bar(ctx, &mut self.state, fps);
            }
        }

        // The storms and the spinner animate every frame
        if !matches!(self.state.screen, Screen::Menu) {
            ctx.request_repaint();
        }
    }
}
