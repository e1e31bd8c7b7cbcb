//! Background session loading.
//!
//! Reading a season of tracks and decoding the basin maps takes long enough
//! to stall a frame, so it runs on a worker thread. The worker sends exactly
//! one result back over a channel, which the UI polls every frame.

use crate::config::AnimationConfig;
use crate::error::StormResult;
use crate::geo::{Basin, ReferenceRaster};
use crate::map_texture::load_color_image;
use crate::track::Dataset;
use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, ColorImage, Vec2};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use web_time::Instant;

/// Cached track file for a basin and season.
pub fn dataset_path(config: &AnimationConfig, basin: Basin, year: i32) -> PathBuf {
    config
        .data_dir
        .join(format!("{}_{}_data.json", basin.abbreviation(), year))
}

/// Full-color map drawn behind the storms.
pub fn detailed_map_path(config: &AnimationConfig, basin: Basin) -> PathBuf {
    config
        .resources_dir
        .join(format!("{}_detailed_map.png", basin.id()))
}

/// Two-color map used for water/land sampling.
pub fn reference_map_path(config: &AnimationConfig, basin: Basin) -> PathBuf {
    config
        .resources_dir
        .join(format!("{}_simple_map.png", basin.id()))
}

/// What the user picked on the start menu.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub basin: Basin,
    pub start: NaiveDate,
    pub config: AnimationConfig,
}

/// Everything a session needs before the first frame.
pub struct LoadedSession {
    pub basin: Basin,
    pub start: NaiveDate,
    pub dataset: Dataset,
    pub raster: ReferenceRaster,
    pub background: ColorImage,
}

pub type LoadResult = StormResult<LoadedSession>;

/// Channel carrying the result of a background session load.
pub struct DatasetChannel {
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl Default for DatasetChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Spawns a worker that loads the dataset and maps for `request`.
    pub fn load(&self, ctx: egui::Context, request: LoadRequest) {
        let sender = self.sender.clone();

        std::thread::spawn(move || {
            let result = load_session(&request);
            if let Err(e) = &result {
                log::error!("Failed to load {} from {}: {}", request.basin, request.start, e);
            }
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a finished load.
    pub fn try_recv(&self) -> Option<LoadResult> {
        self.receiver.try_recv().ok()
    }
}

/// Loads the season's tracks, keeps storms from `start` on, and decodes
/// both basin maps.
pub fn load_session(request: &LoadRequest) -> LoadResult {
    let started = Instant::now();
    let config = &request.config;
    let basin = request.basin;

    let path = dataset_path(config, basin, request.start.year());
    log::info!("Loading tracks from {}", path.display());
    let dataset = Dataset::load_file(&path)?.starting_from(request.start)?;

    let screen_size = Vec2::new(config.screen_width, config.screen_height);
    let raster = ReferenceRaster::load(
        &reference_map_path(config, basin),
        config.ocean_color,
        screen_size,
    )?;
    let background = load_color_image(&detailed_map_path(config, basin))?;

    log::info!(
        "Loaded {} storms for {} in {:.0} ms",
        dataset.len(),
        basin,
        started.elapsed().as_secs_f64() * 1000.0
    );

    Ok(LoadedSession {
        basin,
        start: request.start,
        dataset,
        raster,
        background,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StormError;
    use std::path::Path;

    #[test]
    fn resource_paths_follow_naming_scheme() {
        let config = AnimationConfig::default();
        assert_eq!(
            dataset_path(&config, Basin::WesternPacific, 2019),
            Path::new("data/wp_2019_data.json")
        );
        assert_eq!(
            detailed_map_path(&config, Basin::NorthernAtlantic),
            Path::new("resources/northern_atlantic_detailed_map.png")
        );
        assert_eq!(
            reference_map_path(&config, Basin::SouthernIndian),
            Path::new("resources/southern_indian_simple_map.png")
        );
    }

    #[test]
    fn missing_dataset_is_an_io_error() {
        let config = AnimationConfig {
            data_dir: PathBuf::from("does/not/exist"),
            ..Default::default()
        };
        let request = LoadRequest {
            basin: Basin::EasternPacific,
            start: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            config,
        };
        assert!(matches!(load_session(&request), Err(StormError::Io(_))));
    }

    #[test]
    fn channel_reports_failure_once() {
        let channel = DatasetChannel::new();
        let request = LoadRequest {
            basin: Basin::WesternPacific,
            start: NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
            config: AnimationConfig {
                data_dir: PathBuf::from("does/not/exist"),
                ..Default::default()
            },
        };
        channel.load(egui::Context::default(), request);

        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        let result = loop {
            if let Some(result) = channel.try_recv() {
                break result;
            }
            assert!(Instant::now() < deadline);
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(result.is_err());
        assert!(channel.try_recv().is_none());
    }
}
