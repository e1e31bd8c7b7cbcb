//! Storm track dataset.
//!
//! Tracks come from the scraper's cached JSON: one object per storm with a
//! name and a `path` of timestamped fixes. Every fix must carry a time and a
//! position; a storm that cannot be placed on the map rejects the whole file.

use crate::error::{StormError, StormResult};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use geo_types::Coord;
use serde::Deserialize;
use std::path::Path;

/// Timestamp formats accepted in the dataset, most common first.
const TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Highest intensity class.
pub const MAX_CLASS: u8 = 5;

/// Intensity class for a sustained wind speed in knots.
pub fn class_from_wind_knots(knots: u32) -> u8 {
    match knots {
        0..=33 => 0,
        34..=63 => 1,
        64..=82 => 2,
        83..=95 => 3,
        96..=112 => 4,
        _ => 5,
    }
}

/// A single fix along a storm track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub time: NaiveDateTime,
    /// Position as (x = longitude, y = latitude)
    pub position: Coord<f64>,
    /// Intensity class, 0 to 5
    pub class: u8,
    /// Wind speed as published, display only
    pub wind_speed: Option<String>,
    /// Central pressure as published, display only
    pub pressure: Option<String>,
}

impl TrackPoint {
    pub fn new(time: NaiveDateTime, lat: f64, lon: f64, class: u8) -> Self {
        Self {
            time,
            position: Coord { x: lon, y: lat },
            class,
            wind_speed: None,
            pressure: None,
        }
    }

    pub fn wind_label(&self) -> String {
        format!("{} kt", self.wind_speed.as_deref().unwrap_or("N/A"))
    }

    pub fn pressure_label(&self) -> String {
        format!("{} hPa", self.pressure.as_deref().unwrap_or("N/A"))
    }
}

/// One storm's ordered track.
#[derive(Debug, Clone)]
pub struct StormTrack {
    pub name: String,
    pub points: Vec<TrackPoint>,
    /// Simulated time from the dataset's earliest fix to this storm's first fix
    pub start_offset: TimeDelta,
}

impl StormTrack {
    /// Builds a track, checking it is non-empty and ordered in time.
    pub fn new(name: impl Into<String>, points: Vec<TrackPoint>) -> StormResult<Self> {
        let name = name.into();
        if points.is_empty() {
            return Err(StormError::data(name, 0, "track has no points"));
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(StormError::data(
                    name,
                    index + 1,
                    format!("time {} is before {}", pair[1].time, pair[0].time),
                ));
            }
        }
        if let Some(index) = points.iter().position(|p| p.class > MAX_CLASS) {
            return Err(StormError::data(name, index, "intensity class above 5"));
        }

        Ok(Self {
            name,
            points,
            start_offset: TimeDelta::zero(),
        })
    }

    pub fn first_time(&self) -> NaiveDateTime {
        self.points[0].time
    }

    pub fn start_offset_secs(&self) -> f64 {
        self.start_offset.num_milliseconds() as f64 / 1000.0
    }
}

/// All storms animated in one session.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub storms: Vec<StormTrack>,
    /// Earliest fix across every storm
    pub epoch: NaiveDateTime,
}

impl Dataset {
    /// Builds a dataset and computes each storm's start offset.
    pub fn new(mut storms: Vec<StormTrack>) -> StormResult<Self> {
        let epoch = storms
            .iter()
            .flat_map(|storm| storm.points.iter().map(|p| p.time))
            .min()
            .ok_or_else(|| StormError::EmptyDataset("dataset contains no storms".to_string()))?;

        for storm in &mut storms {
            storm.start_offset = storm.first_time() - epoch;
        }

        Ok(Self { storms, epoch })
    }

    pub fn from_json(json: &str) -> StormResult<Self> {
        let raw: Vec<RawStorm> = serde_json::from_str(json)?;
        let storms = raw
            .into_iter()
            .map(RawStorm::into_track)
            .collect::<StormResult<Vec<_>>>()?;
        Self::new(storms)
    }

    pub fn load_file(path: &Path) -> StormResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Keeps only storms whose first fix is on or after `start`.
    pub fn starting_from(self, start: NaiveDate) -> StormResult<Self> {
        let cutoff = start.and_time(chrono::NaiveTime::MIN);
        let storms: Vec<StormTrack> = self
            .storms
            .into_iter()
            .filter(|storm| storm.first_time() >= cutoff)
            .collect();

        if storms.is_empty() {
            return Err(StormError::EmptyDataset(format!(
                "no storms found starting on or after {}",
                start
            )));
        }
        Self::new(storms)
    }

    pub fn len(&self) -> usize {
        self.storms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storms.is_empty()
    }

    /// Time of the last fix across every storm.
    pub fn last_time(&self) -> NaiveDateTime {
        self.storms
            .iter()
            .filter_map(|storm| storm.points.last().map(|p| p.time))
            .max()
            .unwrap_or(self.epoch)
    }
}

/// Storm as stored in the cached JSON.
#[derive(Deserialize)]
struct RawStorm {
    name: String,
    path: Vec<RawPoint>,
}

#[derive(Deserialize)]
struct RawPoint {
    time: Option<String>,
    lat: Option<f64>,
    long: Option<f64>,
    speed: Option<DisplayValue>,
    pressure: Option<DisplayValue>,
    class: Option<u8>,
}

/// Display field that may be stored either as text or as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum DisplayValue {
    Text(String),
    Number(f64),
}

impl DisplayValue {
    fn into_text(self) -> String {
        match self {
            DisplayValue::Text(text) => text,
            DisplayValue::Number(n) => format!("{}", n),
        }
    }
}

impl RawStorm {
    fn into_track(self) -> StormResult<StormTrack> {
        let name = self.name;
        let points = self
            .path
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_point(&name, index))
            .collect::<StormResult<Vec<_>>>()?;
        StormTrack::new(name, points)
    }
}

impl RawPoint {
    fn into_point(self, storm: &str, index: usize) -> StormResult<TrackPoint> {
        let time_text = self
            .time
            .ok_or_else(|| StormError::data(storm, index, "missing time"))?;
        let time = parse_time(&time_text)
            .ok_or_else(|| StormError::data(storm, index, format!("bad time {:?}", time_text)))?;
        let lat = self
            .lat
            .filter(|v| v.is_finite())
            .ok_or_else(|| StormError::data(storm, index, "missing latitude"))?;
        let lon = self
            .long
            .filter(|v| v.is_finite())
            .ok_or_else(|| StormError::data(storm, index, "missing longitude"))?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(StormError::data(
                storm,
                index,
                format!("latitude {} out of range", lat),
            ));
        }

        let wind_speed = self.speed.map(DisplayValue::into_text);
        let class = match self.class {
            Some(class) => class,
            None => wind_speed
                .as_deref()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .map(class_from_wind_knots)
                .unwrap_or(0),
        };

        Ok(TrackPoint {
            time,
            position: Coord { x: lon, y: lat },
            class,
            wind_speed,
            pressure: self.pressure.map(DisplayValue::into_text),
        })
    }
}

fn parse_time(text: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text.trim(), format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "name": "HAGIBIS",
            "path": [
                {"time": "2019-10-05 00:00", "lat": 13.5, "long": 160.1, "speed": "30", "pressure": "1006", "class": 0},
                {"time": "2019-10-05 06:00", "lat": 14.0, "long": 159.0, "speed": "45", "pressure": "998", "class": 1},
                {"time": "2019-10-05 12:00", "lat": 14.6, "long": 157.9, "speed": null, "pressure": null, "class": 1}
            ]
        },
        {
            "name": "NEOGURI",
            "path": [
                {"time": "2019-10-15 18:00:00", "lat": 16.0, "long": 135.0, "speed": 70}
            ]
        }
    ]"#;

    #[test]
    fn parses_cached_json() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 2);

        let hagibis = &dataset.storms[0];
        assert_eq!(hagibis.name, "HAGIBIS");
        assert_eq!(hagibis.points.len(), 3);
        assert_eq!(hagibis.points[1].position, Coord { x: 159.0, y: 14.0 });
        assert_eq!(hagibis.points[1].wind_label(), "45 kt");
        assert_eq!(hagibis.points[2].pressure_label(), "N/A hPa");
    }

    #[test]
    fn start_offsets_are_relative_to_earliest_fix() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.storms[0].start_offset, TimeDelta::zero());
        // 2019-10-05 00:00 -> 2019-10-15 18:00
        assert_eq!(
            dataset.storms[1].start_offset,
            TimeDelta::days(10) + TimeDelta::hours(18)
        );
        assert_eq!(dataset.storms[1].start_offset_secs(), 930_600.0);
    }

    #[test]
    fn missing_class_comes_from_wind_speed() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let neoguri = &dataset.storms[1];
        assert_eq!(neoguri.points[0].class, 2);
        assert_eq!(neoguri.points[0].wind_label(), "70 kt");
    }

    #[test]
    fn wind_speed_classes() {
        assert_eq!(class_from_wind_knots(20), 0);
        assert_eq!(class_from_wind_knots(34), 1);
        assert_eq!(class_from_wind_knots(63), 1);
        assert_eq!(class_from_wind_knots(64), 2);
        assert_eq!(class_from_wind_knots(95), 3);
        assert_eq!(class_from_wind_knots(112), 4);
        assert_eq!(class_from_wind_knots(160), 5);
    }

    #[test]
    fn missing_coordinate_fails_fast() {
        let json = r#"[{"name": "X", "path": [
            {"time": "2020-01-01 00:00", "lat": 10.0, "long": 130.0, "class": 0},
            {"time": "2020-01-01 06:00", "lat": null, "long": 131.0, "class": 0}
        ]}]"#;
        let err = Dataset::from_json(json).unwrap_err();
        match err {
            StormError::Data { storm, index, reason } => {
                assert_eq!(storm, "X");
                assert_eq!(index, 1);
                assert!(reason.contains("latitude"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_time_fails_fast() {
        let json = r#"[{"name": "X", "path": [
            {"time": "yesterday", "lat": 10.0, "long": 130.0, "class": 0}
        ]}]"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(StormError::Data { index: 0, .. })
        ));
    }

    #[test]
    fn decreasing_time_is_rejected() {
        let t0 = parse_time("2020-01-01 06:00").unwrap();
        let t1 = parse_time("2020-01-01 00:00").unwrap();
        let result = StormTrack::new(
            "BACKWARDS",
            vec![
                TrackPoint::new(t0, 10.0, 130.0, 0),
                TrackPoint::new(t1, 11.0, 131.0, 0),
            ],
        );
        assert!(matches!(result, Err(StormError::Data { index: 1, .. })));
    }

    #[test]
    fn empty_track_is_rejected() {
        assert!(StormTrack::new("NOTHING", Vec::new()).is_err());
        assert!(matches!(
            Dataset::new(Vec::new()),
            Err(StormError::EmptyDataset(_))
        ));
    }

    #[test]
    fn filtering_recomputes_epoch() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let start = NaiveDate::from_ymd_opt(2019, 10, 10).unwrap();
        let filtered = dataset.starting_from(start).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.storms[0].name, "NEOGURI");
        assert_eq!(filtered.storms[0].start_offset, TimeDelta::zero());
        assert_eq!(filtered.epoch, filtered.storms[0].first_time());
    }

    #[test]
    fn filtering_everything_out_is_an_error() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(matches!(
            dataset.starting_from(start),
            Err(StormError::EmptyDataset(_))
        ));
    }
}
