//! Storm track data.

mod dataset;

pub use dataset::{Dataset, StormTrack, TrackPoint};
