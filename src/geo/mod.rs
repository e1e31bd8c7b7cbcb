//! Basin geography: map projection and the land/water reference raster.

mod projection;
mod raster;

pub use projection::{project, Basin, BasinExtent, MapProjection};
pub use raster::{sample, ReferenceRaster, TerrainSampler};
