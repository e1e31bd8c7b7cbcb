//! Animated storms: movement, fading, landfall detection and drawing.

mod entity;
mod icon;
mod landfall;
mod surface;

pub use entity::{Lifecycle, StepContext, StormEntity};
pub use surface::{PainterSurface, RenderSurface};

#[cfg(test)]
pub use surface::testing;
