//! UI modules for Stormchaser.
//!
//! Everything is drawn over a single map canvas:
//! - Canvas: basin map, storms and the loading spinner
//! - Menu: start date inputs and basin selector
//! - Controls: play/pause, skip, back to menu, frame rate and clock

mod canvas;
mod colors;
mod controls;
mod menu;
mod widgets;

pub use canvas::render_canvas;
pub use controls::render_control_bar;
pub use menu::render_menu;
