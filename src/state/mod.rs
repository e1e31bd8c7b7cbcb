//! Application state management.
//!
//! The app is either on the start menu, waiting for a session to load, or
//! running an animation.

mod menu;
mod playback;
mod session;

pub use menu::{MenuState, FIRST_YEAR};
pub use session::Session;

use crate::config::AnimationConfig;

/// Which screen is showing.
pub enum Screen {
    Menu,
    /// A session is loading in the background
    Loading,
    Animating(Box<Session>),
}

/// Root application state containing all sub-states.
pub struct AppState {
    pub config: AnimationConfig,

    pub screen: Screen,

    /// Start menu inputs, kept across sessions
    pub menu: MenuState,

    /// Application status message displayed under the menu
    pub status_message: String,
}

impl AppState {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            screen: Screen::Menu,
            menu: MenuState::new(),
            status_message: "Ready".to_string(),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.screen {
            Screen::Animating(session) => Some(session.as_mut()),
            _ => None,
        }
    }

    /// Drops any running session and shows the start menu.
    pub fn back_to_menu(&mut self) {
        if let Screen::Animating(session) = &self.screen {
            log::info!("Leaving {} session", session.basin);
        }
        self.screen = Screen::Menu;
        self.status_message = "Ready".to_string();
    }
}
