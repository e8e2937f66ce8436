//! Route a single terminal among mutually exclusive screens.
//!
//! - [`Screen`] - a full-terminal UI mode with its own input handling
//! - [`Manager`] - the dispatch loop that owns the active screen
//! - [`Bundle`] - typed-with-defaults configuration passed to screens
//! - [`Surface`] - the terminal handle the manager draws on ([`Tui`] for a
//!   real terminal)

pub mod bundle;
pub mod config;
pub mod error;
pub mod event;
pub mod key;
pub mod manager;
pub mod registry;
pub mod screen;
pub mod surface;
pub mod ticker;
pub mod tui;

pub use bundle::{Bundle, Value};
pub use config::{Config, ManagerConfig};
pub use error::ManagerError;
pub use event::{Event, EventSender};
pub use key::Key;
pub use manager::Manager;
pub use screen::{Screen, ScreenId};
pub use surface::{Surface, SurfaceGuard};
pub use tui::Tui;
