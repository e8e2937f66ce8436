use std::io;

use thiserror::Error;

use crate::screen::ScreenId;

/// Failures raised by the [`Manager`](crate::Manager) itself.
///
/// Errors returned by a screen's `initialize` are not wrapped here; they
/// reach the caller of `initialize_screen` unchanged.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("invalid screen id: {0}")]
    InvalidScreenId(ScreenId),
    #[error("the dispatch loop cannot run without screens")]
    NoScreensRegistered,
    #[error("failed to initialize the terminal surface")]
    SurfaceInit(#[source] io::Error),
    #[error("terminal surface error")]
    Surface(#[from] io::Error),
}
