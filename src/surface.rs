//! The terminal handle the manager renders onto.
//!
//! [`Surface`] is the seam between the dispatch loop and the terminal
//! backend. [`Tui`](crate::tui::Tui) implements it for a real crossterm
//! terminal; tests implement it over ratatui's `TestBackend`.

use std::io;
use std::ops::{Deref, DerefMut};

use ratatui::Frame;
use tracing::{debug, error};

use crate::event::EventSender;

pub trait Surface {
    /// Acquire the terminal and start pushing input events into `events`.
    fn enter(&mut self, events: &EventSender) -> io::Result<()>;

    /// Stop input production and restore the terminal.
    ///
    /// Must be safe to call on a surface that is not entered.
    fn exit(&mut self) -> io::Result<()>;

    /// Release the terminal, suspend the process, and reacquire the terminal
    /// once the process is resumed. A no-op where process suspension is not
    /// supported.
    fn suspend(&mut self, events: &EventSender) -> io::Result<()>;

    /// Clear, render through `render`, and flush to the terminal.
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()>;
}

/// Scoped acquisition of a [`Surface`].
///
/// The surface is entered on construction and exited exactly once: either
/// through [`SurfaceGuard::release`] or, on any other exit path, on drop.
pub struct SurfaceGuard<'a, S: Surface> {
    surface: &'a mut S,
    released: bool,
}

impl<'a, S: Surface> SurfaceGuard<'a, S> {
    pub fn acquire(surface: &'a mut S, events: &EventSender) -> io::Result<Self> {
        surface.enter(events)?;
        debug!("Terminal surface acquired");
        Ok(Self {
            surface,
            released: false,
        })
    }

    pub fn release(mut self) -> io::Result<()> {
        self.released = true;
        debug!("Releasing terminal surface");
        self.surface.exit()
    }
}

impl<S: Surface> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<S: Surface> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl<S: Surface> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self.surface.exit() {
            error!("Failed to restore terminal: {err}");
        }
    }
}
