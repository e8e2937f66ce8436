//! Screen trait for full-terminal views.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Size;

use crate::bundle::Bundle;

/// Identifier a screen reports for itself; used as the registry key.
pub type ScreenId = i32;

/// A self-contained UI mode that owns the whole terminal while active.
///
/// The manager calls these methods from its dispatch loop only, one event at
/// a time:
///
/// 1. `initialize()` - once, through `Manager::initialize_screen`
/// 2. For each event while this screen is active:
///    - `handle_key_event()` for key presses
///    - `handle_tick_event()` for ticks
///    - `on_resize()` when the terminal size changes
/// 3. `draw()` after every handled event, on whichever screen is active
///    after the handler returned
///
/// Event handlers return the id of the screen that should be active next:
/// `self.id()` to stay, another registered id to switch. Returning an id
/// that is not registered stops the loop with `InvalidScreenId`.
pub trait Screen {
    /// Stable identifier of this screen.
    fn id(&self) -> ScreenId;

    /// One-time setup from a configuration bundle.
    fn initialize(&mut self, bundle: &Bundle) -> color_eyre::Result<()> {
        _ = bundle;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenId;

    /// Called for periodic or synthetic tick events.
    fn handle_tick_event(&mut self) -> ScreenId {
        self.id()
    }

    /// Render onto the frame. The background is already filled.
    fn draw(&mut self, frame: &mut Frame);

    /// The terminal changed size; recompute any cached layout.
    fn on_resize(&mut self, size: Size) {
        _ = size;
    }
}
