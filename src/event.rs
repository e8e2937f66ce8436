//! Events consumed by the manager's dispatch loop.
//!
//! Events flow INTO the manager from producers: the terminal input task,
//! the optional ticker, and anything else holding an [`EventSender`].

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Producer half of the manager's event queue.
pub type EventSender = UnboundedSender<Event>;

pub(crate) type EventReceiver = UnboundedReceiver<Event>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Key pressed
    Key(KeyEvent),
    /// Periodic or synthetic tick (animations, polling, forced redraws)
    Tick,
    /// Terminal resized to (width, height)
    Resize(u16, u16),
    Mouse(MouseEvent),
    Paste(String),
    FocusGained,
    FocusLost,
    /// Error reported by an input producer
    Error(String),
}

impl Event {
    /// Translate a terminal event, dropping key releases and repeats.
    pub fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        let event = match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Self::Key(key),
            CrosstermEvent::Key(_) => return None,
            CrosstermEvent::Mouse(mouse) => Self::Mouse(mouse),
            CrosstermEvent::Resize(width, height) => Self::Resize(width, height),
            CrosstermEvent::FocusGained => Self::FocusGained,
            CrosstermEvent::FocusLost => Self::FocusLost,
            CrosstermEvent::Paste(text) => Self::Paste(text),
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_key_release_is_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(Event::from_terminal(CrosstermEvent::Key(release)), None);
    }

    #[test]
    fn test_terminal_events_translate() {
        let press = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(
            Event::from_terminal(CrosstermEvent::Key(press)),
            Some(Event::Key(press))
        );
        assert_eq!(
            Event::from_terminal(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        );
        assert_eq!(
            Event::from_terminal(CrosstermEvent::Paste("hi".to_string())),
            Some(Event::Paste("hi".to_string()))
        );
    }
}
