//! Terminal UI wrapper.
//!
//! This module provides [`Tui`], a [`Surface`] over ratatui's Terminal that
//! handles raw mode, the alternate screen, and the terminal input task.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, EventStream};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::{FutureExt, StreamExt};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::event::{Event, EventSender};
use crate::surface::Surface;

const GRACEFUL_SHUTDOWN_TIMEOUT_MS: u64 = 500;
const FORCEFUL_SHUTDOWN_TIMEOUT_MS: u64 = 2000;

pub type Backend = CrosstermBackend<Stdout>;

/// Crossterm-backed terminal surface.
///
/// While entered, the terminal is in raw mode on the alternate screen and a
/// background task forwards terminal input to the manager's queue.
pub struct Tui {
    terminal: Terminal<Backend>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
}

impl Tui {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(Backend::new(io::stdout()))?,
            task: None,
            cancellation_token: CancellationToken::new(),
        })
    }

    fn start(&mut self, events: &EventSender) {
        self.cancel();
        self.cancellation_token = CancellationToken::new();
        let input_loop = Self::input_loop(events.clone(), self.cancellation_token.clone());
        self.task = Some(tokio::spawn(input_loop));
    }

    fn stop(&mut self) -> io::Result<()> {
        self.cancel();
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        let mut shutdown_counter = 0;
        while !task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            shutdown_counter += 1;
            if shutdown_counter >= GRACEFUL_SHUTDOWN_TIMEOUT_MS {
                task.abort();
            }
            if shutdown_counter >= FORCEFUL_SHUTDOWN_TIMEOUT_MS {
                return Err(io::Error::other("failed to stop terminal input task"));
            }
        }
        Ok(())
    }

    fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Blocking-read producer: forward terminal input until cancelled.
    async fn input_loop(events: EventSender, cancellation_token: CancellationToken) {
        let mut event_stream = EventStream::new();

        loop {
            let event = tokio::select! {
                () = cancellation_token.cancelled() => break,
                terminal_event = event_stream.next().fuse() => match terminal_event {
                    Some(Ok(terminal_event)) => match Event::from_terminal(terminal_event) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(err)) => Event::Error(err.to_string()),
                    None => break,
                },
            };
            if events.send(event).is_err() {
                break;
            }
        }
        debug!("Terminal input task stopped");
    }
}

impl Surface for Tui {
    fn enter(&mut self, events: &EventSender) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        crossterm::execute!(io::stdout(), EnableBracketedPaste)?;
        self.start(events);
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        self.stop()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.terminal.flush()?;
            crossterm::execute!(io::stdout(), DisableBracketedPaste)?;
            crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn suspend(&mut self, events: &EventSender) -> io::Result<()> {
        self.exit()?;
        // Returns once the shell resumes us with SIGCONT.
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        self.enter(events)?;
        // The screen content is gone; force a full repaint on the next draw.
        self.terminal.clear()
    }

    #[cfg(not(unix))]
    fn suspend(&mut self, _events: &EventSender) -> io::Result<()> {
        Ok(())
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            error!("Failed to restore terminal: {err}");
        }
    }
}
