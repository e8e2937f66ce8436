//! The dispatch core.
//!
//! [`Manager`] owns the screen registry, the terminal surface and the event
//! queue. [`Manager::run`] consumes events one at a time, routes each to the
//! active screen, switches screens according to the handler's result and
//! re-renders.

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Size;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::bundle::Bundle;
use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::event::{Event, EventReceiver, EventSender};
use crate::key::Key;
use crate::registry::ScreenRegistry;
use crate::screen::{Screen, ScreenId};
use crate::surface::{Surface, SurfaceGuard};
use crate::ticker;

/// Loop settings that can change between construction and `run`.
#[derive(Debug, Clone)]
struct Settings {
    foreground: Color,
    background: Color,
    quit_key: Key,
    suspend_key: Key,
    tick_rate: Duration,
    heartbeat_path: Option<PathBuf>,
}

impl From<&ManagerConfig> for Settings {
    fn from(config: &ManagerConfig) -> Self {
        Self {
            foreground: config.foreground,
            background: config.background,
            quit_key: config.quit_key,
            suspend_key: config.suspend_key,
            tick_rate: config.tick_rate(),
            heartbeat_path: config.heartbeat_path.clone(),
        }
    }
}

/// What the loop does after handling one event.
enum Flow {
    Continue,
    Quit,
}

/// Routes one terminal surface among registered screens.
///
/// # Example
///
/// ```ignore
/// let mut manager = Manager::new(Tui::new()?);
/// manager.add_screen(MenuScreen::new());
/// manager.add_screen(ClockScreen::new());
/// manager.initialize_screen(MENU, &bundle)?;
/// manager.run().await?;
/// ```
pub struct Manager<S: Surface> {
    surface: S,
    registry: ScreenRegistry,
    settings: Settings,
    event_tx: EventSender,
    event_rx: EventReceiver,
}

impl<S: Surface> Manager<S> {
    /// Create a manager drawing white on black, with `ctrl+c` to quit,
    /// `ctrl+z` to suspend and no periodic ticks.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, &ManagerConfig::default())
    }

    pub fn with_config(surface: S, config: &ManagerConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            surface,
            registry: ScreenRegistry::new(),
            settings: Settings::from(config),
            event_tx,
            event_rx,
        }
    }

    pub const fn set_default_fg(&mut self, color: Color) {
        self.settings.foreground = color;
    }

    pub const fn set_default_bg(&mut self, color: Color) {
        self.settings.background = color;
    }

    /// Interval between tick events. Rates of one microsecond or less
    /// disable ticking.
    pub const fn set_tick_rate(&mut self, rate: Duration) {
        self.settings.tick_rate = rate;
    }

    /// Write a timestamp to `path` on every tick.
    pub fn set_heartbeat_path(&mut self, path: impl Into<PathBuf>) {
        self.settings.heartbeat_path = Some(path.into());
    }

    pub const fn set_quit_key(&mut self, key: Key) {
        self.settings.quit_key = key;
    }

    pub const fn set_suspend_key(&mut self, key: Key) {
        self.settings.suspend_key = key;
    }

    /// Register a screen under its own id.
    ///
    /// The first screen registered becomes the active screen. Registering a
    /// screen whose id is already taken replaces the previous screen, which
    /// is returned.
    pub fn add_screen(&mut self, screen: impl Screen + 'static) -> Option<Box<dyn Screen>> {
        self.registry.insert(Box::new(screen))
    }

    /// Make `id` the active screen.
    ///
    /// A no-op when `id` is already active. Fails with
    /// [`ManagerError::InvalidScreenId`] when `id` is not registered, leaving
    /// the active screen unchanged.
    pub fn set_active_screen(&mut self, id: ScreenId) -> Result<(), ManagerError> {
        self.registry.set_active(id)
    }

    pub const fn active_screen(&self) -> ScreenId {
        self.registry.active()
    }

    /// Registered screen ids in ascending order.
    pub fn screen_ids(&self) -> Vec<ScreenId> {
        self.registry.ids()
    }

    pub fn screen_count(&self) -> usize {
        self.registry.len()
    }

    /// Run the one-time setup of screen `id`.
    ///
    /// The screen's own error is returned unchanged.
    pub fn initialize_screen(&mut self, id: ScreenId, bundle: &Bundle) -> Result<()> {
        let screen = self.registry.get_mut(id)?;
        debug!(id, "Initializing screen");
        screen.initialize(bundle)
    }

    pub fn enqueue_event(&self, event: Event) {
        // The receiver lives as long as `self`, so this cannot fail.
        _ = self.event_tx.send(event);
    }

    /// Queue a tick, e.g. to force a redraw from outside the loop.
    pub fn enqueue_tick(&self) {
        self.enqueue_event(Event::Tick);
    }

    /// A producer handle for feeding events from other tasks.
    pub fn event_sender(&self) -> EventSender {
        self.event_tx.clone()
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Run the dispatch loop until the quit key is pressed or a handler
    /// returns an unregistered screen id.
    ///
    /// The surface is acquired here and released exactly once before this
    /// returns, on every path. Events still queued when the loop stops are
    /// discarded, so a later `run` starts from an empty queue.
    pub async fn run(&mut self) -> Result<(), ManagerError> {
        if self.registry.is_empty() {
            return Err(ManagerError::NoScreensRegistered);
        }

        let mut surface = SurfaceGuard::acquire(&mut self.surface, &self.event_tx)
            .map_err(ManagerError::SurfaceInit)?;
        info!(active = self.registry.active(), "Starting dispatch loop");

        let ticker_token = CancellationToken::new();
        let _ticker_guard = ticker_token.clone().drop_guard();
        let ticker = ticker::is_enabled(self.settings.tick_rate).then(|| {
            ticker::spawn(
                self.event_tx.clone(),
                self.settings.tick_rate,
                self.settings.heartbeat_path.clone(),
                ticker_token.clone(),
            )
        });

        let result = Self::dispatch(
            &mut surface,
            &mut self.registry,
            &mut self.event_rx,
            &self.event_tx,
            &self.settings,
        )
        .await;

        match &result {
            Ok(()) => info!("Dispatch loop finished"),
            Err(err) => error!("Dispatch loop failed: {err}"),
        }

        ticker_token.cancel();
        if let Some(ticker) = ticker {
            if let Err(err) = ticker.await {
                warn!("Ticker task failed: {err}");
            }
        }
        let released = surface.release();

        let mut discarded = 0;
        while self.event_rx.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "Discarded events queued after the loop stopped");
        }

        result?;
        released.map_err(ManagerError::Surface)
    }

    async fn dispatch(
        surface: &mut SurfaceGuard<'_, S>,
        registry: &mut ScreenRegistry,
        event_rx: &mut EventReceiver,
        event_tx: &EventSender,
        settings: &Settings,
    ) -> Result<(), ManagerError> {
        Self::render(surface, registry, settings)?;

        while let Some(event) = event_rx.recv().await {
            let flow = Self::handle_event(surface, registry, event_tx, settings, event)?;
            if matches!(flow, Flow::Quit) {
                break;
            }
        }
        Ok(())
    }

    fn handle_event(
        surface: &mut SurfaceGuard<'_, S>,
        registry: &mut ScreenRegistry,
        event_tx: &EventSender,
        settings: &Settings,
        event: Event,
    ) -> Result<Flow, ManagerError> {
        match event {
            Event::Key(key) if settings.quit_key.matches(&key) => {
                debug!("Quit key pressed");
                return Ok(Flow::Quit);
            }
            Event::Key(key) if settings.suspend_key.matches(&key) => {
                debug!("Suspending");
                surface.suspend(event_tx)?;
                debug!("Resumed");
            }
            Event::Key(key) => {
                let next = registry.active_mut()?.handle_key_event(key);
                Self::switch_to(registry, next, Some(key))?;
            }
            Event::Tick => {
                let next = registry.active_mut()?.handle_tick_event();
                Self::switch_to(registry, next, None)?;
            }
            Event::Resize(width, height) => {
                registry.active_mut()?.on_resize(Size::new(width, height));
            }
            Event::Error(message) => {
                warn!("Input producer reported an error: {message}");
                return Ok(Flow::Continue);
            }
            Event::Mouse(_) | Event::Paste(_) | Event::FocusGained | Event::FocusLost => {
                return Ok(Flow::Continue);
            }
        }

        Self::render(surface, registry, settings)?;
        Ok(Flow::Continue)
    }

    fn switch_to(
        registry: &mut ScreenRegistry,
        next: ScreenId,
        key: Option<KeyEvent>,
    ) -> Result<(), ManagerError> {
        let from = registry.active();
        registry.set_active(next).inspect_err(|_| {
            error!(from, to = next, ?key, "Handler returned an unregistered screen id");
        })
    }

    /// Fill the background, draw the active screen, flush.
    fn render(
        surface: &mut SurfaceGuard<'_, S>,
        registry: &mut ScreenRegistry,
        settings: &Settings,
    ) -> Result<(), ManagerError> {
        let screen = registry.active_mut()?;
        let style = Style::new().fg(settings.foreground).bg(settings.background);
        surface.draw(&mut |frame| {
            frame.render_widget(Block::new().style(style), frame.area());
            screen.draw(frame);
        })?;
        Ok(())
    }
}
