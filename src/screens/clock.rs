use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Size};
use ratatui::widgets::{Block, Paragraph};
use screenmux::{Bundle, Screen, ScreenId};

use super::{CLOCK, MENU};

/// Wall clock refreshed on every tick. The demo binary ticks once a second
/// unless a rate is configured.
pub struct ClockScreen {
    show_seconds: bool,
    ticks: u64,
    size: Option<Size>,
}

impl ClockScreen {
    pub const fn new() -> Self {
        Self {
            show_seconds: true,
            ticks: 0,
            size: None,
        }
    }

    fn format(&self) -> &'static str {
        if self.show_seconds { "%H:%M:%S" } else { "%H:%M" }
    }
}

impl Screen for ClockScreen {
    fn id(&self) -> ScreenId {
        CLOCK
    }

    fn initialize(&mut self, bundle: &Bundle) -> color_eyre::Result<()> {
        self.show_seconds = bundle.get_bool("show_seconds", self.show_seconds);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenId {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => MENU,
            _ => CLOCK,
        }
    }

    fn handle_tick_event(&mut self) -> ScreenId {
        self.ticks += 1;
        CLOCK
    }

    fn draw(&mut self, frame: &mut Frame) {
        let footer = match self.size {
            Some(size) => format!("ticks: {}  size: {}x{}", self.ticks, size.width, size.height),
            None => format!("ticks: {}", self.ticks),
        };
        let clock = Paragraph::new(Local::now().format(self.format()).to_string())
            .alignment(Alignment::Center)
            .block(Block::bordered().title("Clock").title_bottom(footer));
        frame.render_widget(clock, frame.area());
    }

    fn on_resize(&mut self, size: Size) {
        self.size = Some(size);
    }
}
