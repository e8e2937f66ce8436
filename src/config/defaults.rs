use crossterm::event::KeyCode;
use ratatui::style::Color;

use crate::config::ManagerConfig;
use crate::key::Key;

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            background: Color::Black,
            quit_key: Key::with_ctrl(KeyCode::Char('c')),
            suspend_key: Key::with_ctrl(KeyCode::Char('z')),
            tick_rate_ms: 0,
            heartbeat_path: None,
        }
    }
}
