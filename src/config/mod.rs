//! On-disk configuration.
//!
//! ```toml
//! [manager]
//! foreground = "white"
//! background = "black"
//! quit_key = "ctrl+c"
//! suspend_key = "ctrl+z"
//! tick_rate_ms = 250
//! heartbeat_path = "./log"
//!
//! [bundles.menu]
//! title = "Main menu"
//! ```

mod defaults;
pub mod loader;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

pub use loader::{config_path, load, load_from};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::bundle::Bundle;
use crate::key::Key;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    #[serde(with = "color")]
    pub foreground: Color,
    #[serde(with = "color")]
    pub background: Color,
    pub quit_key: Key,
    pub suspend_key: Key,
    /// Milliseconds between tick events; `0` disables ticking.
    pub tick_rate_ms: u64,
    pub heartbeat_path: Option<PathBuf>,
}

impl ManagerConfig {
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub manager: ManagerConfig,
    /// Initialization bundles keyed by screen name.
    #[serde(default)]
    pub bundles: BTreeMap<String, Bundle>,
}

impl Config {
    /// The bundle configured for `screen`, or an empty one.
    pub fn bundle(&self, screen: &str) -> Bundle {
        self.bundles.get(screen).cloned().unwrap_or_default()
    }
}

mod color {
    use std::str::FromStr;

    use ratatui::style::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(color)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.manager.foreground, Color::White);
        assert_eq!(config.manager.background, Color::Black);
        assert_eq!(config.manager.quit_key, Key::with_ctrl(KeyCode::Char('c')));
        assert_eq!(config.manager.suspend_key, Key::with_ctrl(KeyCode::Char('z')));
        assert_eq!(config.manager.tick_rate(), Duration::ZERO);
        assert!(config.bundles.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r##"
            [manager]
            foreground = "#ffcc00"
            background = "blue"
            quit_key = "q"
            tick_rate_ms = 250
            heartbeat_path = "./log"

            [bundles.menu]
            title = "Main menu"

            [bundles.clock]
            show_seconds = false
            "##,
        )
        .unwrap();

        assert_eq!(config.manager.foreground, Color::Rgb(0xff, 0xcc, 0x00));
        assert_eq!(config.manager.background, Color::Blue);
        assert_eq!(config.manager.quit_key, Key::new(KeyCode::Char('q')));
        assert_eq!(config.manager.suspend_key, Key::with_ctrl(KeyCode::Char('z')));
        assert_eq!(config.manager.tick_rate(), Duration::from_millis(250));
        assert_eq!(config.manager.heartbeat_path, Some(PathBuf::from("./log")));
        assert_eq!(config.bundle("menu").get_string("title", ""), "Main menu");
        assert!(!config.bundle("clock").get_bool("show_seconds", true));
        assert!(config.bundle("missing").is_empty());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [manager]
            background = "not-a-color"
            "#,
        );

        assert!(result.is_err());
    }
}
