//! Key chords used for the manager's reserved keys.
//!
//! A [`Key`] is written as `modifier+...+key`, e.g. `ctrl+c`, `alt+F4`, `q`.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key description")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("invalid function key: {0}")]
    InvalidFunctionKey(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Whether `event` is this chord.
    ///
    /// Letters compare case-insensitively and SHIFT is ignored for them,
    /// since terminals disagree on whether `ctrl+Z` reports the shift.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                let chars_match = a == b
                    || (a.is_ascii_alphabetic()
                        && b.is_ascii_alphabetic()
                        && a.eq_ignore_ascii_case(&b));
                let expected = self.modifiers - KeyModifiers::SHIFT;
                let actual = event.modifiers - KeyModifiers::SHIFT;
                chars_match && expected == actual
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        // A trailing '+' is the plus key itself: "+", "ctrl++".
        let (prefix, key_part) = match s.strip_suffix('+') {
            Some(rest) => (rest.strip_suffix('+').unwrap_or(rest), "+"),
            None => s.rsplit_once('+').unwrap_or(("", s)),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|part| !part.is_empty()) {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            };
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "insert" | "ins" => KeyCode::Insert,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            "backtab" => KeyCode::BackTab,
            "null" => KeyCode::Null,
            "capslock" => KeyCode::CapsLock,
            "scrolllock" => KeyCode::ScrollLock,
            "numlock" => KeyCode::NumLock,
            "printscreen" => KeyCode::PrintScreen,
            "pause" => KeyCode::Pause,
            "menu" => KeyCode::Menu,
            "keypadbegin" => KeyCode::KeypadBegin,
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let number = lower[1..]
                    .parse()
                    .map_err(|_| KeyParseError::InvalidFunctionKey(key_part.to_string()))?;
                KeyCode::F(number)
            }
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(KeyParseError::UnknownKey(key_part.to_string())),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl Key {
    /// Name of the key code as accepted by `from_str`, if it has one.
    ///
    /// Media and modifier keys have no name.
    fn code_name(&self) -> Option<String> {
        let name = match self.code {
            KeyCode::Char(' ') => "Space",
            KeyCode::Char(c) => return Some(c.to_string()),
            KeyCode::F(n) => return Some(format!("F{n}")),
            KeyCode::Enter => "Enter",
            KeyCode::Esc => "Esc",
            KeyCode::Tab => "Tab",
            KeyCode::BackTab => "BackTab",
            KeyCode::Backspace => "Backspace",
            KeyCode::Delete => "Delete",
            KeyCode::Insert => "Insert",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Null => "Null",
            KeyCode::CapsLock => "CapsLock",
            KeyCode::ScrollLock => "ScrollLock",
            KeyCode::NumLock => "NumLock",
            KeyCode::PrintScreen => "PrintScreen",
            KeyCode::Pause => "Pause",
            KeyCode::Menu => "Menu",
            KeyCode::KeypadBegin => "KeypadBegin",
            _ => return None,
        };
        Some(name.to_string())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (modifier, name) in [
            (KeyModifiers::CONTROL, "ctrl"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SHIFT, "shift"),
        ] {
            if self.modifiers.contains(modifier) {
                write!(f, "{name}+")?;
            }
        }

        match self.code_name() {
            Some(name) => f.write_str(&name),
            None => write!(f, "{:?}", self.code),
        }
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.code_name().is_none() {
            return Err(serde::ser::Error::custom(format!(
                "key {:?} cannot be written to config",
                self.code
            )));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MediaKeyCode;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_str("q").unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!(Key::from_str("Enter").unwrap(), Key::new(KeyCode::Enter));
        assert_eq!(
            Key::from_str("ctrl+c").unwrap(),
            Key::with_ctrl(KeyCode::Char('c'))
        );
        assert_eq!(Key::from_str("F1").unwrap(), Key::new(KeyCode::F(1)));
        assert_eq!(
            Key::from_str("ctrl++").unwrap(),
            Key::with_ctrl(KeyCode::Char('+'))
        );
    }

    #[test]
    fn test_key_parsing_errors() {
        assert_eq!(Key::from_str(""), Err(KeyParseError::Empty));
        assert_eq!(
            Key::from_str("hyper+c"),
            Err(KeyParseError::UnknownModifier("hyper".to_string()))
        );
        assert_eq!(
            Key::from_str("Fx"),
            Err(KeyParseError::InvalidFunctionKey("Fx".to_string()))
        );
        assert_eq!(
            Key::from_str("banana"),
            Err(KeyParseError::UnknownKey("banana".to_string()))
        );
    }

    #[test]
    fn test_plus_key_parsing() {
        assert_eq!(Key::from_str("+").unwrap(), Key::new(KeyCode::Char('+')));
        assert_eq!(
            Key::from_str("alt+").unwrap(),
            Key {
                code: KeyCode::Char('+'),
                modifiers: KeyModifiers::ALT,
            }
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(KeyCode::Char('q')).to_string(), "q");
        assert_eq!(Key::new(KeyCode::Enter).to_string(), "Enter");
        assert_eq!(Key::with_ctrl(KeyCode::Char('z')).to_string(), "ctrl+z");
    }

    #[test]
    fn test_ctrl_key_matches_regardless_of_case() {
        let key = Key::with_ctrl(KeyCode::Char('c'));

        assert!(key.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(key.matches(&KeyEvent::new(
            KeyCode::Char('C'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_non_char_key_requires_exact_modifiers() {
        let key = Key::new(KeyCode::Esc);

        assert!(key.matches(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Esc, KeyModifiers::ALT)));
    }

    #[test]
    fn test_key_serde_uses_display_form() {
        #[derive(Serialize, Deserialize)]
        struct Keys {
            quit: Key,
        }

        let keys: Keys = toml::from_str(r#"quit = "ctrl+q""#).unwrap();
        assert_eq!(keys.quit, Key::with_ctrl(KeyCode::Char('q')));
        assert_eq!(toml::to_string(&keys).unwrap().trim(), r#"quit = "ctrl+q""#);
    }

    #[test]
    fn test_named_keys_survive_config_round_trip() {
        #[derive(Serialize, Deserialize)]
        struct Keys {
            key: Key,
        }

        let keys = [
            Key::new(KeyCode::Char('+')),
            Key::with_ctrl(KeyCode::Char('+')),
            Key::new(KeyCode::Char('?')),
            Key::new(KeyCode::Char(' ')),
            Key::new(KeyCode::BackTab),
            Key::new(KeyCode::Null),
            Key::new(KeyCode::CapsLock),
            Key::new(KeyCode::ScrollLock),
            Key::new(KeyCode::NumLock),
            Key::new(KeyCode::PrintScreen),
            Key::new(KeyCode::Pause),
            Key::new(KeyCode::Menu),
            Key::new(KeyCode::KeypadBegin),
            Key::with_ctrl(KeyCode::F(12)),
        ];

        for key in keys {
            assert_eq!(Key::from_str(&key.to_string()), Ok(key), "{key}");
            let written = toml::to_string(&Keys { key }).unwrap();
            let read: Keys = toml::from_str(&written).unwrap();
            assert_eq!(read.key, key, "{written}");
        }
    }

    #[test]
    fn test_unnamed_keys_are_not_written() {
        #[derive(Serialize)]
        struct Keys {
            key: Key,
        }

        let key = Key::new(KeyCode::Media(MediaKeyCode::Play));

        assert!(toml::to_string(&Keys { key }).is_err());
        assert_ne!(Key::from_str(&key.to_string()), Ok(key));
        assert_ne!(key.to_string(), "?");
    }
}
