use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, List, ListItem, ListState};
use screenmux::{Bundle, Screen, ScreenId};

use super::{ABOUT, CLOCK, MENU};

const ENTRIES: [(&str, ScreenId); 2] = [("Clock", CLOCK), ("About", ABOUT)];

/// Entry screen listing the other screens.
pub struct MenuScreen {
    title: String,
    state: ListState,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self {
            title: "Menu".to_string(),
            state: ListState::default().with_selected(Some(0)),
        }
    }

    fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }
}

impl Screen for MenuScreen {
    fn id(&self) -> ScreenId {
        MENU
    }

    fn initialize(&mut self, bundle: &Bundle) -> color_eyre::Result<()> {
        self.title = bundle.get_string("title", &self.title);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenId {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select(Some(self.selected().saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state
                    .select(Some((self.selected() + 1).min(ENTRIES.len() - 1)));
            }
            KeyCode::Enter => return ENTRIES[self.selected()].1,
            _ => {}
        }
        MENU
    }

    fn draw(&mut self, frame: &mut Frame) {
        let items: Vec<ListItem> = ENTRIES.iter().map(|(name, _)| ListItem::new(*name)).collect();
        let list = List::new(items)
            .block(Block::bordered().title(self.title.as_str()))
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, frame.area(), &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_opens_selected_entry() {
        let mut menu = MenuScreen::new();

        assert_eq!(menu.handle_key_event(press(KeyCode::Enter)), CLOCK);
        assert_eq!(menu.handle_key_event(press(KeyCode::Down)), MENU);
        assert_eq!(menu.handle_key_event(press(KeyCode::Enter)), ABOUT);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut menu = MenuScreen::new();

        menu.handle_key_event(press(KeyCode::Up));
        assert_eq!(menu.selected(), 0);

        for _ in 0..5 {
            menu.handle_key_event(press(KeyCode::Char('j')));
        }
        assert_eq!(menu.selected(), ENTRIES.len() - 1);
    }

    #[test]
    fn test_title_from_bundle() {
        let mut menu = MenuScreen::new();
        let bundle: Bundle = [("title", "Main menu")].into_iter().collect();

        menu.initialize(&bundle).unwrap();

        assert_eq!(menu.title, "Main menu");
    }
}
