use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::widgets::{Block, Paragraph, Wrap};
use screenmux::{Bundle, Screen, ScreenId};

use super::{ABOUT, MENU};

const DEFAULT_TEXT: &str = "screenmux routes one terminal among several screens.\n\n\
    Esc goes back, ctrl+z suspends, ctrl+c quits.";

pub struct AboutScreen {
    text: String,
}

impl AboutScreen {
    pub fn new() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
        }
    }
}

impl Screen for AboutScreen {
    fn id(&self) -> ScreenId {
        ABOUT
    }

    fn initialize(&mut self, bundle: &Bundle) -> color_eyre::Result<()> {
        self.text = bundle.get_string("text", &self.text);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenId {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => MENU,
            _ => ABOUT,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let about = Paragraph::new(self.text.as_str())
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("About"));
        frame.render_widget(about, frame.area());
    }
}
