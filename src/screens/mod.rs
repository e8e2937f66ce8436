//! Screens registered by the demo binary.

mod about;
mod clock;
mod menu;

pub use about::AboutScreen;
pub use clock::ClockScreen;
pub use menu::MenuScreen;
use screenmux::ScreenId;

pub const MENU: ScreenId = 1;
pub const CLOCK: ScreenId = 2;
pub const ABOUT: ScreenId = 3;
