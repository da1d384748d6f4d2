//! Tray menu actions.

/// Menu item IDs
pub const MENU_ID_STATS: &str = "stats";
pub const MENU_ID_RESET: &str = "reset";
pub const MENU_ID_QUIT: &str = "quit";

/// Something the user picked from the tray menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Reset,
    Quit,
}

impl MenuAction {
    /// Maps a menu item ID to its action. The stats label has none.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            MENU_ID_RESET => Some(Self::Reset),
            MENU_ID_QUIT => Some(Self::Quit),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Reset => MENU_ID_RESET,
            Self::Quit => MENU_ID_QUIT,
        }
    }
}
