//! Context menu for the system tray.

use crate::store::ClickRecord;
use crate::tray::action::{MENU_ID_QUIT, MENU_ID_RESET, MENU_ID_STATS};
use tray_icon::menu::{Menu, MenuId, MenuItem};

/// The tray menu and the item whose label tracks the counters.
pub struct TrayMenu {
    pub menu: Menu,
    pub stats: MenuItem,
}

/// Creates the context menu for the system tray.
pub fn create_tray_menu(snapshot: &ClickRecord) -> TrayMenu {
    let menu = Menu::new();

    // Disabled label showing the live totals
    let stats = MenuItem::with_id(
        MenuId::new(MENU_ID_STATS),
        snapshot.menu_label(),
        false,
        None,
    );

    let reset = MenuItem::with_id(MenuId::new(MENU_ID_RESET), "Reset", true, None);
    let quit = MenuItem::with_id(MenuId::new(MENU_ID_QUIT), "Quit", true, None);

    let _ = menu.append(&stats);
    let _ = menu.append(&reset);
    let _ = menu.append(&quit);

    TrayMenu { menu, stats }
}
