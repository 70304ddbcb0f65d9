//! Inline keyboards
//!
//! Callback data is `prefix:action[:arg]` with prefixes `menu`, `banner`
//! and `admin`.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::engine::TemplateId;

pub const MENU_PREFIX: &str = "menu";
pub const BANNER_PREFIX: &str = "banner";
pub const ADMIN_PREFIX: &str = "admin";

/// Main menu under the welcome message
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🎨 Create banner", "menu:create")],
        vec![
            InlineKeyboardButton::callback("📊 Stats", "menu:stats"),
            InlineKeyboardButton::callback("❓ Help", "menu:help"),
        ],
    ])
}

/// Template buttons 1..=4, the wallpaper option and cancel
pub fn template_picker(wallpaper_enabled: bool) -> InlineKeyboardMarkup {
    let templates: Vec<InlineKeyboardButton> = TemplateId::all()
        .map(|id| InlineKeyboardButton::callback(format!("🖼 {}", id), format!("banner:template:{}", id)))
        .collect();

    let mut rows: Vec<Vec<InlineKeyboardButton>> = templates.chunks(2).map(|row| row.to_vec()).collect();
    if wallpaper_enabled {
        rows.push(vec![InlineKeyboardButton::callback("🎲 Random wallpaper", "banner:random")]);
    }
    rows.push(vec![InlineKeyboardButton::callback("✖️ Cancel", "banner:cancel")]);

    InlineKeyboardMarkup::new(rows)
}

/// Shortcut buttons under the admin dashboard
pub fn admin_panel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("📜 Logs", "admin:logs"),
            InlineKeyboardButton::callback("🏆 Top users", "admin:top"),
        ],
        vec![InlineKeyboardButton::callback("🔄 Refresh", "admin:refresh")],
    ])
}

pub fn back_home() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("🏠 Back", "menu:home")]])
}

/// Split callback data into prefix, action and optional argument
pub fn parse_callback_data(data: &str) -> Option<(&str, &str, Option<&str>)> {
    let mut parts = data.splitn(3, ':');
    let prefix = parts.next().filter(|p| !p.is_empty())?;
    let action = parts.next().filter(|a| !a.is_empty())?;
    Some((prefix, action, parts.next()))
}
