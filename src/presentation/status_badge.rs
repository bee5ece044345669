//! Status badge colors.

use crate::presentation::theme::{hex_to_color32, ThemeColors};
use egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Render hint naming the badge renderer in dataset documents.
pub const STATUS_BADGE_RENDER: &str = "status_badge";

/// `(background, text)` per status, shared by all themes.
static BADGE_COLORS: Lazy<HashMap<&'static str, (Color32, Color32)>> = Lazy::new(|| {
    let dark_text = hex_to_color32("#1F1F1F");
    HashMap::from([
        ("active", (hex_to_color32("#05A557"), hex_to_color32("#FFFFFF"))),
        ("inactive", (hex_to_color32("#D9D9D9"), dark_text)),
        ("pending", (hex_to_color32("#FFEFCF"), dark_text)),
        ("processing", (hex_to_color32("#B8D9FF"), dark_text)),
        ("provisioning", (hex_to_color32("#FFEFCF"), dark_text)),
    ])
});

/// Badge colors for a status label; case-insensitive. Unknown statuses get a
/// neutral badge.
pub fn badge_colors(status: &str, colors: &ThemeColors) -> (Color32, Color32) {
    BADGE_COLORS
        .get(status.to_lowercase().as_str())
        .copied()
        .unwrap_or((hex_to_color32("#F5F5F5"), colors.text_dim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::theme::ThemeManager;

    #[test]
    fn test_badge_lookup_ignores_case() {
        let manager = ThemeManager::new();
        let colors = &manager.theme_or_default("Light").colors;
        assert_eq!(badge_colors("Active", colors), badge_colors("ACTIVE", colors));
        assert_eq!(badge_colors("Active", colors).0, hex_to_color32("#05A557"));
    }

    #[test]
    fn test_unknown_status_uses_neutral_badge() {
        let manager = ThemeManager::new();
        let colors = &manager.theme_or_default("Dark").colors;
        assert_eq!(badge_colors("Archived", colors), (hex_to_color32("#F5F5F5"), colors.text_dim));
    }
}
