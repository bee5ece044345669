//! Table themes.
//!
//! Built-in themes are Light, Dark, Dracula and One Dark Pro. Light and Dark
//! follow the usual Bootstrap table palette.

use egui::Color32;
use std::collections::HashMap;

pub const DEFAULT_THEME: &str = "Dark";

/// Color palette for one theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Backgrounds
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,

    // Text
    pub text: Color32,
    pub text_dim: Color32,
    pub text_strong: Color32,

    // Table surfaces
    pub header_background: Color32,
    pub header_text: Color32,
    pub row_main: Color32,
    pub row_nested: Color32,
    pub row_expanded: Color32,

    // Interactive
    pub primary: Color32,
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Semantic
    pub danger: Color32,
    pub warning: Color32,
    pub success: Color32,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn is_light(&self) -> bool {
        self.name == "Light"
    }
}

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    fallback: Theme,
}

impl ThemeManager {
    pub fn new() -> Self {
        let themes = [light_theme(), dark_theme(), dracula_theme(), one_dark_pro_theme()]
            .into_iter()
            .map(|theme| (theme.name.clone(), theme))
            .collect();
        Self {
            themes,
            fallback: dark_theme(),
        }
    }

    /// Theme by name, falling back to the default theme.
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        self.themes.get(name).unwrap_or(&self.fallback)
    }

    /// Sorted theme names.
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Copies a theme's palette into egui visuals.
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.window_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.row_nested;

        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.primary;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.noninteractive.bg_stroke.color = colors.border;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.hyperlink_color = colors.primary;
        visuals.error_fg_color = colors.danger;
        visuals.warn_fg_color = colors.warning;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light table palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#ffffff"),
            panel_background: hex_to_color32("#ffffff"),
            extreme_background: hex_to_color32("#ffffff"),

            text: hex_to_color32("#212529"),
            text_dim: hex_to_color32("#6c757d"),
            text_strong: hex_to_color32("#000000"),

            header_background: hex_to_color32("#e9ecef"),
            header_text: hex_to_color32("#495057"),
            row_main: hex_to_color32("#ffffff"),
            row_nested: hex_to_color32("#f8f9fa"),
            row_expanded: hex_to_color32("#e9ecef"),

            primary: hex_to_color32("#007bff"),
            selection: hex_to_color32("#cfe2ff"),
            hover: hex_to_color32("#f8f9fa"),
            border: hex_to_color32("#dee2e6"),

            danger: hex_to_color32("#dc3545"),
            warning: hex_to_color32("#ffc107"),
            success: hex_to_color32("#28a745"),
        },
    }
}

fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark table palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#212529"),
            panel_background: hex_to_color32("#212529"),
            extreme_background: hex_to_color32("#1a1d20"),

            text: hex_to_color32("#e9ecef"),
            text_dim: hex_to_color32("#adb5bd"),
            text_strong: hex_to_color32("#ffffff"),

            header_background: hex_to_color32("#2b3035"),
            header_text: hex_to_color32("#e9ecef"),
            row_main: hex_to_color32("#343a40"),
            row_nested: hex_to_color32("#2b3035"),
            row_expanded: hex_to_color32("#212529"),

            primary: hex_to_color32("#0d6efd"),
            selection: hex_to_color32("#1c3a5e"),
            hover: hex_to_color32("#3d444b"),
            border: hex_to_color32("#495057"),

            danger: hex_to_color32("#dc3545"),
            warning: hex_to_color32("#ffc107"),
            success: hex_to_color32("#198754"),
        },
    }
}

/// Palette from https://draculatheme.com/spec
fn dracula_theme() -> Theme {
    Theme {
        name: "Dracula".to_string(),
        description: "Dracula color palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#282a36"),
            panel_background: hex_to_color32("#282a36"),
            extreme_background: hex_to_color32("#21222c"),

            text: hex_to_color32("#f8f8f2"),
            text_dim: hex_to_color32("#6272a4"),
            text_strong: hex_to_color32("#f8f8f2"),

            header_background: hex_to_color32("#21222c"),
            header_text: hex_to_color32("#f8f8f2"),
            row_main: hex_to_color32("#282a36"),
            row_nested: hex_to_color32("#2d303e"),
            row_expanded: hex_to_color32("#343746"),

            primary: hex_to_color32("#bd93f9"),
            selection: hex_to_color32("#44475a"),
            hover: hex_to_color32("#44475a"),
            border: hex_to_color32("#6272a4"),

            danger: hex_to_color32("#ff5555"),
            warning: hex_to_color32("#ffb86c"),
            success: hex_to_color32("#50fa7b"),
        },
    }
}

/// Palette from https://github.com/Binaryify/OneDark-Pro
fn one_dark_pro_theme() -> Theme {
    Theme {
        name: "One Dark Pro".to_string(),
        description: "One Dark Pro color palette".to_string(),
        colors: ThemeColors {
            background: hex_to_color32("#282c34"),
            panel_background: hex_to_color32("#282c34"),
            extreme_background: hex_to_color32("#21252b"),

            text: hex_to_color32("#abb2bf"),
            text_dim: hex_to_color32("#5c6370"),
            text_strong: hex_to_color32("#d7dae0"),

            header_background: hex_to_color32("#21252b"),
            header_text: hex_to_color32("#d7dae0"),
            row_main: hex_to_color32("#282c34"),
            row_nested: hex_to_color32("#2c313a"),
            row_expanded: hex_to_color32("#323842"),

            primary: hex_to_color32("#61afef"),
            selection: hex_to_color32("#3e4451"),
            hover: hex_to_color32("#4b5263"),
            border: hex_to_color32("#5c6370"),

            danger: hex_to_color32("#e06c75"),
            warning: hex_to_color32("#d19a66"),
            success: hex_to_color32("#98c379"),
        },
    }
}

/// Converts a hex color string (like "#282a36") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color32() {
        assert_eq!(hex_to_color32("#007bff"), Color32::from_rgb(0, 123, 255));
        assert_eq!(hex_to_color32("bad"), Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        let manager = ThemeManager::new();
        assert_eq!(manager.theme_or_default("Solarized").name, DEFAULT_THEME);
        assert_eq!(manager.list_themes(), vec!["Dark", "Dracula", "Light", "One Dark Pro"]);
    }
}
