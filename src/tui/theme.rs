// Theme system for the kiosk display
//
// Two built-in palettes. The light one matches the printed machine wrap;
// the dark one is for kiosks installed in dim spaces.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Names accepted in the `theme` config key
pub const THEME_NAMES: &[&str] = &["Wendor Light", "Wendor Dark"];

/// Complete resolved theme ready for use in the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── UI Chrome ───────────────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub border_type: BorderType,

    // ─── Selection ───────────────────────────────────────────
    pub selection: Color,

    // ─── Buttons ─────────────────────────────────────────────
    pub button: Color,
    pub button_fg: Color,
    pub disabled: Color,

    // ─── Messages ────────────────────────────────────────────
    pub price: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to Wendor Light
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "wendor light" | "light" => Self::light(),
            "wendor dark" | "dark" => Self::dark(),
            other => {
                tracing::warn!(
                    "Unknown theme '{}' (expected one of {:?}), using Wendor Light",
                    other,
                    THEME_NAMES
                );
                Self::light()
            }
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Wendor Light".to_string(),
            background: Color::Rgb(250, 250, 247),
            foreground: Color::Rgb(33, 37, 41),
            muted: Color::Rgb(120, 124, 130),
            title: Color::Rgb(214, 79, 32),
            border: Color::Rgb(200, 200, 196),
            highlight: Color::Rgb(214, 79, 32),
            status_bar: Color::Rgb(60, 64, 70),
            border_type: BorderType::Rounded,
            selection: Color::Rgb(255, 226, 204),
            button: Color::Rgb(214, 79, 32),
            button_fg: Color::Rgb(255, 255, 255),
            disabled: Color::Rgb(180, 180, 176),
            price: Color::Rgb(20, 120, 60),
            success: Color::Rgb(20, 140, 70),
            warning: Color::Rgb(200, 130, 0),
            error: Color::Rgb(200, 40, 40),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Wendor Dark".to_string(),
            background: Color::Rgb(24, 26, 31),
            foreground: Color::Rgb(226, 228, 232),
            muted: Color::Rgb(130, 136, 146),
            title: Color::Rgb(255, 140, 80),
            border: Color::Rgb(70, 74, 84),
            highlight: Color::Rgb(255, 140, 80),
            status_bar: Color::Rgb(180, 184, 192),
            border_type: BorderType::Rounded,
            selection: Color::Rgb(70, 50, 40),
            button: Color::Rgb(255, 140, 80),
            button_fg: Color::Rgb(24, 26, 31),
            disabled: Color::Rgb(80, 84, 92),
            price: Color::Rgb(120, 220, 150),
            success: Color::Rgb(120, 220, 150),
            warning: Color::Rgb(240, 190, 80),
            error: Color::Rgb(240, 100, 100),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names() {
        for name in THEME_NAMES {
            assert_eq!(Theme::by_name(name).name, *name);
        }
        assert_eq!(Theme::by_name("dark").name, "Wendor Dark");
    }

    #[test]
    fn unknown_name_falls_back_to_light() {
        assert_eq!(Theme::by_name("Dracula").name, "Wendor Light");
    }
}
