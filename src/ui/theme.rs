//! # Theme System
//!
//! Colors for the container list, log panel and footer, grouped by role.
//! Rendering code reads theme fields instead of hardcoding
//! `ratatui::style::Color` values. The theme is picked by name from the
//! config file or `--theme`.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Dracula**
//! - **Nord**
//! - **Gruvbox Dark**
//! - **Solarized Dark**

use ratatui::style::Color;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name used in config files.
    pub name: &'static str,

    /// Panel background.
    pub bg: Color,
    /// Primary text (container names).
    pub fg: Color,
    /// Secondary text (images, hints, unfocused borders).
    pub fg_dim: Color,

    /// Focused border and selected-row background.
    pub accent: Color,
    /// Panel titles.
    pub secondary: Color,

    /// Status line for failures.
    pub error: Color,
    /// State badge for running containers.
    pub running: Color,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Like [`Theme::by_name`], falling back to the default for unknown names.
    pub fn resolve(name: &str) -> &'static Theme {
        Self::by_name(name).unwrap_or_else(|| {
            warn!(theme = name, "unknown theme, using default");
            Self::default_theme()
        })
    }
}

static BUILT_IN_THEMES: [Theme; 5] = [
    // 0 - Catppuccin Mocha (default)
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        error: Color::Rgb(243, 139, 168),     // red
        running: Color::Rgb(166, 227, 161),   // green
    },
    // 1 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),    // cyan
        secondary: Color::Rgb(241, 250, 140), // yellow
        error: Color::Rgb(255, 85, 85),
        running: Color::Rgb(80, 250, 123),
    },
    // 2 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),    // frost
        secondary: Color::Rgb(235, 203, 139), // yellow
        error: Color::Rgb(191, 97, 106),
        running: Color::Rgb(163, 190, 140),
    },
    // 3 - Gruvbox Dark
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),   // blue
        secondary: Color::Rgb(250, 189, 47), // yellow
        error: Color::Rgb(251, 73, 52),
        running: Color::Rgb(184, 187, 38),
    },
    // 4 - Solarized Dark
    Theme {
        name: "Solarized Dark",
        bg: Color::Rgb(0, 43, 54),
        fg: Color::Rgb(131, 148, 150),
        fg_dim: Color::Rgb(88, 110, 117),
        accent: Color::Rgb(38, 139, 210),   // blue
        secondary: Color::Rgb(181, 137, 0), // yellow
        error: Color::Rgb(220, 50, 47),
        running: Color::Rgb(133, 153, 0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Convert a catppuccin color to a ratatui Color via its RGB values.
    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_mocha() {
        assert_eq!(Theme::default_theme().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(Theme::resolve("no such theme").name, "Catppuccin Mocha");
        assert_eq!(Theme::resolve("dracula").name, "Dracula");
    }

    #[test]
    fn test_catppuccin_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::default_theme();
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.accent, ctp(mocha.blue));
        assert_eq!(theme.secondary, ctp(mocha.yellow));
        assert_eq!(theme.running, ctp(mocha.green));
        assert_eq!(theme.error, ctp(mocha.red));
    }

    #[test]
    fn test_all_themes_have_distinct_names() {
        let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicate theme names found");
    }
}
