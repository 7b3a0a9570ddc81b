use crate::storage::LocalStore;
use ratatui::style::Color;

/// Storage key for the persisted preference.
const THEME_KEY: &str = "theme";

/// The wall's accent blue, shared by both palettes.
const ACCENT: Color = Color::Rgb(77, 108, 168);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Resolve the session theme: the saved preference wins, then the
    /// configured default, then dark (the ambient assumption for a
    /// terminal).
    pub fn resolve(storage: &LocalStore, configured_default: &str) -> Self {
        storage
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .or_else(|| Theme::parse(configured_default))
            .unwrap_or(Theme::Dark)
    }

    /// Persist the preference. A write failure is logged and forgotten;
    /// the session keeps the in-memory theme either way.
    pub fn persist(self, storage: &LocalStore) {
        if let Err(err) = storage.set(THEME_KEY, self.as_str()) {
            tracing::warn!(error = %err, "could not persist theme preference");
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::Reset,
                text: Color::White,
                muted: Color::DarkGray,
                accent: ACCENT,
                header_text: Color::White,
                border: Color::DarkGray,
                error: Color::LightRed,
                skeleton: Color::DarkGray,
            },
            Theme::Light => Palette {
                background: Color::Rgb(247, 249, 252),
                text: Color::Black,
                muted: Color::Gray,
                accent: ACCENT,
                header_text: Color::Rgb(247, 249, 252),
                border: Color::Gray,
                error: Color::Red,
                skeleton: Color::Gray,
            },
        }
    }
}

/// Colors for one theme. The UI never names colors directly; everything
/// goes through the active palette so the toggle swaps cleanly.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub header_text: Color,
    pub border: Color,
    pub error: Color,
    pub skeleton: Color,
}
