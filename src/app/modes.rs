//! Screen and input mode state types.
//!
//! The plugin shows one of three screens. Within the two feed screens the
//! keyboard is interpreted according to [`InputMode`]: plain navigation, an
//! open filter picker, or a custom-date text entry.

use crate::domain::filter::TagKind;

/// The top-level screen on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Feed,
    Favorites,
    Settings,
}

impl Screen {
    pub const ALL: [Self; 3] = [Self::Feed, Self::Favorites, Self::Settings];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Favorites => "Favorites",
            Self::Settings => "Settings",
        }
    }

    /// The next screen in tab order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Feed => Self::Favorites,
            Self::Favorites => Self::Settings,
            Self::Settings => Self::Feed,
        }
    }

    #[must_use]
    pub const fn is_feed(self) -> bool {
        matches!(self, Self::Feed | Self::Favorites)
    }
}

/// Which end of a custom date range is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    From,
    To,
}

impl DateField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::From => "From",
            Self::To => "To",
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and single-key commands.
    #[default]
    Normal,

    /// A filter picker is open for one tag group. Typed characters narrow the
    /// option list.
    Picker(TagKind),

    /// A `YYYY-MM-DD` date is being typed for one end of a custom range.
    DateEntry(DateField),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screens_cycle_through_all() {
        let mut screen = Screen::Feed;
        for expected in [Screen::Favorites, Screen::Settings, Screen::Feed] {
            screen = screen.next();
            assert_eq!(screen, expected);
        }
        assert!(!Screen::Settings.is_feed());
    }
}
