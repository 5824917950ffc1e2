use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMode {
    Auto,
    Unicode,
    Ascii,
}

impl Default for GlyphMode {
    fn default() -> Self {
        GlyphMode::Auto
    }
}

/// Icon placeholders drawn by the calendar panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ChevronLeft,
    ChevronRight,
    TodayDot,
    PastDot,
    FutureDot,
    FocusedDot,
    ProgressFill,
    ProgressTrack,
}

/// Resolved glyph set for the current terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    unicode: bool,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs { unicode: true };
    pub const ASCII: Glyphs = Glyphs { unicode: false };

    pub fn materialize(mode: GlyphMode) -> Glyphs {
        let glyphs = match mode {
            GlyphMode::Unicode => Glyphs::UNICODE,
            GlyphMode::Ascii => Glyphs::ASCII,
            GlyphMode::Auto => {
                let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
                    .iter()
                    .map(|var| env::var(var).ok());
                if locale_is_utf8(locale) {
                    Glyphs::UNICODE
                } else {
                    log::info!("Locale is not UTF-8, falling back to ASCII glyphs");
                    Glyphs::ASCII
                }
            }
        };
        log::debug!("Materialized glyphs for {:?}: unicode={}", mode, glyphs.unicode);
        glyphs
    }

    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    pub fn glyph(&self, icon: Icon) -> char {
        if self.unicode {
            match icon {
                Icon::ChevronLeft => '‹',
                Icon::ChevronRight => '›',
                Icon::TodayDot => '●',
                Icon::PastDot => '•',
                Icon::FutureDot => '·',
                Icon::FocusedDot => '◆',
                Icon::ProgressFill => '━',
                Icon::ProgressTrack => '─',
            }
        } else {
            match icon {
                Icon::ChevronLeft => '<',
                Icon::ChevronRight => '>',
                Icon::TodayDot => '@',
                Icon::PastDot => 'o',
                Icon::FutureDot => '.',
                Icon::FocusedDot => '*',
                Icon::ProgressFill => '=',
                Icon::ProgressTrack => '-',
            }
        }
    }
}

/// POSIX precedence: the first non-empty variable decides.
fn locale_is_utf8<I: IntoIterator<Item = Option<String>>>(vars: I) -> bool {
    vars.into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        })
        .unwrap_or(false)
}
