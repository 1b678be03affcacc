//! Typed, immutable records parsed from loosely-shaped WordPress JSON.
//!
//! Each record is constructed once per fetch via `from_value` and never
//! mutated. Parsers tolerate missing and wrong-typed fields (defaults per
//! `coerce`); only an untypeable numeric identifier is an error.

mod banner;
mod character;
mod comment;
mod lookup;
mod post;
mod slider;

pub use banner::{Banner, FontStyle, Gradient};
pub use character::Character;
pub use comment::{Comment, ANONYMOUS_AUTHOR};
pub use post::Post;
pub use slider::{SliderItem, SliderKind};

use serde::{Deserialize, Serialize};

/// Content language. Each language has its own fixed, non-overlapping
/// set of REST bases; results are never mixed across languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Id,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Id => "id",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "id" | "indonesian" => Ok(Language::Id),
            other => Err(format!("unknown language: {other}")),
        }
    }
}
