//! Feedback codes for listing quality findings

use serde::{Deserialize, Serialize};

/// One finding produced while scoring a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum Feedback {
    // =========================================================================
    // F1xx: Visual Impulse
    // =========================================================================
    /// Sharpness component scored below full marks
    F101_LOW_SHARPNESS,
    /// Composition too busy
    F102_CLUTTERED_COMPOSITION,
    /// Weak texture or aesthetics
    F103_WEAK_TEXTURE,
    /// No lifestyle shot
    F104_NO_LIFESTYLE,

    // =========================================================================
    // F2xx: SEO Foundation
    // =========================================================================
    /// Core object not in the leading part of the title
    F201_CORE_OBJECT_LATE,
    /// Title under the minimum length
    F202_SHORT_TITLE,
    /// Title shouts or repeats keywords
    F203_SPAMMY_TITLE,
    /// Too few multi-word tags
    F204_FEW_LONG_TAIL_TAGS,

    // =========================================================================
    // F3xx: Zeitgeist
    // =========================================================================
    /// Trend is low but the visuals are outstanding
    F301_TRENDSETTER,
}

impl Feedback {
    pub fn code(&self) -> &'static str {
        match self {
            Self::F101_LOW_SHARPNESS => "F101_LOW_SHARPNESS",
            Self::F102_CLUTTERED_COMPOSITION => "F102_CLUTTERED_COMPOSITION",
            Self::F103_WEAK_TEXTURE => "F103_WEAK_TEXTURE",
            Self::F104_NO_LIFESTYLE => "F104_NO_LIFESTYLE",
            Self::F201_CORE_OBJECT_LATE => "F201_CORE_OBJECT_LATE",
            Self::F202_SHORT_TITLE => "F202_SHORT_TITLE",
            Self::F203_SPAMMY_TITLE => "F203_SPAMMY_TITLE",
            Self::F204_FEW_LONG_TAIL_TAGS => "F204_FEW_LONG_TAIL_TAGS",
            Self::F301_TRENDSETTER => "F301_TRENDSETTER",
        }
    }

    /// Human-readable message shown to the seller
    pub fn message(&self) -> &'static str {
        match self {
            Self::F101_LOW_SHARPNESS => "Image sharpness is low.",
            Self::F102_CLUTTERED_COMPOSITION => "Composition is cluttered (simplicity principle).",
            Self::F103_WEAK_TEXTURE => "Texture and aesthetics are weak.",
            Self::F104_NO_LIFESTYLE => "Lifestyle image is missing.",
            Self::F201_CORE_OBJECT_LATE => "Main product keyword should appear at the start of the title.",
            Self::F202_SHORT_TITLE => "Title is short; use the available length for search phrases.",
            Self::F203_SPAMMY_TITLE => "Title is all caps or repeats the same word too often.",
            Self::F204_FEW_LONG_TAIL_TAGS => "Add more multi-word (long-tail) tags.",
            Self::F301_TRENDSETTER => "TRENDSETTER: trend is low but the visuals are excellent.",
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
