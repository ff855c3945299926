#![forbid(unsafe_code)]

//! Skip and degradation taxonomy for layout passes.
//!
//! Nothing here is fatal. A [`SkipReason`] means the pass produced no
//! placements and the previous frame's visuals stand until the inputs become
//! valid again. A [`LayoutWarning`] means the pass completed, but with its
//! inputs degraded in a defined way (clamped magnitude, dropped sign, ...).

use std::fmt;

/// Why a layout pass was skipped wholesale.
///
/// Skips come from invalid external data (an incomplete glyph set), never
/// from the numeric value itself. The engine reports the first missing piece
/// it notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The numeral list is not exactly ten present glyphs, or the reference
    /// numeral has no height.
    IncompleteNumerals,
    /// A fractional pass needs the decimal point glyph.
    MissingDecimalPoint,
    /// A fractional pass needs the minus sign glyph.
    MissingSignGlyph,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteNumerals => write!(f, "glyph set must carry ten numeral glyphs"),
            Self::MissingDecimalPoint => write!(f, "glyph set has no decimal point glyph"),
            Self::MissingSignGlyph => write!(f, "glyph set has no minus sign glyph"),
        }
    }
}

impl std::error::Error for SkipReason {}

/// A recoverable degradation applied during a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutWarning {
    /// The value's magnitude exceeded the exactly-representable range and was
    /// clamped to the maximum.
    MagnitudeOverflow,
    /// The value was NaN and was displayed as zero.
    NonFinite,
    /// A negative value was displayed unsigned because no minus glyph is
    /// configured.
    SignDropped,
    /// The requested fractional place count exceeded the supported precision
    /// and was clamped.
    PrecisionClamped,
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MagnitudeOverflow => write!(f, "value magnitude clamped to displayable maximum"),
            Self::NonFinite => write!(f, "non-finite value displayed as zero"),
            Self::SignDropped => write!(f, "negative value displayed unsigned (no minus glyph)"),
            Self::PrecisionClamped => write!(f, "fractional places clamped to supported precision"),
        }
    }
}
