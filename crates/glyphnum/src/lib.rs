#![forbid(unsafe_code)]

//! Glyphnum public facade crate.
//!
//! Glyphnum renders numeric values (score counters, currency, stats) as
//! horizontal rows of pre-rendered glyph sprites, with no font pipeline in
//! the loop. This crate re-exports the stable surface from the internal
//! crates and offers a lightweight prelude.
//!
//! # Overview
//!
//! - Build a [`GlyphSet`] describing the ten numeral sprites (plus the
//!   optional minus and decimal point sprites) and their intrinsic bounds.
//! - For pure layout math, configure an [`IntegerLayout`] or
//!   [`FractionalLayout`] and call [`DigitLayout::layout`] to get positioned
//!   [`GlyphPlacement`]s.
//! - For a retained on-screen display, implement [`SlotHost`] over your
//!   scene graph and drive an [`IntegerDigits`] or [`FractionalDigits`]
//!   instance, calling `recompute` once per update tick.

// --- Core re-exports -------------------------------------------------------

pub use glyphnum_core::color::PackedRgba;
pub use glyphnum_core::geometry::{GlyphBounds, Rect, Vec2};
pub use glyphnum_core::glyph::{Glyph, GlyphKind, GlyphSet, NUMERAL_COUNT};

// --- Layout re-exports -----------------------------------------------------

pub use glyphnum_layout::{
    Dec, DigitCap, DigitLayout, FractionalLayout, GlyphPlacement, HorizontalPivot, IntegerLayout,
    LayoutPass, LayoutWarning, PaddingMode, SkipReason, VerticalPivot,
};

// --- Display re-exports ----------------------------------------------------

pub use glyphnum_display::{
    Dirty, FractionalDigits, IntegerDigits, MaterialId, PassOutcome, SlotHost, SlotId, SlotPool,
    VisualStyle,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DigitCap, DigitLayout, FractionalDigits, FractionalLayout, Glyph, GlyphBounds, GlyphKind,
        GlyphSet, HorizontalPivot, IntegerDigits, IntegerLayout, PaddingMode, PassOutcome, Rect,
        SlotHost, VerticalPivot, VisualStyle,
    };
}
