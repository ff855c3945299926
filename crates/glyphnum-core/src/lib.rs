#![forbid(unsafe_code)]

//! Core: geometry, the glyph set model, and the logging facade.

pub mod color;
pub mod geometry;
pub mod glyph;
pub mod logging;

pub use color::PackedRgba;
pub use geometry::{GlyphBounds, Rect, Vec2};
pub use glyph::{Glyph, GlyphKind, GlyphSet, NUMERAL_COUNT};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
