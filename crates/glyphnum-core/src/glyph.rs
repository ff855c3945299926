#![forbid(unsafe_code)]

//! Glyph set model and validation.
//!
//! A [`GlyphSet`] is the complete collection of sprite glyphs a display needs:
//! the ten numerals (index = digit value), plus an optional decimal point and
//! an optional minus sign. The set is authored host-side: entries can be
//! missing or the numeral list can have the wrong length, so the layout
//! engines validate with the `has_*` predicates before every pass and skip
//! the pass on failure rather than render garbage.

use crate::geometry::GlyphBounds;

/// Identifies which image a slot should display.
///
/// The layout engines never touch image data; they emit `GlyphKind` and the
/// host resolves it to its own sprite asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    /// A numeral glyph, 0–9.
    Digit(u8),
    /// The decimal point glyph.
    DecimalPoint,
    /// The minus sign glyph.
    Minus,
}

/// One glyph's layout-relevant data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    /// Intrinsic sprite bounds in the glyph's own units.
    pub bounds: GlyphBounds,
}

impl Glyph {
    /// Create a glyph from intrinsic bounds.
    #[inline]
    pub const fn new(bounds: GlyphBounds) -> Self {
        Self { bounds }
    }

    /// Convenience: a glyph centered on its origin with the given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self {
            bounds: GlyphBounds::from_size(width, height),
        }
    }
}

/// The glyph collection a display renders from.
///
/// Numeral slots are positional: `numerals[3]` is the glyph for digit 3.
/// The list is host-authored and may be short or have gaps; use
/// [`GlyphSet::has_numerals`] before relying on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphSet {
    numerals: Vec<Option<Glyph>>,
    decimal_point: Option<Glyph>,
    minus: Option<Glyph>,
}

/// Number of numeral glyphs a complete set carries.
pub const NUMERAL_COUNT: usize = 10;

impl GlyphSet {
    /// Create an empty set (fails validation until populated).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set with all ten numerals assigned.
    #[must_use]
    pub fn with_numerals(numerals: [Glyph; NUMERAL_COUNT]) -> Self {
        Self {
            numerals: numerals.into_iter().map(Some).collect(),
            decimal_point: None,
            minus: None,
        }
    }

    /// Assign the glyph for one digit (0–9). Out-of-range digits are ignored.
    pub fn set_numeral(&mut self, digit: u8, glyph: Glyph) {
        let idx = digit as usize;
        if idx >= NUMERAL_COUNT {
            return;
        }
        if self.numerals.len() < NUMERAL_COUNT {
            self.numerals.resize(NUMERAL_COUNT, None);
        }
        self.numerals[idx] = Some(glyph);
    }

    /// Assign the decimal point glyph.
    pub fn set_decimal_point(&mut self, glyph: Glyph) {
        self.decimal_point = Some(glyph);
    }

    /// Assign the minus sign glyph.
    pub fn set_minus(&mut self, glyph: Glyph) {
        self.minus = Some(glyph);
    }

    /// Builder-style: set the decimal point glyph.
    #[must_use]
    pub fn decimal_point(mut self, glyph: Glyph) -> Self {
        self.decimal_point = Some(glyph);
        self
    }

    /// Builder-style: set the minus sign glyph.
    #[must_use]
    pub fn minus(mut self, glyph: Glyph) -> Self {
        self.minus = Some(glyph);
        self
    }

    /// Look up a numeral glyph by digit value.
    #[must_use]
    pub fn numeral(&self, digit: u8) -> Option<&Glyph> {
        self.numerals.get(digit as usize).and_then(Option::as_ref)
    }

    /// The decimal point glyph, if assigned.
    #[must_use]
    pub fn point_glyph(&self) -> Option<&Glyph> {
        self.decimal_point.as_ref()
    }

    /// The minus sign glyph, if assigned.
    #[must_use]
    pub fn minus_glyph(&self) -> Option<&Glyph> {
        self.minus.as_ref()
    }

    /// All ten numerals present, none missing, and the reference numeral
    /// (digit 0, whose height sets the letter scale) is not degenerate.
    #[must_use]
    pub fn has_numerals(&self) -> bool {
        if self.numerals.len() != NUMERAL_COUNT {
            return false;
        }
        if self.numerals.iter().any(Option::is_none) {
            return false;
        }
        // A zero-height reference glyph would poison the letter scale.
        self.numerals[0].is_some_and(|g| g.bounds.height() > 0.0)
    }

    /// A decimal point glyph is assigned.
    #[must_use]
    pub fn has_decimal_point(&self) -> bool {
        self.decimal_point.is_some()
    }

    /// A minus sign glyph is assigned.
    #[must_use]
    pub fn has_sign(&self) -> bool {
        self.minus.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> [Glyph; NUMERAL_COUNT] {
        [Glyph::from_size(6.0, 10.0); NUMERAL_COUNT]
    }

    #[test]
    fn empty_set_fails_validation() {
        let set = GlyphSet::new();
        assert!(!set.has_numerals());
        assert!(!set.has_decimal_point());
        assert!(!set.has_sign());
    }

    #[test]
    fn full_numerals_pass_validation() {
        let set = GlyphSet::with_numerals(ten());
        assert!(set.has_numerals());
    }

    #[test]
    fn gap_fails_validation() {
        let mut set = GlyphSet::new();
        // Populate all but digit 7.
        for d in [0u8, 1, 2, 3, 4, 5, 6, 8, 9] {
            set.set_numeral(d, Glyph::from_size(6.0, 10.0));
        }
        assert!(!set.has_numerals());
        set.set_numeral(7, Glyph::from_size(6.0, 10.0));
        assert!(set.has_numerals());
    }

    #[test]
    fn zero_height_reference_fails_validation() {
        let mut glyphs = ten();
        glyphs[0] = Glyph::from_size(6.0, 0.0);
        let set = GlyphSet::with_numerals(glyphs);
        assert!(!set.has_numerals());
    }

    #[test]
    fn optional_glyphs() {
        let set = GlyphSet::with_numerals(ten())
            .decimal_point(Glyph::from_size(3.0, 10.0))
            .minus(Glyph::from_size(5.0, 10.0));
        assert!(set.has_decimal_point());
        assert!(set.has_sign());
        assert_eq!(set.point_glyph().unwrap().bounds.width(), 3.0);
        assert_eq!(set.minus_glyph().unwrap().bounds.width(), 5.0);
    }

    #[test]
    fn numeral_lookup() {
        let set = GlyphSet::with_numerals(ten());
        assert!(set.numeral(9).is_some());
        assert!(set.numeral(10).is_none());
    }

    #[test]
    fn out_of_range_digit_ignored() {
        let mut set = GlyphSet::with_numerals(ten());
        set.set_numeral(12, Glyph::from_size(1.0, 1.0));
        assert!(set.has_numerals());
    }
}
