#![forbid(unsafe_code)]

//! Signed-integer digit layout.

use crate::caret::{self, Caret};
use crate::fault::{LayoutWarning, SkipReason};
use crate::{
    DigitCap, DigitLayout, GlyphPlacement, HorizontalPivot, LayoutPass, PaddingMode, Placements,
    VerticalPivot, Warnings,
};
use glyphnum_core::geometry::Rect;
use glyphnum_core::glyph::{Glyph, GlyphKind, GlyphSet, NUMERAL_COUNT};
use smallvec::SmallVec;

/// Layout engine for a signed integer value.
///
/// Builder-style configuration, one [`layout`](DigitLayout::layout) call per
/// pass:
///
/// ```
/// use glyphnum_core::glyph::{Glyph, GlyphSet};
/// use glyphnum_core::geometry::Rect;
/// use glyphnum_layout::{DigitCap, DigitLayout, IntegerLayout};
///
/// let glyphs = GlyphSet::with_numerals([Glyph::from_size(6.0, 10.0); 10]);
/// let pass = IntegerLayout::new(207)
///     .max_digits(DigitCap::Unbounded)
///     .letter_size(10.0)
///     .bounds(Rect::centered(100.0, 20.0))
///     .layout(&glyphs)
///     .unwrap();
/// assert_eq!(pass.placements.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerLayout {
    value: i64,
    cap: DigitCap,
    padding: PaddingMode,
    letter_size: f32,
    spacing: f32,
    h_pivot: HorizontalPivot,
    v_pivot: VerticalPivot,
    bounds: Rect,
}

impl IntegerLayout {
    /// Create an engine for the given value with stock configuration.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            cap: DigitCap::default(),
            padding: PaddingMode::default(),
            letter_size: 50.0,
            spacing: 0.0,
            h_pivot: HorizontalPivot::default(),
            v_pivot: VerticalPivot::default(),
            bounds: Rect::centered(100.0, 50.0),
        }
    }

    /// Set the value to display.
    #[must_use]
    pub fn value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Set the digit cap.
    #[must_use]
    pub fn max_digits(mut self, cap: DigitCap) -> Self {
        self.cap = cap;
        self
    }

    /// Set the padding policy for capped slots.
    #[must_use]
    pub fn padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    /// Set the requested letter size (glyph height in layout units).
    #[must_use]
    pub fn letter_size(mut self, size: f32) -> Self {
        self.letter_size = size;
        self
    }

    /// Set inter-glyph spacing. Negative spacing overlaps glyphs.
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the horizontal and vertical pivots.
    #[must_use]
    pub fn pivots(mut self, horizontal: HorizontalPivot, vertical: VerticalPivot) -> Self {
        self.h_pivot = horizontal;
        self.v_pivot = vertical;
        self
    }

    /// Set the bounding rectangle.
    #[must_use]
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Slot count this configuration can require from a pool, given the
    /// engine's cap (reservation, not visible count).
    #[must_use]
    pub fn reserve_hint(&self) -> u32 {
        match self.cap.limit() {
            Some(limit) => limit,
            None => count_digits(self.value.unsigned_abs()),
        }
    }
}

impl DigitLayout for IntegerLayout {
    fn layout(&self, glyphs: &GlyphSet) -> Result<LayoutPass, SkipReason> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("digit_layout", engine = "integer", value = self.value)
            .entered();

        let numerals = resolve_numerals(glyphs).ok_or(SkipReason::IncompleteNumerals)?;
        let mut warnings = Warnings::new();

        // Sign extraction. A negative value without a minus glyph degrades
        // to zero for display; the stored value is untouched.
        let mut magnitude = self.value.unsigned_abs();
        let mut show_minus = false;
        if self.value < 0 {
            if glyphs.has_sign() {
                show_minus = true;
            } else {
                magnitude = 0;
                warnings.push(LayoutWarning::SignDropped);
            }
        }

        let mut digit_count = count_digits(magnitude);

        // Counter-stop: saturate to all-nines inside the cap.
        if let Some(limit) = self.cap.limit()
            && digit_count > limit
        {
            magnitude = pow10(limit) - 1;
            digit_count = limit;
        }

        let visible = match (self.cap.limit(), self.padding) {
            (Some(limit), PaddingMode::ZeroFill) => limit,
            _ => digit_count,
        };

        let glyph_height = numerals[0].bounds.height();
        let mut letter_scale =
            caret::letter_scale(self.letter_size, self.bounds.height, glyph_height);

        // Least-significant digit first; this is also placement order.
        let mut digits: SmallVec<[u8; 20]> = SmallVec::new();
        let mut rest = magnitude;
        for _ in 0..visible {
            digits.push((rest % 10) as u8);
            rest /= 10;
        }

        let mut raw_width: f32 = digits
            .iter()
            .map(|&d| numerals[d as usize].bounds.width())
            .sum();
        if show_minus
            && let Some(minus) = glyphs.minus_glyph()
        {
            raw_width += minus.bounds.width();
        }

        let mut scaled_width =
            raw_width * letter_scale + visible.saturating_sub(1) as f32 * self.spacing;
        if show_minus {
            scaled_width += self.spacing;
        }

        let spacing_scale = caret::shrink_to_fit(scaled_width, self.bounds.width);
        if spacing_scale < 1.0 {
            letter_scale *= spacing_scale;
            scaled_width = self.bounds.width;
        }
        let spacing = self.spacing * spacing_scale;

        let origin = caret::pivot_origin(self.h_pivot, self.v_pivot, self.bounds, scaled_width);
        let mut caret = Caret::new(origin, self.v_pivot);
        let mut placements = Placements::new();
        for &digit in &digits {
            let bounds = numerals[digit as usize].bounds;
            placements.push(GlyphPlacement {
                glyph: GlyphKind::Digit(digit),
                position: caret.place(bounds, letter_scale, spacing),
                scale: letter_scale,
                visible: true,
            });
        }
        if show_minus
            && let Some(minus) = glyphs.minus_glyph()
        {
            placements.push(GlyphPlacement {
                glyph: GlyphKind::Minus,
                position: caret.place(minus.bounds, letter_scale, spacing),
                scale: letter_scale,
                visible: true,
            });
        }

        Ok(LayoutPass {
            placements,
            letter_scale,
            scaled_width,
            warnings,
        })
    }
}

/// Copy out the ten numeral glyphs, or fail if the set is incomplete.
pub(crate) fn resolve_numerals(glyphs: &GlyphSet) -> Option<[Glyph; NUMERAL_COUNT]> {
    if !glyphs.has_numerals() {
        return None;
    }
    let mut out = [Glyph::default(); NUMERAL_COUNT];
    for (digit, slot) in out.iter_mut().enumerate() {
        *slot = *glyphs.numeral(digit as u8)?;
    }
    Some(out)
}

/// Base-10 digit count; zero counts as one digit.
pub(crate) const fn count_digits(mut value: u64) -> u32 {
    let mut count = 0;
    while value != 0 {
        count += 1;
        value /= 10;
    }
    if count == 0 { 1 } else { count }
}

/// 10^exp. Only called with exponents below the clamped digit count, so this
/// stays inside u64.
const fn pow10(mut exp: u32) -> u64 {
    let mut value: u64 = 1;
    while exp > 0 {
        value *= 10;
        exp -= 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphnum_core::geometry::Vec2;

    const GLYPH_W: f32 = 6.0;
    const GLYPH_H: f32 = 10.0;

    fn glyphs() -> GlyphSet {
        GlyphSet::with_numerals([Glyph::from_size(GLYPH_W, GLYPH_H); NUMERAL_COUNT])
            .minus(Glyph::from_size(4.0, GLYPH_H))
    }

    fn engine(value: i64) -> IntegerLayout {
        IntegerLayout::new(value)
            .max_digits(DigitCap::Unbounded)
            .letter_size(GLYPH_H)
            .bounds(Rect::centered(1000.0, GLYPH_H))
    }

    fn digit_run(pass: &LayoutPass) -> Vec<u8> {
        pass.placements
            .iter()
            .filter_map(|p| match p.glyph {
                GlyphKind::Digit(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn zero_renders_one_slot() {
        let pass = engine(0).layout(&glyphs()).unwrap();
        assert_eq!(digit_run(&pass), vec![0]);
    }

    #[test]
    fn digits_emitted_least_significant_first() {
        let pass = engine(207).layout(&glyphs()).unwrap();
        assert_eq!(digit_run(&pass), vec![7, 0, 2]);
    }

    #[test]
    fn counter_stop_saturates() {
        let pass = engine(12345)
            .max_digits(DigitCap::bounded(3))
            .layout(&glyphs())
            .unwrap();
        assert_eq!(digit_run(&pass), vec![9, 9, 9]);
    }

    #[test]
    fn pad_mode_shows_natural_digits() {
        let pass = engine(42)
            .max_digits(DigitCap::bounded(4))
            .padding(PaddingMode::Pad)
            .layout(&glyphs())
            .unwrap();
        assert_eq!(digit_run(&pass), vec![2, 4]);
    }

    #[test]
    fn zero_fill_pads_leading_zeros() {
        let pass = engine(42)
            .max_digits(DigitCap::bounded(4))
            .padding(PaddingMode::ZeroFill)
            .layout(&glyphs())
            .unwrap();
        assert_eq!(digit_run(&pass), vec![2, 4, 0, 0]);
    }

    #[test]
    fn minus_is_placed_last_and_leftmost() {
        let pass = engine(-35).layout(&glyphs()).unwrap();
        let last = pass.placements.last().unwrap();
        assert_eq!(last.glyph, GlyphKind::Minus);
        let min_x = pass
            .placements
            .iter()
            .map(|p| p.position.x)
            .fold(f32::INFINITY, f32::min);
        assert_eq!(last.position.x, min_x);
        assert!(pass.warnings.is_empty());
    }

    #[test]
    fn negative_without_minus_glyph_shows_zero() {
        let set = GlyphSet::with_numerals([Glyph::from_size(GLYPH_W, GLYPH_H); NUMERAL_COUNT]);
        let pass = engine(-35).layout(&set).unwrap();
        assert_eq!(digit_run(&pass), vec![0]);
        assert_eq!(pass.warnings.as_slice(), [LayoutWarning::SignDropped]);
    }

    #[test]
    fn min_value_does_not_overflow() {
        let pass = engine(i64::MIN).layout(&glyphs()).unwrap();
        // 9223372036854775808 has 19 digits, plus the sign glyph.
        assert_eq!(digit_run(&pass).len(), 19);
        assert_eq!(pass.placements.len(), 20);
    }

    #[test]
    fn incomplete_set_skips() {
        let pass = engine(5).layout(&GlyphSet::new());
        assert_eq!(pass.unwrap_err(), SkipReason::IncompleteNumerals);
    }

    #[test]
    fn right_pivot_aligns_trailing_edge() {
        let rect = Rect::centered(200.0, GLYPH_H);
        let pass = engine(908)
            .pivots(HorizontalPivot::Right, VerticalPivot::Center)
            .bounds(rect)
            .layout(&glyphs())
            .unwrap();
        let trailing = pass.placements[0];
        let right_edge = trailing.position.x + (GLYPH_W / 2.0) * trailing.scale;
        assert!((right_edge - rect.x_max()).abs() < 1e-4);
    }

    #[test]
    fn shrink_fits_bounding_width() {
        let rect = Rect::centered(30.0, GLYPH_H);
        let pass = engine(8888888)
            .spacing(2.0)
            .bounds(rect)
            .layout(&glyphs())
            .unwrap();
        assert!(pass.scaled_width <= rect.width + 1e-4);
        // Glyph extents shrank along with the run.
        assert!(pass.letter_scale < 1.0);
    }

    #[test]
    fn layout_is_idempotent() {
        let eng = engine(-4096).spacing(1.5);
        let a = eng.layout(&glyphs()).unwrap();
        let b = eng.layout(&glyphs()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scale_tracks_letter_size() {
        let pass = engine(7)
            .letter_size(GLYPH_H * 3.0)
            .bounds(Rect::centered(100.0, 100.0))
            .layout(&glyphs())
            .unwrap();
        assert_eq!(pass.letter_scale, 3.0);
        // A single centered glyph lands exactly on the origin.
        assert_eq!(pass.placements[0].position, Vec2::ZERO);
    }
}
