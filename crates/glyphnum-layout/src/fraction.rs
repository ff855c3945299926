#![forbid(unsafe_code)]

//! Fixed-point fractional digit layout.
//!
//! Differs from the integer engine in two ways: the glyph run always carries
//! exactly one decimal point glyph, and digit extraction rounds at the least
//! significant displayed place with the carry rippling toward (and possibly
//! past) the most significant integer digit. `9.99` shown with one fractional
//! place becomes `10.0`, growing the integer part mid-pass.

use crate::caret::{self, Caret};
use crate::decimal::{self, Dec};
use crate::fault::{LayoutWarning, SkipReason};
use crate::integer::resolve_numerals;
use crate::{
    DigitLayout, GlyphPlacement, HorizontalPivot, LayoutPass, Placements, VerticalPivot, Warnings,
};
use glyphnum_core::geometry::Rect;
use glyphnum_core::glyph::{GlyphKind, GlyphSet};
use smallvec::SmallVec;

/// Layout engine for a signed decimal value with fixed fractional places.
///
/// Fractional passes hold the glyph set to the strictest precondition: all
/// ten numerals, the decimal point, and the minus sign must be present, even
/// when the current value is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalLayout {
    value: f64,
    decimal_places: u32,
    letter_size: f32,
    spacing: f32,
    h_pivot: HorizontalPivot,
    v_pivot: VerticalPivot,
    bounds: Rect,
}

impl FractionalLayout {
    /// Create an engine for the given value with stock configuration.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            decimal_places: 2,
            letter_size: 50.0,
            spacing: 0.0,
            h_pivot: HorizontalPivot::default(),
            v_pivot: VerticalPivot::default(),
            bounds: Rect::centered(100.0, 50.0),
        }
    }

    /// Set the value to display.
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the number of digits shown after the decimal point.
    #[must_use]
    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
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

    /// Minimum numeral-slot reservation for this configuration: the
    /// fractional places plus at least one integer digit.
    #[must_use]
    pub fn reserve_hint(&self) -> u32 {
        self.decimal_places.min(decimal::FRAC_PLACES) + 1
    }
}

impl DigitLayout for FractionalLayout {
    fn layout(&self, glyphs: &GlyphSet) -> Result<LayoutPass, SkipReason> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("digit_layout", engine = "fractional", value = self.value)
            .entered();

        let numerals = resolve_numerals(glyphs).ok_or(SkipReason::IncompleteNumerals)?;
        let point = *glyphs.point_glyph().ok_or(SkipReason::MissingDecimalPoint)?;
        let minus = *glyphs.minus_glyph().ok_or(SkipReason::MissingSignGlyph)?;
        let mut warnings = Warnings::new();

        // Normalize: sign, then magnitude onto the exact decimal grid.
        let show_minus = self.value < 0.0;
        let mut magnitude = self.value.abs();
        if magnitude.is_nan() {
            warnings.push(LayoutWarning::NonFinite);
            magnitude = 0.0;
        } else if magnitude > decimal::MAX_MAGNITUDE {
            warnings.push(LayoutWarning::MagnitudeOverflow);
            magnitude = decimal::MAX_MAGNITUDE;
        }
        let value = Dec::from_magnitude(magnitude);

        let places = if self.decimal_places > decimal::FRAC_PLACES {
            warnings.push(LayoutWarning::PrecisionClamped);
            decimal::FRAC_PLACES
        } else {
            self.decimal_places
        };

        // Extraction walks least-significant-first so the rounding carry can
        // ripple toward the more significant digits as they are produced.
        let mut digits_before = value.integer_digit_count();
        let mut carry = false;

        let mut frac_digits: SmallVec<[u8; 12]> = SmallVec::new();
        for i in 0..places {
            let place = places - i;
            let mut digit = if i == 0 {
                value.round_fraction_digit(place)
            } else {
                value.fraction_digit(place)
            };
            if carry {
                digit += 1;
            }
            if digit > 9 {
                digit -= 10;
                carry = true;
            } else {
                carry = false;
            }
            frac_digits.push(digit as u8);
        }

        let mut int_digits: SmallVec<[u8; 28]> = SmallVec::new();
        for index in 0..digits_before {
            // With no fractional digits the rounding moves to the units place.
            let mut digit = if places == 0 && index == 0 {
                value.round_integer_digit(0)
            } else {
                value.integer_digit(index)
            };
            if carry {
                digit += 1;
            }
            if digit > 9 {
                digit -= 10;
                carry = true;
            } else {
                carry = false;
            }
            int_digits.push(digit as u8);
        }
        if carry {
            // Carry past the most significant digit grows the integer part.
            int_digits.push(1);
            digits_before += 1;
        }

        let glyph_height = numerals[0].bounds.height();
        let mut letter_scale =
            caret::letter_scale(self.letter_size, self.bounds.height, glyph_height);

        let mut raw_width: f32 = frac_digits
            .iter()
            .chain(int_digits.iter())
            .map(|&d| numerals[d as usize].bounds.width())
            .sum();
        raw_width += point.bounds.width();
        if show_minus {
            raw_width += minus.bounds.width();
        }

        // The point counts as a slot, so numeral count == slot count - 1.
        let numeral_slots = (digits_before + places) as f32;
        let mut scaled_width = raw_width * letter_scale + numeral_slots * self.spacing;
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
        for &digit in &frac_digits {
            let bounds = numerals[digit as usize].bounds;
            placements.push(GlyphPlacement {
                glyph: GlyphKind::Digit(digit),
                position: caret.place(bounds, letter_scale, spacing),
                scale: letter_scale,
                visible: true,
            });
        }
        placements.push(GlyphPlacement {
            glyph: GlyphKind::DecimalPoint,
            position: caret.place(point.bounds, letter_scale, spacing),
            scale: letter_scale,
            visible: true,
        });
        for &digit in &int_digits {
            let bounds = numerals[digit as usize].bounds;
            placements.push(GlyphPlacement {
                glyph: GlyphKind::Digit(digit),
                position: caret.place(bounds, letter_scale, spacing),
                scale: letter_scale,
                visible: true,
            });
        }
        if show_minus {
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
