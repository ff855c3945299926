#![forbid(unsafe_code)]

//! Shared placement primitives: pivot origin, letter scale, width fitting,
//! and the caret walk.
//!
//! Both engines lay glyphs out the same way: compute a pivot-derived origin
//! at the trailing (rightmost) end of the run, then place glyphs one by one
//! while the caret advances leftward. The first-placed glyph is therefore the
//! least significant one.
//!
//! The pivot formulas are intentionally asymmetric: `Left` is expressed as
//! `x_min + scaled_width` while `Right` is `x_max`, and the vertical `Center`
//! ignores the rectangle entirely. These exact anchor positions are part of
//! the display contract and must not be "straightened out".

use crate::{HorizontalPivot, VerticalPivot};
use glyphnum_core::geometry::{GlyphBounds, Rect, Vec2};

/// Compute the caret's starting point for a run of the given scaled width.
#[must_use]
pub fn pivot_origin(
    horizontal: HorizontalPivot,
    vertical: VerticalPivot,
    rect: Rect,
    scaled_width: f32,
) -> Vec2 {
    let x = match horizontal {
        HorizontalPivot::Left => rect.x_min() + scaled_width,
        HorizontalPivot::Right => rect.x_max(),
        HorizontalPivot::Center => scaled_width / 2.0,
    };
    let y = match vertical {
        VerticalPivot::Top => rect.y_max(),
        VerticalPivot::Bottom => rect.y_min(),
        VerticalPivot::Center => 0.0,
    };
    Vec2::new(x, y)
}

/// Uniform glyph scale: requested letter size, clamped by the box height,
/// divided by the reference glyph's intrinsic height.
#[must_use]
pub fn letter_scale(letter_size: f32, rect_height: f32, glyph_height: f32) -> f32 {
    letter_size.min(rect_height) / glyph_height
}

/// Shrink factor that fits a run of `total_width` into `max_width`.
///
/// Returns 1.0 when the run already fits (or has no positive width; heavy
/// negative spacing can drive the nominal width below zero, which never needs
/// shrinking).
#[must_use]
pub fn shrink_to_fit(total_width: f32, max_width: f32) -> f32 {
    if total_width > max_width && total_width > 0.0 {
        max_width / total_width
    } else {
        1.0
    }
}

/// The running placement cursor.
///
/// Starts at the pivot origin and moves leftward as glyphs are placed. Each
/// placement right-aligns the glyph's right edge to the caret, applies the
/// vertical pivot offset, then retreats by the glyph's scaled width plus
/// spacing.
#[derive(Debug, Clone, Copy)]
pub struct Caret {
    position: Vec2,
    vertical: VerticalPivot,
}

impl Caret {
    /// Start a caret at the given origin.
    #[must_use]
    pub fn new(origin: Vec2, vertical: VerticalPivot) -> Self {
        Self {
            position: origin,
            vertical,
        }
    }

    /// Current caret position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Place one glyph and advance.
    ///
    /// Returns the glyph's local position. `spacing` is the already-shrunk
    /// inter-glyph spacing for this pass.
    pub fn place(&mut self, bounds: GlyphBounds, scale: f32, spacing: f32) -> Vec2 {
        let offset_x = -(bounds.center.x + bounds.extents.x) * scale;
        let offset_y = match self.vertical {
            VerticalPivot::Top => -(bounds.center.y + bounds.extents.y) * scale,
            VerticalPivot::Bottom => bounds.center.y + bounds.extents.y * scale,
            VerticalPivot::Center => 0.0,
        };
        let position = Vec2::new(self.position.x + offset_x, self.position.y + offset_y);
        self.position.x -= bounds.width() * scale + spacing;
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(-50.0, -20.0, 100.0, 40.0);

    #[test]
    fn pivot_origin_horizontal() {
        let w = 30.0;
        let left = pivot_origin(HorizontalPivot::Left, VerticalPivot::Center, RECT, w);
        assert_eq!(left.x, RECT.x_min() + w);
        let right = pivot_origin(HorizontalPivot::Right, VerticalPivot::Center, RECT, w);
        assert_eq!(right.x, RECT.x_max());
        let center = pivot_origin(HorizontalPivot::Center, VerticalPivot::Center, RECT, w);
        assert_eq!(center.x, w / 2.0);
    }

    #[test]
    fn pivot_origin_vertical() {
        let top = pivot_origin(HorizontalPivot::Center, VerticalPivot::Top, RECT, 0.0);
        assert_eq!(top.y, RECT.y_max());
        let bottom = pivot_origin(HorizontalPivot::Center, VerticalPivot::Bottom, RECT, 0.0);
        assert_eq!(bottom.y, RECT.y_min());
        let center = pivot_origin(HorizontalPivot::Center, VerticalPivot::Center, RECT, 0.0);
        assert_eq!(center.y, 0.0);
    }

    #[test]
    fn letter_scale_clamps_to_height() {
        // Requested size larger than the box: the box wins.
        assert_eq!(letter_scale(100.0, 40.0, 10.0), 4.0);
        // Requested size smaller than the box: the request wins.
        assert_eq!(letter_scale(20.0, 40.0, 10.0), 2.0);
    }

    #[test]
    fn shrink_only_when_over() {
        assert_eq!(shrink_to_fit(50.0, 100.0), 1.0);
        assert_eq!(shrink_to_fit(200.0, 100.0), 0.5);
        // Negative nominal width never shrinks.
        assert_eq!(shrink_to_fit(-5.0, 100.0), 1.0);
    }

    #[test]
    fn caret_right_aligns_and_retreats() {
        let bounds = GlyphBounds::from_size(6.0, 10.0);
        let mut caret = Caret::new(Vec2::new(10.0, 0.0), VerticalPivot::Center);

        let first = caret.place(bounds, 1.0, 2.0);
        // Right edge of a centered glyph sits at center.x + extents.x = 3.0,
        // so the glyph center lands 3.0 left of the caret.
        assert_eq!(first, Vec2::new(7.0, 0.0));
        assert_eq!(caret.position().x, 10.0 - 6.0 - 2.0);

        let second = caret.place(bounds, 1.0, 2.0);
        assert_eq!(second.x, first.x - 8.0);
    }

    #[test]
    fn caret_vertical_offsets() {
        let bounds = GlyphBounds::from_size(6.0, 10.0);
        let origin = Vec2::new(0.0, 0.0);

        let mut top = Caret::new(origin, VerticalPivot::Top);
        assert_eq!(top.place(bounds, 2.0, 0.0).y, -10.0);

        let mut bottom = Caret::new(origin, VerticalPivot::Bottom);
        // Bottom keeps the historical shape: center.y + extents.y * scale.
        assert_eq!(bottom.place(bounds, 2.0, 0.0).y, 10.0);

        let mut center = Caret::new(origin, VerticalPivot::Center);
        assert_eq!(center.place(bounds, 2.0, 0.0).y, 0.0);
    }

    #[test]
    fn caret_honors_offset_glyph_center() {
        let bounds = GlyphBounds {
            center: Vec2::new(1.0, 0.0),
            extents: Vec2::new(3.0, 5.0),
        };
        let mut caret = Caret::new(Vec2::new(0.0, 0.0), VerticalPivot::Center);
        // Right edge at center.x + extents.x = 4.0.
        assert_eq!(caret.place(bounds, 1.0, 0.0).x, -4.0);
    }
}
