#![forbid(unsafe_code)]

//! Render-slot handles, the host boundary, and the slot pool.
//!
//! The host scene graph owns the actual visual objects; this module only
//! tracks handles. The [`SlotPool`] is deliberately monotone: it grows to the
//! largest count a display has ever needed and never shrinks during normal
//! operation. Slots past the visible count are hidden, not destroyed. The
//! one destruction point is [`SlotPool::release_all`], at display teardown.

use glyphnum_core::color::PackedRgba;
use glyphnum_core::geometry::Vec2;
use glyphnum_core::glyph::GlyphKind;

/// Opaque handle to one host render slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub u32);

/// Opaque handle to a host material. `None` in [`VisualStyle`] means the
/// host's default sprite material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Shared visual state forwarded wholesale to every live slot.
///
/// None of this participates in layout; it exists so a display can push
/// color/material/draw-order changes without recomputing placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    /// Tint color applied to each sprite.
    pub color: PackedRgba,
    /// Material override; `None` selects the host default.
    pub material: Option<MaterialId>,
    /// Host draw-order layer.
    pub sort_layer: i32,
    /// Order within the layer.
    pub sort_order: i32,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            color: PackedRgba::WHITE,
            material: None,
            sort_layer: 0,
            sort_order: 0,
        }
    }
}

/// The engine-to-host contract for render slots.
///
/// Slots returned from `create_slot` must be independently positionable,
/// scalable, visibility-toggleable, and assignable a glyph image. Allocation
/// failure is the host's problem; from this side slot creation is
/// infallible.
pub trait SlotHost {
    /// Allocate one render slot.
    fn create_slot(&mut self) -> SlotId;
    /// Destroy a slot. Only called from teardown paths.
    fn destroy_slot(&mut self, slot: SlotId);
    /// Show or hide a slot.
    fn set_visible(&mut self, slot: SlotId, visible: bool);
    /// Assign which glyph image the slot displays.
    fn set_glyph(&mut self, slot: SlotId, glyph: GlyphKind);
    /// Move the slot in the display's local space.
    fn set_position(&mut self, slot: SlotId, position: Vec2);
    /// Apply a uniform sprite scale.
    fn set_scale(&mut self, slot: SlotId, scale: f32);
    /// Forward shared color/material/draw-order state.
    fn set_visual(&mut self, slot: SlotId, visual: &VisualStyle);
}

/// A lazily-growing, never-shrinking arena of numeral slots.
#[derive(Debug, Clone, Default)]
pub struct SlotPool {
    slots: Vec<SlotId>,
}

impl SlotPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots ever allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True before the first allocation (and after `release_all`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot at pool position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SlotId> {
        self.slots.get(index).copied()
    }

    /// Iterate all live slots.
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().copied()
    }

    /// Grow the pool to at least `count` slots.
    ///
    /// Idempotent: requests at or below the current count do nothing. New
    /// slots are created hidden, with the current visual state applied.
    pub fn ensure_count<H: SlotHost>(&mut self, host: &mut H, count: usize, visual: &VisualStyle) {
        while self.slots.len() < count {
            let slot = host.create_slot();
            host.set_visible(slot, false);
            host.set_visual(slot, visual);
            self.slots.push(slot);
        }
    }

    /// Hide every slot at pool position `from` and beyond.
    pub fn hide_from<H: SlotHost>(&self, host: &mut H, from: usize) {
        for &slot in self.slots.iter().skip(from) {
            host.set_visible(slot, false);
        }
    }

    /// Hide every slot.
    pub fn hide_all<H: SlotHost>(&self, host: &mut H) {
        self.hide_from(host, 0);
    }

    /// Destroy every slot. Safe to call repeatedly; each slot is destroyed
    /// exactly once.
    pub fn release_all<H: SlotHost>(&mut self, host: &mut H) {
        for slot in self.slots.drain(..) {
            host.destroy_slot(slot);
        }
    }
}
