#![forbid(unsafe_code)]

//! Host-facing display instances with dirty-flag coalescing.
//!
//! A display owns its configuration, its slot pool, and a dirty mask. Setters
//! only mark bits; nothing touches the host until [`recompute`] runs, the
//! single entry point the host calls once per update tick. However many
//! properties changed since the last tick, at most one layout pass results
//! (last value wins), which is what keeps rapid counters from flickering.
//!
//! A pass that fails its glyph-set preconditions is skipped outright: the
//! previous placements stay on screen and the dirty bits stay set, so the
//! display heals itself on the tick after the set is fixed.
//!
//! [`recompute`]: IntegerDigits::recompute

use crate::slot::{MaterialId, SlotHost, SlotId, SlotPool, VisualStyle};
use glyphnum_core::color::PackedRgba;
use glyphnum_core::geometry::Rect;
use glyphnum_core::glyph::{GlyphKind, GlyphSet};
use glyphnum_layout::{
    DigitCap, DigitLayout, FractionalLayout, HorizontalPivot, IntegerLayout, LayoutPass,
    PaddingMode, SkipReason, VerticalPivot,
};

bitflags::bitflags! {
    /// Which inputs changed since the last applied pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Dirty: u8 {
        /// The numeric value.
        const VALUE     = 1 << 0;
        /// The glyph set.
        const GLYPHS    = 1 << 1;
        /// Letter size or spacing.
        const METRICS   = 1 << 2;
        /// Horizontal or vertical pivot.
        const PIVOT     = 1 << 3;
        /// The bounding rectangle.
        const BOUNDS    = 1 << 4;
        /// Digit cap or padding mode.
        const CAP       = 1 << 5;
        /// Fractional place count.
        const PRECISION = 1 << 6;
        /// Color, material, or draw order (no relayout needed).
        const VISUAL    = 1 << 7;

        /// Every bit that forces a layout pass.
        const LAYOUT = Self::VALUE.bits()
            | Self::GLYPHS.bits()
            | Self::METRICS.bits()
            | Self::PIVOT.bits()
            | Self::BOUNDS.bits()
            | Self::CAP.bits()
            | Self::PRECISION.bits();
    }
}

/// What one `recompute` tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Nothing was dirty; the host was not touched.
    Clean,
    /// Slots were updated (layout pass and/or visual push).
    Applied,
    /// Preconditions failed; prior visuals stand and the dirt remains.
    Skipped(SkipReason),
}

/// Create a dedicated (non-pool) slot on first use, hidden and styled.
fn ensure_dedicated<H: SlotHost>(
    host: &mut H,
    slot: &mut Option<SlotId>,
    visual: &VisualStyle,
) -> SlotId {
    if let Some(id) = *slot {
        return id;
    }
    let id = host.create_slot();
    host.set_visible(id, false);
    host.set_visual(id, visual);
    *slot = Some(id);
    id
}

/// Push a computed pass out to the host.
///
/// Digit placements map onto pool positions in walk order; the minus and
/// point glyphs go to their dedicated slots. Pool slots past the digit count
/// are hidden, never destroyed.
fn apply_pass<H: SlotHost>(
    host: &mut H,
    pool: &mut SlotPool,
    minus: SlotId,
    point: Option<SlotId>,
    reservation: usize,
    visual: &VisualStyle,
    pass: &LayoutPass,
) {
    let digit_count = pass
        .placements
        .iter()
        .filter(|p| matches!(p.glyph, GlyphKind::Digit(_)))
        .count();
    pool.ensure_count(host, digit_count.max(reservation), visual);

    let mut digit_index = 0;
    let mut minus_used = false;
    let mut point_used = false;
    for placement in &pass.placements {
        let slot = match placement.glyph {
            GlyphKind::Digit(_) => {
                let Some(slot) = pool.get(digit_index) else {
                    continue;
                };
                digit_index += 1;
                slot
            }
            GlyphKind::Minus => {
                minus_used = true;
                minus
            }
            GlyphKind::DecimalPoint => match point {
                Some(slot) => {
                    point_used = true;
                    slot
                }
                None => continue,
            },
        };
        host.set_glyph(slot, placement.glyph);
        host.set_position(slot, placement.position);
        host.set_scale(slot, placement.scale);
        host.set_visible(slot, placement.visible);
    }

    pool.hide_from(host, digit_count);
    if !minus_used {
        host.set_visible(minus, false);
    }
    if let Some(point) = point
        && !point_used
    {
        host.set_visible(point, false);
    }
}

#[cfg(feature = "tracing")]
fn log_pass(pass: &LayoutPass) {
    for warning in &pass.warnings {
        tracing::warn!(%warning, "layout degraded");
    }
}

macro_rules! shared_setters {
    () => {
        /// Replace the glyph set.
        pub fn set_glyphs(&mut self, glyphs: GlyphSet) {
            if self.glyphs != glyphs {
                self.glyphs = glyphs;
                self.dirty |= Dirty::GLYPHS;
            }
        }

        /// Set the requested letter size (glyph height in layout units).
        pub fn set_letter_size(&mut self, size: f32) {
            if self.letter_size != size {
                self.letter_size = size;
                self.dirty |= Dirty::METRICS;
            }
        }

        /// Set inter-glyph spacing. Negative values overlap glyphs.
        pub fn set_spacing(&mut self, spacing: f32) {
            if self.spacing != spacing {
                self.spacing = spacing;
                self.dirty |= Dirty::METRICS;
            }
        }

        /// Set the anchor pivots.
        pub fn set_pivots(&mut self, horizontal: HorizontalPivot, vertical: VerticalPivot) {
            if self.h_pivot != horizontal || self.v_pivot != vertical {
                self.h_pivot = horizontal;
                self.v_pivot = vertical;
                self.dirty |= Dirty::PIVOT;
            }
        }

        /// Set the bounding rectangle (the owning container's rect).
        pub fn set_bounds(&mut self, bounds: Rect) {
            if self.bounds != bounds {
                self.bounds = bounds;
                self.dirty |= Dirty::BOUNDS;
            }
        }

        /// Set the tint color for all slots.
        pub fn set_color(&mut self, color: PackedRgba) {
            if self.visual.color != color {
                self.visual.color = color;
                self.dirty |= Dirty::VISUAL;
            }
        }

        /// Set the material override (`None` = host default).
        pub fn set_material(&mut self, material: Option<MaterialId>) {
            if self.visual.material != material {
                self.visual.material = material;
                self.dirty |= Dirty::VISUAL;
            }
        }

        /// Set the host draw order.
        pub fn set_sort(&mut self, layer: i32, order: i32) {
            if self.visual.sort_layer != layer || self.visual.sort_order != order {
                self.visual.sort_layer = layer;
                self.visual.sort_order = order;
                self.dirty |= Dirty::VISUAL;
            }
        }

        /// Number of pool slots currently allocated.
        #[must_use]
        pub fn slot_count(&self) -> usize {
            self.pool.len()
        }

        /// Force a full re-apply on the next tick (external refresh trigger,
        /// e.g. an editor undo/redo landing on this display).
        pub fn mark_all_dirty(&mut self) {
            self.dirty = Dirty::all();
        }
    };
}

/// Sprite display for a signed integer value.
#[derive(Debug, Clone)]
pub struct IntegerDigits {
    glyphs: GlyphSet,
    value: i64,
    cap: DigitCap,
    padding: PaddingMode,
    letter_size: f32,
    spacing: f32,
    h_pivot: HorizontalPivot,
    v_pivot: VerticalPivot,
    bounds: Rect,
    visual: VisualStyle,
    pool: SlotPool,
    minus_slot: Option<SlotId>,
    dirty: Dirty,
}

impl Default for IntegerDigits {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerDigits {
    /// Create a display with stock configuration and an empty glyph set
    /// (passes skip until a set is assigned).
    #[must_use]
    pub fn new() -> Self {
        Self {
            glyphs: GlyphSet::new(),
            value: 0,
            cap: DigitCap::default(),
            padding: PaddingMode::default(),
            letter_size: 50.0,
            spacing: 0.0,
            h_pivot: HorizontalPivot::default(),
            v_pivot: VerticalPivot::default(),
            bounds: Rect::centered(100.0, 50.0),
            visual: VisualStyle::default(),
            pool: SlotPool::new(),
            minus_slot: None,
            dirty: Dirty::all(),
        }
    }

    /// Create a display rendering from the given glyph set.
    #[must_use]
    pub fn with_glyphs(glyphs: GlyphSet) -> Self {
        let mut display = Self::new();
        display.glyphs = glyphs;
        display
    }

    /// The currently stored value (unaffected by display degradation).
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Set the value to display.
    pub fn set_value(&mut self, value: i64) {
        if self.value != value {
            self.value = value;
            self.dirty |= Dirty::VALUE;
        }
    }

    /// Set the digit cap.
    pub fn set_max_digits(&mut self, cap: DigitCap) {
        if self.cap != cap {
            self.cap = cap;
            self.dirty |= Dirty::CAP;
        }
    }

    /// Set the padding policy for capped slots.
    pub fn set_padding(&mut self, padding: PaddingMode) {
        if self.padding != padding {
            self.padding = padding;
            self.dirty |= Dirty::CAP;
        }
    }

    shared_setters!();

    fn engine(&self) -> IntegerLayout {
        IntegerLayout::new(self.value)
            .max_digits(self.cap)
            .padding(self.padding)
            .letter_size(self.letter_size)
            .spacing(self.spacing)
            .pivots(self.h_pivot, self.v_pivot)
            .bounds(self.bounds)
    }

    /// Run at most one layout pass covering every change since the last tick.
    pub fn recompute<H: SlotHost>(&mut self, host: &mut H) -> PassOutcome {
        if self.dirty.is_empty() {
            return PassOutcome::Clean;
        }
        if !self.dirty.intersects(Dirty::LAYOUT) {
            self.apply_visuals(host);
            self.dirty = Dirty::empty();
            return PassOutcome::Applied;
        }

        let engine = self.engine();
        match engine.layout(&self.glyphs) {
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%reason, "integer pass skipped");
                PassOutcome::Skipped(reason)
            }
            Ok(pass) => {
                #[cfg(feature = "tracing")]
                log_pass(&pass);
                let minus = ensure_dedicated(host, &mut self.minus_slot, &self.visual);
                apply_pass(
                    host,
                    &mut self.pool,
                    minus,
                    None,
                    engine.reserve_hint() as usize,
                    &self.visual,
                    &pass,
                );
                if self.dirty.intersects(Dirty::VISUAL) {
                    self.apply_visuals(host);
                }
                self.dirty = Dirty::empty();
                PassOutcome::Applied
            }
        }
    }

    /// Re-apply everything now, regardless of dirt.
    pub fn refresh<H: SlotHost>(&mut self, host: &mut H) -> PassOutcome {
        self.mark_all_dirty();
        self.recompute(host)
    }

    /// Hide every slot without destroying anything (disable lifecycle).
    pub fn hide_all<H: SlotHost>(&mut self, host: &mut H) {
        self.pool.hide_all(host);
        if let Some(slot) = self.minus_slot {
            host.set_visible(slot, false);
        }
    }

    /// Destroy every slot. Safe to call repeatedly and before any pass ran.
    pub fn teardown<H: SlotHost>(&mut self, host: &mut H) {
        self.pool.release_all(host);
        if let Some(slot) = self.minus_slot.take() {
            host.destroy_slot(slot);
        }
        self.dirty = Dirty::all();
    }

    fn apply_visuals<H: SlotHost>(&self, host: &mut H) {
        for slot in self.pool.iter() {
            host.set_visual(slot, &self.visual);
        }
        if let Some(slot) = self.minus_slot {
            host.set_visual(slot, &self.visual);
        }
    }
}

/// Sprite display for a signed decimal value with fixed fractional places.
#[derive(Debug, Clone)]
pub struct FractionalDigits {
    glyphs: GlyphSet,
    value: f64,
    decimal_places: u32,
    letter_size: f32,
    spacing: f32,
    h_pivot: HorizontalPivot,
    v_pivot: VerticalPivot,
    bounds: Rect,
    visual: VisualStyle,
    pool: SlotPool,
    minus_slot: Option<SlotId>,
    point_slot: Option<SlotId>,
    dirty: Dirty,
}

impl Default for FractionalDigits {
    fn default() -> Self {
        Self::new()
    }
}

impl FractionalDigits {
    /// Create a display with stock configuration and an empty glyph set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            glyphs: GlyphSet::new(),
            value: 0.0,
            decimal_places: 2,
            letter_size: 50.0,
            spacing: 0.0,
            h_pivot: HorizontalPivot::default(),
            v_pivot: VerticalPivot::default(),
            bounds: Rect::centered(100.0, 50.0),
            visual: VisualStyle::default(),
            pool: SlotPool::new(),
            minus_slot: None,
            point_slot: None,
            dirty: Dirty::all(),
        }
    }

    /// Create a display rendering from the given glyph set.
    #[must_use]
    pub fn with_glyphs(glyphs: GlyphSet) -> Self {
        let mut display = Self::new();
        display.glyphs = glyphs;
        display
    }

    /// The currently stored value (unaffected by display degradation).
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set the value to display.
    pub fn set_value(&mut self, value: f64) {
        if self.value.to_bits() != value.to_bits() {
            self.value = value;
            self.dirty |= Dirty::VALUE;
        }
    }

    /// Set the number of digits shown after the decimal point.
    pub fn set_decimal_places(&mut self, places: u32) {
        if self.decimal_places != places {
            self.decimal_places = places;
            self.dirty |= Dirty::PRECISION;
        }
    }

    shared_setters!();

    fn engine(&self) -> FractionalLayout {
        FractionalLayout::new(self.value)
            .decimal_places(self.decimal_places)
            .letter_size(self.letter_size)
            .spacing(self.spacing)
            .pivots(self.h_pivot, self.v_pivot)
            .bounds(self.bounds)
    }

    /// Run at most one layout pass covering every change since the last tick.
    pub fn recompute<H: SlotHost>(&mut self, host: &mut H) -> PassOutcome {
        if self.dirty.is_empty() {
            return PassOutcome::Clean;
        }
        if !self.dirty.intersects(Dirty::LAYOUT) {
            self.apply_visuals(host);
            self.dirty = Dirty::empty();
            return PassOutcome::Applied;
        }

        let engine = self.engine();
        match engine.layout(&self.glyphs) {
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%reason, "fractional pass skipped");
                PassOutcome::Skipped(reason)
            }
            Ok(pass) => {
                #[cfg(feature = "tracing")]
                log_pass(&pass);
                let minus = ensure_dedicated(host, &mut self.minus_slot, &self.visual);
                let point = ensure_dedicated(host, &mut self.point_slot, &self.visual);
                apply_pass(
                    host,
                    &mut self.pool,
                    minus,
                    Some(point),
                    engine.reserve_hint() as usize,
                    &self.visual,
                    &pass,
                );
                if self.dirty.intersects(Dirty::VISUAL) {
                    self.apply_visuals(host);
                }
                self.dirty = Dirty::empty();
                PassOutcome::Applied
            }
        }
    }

    /// Re-apply everything now, regardless of dirt.
    pub fn refresh<H: SlotHost>(&mut self, host: &mut H) -> PassOutcome {
        self.mark_all_dirty();
        self.recompute(host)
    }

    /// Hide every slot without destroying anything (disable lifecycle).
    pub fn hide_all<H: SlotHost>(&mut self, host: &mut H) {
        self.pool.hide_all(host);
        for slot in [self.minus_slot, self.point_slot].into_iter().flatten() {
            host.set_visible(slot, false);
        }
    }

    /// Destroy every slot. Safe to call repeatedly and before any pass ran.
    pub fn teardown<H: SlotHost>(&mut self, host: &mut H) {
        self.pool.release_all(host);
        for slot in [self.minus_slot.take(), self.point_slot.take()]
            .into_iter()
            .flatten()
        {
            host.destroy_slot(slot);
        }
        self.dirty = Dirty::all();
    }

    fn apply_visuals<H: SlotHost>(&self, host: &mut H) {
        for slot in self.pool.iter() {
            host.set_visual(slot, &self.visual);
        }
        for slot in [self.minus_slot, self.point_slot].into_iter().flatten() {
            host.set_visual(slot, &self.visual);
        }
    }
}
