#![forbid(unsafe_code)]

//! Display instances: the host boundary, slot pooling, and per-tick
//! recomputation for sprite-digit displays.
//!
//! The host implements [`SlotHost`] over its scene graph, owns an
//! [`IntegerDigits`] or [`FractionalDigits`] instance per on-screen counter,
//! forwards property changes through the setters, and calls
//! `recompute(&mut host)` once per update tick. Layout math itself lives in
//! `glyphnum-layout`; this crate turns passes into slot mutations.

pub mod display;
pub mod slot;

pub use display::{Dirty, FractionalDigits, IntegerDigits, PassOutcome};
pub use slot::{MaterialId, SlotHost, SlotId, SlotPool, VisualStyle};
