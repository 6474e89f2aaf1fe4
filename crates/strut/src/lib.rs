#![forbid(unsafe_code)]

//! strut public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the geometry and layout types from the internal crates and
//! offers a lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use strut_core::{Axis, HintError, Point, Rect, Size, SizeHint};

// --- Layout re-exports -----------------------------------------------------

pub use strut_layout::{AllocError, LayoutError, LayoutTree, NodeId, ResizeObserver, Side, allocate};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{Axis, LayoutError, LayoutTree, NodeId, Point, Rect, Side, Size, SizeHint};

    pub use crate::{core, layout};
}

pub use strut_core as core;
pub use strut_layout as layout;
