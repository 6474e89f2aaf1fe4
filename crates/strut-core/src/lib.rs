#![forbid(unsafe_code)]

//! Geometric primitives and size hints for the strut layout toolkit.
//!
//! This crate holds the types shared by every layer of the toolkit:
//!
//! - [`Size`], [`Point`], [`Rect`] - plain geometry over `f64` logical pixels
//! - [`Axis`] - the projection strategy that turns "width or height" into
//!   "along-axis length and cross-axis breadth"
//! - [`SizeHint`] - a `(min, preferred, max)` triple bounding one axis of a
//!   rectangle, with validation and clamping
//!
//! Lengths are `f64` throughout; fractional values are expected and never
//! rounded here. An unbounded maximum is represented by `f64::INFINITY`.

pub mod geometry;
pub mod hint;

pub use geometry::{Axis, Point, Rect, Size};
pub use hint::{HintError, SizeHint};
