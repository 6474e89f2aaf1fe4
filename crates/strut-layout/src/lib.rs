#![forbid(unsafe_code)]

//! Constraint-based space allocation and directional containers.
//!
//! This crate provides the layout engine of the strut toolkit:
//!
//! - [`allocate`] - distribute an available length among size hints under
//!   min/preferred/max constraints
//! - [`LayoutTree`] - the retained tree of rectangles and directional
//!   containers, with the layout protocol that re-runs allocation on every
//!   resize
//! - [`Side`] - begin/end anchoring within a container's axis
//!
//! # Example
//!
//! ```
//! use strut_core::SizeHint;
//! use strut_layout::{LayoutTree, Side};
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.column(800.0, SizeHint::new(600.0, 100.0, 900.0));
//!
//! // A fixed header at the top, a status bar pinned to the bottom, and a
//! // body that soaks up whatever is left.
//! let header = tree.leaf(SizeHint::new(800.0, 0.0, 800.0), SizeHint::fixed(48.0));
//! let body = tree.leaf(SizeHint::new(800.0, 0.0, 800.0), SizeHint::at_least(0.0, 400.0));
//! let status = tree.leaf(SizeHint::new(800.0, 0.0, 800.0), SizeHint::fixed(24.0));
//! tree.push(root, header, Side::Begin)?;
//! tree.push(root, body, Side::Begin)?;
//! tree.push(root, status, Side::End)?;
//!
//! assert_eq!(tree.size(body).height, 600.0 - 48.0 - 24.0);
//! assert_eq!(tree.position(status).y, 600.0 - 24.0);
//! # Ok::<(), strut_layout::LayoutError>(())
//! ```

pub mod alloc;
pub mod tree;

pub use alloc::{AllocError, allocate};
pub use tree::{LayoutError, LayoutTree, NodeId, ResizeObserver, Side};
