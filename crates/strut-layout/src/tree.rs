#![forbid(unsafe_code)]

//! The retained layout tree: rectangles, directional containers, and the
//! layout protocol that drives the allocator on every resize.
//!
//! Nodes live in an id-addressed arena owned by [`LayoutTree`]; a
//! [`NodeId`] is a cheap copyable handle. Parent/child relationships are
//! explicit: containers hold ordered child lists, children hold a
//! non-owning parent id used only for lookups such as
//! [`center_in_parent`](LayoutTree::center_in_parent).
//!
//! Everything is synchronous and runs on the caller's stack. A resize of a
//! container immediately allocates its children's lengths, positions them,
//! broadcasts the cross-axis size, and recurses into child containers
//! depth-first. There is no deferred or batched layout: pushing `k`
//! children one at a time runs `k` full passes. Mutating a container's
//! child lists from inside its own layout pass (for example from a resize
//! observer) is unsupported; the borrow rules make it impossible to reach
//! the tree from an observer that does not own it, and observers that do
//! own it must not re-enter a running pass.

use std::fmt;

use tracing::{trace, warn};

use strut_core::{Axis, Point, Rect, Size, SizeHint};

use crate::alloc::allocate;

/// Handle to a node in a [`LayoutTree`].
///
/// Ids are only meaningful for the tree that issued them; indexing a tree
/// with a foreign id panics or addresses an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which edge of a container's axis a child is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Anchored to the start edge; laid out front-to-back from offset 0.
    #[default]
    Begin,
    /// Anchored to the far edge; laid out back-to-front from the far edge.
    End,
}

/// Synchronous resize observer, invoked after a node's size is committed.
pub type ResizeObserver = Box<dyn FnMut(NodeId, Size)>;

/// Recoverable layout tree failures.
///
/// Every variant leaves the tree in its prior valid state; none is fatal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// A container operation was applied to a leaf node.
    NotAContainer {
        /// The node that is not a container.
        node: NodeId,
    },
    /// Adding a child would exceed (pre-check) or did exceed (post-check)
    /// the container's capacity. The add was refused or rolled back.
    CapacityRejected {
        /// The container that refused the child.
        container: NodeId,
        /// The child that was refused.
        child: NodeId,
        /// The along-axis length the add would require.
        required: f64,
        /// The container's maximum along-axis length.
        capacity: f64,
    },
    /// A requested size is below the node's minimum hint on some axis.
    /// The node's size is unchanged.
    InvalidResize {
        /// The node that refused the resize.
        node: NodeId,
        /// The size that was requested.
        requested: Size,
        /// The node's minimum size on both axes.
        min: Size,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAContainer { node } => {
                write!(f, "node {node} is not a directional container")
            }
            Self::CapacityRejected {
                container,
                child,
                required,
                capacity,
            } => write!(
                f,
                "container {container} rejected node {child}: needs {required} of {capacity} available"
            ),
            Self::InvalidResize {
                node,
                requested,
                min,
            } => write!(
                f,
                "cannot resize node {node} to [{}, {}]: below minimum [{}, {}]",
                requested.width, requested.height, min.width, min.height
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

struct Container {
    axis: Axis,
    begin: Vec<NodeId>,
    end: Vec<NodeId>,
    scroll: bool,
}

enum NodeKind {
    Leaf,
    Container(Container),
}

struct Node {
    width_hint: SizeHint,
    height_hint: SizeHint,
    size: Size,
    position: Point,
    parent: Option<NodeId>,
    kind: NodeKind,
    observer: Option<ResizeObserver>,
}

impl Node {
    fn hint(&self, axis: Axis) -> SizeHint {
        match axis {
            Axis::Horizontal => self.width_hint,
            Axis::Vertical => self.height_hint,
        }
    }
}

/// An arena of layout nodes plus the directional-container protocol.
#[derive(Default)]
pub struct LayoutTree {
    nodes: Vec<Node>,
}

impl LayoutTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created in this tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- Node construction -------------------------------------------------

    /// Create a leaf rectangle from a hint per axis.
    ///
    /// The concrete size starts at each hint's preferred length. Bare
    /// numbers coerce to rigid hints.
    pub fn leaf(&mut self, width: impl Into<SizeHint>, height: impl Into<SizeHint>) -> NodeId {
        self.insert(width.into(), height.into(), NodeKind::Leaf)
    }

    /// Create a directional container.
    ///
    /// When `scroll` is set the along-axis hint's `max` is forced to
    /// [`SizeHint::UNBOUNDED`] and the container auto-grows along the axis
    /// to the used length of its children.
    pub fn container(
        &mut self,
        axis: Axis,
        width: impl Into<SizeHint>,
        height: impl Into<SizeHint>,
        scroll: bool,
    ) -> NodeId {
        let mut width = width.into();
        let mut height = height.into();
        if scroll {
            match axis {
                Axis::Horizontal => width.max = SizeHint::UNBOUNDED,
                Axis::Vertical => height.max = SizeHint::UNBOUNDED,
            }
        }
        let kind = NodeKind::Container(Container {
            axis,
            begin: Vec::new(),
            end: Vec::new(),
            scroll,
        });
        self.insert(width, height, kind)
    }

    /// Create a row: children are laid out left to right.
    pub fn row(&mut self, width: impl Into<SizeHint>, height: impl Into<SizeHint>) -> NodeId {
        self.container(Axis::Horizontal, width, height, false)
    }

    /// Create a column: children are laid out top to bottom.
    pub fn column(&mut self, width: impl Into<SizeHint>, height: impl Into<SizeHint>) -> NodeId {
        self.container(Axis::Vertical, width, height, false)
    }

    /// Create a row that grows without bound to fit its children.
    pub fn scrolling_row(
        &mut self,
        width: impl Into<SizeHint>,
        height: impl Into<SizeHint>,
    ) -> NodeId {
        self.container(Axis::Horizontal, width, height, true)
    }

    /// Create a column that grows without bound to fit its children.
    pub fn scrolling_column(
        &mut self,
        width: impl Into<SizeHint>,
        height: impl Into<SizeHint>,
    ) -> NodeId {
        self.container(Axis::Vertical, width, height, true)
    }

    fn insert(&mut self, width_hint: SizeHint, height_hint: SizeHint, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            width_hint,
            height_hint,
            size: Size::new(width_hint.pref, height_hint.pref),
            position: Point::ZERO,
            parent: None,
            kind,
            observer: None,
        });
        id
    }

    // --- Accessors ---------------------------------------------------------

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Current concrete size of a node.
    #[must_use]
    pub fn size(&self, id: NodeId) -> Size {
        self.node(id).size
    }

    /// Current offset of a node within its parent.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point {
        self.node(id).position
    }

    /// Position and size of a node as one rectangle.
    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Rect {
        let node = self.node(id);
        Rect::new(
            node.position.x,
            node.position.y,
            node.size.width,
            node.size.height,
        )
    }

    /// The node's width hint.
    #[must_use]
    pub fn width_hint(&self, id: NodeId) -> SizeHint {
        self.node(id).width_hint
    }

    /// The node's height hint.
    #[must_use]
    pub fn height_hint(&self, id: NodeId) -> SizeHint {
        self.node(id).height_hint
    }

    /// The container a node is currently attached to, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The layout axis of a container, or `None` for leaves.
    #[must_use]
    pub fn axis(&self, id: NodeId) -> Option<Axis> {
        match &self.node(id).kind {
            NodeKind::Container(c) => Some(c.axis),
            NodeKind::Leaf => None,
        }
    }

    /// Check whether a node is a directional container.
    #[must_use]
    pub fn is_container(&self, id: NodeId) -> bool {
        self.axis(id).is_some()
    }

    /// Check whether a container auto-grows along its axis.
    ///
    /// Always false for leaves.
    #[must_use]
    pub fn is_scroll_enabled(&self, id: NodeId) -> bool {
        match &self.node(id).kind {
            NodeKind::Container(c) => c.scroll,
            NodeKind::Leaf => false,
        }
    }

    // --- Rect operations ---------------------------------------------------

    /// Rebind both hints and reset the concrete size to each hint's
    /// preferred length.
    ///
    /// This is initialization, not a resize: no notification fires and no
    /// layout pass runs.
    pub fn set_size_hint(&mut self, id: NodeId, width: SizeHint, height: SizeHint) {
        let node = self.node_mut(id);
        node.width_hint = width;
        node.height_hint = height;
        node.size = Size::new(width.pref, height.pref);
    }

    /// Overwrite the concrete size unconditionally.
    ///
    /// No bounds validation and no notification; this is the primitive
    /// [`resize`](Self::resize) builds on.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        self.node_mut(id).size = size;
    }

    /// Move a node to an absolute offset within its parent.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.node_mut(id).position = position;
    }

    /// Resize a node, validating against its minimum hints.
    ///
    /// On success the size is committed and the resize notification fires
    /// synchronously: containers run a layout pass over their children
    /// first, then the node's observer (if any) is invoked. On failure the
    /// size is unchanged and the error describes the violated minimum.
    pub fn resize(&mut self, id: NodeId, size: Size) -> Result<(), LayoutError> {
        let node = self.node(id);
        let min = Size::new(node.width_hint.min, node.height_hint.min);
        if size.width < min.width || size.height < min.height {
            let err = LayoutError::InvalidResize {
                node: id,
                requested: size,
                min,
            };
            warn!(node = %id, "{err}");
            return Err(err);
        }
        self.set_size(id, size);
        self.notify_resized(id);
        Ok(())
    }

    /// Register the node's resize observer, replacing any previous one.
    pub fn set_observer(&mut self, id: NodeId, observer: impl FnMut(NodeId, Size) + 'static) {
        self.node_mut(id).observer = Some(Box::new(observer));
    }

    /// Remove the node's resize observer.
    pub fn clear_observer(&mut self, id: NodeId) {
        self.node_mut(id).observer = None;
    }

    /// Center a node within its parent, returning the new position.
    ///
    /// Returns `None` (and moves nothing) when the node has no parent.
    pub fn center_in_parent(&mut self, id: NodeId) -> Option<Point> {
        let parent = self.node(id).parent?;
        let outer = self.size(parent);
        let inner = self.size(id);
        let position = Point::new(
            (outer.width - inner.width) / 2.0,
            (outer.height - inner.height) / 2.0,
        );
        self.set_position(id, position);
        Some(position)
    }

    fn notify_resized(&mut self, id: NodeId) {
        self.layout(id);

        // Take the observer out for the call so the tree stays borrowable;
        // keep a replacement installed mid-call if one was set.
        if let Some(mut observer) = self.node_mut(id).observer.take() {
            let size = self.size(id);
            observer(id, size);
            let slot = &mut self.node_mut(id).observer;
            if slot.is_none() {
                *slot = Some(observer);
            }
        }
    }

    // --- Container queries -------------------------------------------------

    /// All children in layout order: begin items followed by end items.
    ///
    /// Empty for leaves.
    #[must_use]
    pub fn items(&self, id: NodeId) -> Vec<NodeId> {
        match &self.node(id).kind {
            NodeKind::Container(c) => c.begin.iter().chain(c.end.iter()).copied().collect(),
            NodeKind::Leaf => Vec::new(),
        }
    }

    /// The container's capacity along its axis.
    ///
    /// For scroll-enabled containers this is the along-axis hint's `max`
    /// (effectively unbounded); otherwise the current along-axis size.
    /// Zero for leaves.
    #[must_use]
    pub fn max_length(&self, id: NodeId) -> f64 {
        match &self.node(id).kind {
            NodeKind::Container(c) => {
                let node = self.node(id);
                if c.scroll {
                    node.hint(c.axis).max
                } else {
                    c.axis.main_of(node.size)
                }
            }
            NodeKind::Leaf => 0.0,
        }
    }

    /// Sum of the children's current along-axis lengths. Zero for leaves.
    #[must_use]
    pub fn used_length(&self, id: NodeId) -> f64 {
        let Some(axis) = self.axis(id) else { return 0.0 };
        self.items(id)
            .iter()
            .map(|&child| axis.main_of(self.size(child)))
            .sum()
    }

    /// Capacity not yet taken by children.
    #[must_use]
    pub fn free_length(&self, id: NodeId) -> f64 {
        self.max_length(id) - self.used_length(id)
    }

    /// Check whether any along-axis capacity is left.
    #[must_use]
    pub fn has_space(&self, id: NodeId) -> bool {
        self.free_length(id) > 0.0
    }

    /// The container's content minimum along its axis: the used length.
    #[must_use]
    pub fn content_min_along(&self, id: NodeId) -> f64 {
        self.used_length(id)
    }

    /// The container's content minimum across its axis: the largest
    /// cross-axis minimum hint among its children. Zero for leaves and
    /// empty containers.
    #[must_use]
    pub fn content_min_cross(&self, id: NodeId) -> f64 {
        let Some(axis) = self.axis(id) else { return 0.0 };
        self.items(id)
            .iter()
            .map(|&child| self.node(child).hint(axis.cross()).min)
            .fold(0.0, f64::max)
    }

    /// Pre-check whether a candidate child could fit.
    ///
    /// Sums the along-axis *minimum* lengths of all current children plus
    /// the candidate's, and requires the sum to stay strictly below the
    /// container's capacity. False for leaves.
    #[must_use]
    pub fn space_available_for(&self, id: NodeId, child: NodeId) -> bool {
        let Some(axis) = self.axis(id) else {
            return false;
        };
        let required = self.min_used_length(id) + self.node(child).hint(axis).min;
        required < self.max_length(id)
    }

    fn min_used_length(&self, id: NodeId) -> f64 {
        let Some(axis) = self.axis(id) else { return 0.0 };
        self.items(id)
            .iter()
            .map(|&child| self.node(child).hint(axis).min)
            .sum()
    }

    // --- Container mutation ------------------------------------------------

    /// Add a child to the given side, rolling back on overflow.
    ///
    /// Delegates to [`push_begin`](Self::push_begin) /
    /// [`push_end`](Self::push_end), then post-checks actual usage: if the
    /// children's allocated lengths now exceed the capacity, the child is
    /// removed again and the add reports [`LayoutError::CapacityRejected`].
    /// Accept-or-reject is atomic; previously laid out children keep their
    /// prior valid positions on rejection.
    pub fn push(&mut self, id: NodeId, child: NodeId, side: Side) -> Result<(), LayoutError> {
        match side {
            Side::Begin => self.push_begin(id, child)?,
            Side::End => self.push_end(id, child)?,
        }

        let used = self.used_length(id);
        let capacity = self.max_length(id);
        if used > capacity {
            self.remove(id, child);
            let err = LayoutError::CapacityRejected {
                container: id,
                child,
                required: used,
                capacity,
            };
            warn!(container = %id, "{err}");
            return Err(err);
        }
        Ok(())
    }

    /// Append a child at the start edge and run a layout pass.
    ///
    /// Refused without mutating anything when the
    /// [`space_available_for`](Self::space_available_for) pre-check fails.
    pub fn push_begin(&mut self, id: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.push_side(id, child, Side::Begin)
    }

    /// Append a child at the far edge and run a layout pass.
    ///
    /// End items are laid out back-to-front from the far edge inward.
    pub fn push_end(&mut self, id: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.push_side(id, child, Side::End)
    }

    fn push_side(&mut self, id: NodeId, child: NodeId, side: Side) -> Result<(), LayoutError> {
        let axis = self
            .axis(id)
            .ok_or(LayoutError::NotAContainer { node: id })?;

        if !self.space_available_for(id, child) {
            let required = self.min_used_length(id) + self.node(child).hint(axis).min;
            let err = LayoutError::CapacityRejected {
                container: id,
                child,
                required,
                capacity: self.max_length(id),
            };
            warn!(container = %id, "{err}");
            return Err(err);
        }

        match &mut self.node_mut(id).kind {
            NodeKind::Container(c) => match side {
                Side::Begin => c.begin.push(child),
                Side::End => c.end.push(child),
            },
            NodeKind::Leaf => unreachable!("axis() verified the container"),
        }
        self.node_mut(child).parent = Some(id);
        self.layout(id);
        Ok(())
    }

    /// Remove a child from whichever list holds it and detach it.
    ///
    /// No-op (returning false) when the child is not in this container.
    /// Does not trigger a layout pass.
    pub fn remove(&mut self, id: NodeId, child: NodeId) -> bool {
        let found = match &mut self.node_mut(id).kind {
            NodeKind::Container(c) => {
                let before = c.begin.len() + c.end.len();
                c.begin.retain(|&n| n != child);
                c.end.retain(|&n| n != child);
                before != c.begin.len() + c.end.len()
            }
            NodeKind::Leaf => false,
        };
        if found {
            self.node_mut(child).parent = None;
        }
        found
    }

    // --- Layout pass -------------------------------------------------------

    /// Run a layout pass over a container's children. No-op for leaves.
    ///
    /// Allocates each child's along-axis length from its hints and the
    /// container's capacity, assigns positions (begin items forward from
    /// 0, end items backward from the capacity), then broadcasts the
    /// cross-axis size clamped through each child's own cross-axis hint.
    /// If allocation is infeasible no child is touched and a diagnostic is
    /// logged; the pass never partially commits.
    pub fn layout(&mut self, id: NodeId) {
        let (axis, begin, end, scroll) = match &self.node(id).kind {
            NodeKind::Container(c) => (c.axis, c.begin.clone(), c.end.clone(), c.scroll),
            NodeKind::Leaf => return,
        };

        let hints: Vec<SizeHint> = begin
            .iter()
            .chain(end.iter())
            .map(|&child| self.node(child).hint(axis))
            .collect();
        let capacity = self.max_length(id);

        trace!(container = %id, %axis, capacity, children = hints.len(), "layout pass");

        let alloc = match allocate(&hints, capacity) {
            Ok(alloc) => alloc,
            Err(err) => {
                warn!(container = %id, "layout pass skipped: {err}");
                return;
            }
        };

        let mut pos = 0.0;
        for (i, &child) in begin.iter().enumerate() {
            self.set_item_length(child, axis, alloc[i]);
            self.set_position(child, axis.offset(pos));
            pos += axis.main_of(self.size(child));
        }

        let mut pos = capacity;
        for (i, &child) in end.iter().enumerate() {
            self.set_item_length(child, axis, alloc[begin.len() + i]);
            pos -= axis.main_of(self.size(child));
            self.set_position(child, axis.offset(pos));
        }

        // Cross-axis broadcast: children never see a breadth outside their
        // own bounds, even when the container is larger or smaller.
        let cross = axis.cross_of(self.size(id));
        for &child in begin.iter().chain(end.iter()) {
            let clamped = self.node(child).hint(axis.cross()).clamp(cross);
            let size = axis.with_cross(self.size(child), clamped);
            let _ = self.resize(child, size);
        }

        // Auto-growth: a scroll-enabled container snaps to its used length
        // so an outer viewport can show the overflow.
        if scroll {
            let used = self.used_length(id);
            let along_min = self.node(id).hint(axis).min;
            if used >= along_min && axis.main_of(self.size(id)) != used {
                let size = axis.with_main(self.size(id), used);
                let _ = self.resize(id, size);
            }
        }
    }

    fn set_item_length(&mut self, child: NodeId, axis: Axis, length: f64) {
        let size = axis.with_main(self.size(child), length);
        let _ = self.resize(child, size);
    }
}
