#![forbid(unsafe_code)]

//! End-to-end tests for the directional-container layout protocol:
//! nested containers, synchronous depth-first propagation, and the
//! no-partial-commit failure semantics.

use std::cell::RefCell;
use std::rc::Rc;

use strut_core::{Point, Size, SizeHint};
use strut_layout::{LayoutTree, Side};

fn flexible(pref: f64) -> SizeHint {
    SizeHint::new(pref, 0.0, SizeHint::UNBOUNDED)
}

#[test]
fn nested_containers_relayout_depth_first() {
    let mut tree = LayoutTree::new();

    // A column holding a header and a row; the row holds a sidebar and a
    // content pane.
    let root = tree.column(flexible(640.0), SizeHint::new(480.0, 100.0, SizeHint::UNBOUNDED));
    let header = tree.leaf(flexible(640.0), SizeHint::fixed(80.0));
    let split = tree.row(flexible(640.0), flexible(400.0));
    let sidebar = tree.leaf(SizeHint::new(160.0, 120.0, 160.0), flexible(400.0));
    let content = tree.leaf(flexible(480.0), flexible(400.0));

    tree.push(split, sidebar, Side::Begin).unwrap();
    tree.push(split, content, Side::Begin).unwrap();
    tree.push(root, header, Side::Begin).unwrap();
    tree.push(root, split, Side::Begin).unwrap();

    // Resizing the root reallocates the column, which resizes the row,
    // which reallocates its own children on the same call stack.
    tree.resize(root, Size::new(800.0, 600.0)).unwrap();

    assert_eq!(tree.size(header).height, 80.0);
    assert_eq!(tree.size(split).height, 520.0);
    assert_eq!(tree.position(split), Point::new(0.0, 80.0));

    // Inside the row: the sidebar is capped at 160, the content pane
    // soaks up the rest of the 800.
    assert_eq!(tree.size(sidebar).width, 160.0);
    assert_eq!(tree.size(content).width, 640.0);
    assert_eq!(tree.position(content), Point::new(160.0, 0.0));
}

#[test]
fn each_push_runs_a_full_layout_pass() {
    let mut tree = LayoutTree::new();
    let row = tree.row(300.0, 60.0);

    let first = tree.leaf(SizeHint::new(50.0, 0.0, 50.0), SizeHint::new(60.0, 0.0, 60.0));
    let notifications = Rc::new(RefCell::new(0u32));
    let counter = notifications.clone();
    tree.set_observer(first, move |_, _| *counter.borrow_mut() += 1);

    // Layout is synchronous and unbatched: every push re-lays-out the
    // whole container, resizing `first` twice per pass (length assignment
    // plus cross-axis broadcast).
    tree.push(row, first, Side::Begin).unwrap();
    assert_eq!(*notifications.borrow(), 2);

    let second = tree.leaf(SizeHint::new(50.0, 0.0, 50.0), SizeHint::new(60.0, 0.0, 60.0));
    tree.push(row, second, Side::Begin).unwrap();
    assert_eq!(*notifications.borrow(), 4);

    let third = tree.leaf(SizeHint::new(50.0, 0.0, 50.0), SizeHint::new(60.0, 0.0, 60.0));
    tree.push(row, third, Side::Begin).unwrap();
    assert_eq!(*notifications.borrow(), 6);
}

#[test]
fn begin_and_end_partition_a_toolbar() {
    let mut tree = LayoutTree::new();
    let bar = tree.row(400.0, 32.0);
    let menu = tree.leaf(SizeHint::fixed(120.0), SizeHint::new(32.0, 0.0, 32.0));
    let title = tree.leaf(SizeHint::fixed(100.0), SizeHint::new(32.0, 0.0, 32.0));
    let close = tree.leaf(SizeHint::fixed(40.0), SizeHint::new(32.0, 0.0, 32.0));
    let help = tree.leaf(SizeHint::fixed(40.0), SizeHint::new(32.0, 0.0, 32.0));

    tree.push(bar, menu, Side::Begin).unwrap();
    tree.push(bar, title, Side::Begin).unwrap();
    tree.push(bar, close, Side::End).unwrap();
    tree.push(bar, help, Side::End).unwrap();

    assert_eq!(tree.position(menu).x, 0.0);
    assert_eq!(tree.position(title).x, 120.0);
    // End items stack back-to-front from the far edge inward.
    assert_eq!(tree.position(close).x, 360.0);
    assert_eq!(tree.position(help).x, 320.0);
}

#[test]
fn shrinking_below_preferred_closes_gaps_proportionally() {
    let mut tree = LayoutTree::new();
    let column = tree.column(200.0, SizeHint::new(60.0, 20.0, 200.0));
    let a = tree.leaf(SizeHint::new(200.0, 0.0, 200.0), SizeHint::new(40.0, 10.0, 40.0));
    let b = tree.leaf(SizeHint::new(200.0, 0.0, 200.0), SizeHint::new(40.0, 10.0, 40.0));
    tree.push(column, a, Side::Begin).unwrap();
    tree.push(column, b, Side::Begin).unwrap();

    // 60 available, preferred sum is 80: both children fall back toward
    // their minimums, sharing the 40 of slack above the floor equally.
    tree.resize(column, Size::new(200.0, 60.0)).unwrap();
    assert_eq!(tree.size(a).height, 30.0);
    assert_eq!(tree.size(b).height, 30.0);
    assert_eq!(tree.position(b).y, 30.0);
}

#[test]
fn scroll_column_tracks_content_through_mutation() {
    let mut tree = LayoutTree::new();
    let feed = tree.scrolling_column(320.0, SizeHint::new(100.0, 0.0, 100.0));

    let mut entries = Vec::new();
    for _ in 0..5 {
        let entry = tree.leaf(SizeHint::new(320.0, 0.0, 320.0), SizeHint::fixed(48.0));
        tree.push(feed, entry, Side::Begin).unwrap();
        entries.push(entry);
    }

    // The feed grew to exactly its accumulated content.
    assert_eq!(tree.size(feed).height, 5.0 * 48.0);
    for (i, &entry) in entries.iter().enumerate() {
        assert_eq!(tree.position(entry).y, i as f64 * 48.0);
    }

    // Removal does not re-layout on its own; the next pass re-snaps.
    tree.remove(feed, entries[4]);
    assert_eq!(tree.size(feed).height, 5.0 * 48.0);
    tree.layout(feed);
    assert_eq!(tree.size(feed).height, 4.0 * 48.0);
}

#[test]
fn failed_pass_preserves_previous_layout_recursively() {
    let mut tree = LayoutTree::new();
    let root = tree.column(SizeHint::new(300.0, 0.0, 400.0), SizeHint::new(300.0, 50.0, 400.0));
    let inner = tree.row(SizeHint::new(300.0, 0.0, 300.0), SizeHint::new(100.0, 100.0, 100.0));
    let a = tree.leaf(SizeHint::new(150.0, 140.0, 150.0), SizeHint::new(100.0, 0.0, 100.0));
    let b = tree.leaf(SizeHint::new(150.0, 140.0, 150.0), SizeHint::new(100.0, 0.0, 100.0));

    tree.push(inner, a, Side::Begin).unwrap();
    tree.push(inner, b, Side::Begin).unwrap();
    tree.push(root, inner, Side::Begin).unwrap();
    let before = (tree.bounds(a), tree.bounds(b));

    // The column pass succeeds and hands the row a narrower width; the
    // row's own allocation is then infeasible and its children survive
    // untouched.
    tree.resize(root, Size::new(250.0, 300.0)).unwrap();
    assert_eq!(tree.size(inner).width, 250.0);
    assert_eq!((tree.bounds(a), tree.bounds(b)), before);
}
