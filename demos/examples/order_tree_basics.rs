// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order tree basics.
//!
//! Insert a few boxes, print their draw orders, and reuse the tree for a second frame.
//!
//! Run:
//! - `cargo run -p understory_demos --example order_tree_basics`

use understory_order_tree::{Aabb2D, OrderTree};

fn main() {
    let mut tree = OrderTree::<f64>::new();

    // Background card, a label on it, and an unrelated icon off to the side.
    let card = tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 300.0, 200.0));
    let label = tree.insert(Aabb2D::<f64>::from_xywh(16.0, 16.0, 120.0, 20.0));
    let icon = tree.insert(Aabb2D::<f64>::from_xywh(400.0, 0.0, 24.0, 24.0));
    // A badge overlapping the label.
    let badge = tree.insert(Aabb2D::<f64>::from_xywh(120.0, 10.0, 16.0, 16.0));

    println!("card={card} label={label} icon={icon} badge={badge}");
    assert!(card < label && label < badge);
    assert_eq!(icon, 1, "disjoint content shares the lowest order");
    println!("{tree:?}");

    // Next frame: same allocation, fresh orders.
    tree.clear();
    let first = tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 10.0, 10.0));
    assert_eq!(first, 1);

    // Edge-touching boxes do not overlap.
    let right = tree.insert(Aabb2D::<f64>::from_xywh(10.0, 0.0, 10.0, 10.0));
    assert_eq!(right, 1);
    println!("after clear: first={first} right={right}");
}
