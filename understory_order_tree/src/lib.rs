// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_order_tree --heading-base-level=0

//! Understory Order Tree: painter's-algorithm draw orders from 2D bounds.
//!
//! A renderer that paints primitives in arbitrary traversal order still needs
//! overlapping content to come out in the order it was submitted. Assigning a
//! global counter works, but it puts every primitive in its own slot and
//! defeats batching. [`OrderTree`] instead hands out the *smallest* order that
//! keeps every overlapping, earlier box underneath:
//!
//! - If a previously inserted box overlaps the new one, its order is strictly smaller.
//! - Boxes that overlap nothing may share an order, so a backend can draw them together.
//!
//! The tree is a binary bounds hierarchy living in a flat arena. Insertion
//! descends by the cheaper half-perimeter growth (the same heuristic family as
//! dynamic AABB trees in physics broad phases), searching the branch it does
//! not take for overlapping leaves while pruning by cached bounds and cached
//! maximum order. It is built for a one-frame lifetime: [`OrderTree::clear`]
//! truncates the arena and keeps its allocation for the next frame.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use understory_order_tree::{Aabb2D, OrderTree};
//!
//! let mut tree = OrderTree::<f64>::new();
//! let a = tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 100.0, 100.0));
//! let b = tree.insert(Aabb2D::<f64>::from_xywh(50.0, 50.0, 100.0, 100.0));
//! let c = tree.insert(Aabb2D::<f64>::from_xywh(200.0, 0.0, 50.0, 50.0));
//!
//! assert_eq!(a, 1);
//! assert_eq!(b, 2); // overlaps `a`
//! assert_eq!(c, 1); // overlaps nothing, free to batch with `a`
//!
//! // Next frame.
//! tree.clear();
//! assert_eq!(tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 1.0, 1.0)), 1);
//! ```
//!
//! ## Overlap semantics
//!
//! Two boxes overlap when their *interiors* intersect; sharing an edge is not
//! enough. Boxes with zero or negative extent (or NaN coordinates) are treated
//! as degenerate: they are not stored and receive `max_order() + 1`, which puts
//! them above everything issued so far in the frame.
//!
//! ### Float semantics
//!
//! Cost comparisons use widened accumulators (`f32`→`f64`, `f64`→`f64`,
//! `i64`→`i128`). NaN coordinates never panic; they fall under the degenerate rule.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod tree;
pub mod types;

pub use tree::OrderTree;
pub use types::{Aabb2D, DrawOrder, Scalar};
