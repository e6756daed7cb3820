// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The order tree: a binary bounds hierarchy stored in a flat arena.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::{Aabb2D, DrawOrder, Scalar, half_perimeter};

/// Assigns draw orders to boxes so that overlapping boxes paint in insertion order.
///
/// Every call to [`insert`](Self::insert) returns an order strictly greater than
/// the order of any previously inserted box whose interior intersects the new
/// one. Boxes that overlap nothing are free to share low orders, which keeps
/// unrelated content batchable.
///
/// The tree is meant to be rebuilt every frame: [`clear`](Self::clear) truncates
/// the node arena but keeps its allocation.
pub struct OrderTree<T: Scalar> {
    root: Option<NodeIdx>,
    nodes: Vec<Node<T>>,
    // Scratch stacks reused across inserts.
    path: Vec<NodeIdx>,
    search: Vec<NodeIdx>,
    leaves: usize,
    max_order: DrawOrder,
}

#[derive(Copy, Clone, Debug)]
enum Node<T> {
    Leaf {
        bounds: Aabb2D<T>,
        order: DrawOrder,
    },
    Internal {
        left: NodeIdx,
        right: NodeIdx,
        bounds: Aabb2D<T>,
        max_order: DrawOrder,
    },
}

impl<T: Copy> Node<T> {
    fn bounds(&self) -> Aabb2D<T> {
        match *self {
            Self::Leaf { bounds, .. } | Self::Internal { bounds, .. } => bounds,
        }
    }

    fn max_order(&self) -> DrawOrder {
        match *self {
            Self::Leaf { order, .. } => order,
            Self::Internal { max_order, .. } => max_order,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl<T: Scalar> Default for OrderTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> OrderTree<T> {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            root: None,
            nodes: Vec::new(),
            path: Vec::new(),
            search: Vec::new(),
            leaves: 0,
            max_order: 0,
        }
    }

    /// Create an empty tree with room for `n` inserts before reallocating.
    pub fn with_capacity(n: usize) -> Self {
        let mut tree = Self::new();
        // Each insert past the first adds one leaf and one internal node.
        tree.nodes.reserve(n.saturating_mul(2));
        tree
    }

    /// Insert `bounds` and return its draw order.
    ///
    /// The returned order is one more than the highest order among previously
    /// inserted boxes whose interior intersects `bounds`, or `1` if there is none.
    ///
    /// Degenerate bounds (zero or negative extent, or NaN coordinates) are not
    /// stored. They receive [`max_order`](Self::max_order)` + 1`, so a degenerate
    /// primitive never lands underneath content issued before it.
    pub fn insert(&mut self, bounds: Aabb2D<T>) -> DrawOrder {
        if bounds.is_degenerate() {
            self.max_order = self.max_order.saturating_add(1);
            return self.max_order;
        }

        let Some(root) = self.root else {
            let order = 1;
            self.root = Some(self.push(Node::Leaf { bounds, order }));
            self.leaves = 1;
            self.max_order = self.max_order.max(order);
            return order;
        };

        self.path.clear();
        let mut max_intersecting: DrawOrder = 0;
        let mut idx = root;
        while let Node::Internal {
            left,
            right,
            bounds: node_bounds,
            max_order,
        } = self.nodes[idx.get()]
        {
            // Grow first so the cached union stays valid for later queries.
            self.nodes[idx.get()] = Node::Internal {
                left,
                right,
                bounds: node_bounds.union(&bounds),
                max_order,
            };
            self.path.push(idx);

            let cost_l = half_perimeter(&self.nodes[left.get()].bounds().union(&bounds));
            let cost_r = half_perimeter(&self.nodes[right.get()].bounds().union(&bounds));
            let (next, other) = if cost_l <= cost_r {
                (left, right)
            } else {
                (right, left)
            };
            max_intersecting = self.max_intersecting_order(other, &bounds, max_intersecting);
            idx = next;
        }

        let sibling = idx;
        let sibling_node = self.nodes[sibling.get()];
        if sibling_node.bounds().overlaps(&bounds) {
            max_intersecting = max_intersecting.max(sibling_node.max_order());
        }
        let order = max_intersecting.saturating_add(1);

        let leaf = self.push(Node::Leaf { bounds, order });
        let parent = self.push(Node::Internal {
            left: sibling,
            right: leaf,
            bounds: sibling_node.bounds().union(&bounds),
            max_order: sibling_node.max_order().max(order),
        });
        self.leaves += 1;

        match self.path.last().copied() {
            Some(grandparent) => self.replace_child(grandparent, sibling, parent),
            None => self.root = Some(parent),
        }

        for &ancestor in self.path.iter().rev() {
            if let Node::Internal { max_order, .. } = &mut self.nodes[ancestor.get()] {
                if *max_order >= order {
                    break;
                }
                *max_order = order;
            }
        }

        self.max_order = self.max_order.max(order);
        order
    }

    /// Remove every box. Node storage is kept for reuse.
    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
        self.path.clear();
        self.search.clear();
        self.leaves = 0;
        self.max_order = 0;
    }

    /// Highest order issued since the last [`clear`](Self::clear), or `0`.
    pub fn max_order(&self) -> DrawOrder {
        self.max_order
    }

    /// Number of arena nodes (leaves and internal nodes).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored boxes. Degenerate inserts are not counted.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// True if no box is stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn push(&mut self, node: Node<T>) -> NodeIdx {
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    fn replace_child(&mut self, parent: NodeIdx, old: NodeIdx, new: NodeIdx) {
        if let Node::Internal { left, right, .. } = &mut self.nodes[parent.get()] {
            if *left == old {
                *left = new;
            } else {
                debug_assert_eq!(*right, old, "path parent must own the sibling");
                *right = new;
            }
        }
    }

    /// Highest order among leaves under `start` that overlap `bounds`, folded into `running`.
    fn max_intersecting_order(
        &mut self,
        start: NodeIdx,
        bounds: &Aabb2D<T>,
        mut running: DrawOrder,
    ) -> DrawOrder {
        self.search.clear();
        self.search.push(start);
        while let Some(i) = self.search.pop() {
            let node = self.nodes[i.get()];
            // Nothing below can raise the running maximum.
            if running >= node.max_order() || !node.bounds().overlaps(bounds) {
                continue;
            }
            match node {
                Node::Leaf { order, .. } => running = running.max(order),
                Node::Internal { left, right, .. } => {
                    self.search.push(left);
                    self.search.push(right);
                }
            }
        }
        running
    }
}

impl<T: Scalar> Debug for OrderTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderTree")
            .field("nodes", &self.nodes.len())
            .field("leaves", &self.leaves)
            .field("max_order", &self.max_order)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Rng(u64);

    impl Rng {
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn next_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) / ((1_u64 << 53) as f64)
        }
    }

    fn random_boxes(seed: u64, count: usize) -> Vec<Aabb2D<f64>> {
        let mut rng = Rng(seed);
        (0..count)
            .map(|_| {
                let x = rng.next_f64() * 500.0;
                let y = rng.next_f64() * 500.0;
                let w = 1.0 + rng.next_f64() * 80.0;
                let h = 1.0 + rng.next_f64() * 80.0;
                Aabb2D::<f64>::from_xywh(x, y, w, h)
            })
            .collect()
    }

    /// Walks the whole tree, checking cached bounds and max orders. Returns the leaf count.
    fn check_node(tree: &OrderTree<f64>, idx: NodeIdx) -> (Aabb2D<f64>, DrawOrder, usize) {
        match tree.nodes[idx.get()] {
            Node::Leaf { bounds, order } => (bounds, order, 1),
            Node::Internal {
                left,
                right,
                bounds,
                max_order,
            } => {
                let (lb, lo, ln) = check_node(tree, left);
                let (rb, ro, rn) = check_node(tree, right);
                let u = lb.union(&rb);
                assert!(
                    bounds.min_x <= u.min_x
                        && bounds.min_y <= u.min_y
                        && bounds.max_x >= u.max_x
                        && bounds.max_y >= u.max_y,
                    "internal bounds must cover both children"
                );
                assert_eq!(max_order, lo.max(ro), "cached max order must be exact");
                (bounds, max_order, ln + rn)
            }
        }
    }

    #[test]
    fn first_insert_is_one() {
        let mut tree = OrderTree::<f64>::new();
        assert_eq!(tree.insert(Aabb2D::<f64>::from_xywh(3.0, 4.0, 5.0, 6.0)), 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.max_order(), 1);
    }

    #[test]
    fn overlap_and_disjoint_scenario() {
        let mut tree = OrderTree::<f64>::new();
        let a = tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 100.0, 100.0));
        let b = tree.insert(Aabb2D::<f64>::from_xywh(50.0, 50.0, 100.0, 100.0));
        let c = tree.insert(Aabb2D::<f64>::from_xywh(200.0, 0.0, 50.0, 50.0));
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(c, 1, "disjoint box should not be pushed above unrelated content");
        assert_eq!(tree.max_order(), 2);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn stacked_boxes_climb() {
        let mut tree = OrderTree::<i64>::new();
        for expected in 1..=20 {
            let order = tree.insert(Aabb2D::<i64>::from_xywh(0, 0, 10, 10));
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn disjoint_row_shares_order() {
        let mut tree = OrderTree::<f32>::new();
        for i in 0..50 {
            let x = i as f32 * 20.0;
            assert_eq!(tree.insert(Aabb2D::<f32>::from_xywh(x, 0.0, 10.0, 10.0)), 1);
        }
        // A full-width bar covers the whole row.
        assert_eq!(
            tree.insert(Aabb2D::<f32>::from_xywh(0.0, 5.0, 1000.0, 2.0)),
            2
        );
    }

    #[test]
    fn overlap_ordering_holds_for_random_input() {
        for seed in [0x1234_5678_9ABC_DEF0_u64, 0xDEAD_BEEF_CAFE_F00D, 42] {
            let boxes = random_boxes(seed, 400);
            let mut tree = OrderTree::<f64>::new();
            let orders: Vec<_> = boxes.iter().map(|b| tree.insert(*b)).collect();
            for j in 0..boxes.len() {
                let mut expected = 0;
                for i in 0..j {
                    if boxes[i].overlaps(&boxes[j]) {
                        assert!(
                            orders[i] < orders[j],
                            "box {i} overlaps later box {j} but does not draw first"
                        );
                        expected = expected.max(orders[i]);
                    }
                }
                assert_eq!(orders[j], expected + 1, "order must be tight");
            }
            let root = tree.root.expect("non-empty tree has a root");
            let (_, max, leaves) = check_node(&tree, root);
            assert_eq!(max, tree.max_order());
            assert_eq!(leaves, boxes.len());
            assert_eq!(tree.node_count(), 2 * boxes.len() - 1);
        }
    }

    #[test]
    fn clear_behaves_like_new() {
        let boxes = random_boxes(7, 200);
        let mut reused = OrderTree::<f64>::with_capacity(16);
        for b in &boxes[..50] {
            let _ = reused.insert(*b);
        }
        reused.clear();
        assert!(reused.is_empty());
        assert_eq!(reused.max_order(), 0);
        assert_eq!(reused.node_count(), 0);

        let mut fresh = OrderTree::<f64>::new();
        let a: Vec<_> = boxes.iter().map(|b| reused.insert(*b)).collect();
        let b: Vec<_> = boxes.iter().map(|b| fresh.insert(*b)).collect();
        assert_eq!(a, b);
        assert_eq!(reused.node_count(), fresh.node_count());
    }

    #[test]
    fn degenerate_bounds_go_on_top_without_nodes() {
        let mut tree = OrderTree::<f64>::new();
        let _ = tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 10.0, 10.0));
        let _ = tree.insert(Aabb2D::<f64>::from_xywh(0.0, 0.0, 10.0, 10.0));
        let nodes = tree.node_count();

        let zero_width = tree.insert(Aabb2D::<f64>::from_xywh(5.0, 0.0, 0.0, 10.0));
        assert_eq!(zero_width, 3);
        let negative = tree.insert(Aabb2D::<f64>::from_xywh(5.0, 0.0, -4.0, 10.0));
        assert_eq!(negative, 4);
        let nan = tree.insert(Aabb2D::new(f64::NAN, 0.0, 1.0, 1.0));
        assert_eq!(nan, 5);
        assert_eq!(tree.node_count(), nodes);
        assert_eq!(tree.max_order(), 5);

        // Real boxes still resolve against stored leaves only.
        let beside = tree.insert(Aabb2D::<f64>::from_xywh(50.0, 0.0, 10.0, 10.0));
        assert_eq!(beside, 1);
        assert_eq!(tree.max_order(), 5);
    }

    #[test]
    fn degenerate_into_empty_tree() {
        let mut tree = OrderTree::<i64>::new();
        assert_eq!(tree.insert(Aabb2D::<i64>::from_xywh(0, 0, 0, 0)), 1);
        assert!(tree.is_empty());
        // The first stored box still starts at one.
        assert_eq!(tree.insert(Aabb2D::<i64>::from_xywh(0, 0, 4, 4)), 1);
    }

    #[test]
    fn ancestor_max_stops_early_but_stays_exact() {
        let mut tree = OrderTree::<f64>::new();
        let mut boxes = vec![];
        // A tall stack on the left, then a row of disjoint boxes on the right.
        for _ in 0..10 {
            boxes.push(Aabb2D::<f64>::from_xywh(0.0, 0.0, 10.0, 10.0));
        }
        for i in 0..30 {
            boxes.push(Aabb2D::<f64>::from_xywh(100.0 + i as f64 * 10.0, 0.0, 5.0, 5.0));
        }
        for b in &boxes {
            let _ = tree.insert(*b);
        }
        let root = tree.root.expect("root");
        let (_, max, leaves) = check_node(&tree, root);
        assert_eq!(max, 10);
        assert_eq!(leaves, boxes.len());
    }
}
