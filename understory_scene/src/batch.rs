// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Order-sorted draw lists and same-kind batches.
//!
//! A [`DrawList`] holds every stored primitive of a scene sorted by draw order.
//! Its [`batches`](DrawList::batches) partition that sequence into maximal runs
//! of one [`PrimitiveKind`], so a backend can bind a pipeline once per run and
//! still paint in exact order.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::layer::Layer;
use crate::primitives::{Placed, Primitive, PrimitiveRef};
use crate::types::PrimitiveKind;

/// Every primitive of a frame, sorted ascending by draw order.
///
/// Primitives with equal orders keep their flattening position: layer by layer
/// in creation order, kind by kind in [`PrimitiveKind::ALL`] order, then
/// insertion order.
#[derive(Clone, Debug)]
pub struct DrawList<'a> {
    items: Vec<PrimitiveRef<'a>>,
}

impl<'a> DrawList<'a> {
    pub(crate) fn new(layers: &'a [Layer]) -> Self {
        let mut items: Vec<PrimitiveRef<'a>> = layers.iter().flat_map(Layer::iter).collect();
        items.sort_by_key(|p| p.order());
        tracing::debug!(
            primitives = items.len(),
            layers = layers.len(),
            "built draw list"
        );
        Self { items }
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the frame drew nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The sorted primitives.
    pub fn as_slice(&self) -> &[PrimitiveRef<'a>] {
        &self.items
    }

    /// Iterate the sorted primitives one by one.
    pub fn iter(&self) -> impl Iterator<Item = PrimitiveRef<'a>> + '_ {
        self.items.iter().copied()
    }

    /// Iterate maximal same-kind runs.
    pub fn batches(&self) -> BatchIterator<'_, 'a> {
        BatchIterator {
            items: &self.items,
            cursor: 0,
        }
    }
}

/// A maximal run of consecutive same-kind primitives from a [`DrawList`].
#[derive(Copy, Clone, Debug)]
pub struct Batch<'l, 'a> {
    /// Kind shared by every primitive in the run.
    pub kind: PrimitiveKind,
    /// The run, ascending by order.
    pub primitives: &'l [PrimitiveRef<'a>],
}

impl<'l, 'a> Batch<'l, 'a> {
    /// Number of primitives in the run.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Batches are never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// The run as typed placed primitives.
    ///
    /// Yields nothing if `P` is not this batch's kind.
    pub fn typed<P: Primitive + 'a>(self) -> impl Iterator<Item = &'a Placed<P>> + 'l {
        let primitives: &'l [PrimitiveRef<'a>] = if P::KIND == self.kind {
            self.primitives
        } else {
            &[]
        };
        primitives.iter().filter_map(|r| P::from_ref(*r))
    }
}

/// Iterator over the [`Batch`]es of a [`DrawList`].
///
/// Finite and fused; [`reset`](Self::reset) rewinds it to replay the same
/// partition.
#[derive(Clone, Debug)]
pub struct BatchIterator<'l, 'a> {
    items: &'l [PrimitiveRef<'a>],
    cursor: usize,
}

impl BatchIterator<'_, '_> {
    /// Rewind to the first batch.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'l, 'a> Iterator for BatchIterator<'l, 'a> {
    type Item = Batch<'l, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        let rest = &items[self.cursor..];
        let kind = rest.first()?.kind();
        let len = rest
            .iter()
            .position(|p| p.kind() != kind)
            .unwrap_or(rest.len());
        self.cursor += len;
        let primitives = &rest[..len];
        tracing::trace!(
            ?kind,
            len,
            first_order = primitives[0].order(),
            "batch"
        );
        Some(Batch { kind, primitives })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.cursor;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for BatchIterator<'_, '_> {}
