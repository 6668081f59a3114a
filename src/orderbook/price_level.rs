/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use std::cell::RefCell;

use super::order::Order;

/// A slot handle into a [`PriceLevel`]'s internal arena. Stored by the
/// engine's `OrderIndex` so that `remove` is O(1) regardless of queue depth,
/// instead of the O(M) linear scan a plain `VecDeque` would require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle(usize);

#[derive(Debug, Clone)]
enum Slot {
    Occupied(Order),
    Free { next_free: Option<usize> },
}

#[derive(Debug, Default)]
struct Inner {
    arena: Vec<Slot>,
    /// Arrival order of occupied slots, oldest first. Entries pointing at a
    /// freed slot are skipped lazily when the head is consulted.
    order: std::collections::VecDeque<usize>,
    free_head: Option<usize>,
    sum_volume: u64,
    live_count: usize,
}

/// A FIFO queue of resting orders at a single price, with a running total of
/// residual volume.
///
/// Orders live in a slot arena rather than a linked list of heap nodes, so
/// `remove` by handle is O(1) and leaves a free slot behind for reuse,
/// instead of the O(M) shift a `Vec::remove` or linear scan would cost. The
/// level sits behind a `RefCell` so that a `PriceBook` can hold it as a
/// plain `Arc<PriceLevel>` in its skip list and mutate it through a shared
/// reference, matching how the book itself is indexed.
#[derive(Debug)]
pub(crate) struct PriceLevel {
    price: i64,
    inner: RefCell<Inner>,
}

impl PriceLevel {
    pub(crate) fn new(price: i64) -> Self {
        Self {
            price,
            inner: RefCell::new(Inner::default()),
        }
    }

    pub(crate) fn price(&self) -> i64 {
        self.price
    }

    pub(crate) fn sum_volume(&self) -> u64 {
        self.inner.borrow().sum_volume
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.borrow().sum_volume == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().live_count
    }

    /// A snapshot of every live order at this level, oldest (next to
    /// execute) first. For depth introspection in tests and book-aware
    /// quoting only — not a hot path, and not persisted anywhere.
    pub(crate) fn snapshot(&self) -> Vec<Order> {
        let mut inner = self.inner.borrow_mut();
        Self::skip_freed_head(&mut inner);
        inner
            .order
            .iter()
            .filter_map(|&idx| match inner.arena[idx] {
                Slot::Occupied(order) => Some(order),
                Slot::Free { .. } => None,
            })
            .collect()
    }

    /// Add an order to the tail of the queue. O(1) amortized.
    pub(crate) fn append(&self, order: Order) -> Handle {
        let mut inner = self.inner.borrow_mut();
        inner.sum_volume += order.volume;
        inner.live_count += 1;
        let idx = match inner.free_head.take() {
            Some(slot) => {
                if let Slot::Free { next_free } = inner.arena[slot] {
                    inner.free_head = next_free;
                } else {
                    unreachable!("free_head must point at a free slot");
                }
                inner.arena[slot] = Slot::Occupied(order);
                slot
            }
            None => {
                inner.arena.push(Slot::Occupied(order));
                inner.arena.len() - 1
            }
        };
        inner.order.push_back(idx);
        Handle(idx)
    }

    fn skip_freed_head(inner: &mut Inner) {
        while let Some(&idx) = inner.order.front() {
            if matches!(inner.arena[idx], Slot::Occupied(_)) {
                break;
            }
            inner.order.pop_front();
        }
    }

    /// The order currently at the head of the FIFO queue, i.e. the next to
    /// execute under price-time priority. Does not remove it.
    pub(crate) fn peek_front(&self) -> Option<Order> {
        let mut inner = self.inner.borrow_mut();
        Self::skip_freed_head(&mut inner);
        inner.order.front().map(|&idx| match inner.arena[idx] {
            Slot::Occupied(order) => order,
            Slot::Free { .. } => unreachable!("skip_freed_head left a free head"),
        })
    }

    /// Reduce the head order's residual volume by `delta`; pop it if it
    /// reaches zero. Returns the head's id if it was fully filled, for
    /// `OrderIndex` cleanup.
    pub(crate) fn reduce_front(&self, delta: u64) -> Option<super::order::OrderId> {
        let mut inner = self.inner.borrow_mut();
        Self::skip_freed_head(&mut inner);
        let idx = *inner
            .order
            .front()
            .expect("reduce_front called on empty level");
        let volume_after = {
            let Slot::Occupied(ref mut order) = inner.arena[idx] else {
                unreachable!()
            };
            order.volume = order.volume.saturating_sub(delta);
            order.volume
        };
        inner.sum_volume = inner.sum_volume.saturating_sub(delta);
        if volume_after == 0 {
            let id = match inner.arena[idx] {
                Slot::Occupied(order) => order.id,
                Slot::Free { .. } => unreachable!(),
            };
            inner.order.pop_front();
            Self::free_slot(&mut inner, idx);
            inner.live_count -= 1;
            Some(id)
        } else {
            None
        }
    }

    /// Remove the order identified by `handle`, wherever it sits in the
    /// queue. O(1): no shifting of other entries.
    pub(crate) fn remove(&self, handle: Handle) {
        let mut inner = self.inner.borrow_mut();
        let idx = handle.0;
        if let Slot::Occupied(order) = inner.arena[idx] {
            inner.sum_volume = inner.sum_volume.saturating_sub(order.volume);
            Self::free_slot(&mut inner, idx);
            inner.live_count -= 1;
        }
    }

    fn free_slot(inner: &mut Inner, idx: usize) {
        inner.arena[idx] = Slot::Free {
            next_free: inner.free_head,
        };
        inner.free_head = Some(idx);
    }
}
