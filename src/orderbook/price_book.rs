/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use std::sync::Arc;

use crossbeam::atomic::AtomicCell;
use crossbeam_skiplist::SkipMap;

use super::order::Side;
use super::price_level::PriceLevel;

const NO_PRICE: i64 = i64::MIN;

/// One side of the book: a price -> level mapping ordered by price, plus a
/// cached extremum invalidated whenever a level is created or emptied.
///
/// The ordered structure is a `crossbeam_skiplist::SkipMap`, giving O(log U)
/// worst case for any operation that touches the ordering (inserting a
/// brand-new price, removing an emptied one) and O(log U) for a genuinely
/// cold best-price query. In steady state — no level created or destroyed
/// since the last query — `best_price` is answered from the cache in O(1).
pub(crate) struct PriceBook {
    side: Side,
    levels: SkipMap<i64, Arc<PriceLevel>>,
    cached_best: AtomicCell<i64>,
}

impl PriceBook {
    pub(crate) fn new(side: Side) -> Self {
        Self {
            side,
            levels: SkipMap::new(),
            cached_best: AtomicCell::new(NO_PRICE),
        }
    }

    fn invalidate_cache(&self) {
        self.cached_best.store(NO_PRICE);
    }

    /// Find or create the level at `price`, inserting a fresh empty one (and
    /// invalidating the best-price cache) if none exists yet.
    pub(crate) fn get_or_create(&self, price: i64) -> Arc<PriceLevel> {
        if let Some(entry) = self.levels.get(&price) {
            return entry.value().clone();
        }
        self.invalidate_cache();
        self.levels
            .get_or_insert(price, Arc::new(PriceLevel::new(price)))
            .value()
            .clone()
    }

    /// Peek at the level currently at `price`, if any, without creating one.
    pub(crate) fn peek_level(&self, price: i64) -> Option<Arc<PriceLevel>> {
        self.levels.get(&price).map(|entry| entry.value().clone())
    }

    /// Drop a level from the ordering once it has no residual volume left.
    /// No-op if the level is absent or still carries volume.
    pub(crate) fn remove_empty(&self, price: i64) {
        if let Some(entry) = self.levels.get(&price) {
            if entry.value().is_empty() {
                entry.remove();
                self.invalidate_cache();
            }
        }
    }

    /// The current best price on this side: max for bids, min for asks.
    /// `None` if the side is empty.
    pub(crate) fn best_price(&self) -> Option<i64> {
        let cached = self.cached_best.load();
        if cached != NO_PRICE && self.levels.contains_key(&cached) {
            return Some(cached);
        }
        let best = match self.side {
            Side::Bid => self.levels.back().map(|e| *e.key()),
            Side::Ask => self.levels.front().map(|e| *e.key()),
        };
        if let Some(price) = best {
            self.cached_best.store(price);
        }
        best
    }

    /// Price levels in execution priority order for an aggressor crossing
    /// this side: ascending by key for asks (cheapest first), descending for
    /// bids (richest first) — `SkipMap`'s natural ordering makes either
    /// direction free, with no separate sort step.
    pub(crate) fn levels_in_priority_order(&self) -> Box<dyn Iterator<Item = Arc<PriceLevel>> + '_> {
        match self.side {
            Side::Ask => Box::new(self.levels.iter().map(|e| e.value().clone())),
            Side::Bid => Box::new(self.levels.iter().rev().map(|e| e.value().clone())),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Every resting order on this side, grouped by price in priority order,
    /// each group oldest-first. For depth introspection only.
    pub(crate) fn depth_snapshot(&self) -> Vec<(i64, Vec<super::order::Order>)> {
        self.levels_in_priority_order()
            .map(|level| (level.price(), level.snapshot()))
            .collect()
    }
}
