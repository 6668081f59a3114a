/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use dashmap::DashMap;

use super::order::{OrderId, Side};
use super::price_level::Handle;

/// Where a resting order lives: which side, at what price, and its handle
/// into that price level's internal arena.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location {
    pub(crate) side: Side,
    pub(crate) price: i64,
    pub(crate) handle: Handle,
}

/// Order-id -> location, for O(1) average cancellation lookup. Backed by
/// `DashMap` so the type stays usable from the concurrent-map style the rest
/// of the book is built on, even though a single `MatchingEngine` is only
/// ever driven from one thread at a time.
#[derive(Debug, Default)]
pub(crate) struct OrderIndex {
    locations: DashMap<OrderId, Location>,
}

impl OrderIndex {
    pub(crate) fn new() -> Self {
        Self {
            locations: DashMap::new(),
        }
    }

    pub(crate) fn insert(&self, id: OrderId, location: Location) {
        self.locations.insert(id, location);
    }

    pub(crate) fn remove(&self, id: OrderId) -> Option<Location> {
        self.locations.remove(&id).map(|(_, location)| location)
    }

    pub(crate) fn len(&self) -> usize {
        self.locations.len()
    }
}
