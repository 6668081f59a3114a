/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use super::error::OrderBookError;
use super::notifications::{NotificationBus, TradeReceipt};
use super::order::{Order, OrderId, Side};
use super::order_index::{Location, OrderIndex};
use super::price_book::PriceBook;

/// Owns both price ladders, the order index, and the notification bus for
/// one symbol. A single `MatchingEngine` is strictly single-threaded: all of
/// `process_order`, `cancel_order`, and the price queries are synchronous
/// and return before any other mutation may occur. Invariant maintained at
/// rest, after every `process_order` returns: `best_bid() < best_ask()` or
/// one side is empty — the book is never crossed or locked.
///
/// Methods take `&self` rather than `&mut self`: the book's internal
/// concurrent structures (`PriceBook`'s skip list, `OrderIndex`'s `DashMap`)
/// already provide interior mutability, and keeping the same shape here
/// means an engine can be wrapped in `Arc` without an outer lock if a caller
/// ever needs to share read access to it — though a trajectory's simulation
/// loop never does.
pub struct MatchingEngine {
    bids: PriceBook,
    asks: PriceBook,
    order_index: OrderIndex,
    notifications: NotificationBus,
    arrival_sequence: AtomicU64,
    engine_sequence: AtomicU64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            bids: PriceBook::new(Side::Bid),
            asks: PriceBook::new(Side::Ask),
            order_index: OrderIndex::new(),
            notifications: NotificationBus::new(),
            arrival_sequence: AtomicU64::new(0),
            engine_sequence: AtomicU64::new(0),
        }
    }

    fn book(&self, side: Side) -> &PriceBook {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn next_arrival_sequence(&self) -> u64 {
        self.arrival_sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn next_engine_sequence(&self) -> u64 {
        self.engine_sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Submit an order. Runs the crossing loop against the opposite side
    /// first, then, if a limit order has residual volume left, rests it on
    /// its own side. Market orders with residual volume after the opposite
    /// side is exhausted are discarded: they never rest. Returns every
    /// receipt generated by this call, in execution order.
    ///
    /// Rejects non-positive volume and price/market-order mismatches before
    /// any state change; the engine never panics and never partially
    /// applies a rejected order.
    pub fn process_order(&self, mut order: Order) -> Result<Vec<TradeReceipt>, OrderBookError> {
        if order.volume == 0 {
            return Err(OrderBookError::NonPositiveVolume);
        }
        if order.is_market != order.price.is_none() {
            return Err(OrderBookError::PriceMarketMismatch);
        }
        debug_assert!(order.is_well_formed());

        order.arrival_sequence = self.next_arrival_sequence();
        trace!(order_id = order.id, side = ?order.side, volume = order.volume, "processing order");

        let opposite = self.book(order.side.opposite());
        let mut receipts = Vec::new();

        while order.volume > 0 {
            let Some(best_price) = opposite.best_price() else {
                break;
            };
            if !order.is_market {
                let crosses = match order.side {
                    Side::Bid => order.price.unwrap() >= best_price,
                    Side::Ask => order.price.unwrap() <= best_price,
                };
                if !crosses {
                    break;
                }
            }
            let Some(level) = opposite.peek_level(best_price) else {
                break;
            };
            let Some(maker) = level.peek_front() else {
                break;
            };

            let trade_volume = order.volume.min(maker.volume);
            let sequence = self.next_engine_sequence();
            let receipt = TradeReceipt {
                taker_id: order.trader_id,
                maker_id: maker.trader_id,
                taker_order_id: order.id,
                maker_order_id: maker.id,
                price: best_price,
                volume: trade_volume,
                taker_is_bid: order.side,
                engine_sequence: sequence,
            };
            trace!(
                maker_id = maker.id,
                taker_id = order.id,
                price = best_price,
                volume = trade_volume,
                "match"
            );
            self.notifications.push(order.trader_id, receipt);
            self.notifications.push(maker.trader_id, receipt);
            receipts.push(receipt);

            order.volume -= trade_volume;
            if let Some(filled_id) = level.reduce_front(trade_volume) {
                self.order_index.remove(filled_id);
            }
            if level.is_empty() {
                opposite.remove_empty(best_price);
            }
        }

        if order.volume > 0 && !order.is_market {
            let price = order.price.expect("limit order carries a price");
            let level = self.book(order.side).get_or_create(price);
            let handle = level.append(order);
            self.order_index.insert(
                order.id,
                Location {
                    side: order.side,
                    price,
                    handle,
                },
            );
        }

        Ok(receipts)
    }

    /// Cancel a resting order. Returns `true` if it was found and removed,
    /// `false` if the id is unknown or already fully filled/cancelled.
    pub fn cancel_order(&self, order_id: OrderId) -> bool {
        let Some(location) = self.order_index.remove(order_id) else {
            return false;
        };
        let book = self.book(location.side);
        if let Some(level) = book.peek_level(location.price) {
            level.remove(location.handle);
            if level.is_empty() {
                book.remove_empty(location.price);
            }
        }
        trace!(order_id, "cancelled");
        true
    }

    pub fn best_bid(&self) -> Option<i64> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<i64> {
        self.asks.best_price()
    }

    /// `(best_bid + best_ask) / 2`. `None` if either side is empty.
    pub fn mid(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Number of resting orders across both sides.
    pub fn resting_order_count(&self) -> usize {
        self.order_index.len()
    }

    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }

    /// A snapshot of every resting order on one side, grouped by price in
    /// execution-priority order and oldest-first within a price. For test
    /// assertions and book-aware quoting; not a hot path, and nothing about
    /// it is persisted.
    pub fn depth_snapshot(&self, side: Side) -> Vec<(i64, Vec<Order>)> {
        self.book(side).depth_snapshot()
    }
}
