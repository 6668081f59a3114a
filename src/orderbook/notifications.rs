/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use crossbeam::queue::SegQueue;
use dashmap::DashMap;

use super::order::{OrderId, Side, TraderId};

/// One fill. Emitted once per match and delivered to both the taker's and
/// the maker's inbox; `engine_sequence` totally orders receipts across the
/// engine's whole lifetime, including across separate `process_order` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeReceipt {
    pub taker_id: TraderId,
    pub maker_id: TraderId,
    pub taker_order_id: OrderId,
    pub maker_order_id: OrderId,
    pub price: i64,
    pub volume: u64,
    pub taker_is_bid: Side,
    pub engine_sequence: u64,
}

/// Per-trader append-only inbox of trade receipts.
///
/// Each side of a fill is pushed to its trader's queue as soon as the match
/// is computed, so within one `process_order` call the receipts a trader
/// sees are already in execution order; across calls, `engine_sequence`
/// carries that ordering forward. `poll_receipts` drains the whole queue —
/// there is no peek, since agents consume every receipt each tick.
#[derive(Debug, Default)]
pub struct NotificationBus {
    inboxes: DashMap<TraderId, SegQueue<TradeReceipt>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            inboxes: DashMap::new(),
        }
    }

    pub(crate) fn push(&self, trader_id: TraderId, receipt: TradeReceipt) {
        self.inboxes
            .entry(trader_id)
            .or_default()
            .push(receipt);
    }

    /// Drain every receipt currently queued for `trader_id`, oldest first.
    pub fn poll_receipts(&self, trader_id: TraderId) -> Vec<TradeReceipt> {
        let Some(queue) = self.inboxes.get(&trader_id) else {
            return Vec::new();
        };
        let mut drained = Vec::new();
        while let Some(receipt) = queue.pop() {
            drained.push(receipt);
        }
        drained
    }
}
