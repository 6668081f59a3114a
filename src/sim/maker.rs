/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use tracing::debug;

use crate::orderbook::{MatchingEngine, Order, OrderId, Side, TraderId};

/// Trader id the maker submits its resting bid under.
pub const MAKER_BID_TRADER_ID: TraderId = 1;
/// Trader id the maker submits its resting ask under. Kept distinct from
/// the bid id so the maker's own two quotes can never register as a
/// self-trade against each other in the notification bus.
pub const MAKER_ASK_TRADER_ID: TraderId = 2;

/// Inventory-aware two-sided quoting agent.
///
/// Per tick it cancels its previous pair of quotes and posts a new pair
/// centered on its own internal mid `m_t`, skewed by its signed inventory.
/// `m_t` is updated only from the maker's own previously posted mid — it
/// never observes the fundamental directly, which is the point of the
/// study this agent supports: any tracking of `S_t` is purely an emergent
/// consequence of inventory-driven quote skew.
pub struct MarketMakerAgent {
    m: f64,
    spread_ticks: i64,
    skew_coefficient: f64,
    quote_size: u64,
    inventory: i64,
    cash: f64,
    bid_order_id: Option<OrderId>,
    ask_order_id: Option<OrderId>,
}

impl MarketMakerAgent {
    #[must_use]
    pub fn new(initial_mid: f64, spread_ticks: i64, skew_coefficient: f64, quote_size: u64, initial_cash: f64) -> Self {
        Self {
            m: initial_mid,
            spread_ticks,
            skew_coefficient,
            quote_size,
            inventory: 0,
            cash: initial_cash,
            bid_order_id: None,
            ask_order_id: None,
        }
    }

    pub fn inventory(&self) -> i64 {
        self.inventory
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn internal_mid(&self) -> f64 {
        self.m
    }

    /// `C_t + I_t * m_t`.
    pub fn wealth(&self) -> f64 {
        self.cash + self.inventory as f64 * self.m
    }

    /// Cancel the previous pair (if any) and post a fresh pair of quotes
    /// under the two ids supplied by the caller. Any receipts generated
    /// immediately by the submissions themselves are applied directly —
    /// normally none, since the maker's own two quotes are the only
    /// resting orders in this model and never cross each other.
    pub fn requote(&mut self, engine: &MatchingEngine, bid_id: OrderId, ask_id: OrderId) {
        if let Some(id) = self.bid_order_id.take() {
            engine.cancel_order(id);
        }
        if let Some(id) = self.ask_order_id.take() {
            engine.cancel_order(id);
        }

        let skew = self.skew_coefficient * self.inventory as f64 * self.m;
        let half_spread = self.spread_ticks as f64 / 2.0;
        let mut bid_price = (self.m - half_spread - skew).round() as i64;
        let mut ask_price = (self.m + half_spread - skew).round() as i64;

        // Quotes computed from a large enough skew can cross; widen outward
        // around the center until they don't.
        while bid_price >= ask_price {
            bid_price -= 1;
            ask_price += 1;
        }

        self.m = (bid_price as f64 + ask_price as f64) / 2.0;

        let bid = Order::limit(bid_id, MAKER_BID_TRADER_ID, bid_price, self.quote_size, Side::Bid);
        let ask = Order::limit(ask_id, MAKER_ASK_TRADER_ID, ask_price, self.quote_size, Side::Ask);

        debug!(bid_price, ask_price, inventory = self.inventory, "maker requote");

        // Should never generate a fill (nothing else rests in this model),
        // but applying any receipt here keeps the invariant that every fill
        // is accounted for regardless of which call produced it.
        if let Ok(receipts) = engine.process_order(bid) {
            self.apply_fills(&receipts);
        }
        if let Ok(receipts) = engine.process_order(ask) {
            self.apply_fills(&receipts);
        }

        self.bid_order_id = Some(bid_id);
        self.ask_order_id = Some(ask_id);
    }

    /// Drain the maker's own notification inboxes and update inventory and
    /// cash from whatever filled this tick. Called once flow has been
    /// dispatched. The drained receipts are not a fill count in their own
    /// right: they duplicate whatever the caller already counted from the
    /// `process_order` return values that produced them, so this only
    /// applies their inventory/cash side effect.
    pub fn collect_fills(&mut self, engine: &MatchingEngine) {
        let bid_fills = engine.notifications().poll_receipts(MAKER_BID_TRADER_ID);
        let ask_fills = engine.notifications().poll_receipts(MAKER_ASK_TRADER_ID);
        self.apply_fills(&bid_fills);
        self.apply_fills(&ask_fills);
    }

    fn apply_fills(&mut self, receipts: &[crate::orderbook::TradeReceipt]) {
        for receipt in receipts {
            if receipt.maker_id == MAKER_BID_TRADER_ID {
                self.inventory += receipt.volume as i64;
                self.cash -= receipt.price as f64 * receipt.volume as f64;
            } else if receipt.maker_id == MAKER_ASK_TRADER_ID {
                self.inventory -= receipt.volume as i64;
                self.cash += receipt.price as f64 * receipt.volume as f64;
            }
        }
    }
}
