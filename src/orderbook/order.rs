/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use serde::{Deserialize, Serialize};

/// Unique, monotonically assigned order identifier.
pub type OrderId = u64;

/// Participant identifier. Agents and simulation traders share this space.
pub type TraderId = u64;

/// Which side of the book an order rests on, or crosses against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The side an incoming order of this side matches against.
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// A resting or incoming order. Immutable at insertion except for `volume`,
/// which decreases monotonically as the order is filled.
///
/// `price` is `None` exactly when `is_market` is `true`: market orders never
/// rest and never carry a limit price. `arrival_sequence` is assigned by the
/// engine at insertion time and is `0` until then; it is what breaks ties
/// between two resting orders at the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub trader_id: TraderId,
    pub price: Option<i64>,
    pub volume: u64,
    pub side: Side,
    pub is_market: bool,
    pub arrival_sequence: u64,
}

impl Order {
    /// Construct a resting limit order.
    #[must_use]
    pub fn limit(id: OrderId, trader_id: TraderId, price: i64, volume: u64, side: Side) -> Self {
        Self {
            id,
            trader_id,
            price: Some(price),
            volume,
            side,
            is_market: false,
            arrival_sequence: 0,
        }
    }

    /// Construct a marketable order. Never rests; any unfilled residual is
    /// discarded once the opposite side is exhausted.
    #[must_use]
    pub fn market(id: OrderId, trader_id: TraderId, volume: u64, side: Side) -> Self {
        Self {
            id,
            trader_id,
            price: None,
            volume,
            side,
            is_market: true,
            arrival_sequence: 0,
        }
    }

    /// Submission-time validity: positive volume, and price present if and
    /// only if the order is a limit order.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.volume > 0 && self.is_market == self.price.is_none()
    }
}
