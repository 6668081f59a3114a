/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

//! A Level-3 limit order book matching engine with strict price-time
//! priority, and a multi-agent market simulation harness built on top of it.
//!
//! The engine (see [`orderbook`]) maintains two ordered price ladders, a
//! per-order FIFO queue at every price level, and an O(1) average
//! order-id lookup for cancellation. It never panics on well-formed input
//! and never blocks; a single [`orderbook::MatchingEngine`] is strictly
//! single-threaded.
//!
//! The simulation layer (see [`sim`]) drives the engine with a latent
//! random-walk fundamental, a Poisson informed/noise order flow generator,
//! and an inventory-skewing market maker, and exposes a two-stage grid
//! search harness for picking a skew coefficient per volatility/informed-
//! fraction regime.
//!
//! ```
//! use orderbook_sim::orderbook::{MatchingEngine, Order, Side};
//!
//! let engine = MatchingEngine::new();
//! engine.process_order(Order::limit(1, 100, 100, 3, Side::Ask)).unwrap();
//! let receipts = engine.process_order(Order::limit(2, 200, 100, 2, Side::Bid)).unwrap();
//! assert_eq!(receipts.len(), 1);
//! assert_eq!(receipts[0].volume, 2);
//! assert_eq!(engine.best_ask(), Some(100));
//! ```

pub mod orderbook;
pub mod sim;

pub mod prelude {
    //! Convenience re-exports for the common case: run an engine, or run a
    //! simulation trajectory.
    pub use crate::orderbook::{
        MatchingEngine, NotificationBus, Order, OrderBookError, OrderId, Side, TradeReceipt,
        TraderId,
    };
    pub use crate::sim::{
        FundamentalProcess, GridSearchHarness, InformedFlowGenerator, MarketMakerAgent,
        RegimeGrid, SimulationLoop, Trajectory, TrajectoryConfig, TrajectorySummary,
    };
}
