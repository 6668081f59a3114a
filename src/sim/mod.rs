/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

//! The multi-agent market simulation built on top of [`crate::orderbook`]:
//! a latent fundamental, an informed/noise order flow generator, an
//! inventory-skewing market maker, the per-tick loop coupling them, and a
//! grid-search harness for picking a skew coefficient per regime.

mod config;
mod error;
mod flow;
mod fundamental;
mod harness;
mod maker;
mod simulation;

#[cfg(test)]
mod tests;

pub use config::{Objective, Regime, RegimeGrid, TrajectoryConfig};
pub use error::{HarnessError, TrajectoryError};
pub use flow::{FlowOrder, InformedFlowGenerator, INFORMED_TRADER_ID, NOISE_TRADER_ID};
pub use fundamental::FundamentalProcess;
pub use harness::{GridSearchHarness, RegimeResult};
pub use maker::{MarketMakerAgent, MAKER_ASK_TRADER_ID, MAKER_BID_TRADER_ID};
pub use simulation::{DivergenceGuard, SimulationLoop, TickObservation, Trajectory, TrajectorySummary};
