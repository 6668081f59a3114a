/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use thiserror::Error;

/// Raised by [`crate::sim::SimulationLoop::run`] when a trajectory's state
/// exceeds a configured guard. The engine itself never errors on legal
/// input; this is strictly a simulation-level concern layered on top.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TrajectoryError {
    #[error("wealth became non-finite at tick {tick} (value: {wealth})")]
    NonFiniteWealth { tick: u64, wealth: f64 },
    #[error("inventory at tick {tick} exceeded the configured guard ({inventory} > {limit})")]
    InventoryExceededGuard {
        tick: u64,
        inventory: i64,
        limit: i64,
    },
}

/// Raised when a [`crate::sim::GridSearchHarness`] worker fails. Isolated
/// per regime: one failing regime yields a sentinel result rather than
/// aborting the whole search.
///
/// A candidate with too many diverged replicates is excluded from the
/// argmax, not escalated here: only a stage where *every* candidate is
/// unusable produces this error.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum HarnessError {
    #[error("no candidate in this stage had enough surviving replicates ({attempted} attempted)")]
    NoViableCandidates { attempted: usize },
}
