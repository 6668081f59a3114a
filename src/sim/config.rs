/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use serde::{Deserialize, Serialize};

/// Configuration recognized by a single trajectory, per the external
/// interface contract: everything a caller needs to reproduce a run is
/// named here, and nothing else influences the outcome given a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryConfig {
    /// Fundamental volatility: the per-tick standard deviation of the
    /// latent random walk.
    pub sigma: f64,
    /// Informed fraction `γ` (a.k.a. `p`): probability an incoming flow
    /// order trades in the direction of `S_t - mid_t`.
    pub gamma: f64,
    /// Poisson rate of order arrivals per tick.
    pub lambda: f64,
    /// Minimum per-order volume drawn by the flow generator, inclusive.
    pub v_min: u64,
    /// Maximum per-order volume drawn by the flow generator, inclusive.
    pub v_max: u64,
    /// Half-spread in ticks the maker quotes around its internal mid.
    pub s: i64,
    /// Inventory-skew coefficient: sensitivity of the maker's quotes to its
    /// signed dollar inventory.
    pub c: f64,
    /// Units per maker quote.
    pub quote_size: u64,
    /// Starting value of both the fundamental `S_0` and the maker's
    /// internal mid `m_0`.
    pub initial_mid: f64,
    /// Starting cash balance of the maker.
    pub initial_cash: f64,
    /// Horizon, in ticks.
    pub t: u64,
    /// RNG seed. Two trajectories with identical configuration and seed
    /// produce identical summaries, tick for tick.
    pub seed: u64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            sigma: 0.05,
            gamma: 0.5,
            lambda: 12.0,
            v_min: 1,
            v_max: 3,
            s: 2,
            c: 8e-6,
            quote_size: 5,
            initial_mid: 10_000.0,
            initial_cash: 0.0,
            t: 10_000,
            seed: 42,
        }
    }
}

impl TrajectoryConfig {
    /// Same configuration with a different skew coefficient. The grid
    /// search harness holds everything but `c` fixed within one regime.
    #[must_use]
    pub fn with_skew_coefficient(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    /// Same configuration with a different seed. Used by the harness to
    /// assign one seed per (regime, candidate, replicate) triple.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A (volatility, informed-fraction) regime point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    pub sigma: f64,
    pub gamma: f64,
}

/// The objective the grid search optimizes the skew coefficient against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    MeanReturn,
    FinalWealth,
    /// Mean squared distance between the maker's mid and the fundamental.
    /// Unlike the other two objectives, this one is minimized, not
    /// maximized.
    MeanSquaredDistance,
}

impl Objective {
    /// Whether higher values of this objective are better.
    pub(crate) fn higher_is_better(self) -> bool {
        !matches!(self, Objective::MeanSquaredDistance)
    }
}

/// Grid-search parameters: the regimes to sweep, the candidate bounds for
/// the skew coefficient, the replicate count for Monte-Carlo averaging, and
/// which objective to optimize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeGrid {
    pub sigmas: Vec<f64>,
    pub gammas: Vec<f64>,
    pub c_lo: f64,
    pub c_hi: f64,
    pub coarse_candidates: usize,
    pub fine_candidates: usize,
    /// Number of Monte-Carlo replicates simulated per candidate.
    pub replicates: usize,
    pub objective: Objective,
}

impl RegimeGrid {
    /// All (sigma, gamma) regime points, in row-major order over
    /// `sigmas x gammas`.
    pub(crate) fn regimes(&self) -> Vec<Regime> {
        let mut regimes = Vec::with_capacity(self.sigmas.len() * self.gammas.len());
        for &sigma in &self.sigmas {
            for &gamma in &self.gammas {
                regimes.push(Regime { sigma, gamma });
            }
        }
        regimes
    }
}

impl Default for RegimeGrid {
    fn default() -> Self {
        Self {
            sigmas: vec![0.02, 0.05, 0.1],
            gammas: vec![0.2, 0.5, 0.8],
            c_lo: 1e-8,
            c_hi: 1e-4,
            coarse_candidates: 8,
            fine_candidates: 8,
            replicates: 20,
            objective: Objective::MeanSquaredDistance,
        }
    }
}

/// Log-spaced candidates across `[lo, hi]`, `n` points inclusive of both
/// ends (`n >= 2`; `n == 1` returns just `lo`).
pub(crate) fn log_spaced(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![lo];
    }
    let log_lo = lo.ln();
    let log_hi = hi.ln();
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            (log_lo + t * (log_hi - log_lo)).exp()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_spaced_endpoints_match_bounds() {
        let points = log_spaced(1e-8, 1e-4, 5);
        assert_eq!(points.len(), 5);
        assert!((points[0] - 1e-8).abs() < 1e-12);
        assert!((points[4] - 1e-4).abs() / 1e-4 < 1e-9);
    }

    #[test]
    fn log_spaced_single_point_is_lo() {
        assert_eq!(log_spaced(1e-8, 1e-4, 1), vec![1e-8]);
    }

    #[test]
    fn regimes_is_cartesian_product() {
        let grid = RegimeGrid {
            sigmas: vec![0.1, 0.2],
            gammas: vec![0.3, 0.4],
            ..RegimeGrid::default()
        };
        assert_eq!(grid.regimes().len(), 4);
    }

    #[test]
    fn trajectory_config_round_trips_through_json() {
        let config = TrajectoryConfig::default().with_skew_coefficient(1e-5).with_seed(123);
        let json = serde_json::to_string(&config).unwrap();
        let restored: TrajectoryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn regime_grid_round_trips_through_json() {
        let grid = RegimeGrid::default();
        let json = serde_json::to_string(&grid).unwrap();
        let restored: RegimeGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, restored);
    }
}
