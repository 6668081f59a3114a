/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use rayon::prelude::*;
use tracing::warn;

use crate::sim::config::{Objective, Regime, RegimeGrid, TrajectoryConfig, log_spaced};
use crate::sim::error::HarnessError;
use crate::sim::simulation::SimulationLoop;

/// The winning skew coefficient for one regime, and the objective's value
/// there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeResult {
    pub regime: Regime,
    pub best_c: f64,
    pub objective_value: f64,
}

/// Deterministic seed for one (regime, replicate) pair. Intentionally does
/// *not* depend on the candidate being evaluated: common random numbers
/// requires that every candidate at a given replicate index see the same
/// draws from the fundamental and the flow generator, so that the
/// difference in outcome reflects the candidate, not RNG luck. A splitmix64
/// style finalizer keeps this cheap and collision-resistant enough for the
/// replicate counts this harness runs.
fn replicate_seed(regime_index: usize, replicate_index: usize) -> u64 {
    let mut x = (regime_index as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (replicate_index as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 33;
    x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    x ^= x >> 33;
    x = x.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    x ^= x >> 33;
    x
}

fn objective_value(summary: &crate::sim::simulation::TrajectorySummary, objective: Objective) -> f64 {
    match objective {
        Objective::MeanReturn => summary.mean_return,
        Objective::FinalWealth => summary.final_wealth,
        Objective::MeanSquaredDistance => summary.mean_squared_distance,
    }
}

/// Two-stage coarse-then-fine log-spaced search over the skew coefficient,
/// Monte-Carlo averaged over replicates, run in parallel across regime
/// points. Each worker owns its own trajectory state; there is no shared
/// mutable state across regimes or candidates.
pub struct GridSearchHarness {
    grid: RegimeGrid,
}

impl GridSearchHarness {
    #[must_use]
    pub fn new(grid: RegimeGrid) -> Self {
        Self { grid }
    }

    /// Run the full search. `base_config` supplies every trajectory field
    /// except `regime` and `c`, which this harness overrides per candidate.
    /// One result per regime point, independent of the others; a failed
    /// regime yields `Err` rather than aborting the whole search.
    pub fn search(&self, base_config: &TrajectoryConfig) -> Vec<Result<RegimeResult, HarnessError>> {
        let regimes = self.grid.regimes();
        regimes
            .par_iter()
            .enumerate()
            .map(|(regime_index, regime)| self.search_regime(regime_index, *regime, base_config))
            .collect()
    }

    fn search_regime(
        &self,
        regime_index: usize,
        regime: Regime,
        base_config: &TrajectoryConfig,
    ) -> Result<RegimeResult, HarnessError> {
        let coarse_candidates = log_spaced(self.grid.c_lo, self.grid.c_hi, self.grid.coarse_candidates);
        let coarse_scores = self.evaluate_candidates(regime_index, regime, &coarse_candidates, base_config);
        let (coarse_best, _) = self.select_best(&coarse_candidates, &coarse_scores)?;

        let fine_width = (self.grid.c_hi / self.grid.c_lo).powf(1.0 / self.grid.coarse_candidates.max(1) as f64);
        let fine_lo = (coarse_best / fine_width).max(self.grid.c_lo);
        let fine_hi = (coarse_best * fine_width).min(self.grid.c_hi);
        let fine_candidates = log_spaced(fine_lo, fine_hi, self.grid.fine_candidates);
        let fine_scores = self.evaluate_candidates(regime_index, regime, &fine_candidates, base_config);
        let (fine_best, fine_objective) = self.select_best(&fine_candidates, &fine_scores)?;

        Ok(RegimeResult {
            regime,
            best_c: fine_best,
            objective_value: fine_objective,
        })
    }

    /// Mean objective value per candidate, over `self.grid.replicates`
    /// replicates sharing noise with every other candidate at the same
    /// replicate index (common random numbers). `None` marks a candidate
    /// that produced fewer than half its replicates surviving: it is
    /// excluded from `select_best`, not treated as a regime failure — only
    /// a stage where *every* candidate is unusable fails the regime.
    fn evaluate_candidates(
        &self,
        regime_index: usize,
        regime: Regime,
        candidates: &[f64],
        base_config: &TrajectoryConfig,
    ) -> Vec<Option<f64>> {
        candidates
            .par_iter()
            .map(|&c| self.evaluate_candidate(regime_index, regime, c, base_config))
            .collect()
    }

    fn evaluate_candidate(
        &self,
        regime_index: usize,
        regime: Regime,
        c: f64,
        base_config: &TrajectoryConfig,
    ) -> Option<f64> {
        let mut values = Vec::with_capacity(self.grid.replicates);

        for replicate_index in 0..self.grid.replicates {
            let config = TrajectoryConfig {
                sigma: regime.sigma,
                gamma: regime.gamma,
                seed: replicate_seed(regime_index, replicate_index),
                ..*base_config
            }
            .with_skew_coefficient(c);

            match SimulationLoop::new(config).run() {
                Ok(trajectory) => values.push(objective_value(&trajectory.summary, self.grid.objective)),
                Err(_) => {
                    warn!(?regime, c, replicate_index, "replicate diverged, discarding");
                }
            }
        }

        let required = self.grid.replicates.div_ceil(2);
        if values.len() < required {
            warn!(
                ?regime,
                c,
                survived = values.len(),
                total = self.grid.replicates,
                "candidate marked unusable, excluded from argmax"
            );
            return None;
        }

        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Best (candidate, objective) pair among the usable ones. `Err` only
    /// when every candidate in this stage was excluded.
    fn select_best(&self, candidates: &[f64], scores: &[Option<f64>]) -> Result<(f64, f64), HarnessError> {
        let higher_is_better = self.grid.objective.higher_is_better();
        let mut best: Option<(f64, f64)> = None;
        for (&candidate, score) in candidates.iter().zip(scores) {
            let Some(&score) = score else { continue };
            let better = match best {
                None => true,
                Some((_, best_score)) => {
                    if higher_is_better {
                        score > best_score
                    } else {
                        score < best_score
                    }
                }
            };
            if better {
                best = Some((candidate, score));
            }
        }
        best.ok_or_else(|| HarnessError::NoViableCandidates {
            attempted: candidates.len(),
        })
    }
}
