/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use tracing::info;

use crate::orderbook::{MatchingEngine, Order};
use crate::sim::config::{Regime, TrajectoryConfig};
use crate::sim::error::TrajectoryError;
use crate::sim::flow::InformedFlowGenerator;
use crate::sim::fundamental::FundamentalProcess;
use crate::sim::maker::MarketMakerAgent;

/// One tick's worth of recorded observables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickObservation {
    pub t: u64,
    pub fundamental: f64,
    pub maker_mid: f64,
    pub best_bid: Option<i64>,
    pub best_ask: Option<i64>,
    pub inventory: i64,
    pub cash: f64,
    pub wealth: f64,
    pub fills_this_tick: u64,
}

/// The trajectory/core contract: one row summarizing a whole run, stable in
/// field layout so external regression/plotting code is insulated from
/// changes to the simulation internals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySummary {
    pub regime: Regime,
    pub skew_coefficient: f64,
    pub t: u64,
    pub mean_return: f64,
    pub final_wealth: f64,
    pub mean_squared_distance: f64,
    pub final_inventory: i64,
    pub num_trades: u64,
}

/// The full result of one simulation run: the per-tick series plus its
/// summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub ticks: Vec<TickObservation>,
    pub summary: TrajectorySummary,
}

/// Guards beyond which a trajectory is considered to have diverged. Not
/// part of [`TrajectoryConfig`] because they bound a pathology, not a model
/// parameter — the default is generous enough not to trip on any
/// well-behaved regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceGuard {
    pub max_abs_inventory: i64,
}

impl Default for DivergenceGuard {
    fn default() -> Self {
        Self {
            max_abs_inventory: 1_000_000_000,
        }
    }
}

/// Fixed-horizon per-tick orchestration. Order within a tick is fixed and
/// not a caller option: advance the fundamental, let the maker requote,
/// let flow emit and dispatch, then record. Reordering this would change
/// which fills land against which quotes, so it is not exposed as a knob.
pub struct SimulationLoop {
    config: TrajectoryConfig,
    guard: DivergenceGuard,
    fundamental: FundamentalProcess,
    flow: InformedFlowGenerator,
    maker: MarketMakerAgent,
    engine: MatchingEngine,
    next_order_id: u64,
}

impl SimulationLoop {
    #[must_use]
    pub fn new(config: TrajectoryConfig) -> Self {
        Self::with_guard(config, DivergenceGuard::default())
    }

    #[must_use]
    pub fn with_guard(config: TrajectoryConfig, guard: DivergenceGuard) -> Self {
        Self {
            fundamental: FundamentalProcess::new(config.initial_mid, config.sigma, config.seed),
            flow: InformedFlowGenerator::new(
                config.lambda,
                config.gamma,
                config.v_min,
                config.v_max,
                config.seed.wrapping_add(1),
            ),
            maker: MarketMakerAgent::new(
                config.initial_mid,
                config.s,
                config.c,
                config.quote_size,
                config.initial_cash,
            ),
            engine: MatchingEngine::new(),
            config,
            guard,
            next_order_id: 0,
        }
    }

    fn fresh_order_id(&mut self) -> u64 {
        self.next_order_id += 1;
        self.next_order_id
    }

    /// Run the full horizon. Stops early with `Err` if a configured
    /// divergence guard trips; ticks recorded up to that point are not
    /// returned, matching the policy that a diverged trajectory is
    /// discarded wholesale by the caller (see `GridSearchHarness`).
    pub fn run(mut self) -> Result<Trajectory, TrajectoryError> {
        info!(t = self.config.t, seed = self.config.seed, "starting trajectory");
        let mut ticks = Vec::with_capacity(self.config.t as usize);
        let mut sum_squared_distance = 0.0f64;
        let mut num_trades = 0u64;
        let initial_wealth = self.maker.wealth();

        for t in 0..self.config.t {
            let fundamental = self.fundamental.advance();

            let bid_id = self.fresh_order_id();
            let ask_id = self.fresh_order_id();
            self.maker.requote(&self.engine, bid_id, ask_id);

            let mid_before_flow = self.engine.mid();
            let flow_orders = self.flow.emit(fundamental, mid_before_flow);
            let mut fills_this_tick = 0u64;
            for flow_order in &flow_orders {
                let order_id = self.fresh_order_id();
                let order = Order::market(order_id, flow_order.trader_id, flow_order.volume, flow_order.side);
                if let Ok(receipts) = self.engine.process_order(order) {
                    fills_this_tick += receipts.len() as u64;
                }
            }
            // `collect_fills` drains the maker's own notification queues, which
            // hold exactly the receipts already counted above (every flow order
            // can only match against the maker's resting quotes in this model);
            // only its inventory/cash side effect is wanted here, not its count.
            self.maker.collect_fills(&self.engine);
            num_trades += fills_this_tick;

            let inventory = self.maker.inventory();
            if inventory.unsigned_abs() > self.guard.max_abs_inventory as u64 {
                return Err(TrajectoryError::InventoryExceededGuard {
                    tick: t,
                    inventory,
                    limit: self.guard.max_abs_inventory,
                });
            }
            let wealth = self.maker.wealth();
            if !wealth.is_finite() {
                return Err(TrajectoryError::NonFiniteWealth { tick: t, wealth });
            }

            let maker_mid = self.maker.internal_mid();
            sum_squared_distance += (maker_mid - fundamental).powi(2);

            ticks.push(TickObservation {
                t,
                fundamental,
                maker_mid,
                best_bid: self.engine.best_bid(),
                best_ask: self.engine.best_ask(),
                inventory,
                cash: self.maker.cash(),
                wealth,
                fills_this_tick,
            });
        }

        let final_wealth = self.maker.wealth();
        let mean_return = if self.config.t > 0 {
            (final_wealth - initial_wealth) / self.config.t as f64
        } else {
            0.0
        };
        let mean_squared_distance = if self.config.t > 0 {
            sum_squared_distance / self.config.t as f64
        } else {
            0.0
        };

        let summary = TrajectorySummary {
            regime: Regime {
                sigma: self.config.sigma,
                gamma: self.config.gamma,
            },
            skew_coefficient: self.config.c,
            t: self.config.t,
            mean_return,
            final_wealth,
            mean_squared_distance,
            final_inventory: self.maker.inventory(),
            num_trades,
        };

        info!(final_wealth, mean_squared_distance, "trajectory complete");
        Ok(Trajectory { ticks, summary })
    }
}
