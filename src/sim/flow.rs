/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

use crate::orderbook::{Side, TraderId};

/// Trader id attached to an order the generator decided was informed.
pub const INFORMED_TRADER_ID: TraderId = 3;
/// Trader id attached to an order the generator decided was uninformed
/// noise.
pub const NOISE_TRADER_ID: TraderId = 4;

/// One market order the flow generator wants dispatched this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOrder {
    pub trader_id: TraderId,
    pub volume: u64,
    pub side: Side,
}

/// Per-tick Poisson-count market-order stream with a volume drawn uniformly
/// from `[v_min, v_max]` and a side biased towards the fundamental by the
/// informed fraction `gamma`.
pub struct InformedFlowGenerator {
    poisson: Poisson<f64>,
    gamma: f64,
    v_min: u64,
    v_max: u64,
    rng: StdRng,
}

impl InformedFlowGenerator {
    #[must_use]
    pub fn new(lambda: f64, gamma: f64, v_min: u64, v_max: u64, seed: u64) -> Self {
        assert!(v_min <= v_max, "v_min must not exceed v_max");
        Self {
            poisson: Poisson::new(lambda).expect("lambda must be positive and finite"),
            gamma: gamma.clamp(0.0, 1.0),
            v_min,
            v_max,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Emit this tick's order stream. `fundamental` is `S_t`; `mid` is the
    /// engine's current mid, if the book is two-sided.
    pub fn emit(&mut self, fundamental: f64, mid: Option<f64>) -> Vec<FlowOrder> {
        let count = self.poisson.sample(&mut self.rng).round() as u64;
        (0..count)
            .map(|_| self.one_order(fundamental, mid))
            .collect()
    }

    fn one_order(&mut self, fundamental: f64, mid: Option<f64>) -> FlowOrder {
        let volume = self.rng.random_range(self.v_min..=self.v_max);
        let is_informed = self.rng.random_bool(self.gamma);

        let side = if is_informed {
            match mid {
                Some(mid) if fundamental > mid => Side::Bid,
                Some(mid) if fundamental < mid => Side::Ask,
                _ => self.uniform_side(),
            }
        } else {
            self.uniform_side()
        };

        FlowOrder {
            trader_id: if is_informed {
                INFORMED_TRADER_ID
            } else {
                NOISE_TRADER_ID
            },
            volume,
            side,
        }
    }

    fn uniform_side(&mut self) -> Side {
        if self.rng.random_bool(0.5) {
            Side::Bid
        } else {
            Side::Ask
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_given_same_seed() {
        let mut a = InformedFlowGenerator::new(12.0, 0.5, 1, 3, 99);
        let mut b = InformedFlowGenerator::new(12.0, 0.5, 1, 3, 99);
        for _ in 0..20 {
            assert_eq!(a.emit(100.0, Some(99.0)), b.emit(100.0, Some(99.0)));
        }
    }

    #[test]
    fn volumes_stay_within_bounds() {
        let mut gen = InformedFlowGenerator::new(50.0, 0.3, 2, 4, 1);
        for _ in 0..30 {
            for order in gen.emit(100.0, Some(100.0)) {
                assert!(order.volume >= 2 && order.volume <= 4);
            }
        }
    }

    #[test]
    fn fully_informed_undefined_mid_is_still_well_formed() {
        let mut gen = InformedFlowGenerator::new(20.0, 1.0, 1, 1, 5);
        let orders = gen.emit(100.0, None);
        assert!(orders.iter().all(|o| o.volume == 1));
    }
}
