/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// The latent fundamental value, a seeded random walk: `S_{t+1} = S_t +
/// sigma * eps`, `eps ~ N(0, 1)` iid. Not bounded; consumers round to
/// integer ticks at the quoting boundary, never here.
pub struct FundamentalProcess {
    value: f64,
    normal: Normal<f64>,
    rng: StdRng,
    tick: u64,
}

impl FundamentalProcess {
    #[must_use]
    pub fn new(initial_value: f64, sigma: f64, seed: u64) -> Self {
        Self {
            value: initial_value,
            normal: Normal::new(0.0, sigma).expect("sigma must be finite and non-negative"),
            rng: StdRng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Advance one tick and return the new value.
    pub fn advance(&mut self) -> f64 {
        let eps = self.normal.sample(&mut self.rng);
        self.value += eps;
        self.tick += 1;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
