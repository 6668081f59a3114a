/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

use crate::sim::{SimulationLoop, TrajectoryConfig};

fn small_config(seed: u64) -> TrajectoryConfig {
    TrajectoryConfig {
        sigma: 0.05,
        gamma: 0.5,
        lambda: 8.0,
        v_min: 1,
        v_max: 3,
        s: 2,
        c: 1e-5,
        quote_size: 5,
        initial_mid: 1_000.0,
        initial_cash: 0.0,
        t: 200,
        seed,
    }
}

#[test]
fn replaying_the_same_seed_is_bit_for_bit_identical() {
    let a = SimulationLoop::new(small_config(7)).run().unwrap();
    let b = SimulationLoop::new(small_config(7)).run().unwrap();
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.ticks, b.ticks);
}

#[test]
fn different_seeds_generally_diverge() {
    let a = SimulationLoop::new(small_config(1)).run().unwrap();
    let b = SimulationLoop::new(small_config(2)).run().unwrap();
    assert_ne!(a.ticks, b.ticks);
}

#[test]
fn trajectory_has_one_observation_per_tick() {
    let trajectory = SimulationLoop::new(small_config(3)).run().unwrap();
    assert_eq!(trajectory.ticks.len(), 200);
    assert_eq!(trajectory.ticks.last().unwrap().t, 199);
}

#[test]
fn maker_never_observes_fundamental_directly() {
    // With zero skew, the internal mid never moves off the initial value —
    // if the maker observed S directly it would track the fundamental's
    // random walk instead of staying flat.
    let mut config = small_config(11);
    config.c = 0.0;
    let trajectory = SimulationLoop::new(config).run().unwrap();
    for tick in &trajectory.ticks {
        assert_eq!(tick.maker_mid, 1_000.0);
    }
}

#[test]
fn inventory_swings_with_nonzero_skew_and_flow() {
    let trajectory = SimulationLoop::new(small_config(4)).run().unwrap();
    // Some fills must have occurred with lambda=8 over 200 ticks.
    assert!(trajectory.summary.num_trades > 0);
}

#[test]
fn wealth_accounting_matches_cash_plus_inventory_at_mid() {
    let trajectory = SimulationLoop::new(small_config(5)).run().unwrap();
    let last = trajectory.ticks.last().unwrap();
    let expected_wealth = last.cash + last.inventory as f64 * last.maker_mid;
    assert!((last.wealth - expected_wealth).abs() < 1e-9);
}
