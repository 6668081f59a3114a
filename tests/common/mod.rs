/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
******************************************************************************/

//! Shared test setup. Not a test module itself (`tests/common/mod.rs` rather
//! than `tests/common.rs` keeps `cargo test` from treating it as its own
//! integration-test binary).

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize a `tracing-subscriber` `fmt` layer gated by `RUST_LOG`, once
/// per test binary. Tests run with no output by default; set `RUST_LOG` to
/// see the engine's `trace!`/`debug!` events and the simulation loop's
/// `info!` lifecycle lines.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
