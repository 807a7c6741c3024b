//! Monte Carlo pricing on a shared GBM path simulator.
//!
//! # Architecture
//!
//! ```text
//! simulate[_monitored]()    (paths.rs: batching, seeding, cancellation)
//! ├── price_barrier_mc()    (barrier.rs: fallback for closed forms)
//! ├── price_digital_mc()    (digital.rs: primary method for digitals)
//! └── price_vanilla_mc()    (vanilla.rs: closed-form validation)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_models::instruments::DigitalKind;
//! use pricer_pricing::mc::{price_digital_mc, DigitalPayoff, GbmParams, MonteCarloConfig};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(1_008)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let params = GbmParams::new(1.085, 0.01, 0.005, 0.10, 1.0);
//! let payoff = DigitalPayoff::new(DigitalKind::OneTouch, 1.15, None, 0.05).unwrap();
//!
//! let est = price_digital_mc(&payoff, &params, &config, None).unwrap();
//! assert!(est.price > 0.0 && est.price < 0.05);
//! ```

mod barrier;
mod cancel;
mod config;
mod digital;
mod error;
mod paths;
mod vanilla;

pub use barrier::{price_barrier_mc, BarrierPayoff};
pub use cancel::CancellationToken;
pub use config::{
    steps_for_expiry, MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, MAX_PATHS,
    MAX_STEPS,
};
pub use digital::{price_digital_mc, DigitalPayoff};
pub use error::ConfigError;
pub use paths::{
    simulate, simulate_monitored, GbmParams, McEstimate, PathSummary, RangeMonitor, RangeVisits,
};
pub use vanilla::price_vanilla_mc;
