//! # Random Number Generation Infrastructure
//!
//! Seedable pseudo-random number generation for the Monte Carlo pricers.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded, and batch streams are
//!   derived deterministically from one base seed
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::for_stream(12345, 3);
//! let mut draws = vec![0.0; 8];
//! rng.fill_normal(&mut draws);
//! ```

mod prng;

pub use prng::PricerRng;
