//! # Pricer Models (L2: Business Logic)
//!
//! FX hedging instruments and their closed-form valuation.
//!
//! This crate provides:
//! - Instrument definitions (forwards, swaps, vanilla, barrier and digital options)
//! - Effective volatility resolution shared by every pricer
//! - Garman–Kohlhagen, single-barrier and double-barrier closed forms
//!
//! ## Design Principles
//!
//! - **Closed tagged enumeration** of instrument kinds with exhaustive matching
//! - **Pure functions** over validated inputs; no shared mutable state
//! - **Builder pattern** for ergonomic instrument construction

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
