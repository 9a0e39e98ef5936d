//! Venue lag estimator library.
//!
//! This crate provides the types and logic used by the `venue_lag` estimator
//! binary and the `generate` feed generator:
//!
//! - `record`: the trade observation model and the sentinel-invalid rule
//! - `parser`: one CSV line to one observation, with configurable handling
//!   of the fractional-second suffix
//! - `loader`: header skip, blank/invalid filtering over a whole file
//! - `partition`: split by venue label (`"A"` versus everything else)
//! - `estimator`: nearest-in-time matching and the mean signed lag
//! - `report`: the human-readable summary lines
//! - `pipeline`: load, partition, estimate and report in one pass
//! - `synth`: synthetic labelled feeds for exercising the estimator
//!
//! The binaries in this repository (`src/main.rs` and `src/bin/generate.rs`)
//! are thin CLI wrappers around these modules.
pub mod error;
pub mod record;
pub mod parser;
pub mod loader;
pub mod partition;
pub mod estimator;
pub mod report;
pub mod pipeline;
pub mod synth;
pub mod telemetry;
