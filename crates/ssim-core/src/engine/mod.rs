//! # Engine Module
//!
//! The stateful part of the pipeline: it turns located files into an
//! aggregated interaction dataset and extracts per-facet statistics from it.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Dataset sources and the unmatched file policy
//! - **Morphology** ([`morphology`]) - Collision probability table from morphology files
//! - **Loading** ([`loader`]) - File metadata resolution and per-file energy derivation
//! - **Aggregation** ([`dataset`]) - The unified table and its views, plus the load report
//! - **Cohesion/adhesion** ([`cab`]) - Per-probe adhesion and cohesion summaries
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine error taxonomy

pub mod cab;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod morphology;
pub mod progress;
