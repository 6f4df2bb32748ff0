//! # Core Module
//!
//! Stateless building blocks of the analysis: the data models for facets,
//! morphology and interaction records, the numeric statistics used by the
//! extractors and renderers, and the file readers.
//!
//! - **Data models** ([`models`]) - facets, energies, morphology surfaces and records
//! - **Statistics** ([`stats`]) - descriptive statistics, kernel density, regression
//! - **File I/O** ([`io`]) - locating, parsing and describing input files

pub mod io;
pub mod models;
pub mod stats;
