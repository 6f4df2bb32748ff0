//! # SSIM Core Library
//!
//! Analysis of surface-surface interaction energies between crystal facets:
//! locating simulation output, weighting each facet pair by its collision
//! probability from the crystal morphology, aggregating the results and
//! rendering them.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (facets, energy
//!   components, interaction records), descriptive statistics and the file
//!   readers for morphology and interaction tables.
//!
//! - **[`engine`]: The Pipeline.** Dataset configuration, the collision
//!   probability table, per-file loading with an explicit load report, the
//!   aggregated [`InteractionDataset`](engine::dataset::InteractionDataset)
//!   and cohesion/adhesion extraction.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that run a
//!   complete analysis or cohesion/adhesion comparison.
//!
//! - **[`plots`]: Presentation.** Stateless renderers drawing aggregated data
//!   onto any `plotters` backend, with SVG file output.

pub mod core;
pub mod engine;
pub mod plots;
pub mod workflows;
