//! Readers for the files written by the surface-surface interaction tool.
//!
//! Morphology tables and interaction tables are CSV; the facet pair and
//! crystallite sizes of an interaction table come either from its file name
//! ([`filename`]) or from a declared TOML manifest ([`manifest`]).

pub mod filename;
pub mod interaction;
pub mod locator;
pub mod manifest;
pub mod morphology;
