//! # Workflows Module
//!
//! End-to-end entry points tying the [`engine`](crate::engine) and
//! [`core`](crate::core) layers together.
//!
//! - **Analysis** ([`analyse`]) - Locate, load and aggregate one dataset
//! - **Cohesion/adhesion** ([`cab`]) - Compare a probe dataset against an excipient
//!   dataset and fit the balance line

pub mod analyse;
pub mod cab;
