//! Data models shared by the loading, aggregation and plotting layers.

pub mod energy;
pub mod facet;
pub mod morphology;
pub mod record;
