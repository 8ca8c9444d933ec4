//! Scoring components that sit after the feature analyzers.

pub mod risk_aggregator;

pub use risk_aggregator::{Classification, RiskAggregator, RiskVerdict};
