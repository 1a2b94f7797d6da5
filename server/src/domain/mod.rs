//! Kong metrics domain logic

pub mod catalog;
pub mod latency;

pub use catalog::{MetricList, list_metrics};
pub use latency::{LatencyParams, LatencyRecord, LatencyReport, latency};
