//! Kong Metrics API: a thin HTTP layer that turns simple queries into PromQL,
//! runs them against Prometheus and reshapes the answers.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
