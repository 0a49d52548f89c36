/// Per-step load-following dispatch rule.
pub mod dispatch;
pub mod engine;
/// Aggregated operation statistics.
pub mod stats;
pub mod types;
