pub mod router;

pub use router::{Router, RouterBuilder, RouterMetrics, RouterMetricsSnapshot, Rule};
