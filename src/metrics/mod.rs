//! The metrics engine.
//!
//! Pure functions that turn a [`FunnelInputs`](crate::core::FunnelInputs)
//! snapshot into a [`FunnelMetrics`](crate::core::FunnelMetrics) record:
//!
//! - **Deterministic**: identical input always yields bit-identical output
//! - **Total**: no `Result`, no panics, whatever the numbers
//! - **Stateless**: nothing is cached between calls, so the engine can be
//!   called from any number of threads without coordination
//!
//! # Example
//!
//! ```rust
//! use funnel_roi::core::FunnelInputs;
//! use funnel_roi::metrics::compute_metrics;
//!
//! let inputs = FunnelInputs {
//!     monthly_visitors: 100,
//!     gross_profit_per_deal: 3000.0,
//!     tool_cost: 1500.0,
//!     ..FunnelInputs::default()
//! };
//!
//! let metrics = compute_metrics(&inputs);
//! assert_eq!(metrics.unsold_count, 73);
//! assert_eq!(metrics.recovered_sales_count, 3);
//! assert_eq!(metrics.return_on_investment, 6.0);
//! ```

pub mod engine;
pub mod rounding;

pub use engine::{apply_rate, compute_metrics, return_on_investment};
pub use rounding::{round_half_up, to_count};
