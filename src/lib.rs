//! Sales-funnel recovery projections.
//!
//! Given current traffic and close rate, project how many unsold visitors a
//! recovery process would bring back and what that is worth against its cost.
//! [`metrics::compute_metrics`] is the pure core; everything else collects
//! inputs or presents results.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod wizard;

pub use crate::core::{FunnelInputs, FunnelMetrics, LeadContact, PartialInputs, Scenario};
pub use crate::errors::{Error, Result};
pub use crate::metrics::compute_metrics;
pub use crate::wizard::{WizardState, WizardStep};
