//! Guided, step-by-step collection of funnel inputs.
//!
//! [`WizardState`] holds the record being edited and the current step.
//! [`run_session`] drives it interactively; every edit recomputes metrics
//! from scratch through the engine.

pub mod coercion;
pub mod session;
pub mod state;
pub mod steps;

pub use coercion::{coerce_amount, coerce_count, coerce_rate};
pub use session::run_session;
pub use state::{FieldUpdate, Progress, WizardState};
pub use steps::{ContactField, FieldKind, FieldValue, InputField, WizardStep};
