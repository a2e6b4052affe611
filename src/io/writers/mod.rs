pub mod html;
pub mod json;
pub mod markdown;
pub mod terminal;

pub use html::HtmlWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::core::{FunnelInputs, FunnelMetrics};

/// One row of the recovery funnel as every writer presents it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStage {
    pub label: &'static str,
    pub rate: Option<f64>,
    pub count: i64,
}

/// Unsold base followed by the four chained recovery stages.
pub fn recovery_funnel(inputs: &FunnelInputs, metrics: &FunnelMetrics) -> Vec<FunnelStage> {
    vec![
        FunnelStage {
            label: "Unsold customers",
            rate: None,
            count: metrics.unsold_count,
        },
        FunnelStage {
            label: "AI reached",
            rate: Some(inputs.ai_reach_rate),
            count: metrics.reached_count,
        },
        FunnelStage {
            label: "Appointments booked",
            rate: Some(inputs.appointment_rate),
            count: metrics.appointment_count,
        },
        FunnelStage {
            label: "Showed up",
            rate: Some(inputs.show_rate),
            count: metrics.showed_count,
        },
        FunnelStage {
            label: "Additional sales",
            rate: Some(inputs.return_close_rate),
            count: metrics.recovered_sales_count,
        },
    ]
}
