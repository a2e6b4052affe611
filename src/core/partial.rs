//! Sparse input records used for layering.
//!
//! Config defaults, scenario files and command-line flags each supply some
//! subset of the inputs. They are stacked over a base record, later layers
//! winning, before anything reaches the engine.

use serde::{Deserialize, Serialize};

use super::{FunnelInputs, LeadContact, Scenario};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialInputs {
    #[serde(deserialize_with = "super::visitor_count::option")]
    pub monthly_visitors: Option<i64>,
    pub close_rate: Option<f64>,
    pub buy_elsewhere_rate: Option<f64>,
    pub follow_up_rate: Option<f64>,
    pub connect_rate: Option<f64>,
    pub ai_reach_rate: Option<f64>,
    pub appointment_rate: Option<f64>,
    pub show_rate: Option<f64>,
    pub return_close_rate: Option<f64>,
    pub gross_profit_per_deal: Option<f64>,
    pub tool_cost: Option<f64>,
}

impl PartialInputs {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill `base` with every field this layer sets.
    pub fn overlay(&self, base: FunnelInputs) -> FunnelInputs {
        FunnelInputs {
            monthly_visitors: self.monthly_visitors.unwrap_or(base.monthly_visitors),
            close_rate: self.close_rate.unwrap_or(base.close_rate),
            buy_elsewhere_rate: self.buy_elsewhere_rate.unwrap_or(base.buy_elsewhere_rate),
            follow_up_rate: self.follow_up_rate.unwrap_or(base.follow_up_rate),
            connect_rate: self.connect_rate.unwrap_or(base.connect_rate),
            ai_reach_rate: self.ai_reach_rate.unwrap_or(base.ai_reach_rate),
            appointment_rate: self.appointment_rate.unwrap_or(base.appointment_rate),
            show_rate: self.show_rate.unwrap_or(base.show_rate),
            return_close_rate: self.return_close_rate.unwrap_or(base.return_close_rate),
            gross_profit_per_deal: self
                .gross_profit_per_deal
                .unwrap_or(base.gross_profit_per_deal),
            tool_cost: self.tool_cost.unwrap_or(base.tool_cost),
        }
    }

    /// Combine two layers; fields set in `top` take precedence.
    pub fn merge(self, top: PartialInputs) -> PartialInputs {
        PartialInputs {
            monthly_visitors: top.monthly_visitors.or(self.monthly_visitors),
            close_rate: top.close_rate.or(self.close_rate),
            buy_elsewhere_rate: top.buy_elsewhere_rate.or(self.buy_elsewhere_rate),
            follow_up_rate: top.follow_up_rate.or(self.follow_up_rate),
            connect_rate: top.connect_rate.or(self.connect_rate),
            ai_reach_rate: top.ai_reach_rate.or(self.ai_reach_rate),
            appointment_rate: top.appointment_rate.or(self.appointment_rate),
            show_rate: top.show_rate.or(self.show_rate),
            return_close_rate: top.return_close_rate.or(self.return_close_rate),
            gross_profit_per_deal: top.gross_profit_per_deal.or(self.gross_profit_per_deal),
            tool_cost: top.tool_cost.or(self.tool_cost),
        }
    }
}

/// On-disk scenario: a sparse input layer plus an optional contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub inputs: PartialInputs,
    pub contact: Option<LeadContact>,
}

impl ScenarioFile {
    pub fn resolve(&self, base: FunnelInputs) -> Scenario {
        Scenario::new(self.inputs.overlay(base))
            .with_contact(self.contact.clone().unwrap_or_default())
    }
}
