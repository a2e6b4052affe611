//! Input and output records for funnel projections.
//!
//! [`FunnelInputs`] is the snapshot a collector hands to the engine;
//! [`FunnelMetrics`] is what the engine hands back. Neither carries any
//! behaviour beyond construction and simple read-only accessors.

pub mod partial;

use serde::{Deserialize, Serialize};

pub use partial::PartialInputs;

/// Periods per year used when annualizing a per-period figure.
pub const PERIODS_PER_YEAR: f64 = 12.0;

/// Current funnel performance plus the assumptions for the alternative
/// recovery process.
///
/// Percentage fields are conventionally in `[0, 100]` but any value is
/// accepted; the engine propagates out-of-range values arithmetically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelInputs {
    /// Prospective customers per period
    #[serde(deserialize_with = "visitor_count::deserialize")]
    pub monthly_visitors: i64,
    /// % of visitors who transact today
    pub close_rate: f64,
    /// % of unsold visitors predicted to buy from a competitor
    pub buy_elsewhere_rate: f64,
    /// % of unsold visitors who currently receive outreach
    pub follow_up_rate: f64,
    /// % of outreach attempts that reach the person
    pub connect_rate: f64,
    /// % of unsold visitors reachable under the alternative process
    pub ai_reach_rate: f64,
    /// % of reached contacts who schedule a return visit
    pub appointment_rate: f64,
    /// % of scheduled return visits that occur
    pub show_rate: f64,
    /// % of occurred return visits that convert
    pub return_close_rate: f64,
    /// Profit per converted transaction
    pub gross_profit_per_deal: f64,
    /// Fixed periodic cost of the alternative process
    pub tool_cost: f64,
}

/// Visitor counts read from files may be written as floats; they are
/// truncated toward zero the same way typed counts are.
pub(crate) mod visitor_count {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Whole(i64),
        Fractional(f64),
    }

    impl RawCount {
        fn into_count(self) -> i64 {
            match self {
                RawCount::Whole(count) => count,
                // `as` saturates and maps NaN to zero
                RawCount::Fractional(value) => value.trunc() as i64,
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawCount::deserialize(deserializer).map(RawCount::into_count)
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<RawCount>::deserialize(deserializer).map(|raw| raw.map(RawCount::into_count))
    }
}

impl Default for FunnelInputs {
    fn default() -> Self {
        Self {
            monthly_visitors: 0,
            close_rate: 27.0,
            buy_elsewhere_rate: 50.0,
            follow_up_rate: 9.0,
            connect_rate: 25.0,
            ai_reach_rate: 55.0,
            appointment_rate: 55.0,
            show_rate: 55.0,
            return_close_rate: 27.0,
            gross_profit_per_deal: 0.0,
            tool_cost: 0.0,
        }
    }
}

impl FunnelInputs {
    /// All-zero record, the engine's reading of "nothing entered yet".
    pub fn zeroed() -> Self {
        Self {
            monthly_visitors: 0,
            close_rate: 0.0,
            buy_elsewhere_rate: 0.0,
            follow_up_rate: 0.0,
            connect_rate: 0.0,
            ai_reach_rate: 0.0,
            appointment_rate: 0.0,
            show_rate: 0.0,
            return_close_rate: 0.0,
            gross_profit_per_deal: 0.0,
            tool_cost: 0.0,
        }
    }
}

/// Every value derived from a [`FunnelInputs`] snapshot.
///
/// Counts are whole units; each funnel stage was rounded before feeding
/// the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelMetrics {
    pub closed_count: i64,
    pub unsold_count: i64,
    pub lost_to_competitor_count: i64,
    pub lost_gross_estimate: f64,
    pub current_outreach_count: i64,
    pub current_connect_count: i64,
    pub reached_count: i64,
    pub appointment_count: i64,
    pub showed_count: i64,
    pub recovered_sales_count: i64,
    pub recovered_gross_profit: f64,
    pub net_period_profit: f64,
    pub return_on_investment: f64,
    pub annualized_impact: f64,
}

impl FunnelMetrics {
    /// Lost gross projected over a full year.
    pub fn annual_lost_gross(&self) -> f64 {
        self.lost_gross_estimate * PERIODS_PER_YEAR
    }

    /// Whether the alternative process pays for itself this period.
    pub fn is_profitable(&self) -> bool {
        self.net_period_profit >= 0.0
    }
}

/// Lead-capture details gathered on the final wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadContact {
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub wants_more_info: bool,
}

impl LeadContact {
    /// Reports only print the contact block when one of the names is set.
    pub fn has_identity(&self) -> bool {
        !self.business_name.trim().is_empty() || !self.contact_name.trim().is_empty()
    }
}

/// A complete set of inputs plus the optional lead contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub inputs: FunnelInputs,
    #[serde(default)]
    pub contact: LeadContact,
}

impl Scenario {
    pub fn new(inputs: FunnelInputs) -> Self {
        Self {
            inputs,
            contact: LeadContact::default(),
        }
    }

    pub fn with_contact(mut self, contact: LeadContact) -> Self {
        self.contact = contact;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_match_collector_defaults() {
        let inputs = FunnelInputs::default();
        assert_eq!(inputs.monthly_visitors, 0);
        assert_eq!(inputs.close_rate, 27.0);
        assert_eq!(inputs.return_close_rate, inputs.close_rate);
        assert_eq!(inputs.buy_elsewhere_rate, 50.0);
        assert_eq!(inputs.follow_up_rate, 9.0);
        assert_eq!(inputs.connect_rate, 25.0);
        assert_eq!(inputs.tool_cost, 0.0);
    }

    #[test]
    fn test_contact_identity_ignores_whitespace() {
        let mut contact = LeadContact::default();
        assert!(!contact.has_identity());

        contact.business_name = "   ".to_string();
        assert!(!contact.has_identity());

        contact.contact_name = "Dana".to_string();
        assert!(contact.has_identity());
    }

    #[test]
    fn test_scenario_deserializes_without_contact() {
        let json = r#"{"inputs": {
            "monthly_visitors": 100, "close_rate": 27.0, "buy_elsewhere_rate": 50.0,
            "follow_up_rate": 9.0, "connect_rate": 25.0, "ai_reach_rate": 55.0,
            "appointment_rate": 55.0, "show_rate": 55.0, "return_close_rate": 27.0,
            "gross_profit_per_deal": 3000.0, "tool_cost": 1500.0
        }}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.inputs.monthly_visitors, 100);
        assert_eq!(scenario.contact, LeadContact::default());
    }

    #[test]
    fn test_fractional_visitor_count_truncates() {
        let json = r#"{
            "monthly_visitors": 100.0, "close_rate": 27.0, "buy_elsewhere_rate": 50.0,
            "follow_up_rate": 9.0, "connect_rate": 25.0, "ai_reach_rate": 55.0,
            "appointment_rate": 55.0, "show_rate": 55.0, "return_close_rate": 27.0,
            "gross_profit_per_deal": 3000.0, "tool_cost": 1500.0
        }"#;
        let inputs: FunnelInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.monthly_visitors, 100);

        let json = json.replace("100.0", "120.5");
        let inputs: FunnelInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs.monthly_visitors, 120);

        let json = json.replace("120.5", "-3.9");
        let inputs: FunnelInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs.monthly_visitors, -3);
    }
}
