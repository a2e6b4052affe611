//! Step catalogue for the guided input flow.
//!
//! The order and grouping of fields here is the only place the collector's
//! layout is defined; state and session code read from it.

use crate::core::FunnelInputs;

use super::coercion::{coerce_amount, coerce_count, coerce_rate};

/// Ordered steps of the guided flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Baseline,
    UnsoldDestination,
    CurrentFollowUp,
    AiRecovery,
    Financials,
    Results,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Baseline,
        WizardStep::UnsoldDestination,
        WizardStep::CurrentFollowUp,
        WizardStep::AiRecovery,
        WizardStep::Financials,
        WizardStep::Results,
    ];

    /// Total number of steps.
    pub const COUNT: usize = Self::ALL.len();

    /// 1-based position of this step.
    pub fn number(self) -> usize {
        match self {
            Self::Baseline => 1,
            Self::UnsoldDestination => 2,
            Self::CurrentFollowUp => 3,
            Self::AiRecovery => 4,
            Self::Financials => 5,
            Self::Results => 6,
        }
    }

    /// Step at a 1-based position.
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Baseline => "Your Business",
            Self::UnsoldDestination => "Unsold Destination",
            Self::CurrentFollowUp => "Current Follow-Up",
            Self::AiRecovery => "AI Recovery",
            Self::Financials => "Financials",
            Self::Results => "Results",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Baseline => "Start with your current traffic and performance",
            Self::UnsoldDestination => "Where do the customers you didn't sell end up?",
            Self::CurrentFollowUp => "How much of your unsold traffic gets a follow-up today?",
            Self::AiRecovery => "What if every unsold visitor got a call?",
            Self::Financials => "Your actual gross profit and process cost",
            Self::Results => "Here's what your numbers reveal",
        }
    }

    /// Numeric inputs edited on this step.
    pub fn fields(self) -> &'static [InputField] {
        match self {
            Self::Baseline => &[
                InputField::MonthlyVisitors,
                InputField::CloseRate,
                InputField::GrossProfitPerDeal,
            ],
            Self::UnsoldDestination => &[InputField::BuyElsewhereRate],
            Self::CurrentFollowUp => &[InputField::FollowUpRate, InputField::ConnectRate],
            Self::AiRecovery => &[
                InputField::AiReachRate,
                InputField::AppointmentRate,
                InputField::ShowRate,
                InputField::ReturnCloseRate,
            ],
            Self::Financials => &[InputField::GrossProfitPerDeal, InputField::ToolCost],
            Self::Results => &[],
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// How a field is entered and displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole units, integer coercion
    Count,
    /// Percentage slider
    Percent { min: f64, max: f64, step: f64 },
    /// Money, integer coercion
    Currency,
}

/// A numeric field of [`FunnelInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    MonthlyVisitors,
    CloseRate,
    BuyElsewhereRate,
    FollowUpRate,
    ConnectRate,
    AiReachRate,
    AppointmentRate,
    ShowRate,
    ReturnCloseRate,
    GrossProfitPerDeal,
    ToolCost,
}

const FINE_SLIDER: FieldKind = FieldKind::Percent {
    min: 0.0,
    max: 100.0,
    step: 1.0,
};

const COARSE_SLIDER: FieldKind = FieldKind::Percent {
    min: 0.0,
    max: 100.0,
    step: 5.0,
};

impl InputField {
    pub fn label(self) -> &'static str {
        match self {
            Self::MonthlyVisitors => "Monthly visitors",
            Self::CloseRate => "Current close rate",
            Self::BuyElsewhereRate => "Unsold who buy elsewhere within 90 days",
            Self::FollowUpRate => "Unsold who get a follow-up call within 48 hours",
            Self::ConnectRate => "Follow-up calls that connect",
            Self::AiReachRate => "AI reach rate",
            Self::AppointmentRate => "Appointment rate",
            Self::ShowRate => "Show rate",
            Self::ReturnCloseRate => "Return close rate",
            Self::GrossProfitPerDeal => "Gross profit per deal",
            Self::ToolCost => "Monthly tool cost",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::MonthlyVisitors => "Total customers who physically visit each month",
            Self::CloseRate => "Industry average is 20-25%. Top performers hit 30%+",
            Self::BuyElsewhereRate => {
                "Most visitors buy within 90 days. The only question is where."
            }
            Self::FollowUpRate => "Be honest, this is your model. Most stores are under 30%.",
            Self::ConnectRate => "Share of attempted calls that actually reach the customer",
            Self::AiReachRate => {
                "Calling at optimal times with voicemail and text follow-up reaches 70-75%"
            }
            Self::AppointmentRate => {
                "These are be-backs who already visited. A normal schedule rate is 50-55%."
            }
            Self::ShowRate => "They agreed to come back, so expect no less than 50-55%",
            Self::ReturnCloseRate => {
                "They came back to buy, not browse. Apply the same or higher close rate."
            }
            Self::GrossProfitPerDeal => "Combined front-end and back-end gross profit per unit",
            Self::ToolCost => "Monthly investment for the recovery process",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::MonthlyVisitors => FieldKind::Count,
            Self::BuyElsewhereRate | Self::FollowUpRate => COARSE_SLIDER,
            Self::CloseRate
            | Self::ConnectRate
            | Self::AiReachRate
            | Self::AppointmentRate
            | Self::ShowRate
            | Self::ReturnCloseRate => FINE_SLIDER,
            Self::GrossProfitPerDeal | Self::ToolCost => FieldKind::Currency,
        }
    }

    /// Current value of this field as a float.
    pub fn read(self, inputs: &FunnelInputs) -> f64 {
        match self {
            Self::MonthlyVisitors => inputs.monthly_visitors as f64,
            Self::CloseRate => inputs.close_rate,
            Self::BuyElsewhereRate => inputs.buy_elsewhere_rate,
            Self::FollowUpRate => inputs.follow_up_rate,
            Self::ConnectRate => inputs.connect_rate,
            Self::AiReachRate => inputs.ai_reach_rate,
            Self::AppointmentRate => inputs.appointment_rate,
            Self::ShowRate => inputs.show_rate,
            Self::ReturnCloseRate => inputs.return_close_rate,
            Self::GrossProfitPerDeal => inputs.gross_profit_per_deal,
            Self::ToolCost => inputs.tool_cost,
        }
    }

    /// Coerce raw text the way this field's input widget would.
    pub fn coerce(self, raw: &str) -> FieldValue {
        match self.kind() {
            FieldKind::Count => FieldValue::Count(coerce_count(raw)),
            FieldKind::Percent { .. } => FieldValue::Rate(coerce_rate(raw)),
            FieldKind::Currency => FieldValue::Amount(coerce_amount(raw)),
        }
    }
}

/// A coerced value ready to be stored in a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Count(i64),
    Rate(f64),
    Amount(f64),
}

impl FieldValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Count(n) => n as f64,
            Self::Rate(v) | Self::Amount(v) => v,
        }
    }

    pub fn as_count(self) -> i64 {
        match self {
            Self::Count(n) => n,
            Self::Rate(v) | Self::Amount(v) => v as i64,
        }
    }
}

/// Text fields captured on the results step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    BusinessName,
    ContactName,
    Email,
    Phone,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [
        ContactField::BusinessName,
        ContactField::ContactName,
        ContactField::Email,
        ContactField::Phone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::BusinessName => "Business name",
            Self::ContactName => "Your name",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}
