//! Collector state: the current step plus the record being edited.
//!
//! This is the only mutable state in the crate. The engine never sees it
//! directly; [`WizardState::metrics`] hands it a copy of the inputs.

use crate::core::{FunnelInputs, FunnelMetrics, LeadContact, Scenario};
use crate::metrics::compute_metrics;

use super::steps::{ContactField, FieldValue, InputField, WizardStep};

/// An edit to apply to the collector state.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Input(InputField, FieldValue),
    Contact(ContactField, String),
    WantsMoreInfo(bool),
}

/// Snapshot of where the user is in the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub titles: Vec<&'static str>,
}

impl Progress {
    /// Steps strictly before the current one.
    pub fn completed(&self) -> usize {
        self.current.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    step: WizardStep,
    inputs: FunnelInputs,
    contact: LeadContact,
    defaults: FunnelInputs,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(FunnelInputs::default())
    }
}

impl WizardState {
    /// Start at the first step with `defaults` as the initial record.
    ///
    /// `restart` returns to these same defaults.
    pub fn new(defaults: FunnelInputs) -> Self {
        Self {
            step: WizardStep::Baseline,
            inputs: defaults,
            contact: LeadContact::default(),
            defaults,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn inputs(&self) -> &FunnelInputs {
        &self.inputs
    }

    pub fn contact(&self) -> &LeadContact {
        &self.contact
    }

    /// Recompute metrics from the current inputs.
    pub fn metrics(&self) -> FunnelMetrics {
        compute_metrics(&self.inputs)
    }

    pub fn scenario(&self) -> Scenario {
        Scenario::new(self.inputs).with_contact(self.contact.clone())
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.step.number(),
            total: WizardStep::COUNT,
            titles: WizardStep::ALL.iter().map(|s| s.title()).collect(),
        }
    }

    /// Advance one step; stays put on the last step. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Go back one step; stays put on the first step. Returns whether it moved.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Return to the first step with default inputs and no contact.
    pub fn restart(&mut self) {
        log::debug!("Restarting collector at step 1 with default inputs");
        *self = Self::new(self.defaults);
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Input(field, value) => self.set_input(field, value),
            FieldUpdate::Contact(field, text) => self.set_contact(field, text),
            FieldUpdate::WantsMoreInfo(wants) => self.contact.wants_more_info = wants,
        }
    }

    fn set_input(&mut self, field: InputField, value: FieldValue) {
        let inputs = &mut self.inputs;
        match field {
            InputField::MonthlyVisitors => inputs.monthly_visitors = value.as_count(),
            InputField::CloseRate => {
                // The return-close rate tracks the close rate until edited itself.
                inputs.close_rate = value.as_f64();
                inputs.return_close_rate = value.as_f64();
            }
            InputField::BuyElsewhereRate => inputs.buy_elsewhere_rate = value.as_f64(),
            InputField::FollowUpRate => inputs.follow_up_rate = value.as_f64(),
            InputField::ConnectRate => inputs.connect_rate = value.as_f64(),
            InputField::AiReachRate => inputs.ai_reach_rate = value.as_f64(),
            InputField::AppointmentRate => inputs.appointment_rate = value.as_f64(),
            InputField::ShowRate => inputs.show_rate = value.as_f64(),
            InputField::ReturnCloseRate => inputs.return_close_rate = value.as_f64(),
            InputField::GrossProfitPerDeal => inputs.gross_profit_per_deal = value.as_f64(),
            InputField::ToolCost => inputs.tool_cost = value.as_f64(),
        }
    }

    fn set_contact(&mut self, field: ContactField, text: String) {
        let contact = &mut self.contact;
        match field {
            ContactField::BusinessName => contact.business_name = text,
            ContactField::ContactName => contact.contact_name = text,
            ContactField::Email => contact.email = text,
            ContactField::Phone => contact.phone = text,
        }
    }

    /// Text value for a contact field.
    pub fn contact_value(&self, field: ContactField) -> &str {
        match field {
            ContactField::BusinessName => &self.contact.business_name,
            ContactField::ContactName => &self.contact.contact_name,
            ContactField::Email => &self.contact.email,
            ContactField::Phone => &self.contact.phone,
        }
    }
}
