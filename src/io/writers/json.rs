use crate::core::{FunnelInputs, FunnelMetrics, LeadContact, Scenario};
use crate::io::output::ReportWriter;
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    inputs: &'a FunnelInputs,
    metrics: &'a FunnelMetrics,
    annual_lost_gross: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<&'a LeadContact>,
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, scenario: &Scenario, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        let report = JsonReport {
            inputs: &scenario.inputs,
            metrics,
            annual_lost_gross: metrics.annual_lost_gross(),
            contact: scenario
                .contact
                .has_identity()
                .then_some(&scenario.contact),
        };
        let json = serde_json::to_string_pretty(&report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}
