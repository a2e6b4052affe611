use crate::core::{FunnelMetrics, Scenario};
use crate::formatting::{format_count, format_currency, format_percent, format_ratio};
use crate::io::output::{ReportOptions, ReportWriter};
use std::io::Write;

use super::recovery_funnel;

pub struct MarkdownWriter<W: Write> {
    writer: W,
    options: ReportOptions,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, options: ReportOptions) -> Self {
        Self { writer, options }
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_report(&mut self, scenario: &Scenario, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &Scenario, &FunnelMetrics) -> anyhow::Result<()>> = vec![
            |w, _, m| w.write_header(m),
            |w, s, _| w.write_inputs(s),
            |w, s, m| w.write_current_process(s, m),
            |w, s, m| w.write_funnel(s, m),
            |w, s, m| w.write_financial_impact(s, m),
            |w, s, _| w.write_contact(s),
            |w, _, _| w.write_footer(),
        ];

        writers
            .iter()
            .try_for_each(|writer| writer(self, scenario, metrics))
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", escape_markdown(&self.options.title))?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            self.options.generated_on.format("%Y-%m-%d")
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "**Your monthly opportunity: {}** additional gross profit | {} ROI | {}/year",
            format_currency(metrics.recovered_gross_profit),
            format_ratio(metrics.return_on_investment),
            format_currency(metrics.annualized_impact)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_inputs(&mut self, scenario: &Scenario) -> anyhow::Result<()> {
        let inputs = &scenario.inputs;
        writeln!(self.writer, "## Your Inputs")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Input | Value |")?;
        writeln!(self.writer, "|-------|-------|")?;
        let rows = [
            ("Monthly visitors", format_count(inputs.monthly_visitors)),
            ("Current close rate", format_percent(inputs.close_rate)),
            ("Buy elsewhere", format_percent(inputs.buy_elsewhere_rate)),
            ("Current follow-up", format_percent(inputs.follow_up_rate)),
            ("Gross profit per deal", format_currency(inputs.gross_profit_per_deal)),
            ("Tool cost", format_currency(inputs.tool_cost)),
        ];
        for (label, value) in rows {
            writeln!(self.writer, "| {label} | {value} |")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_current_process(
        &mut self,
        scenario: &Scenario,
        metrics: &FunnelMetrics,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## Where Unsold Customers Go Today")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "- {} of {} unsold customers will buy from a competitor ({})",
            format_count(metrics.lost_to_competitor_count),
            format_count(metrics.unsold_count),
            format_percent(scenario.inputs.buy_elsewhere_rate)
        )?;
        writeln!(
            self.writer,
            "- Estimated lost gross: {}/mo, {}/year",
            format_currency(metrics.lost_gross_estimate),
            format_currency(metrics.annual_lost_gross())
        )?;
        writeln!(
            self.writer,
            "- Follow-up calls attempted: {} ({} connected)",
            format_count(metrics.current_outreach_count),
            format_count(metrics.current_connect_count)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_funnel(&mut self, scenario: &Scenario, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "## AI Recovery Funnel")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Stage | Rate | Customers |")?;
        writeln!(self.writer, "|-------|------|-----------|")?;
        for stage in recovery_funnel(&scenario.inputs, metrics) {
            let rate = stage.rate.map(format_percent).unwrap_or_else(|| "-".into());
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                stage.label,
                rate,
                format_count(stage.count)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_financial_impact(
        &mut self,
        scenario: &Scenario,
        metrics: &FunnelMetrics,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## Financial Impact")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| | Do Nothing | With AI Agent |")?;
        writeln!(self.writer, "|---|---|---|")?;
        writeln!(
            self.writer,
            "| Recovered sales | 0 | {} |",
            format_count(metrics.recovered_sales_count)
        )?;
        writeln!(
            self.writer,
            "| Additional gross | $0 | {} |",
            format_currency(metrics.recovered_gross_profit)
        )?;
        writeln!(
            self.writer,
            "| Tool cost | $0 | {} |",
            format_currency(scenario.inputs.tool_cost)
        )?;
        writeln!(
            self.writer,
            "| Net monthly profit | $0 | {} |",
            format_currency(metrics.net_period_profit)
        )?;
        writeln!(
            self.writer,
            "| Annual impact | $0 | {} |",
            format_currency(metrics.annualized_impact)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_contact(&mut self, scenario: &Scenario) -> anyhow::Result<()> {
        let contact = &scenario.contact;
        if !contact.has_identity() {
            return Ok(());
        }

        writeln!(self.writer, "## Contact Information")?;
        writeln!(self.writer)?;
        for (label, value) in [
            ("Business", &contact.business_name),
            ("Contact", &contact.contact_name),
            ("Email", &contact.email),
            ("Phone", &contact.phone),
        ] {
            writeln!(
                self.writer,
                "- **{label}:** {}",
                escape_markdown(or_not_available(value))
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_footer(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "_{}_", escape_markdown(&self.options.tagline))?;
        Ok(())
    }
}

/// Backslash-escape characters that would start emphasis, links, HTML or
/// table cells when user text lands in a report.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '#' | '~') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub(crate) fn or_not_available(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}
