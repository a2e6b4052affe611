use crate::core::{FunnelMetrics, Scenario};
use crate::formatting::{
    format_count, format_currency, format_percent, format_ratio, format_thousands, formatter_for,
    FormattingConfig, OutputFormatter,
};
use crate::io::output::{ReportOptions, ReportWriter};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

use super::markdown::or_not_available;
use super::recovery_funnel;

pub struct TerminalWriter<W: Write> {
    writer: W,
    options: ReportOptions,
    formatting: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, options: ReportOptions, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            options,
            formatting,
            formatter: formatter_for(formatting),
        }
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        if self.formatting.emoji.should_use_emoji() {
            table.load_preset(UTF8_FULL);
        } else {
            table.load_preset(ASCII_FULL);
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, scenario: &Scenario, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        let printers: Vec<fn(&mut Self, &Scenario, &FunnelMetrics) -> anyhow::Result<()>> = vec![
            |w, _, m| w.print_hero(m),
            |w, s, _| w.print_scenario_summary(s),
            |w, s, m| w.print_current_process(s, m),
            |w, s, m| w.print_funnel(s, m),
            |w, _, m| w.print_comparison(m),
            |w, s, _| w.print_contact(s),
        ];

        printers
            .iter()
            .try_for_each(|printer| printer(self, scenario, metrics))?;

        writeln!(self.writer, "{}", self.formatter.dim(&self.options.tagline))?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_hero(&mut self, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        let title = self.formatter.header(&self.options.title);
        writeln!(self.writer, "{title}")?;
        writeln!(self.writer, "{}", "=".repeat(self.options.title.chars().count()))?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{} Your Monthly Opportunity: {} net profit after tool cost",
            self.formatter.emoji("🏆", "*"),
            self.formatter.money(metrics.net_period_profit)
        )?;
        writeln!(
            self.writer,
            "   Extra units: {} | ROI: {} | Annual: {}",
            self.formatter.bold(&format_count(metrics.recovered_sales_count)),
            self.formatter.bold(&format_ratio(metrics.return_on_investment)),
            self.formatter.bold(&format_thousands(metrics.annualized_impact))
        )?;
        if !metrics.is_profitable() {
            writeln!(
                self.writer,
                "   {}",
                self.formatter
                    .error("Tool cost exceeds recovered gross profit at these numbers")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_scenario_summary(&mut self, scenario: &Scenario) -> anyhow::Result<()> {
        let inputs = &scenario.inputs;
        writeln!(self.writer, "{}", self.formatter.header("Scenario Summary"))?;
        for (label, value) in [
            ("Monthly visitors", format_count(inputs.monthly_visitors)),
            ("Close rate", format_percent(inputs.close_rate)),
            ("AI reach", format_percent(inputs.ai_reach_rate)),
            ("Gross/deal", format_currency(inputs.gross_profit_per_deal)),
        ] {
            writeln!(self.writer, "  {label:<18} {value}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_current_process(
        &mut self,
        scenario: &Scenario,
        metrics: &FunnelMetrics,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("Today"))?;
        writeln!(
            self.writer,
            "  {} of {} unsold customers will buy from a competitor ({})",
            self.formatter.error(&format_count(metrics.lost_to_competitor_count)),
            format_count(metrics.unsold_count),
            format_percent(scenario.inputs.buy_elsewhere_rate)
        )?;
        writeln!(
            self.writer,
            "  Estimated lost gross: {}/mo ({}/year)",
            self.formatter.error(&format_currency(metrics.lost_gross_estimate)),
            format_currency(metrics.annual_lost_gross())
        )?;
        writeln!(
            self.writer,
            "  Follow-up calls attempted: {} of {} unsold, {} connected",
            format_count(metrics.current_outreach_count),
            format_count(metrics.unsold_count),
            format_count(metrics.current_connect_count)
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_funnel(&mut self, scenario: &Scenario, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("Recovery Funnel"))?;

        let mut table = self.new_table();
        table.set_header(vec!["Stage", "Rate", "Customers"]);
        for stage in recovery_funnel(&scenario.inputs, metrics) {
            table.add_row(vec![
                Cell::new(stage.label),
                Cell::new(stage.rate.map(format_percent).unwrap_or_default())
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_count(stage.count)).set_alignment(CellAlignment::Right),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_comparison(&mut self, metrics: &FunnelMetrics) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("Side-by-Side Comparison"))?;

        let mut table = self.new_table();
        table.set_header(vec!["", "Do Nothing", "With AI Agent"]);
        table.add_row(vec![
            Cell::new("Recovered sales"),
            Cell::new("0").set_alignment(CellAlignment::Right),
            Cell::new(format_count(metrics.recovered_sales_count))
                .set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("Net profit"),
            Cell::new("$0").set_alignment(CellAlignment::Right),
            Cell::new(format_currency(metrics.net_period_profit))
                .set_alignment(CellAlignment::Right),
        ]);
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_contact(&mut self, scenario: &Scenario) -> anyhow::Result<()> {
        let contact = &scenario.contact;
        if !contact.has_identity() {
            return Ok(());
        }
        writeln!(self.writer, "{}", self.formatter.header("Contact"))?;
        writeln!(self.writer, "  Business: {}", or_not_available(&contact.business_name))?;
        writeln!(self.writer, "  Contact:  {}", or_not_available(&contact.contact_name))?;
        writeln!(self.writer, "  Email:    {}", or_not_available(&contact.email))?;
        writeln!(self.writer, "  Phone:    {}", or_not_available(&contact.phone))?;
        if contact.wants_more_info {
            writeln!(self.writer, "  Requested more information")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FunnelInputs;
    use crate::metrics::compute_metrics;

    fn render(scenario: &Scenario) -> String {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer, ReportOptions::default(), FormattingConfig::plain())
            .write_report(scenario, &compute_metrics(&scenario.inputs))
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_terminal_plain_report() {
        let scenario = Scenario::new(FunnelInputs {
            monthly_visitors: 100,
            gross_profit_per_deal: 3000.0,
            tool_cost: 1500.0,
            ..FunnelInputs::default()
        });
        let text = render(&scenario);

        assert!(text.contains("Your Monthly Opportunity: $7,500 net profit"));
        assert!(text.contains("Extra units: 3 | ROI: 6.0x | Annual: $90K"));
        assert!(text.contains("Appointments booked"));
        assert!(text.contains("Follow-up calls attempted: 7 of 73 unsold, 2 connected"));
        assert!(!text.contains('\u{1b}'), "plain output must not contain escapes");
    }

    #[test]
    fn test_terminal_shows_loss() {
        let scenario = Scenario::new(FunnelInputs {
            monthly_visitors: 100,
            gross_profit_per_deal: 1000.0,
            tool_cost: 5000.0,
            ..FunnelInputs::default()
        });
        let text = render(&scenario);
        assert!(text.contains("-$2,000 net profit"));
        assert!(text.contains("Tool cost exceeds recovered gross profit at these numbers"));
    }

    #[test]
    fn test_terminal_profitable_has_no_loss_note() {
        let scenario = Scenario::new(FunnelInputs {
            monthly_visitors: 100,
            gross_profit_per_deal: 3000.0,
            tool_cost: 1500.0,
            ..FunnelInputs::default()
        });
        assert!(!render(&scenario).contains("Tool cost exceeds"));
    }
}
