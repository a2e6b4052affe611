//! Printable, self-contained HTML report.

use crate::core::{FunnelMetrics, Scenario};
use crate::formatting::{format_count, format_currency, format_percent, format_ratio};
use crate::io::output::{ReportOptions, ReportWriter};
use anyhow::Result;
use html_escape::encode_text;
use std::collections::HashMap;
use std::io::Write;

use super::markdown::or_not_available;
use super::recovery_funnel;

pub struct HtmlWriter<W: Write> {
    writer: W,
    template: &'static str,
    options: ReportOptions,
}

impl<W: Write> HtmlWriter<W> {
    pub fn new(writer: W, options: ReportOptions) -> Self {
        Self {
            writer,
            template: include_str!("templates/report.html"),
            options,
        }
    }

    fn render_html(&self, scenario: &Scenario, metrics: &FunnelMetrics) -> String {
        let inputs = &scenario.inputs;

        let input_cards = [
            ("Monthly Visitors", format_count(inputs.monthly_visitors)),
            ("Current Close Rate", format_percent(inputs.close_rate)),
            ("Buy Elsewhere", format_percent(inputs.buy_elsewhere_rate)),
            ("Gross Profit/Deal", format_currency(inputs.gross_profit_per_deal)),
        ];
        let result_cards = [
            (
                "Additional Units/Month",
                format_count(metrics.recovered_sales_count),
            ),
            (
                "Additional Gross",
                format_currency(metrics.recovered_gross_profit),
            ),
            ("Tool Cost", format_currency(inputs.tool_cost)),
            ("Annual Impact", format_currency(metrics.annualized_impact)),
        ];

        let funnel_rows = recovery_funnel(inputs, metrics)
            .into_iter()
            .map(|stage| {
                let label = match stage.rate {
                    Some(rate) => format!("{} ({})", stage.label, format_percent(rate)),
                    None => stage.label.to_string(),
                };
                format!(
                    "    <div class=\"funnel-step\"><span>{}</span><span>{}</span></div>",
                    encode_text(&label),
                    format_count(stage.count)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let generated_on = self.options.generated_on.format("%Y-%m-%d").to_string();
        let values: HashMap<&str, String> = HashMap::from([
            ("TITLE", encode_text(&self.options.title).into_owned()),
            ("HERO_AMOUNT", format_currency(metrics.recovered_gross_profit)),
            ("ROI", format_ratio(metrics.return_on_investment)),
            ("ANNUAL", format_currency(metrics.annualized_impact)),
            ("INPUT_CARDS", render_cards(&input_cards)),
            ("FUNNEL_ROWS", funnel_rows),
            ("NET_PROFIT", format_currency(metrics.net_period_profit)),
            ("RESULT_CARDS", render_cards(&result_cards)),
            ("CONTACT_SECTION", render_contact(scenario)),
            ("TAGLINE", encode_text(&self.options.tagline).into_owned()),
            ("GENERATED_ON", generated_on),
        ]);

        fill_template(self.template, &values)
    }
}

impl<W: Write> ReportWriter for HtmlWriter<W> {
    fn write_report(&mut self, scenario: &Scenario, metrics: &FunnelMetrics) -> Result<()> {
        let html = self.render_html(scenario, metrics);
        write!(self.writer, "{}", html)?;
        Ok(())
    }
}

fn render_cards(cards: &[(&str, String)]) -> String {
    cards
        .iter()
        .map(|(title, value)| {
            format!(
                "    <div class=\"card\"><h3>{}</h3><div class=\"value\">{}</div></div>",
                encode_text(title),
                encode_text(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_contact(scenario: &Scenario) -> String {
    let contact = &scenario.contact;
    if !contact.has_identity() {
        return String::new();
    }

    let lines = [
        ("Business", contact.business_name.as_str()),
        ("Contact", contact.contact_name.as_str()),
        ("Email", contact.email.as_str()),
        ("Phone", contact.phone.as_str()),
    ]
    .iter()
    .map(|(label, value)| {
        format!(
            "    <p><strong>{label}:</strong> {}</p>",
            encode_text(or_not_available(value))
        )
    })
    .collect::<Vec<_>>()
    .join("\n");

    format!("\n  <h2>Contact Information</h2>\n  <div class=\"card\">\n{lines}\n  </div>\n")
}

/// Substitute `{{{KEY}}}` markers in one pass, so substituted text is never
/// itself scanned for markers. Unknown keys are left as-is.
fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut output = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        match after.find("}}}") {
            Some(end) => {
                let key = &after[..end];
                match values.get(key) {
                    Some(value) => output.push_str(value),
                    None => {
                        output.push_str("{{{");
                        output.push_str(key);
                        output.push_str("}}}");
                    }
                }
                rest = &after[end + 3..];
            }
            None => {
                output.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}
