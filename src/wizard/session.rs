//! Line-oriented driver for the guided flow.
//!
//! Works over any `BufRead`/`Write` pair so the same code serves a real
//! terminal and scripted tests.

use crate::formatting::{
    format_count, format_currency, format_percent, format_ratio, OutputFormatter,
};
use anyhow::Result;
use std::io::{BufRead, Write};

use super::state::{FieldUpdate, WizardState};
use super::steps::{ContactField, FieldKind, InputField, WizardStep};

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Keep,
    Value(String),
    Back,
    Restart,
    EndOfInput,
}

impl Entry {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Self::Keep,
            "back" => Self::Back,
            "restart" => Self::Restart,
            _ => Self::Value(trimmed.to_string()),
        }
    }
}

/// What the session should do after a step is handled.
enum Flow {
    Advance,
    Redraw,
    Finish,
}

struct Session<'a, R, W> {
    reader: R,
    writer: W,
    formatter: &'a dyn OutputFormatter,
}

/// Walk the user through every step, starting from `state`.
///
/// Returns the state as it stood when the last step completed or the
/// input ran out.
pub fn run_session<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    state: WizardState,
    formatter: &dyn OutputFormatter,
) -> Result<WizardState> {
    let mut session = Session {
        reader,
        writer,
        formatter,
    };
    session.run(state)
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(&mut self, mut state: WizardState) -> Result<WizardState> {
        writeln!(
            self.writer,
            "{}",
            self.formatter
                .dim("Press Enter to keep a value. Type 'back' or 'restart' at any prompt.")
        )?;

        loop {
            self.print_header(&state)?;
            let flow = if state.step().is_last() {
                self.results_step(&mut state)?
            } else {
                self.input_step(&mut state)?
            };

            match flow {
                Flow::Advance => {
                    state.next();
                }
                Flow::Redraw => {}
                Flow::Finish => break,
            }
        }

        log::debug!("Collector finished at step {}", state.step().number());
        Ok(state)
    }

    fn read_entry(&mut self) -> Result<Entry> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Entry::EndOfInput);
        }
        Ok(Entry::parse(&line))
    }

    /// Shared handling of navigation commands. `None` means the entry is data.
    fn navigate(&mut self, entry: &Entry, state: &mut WizardState) -> Result<Option<Flow>> {
        match entry {
            Entry::EndOfInput => Ok(Some(Flow::Finish)),
            Entry::Restart => {
                state.restart();
                Ok(Some(Flow::Redraw))
            }
            Entry::Back => {
                if !state.back() {
                    writeln!(self.writer, "Already at the first step.")?;
                }
                Ok(Some(Flow::Redraw))
            }
            Entry::Keep | Entry::Value(_) => Ok(None),
        }
    }

    fn print_header(&mut self, state: &WizardState) -> Result<()> {
        let progress = state.progress();
        let done = progress.completed();
        let bar: String = (1..=progress.total)
            .map(|n| {
                if n <= done {
                    self.formatter.emoji("●", "#")
                } else if n == progress.current {
                    self.formatter.emoji("◉", "@")
                } else {
                    self.formatter.emoji("○", "-")
                }
            })
            .collect();

        let step = state.step();
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {}",
            bar,
            self.formatter.header(&format!(
                "Step {} of {}: {}",
                progress.current,
                progress.total,
                step.title()
            ))
        )?;
        writeln!(self.writer, "{}", step.prompt())?;
        Ok(())
    }

    fn input_step(&mut self, state: &mut WizardState) -> Result<Flow> {
        let step = state.step();
        for &field in step.fields() {
            writeln!(self.writer, "  {}", self.formatter.dim(field.help()))?;
            write!(
                self.writer,
                "{} [{}]: ",
                field.label(),
                display_value(field, field.read(state.inputs()))
            )?;
            self.writer.flush()?;

            let entry = self.read_entry()?;
            if let Some(flow) = self.navigate(&entry, state)? {
                return Ok(flow);
            }
            if let Entry::Value(raw) = entry {
                state.apply(FieldUpdate::Input(field, field.coerce(&raw)));
            }
        }

        self.print_preview(step, state)?;
        Ok(Flow::Advance)
    }

    fn print_preview(&mut self, step: WizardStep, state: &WizardState) -> Result<()> {
        let inputs = *state.inputs();
        let metrics = state.metrics();

        let lines = match step {
            WizardStep::Baseline => vec![format!(
                "Unsold each month: {} of {} visitors",
                format_count(metrics.unsold_count),
                format_count(inputs.monthly_visitors)
            )],
            WizardStep::UnsoldDestination => vec![format!(
                "Lost to competitors: {} customers, {}/month ({}/year)",
                format_count(metrics.lost_to_competitor_count),
                self.formatter.error(&format_currency(metrics.lost_gross_estimate)),
                format_currency(metrics.annual_lost_gross())
            )],
            WizardStep::CurrentFollowUp => vec![format!(
                "Follow-up calls attempted: {} of {} unsold, {} connected",
                format_count(metrics.current_outreach_count),
                format_count(metrics.unsold_count),
                format_count(metrics.current_connect_count)
            )],
            WizardStep::AiRecovery => {
                let mut lines = vec![format!(
                    "Recovery funnel: {} unsold -> {} reached -> {} appointments -> {} showed -> {} sales",
                    format_count(metrics.unsold_count),
                    format_count(metrics.reached_count),
                    format_count(metrics.appointment_count),
                    format_count(metrics.showed_count),
                    format_count(metrics.recovered_sales_count)
                )];
                if inputs.return_close_rate >= inputs.close_rate {
                    lines.push(format!(
                        "Return close rate of {} is at or above your floor close rate of {}.",
                        format_percent(inputs.return_close_rate),
                        format_percent(inputs.close_rate)
                    ));
                }
                lines
            }
            WizardStep::Financials => vec![format!(
                "Net monthly profit: {} (ROI {})",
                self.formatter.money(metrics.net_period_profit),
                format_ratio(metrics.return_on_investment)
            )],
            WizardStep::Results => Vec::new(),
        };

        for line in lines {
            writeln!(self.writer, "{} {}", self.formatter.emoji("→", ">"), line)?;
        }
        Ok(())
    }

    fn results_step(&mut self, state: &mut WizardState) -> Result<Flow> {
        let metrics = state.metrics();
        writeln!(
            self.writer,
            "Additional sales: {} | Additional gross: {} | Net: {} | ROI: {} | Annual: {}",
            format_count(metrics.recovered_sales_count),
            format_currency(metrics.recovered_gross_profit),
            self.formatter.money(metrics.net_period_profit),
            format_ratio(metrics.return_on_investment),
            self.formatter.money(metrics.annualized_impact)
        )?;
        writeln!(self.writer, "Get your personalized report:")?;

        for field in ContactField::ALL {
            write!(
                self.writer,
                "{} [{}]: ",
                field.label(),
                state.contact_value(field)
            )?;
            self.writer.flush()?;

            let entry = self.read_entry()?;
            if let Some(flow) = self.navigate(&entry, state)? {
                return Ok(flow);
            }
            if let Entry::Value(text) = entry {
                state.apply(FieldUpdate::Contact(field, text));
            }
        }

        let current = if state.contact().wants_more_info {
            "y"
        } else {
            "n"
        };
        write!(
            self.writer,
            "Send me more information about this process (y/n) [{current}]: "
        )?;
        self.writer.flush()?;

        let entry = self.read_entry()?;
        if let Some(flow) = self.navigate(&entry, state)? {
            return Ok(flow);
        }
        if let Entry::Value(answer) = entry {
            let wants = matches!(answer.to_lowercase().as_str(), "y" | "yes");
            state.apply(FieldUpdate::WantsMoreInfo(wants));
        }

        Ok(Flow::Finish)
    }
}

fn display_value(field: InputField, value: f64) -> String {
    match field.kind() {
        FieldKind::Count => format_count(value as i64),
        FieldKind::Percent { .. } => format_percent(value),
        FieldKind::Currency => format_currency(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FunnelInputs;
    use crate::formatting::PlainFormatter;
    use indoc::indoc;
    use std::io::Cursor;

    fn run(script: &str) -> (WizardState, String) {
        let mut output = Vec::new();
        let state = run_session(
            Cursor::new(script.as_bytes()),
            &mut output,
            WizardState::default(),
            &PlainFormatter,
        )
        .unwrap();
        (state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_full_walkthrough() {
        // Steps 2-4 and the step 5 gross field keep their values.
        let script = indoc! {"
            100
            27
            3000








            1500
            Acme Motors
            Dana

            555-0100
            yes
        "};
        let (state, output) = run(script);

        let metrics = state.metrics();
        assert_eq!(metrics.recovered_sales_count, 3);
        assert_eq!(metrics.net_period_profit, 7500.0);
        assert_eq!(state.step(), WizardStep::Results);
        assert_eq!(state.contact().business_name, "Acme Motors");
        assert_eq!(state.contact().email, "");
        assert_eq!(state.contact().phone, "555-0100");
        assert!(state.contact().wants_more_info);

        assert!(output.contains("Step 1 of 6: Your Business"));
        assert!(output.contains("Step 6 of 6: Results"));
        assert!(output.contains("Lost to competitors: 37 customers, $111,000/month ($1,332,000/year)"));
        assert!(output.contains("Follow-up calls attempted: 7 of 73 unsold, 2 connected"));
        assert!(output.contains("73 unsold -> 40 reached -> 22 appointments -> 12 showed -> 3 sales"));
        assert!(output.contains("Net monthly profit: $7,500 (ROI 6.0x)"));
    }

    #[test]
    fn test_end_of_input_keeps_partial_state() {
        let (state, output) = run("250\n");

        assert_eq!(state.inputs().monthly_visitors, 250);
        assert_eq!(state.step(), WizardStep::Baseline);
        assert!(output.contains("Monthly visitors [0]: "));
    }

    #[test]
    fn test_back_returns_to_previous_step() {
        let script = "100\n\n\nback\n\n40\n\n";
        let (state, output) = run(script);

        assert_eq!(state.inputs().close_rate, 40.0);
        assert_eq!(state.inputs().return_close_rate, 40.0);
        assert_eq!(state.step(), WizardStep::UnsoldDestination);
        assert!(output.contains("Monthly visitors [100]: "));
    }

    #[test]
    fn test_progress_bar_marks_completed_steps() {
        let (_, output) = run("100\n\n\n\n\n");
        assert!(output.contains("@----- Step 1 of 6: Your Business"));
        assert!(output.contains("#@---- Step 2 of 6: Unsold Destination"));
        assert!(output.contains("##@--- Step 3 of 6: Current Follow-Up"));
    }

    #[test]
    fn test_back_on_first_step_stays() {
        let (state, output) = run("back\n");
        assert_eq!(state.step(), WizardStep::Baseline);
        assert!(output.contains("Already at the first step."));
    }

    #[test]
    fn test_restart_discards_edits() {
        let (state, _) = run("500\n10\nrestart\n");
        assert_eq!(*state.inputs(), FunnelInputs::default());
        assert_eq!(state.step(), WizardStep::Baseline);
    }

    #[test]
    fn test_unparsable_entries_coerce_to_zero() {
        let (state, _) = run("lots\n12abc\n3.7\n");
        assert_eq!(state.inputs().monthly_visitors, 0);
        assert_eq!(state.inputs().close_rate, 12.0);
        assert_eq!(state.inputs().gross_profit_per_deal, 3.0);
    }

    #[test]
    fn test_return_close_note_when_not_lower() {
        let (_, output) = run("100\n\n\n\n\n\n\n\n\n\n");
        assert!(output.contains("Return close rate of 27% is at or above your floor close rate of 27%."));

        let (_, output) = run("100\n\n\n\n\n\n\n\n\n10\n");
        assert!(!output.contains("at or above your floor close rate"));
    }

    #[test]
    fn test_entry_parse() {
        assert_eq!(Entry::parse("  \n"), Entry::Keep);
        assert_eq!(Entry::parse("BACK\n"), Entry::Back);
        assert_eq!(Entry::parse(" Restart "), Entry::Restart);
        assert_eq!(Entry::parse(" 42 \n"), Entry::Value("42".to_string()));
    }
}
