//! Single forward pass from inputs to derived metrics.
//!
//! Every funnel stage is rounded before it becomes the base of the next
//! stage, so rounding error compounds forward. Totals depend on this.

use crate::core::{FunnelInputs, FunnelMetrics, PERIODS_PER_YEAR};

use super::rounding::{round_half_up, to_count};

/// Apply a percentage to a whole-unit base and round to a whole unit.
pub fn apply_rate(base: i64, rate_percent: f64) -> i64 {
    to_count(round_half_up(base as f64 * (rate_percent / 100.0)))
}

/// Gross profit per unit of tool cost; zero when there is no positive cost.
pub fn return_on_investment(recovered_gross_profit: f64, tool_cost: f64) -> f64 {
    if tool_cost > 0.0 {
        recovered_gross_profit / tool_cost
    } else {
        0.0
    }
}

/// Derive every output metric from `inputs`.
///
/// Never fails. Negative or >100 percentages simply flow through the
/// arithmetic.
pub fn compute_metrics(inputs: &FunnelInputs) -> FunnelMetrics {
    let closed_count = apply_rate(inputs.monthly_visitors, inputs.close_rate);
    let unsold_count = inputs.monthly_visitors.saturating_sub(closed_count);

    // Current process: each rate reads the unsold base directly, except
    // connections which follow from outreach.
    let lost_to_competitor_count = apply_rate(unsold_count, inputs.buy_elsewhere_rate);
    let current_outreach_count = apply_rate(unsold_count, inputs.follow_up_rate);
    let current_connect_count = apply_rate(current_outreach_count, inputs.connect_rate);

    // Alternative process: strictly chained.
    let reached_count = apply_rate(unsold_count, inputs.ai_reach_rate);
    let appointment_count = apply_rate(reached_count, inputs.appointment_rate);
    let showed_count = apply_rate(appointment_count, inputs.show_rate);
    let recovered_sales_count = apply_rate(showed_count, inputs.return_close_rate);

    let lost_gross_estimate = lost_to_competitor_count as f64 * inputs.gross_profit_per_deal;
    let recovered_gross_profit = recovered_sales_count as f64 * inputs.gross_profit_per_deal;
    let net_period_profit = recovered_gross_profit - inputs.tool_cost;

    FunnelMetrics {
        closed_count,
        unsold_count,
        lost_to_competitor_count,
        lost_gross_estimate,
        current_outreach_count,
        current_connect_count,
        reached_count,
        appointment_count,
        showed_count,
        recovered_sales_count,
        recovered_gross_profit,
        net_period_profit,
        return_on_investment: return_on_investment(recovered_gross_profit, inputs.tool_cost),
        annualized_impact: net_period_profit * PERIODS_PER_YEAR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline() -> FunnelInputs {
        FunnelInputs {
            monthly_visitors: 100,
            gross_profit_per_deal: 3000.0,
            tool_cost: 1500.0,
            ..FunnelInputs::default()
        }
    }

    #[test]
    fn test_full_pipeline_with_defaults() {
        let metrics = compute_metrics(&baseline());

        assert_eq!(
            metrics,
            FunnelMetrics {
                closed_count: 27,
                unsold_count: 73,
                lost_to_competitor_count: 37,
                lost_gross_estimate: 111_000.0,
                current_outreach_count: 7,
                current_connect_count: 2,
                reached_count: 40,
                appointment_count: 22,
                showed_count: 12,
                recovered_sales_count: 3,
                recovered_gross_profit: 9000.0,
                net_period_profit: 7500.0,
                return_on_investment: 6.0,
                annualized_impact: 90_000.0,
            }
        );
    }

    #[test]
    fn test_current_branch_reads_unsold_not_each_other() {
        let inputs = FunnelInputs {
            monthly_visitors: 200,
            close_rate: 0.0,
            buy_elsewhere_rate: 10.0,
            follow_up_rate: 50.0,
            connect_rate: 50.0,
            ..FunnelInputs::zeroed()
        };
        let metrics = compute_metrics(&inputs);

        assert_eq!(metrics.unsold_count, 200);
        assert_eq!(metrics.lost_to_competitor_count, 20);
        assert_eq!(metrics.current_outreach_count, 100);
        assert_eq!(metrics.current_connect_count, 50);
    }

    #[test]
    fn test_per_stage_rounding_compounds() {
        // Deferred rounding would give round(73 * .55^3 * .27) = round(1.79) = 2.
        let metrics = compute_metrics(&baseline());
        assert_eq!(metrics.recovered_sales_count, 3);
    }

    #[test]
    fn test_zero_tool_cost_roi_is_zero() {
        let inputs = FunnelInputs {
            tool_cost: 0.0,
            ..baseline()
        };
        let metrics = compute_metrics(&inputs);

        assert_eq!(metrics.recovered_gross_profit, 9000.0);
        assert_eq!(metrics.return_on_investment, 0.0);
        assert_eq!(metrics.net_period_profit, 9000.0);
    }

    #[test]
    fn test_negative_tool_cost_roi_is_zero() {
        assert_eq!(return_on_investment(9000.0, -100.0), 0.0);
    }

    #[test]
    fn test_loss_when_tool_cost_exceeds_recovery() {
        let inputs = FunnelInputs {
            tool_cost: 12_000.0,
            ..baseline()
        };
        let metrics = compute_metrics(&inputs);

        assert_eq!(metrics.net_period_profit, -3000.0);
        assert_eq!(metrics.annualized_impact, -36_000.0);
        assert_eq!(metrics.return_on_investment, 0.75);
        assert!(!metrics.is_profitable());
    }

    #[test]
    fn test_out_of_range_rates_propagate() {
        let inputs = FunnelInputs {
            monthly_visitors: 100,
            close_rate: 150.0,
            ..FunnelInputs::zeroed()
        };
        let metrics = compute_metrics(&inputs);

        assert_eq!(metrics.closed_count, 150);
        assert_eq!(metrics.unsold_count, -50);
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        let inputs = FunnelInputs {
            monthly_visitors: i64::MIN,
            close_rate: -100.0,
            ai_reach_rate: f64::NAN,
            gross_profit_per_deal: f64::INFINITY,
            ..FunnelInputs::default()
        };
        let metrics = compute_metrics(&inputs);

        assert_eq!(metrics.reached_count, 0);
        assert_eq!(metrics.recovered_sales_count, 0);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        assert_eq!(apply_rate(73, 50.0), 37);
        assert_eq!(apply_rate(73, 55.0), 40);
        assert_eq!(apply_rate(0, 55.0), 0);
    }
}
