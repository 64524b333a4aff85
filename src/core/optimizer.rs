use std::collections::BTreeMap;

use super::types::{
    OptimalStrategy, OptimizerSummary, StrategyName, StrategyResult, YearNetWorthRow,
};

const ZERO_EPS: f64 = 1e-9;

/// Percentage by which `best` exceeds `other`; 0 when `other` is zero.
pub fn percent_difference(best: f64, other: f64) -> f64 {
    if other.abs() <= ZERO_EPS || !other.is_finite() || !best.is_finite() {
        return 0.0;
    }
    (best - other) / other.abs() * 100.0
}

/// Highest final net worth wins; ties go to the earliest strategy in
/// canonical order.
pub fn select_optimal(results: &BTreeMap<StrategyName, StrategyResult>) -> Option<&StrategyResult> {
    results.values().fold(None, |best: Option<&StrategyResult>, candidate| match best {
        Some(current) if candidate.final_net_worth.total_cmp(&current.final_net_worth).is_le() => {
            Some(current)
        }
        _ => Some(candidate),
    })
}

pub fn optimize(results: &BTreeMap<StrategyName, StrategyResult>) -> OptimizerSummary {
    let optimal = match select_optimal(results) {
        Some(best) => OptimalStrategy {
            name: best.name,
            description: best.description.clone(),
            net_worth_difference: results
                .values()
                .filter(|r| r.name != best.name)
                .map(|r| {
                    (
                        r.name,
                        percent_difference(best.final_net_worth, r.final_net_worth),
                    )
                })
                .collect(),
        },
        None => OptimalStrategy {
            name: StrategyName::MinimumPaymentsInvest,
            description: String::new(),
            net_worth_difference: BTreeMap::new(),
        },
    };

    let years = results
        .values()
        .map(|r| r.yearly_data.len())
        .max()
        .unwrap_or(0);
    let year_by_year = (0..years)
        .map(|idx| YearNetWorthRow {
            year: idx as u32,
            net_worth: results
                .values()
                .map(|r| {
                    let value = r
                        .yearly_data
                        .iter()
                        .find(|y| y.year == idx as u32)
                        .map(|y| y.net_worth)
                        .unwrap_or(0.0);
                    (r.name, value)
                })
                .collect(),
        })
        .collect();

    let total_interest_paid = results
        .values()
        .map(|r| (r.name, r.total_interest_paid))
        .collect();
    let total_investment_value = results
        .values()
        .map(|r| {
            (
                r.name,
                r.investment_details.last().map(|d| d.total_value).unwrap_or(0.0),
            )
        })
        .collect();

    OptimizerSummary {
        optimal,
        year_by_year,
        total_interest_paid,
        total_investment_value,
    }
}
