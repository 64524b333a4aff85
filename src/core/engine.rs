use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::info;

use super::comparison::compare_loans;
use super::config::{DEFAULT_BENCHMARK_RETURN, DEFAULT_RISK_FACTOR, EngineConfig};
use super::optimizer::optimize;
use super::recommendations::generate_recommendations;
use super::simulator::{SimulationParams, simulate_strategy};
use super::types::{Loan, Strategy, StrategyInputs, StrategyName, StrategyReport, StrategyResult};

/// The four competing policies, parameterized from the config.
pub fn strategies(config: &EngineConfig) -> [Strategy; 4] {
    [
        Strategy::MinimumPaymentsInvest,
        Strategy::DebtAvalanche,
        Strategy::Hybrid {
            threshold_rate: config.risk_adjusted_return(),
        },
        Strategy::AggressivePaydown {
            paydown_months: config.aggressive_paydown_years.saturating_mul(12),
        },
    ]
}

pub fn simulate_all(
    loans: &[Loan],
    monthly_budget: f64,
    config: &EngineConfig,
) -> BTreeMap<StrategyName, StrategyResult> {
    let params = SimulationParams {
        monthly_budget: if monthly_budget.is_finite() { monthly_budget } else { 0.0 },
        annual_return: config.benchmark_return,
        inflation_rate: config.inflation_rate,
        horizon_months: config.horizon_months(),
    };

    strategies(config)
        .par_iter()
        .map(|&strategy| (strategy.name(), simulate_strategy(strategy, loans, &params)))
        .collect()
}

/// Budget left after the minimum payments of every open loan.
pub fn monthly_surplus(loans: &[Loan], monthly_budget: f64) -> f64 {
    let minimums: f64 = loans
        .iter()
        .filter(|l| l.balance > 0.0)
        .map(|l| l.minimum_payment.max(0.0))
        .sum();
    let surplus = monthly_budget - minimums;
    if surplus.is_finite() { surplus.max(0.0) } else { 0.0 }
}

/// Folds caller-supplied rates into the config, falling back to defaults for
/// values outside their domain.
pub fn resolve_config(inputs: &StrategyInputs, base: &EngineConfig) -> EngineConfig {
    let mut config = base.clone();
    config.benchmark_return = if inputs.annual_return.is_finite() {
        inputs.annual_return
    } else {
        DEFAULT_BENCHMARK_RETURN
    };
    config.risk_factor = if inputs.risk_factor.is_finite() && inputs.risk_factor > 0.0 {
        inputs.risk_factor.min(1.0)
    } else {
        DEFAULT_RISK_FACTOR
    };
    if inputs.inflation_rate.is_finite() {
        config.inflation_rate = inputs.inflation_rate;
    }
    config
}

pub fn compute_strategies(inputs: &StrategyInputs, base: &EngineConfig) -> StrategyReport {
    let config = resolve_config(inputs, base);
    let surplus = monthly_surplus(&inputs.loans, inputs.monthly_budget);

    info!(
        loans = inputs.loans.len(),
        monthly_budget = inputs.monthly_budget,
        surplus,
        benchmark_return = config.benchmark_return,
        risk_factor = config.risk_factor,
        "computing strategies"
    );

    let (strategies, loan_comparisons) = rayon::join(
        || simulate_all(&inputs.loans, inputs.monthly_budget, &config),
        || compare_loans(&inputs.loans, surplus, &config),
    );

    let summary = optimize(&strategies);
    let recommendations = generate_recommendations(
        &inputs.loans,
        inputs.monthly_budget,
        &strategies,
        &summary.optimal,
        &loan_comparisons,
        &config.thresholds,
    );

    info!(optimal = %summary.optimal.name, "strategies computed");

    StrategyReport {
        strategies,
        optimal: summary.optimal,
        year_by_year: summary.year_by_year,
        total_interest_paid: summary.total_interest_paid,
        total_investment_value: summary.total_investment_value,
        loan_comparisons,
        recommendations,
    }
}
