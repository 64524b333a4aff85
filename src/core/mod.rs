mod amortization;
mod calc_mode;
mod comparison;
mod config;
mod engine;
mod growth;
mod optimizer;
mod recommendations;
mod simulator;
mod tax;
mod types;

pub use amortization::{
    AmortizationEntry, AmortizationSchedule, ExtraPaymentImpact, NON_CONVERGENT_MONTHS,
    NON_CONVERGENT_YEARS, PayoffTime, amortization_schedule, extra_payment_impact, monthly_payment,
    payoff_detail, payoff_time, remaining_balance, total_interest,
};
pub use calc_mode::{CalculationMode, LoanTermsEditor};
pub use comparison::{compare_loan, compare_loans, extra_payments, recommendation_tier};
pub use config::{
    COMPARISON_YEARS, DEFAULT_BENCHMARK_RETURN, DEFAULT_INFLATION_RATE, DEFAULT_RISK_FACTOR,
    EngineConfig, MAX_SIMULATION_MONTHS, RecommendationThresholds, SurplusAllocation,
};
pub use engine::{compute_strategies, monthly_surplus, resolve_config, simulate_all, strategies};
pub use growth::{
    InvestmentProjection, ProjectionPoint, future_value, investment_growth, projection,
};
pub use optimizer::{optimize, percent_difference, select_optimal};
pub use recommendations::generate_recommendations;
pub use simulator::{SimulationParams, simulate_strategy};
pub use tax::{TaxDeduction, effective_rate, interest_cost_multiplier, tax_deduction};
pub use types::{
    FullTermComparison, InvestmentDetail, Loan, LoanId, LoanStrategyComparison, LoanType,
    OptimalStrategy, OptimizerSummary, PayoffDetail, Priority, Recommendation, RecommendationTier,
    Strategy, StrategyInputs, StrategyName, StrategyReport, StrategyResult, YearNetWorthRow,
    YearlyData,
};
