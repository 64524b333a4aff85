use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type LoanId = u64;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanType {
    Mortgage,
    MortgageBond,
    HomeLoan,
    Student,
    Auto,
    CreditCard,
    Personal,
    #[default]
    Other,
}

impl LoanType {
    pub fn is_mortgage(self) -> bool {
        matches!(
            self,
            LoanType::Mortgage | LoanType::MortgageBond | LoanType::HomeLoan
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub name: String,
    pub balance: f64,
    /// Annual rate in percent, e.g. `5.8`.
    pub interest_rate: f64,
    #[serde(default)]
    pub term_years: f64,
    pub minimum_payment: f64,
    #[serde(default)]
    pub loan_type: Option<LoanType>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub priority: Option<u32>,
}

impl Loan {
    pub fn new(
        id: LoanId,
        name: impl Into<String>,
        balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            interest_rate,
            term_years: 0.0,
            minimum_payment,
            loan_type: None,
            country_code: None,
            priority: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffDetail {
    pub payoff_time_months: u32,
    pub payoff_time_years: f64,
    pub total_interest_paid: f64,
    pub total_paid: f64,
    pub monthly_payment: f64,
    pub original_loan_amount: f64,
    /// False when the payment never retires the balance; months and interest
    /// then hold the non-convergence sentinel or the simulation cap.
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyData {
    pub year: u32,
    pub investment_value: f64,
    pub loan_balance: f64,
    pub net_worth: f64,
    pub inflation_adjusted_net_worth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDetail {
    pub year: u32,
    pub amount: f64,
    pub total_value: f64,
}

/// Canonical strategy identity; the declaration order is also the tie-break
/// order when two strategies end on the same net worth.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum StrategyName {
    #[serde(rename = "Minimum Payments + Invest")]
    MinimumPaymentsInvest,
    #[serde(rename = "Debt Avalanche")]
    DebtAvalanche,
    #[serde(rename = "Hybrid Approach")]
    Hybrid,
    #[serde(rename = "5-Year Aggressive Paydown")]
    AggressivePaydown,
}

impl StrategyName {
    pub const ALL: [StrategyName; 4] = [
        StrategyName::MinimumPaymentsInvest,
        StrategyName::DebtAvalanche,
        StrategyName::Hybrid,
        StrategyName::AggressivePaydown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StrategyName::MinimumPaymentsInvest => "Minimum Payments + Invest",
            StrategyName::DebtAvalanche => "Debt Avalanche",
            StrategyName::Hybrid => "Hybrid Approach",
            StrategyName::AggressivePaydown => "5-Year Aggressive Paydown",
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An allocation policy together with the parameters it needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    MinimumPaymentsInvest,
    DebtAvalanche,
    /// Surplus goes only to loans whose annual rate exceeds `threshold_rate`.
    Hybrid { threshold_rate: f64 },
    /// Avalanche for the first `paydown_months`, then invest everything.
    AggressivePaydown { paydown_months: u32 },
}

impl Strategy {
    pub fn name(self) -> StrategyName {
        match self {
            Strategy::MinimumPaymentsInvest => StrategyName::MinimumPaymentsInvest,
            Strategy::DebtAvalanche => StrategyName::DebtAvalanche,
            Strategy::Hybrid { .. } => StrategyName::Hybrid,
            Strategy::AggressivePaydown { .. } => StrategyName::AggressivePaydown,
        }
    }

    pub fn description(self) -> String {
        match self {
            Strategy::MinimumPaymentsInvest => {
                "Pay only the minimum required payments on all loans and invest the rest."
                    .to_string()
            }
            Strategy::DebtAvalanche => {
                "Pay the minimum on all loans and put any extra money toward the highest \
                 interest loan first. Once it is paid off, move to the next highest \
                 interest loan. Invest only after all loans are paid off."
                    .to_string()
            }
            Strategy::Hybrid { threshold_rate } => format!(
                "Pay off only loans with interest rates above the risk-adjusted market return \
                 ({threshold_rate:.2}%), and invest the rest."
            ),
            Strategy::AggressivePaydown { paydown_months } => format!(
                "Aggressively pay down all loans for the first {} years (highest interest first), \
                 then invest all extra money.",
                paydown_months / 12
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub name: StrategyName,
    pub description: String,
    pub yearly_data: Vec<YearlyData>,
    pub final_net_worth: f64,
    pub total_interest_paid: f64,
    pub loan_payoff_details: BTreeMap<LoanId, PayoffDetail>,
    pub investment_details: Vec<InvestmentDetail>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationTier {
    DefinitelyPay,
    ProbablyPay,
    InvestInstead,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTermComparison {
    pub horizon_years: u32,
    pub investing_only_net_worth: f64,
    pub accelerated_strategy_net_worth: f64,
    pub paying_down_is_better: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStrategyComparison {
    pub loan_id: LoanId,
    pub loan_name: String,
    pub interest_rate: f64,
    pub effective_interest_rate: f64,
    pub baseline_payoff: PayoffDetail,
    pub accelerated_payoff: PayoffDetail,
    pub extra_monthly_payment: f64,
    pub months_saved: u32,
    pub interest_saved: f64,
    pub potential_investment_growth: f64,
    pub risk_adjusted_growth: f64,
    pub long_term_investment_growth: f64,
    pub net_advantage: f64,
    pub paying_down_is_better: bool,
    pub tier: RecommendationTier,
    pub full_term_comparison: FullTermComparison,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalStrategy {
    pub name: StrategyName,
    pub description: String,
    /// Percentage by which the optimal strategy beats each other strategy.
    pub net_worth_difference: BTreeMap<StrategyName, f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearNetWorthRow {
    pub year: u32,
    pub net_worth: BTreeMap<StrategyName, f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerSummary {
    pub optimal: OptimalStrategy,
    pub year_by_year: Vec<YearNetWorthRow>,
    pub total_interest_paid: BTreeMap<StrategyName, f64>,
    pub total_investment_value: BTreeMap<StrategyName, f64>,
}

/// Caller-supplied snapshot the whole engine runs over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInputs {
    pub loans: Vec<Loan>,
    pub monthly_budget: f64,
    /// Benchmark annual return in percent.
    pub annual_return: f64,
    pub inflation_rate: f64,
    pub risk_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub strategies: BTreeMap<StrategyName, StrategyResult>,
    pub optimal: OptimalStrategy,
    pub year_by_year: Vec<YearNetWorthRow>,
    pub total_interest_paid: BTreeMap<StrategyName, f64>,
    pub total_investment_value: BTreeMap<StrategyName, f64>,
    pub loan_comparisons: Vec<LoanStrategyComparison>,
    pub recommendations: Vec<Recommendation>,
}
