use std::collections::BTreeMap;

use tracing::debug;

use super::amortization::monthly_rate;
use super::types::{
    InvestmentDetail, Loan, LoanId, PayoffDetail, Strategy, StrategyResult, YearlyData,
};

const SETTLED_BALANCE: f64 = 0.01;

/// Everything a strategy run needs besides the loans themselves.
#[derive(Debug, Clone, Copy)]
pub struct SimulationParams {
    pub monthly_budget: f64,
    /// Benchmark annual return in percent.
    pub annual_return: f64,
    pub inflation_rate: f64,
    pub horizon_months: u32,
}

#[derive(Debug, Clone)]
struct LoanState {
    id: LoanId,
    annual_rate: f64,
    monthly_rate: f64,
    minimum_payment: f64,
    original_balance: f64,
    balance: f64,
    interest_paid: f64,
    paid_off_month: Option<u32>,
}

impl LoanState {
    fn from_loan(loan: &Loan) -> Self {
        let balance = finite_or_zero(loan.balance).max(0.0);
        let annual_rate = finite_or_zero(loan.interest_rate);
        Self {
            id: loan.id,
            annual_rate,
            monthly_rate: monthly_rate(annual_rate),
            minimum_payment: finite_or_zero(loan.minimum_payment).max(0.0),
            original_balance: balance,
            balance,
            interest_paid: 0.0,
            paid_off_month: (balance == 0.0).then_some(0),
        }
    }

    fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    fn settle(&mut self, month: u32) {
        if self.balance < SETTLED_BALANCE {
            self.balance = 0.0;
            if self.paid_off_month.is_none() {
                self.paid_off_month = Some(month);
            }
        }
    }
}

/// Simulation state between two month ticks. Ticks consume the state and
/// return the next one, so no two strategies can ever share a working copy.
#[derive(Debug, Clone)]
struct SimState {
    loans: Vec<LoanState>,
    investment: f64,
    total_interest: f64,
    contributed_this_year: f64,
}

impl SimState {
    fn new(loans: &[Loan]) -> Self {
        Self {
            loans: loans.iter().map(LoanState::from_loan).collect(),
            investment: 0.0,
            total_interest: 0.0,
            contributed_this_year: 0.0,
        }
    }

    fn total_debt(&self) -> f64 {
        self.loans.iter().map(|l| l.balance).sum()
    }

    /// Advances one calendar month; `month` is zero-based.
    fn tick(mut self, month: u32, strategy: Strategy, params: &SimulationParams) -> Self {
        let elapsed = month + 1;

        let mut minimums_paid = 0.0;
        for loan in self.loans.iter_mut().filter(|l| l.is_open()) {
            let interest = loan.balance * loan.monthly_rate;
            loan.interest_paid += interest;
            self.total_interest += interest;

            let owed = loan.balance + interest;
            let payment = loan.minimum_payment.min(owed);
            loan.balance = (owed - payment).max(0.0);
            minimums_paid += payment;
            loan.settle(elapsed);
        }

        let surplus = (params.monthly_budget - minimums_paid).max(0.0);
        let invested = allocate_surplus(&mut self.loans, surplus, strategy, month, elapsed);

        self.investment = (self.investment + invested) * (1.0 + monthly_rate(params.annual_return));
        self.contributed_this_year += invested;
        self
    }

    fn snapshot(&self, year: u32, params: &SimulationParams) -> YearlyData {
        let loan_balance = self.total_debt();
        let net_worth = self.investment - loan_balance;
        let deflator = (1.0 + params.inflation_rate / 100.0).powi(year as i32);
        YearlyData {
            year,
            investment_value: self.investment,
            loan_balance,
            net_worth,
            inflation_adjusted_net_worth: if deflator > 0.0 && deflator.is_finite() {
                net_worth / deflator
            } else {
                net_worth
            },
        }
    }
}

/// Loans eligible for extra payment, highest rate first; equal rates keep
/// input order.
fn payoff_order(loans: &[LoanState], eligible: impl Fn(&LoanState) -> bool) -> Vec<usize> {
    let mut order = loans
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_open() && eligible(l))
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        loans[b]
            .annual_rate
            .total_cmp(&loans[a].annual_rate)
            .then(a.cmp(&b))
    });
    order
}

/// Applies the month's surplus per the strategy and returns what is left to invest.
fn allocate_surplus(
    loans: &mut [LoanState],
    surplus: f64,
    strategy: Strategy,
    month: u32,
    elapsed: u32,
) -> f64 {
    let targets = match strategy {
        Strategy::MinimumPaymentsInvest => Vec::new(),
        Strategy::DebtAvalanche => payoff_order(loans, |_| true),
        Strategy::Hybrid { threshold_rate } => {
            payoff_order(loans, |l| l.annual_rate > threshold_rate)
        }
        Strategy::AggressivePaydown { paydown_months } => {
            if month < paydown_months {
                payoff_order(loans, |_| true)
            } else {
                Vec::new()
            }
        }
    };

    let mut remaining = surplus;
    for idx in targets {
        if remaining <= 0.0 {
            break;
        }
        let loan = &mut loans[idx];
        let payment = remaining.min(loan.balance);
        loan.balance -= payment;
        remaining -= payment;
        loan.settle(elapsed);
    }
    remaining.max(0.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub fn simulate_strategy(
    strategy: Strategy,
    loans: &[Loan],
    params: &SimulationParams,
) -> StrategyResult {
    let years = params.horizon_months / 12;
    let mut yearly_data = Vec::with_capacity(years as usize + 1);
    let mut investment_details = Vec::with_capacity(years as usize);

    let mut state = SimState::new(loans);
    yearly_data.push(state.snapshot(0, params));

    for month in 0..years * 12 {
        state = state.tick(month, strategy, params);

        if (month + 1) % 12 == 0 {
            let year = (month + 1) / 12;
            yearly_data.push(state.snapshot(year, params));
            investment_details.push(InvestmentDetail {
                year,
                amount: state.contributed_this_year,
                total_value: state.investment,
            });
            state.contributed_this_year = 0.0;
        }
    }

    let horizon = years * 12;
    let loan_payoff_details = state
        .loans
        .iter()
        .map(|loan| {
            let months = loan.paid_off_month.unwrap_or(horizon);
            (
                loan.id,
                PayoffDetail {
                    payoff_time_months: months,
                    payoff_time_years: months as f64 / 12.0,
                    total_interest_paid: loan.interest_paid,
                    total_paid: loan.original_balance + loan.interest_paid - loan.balance,
                    monthly_payment: loan.minimum_payment,
                    original_loan_amount: loan.original_balance,
                    converged: loan.paid_off_month.is_some(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    let final_net_worth = yearly_data.last().map(|y| y.net_worth).unwrap_or(0.0);

    debug!(
        strategy = %strategy.name(),
        final_net_worth,
        total_interest = state.total_interest,
        "strategy simulated"
    );

    StrategyResult {
        name: strategy.name(),
        description: strategy.description(),
        yearly_data,
        final_net_worth,
        total_interest_paid: state.total_interest,
        loan_payoff_details,
        investment_details,
    }
}
