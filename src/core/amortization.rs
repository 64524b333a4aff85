use serde::Serialize;

use super::types::PayoffDetail;

/// Reported payoff horizon when a payment never retires the balance.
pub const NON_CONVERGENT_YEARS: u32 = 99;
pub const NON_CONVERGENT_MONTHS: u32 = NON_CONVERGENT_YEARS * 12;

const SETTLED_BALANCE: f64 = 0.01;

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffTime {
    pub months: u32,
    pub years: f64,
    #[serde(skip)]
    pub exact_months: f64,
    pub converged: bool,
}

impl PayoffTime {
    fn settled() -> Self {
        Self {
            months: 0,
            years: 0.0,
            exact_months: 0.0,
            converged: true,
        }
    }

    fn non_convergent() -> Self {
        Self {
            months: NON_CONVERGENT_MONTHS,
            years: NON_CONVERGENT_YEARS as f64,
            exact_months: NON_CONVERGENT_MONTHS as f64,
            converged: false,
        }
    }

    fn from_exact(exact_months: f64) -> Self {
        if !exact_months.is_finite() || exact_months > NON_CONVERGENT_MONTHS as f64 {
            return Self::non_convergent();
        }
        let months = ((exact_months - 1e-9).ceil().max(1.0)) as u32;
        Self {
            months,
            years: months as f64 / 12.0,
            exact_months,
            converged: true,
        }
    }
}

/// Level annuity payment; 0 when there is nothing to amortize.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: f64) -> f64 {
    if !(principal > 0.0) || !(years > 0.0) {
        return 0.0;
    }

    let n = years * 12.0;
    let r = monthly_rate(annual_rate_percent);
    if r == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    let denominator = growth - 1.0;
    if denominator == 0.0 || !denominator.is_finite() {
        return principal / n;
    }
    principal * r * growth / denominator
}

pub fn payoff_time(principal: f64, annual_rate_percent: f64, payment: f64) -> PayoffTime {
    if !(principal > 0.0) {
        return PayoffTime::settled();
    }
    if !(payment > 0.0) || !payment.is_finite() {
        return PayoffTime::non_convergent();
    }

    let r = monthly_rate(annual_rate_percent);
    if r <= 0.0 {
        return PayoffTime::from_exact(principal / payment);
    }

    // Payment must strictly beat the first month's interest.
    if payment <= principal * r {
        return PayoffTime::non_convergent();
    }

    let exact = -(1.0 - principal * r / payment).ln() / (1.0 + r).ln();
    PayoffTime::from_exact(exact)
}

/// Interest paid over the life of the loan. When the payment does not cover
/// interest this is the interest-only accrual over the sentinel horizon, so
/// check [`payoff_time`] before trusting it.
pub fn total_interest(principal: f64, annual_rate_percent: f64, payment: f64) -> f64 {
    if !(principal > 0.0) {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_percent);
    if r <= 0.0 {
        return 0.0;
    }

    let time = payoff_time(principal, annual_rate_percent, payment);
    if !time.converged {
        return principal * r * NON_CONVERGENT_MONTHS as f64;
    }
    (payment * time.exact_months - principal).max(0.0)
}

pub fn payoff_detail(principal: f64, annual_rate_percent: f64, payment: f64) -> PayoffDetail {
    let principal = principal.max(0.0);
    let payment = payment.max(0.0);
    let time = payoff_time(principal, annual_rate_percent, payment);
    let interest = total_interest(principal, annual_rate_percent, payment);

    PayoffDetail {
        payoff_time_months: time.months,
        payoff_time_years: time.years,
        total_interest_paid: interest,
        total_paid: principal + interest,
        monthly_payment: payment,
        original_loan_amount: principal,
        converged: time.converged,
    }
}

/// Balance left after `months` level payments, never negative.
pub fn remaining_balance(
    principal: f64,
    annual_rate_percent: f64,
    payment: f64,
    months: u32,
) -> f64 {
    if !(principal > 0.0) {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_percent);
    let k = months as f64;
    if r <= 0.0 {
        return (principal - payment * k).max(0.0);
    }
    let growth = (1.0 + r).powf(k);
    let balance = principal * growth - payment * (growth - 1.0) / r;
    if balance.is_finite() { balance.max(0.0) } else { 0.0 }
}

/// Interest accrued during the first `months` level payments, including
/// interest capitalized into a balance the payment does not cover.
pub fn interest_over_months(
    principal: f64,
    annual_rate_percent: f64,
    payment: f64,
    months: u32,
) -> f64 {
    if !(principal > 0.0) {
        return 0.0;
    }
    let time = payoff_time(principal, annual_rate_percent, payment);
    if time.converged && time.months <= months {
        return total_interest(principal, annual_rate_percent, payment);
    }

    let r = monthly_rate(annual_rate_percent);
    if r <= 0.0 {
        return 0.0;
    }
    let payment = payment.max(0.0);
    let k = months as f64;
    let growth = (1.0 + r).powf(k);
    let balance = principal * growth - payment * (growth - 1.0) / r;
    let interest = balance - principal + payment * k;
    if interest.is_finite() { interest.max(0.0) } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment: f64,
    pub principal_payment: f64,
    pub interest_payment: f64,
    pub extra_payment: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub entries: Vec<AmortizationEntry>,
    pub total_interest_paid: f64,
    pub months_to_payoff: u32,
    pub converged: bool,
}

pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    payment: f64,
    extra_payment: f64,
    max_months: u32,
) -> AmortizationSchedule {
    if !(principal > 0.0) {
        return AmortizationSchedule {
            entries: Vec::new(),
            total_interest_paid: 0.0,
            months_to_payoff: 0,
            converged: true,
        };
    }
    if !(payment > 0.0) {
        return AmortizationSchedule {
            entries: Vec::new(),
            total_interest_paid: 0.0,
            months_to_payoff: 0,
            converged: false,
        };
    }

    let r = monthly_rate(annual_rate_percent);
    let extra_payment = extra_payment.max(0.0);
    let mut balance = principal;
    let mut total_interest_paid = 0.0;
    let mut entries = Vec::new();
    let mut month = 0;

    while balance > 0.0 && month < max_months {
        let interest = balance * r;
        total_interest_paid += interest;

        let principal_payment = (payment - interest).min(balance);
        let extra = extra_payment.min(balance - principal_payment).max(0.0);
        let mut remaining = balance - principal_payment - extra;
        if remaining < SETTLED_BALANCE {
            remaining = 0.0;
        }

        month += 1;
        entries.push(AmortizationEntry {
            month,
            payment: interest + principal_payment + extra,
            principal_payment: principal_payment + extra,
            interest_payment: interest,
            extra_payment: extra,
            remaining_balance: remaining,
        });
        balance = remaining;
    }

    AmortizationSchedule {
        entries,
        total_interest_paid,
        months_to_payoff: month,
        converged: balance == 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraPaymentImpact {
    pub baseline: PayoffDetail,
    pub accelerated: PayoffDetail,
    pub months_saved: u32,
    pub interest_saved: f64,
}

pub fn extra_payment_impact(
    principal: f64,
    annual_rate_percent: f64,
    payment: f64,
    extra_payment: f64,
) -> ExtraPaymentImpact {
    let baseline = payoff_detail(principal, annual_rate_percent, payment);
    let accelerated = payoff_detail(
        principal,
        annual_rate_percent,
        payment + extra_payment.max(0.0),
    );
    ExtraPaymentImpact {
        baseline,
        accelerated,
        months_saved: baseline
            .payoff_time_months
            .saturating_sub(accelerated.payoff_time_months),
        interest_saved: (baseline.total_interest_paid - accelerated.total_interest_paid).max(0.0),
    }
}
