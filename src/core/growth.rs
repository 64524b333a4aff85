use serde::Serialize;

use super::amortization::monthly_rate;

/// Ordinary-annuity future value of `contribution` paid at the end of each month.
pub fn future_value(contribution: f64, months: f64, annual_return_percent: f64) -> f64 {
    if !(contribution > 0.0) || !(months > 0.0) {
        return 0.0;
    }
    let r = monthly_rate(annual_return_percent);
    if r == 0.0 {
        return contribution * months;
    }
    let value = contribution * ((1.0 + r).powf(months) - 1.0) / r;
    if value.is_finite() { value } else { f64::MAX }
}

/// Compounding gain on a monthly contribution stream: future value minus
/// what was paid in.
pub fn investment_growth(monthly_contribution: f64, years: f64, annual_return_percent: f64) -> f64 {
    if !(monthly_contribution > 0.0) || !(years > 0.0) {
        return 0.0;
    }
    let months = years * 12.0;
    future_value(monthly_contribution, months, annual_return_percent)
        - monthly_contribution * months
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month: u32,
    pub balance: f64,
    pub contributed: f64,
    pub inflation_adjusted_balance: f64,
    pub risk_adjusted_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentProjection {
    pub points: Vec<ProjectionPoint>,
    pub final_balance: f64,
    pub inflation_adjusted_balance: f64,
    pub risk_adjusted_balance: f64,
}

/// Month-by-month balance of a contribution stream, deflated by inflation and
/// with gains discounted by `risk_factor`.
pub fn projection(
    monthly_contribution: f64,
    months: u32,
    annual_return_percent: f64,
    inflation_percent: f64,
    risk_factor: f64,
) -> InvestmentProjection {
    if !(monthly_contribution > 0.0) || months == 0 {
        return InvestmentProjection {
            points: Vec::new(),
            final_balance: 0.0,
            inflation_adjusted_balance: 0.0,
            risk_adjusted_balance: 0.0,
        };
    }

    let r = monthly_rate(annual_return_percent);
    let inflation = monthly_rate(inflation_percent);
    let mut points = Vec::with_capacity(months as usize);
    let mut balance = 0.0;
    let mut contributed = 0.0;
    let mut deflator = 1.0;

    for month in 1..=months {
        balance = balance * (1.0 + r) + monthly_contribution;
        contributed += monthly_contribution;
        deflator *= 1.0 + inflation;
        points.push(ProjectionPoint {
            month,
            balance,
            contributed,
            inflation_adjusted_balance: balance / deflator,
            risk_adjusted_balance: risk_adjusted_value(contributed, balance, risk_factor),
        });
    }

    InvestmentProjection {
        points,
        final_balance: balance,
        inflation_adjusted_balance: balance / deflator,
        risk_adjusted_balance: risk_adjusted_value(contributed, balance, risk_factor),
    }
}

/// Contributions are certain; only the gain above them is scaled by confidence.
pub fn risk_adjusted_value(contributed: f64, balance: f64, risk_factor: f64) -> f64 {
    contributed + (balance - contributed) * risk_factor
}
