use serde::Serialize;

use super::types::{Loan, LoanType};

const FALLBACK_COUNTRY: &str = "US";

/// Deduction terms for one class of loan in one country.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DeductionRule {
    rate: f64,
    balance_cap: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct CountryTaxRules {
    code: &'static str,
    name: &'static str,
    mortgage: Option<DeductionRule>,
    student: Option<DeductionRule>,
    personal: Option<DeductionRule>,
    auto: Option<DeductionRule>,
}

const US_RULES: CountryTaxRules = CountryTaxRules {
    code: "US",
    name: "United States",
    mortgage: Some(DeductionRule {
        rate: 0.25,
        balance_cap: Some(750_000.0),
    }),
    student: Some(DeductionRule {
        rate: 0.25,
        balance_cap: None,
    }),
    personal: None,
    auto: None,
};

const DK_RULES: CountryTaxRules = CountryTaxRules {
    code: "DK",
    name: "Denmark",
    mortgage: Some(DeductionRule {
        rate: 0.33,
        balance_cap: None,
    }),
    student: Some(DeductionRule {
        rate: 0.33,
        balance_cap: None,
    }),
    personal: Some(DeductionRule {
        rate: 0.33,
        balance_cap: None,
    }),
    auto: Some(DeductionRule {
        rate: 0.33,
        balance_cap: None,
    }),
};

fn rules_for(country_code: &str) -> &'static CountryTaxRules {
    match country_code.trim().to_ascii_uppercase().as_str() {
        "DK" => &DK_RULES,
        _ => &US_RULES,
    }
}

impl CountryTaxRules {
    fn rule(&self, loan_type: LoanType) -> Option<DeductionRule> {
        match loan_type {
            t if t.is_mortgage() => self.mortgage,
            LoanType::Student => self.student,
            LoanType::Personal => self.personal,
            LoanType::Auto => self.auto,
            // Consumer credit is never deductible.
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDeduction {
    pub country_code: String,
    pub country_name: String,
    pub deductible: bool,
    pub deduction_rate: f64,
    pub deduction_cap: Option<f64>,
    pub annual_interest: f64,
    pub estimated_annual_savings: f64,
}

/// Simplified interest-deduction estimate. Loans without a type are treated
/// as non-deductible; unknown countries use the US rules.
pub fn tax_deduction(loan: &Loan) -> TaxDeduction {
    let country = loan.country_code.as_deref().unwrap_or(FALLBACK_COUNTRY);
    let rules = rules_for(country);
    let rule = loan.loan_type.and_then(|t| rules.rule(t));

    let balance = loan.balance.max(0.0);
    let rate = loan.interest_rate.max(0.0) / 100.0;
    let deductible_balance = match rule.and_then(|r| r.balance_cap) {
        Some(cap) => balance.min(cap),
        None => balance,
    };
    let annual_interest = deductible_balance * rate;
    let deduction_rate = rule.map(|r| r.rate).unwrap_or(0.0);

    TaxDeduction {
        country_code: rules.code.to_string(),
        country_name: rules.name.to_string(),
        deductible: rule.is_some(),
        deduction_rate,
        deduction_cap: rule.and_then(|r| r.balance_cap),
        annual_interest,
        estimated_annual_savings: annual_interest * deduction_rate,
    }
}

/// Share of each unit of interest that the borrower actually bears after the
/// deduction, in `[0, 1]`.
pub fn interest_cost_multiplier(loan: &Loan) -> f64 {
    let deduction = tax_deduction(loan);
    if !deduction.deductible || !(loan.balance > 0.0) {
        return 1.0;
    }
    let covered = match deduction.deduction_cap {
        Some(cap) if loan.balance > cap => cap / loan.balance,
        _ => 1.0,
    };
    (1.0 - deduction.deduction_rate * covered).clamp(0.0, 1.0)
}

pub fn effective_rate(loan: &Loan) -> f64 {
    loan.interest_rate * interest_cost_multiplier(loan)
}
