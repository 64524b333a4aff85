use serde::{Deserialize, Serialize};

use super::amortization::{monthly_payment, payoff_time};
use super::types::Loan;

/// Which of payment or term the user last fixed; the other one is derived.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    #[default]
    PaymentDriven,
    TermDriven,
}

/// Keeps a loan's balance, rate, term and payment mutually consistent while
/// the user edits them one field at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTermsEditor {
    loan: Loan,
    mode: CalculationMode,
    /// Set when the payment no longer retires the balance; the term then
    /// keeps its last valid value.
    term_unresolved: bool,
}

impl LoanTermsEditor {
    pub fn new(loan: Loan, mode: CalculationMode) -> Self {
        Self {
            loan,
            mode,
            term_unresolved: false,
        }
        .recompute()
    }

    pub fn loan(&self) -> &Loan {
        &self.loan
    }

    pub fn into_loan(self) -> Loan {
        self.loan
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    pub fn term_unresolved(&self) -> bool {
        self.term_unresolved
    }

    pub fn set_balance(mut self, balance: f64) -> Self {
        self.loan.balance = balance.max(0.0);
        self.recompute()
    }

    pub fn set_interest_rate(mut self, rate: f64) -> Self {
        self.loan.interest_rate = rate.max(0.0);
        self.recompute()
    }

    pub fn set_term_years(mut self, years: f64) -> Self {
        self.loan.term_years = years.max(0.0);
        self.mode = CalculationMode::TermDriven;
        self.recompute()
    }

    pub fn set_minimum_payment(mut self, payment: f64) -> Self {
        self.loan.minimum_payment = payment.max(0.0);
        self.mode = CalculationMode::PaymentDriven;
        self.recompute()
    }

    pub fn set_mode(mut self, mode: CalculationMode) -> Self {
        self.mode = mode;
        self.recompute()
    }

    fn recompute(mut self) -> Self {
        match self.mode {
            CalculationMode::PaymentDriven => {
                let time = payoff_time(
                    self.loan.balance,
                    self.loan.interest_rate,
                    self.loan.minimum_payment,
                );
                self.term_unresolved = !time.converged;
                if time.converged {
                    self.loan.term_years = time.years;
                }
            }
            CalculationMode::TermDriven => {
                self.term_unresolved = false;
                if self.loan.term_years > 0.0 {
                    self.loan.minimum_payment = monthly_payment(
                        self.loan.balance,
                        self.loan.interest_rate,
                        self.loan.term_years,
                    );
                }
            }
        }
        self
    }
}
