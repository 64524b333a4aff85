use std::collections::BTreeMap;

use super::config::RecommendationThresholds;
use super::tax::tax_deduction;
use super::types::{
    Loan, LoanStrategyComparison, OptimalStrategy, Priority, Recommendation, StrategyName,
    StrategyResult,
};

fn recommendation(title: String, description: String, priority: Priority) -> Recommendation {
    Recommendation {
        title,
        description,
        priority,
    }
}

fn name_list(loans: &[&Loan]) -> String {
    loans
        .iter()
        .map(|l| l.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Largest advantage among comparisons on one side of the pay-down/invest split.
fn strongest<'a>(
    comparisons: &'a [LoanStrategyComparison],
    paying_down: bool,
) -> Option<&'a LoanStrategyComparison> {
    comparisons
        .iter()
        .filter(|c| c.paying_down_is_better == paying_down && c.net_advantage > 0.0)
        .fold(None, |best: Option<&LoanStrategyComparison>, c| match best {
            Some(b) if c.net_advantage <= b.net_advantage => Some(b),
            _ => Some(c),
        })
}

/// Rule-based guidance. Every rule is evaluated on its own; output order is
/// emission order.
pub fn generate_recommendations(
    loans: &[Loan],
    monthly_budget: f64,
    strategy_results: &BTreeMap<StrategyName, StrategyResult>,
    optimal: &OptimalStrategy,
    loan_comparisons: &[LoanStrategyComparison],
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    let mut description = optimal.description.clone();
    if let Some(result) = strategy_results.get(&optimal.name) {
        let years = result.yearly_data.last().map(|y| y.year).unwrap_or(0);
        description.push_str(&format!(
            " It leads to the highest projected net worth after {years} years ({:.0}).",
            result.final_net_worth
        ));
    }
    out.push(recommendation(
        format!("Follow the \"{}\" strategy", optimal.name),
        description,
        Priority::High,
    ));

    if let Some(best) = strongest(loan_comparisons, true) {
        out.push(recommendation(
            format!("Prioritize paying down your {}", best.loan_name),
            format!(
                "At {:.2}% interest, paying down your {} early saves more than investing the same \
                 money would earn over the same period. You would be about {:.0} better off.",
                best.interest_rate, best.loan_name, best.net_advantage
            ),
            Priority::High,
        ));
    }

    if let Some(best) = strongest(loan_comparisons, false) {
        out.push(recommendation(
            format!("Pay only the minimum on your {}", best.loan_name),
            format!(
                "With its low {:.2}% interest rate, you are better off making minimum payments \
                 on your {} and investing the difference. You could be about {:.0} ahead by \
                 investing.",
                best.interest_rate, best.loan_name, best.net_advantage
            ),
            Priority::Medium,
        ));
    }

    let high_interest = loans
        .iter()
        .filter(|l| l.balance > 0.0 && l.interest_rate > thresholds.high_interest_rate)
        .collect::<Vec<_>>();
    if !high_interest.is_empty() {
        out.push(recommendation(
            "Prioritize high-interest debt".to_string(),
            format!(
                "You have loans ({}) with rates above {:.0}%. Eliminating this interest is a \
                 guaranteed return that beats typical investment returns.",
                name_list(&high_interest),
                thresholds.high_interest_rate
            ),
            Priority::High,
        ));
    }

    let refinance = loans
        .iter()
        .filter(|l| l.balance > 0.0 && l.interest_rate > thresholds.refinance_rate)
        .collect::<Vec<_>>();
    if !refinance.is_empty() {
        out.push(recommendation(
            "Look into refinancing".to_string(),
            format!(
                "{} charge{} more than {:.0}% interest. Consolidating or refinancing at a lower \
                 rate could cut your costs before any extra payments.",
                name_list(&refinance),
                if refinance.len() == 1 { "s" } else { "" },
                thresholds.refinance_rate
            ),
            Priority::Medium,
        ));
    }

    let low_rate = loans
        .iter()
        .filter(|l| l.balance > 0.0 && l.interest_rate <= thresholds.low_interest_rate)
        .collect::<Vec<_>>();
    if !low_rate.is_empty() {
        out.push(recommendation(
            "Keep low-rate loans on minimum payments".to_string(),
            format!(
                "{} cost{} {:.0}% or less. Paying them early rarely beats investing the money.",
                name_list(&low_rate),
                if low_rate.len() == 1 { "s" } else { "" },
                thresholds.low_interest_rate
            ),
            Priority::Low,
        ));
    }

    out.push(recommendation(
        "Build an emergency fund first".to_string(),
        "Before following any strategy, keep 3-6 months of expenses in an emergency fund. It \
         provides stability and prevents new debt when unexpected expenses arise."
            .to_string(),
        Priority::High,
    ));

    let total_minimum: f64 = loans
        .iter()
        .filter(|l| l.balance > 0.0)
        .map(|l| l.minimum_payment.max(0.0))
        .sum();
    if monthly_budget < total_minimum * thresholds.low_cash_flow_ratio {
        out.push(recommendation(
            "Increase your available cash flow".to_string(),
            "Little money remains after minimum payments. Raising income or trimming expenses \
             would speed up both debt payoff and investing."
                .to_string(),
            Priority::Medium,
        ));
    }

    out.push(recommendation(
        "Consider your personal risk tolerance".to_string(),
        "The analysis discounts market returns for risk, but your own comfort matters too. If \
         market swings would cause you stress, the guaranteed return of paying down debt may be \
         worth more to you."
            .to_string(),
        Priority::Medium,
    ));

    for loan in loans.iter().filter(|l| l.balance > 0.0) {
        let deduction = tax_deduction(loan);
        if deduction.deductible && deduction.estimated_annual_savings > 0.0 {
            out.push(recommendation(
                format!("Claim the interest deduction on your {}", loan.name),
                format!(
                    "Interest on this loan is deductible in {} at about {:.0}%, worth roughly \
                     {:.0} per year. The deduction lowers the real cost of the loan, which tilts \
                     the balance toward investing.",
                    deduction.country_name,
                    deduction.deduction_rate * 100.0,
                    deduction.estimated_annual_savings
                ),
                Priority::Low,
            ));
        }
    }

    let surplus = monthly_budget - total_minimum;
    if surplus >= thresholds.large_surplus {
        out.push(recommendation(
            "Diversify your investments".to_string(),
            format!(
                "With about {surplus:.0} per month to invest, spread contributions across \
                 tax-advantaged accounts and broad index funds rather than a single holding."
            ),
            Priority::Low,
        ));
    }

    out
}
