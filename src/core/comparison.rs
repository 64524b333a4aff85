use rayon::prelude::*;
use tracing::{debug, warn};

use super::amortization::{interest_over_months, payoff_detail, remaining_balance};
use super::config::{EngineConfig, SurplusAllocation};
use super::growth::{future_value, investment_growth, risk_adjusted_value};
use super::tax::interest_cost_multiplier;
use super::types::{
    FullTermComparison, Loan, LoanStrategyComparison, PayoffDetail, RecommendationTier,
};

/// Extra monthly payment each loan is compared against.
pub fn extra_payments(
    loans: &[Loan],
    monthly_surplus: f64,
    allocation: SurplusAllocation,
) -> Vec<f64> {
    let surplus = monthly_surplus.max(0.0);
    match allocation {
        SurplusAllocation::Full => vec![surplus; loans.len()],
        SurplusAllocation::ProRata => {
            let total: f64 = loans.iter().map(|l| l.balance.max(0.0)).sum();
            loans
                .iter()
                .map(|l| {
                    if total > 0.0 {
                        surplus * l.balance.max(0.0) / total
                    } else {
                        0.0
                    }
                })
                .collect()
        }
    }
}

/// Compares every open loan against investing the same money. Loans with no
/// balance are skipped; output keeps input order.
pub fn compare_loans(
    loans: &[Loan],
    monthly_surplus: f64,
    config: &EngineConfig,
) -> Vec<LoanStrategyComparison> {
    let open = loans
        .iter()
        .filter(|l| l.balance > 0.0)
        .cloned()
        .collect::<Vec<_>>();
    let extras = extra_payments(&open, monthly_surplus, config.surplus_allocation);

    open.par_iter()
        .zip(extras.par_iter())
        .map(|(loan, &extra)| compare_loan(loan, extra, config))
        .collect()
}

pub fn compare_loan(
    loan: &Loan,
    extra_payment: f64,
    config: &EngineConfig,
) -> LoanStrategyComparison {
    let principal = loan.balance.max(0.0);
    let minimum = loan.minimum_payment.max(0.0);
    let extra = extra_payment.max(0.0);
    let benchmark = config.benchmark_return;
    let risk_factor = config.risk_factor;

    let baseline = payoff_detail(principal, loan.interest_rate, minimum);
    let accelerated = payoff_detail(principal, loan.interest_rate, minimum + extra);

    let multiplier = if config.apply_tax_adjustment {
        interest_cost_multiplier(loan)
    } else {
        1.0
    };

    let full_term_comparison = full_term_comparison(
        principal,
        loan.interest_rate,
        minimum,
        extra,
        &baseline,
        &accelerated,
        config,
    );

    // Both sides are measured over the unaccelerated payoff horizon. A minimum
    // that never retires the loan has no such horizon, so the comparison
    // horizon stands in for it and the verdict comes from end-of-horizon net worth.
    let (compared_months, raw_interest_saved) = if baseline.converged {
        (
            baseline.payoff_time_months,
            baseline.total_interest_paid - accelerated.total_interest_paid,
        )
    } else {
        warn!(
            loan_id = loan.id,
            minimum, "minimum payment does not cover interest; comparing over full horizon"
        );
        let horizon = config.horizon_months();
        (
            horizon,
            interest_over_months(principal, loan.interest_rate, minimum, horizon)
                - interest_over_months(principal, loan.interest_rate, minimum + extra, horizon),
        )
    };
    let compared_years = if baseline.converged {
        baseline.payoff_time_years
    } else {
        compared_months as f64 / 12.0
    };

    let interest_saved = raw_interest_saved.max(0.0) * multiplier;
    let potential_investment_growth = investment_growth(extra, compared_years, benchmark);
    let risk_adjusted_growth = potential_investment_growth * risk_factor;

    let (paying_down_is_better, net_advantage) = if baseline.converged {
        (
            interest_saved > risk_adjusted_growth,
            (interest_saved - risk_adjusted_growth).abs(),
        )
    } else {
        (
            full_term_comparison.paying_down_is_better,
            (full_term_comparison.accelerated_strategy_net_worth
                - full_term_comparison.investing_only_net_worth)
                .abs(),
        )
    };

    let effective_interest_rate = loan.interest_rate * multiplier;
    let tier = recommendation_tier(
        effective_interest_rate,
        benchmark,
        risk_factor,
        paying_down_is_better,
    );

    debug!(
        loan_id = loan.id,
        interest_saved,
        risk_adjusted_growth,
        paying_down_is_better,
        "loan compared"
    );

    LoanStrategyComparison {
        loan_id: loan.id,
        loan_name: loan.name.clone(),
        interest_rate: loan.interest_rate,
        effective_interest_rate,
        baseline_payoff: baseline,
        accelerated_payoff: accelerated,
        extra_monthly_payment: extra,
        months_saved: compared_months.saturating_sub(accelerated.payoff_time_months),
        interest_saved,
        potential_investment_growth,
        risk_adjusted_growth,
        long_term_investment_growth: investment_growth(
            extra,
            config.comparison_years as f64,
            benchmark,
        ),
        net_advantage,
        paying_down_is_better,
        tier,
        full_term_comparison,
    }
}

pub fn recommendation_tier(
    interest_rate: f64,
    benchmark_return: f64,
    risk_factor: f64,
    paying_down_is_better: bool,
) -> RecommendationTier {
    let risk_adjusted_return = benchmark_return * risk_factor;
    if interest_rate > benchmark_return + 1.0 {
        RecommendationTier::DefinitelyPay
    } else if interest_rate > risk_adjusted_return && paying_down_is_better {
        RecommendationTier::ProbablyPay
    } else {
        RecommendationTier::InvestInstead
    }
}

/// Net worth at the end of the full horizon for "invest the extra now" versus
/// "pay the loan off early, then invest the whole payment". Both sides spend
/// the same cash each month, so investments minus leftover debt is comparable.
fn full_term_comparison(
    principal: f64,
    annual_rate: f64,
    minimum: f64,
    extra: f64,
    baseline: &PayoffDetail,
    accelerated: &PayoffDetail,
    config: &EngineConfig,
) -> FullTermComparison {
    let horizon = config.horizon_months();
    let n = horizon as f64;
    let benchmark = config.benchmark_return;
    let risk_factor = config.risk_factor;

    let freed_months = |detail: &PayoffDetail| {
        if detail.converged {
            horizon.saturating_sub(detail.payoff_time_months)
        } else {
            0
        }
    };
    let leftover_debt = |detail: &PayoffDetail, payment: f64| {
        if detail.converged && detail.payoff_time_months <= horizon {
            0.0
        } else {
            remaining_balance(principal, annual_rate, payment, horizon)
        }
    };

    let baseline_freed = freed_months(baseline) as f64;
    let invest_value = future_value(extra, n, benchmark)
        + future_value(minimum, baseline_freed, benchmark);
    let invest_contributed = extra * n + minimum * baseline_freed;
    let investing_only_net_worth =
        risk_adjusted_value(invest_contributed, invest_value, risk_factor)
            - leftover_debt(baseline, minimum);

    let accelerated_freed = freed_months(accelerated) as f64;
    let paydown_value = future_value(minimum + extra, accelerated_freed, benchmark);
    let paydown_contributed = (minimum + extra) * accelerated_freed;
    let accelerated_strategy_net_worth =
        risk_adjusted_value(paydown_contributed, paydown_value, risk_factor)
            - leftover_debt(accelerated, minimum + extra);

    FullTermComparison {
        horizon_years: horizon / 12,
        investing_only_net_worth,
        accelerated_strategy_net_worth,
        paying_down_is_better: accelerated_strategy_net_worth > investing_only_net_worth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LoanType;
    use pretty_assertions::assert_eq as assert_eq_pretty;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn reference_loan_compares_over_baseline_horizon() {
        let config = EngineConfig::default();
        let loan = Loan::new(1, "Student loan", 25_000.0, 5.8, 275.0);
        let cmp = compare_loan(&loan, 725.0, &config);

        assert_eq!(cmp.baseline_payoff.payoff_time_months, 121);
        assert_eq!(cmp.accelerated_payoff.payoff_time_months, 27);
        assert_eq!(cmp.months_saved, 94);
        assert_approx_tol(cmp.interest_saved, 6_299.0, 1.0);
        assert_eq!(
            cmp.potential_investment_growth,
            investment_growth(725.0, cmp.baseline_payoff.payoff_time_years, 6.78)
        );
        assert_approx_tol(cmp.potential_investment_growth, 37_679.1, 1.0);
        assert_approx_tol(cmp.risk_adjusted_growth, cmp.potential_investment_growth * 0.7, 1e-9);
        assert!(!cmp.paying_down_is_better);
        assert_approx_tol(
            cmp.net_advantage,
            cmp.risk_adjusted_growth - cmp.interest_saved,
            1e-9,
        );
        // 5.8% sits between the risk-adjusted return and benchmark + 1.
        assert_eq!(cmp.tier, RecommendationTier::InvestInstead);
    }

    #[test]
    fn expensive_debt_favors_paydown_on_both_horizons() {
        let config = EngineConfig::default();
        let loan = Loan::new(2, "Card", 10_000.0, 20.0, 250.0);
        let cmp = compare_loan(&loan, 500.0, &config);

        assert!(cmp.paying_down_is_better);
        assert!(cmp.full_term_comparison.paying_down_is_better);
        assert_eq!(cmp.tier, RecommendationTier::DefinitelyPay);
        assert_eq!(cmp.full_term_comparison.horizon_years, 30);
    }

    #[test]
    fn cheap_debt_favors_investing_on_both_horizons() {
        let config = EngineConfig::default();
        let loan = Loan::new(3, "Mortgage", 20_000.0, 1.0, 200.0);
        let cmp = compare_loan(&loan, 400.0, &config);

        assert!(!cmp.paying_down_is_better);
        assert!(!cmp.full_term_comparison.paying_down_is_better);
        assert_eq!(cmp.tier, RecommendationTier::InvestInstead);
        assert!(cmp.long_term_investment_growth > cmp.potential_investment_growth);
    }

    #[test]
    fn tiers_follow_rate_bands() {
        assert_eq!(
            recommendation_tier(8.0, 6.78, 0.7, false),
            RecommendationTier::DefinitelyPay
        );
        assert_eq!(
            recommendation_tier(7.78, 6.78, 0.7, true),
            RecommendationTier::ProbablyPay
        );
        assert_eq!(
            recommendation_tier(5.0, 6.78, 0.7, true),
            RecommendationTier::ProbablyPay
        );
        assert_eq!(
            recommendation_tier(5.0, 6.78, 0.7, false),
            RecommendationTier::InvestInstead
        );
        assert_eq!(
            recommendation_tier(4.0, 6.78, 0.7, true),
            RecommendationTier::InvestInstead
        );
    }

    #[test]
    fn pro_rata_shares_split_surplus_by_balance() {
        let loans = vec![
            Loan::new(1, "A", 30_000.0, 5.0, 300.0),
            Loan::new(2, "B", 10_000.0, 5.0, 100.0),
        ];
        let shares = extra_payments(&loans, 800.0, SurplusAllocation::ProRata);
        assert_eq_pretty!(shares, vec![600.0, 200.0]);
        assert_eq_pretty!(
            extra_payments(&loans, 800.0, SurplusAllocation::Full),
            vec![800.0, 800.0]
        );
    }

    #[test]
    fn settled_loans_are_skipped() {
        let loans = vec![
            Loan::new(1, "Paid", 0.0, 5.0, 300.0),
            Loan::new(2, "Open", 10_000.0, 5.0, 200.0),
        ];
        let comparisons = compare_loans(&loans, 500.0, &EngineConfig::default());
        assert_eq!(comparisons.len(), 1);
        assert_eq!(comparisons[0].loan_id, 2);
    }

    #[test]
    fn deductible_interest_shrinks_savings() {
        let config = EngineConfig::default();
        let plain = Loan::new(1, "Car", 20_000.0, 6.0, 300.0);
        let mut deductible = plain.clone();
        deductible.loan_type = Some(LoanType::Auto);
        deductible.country_code = Some("DK".to_string());

        let a = compare_loan(&plain, 500.0, &config);
        let b = compare_loan(&deductible, 500.0, &config);
        assert_approx_tol(b.interest_saved, a.interest_saved * 0.67, 1e-6);
        assert_approx_tol(b.effective_interest_rate, 6.0 * 0.67, 1e-12);
        assert_eq!(b.interest_rate, 6.0);

        let untaxed = EngineConfig {
            apply_tax_adjustment: false,
            ..EngineConfig::default()
        };
        assert_eq!(
            compare_loan(&deductible, 500.0, &untaxed).interest_saved,
            a.interest_saved
        );
    }

    #[test]
    fn non_covering_minimum_is_compared_over_full_horizon() {
        let config = EngineConfig::default();
        let loan = Loan::new(9, "Underwater", 10_000.0, 12.0, 80.0);
        let cmp = compare_loan(&loan, 500.0, &config);

        assert!(!cmp.baseline_payoff.converged);
        assert!(cmp.accelerated_payoff.converged);
        assert_eq!(cmp.accelerated_payoff.payoff_time_months, 20);
        assert_eq!(cmp.months_saved, 340);

        // Growth and savings span the 30-year comparison, not the 99-year sentinel.
        assert_eq!(
            cmp.potential_investment_growth,
            investment_growth(500.0, 30.0, config.benchmark_return)
        );
        assert_approx_tol(cmp.potential_investment_growth, 404_156.4, 1.0);
        assert_approx_tol(cmp.interest_saved, 97_668.5, 1.0);

        // Debt that never amortizes has to be paid down.
        assert!(cmp.paying_down_is_better);
        assert!(cmp.full_term_comparison.paying_down_is_better);
        assert_eq!(cmp.tier, RecommendationTier::DefinitelyPay);
        assert_approx_tol(cmp.net_advantage, 92_279.6, 1.0);
        assert_approx_tol(
            cmp.net_advantage,
            cmp.full_term_comparison.accelerated_strategy_net_worth
                - cmp.full_term_comparison.investing_only_net_worth,
            1e-6,
        );
    }

    #[test]
    fn danish_credit_card_keeps_full_interest_cost() {
        let config = EngineConfig::default();
        let plain = Loan::new(4, "Card", 8_000.0, 20.0, 200.0);
        let mut danish = plain.clone();
        danish.loan_type = Some(LoanType::CreditCard);
        danish.country_code = Some("DK".to_string());

        let a = compare_loan(&plain, 300.0, &config);
        let b = compare_loan(&danish, 300.0, &config);
        assert_eq!(b.interest_saved, a.interest_saved);
        assert_eq!(b.effective_interest_rate, 20.0);
        assert_eq!(b.tier, RecommendationTier::DefinitelyPay);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_comparison_is_deterministic_and_horizon_aligned(
            balance in 1_000u32..500_000,
            rate_bp in 0u32..2500,
            minimum in 10u32..5_000,
            extra in 0u32..3_000
        ) {
            let config = EngineConfig::default();
            let loan = Loan::new(1, "Loan", balance as f64, rate_bp as f64 / 100.0, minimum as f64);
            let first = compare_loan(&loan, extra as f64, &config);
            let second = compare_loan(&loan, extra as f64, &config);
            prop_assert_eq!(&first, &second);

            let compared_years = if first.baseline_payoff.converged {
                first.baseline_payoff.payoff_time_years
            } else {
                config.comparison_years as f64
            };
            let expected = investment_growth(
                extra as f64,
                compared_years,
                config.benchmark_return,
            );
            prop_assert_eq!(first.potential_investment_growth, expected);
            prop_assert!(first.months_saved <= config.horizon_months().max(
                first.baseline_payoff.payoff_time_months
            ));
            if !first.baseline_payoff.converged {
                prop_assert_eq!(
                    first.paying_down_is_better,
                    first.full_term_comparison.paying_down_is_better
                );
            }
            prop_assert!(first.net_advantage >= 0.0);
            prop_assert!(first.interest_saved >= 0.0);
        }
    }
}
