use serde::Deserialize;

pub const COMPARISON_YEARS: u32 = 30;
/// Long-run inflation-adjusted index return, percent per year.
pub const DEFAULT_BENCHMARK_RETURN: f64 = 6.78;
pub const DEFAULT_RISK_FACTOR: f64 = 0.7;
pub const DEFAULT_INFLATION_RATE: f64 = 2.5;
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurplusAllocation {
    /// Every loan is compared against the whole monthly surplus.
    #[default]
    Full,
    /// Each loan gets the share of the surplus matching its share of total debt.
    #[serde(alias = "proRata", alias = "pro_rata")]
    ProRata,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub comparison_years: u32,
    pub benchmark_return: f64,
    pub risk_factor: f64,
    pub inflation_rate: f64,
    pub aggressive_paydown_years: u32,
    pub max_simulation_months: u32,
    pub surplus_allocation: SurplusAllocation,
    pub apply_tax_adjustment: bool,
    pub thresholds: RecommendationThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            comparison_years: COMPARISON_YEARS,
            benchmark_return: DEFAULT_BENCHMARK_RETURN,
            risk_factor: DEFAULT_RISK_FACTOR,
            inflation_rate: DEFAULT_INFLATION_RATE,
            aggressive_paydown_years: 5,
            max_simulation_months: MAX_SIMULATION_MONTHS,
            surplus_allocation: SurplusAllocation::Full,
            apply_tax_adjustment: true,
            thresholds: RecommendationThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Months actually simulated: the comparison horizon, never past the hard cap.
    pub fn horizon_months(&self) -> u32 {
        self.comparison_years
            .saturating_mul(12)
            .min(self.max_simulation_months)
    }

    pub fn risk_adjusted_return(&self) -> f64 {
        self.benchmark_return * self.risk_factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationThresholds {
    pub high_interest_rate: f64,
    pub refinance_rate: f64,
    pub low_interest_rate: f64,
    /// Budget below this multiple of total minimum payments counts as tight cash flow.
    pub low_cash_flow_ratio: f64,
    pub large_surplus: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            high_interest_rate: 7.0,
            refinance_rate: 10.0,
            low_interest_rate: 3.0,
            low_cash_flow_ratio: 1.5,
            large_surplus: 2000.0,
        }
    }
}
