mod error;
mod service;

use std::collections::BTreeSet;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::{
    AmortizationSchedule, CalculationMode, EngineConfig, ExtraPaymentImpact, InvestmentProjection,
    Loan, LoanTermsEditor, LoanType, MAX_SIMULATION_MONTHS, NON_CONVERGENT_YEARS, PayoffDetail,
    StrategyInputs, SurplusAllocation, TaxDeduction, amortization_schedule, effective_rate,
    extra_payment_impact, interest_cost_multiplier, payoff_detail, projection, tax_deduction,
};

pub use error::InputError;
pub use service::StrategyService;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliLoanType {
    Mortgage,
    MortgageBond,
    HomeLoan,
    Student,
    Auto,
    CreditCard,
    Personal,
    Other,
}

impl From<CliLoanType> for LoanType {
    fn from(value: CliLoanType) -> Self {
        match value {
            CliLoanType::Mortgage => LoanType::Mortgage,
            CliLoanType::MortgageBond => LoanType::MortgageBond,
            CliLoanType::HomeLoan => LoanType::HomeLoan,
            CliLoanType::Student => LoanType::Student,
            CliLoanType::Auto => LoanType::Auto,
            CliLoanType::CreditCard => LoanType::CreditCard,
            CliLoanType::Personal => LoanType::Personal,
            CliLoanType::Other => LoanType::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliSurplusAllocation {
    Full,
    ProRata,
}

impl From<CliSurplusAllocation> for SurplusAllocation {
    fn from(value: CliSurplusAllocation) -> Self {
        match value {
            CliSurplusAllocation::Full => SurplusAllocation::Full,
            CliSurplusAllocation::ProRata => SurplusAllocation::ProRata,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "payoff",
    about = "Compare paying down loans against investing the surplus"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every strategy and print the consolidated report.
    Compute(ComputeArgs),
    /// Print a month-by-month amortization schedule.
    Amortize(AmortizeArgs),
    /// Estimate the interest deduction for a single loan.
    Tax(TaxArgs),
    /// Project a monthly contribution stream.
    Project(ProjectArgs),
}

#[derive(Args, Debug, Default)]
struct ComputeArgs {
    #[arg(long, help = "JSON payload file; stdin is read when omitted")]
    input: Option<PathBuf>,
    #[arg(long)]
    budget: Option<f64>,
    #[arg(long = "return", help = "Expected annual investment return in percent")]
    annual_return: Option<f64>,
    #[arg(long, help = "Annual inflation in percent")]
    inflation: Option<f64>,
    #[arg(long)]
    risk_factor: Option<f64>,
    #[arg(long, help = "Simulation horizon in years")]
    years: Option<u32>,
    #[arg(long, value_enum)]
    allocation: Option<CliSurplusAllocation>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct AmortizeArgs {
    #[arg(long)]
    principal: f64,
    #[arg(long, help = "Annual interest rate in percent")]
    rate: f64,
    #[arg(long, conflicts_with = "term_years", required_unless_present = "term_years")]
    payment: Option<f64>,
    #[arg(long)]
    term_years: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    extra: f64,
    #[arg(long, default_value_t = 50)]
    max_years: u32,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct TaxArgs {
    #[arg(long)]
    balance: f64,
    #[arg(long)]
    rate: f64,
    #[arg(long, value_enum)]
    loan_type: CliLoanType,
    #[arg(long, default_value = "US")]
    country: String,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long)]
    monthly: f64,
    #[arg(long)]
    years: u32,
    #[arg(long = "return")]
    annual_return: Option<f64>,
    #[arg(long)]
    inflation: Option<f64>,
    #[arg(long)]
    risk_factor: Option<f64>,
    #[arg(long)]
    pretty: bool,
}

/// Request body for `compute`. Every field is optional and falls back to the
/// engine defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComputePayload {
    loans: Option<Vec<Loan>>,
    monthly_budget: Option<f64>,
    annual_return: Option<f64>,
    inflation_rate: Option<f64>,
    risk_factor: Option<f64>,
    comparison_years: Option<u32>,
    surplus_allocation: Option<SurplusAllocation>,
}

#[derive(Debug)]
struct ComputeRequest {
    inputs: StrategyInputs,
    config: EngineConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AmortizeResponse {
    monthly_payment: f64,
    /// Absent when the payment never retires the balance.
    term_years: Option<f64>,
    mode: CalculationMode,
    payoff: PayoffDetail,
    schedule: AmortizationSchedule,
    extra_payment_impact: Option<ExtraPaymentImpact>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaxResponse {
    deduction: TaxDeduction,
    interest_cost_multiplier: f64,
    effective_interest_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    monthly_contribution: f64,
    annual_return: f64,
    projection: InvestmentProjection,
}

/// Runs one CLI command and returns the JSON it produced.
pub async fn run(cli: Cli) -> Result<String, InputError> {
    match cli.command {
        Command::Compute(args) => run_compute(args).await,
        Command::Amortize(args) => run_amortize(&args),
        Command::Tax(args) => run_tax(&args),
        Command::Project(args) => run_project(&args),
    }
}

async fn run_compute(args: ComputeArgs) -> Result<String, InputError> {
    let raw = read_input(args.input.as_deref())?;
    let mut payload = if raw.trim().is_empty() {
        ComputePayload::default()
    } else {
        serde_json::from_str::<ComputePayload>(&raw)?
    };
    apply_cli_overrides(&mut payload, &args);

    let request = compute_request_from_payload(payload)?;
    let service = StrategyService::new(request.config);
    let report = service.compute(request.inputs).await?;
    to_json(report.as_ref(), args.pretty)
}

fn read_input(path: Option<&Path>) -> Result<String, InputError> {
    if let Some(path) = path {
        return Ok(std::fs::read_to_string(path)?);
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut raw = String::new();
    stdin.lock().read_to_string(&mut raw)?;
    Ok(raw)
}

/// Flags win over the payload.
fn apply_cli_overrides(payload: &mut ComputePayload, args: &ComputeArgs) {
    if let Some(v) = args.budget {
        payload.monthly_budget = Some(v);
    }
    if let Some(v) = args.annual_return {
        payload.annual_return = Some(v);
    }
    if let Some(v) = args.inflation {
        payload.inflation_rate = Some(v);
    }
    if let Some(v) = args.risk_factor {
        payload.risk_factor = Some(v);
    }
    if let Some(v) = args.years {
        payload.comparison_years = Some(v);
    }
    if let Some(v) = args.allocation {
        payload.surplus_allocation = Some(v.into());
    }
}

fn compute_request_from_payload(payload: ComputePayload) -> Result<ComputeRequest, InputError> {
    let mut config = EngineConfig::default();

    if let Some(v) = payload.annual_return {
        require_finite("annualReturn", v)?;
        if v <= -100.0 {
            return Err(InputError::invalid("annualReturn", "must be > -100"));
        }
        config.benchmark_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        require_finite("inflationRate", v)?;
        if v <= -100.0 {
            return Err(InputError::invalid("inflationRate", "must be > -100"));
        }
        config.inflation_rate = v;
    }
    if let Some(v) = payload.risk_factor {
        require_finite("riskFactor", v)?;
        if !(v > 0.0 && v <= 1.0) {
            return Err(InputError::invalid("riskFactor", "must be in (0, 1]"));
        }
        config.risk_factor = v;
    }
    if let Some(v) = payload.comparison_years {
        let max_years = MAX_SIMULATION_MONTHS / 12;
        if v == 0 || v > max_years {
            return Err(InputError::invalid(
                "comparisonYears",
                format!("must be between 1 and {max_years}"),
            ));
        }
        config.comparison_years = v;
    }
    if let Some(v) = payload.surplus_allocation {
        config.surplus_allocation = v;
    }

    let monthly_budget = payload.monthly_budget.unwrap_or(0.0);
    require_non_negative("monthlyBudget", monthly_budget)?;

    let loans = payload.loans.unwrap_or_default();
    let mut ids = BTreeSet::new();
    for (idx, loan) in loans.iter().enumerate() {
        validate_loan(idx, loan)?;
        if !ids.insert(loan.id) {
            return Err(InputError::invalid(
                format!("loans[{idx}].id"),
                format!("duplicates id {}", loan.id),
            ));
        }
    }

    Ok(ComputeRequest {
        inputs: StrategyInputs {
            loans,
            monthly_budget,
            annual_return: config.benchmark_return,
            inflation_rate: config.inflation_rate,
            risk_factor: config.risk_factor,
        },
        config,
    })
}

fn validate_loan(idx: usize, loan: &Loan) -> Result<(), InputError> {
    let field = |name: &str| format!("loans[{idx}].{name}");
    if loan.name.trim().is_empty() {
        return Err(InputError::invalid(field("name"), "must not be empty"));
    }
    require_non_negative(&field("balance"), loan.balance)?;
    require_non_negative(&field("interestRate"), loan.interest_rate)?;
    require_non_negative(&field("minimumPayment"), loan.minimum_payment)?;
    require_non_negative(&field("termYears"), loan.term_years)?;
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::invalid(field, "must be a finite number"))
    }
}

fn require_non_negative(field: &str, value: f64) -> Result<(), InputError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::invalid(field, "must be >= 0"));
    }
    Ok(())
}

fn run_amortize(args: &AmortizeArgs) -> Result<String, InputError> {
    to_json(&build_amortize_response(args)?, args.pretty)
}

fn build_amortize_response(args: &AmortizeArgs) -> Result<AmortizeResponse, InputError> {
    require_non_negative("--principal", args.principal)?;
    require_non_negative("--rate", args.rate)?;
    require_non_negative("--extra", args.extra)?;
    if args.max_years == 0 || args.max_years > NON_CONVERGENT_YEARS {
        return Err(InputError::invalid(
            "--max-years",
            format!("must be between 1 and {NON_CONVERGENT_YEARS}"),
        ));
    }

    let loan = Loan::new(0, "loan", args.principal, args.rate, 0.0);
    let editor = match (args.payment, args.term_years) {
        (Some(payment), _) => {
            require_finite("--payment", payment)?;
            if payment <= 0.0 {
                return Err(InputError::invalid("--payment", "must be > 0"));
            }
            LoanTermsEditor::new(loan, CalculationMode::PaymentDriven).set_minimum_payment(payment)
        }
        (None, Some(years)) => {
            require_finite("--term-years", years)?;
            if years <= 0.0 {
                return Err(InputError::invalid("--term-years", "must be > 0"));
            }
            LoanTermsEditor::new(loan, CalculationMode::TermDriven).set_term_years(years)
        }
        (None, None) => {
            return Err(InputError::invalid(
                "--payment",
                "or --term-years is required",
            ));
        }
    };
    let payment = editor.loan().minimum_payment;

    Ok(AmortizeResponse {
        monthly_payment: payment,
        term_years: (!editor.term_unresolved()).then(|| editor.loan().term_years),
        mode: editor.mode(),
        payoff: payoff_detail(args.principal, args.rate, payment),
        schedule: amortization_schedule(
            args.principal,
            args.rate,
            payment,
            args.extra,
            args.max_years * 12,
        ),
        extra_payment_impact: (args.extra > 0.0)
            .then(|| extra_payment_impact(args.principal, args.rate, payment, args.extra)),
    })
}

fn run_tax(args: &TaxArgs) -> Result<String, InputError> {
    to_json(&build_tax_response(args)?, args.pretty)
}

fn build_tax_response(args: &TaxArgs) -> Result<TaxResponse, InputError> {
    require_non_negative("--balance", args.balance)?;
    require_non_negative("--rate", args.rate)?;
    let country = args.country.trim().to_ascii_uppercase();
    if country.is_empty() {
        return Err(InputError::invalid("--country", "must not be empty"));
    }

    let mut loan = Loan::new(0, "loan", args.balance, args.rate, 0.0);
    loan.loan_type = Some(args.loan_type.into());
    loan.country_code = Some(country);

    Ok(TaxResponse {
        deduction: tax_deduction(&loan),
        interest_cost_multiplier: interest_cost_multiplier(&loan),
        effective_interest_rate: effective_rate(&loan),
    })
}

fn run_project(args: &ProjectArgs) -> Result<String, InputError> {
    to_json(&build_project_response(args)?, args.pretty)
}

fn build_project_response(args: &ProjectArgs) -> Result<ProjectResponse, InputError> {
    require_non_negative("--monthly", args.monthly)?;
    let max_years = MAX_SIMULATION_MONTHS / 12;
    if args.years == 0 || args.years > max_years {
        return Err(InputError::invalid(
            "--years",
            format!("must be between 1 and {max_years}"),
        ));
    }

    let payload = ComputePayload {
        annual_return: args.annual_return,
        inflation_rate: args.inflation,
        risk_factor: args.risk_factor,
        ..ComputePayload::default()
    };
    let config = compute_request_from_payload(payload)?.config;

    Ok(ProjectResponse {
        monthly_contribution: args.monthly,
        annual_return: config.benchmark_return,
        projection: projection(
            args.monthly,
            args.years * 12,
            config.benchmark_return,
            config.inflation_rate,
            config.risk_factor,
        ),
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, InputError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DEFAULT_BENCHMARK_RETURN, StrategyName};
    use pretty_assertions::assert_eq as assert_eq_pretty;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn request_from_json(json: &str) -> Result<ComputeRequest, InputError> {
        let payload = serde_json::from_str::<ComputePayload>(json)?;
        compute_request_from_payload(payload)
    }

    fn field_of(err: InputError) -> String {
        match err {
            InputError::InvalidField { field, .. } => field,
            other => panic!("expected field error, got {other}"),
        }
    }

    #[test]
    fn empty_payload_uses_engine_defaults() {
        let request = request_from_json("{}").expect("valid payload");
        assert!(request.inputs.loans.is_empty());
        assert_eq!(request.inputs.monthly_budget, 0.0);
        assert_eq_pretty!(request.config, EngineConfig::default());
        assert_approx(request.inputs.annual_return, DEFAULT_BENCHMARK_RETURN);
    }

    #[test]
    fn payload_fields_override_defaults() {
        let request = request_from_json(
            r#"{
                "loans": [{"id": 7, "name": "Car", "balance": 12000, "interestRate": 6.5,
                           "minimumPayment": 250, "loanType": "AUTO", "countryCode": "DK"}],
                "monthlyBudget": 900,
                "annualReturn": 8,
                "inflationRate": 3,
                "riskFactor": 0.5,
                "comparisonYears": 20,
                "surplusAllocation": "pro-rata"
            }"#,
        )
        .expect("valid payload");

        assert_eq!(request.inputs.loans.len(), 1);
        assert_eq!(request.inputs.loans[0].loan_type, Some(LoanType::Auto));
        assert_approx(request.inputs.monthly_budget, 900.0);
        assert_approx(request.config.benchmark_return, 8.0);
        assert_approx(request.inputs.risk_factor, 0.5);
        assert_eq!(request.config.comparison_years, 20);
        assert_eq!(request.config.surplus_allocation, SurplusAllocation::ProRata);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let cases = [
            (r#"{"riskFactor": 0}"#, "riskFactor"),
            (r#"{"riskFactor": 1.5}"#, "riskFactor"),
            (r#"{"monthlyBudget": -1}"#, "monthlyBudget"),
            (r#"{"comparisonYears": 0}"#, "comparisonYears"),
            (r#"{"comparisonYears": 500}"#, "comparisonYears"),
            (r#"{"annualReturn": -100}"#, "annualReturn"),
            (
                r#"{"loans": [{"id": 1, "name": "A", "balance": -5,
                               "interestRate": 1, "minimumPayment": 1}]}"#,
                "loans[0].balance",
            ),
            (
                r#"{"loans": [{"id": 1, "name": " ", "balance": 5,
                               "interestRate": 1, "minimumPayment": 1}]}"#,
                "loans[0].name",
            ),
        ];
        for (json, field) in cases {
            let err = request_from_json(json).expect_err(json);
            assert_eq!(field_of(err), field, "payload {json}");
        }
    }

    #[test]
    fn rejects_duplicate_loan_ids() {
        let err = request_from_json(
            r#"{"loans": [
                {"id": 1, "name": "A", "balance": 5, "interestRate": 1, "minimumPayment": 1},
                {"id": 1, "name": "B", "balance": 5, "interestRate": 1, "minimumPayment": 1}
            ]}"#,
        )
        .expect_err("duplicate ids");
        assert_eq!(field_of(err), "loans[1].id");
    }

    #[test]
    fn malformed_json_is_reported_as_json_error() {
        let err = request_from_json("{\"loans\": 3}").expect_err("wrong type");
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn cli_flags_take_precedence_over_payload() {
        let mut payload = serde_json::from_str::<ComputePayload>(
            r#"{"monthlyBudget": 500, "annualReturn": 5, "comparisonYears": 10}"#,
        )
        .expect("payload");
        let args = ComputeArgs {
            budget: Some(1_500.0),
            years: Some(25),
            allocation: Some(CliSurplusAllocation::ProRata),
            ..ComputeArgs::default()
        };
        apply_cli_overrides(&mut payload, &args);

        let request = compute_request_from_payload(payload).expect("valid");
        assert_approx(request.inputs.monthly_budget, 1_500.0);
        assert_approx(request.config.benchmark_return, 5.0);
        assert_eq!(request.config.comparison_years, 25);
        assert_eq!(request.config.surplus_allocation, SurplusAllocation::ProRata);
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "payoff", "compute", "--budget", "1000", "--return", "7", "--risk-factor", "0.6",
            "--pretty",
        ])
        .expect("compute parses");
        match cli.command {
            Command::Compute(args) => {
                assert_eq!(args.budget, Some(1_000.0));
                assert_eq!(args.annual_return, Some(7.0));
                assert_eq!(args.risk_factor, Some(0.6));
                assert!(args.pretty);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(
            Cli::try_parse_from(["payoff", "amortize", "--principal", "1000", "--rate", "5"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "payoff", "amortize", "--principal", "1000", "--rate", "5", "--payment", "100",
                "--term-years", "3",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "payoff", "tax", "--balance", "1000", "--rate", "5", "--loan-type", "mortgage-bond",
                "--country", "dk",
            ])
            .is_ok()
        );
    }

    #[test]
    fn amortize_from_term_matches_level_payment() {
        let args = AmortizeArgs {
            principal: 25_000.0,
            rate: 5.8,
            payment: None,
            term_years: Some(10.0),
            extra: 0.0,
            max_years: 50,
            pretty: false,
        };
        let response = build_amortize_response(&args).expect("valid");
        assert!((response.monthly_payment - 275.047).abs() < 1e-3);
        assert_eq!(response.mode, CalculationMode::TermDriven);
        assert_eq!(response.term_years, Some(10.0));
        assert_eq!(response.schedule.months_to_payoff, 120);
        assert!(response.schedule.converged);
        assert!(response.extra_payment_impact.is_none());
    }

    #[test]
    fn amortize_with_extra_reports_impact() {
        let args = AmortizeArgs {
            principal: 25_000.0,
            rate: 5.8,
            payment: Some(275.0),
            term_years: None,
            extra: 725.0,
            max_years: 50,
            pretty: true,
        };
        let response = build_amortize_response(&args).expect("valid");
        assert_eq!(response.mode, CalculationMode::PaymentDriven);
        assert_approx(response.term_years.unwrap_or(0.0), 121.0 / 12.0);
        let impact = response.extra_payment_impact.expect("impact present");
        assert_eq!(impact.baseline.payoff_time_months, 121);
        assert!(impact.months_saved > 90);
        assert!(impact.interest_saved > 0.0);
        assert_eq!(response.schedule.entries[0].extra_payment, 725.0);

        let json = run_amortize(&args).expect("serializes");
        assert!(json.contains("\"extraPaymentImpact\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn amortize_leaves_term_open_when_payment_never_retires_balance() {
        let args = AmortizeArgs {
            principal: 10_000.0,
            rate: 12.0,
            payment: Some(80.0),
            term_years: None,
            extra: 0.0,
            max_years: 10,
            pretty: false,
        };
        let response = build_amortize_response(&args).expect("valid");
        assert_eq!(response.term_years, None);
        assert!(!response.payoff.converged);
        assert!(!response.schedule.converged);
        assert_eq!(response.schedule.entries.len(), 120);
    }

    #[test]
    fn amortize_rejects_bad_arguments() {
        let mut args = AmortizeArgs {
            principal: 1_000.0,
            rate: 5.0,
            payment: Some(0.0),
            term_years: None,
            extra: 0.0,
            max_years: 10,
            pretty: false,
        };
        assert_eq!(
            field_of(build_amortize_response(&args).expect_err("zero payment")),
            "--payment"
        );
        args.payment = Some(100.0);
        args.max_years = 0;
        assert_eq!(
            field_of(build_amortize_response(&args).expect_err("zero horizon")),
            "--max-years"
        );
    }

    #[test]
    fn tax_response_uses_country_rules() {
        let response = build_tax_response(&TaxArgs {
            balance: 100_000.0,
            rate: 4.0,
            loan_type: CliLoanType::MortgageBond,
            country: "dk".to_string(),
            pretty: false,
        })
        .expect("valid");
        assert!(response.deduction.deductible);
        assert_eq!(response.deduction.country_code, "DK");
        assert_approx(response.interest_cost_multiplier, 0.67);
        assert_approx(response.effective_interest_rate, 4.0 * 0.67);
    }

    #[test]
    fn project_applies_rate_overrides() {
        let response = build_project_response(&ProjectArgs {
            monthly: 500.0,
            years: 2,
            annual_return: Some(0.0),
            inflation: None,
            risk_factor: None,
            pretty: false,
        })
        .expect("valid");
        assert_eq!(response.projection.points.len(), 24);
        assert_approx(response.projection.final_balance, 12_000.0);
        assert_approx(response.projection.risk_adjusted_balance, 12_000.0);
    }

    #[tokio::test]
    async fn compute_command_returns_report_json() {
        let dir = std::env::temp_dir().join(format!("payoff-api-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("payload.json");
        std::fs::write(
            &path,
            r#"{"loans": [{"id": 1, "name": "Student loan", "balance": 25000,
                           "interestRate": 5.8, "minimumPayment": 275}],
                "monthlyBudget": 1000}"#,
        )
        .expect("write payload");

        let json = run_compute(ComputeArgs {
            input: Some(path.clone()),
            ..ComputeArgs::default()
        })
        .await
        .expect("compute succeeds");
        let _ = std::fs::remove_file(&path);

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let strategies = value["strategies"].as_object().expect("strategies map");
        assert_eq!(strategies.len(), 4);
        assert!(strategies.contains_key(StrategyName::DebtAvalanche.label()));
        assert_eq!(value["loanComparisons"].as_array().map(Vec::len), Some(1));
        assert!(value["optimal"]["name"].is_string());
    }
}
