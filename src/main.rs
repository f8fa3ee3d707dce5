//! WACC Calculator CLI
//!
//! Command-line interface for single and batch WACC calculations

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use wacc_calculator::batch::{load_cases, run_batch, write_outcomes};
use wacc_calculator::{compute_wacc, CapitalInput};

#[derive(Parser, Debug)]
#[command(name = "wacc", version, about = "Weighted Average Cost of Capital calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute WACC for one set of inputs
    Compute(ComputeArgs),
    /// Compute WACC for every row of a CSV file
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct ComputeArgs {
    /// Market value of equity, in crore
    #[arg(long, allow_hyphen_values = true)]
    equity_value: f64,

    /// Market value of debt, in crore
    #[arg(long, allow_hyphen_values = true)]
    debt_value: f64,

    /// Cost of equity as a decimal; when omitted it is derived from CAPM
    #[arg(long, allow_hyphen_values = true)]
    re: Option<f64>,

    /// CAPM risk-free rate
    #[arg(long, allow_hyphen_values = true)]
    rf: Option<f64>,

    /// CAPM beta
    #[arg(long, allow_hyphen_values = true)]
    beta: Option<f64>,

    /// CAPM market risk premium (Rm - Rf)
    #[arg(long, allow_hyphen_values = true)]
    market_risk_premium: Option<f64>,

    /// Pre-tax cost of debt as a decimal
    #[arg(long, allow_hyphen_values = true)]
    rd: Option<f64>,

    /// Corporate tax rate as a decimal
    #[arg(long, allow_hyphen_values = true)]
    tax_rate: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV with columns id,equityValue,debtValue,re,rf,beta,marketRiskPremium,rd,taxRate
    #[arg(long)]
    input: PathBuf,

    /// Output CSV (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ComputeArgs {
    fn to_input(&self) -> CapitalInput {
        CapitalInput {
            equity_value: Some(self.equity_value),
            debt_value: Some(self.debt_value),
            cost_of_equity: self.re,
            risk_free_rate: self.rf,
            beta: self.beta,
            market_risk_premium: self.market_risk_premium,
            cost_of_debt: self.rd,
            tax_rate: self.tax_rate,
        }
    }
}

fn run_compute(args: &ComputeArgs) -> anyhow::Result<()> {
    let result = compute_wacc(&args.to_input()).map_err(|e| anyhow!(e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("WACC:            {:.4}%", result.wacc * 100.0);
    println!("Cost of equity:  {:.4}%", result.cost_of_equity * 100.0);
    println!("Cost of debt:    {:.4}%", result.cost_of_debt * 100.0);
    println!("Tax rate:        {:.4}%", result.tax_rate * 100.0);
    println!("Weight equity:   {:.6}", result.weight_equity);
    println!("Weight debt:     {:.6}", result.weight_debt);
    for note in &result.notes {
        println!("  - {}", note);
    }
    Ok(())
}

fn run_batch_file(args: &BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let cases = load_cases(&args.input)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    log::info!("Loaded {} cases in {:?}", cases.len(), start.elapsed());

    let outcomes = run_batch(&cases);
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
            write_outcomes(file, &outcomes).map_err(|e| anyhow!("{}", e))?;
            eprintln!("Results written to: {}", path.display());
        }
        None => write_outcomes(io::stdout().lock(), &outcomes).map_err(|e| anyhow!("{}", e))?,
    }

    log::info!(
        "Computed {} cases ({} rejected) in {:?}",
        outcomes.len(),
        failed,
        start.elapsed()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Compute(args) => run_compute(args),
        Command::Batch(args) => run_batch_file(args),
    }
}
