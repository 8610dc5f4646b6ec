use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use revolver_core::analysis::{self, RevolverAnalysisInput};
use revolver_core::scenario;
use revolver_core::sweep;
use revolver_core::{CovenantThresholds, FacilityConfig};

use crate::input;

/// Facility term flags shared by every subcommand.
#[derive(Args)]
pub struct FacilityFlags {
    /// Reference rate before shocks (decimal, e.g. 0.05)
    #[arg(long, default_value = "0.05")]
    pub base_rate: Decimal,

    /// Credit spread over the reference rate
    #[arg(long, default_value = "0.02")]
    pub spread: Decimal,

    /// Annual commitment fee on the undrawn limit
    #[arg(long, default_value = "0.005")]
    pub commitment_fee: Decimal,

    /// Committed facility size
    #[arg(long, default_value = "5000000")]
    pub revolver_limit: Decimal,

    /// Cash floor the sweep defends each period
    #[arg(long, default_value = "50000")]
    pub min_cash_target: Decimal,
}

impl FacilityFlags {
    fn to_config(&self) -> FacilityConfig {
        FacilityConfig {
            base_rate: self.base_rate,
            spread: self.spread,
            commitment_fee: self.commitment_fee,
            revolver_limit: self.revolver_limit,
            min_cash_target: self.min_cash_target,
        }
    }
}

/// Arguments for the liquidity sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub facility: FacilityFlags,

    /// Comma-separated cash forecast, one value per period (e.g. "40000,-10000,60000")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub forecast: Option<Vec<Decimal>>,
}

/// Arguments for rate-shock scenario pricing
#[derive(Args)]
pub struct ScenariosArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub facility: FacilityFlags,

    /// Comma-separated cash forecast, one value per period
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub forecast: Option<Vec<Decimal>>,
}

/// Arguments for the full analysis pipeline
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub facility: FacilityFlags,

    /// Comma-separated cash forecast, one value per period
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub forecast: Option<Vec<Decimal>>,

    /// Comma-separated EBITDA per period (defaults to 150000 each period)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub ebitda: Option<Vec<Decimal>>,

    /// Fraction of the drawn balance swapped to fixed (0-1)
    #[arg(long, default_value = "0.50")]
    pub hedge_percent: Decimal,

    /// Fixed leg of the swap
    #[arg(long, default_value = "0.032")]
    pub fixed_rate: Decimal,

    /// DSCR covenant floor
    #[arg(long, default_value = "1.10")]
    pub dscr_floor: Decimal,

    /// Utilization covenant ceiling
    #[arg(long, default_value = "0.85")]
    pub util_limit: Decimal,
}

/// On-disk input for `sweep` and `scenarios`: facility terms plus the
/// cash forecast.
#[derive(Deserialize)]
struct TrajectoryInput {
    facility: FacilityConfig,
    liquidity_forecast: Vec<Decimal>,
}

fn resolve_trajectory_input(
    input: &Option<String>,
    facility: &FacilityFlags,
    forecast: Option<Vec<Decimal>>,
) -> Result<(FacilityConfig, Vec<Decimal>), Box<dyn std::error::Error>> {
    if let Some(path) = input {
        let file: TrajectoryInput = input::read_json(path)?;
        return Ok((file.facility, file.liquidity_forecast));
    }
    if let Some(data) = input::read_stdin()? {
        let file: TrajectoryInput = serde_json::from_value(data)?;
        return Ok((file.facility, file.liquidity_forecast));
    }
    let forecast = forecast.ok_or("--forecast is required (or provide --input / pipe JSON)")?;
    Ok((facility.to_config(), forecast))
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (config, forecast) = resolve_trajectory_input(&args.input, &args.facility, args.forecast)?;
    let trajectory = sweep::run_sweep(&config, &forecast)?;
    Ok(serde_json::to_value(trajectory)?)
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (config, forecast) = resolve_trajectory_input(&args.input, &args.facility, args.forecast)?;
    let trajectory = sweep::run_sweep(&config, &forecast)?;
    let tables = scenario::run_rate_scenarios(&config, &trajectory)?;
    Ok(serde_json::to_value(tables)?)
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: RevolverAnalysisInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let forecast = args
            .forecast
            .ok_or("--forecast is required (or provide --input / pipe JSON)")?;
        // Flat EBITDA when none is given, one figure per forecast period.
        let ebitda = args
            .ebitda
            .unwrap_or_else(|| vec![dec!(150_000); forecast.len()]);
        RevolverAnalysisInput {
            facility: args.facility.to_config(),
            liquidity_forecast: forecast,
            ebitda_forecast: ebitda,
            hedge_percent: args.hedge_percent,
            fixed_rate: args.fixed_rate,
            covenants: CovenantThresholds {
                dscr_floor: args.dscr_floor,
                util_limit: args.util_limit,
            },
        }
    };

    let result = analysis::run_revolver_analysis(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
