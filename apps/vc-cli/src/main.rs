use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vc_app::{
    AppError, AppResult, CycleRequest, FitRequest, ReportFormat, SensorRequest, evaluate_cycle,
    evaluate_sensor_cycle, format_report, render_cycle_text, run_analysis_file, run_fit,
};
use vc_core::units::w;
use vc_cycle::{RatedPerformance, TemperatureBounds};
use vc_fluids::{CoolPropModel, Quantity, Refrigerant, parse_quantity, saturation_dome};
use vc_project::MinimizerDef;

#[derive(Parser)]
#[command(name = "vc-cli")]
#[command(about = "Vapour-compression refrigeration cycle analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print one cycle
    Cycle {
        #[arg(long, default_value = "R134a", value_parser = parse_fluid)]
        fluid: Refrigerant,
        /// Evaporator saturation temperature (e.g. "7 C", "280.15 K")
        #[arg(long, value_parser = temperature)]
        t_evap: f64,
        /// Condenser saturation temperature
        #[arg(long, value_parser = temperature)]
        t_cond: f64,
        #[arg(long, default_value = "5 K", value_parser = temperature_difference)]
        superheat: f64,
        #[arg(long, default_value = "5 K", value_parser = temperature_difference)]
        subcool: f64,
        /// Fixed isentropic efficiency, e.g. "0.7" or "70%" (default: built-in compressor curve)
        #[arg(long, value_parser = dimensionless)]
        eta: Option<f64>,
        /// Print the six-point layout with saturated states
        #[arg(long)]
        legacy: bool,
    },
    /// Build and print the cycle implied by measured pressures
    Sensor {
        #[arg(long, default_value = "R134a", value_parser = parse_fluid)]
        fluid: Refrigerant,
        /// Suction pressure (e.g. "307.7 kPa", "3.077 bar")
        #[arg(long, value_parser = pressure)]
        suction: f64,
        /// Discharge pressure
        #[arg(long, value_parser = pressure)]
        discharge: f64,
        #[arg(long, default_value = "5 K", value_parser = temperature_difference)]
        superheat: f64,
        #[arg(long, default_value = "0 K", value_parser = temperature_difference)]
        subcool: f64,
        #[arg(long, value_parser = dimensionless)]
        eta: Option<f64>,
        #[arg(long)]
        legacy: bool,
    },
    /// Fit saturation temperatures to a target COP
    Fit {
        #[arg(long, default_value = "R134a", value_parser = parse_fluid)]
        fluid: Refrigerant,
        /// Target COP; or give the rating with --capacity and --power-input
        #[arg(long, required_unless_present_all = ["capacity", "power_input"])]
        target_cop: Option<f64>,
        /// Rated cooling capacity (e.g. "897 kW", "255 TR")
        #[arg(long, value_parser = power, conflicts_with = "target_cop", requires = "power_input")]
        capacity: Option<f64>,
        /// Rated electrical input
        #[arg(long, value_parser = power, requires = "capacity")]
        power_input: Option<f64>,
        #[arg(long, default_value = "5 K", value_parser = temperature_difference)]
        superheat: f64,
        #[arg(long, default_value = "5 K", value_parser = temperature_difference)]
        subcool: f64,
        #[arg(long, default_value = "0 C", value_parser = temperature)]
        t_evap_min: f64,
        #[arg(long, default_value = "15 C", value_parser = temperature)]
        t_evap_max: f64,
        #[arg(long, default_value = "35 C", value_parser = temperature)]
        t_cond_min: f64,
        #[arg(long, default_value = "55 C", value_parser = temperature)]
        t_cond_max: f64,
        #[arg(long, value_enum, default_value_t = Method::NelderMead)]
        method: Method,
    },
    /// Run a design against actual analysis from a configuration file
    Analyze {
        /// Path to the YAML or JSON configuration
        config_path: PathBuf,
        #[arg(long, default_value = "text")]
        format: ReportFormat,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the saturation dome as CSV
    Dome {
        #[arg(long, default_value = "R134a", value_parser = parse_fluid)]
        fluid: Refrigerant,
        #[arg(long, default_value_t = vc_fluids::DEFAULT_DOME_POINTS)]
        points: usize,
    },
    /// Validate a configuration file
    Validate {
        config_path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    NelderMead,
    Gradient,
}

impl From<Method> for MinimizerDef {
    fn from(m: Method) -> Self {
        match m {
            Method::NelderMead => MinimizerDef::NelderMead,
            Method::Gradient => MinimizerDef::Gradient,
        }
    }
}

fn parse_fluid(s: &str) -> Result<Refrigerant, String> {
    s.parse().map_err(|e: &str| format!("{e}: {s}"))
}

fn temperature(s: &str) -> Result<f64, String> {
    parse_quantity(s, Quantity::Temperature).map_err(|e| e.to_string())
}

fn temperature_difference(s: &str) -> Result<f64, String> {
    parse_quantity(s, Quantity::TemperatureDifference).map_err(|e| e.to_string())
}

fn pressure(s: &str) -> Result<f64, String> {
    parse_quantity(s, Quantity::Pressure).map_err(|e| e.to_string())
}

fn power(s: &str) -> Result<f64, String> {
    parse_quantity(s, Quantity::Power).map_err(|e| e.to_string())
}

fn dimensionless(s: &str) -> Result<f64, String> {
    parse_quantity(s, Quantity::Dimensionless).map_err(|e| e.to_string())
}

/// Target COP from the command line, either given directly or from a rating.
fn target_cop(
    target_cop: Option<f64>,
    capacity: Option<f64>,
    power_input: Option<f64>,
) -> AppResult<f64> {
    match (target_cop, capacity, power_input) {
        (Some(cop), _, _) => Ok(cop),
        (None, Some(q), Some(p)) => Ok(RatedPerformance::new(w(q), w(p))?.cop()),
        _ => Err(AppError::InvalidInput(
            "give --target-cop or both --capacity and --power-input".into(),
        )),
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cycle {
            fluid,
            t_evap,
            t_cond,
            superheat,
            subcool,
            eta,
            legacy,
        } => cmd_cycle(CycleRequest {
            fluid,
            t_evap_k: t_evap,
            t_cond_k: t_cond,
            superheat_k: superheat,
            subcool_k: subcool,
            eta,
            legacy,
        }),
        Commands::Sensor {
            fluid,
            suction,
            discharge,
            superheat,
            subcool,
            eta,
            legacy,
        } => cmd_sensor(SensorRequest {
            fluid,
            suction_pressure_pa: suction,
            discharge_pressure_pa: discharge,
            superheat_k: superheat,
            subcool_k: subcool,
            eta,
            legacy,
        }),
        Commands::Fit {
            fluid,
            target_cop: target,
            capacity,
            power_input,
            superheat,
            subcool,
            t_evap_min,
            t_evap_max,
            t_cond_min,
            t_cond_max,
            method,
        } => cmd_fit(FitRequest {
            fluid,
            target_cop: target_cop(target, capacity, power_input)?,
            superheat_k: superheat,
            subcool_k: subcool,
            bounds: TemperatureBounds {
                t_evap: (t_evap_min, t_evap_max),
                t_cond: (t_cond_min, t_cond_max),
            },
            initial: None,
            method: method.into(),
        }),
        Commands::Analyze {
            config_path,
            format,
            output,
        } => cmd_analyze(&config_path, format, output.as_deref()),
        Commands::Dome { fluid, points } => cmd_dome(fluid, points),
        Commands::Validate { config_path } => cmd_validate(&config_path),
    }
}

fn cmd_cycle(request: CycleRequest) -> AppResult<()> {
    let report = evaluate_cycle(&CoolPropModel::new(), &request)?;
    print!("{}", render_cycle_text(&report));
    Ok(())
}

fn cmd_sensor(request: SensorRequest) -> AppResult<()> {
    let report = evaluate_sensor_cycle(&CoolPropModel::new(), &request)?;
    print!("{}", render_cycle_text(&report));
    Ok(())
}

fn cmd_fit(request: FitRequest) -> AppResult<()> {
    let report = run_fit(&CoolPropModel::new(), &request)?;
    println!("Fit ({}) for target COP {:.3}", report.method, report.target_cop);
    println!(
        "  T_evap = {:.2} K   T_cond = {:.2} K",
        report.t_evap_k, report.t_cond_k
    );
    println!(
        "  residual = {:.3e}   converged = {}   ({} iterations, {} evaluations, {})",
        report.residual, report.converged, report.iterations, report.evaluations, report.termination
    );
    if !report.converged {
        return Err(AppError::FitNotConverged {
            residual: report.residual,
        });
    }
    Ok(())
}

fn cmd_analyze(config_path: &Path, format: ReportFormat, output: Option<&Path>) -> AppResult<()> {
    info!(path = %config_path.display(), "running analysis");
    let report = run_analysis_file(config_path)?;
    let text = format_report(&report, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            println!("✓ Report written: {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_dome(fluid: Refrigerant, points: usize) -> AppResult<()> {
    let dome = saturation_dome(&CoolPropModel::new(), fluid, points)?;
    println!("t_k,p_bubble_pa,h_bubble_j_per_kg,s_bubble_j_per_kg_k,p_dew_pa,h_dew_j_per_kg,s_dew_j_per_kg_k");
    for p in &dome.points {
        println!(
            "{},{},{},{},{},{},{}",
            p.temperature,
            p.bubble.pressure,
            p.bubble.enthalpy,
            p.bubble.entropy,
            p.dew.pressure,
            p.dew.enthalpy,
            p.dew.entropy
        );
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = vc_project::load(config_path)?;
    println!("✓ Configuration is valid ({}, {})", config.name, config.fluid);
    Ok(())
}
