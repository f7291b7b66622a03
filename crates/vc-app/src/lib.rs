//! Shared application service layer for the cycle analysis tools.
//!
//! Ties the configuration format, the cycle model and the property backend
//! together and produces serializable reports for the CLI.

pub mod analysis;
pub mod cycle_service;
pub mod error;
pub mod report;

pub use analysis::{run_analysis, run_analysis_file};
pub use cycle_service::{
    CycleRequest, FitRequest, SensorRequest, evaluate_cycle, evaluate_sensor_cycle, minimizer_for,
    run_fit,
};
pub use error::{AppError, AppResult};
pub use report::{
    AnalysisReport, CycleReport, FitReport, PointReport, render_cycle_text, render_text,
};

/// Output encodings for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(AppError::InvalidInput(format!("unknown report format '{other}'"))),
        }
    }
}

/// Encode an analysis report.
pub fn format_report(report: &AnalysisReport, format: ReportFormat) -> AppResult<String> {
    Ok(match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => serde_json::to_string_pretty(report)?,
        ReportFormat::Yaml => serde_yaml::to_string(report)?,
    })
}
