//! Preview a report payload from a JSON bundle of `{ report, lab, settings }`.

use std::path::PathBuf;
use std::process::ExitCode;

use serde::Deserialize;

use pathlab_lib::config::APP_NAME;
use pathlab_lib::models::{Lab, LabReportSettings, Report};
use pathlab_lib::{build_render_payload, RenderConfig, RenderOptions};

const USAGE: &str = "usage: pathlab-preview <bundle.json> [--no-header] [--no-footer]";

#[derive(Debug, Deserialize)]
struct Bundle {
    report: Report,
    lab: Option<Lab>,
    settings: Option<LabReportSettings>,
}

fn parse_args(args: &[String]) -> Result<(PathBuf, RenderOptions), String> {
    let mut path = None;
    let mut options = RenderOptions::default();

    for arg in args {
        match arg.as_str() {
            "--no-header" => options.show_header = false,
            "--no-footer" => options.show_footer = false,
            other if other.starts_with("--") => return Err(format!("Unknown flag: {other}")),
            other if path.is_none() => path = Some(PathBuf::from(other)),
            other => return Err(format!("Unexpected argument: {other}")),
        }
    }

    let path = path.ok_or_else(|| USAGE.to_string())?;
    Ok((path, options))
}

fn run(args: &[String]) -> Result<String, String> {
    let (path, options) = parse_args(args)?;
    let config = RenderConfig::from_env().map_err(|e| e.to_string())?;

    let raw = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
    let bundle: Bundle = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid bundle {}: {e}", path.display()))?;

    let payload = build_render_payload(
        &bundle.report,
        bundle.lab.as_ref(),
        bundle.settings.as_ref(),
        options,
        &config,
    )
    .map_err(|e| e.to_string())?;

    payload.to_json().map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    pathlab_lib::init_tracing();
    tracing::debug!("{} starting v{}", APP_NAME, pathlab_lib::config::APP_VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Preview failed");
            eprintln!("{APP_NAME}: {e}");
            ExitCode::FAILURE
        }
    }
}
