//! GridKit Smoke Harness
//!
//! Replays a scripted sequence of layout events (resizes, configuration changes,
//! item edits) against the dashboard layout engine and prints every resulting
//! layout as JSON. Without `--scenario` a built-in dashboard scenario is used.

mod scenario;

use std::path::PathBuf;

use anyhow::Context;
use serde_json::json;
use tracing::{error, info};

use scenario::{run_scenario, Scenario};

/// Parse command line arguments
struct Args {
    scenario: Option<PathBuf>,
    width: Option<f32>,
    pretty: bool,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut scenario = None;
        let mut width = None;
        let mut pretty = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scenario" => {
                    scenario = args.next().map(PathBuf::from);
                }
                "--width" => {
                    if let Some(val) = args.next() {
                        width = val.parse().ok();
                    }
                }
                "--pretty" => {
                    pretty = true;
                }
                _ => {}
            }
        }

        Self {
            scenario,
            width,
            pretty,
        }
    }

    fn load_scenario(&self) -> anyhow::Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::load(path)
                .with_context(|| format!("loading scenario {}", path.display()))?,
            None => Scenario::builtin().context("parsing built-in scenario")?,
        };

        if let Some(width) = self.width {
            scenario.config.container_width = width;
        }

        Ok(scenario)
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!(
        scenario = ?args.scenario,
        width = ?args.width,
        "GridKit smoke harness starting"
    );

    let scenario = args.load_scenario()?;

    let result = match run_scenario(&scenario) {
        Ok(frames) => {
            let last = frames.last().map(|frame| &frame.layout);
            json!({
                "status": "pass",
                "steps": scenario.steps.len(),
                "final_layout": last.map(|layout| json!({
                    "columns": layout.column_count(),
                    "column_width": layout.columns.column_width(),
                    "rows": layout.row_count(),
                    "content_height": layout.geometry.content_height(),
                })),
                "frames": frames,
            })
        }
        Err(e) => {
            error!(error = %e, "Scenario failed");
            json!({
                "status": "fail",
                "reason": e.to_string(),
            })
        }
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");

    if result["status"] != "pass" {
        std::process::exit(1);
    }

    Ok(())
}
