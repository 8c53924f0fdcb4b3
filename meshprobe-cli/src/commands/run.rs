//! `meshprobe run` command handler
//!
//! Resolves the target topology, builds the fixture set, runs the
//! controller scenario and renders the aggregated check report. The
//! process exits non-zero when the pass-rate threshold is missed.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use meshprobe_controller_client::GrpcConnector;
use meshprobe_core::check::CheckReport;
use meshprobe_core::config::MeshprobeConfig;
use meshprobe_core::fixture::FixtureSet;
use meshprobe_core::topology::Topology;
use meshprobe_scenario::ScenarioRunner;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `run` command.
pub async fn execute(
    args: RunArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = MeshprobeConfig::load_or_default(config_path).await?;
    if let Some(mode) = args.mode {
        config.target.mode = mode;
    }
    if args.fixed_names {
        config.fixtures.naming = "fixed".to_owned();
    }
    config.validate()?;

    let topology = Topology::resolve(&config)?;
    let fixtures = FixtureSet::for_config(&config.fixtures);
    let target = topology.controller_grpc_target();

    info!(mode = %topology.mode, addr = %target, "running controller scenario");

    let connector = GrpcConnector::new(target.clone());
    let runner = ScenarioRunner::new(&connector, &fixtures, topology.mode);
    let report = runner.run().await;

    let payload = RunReport::build(topology.mode.to_string(), target, &report, args.threshold);
    writer.render(&payload)?;

    if !payload.success {
        return Err(CliError::ChecksFailed {
            failed: payload.failed,
            total: payload.total,
        });
    }
    Ok(())
}

/// Aggregated scenario result for rendering.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub mode: String,
    pub target: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub threshold: f64,
    pub success: bool,
    pub failures: Vec<FailedCheck>,
}

#[derive(Debug, Serialize)]
pub struct FailedCheck {
    pub name: String,
    pub detail: Option<String>,
}

impl RunReport {
    fn build(mode: String, target: String, report: &CheckReport, threshold: f64) -> Self {
        Self {
            mode,
            target,
            total: report.total(),
            passed: report.passed_count(),
            failed: report.failed_count(),
            pass_rate: report.pass_rate(),
            threshold,
            success: report.is_success(threshold),
            failures: report
                .failures()
                .map(|c| FailedCheck {
                    name: c.name.clone(),
                    detail: c.detail.clone(),
                })
                .collect(),
        }
    }
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "Controller scenario (mode={}, target={})",
            self.mode, self.target
        )?;
        if self.total == 0 {
            writeln!(w, "No private surface checks in this mode.")?;
        } else {
            writeln!(
                w,
                "Checks: {} total, {} passed, {} failed (pass rate {:.1}%)",
                self.total,
                self.passed,
                self.failed,
                self.pass_rate * 100.0
            )?;
            for failure in &self.failures {
                match &failure.detail {
                    Some(detail) => writeln!(w, "  {} {}: {}", "FAIL".red(), failure.name, detail)?,
                    None => writeln!(w, "  {} {}", "FAIL".red(), failure.name)?,
                }
            }
        }
        let verdict = if self.success {
            "PASS".green()
        } else {
            "FAIL".red()
        };
        writeln!(w, "Result: {verdict}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CheckReport {
        let mut report = CheckReport::new();
        report.record_pass("a");
        report.record_fail("b", "wrong value");
        report
    }

    #[test]
    fn build_summarises_the_check_report() {
        let report = sample_report();
        let payload = RunReport::build(
            "direct".to_owned(),
            "controller:3085".to_owned(),
            &report,
            1.0,
        );
        assert_eq!(payload.total, 2);
        assert_eq!(payload.failed, 1);
        assert!(!payload.success);
        assert_eq!(payload.failures.len(), 1);
        assert_eq!(payload.failures[0].name, "b");
    }

    #[test]
    fn render_text_lists_failures() {
        colored::control::set_override(false);
        let report = sample_report();
        let payload = RunReport::build(
            "direct".to_owned(),
            "controller:3085".to_owned(),
            &report,
            1.0,
        );
        let mut buffer = Vec::new();
        payload.render_text(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("2 total, 1 passed, 1 failed"));
        assert!(text.contains("FAIL b: wrong value"));
        assert!(text.contains("Result: FAIL"));
    }

    #[test]
    fn empty_run_renders_vacuous_pass() {
        colored::control::set_override(false);
        let payload = RunReport::build(
            "api-gateway".to_owned(),
            "gw:3085".to_owned(),
            &CheckReport::new(),
            1.0,
        );
        assert!(payload.success);
        let mut buffer = Vec::new();
        payload.render_text(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("No private surface checks"));
        assert!(text.contains("Result: PASS"));
    }
}
