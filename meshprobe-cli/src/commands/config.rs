//! `meshprobe config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use meshprobe_core::config::MeshprobeConfig;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Attempts to load and validate the configuration file, reporting any
/// errors without aborting on the first render.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let result = MeshprobeConfig::load(config_path).await;

    let report = match result {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Loads and displays the effective configuration
/// (file + env overrides + defaults).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = MeshprobeConfig::load_or_default(config_path).await?;

    let content = match section.as_deref() {
        None => to_toml(&config)?,
        Some("general") => to_toml(&config.general)?,
        Some("target") => to_toml(&config.target)?,
        Some("fixtures") => to_toml(&config.fixtures)?,
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section '{other}' (expected general, target, fixtures)"
            )));
        }
    };

    let report = ConfigShowReport {
        source: config_path.display().to_string(),
        section,
        content,
    };
    writer.render(&report)?;
    Ok(())
}

fn to_toml<T: Serialize>(value: &T) -> Result<String, CliError> {
    toml::to_string_pretty(value).map_err(|e| CliError::Command(e.to_string()))
}

#[derive(Debug, Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Source: {}", self.source)?;
        if self.valid {
            writeln!(w, "Configuration is valid.")?;
        } else {
            writeln!(w, "Configuration is INVALID:")?;
            for error in &self.errors {
                writeln!(w, "  - {error}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigShowReport {
    pub source: String,
    pub section: Option<String>,
    pub content: String,
}

impl Render for ConfigShowReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write!(w, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_serialises_default_config_sections() {
        let config = MeshprobeConfig::default();
        let toml = to_toml(&config.target).unwrap();
        assert!(toml.contains("mode = \"direct\""));
        assert!(toml.contains("protocol = \"http\""));
    }

    #[test]
    fn validation_report_renders_errors() {
        let report = ConfigValidationReport {
            source: "meshprobe.toml".to_owned(),
            valid: false,
            errors: vec!["bad mode".to_owned()],
        };
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("INVALID"));
        assert!(text.contains("bad mode"));
    }
}
