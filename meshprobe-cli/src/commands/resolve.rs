//! `meshprobe resolve` command handler
//!
//! Pure topology resolution: prints where each backend would be reached
//! for the configured deployment mode. Performs zero network calls, so it
//! is safe to run against production configuration.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use meshprobe_core::config::MeshprobeConfig;
use meshprobe_core::topology::Topology;

use crate::cli::ResolveArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `resolve` command.
pub async fn execute(
    args: ResolveArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = MeshprobeConfig::load_or_default(config_path).await?;
    if let Some(mode) = args.mode {
        config.target.mode = mode;
    }
    config.validate()?;

    let topology = Topology::resolve(&config)?;
    let report = TopologyReport::build(&topology);
    writer.render(&report)?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TopologyReport {
    pub mode: String,
    pub controller_grpc_target: String,
    pub backends: Vec<BackendEndpoint>,
}

#[derive(Debug, Serialize)]
pub struct BackendEndpoint {
    pub backend: String,
    pub host: String,
    pub public_url: String,
    pub private_url: Option<String>,
}

impl TopologyReport {
    fn build(topology: &Topology) -> Self {
        Self {
            mode: topology.mode.to_string(),
            controller_grpc_target: topology.controller_grpc_target(),
            backends: topology
                .iter()
                .map(|(kind, endpoint)| BackendEndpoint {
                    backend: kind.to_string(),
                    host: endpoint.host.clone(),
                    public_url: endpoint.public_url(),
                    private_url: endpoint.private_url(),
                })
                .collect(),
        }
    }
}

impl Render for TopologyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Topology (mode={})", self.mode)?;
        writeln!(w, "Controller gRPC target: {}", self.controller_grpc_target)?;
        for backend in &self.backends {
            match &backend.private_url {
                Some(private) => writeln!(
                    w,
                    "  {:<18} public {}  private {}",
                    backend.backend, backend.public_url, private
                )?,
                None => writeln!(
                    w,
                    "  {:<18} public {}",
                    backend.backend, backend.public_url
                )?,
            }
        }
        Ok(())
    }
}
