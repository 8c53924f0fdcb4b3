//! CLI-specific error types and exit code mapping

use meshprobe_core::error::MeshprobeError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The scenario ran but missed the pass-rate threshold.
    #[error("{failed} of {total} checks failed")]
    ChecksFailed { failed: usize, total: usize },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from meshprobe-core.
    #[error("{0}")]
    Core(#[from] MeshprobeError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error              |
    /// | 2    | Configuration error                  |
    /// | 3    | Controller not reachable             |
    /// | 4    | Scenario checks failed               |
    /// | 10   | IO error                             |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Core(MeshprobeError::Config(_)) => 2,
            Self::Core(MeshprobeError::Connectivity(_)) => 3,
            Self::ChecksFailed { .. } => 4,
            Self::Io(_) | Self::Core(MeshprobeError::Io(_)) => 10,
            Self::Command(_) | Self::JsonSerialize(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshprobe_core::error::ConfigError;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(CliError::Config("bad".to_owned()).exit_code(), 2);
        assert_eq!(
            CliError::Core(MeshprobeError::Config(ConfigError::GatewayPairIncomplete))
                .exit_code(),
            2
        );
        assert_eq!(
            CliError::ChecksFailed {
                failed: 1,
                total: 29
            }
            .exit_code(),
            4
        );
        assert_eq!(CliError::Command("oops".to_owned()).exit_code(), 1);
    }
}
