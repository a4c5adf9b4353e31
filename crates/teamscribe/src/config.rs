//! Configuration for the teamscribe publisher
//!
//! This module provides the CLI configuration for the binary: event source
//! and sink selection plus logging options.

use std::path::PathBuf;

use clap::Parser;

/// Teamscribe - publish test lifecycle events as TeamCity service messages
///
/// Reads newline-delimited JSON test events from stdin and writes
/// `##teamcity[...]` service messages to stdout.
///
/// Example:
///   test-runner --report-events | teamscribe
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "teamscribe")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Read events from a file instead of stdin
    #[arg(short, long, env = "TEAMSCRIBE_INPUT")]
    pub input: Option<PathBuf>,

    /// Write service messages to a file instead of stdout
    ///
    /// The parent directory is created if it does not exist.
    #[arg(short, long, env = "TEAMSCRIBE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so the service message stream on stdout
    /// stays machine-readable.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist or is not a file
    /// - The output parent directory cannot be created
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.clone()));
            }
        }

        if let Some(ref output) = self.output
            && let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::OutputDirectoryCreateFailed(parent.to_path_buf(), e)
            })?;
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),

    /// Failed to create output directory
    #[error("Failed to create output directory {0}: {1}")]
    OutputDirectoryCreateFailed(PathBuf, std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345.jsonl")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputNotFound(_))));
    }

    #[test]
    fn test_validate_directory_as_input() {
        let config = Config {
            input: Some(PathBuf::from("/tmp")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputNotFile(_))));
    }

    #[test]
    fn test_validate_default_is_ok() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
