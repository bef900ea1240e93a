use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{ScanError, ScanResult};

/// Configuration for a scan run.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.seqscout.yaml` in the current directory
/// 3. Global `$HOME/.config/seqscout/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Genome FASTA file to scan
/// genome_path: "genome.fa"
///
/// # FASTA file with the pattern sequences
/// patterns_path: "sequences.fa"
///
/// # Where the CSV match report is written
/// output_path: "matches.csv"
///
/// # Thread count (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// # CLI Integration
///
/// When using the CLI, command-line arguments take precedence over config
/// file values. The merging behavior is defined in the `merge_with_cli`
/// method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Path to the genome FASTA file
    #[serde(default)]
    pub genome_path: PathBuf,

    /// Path to the FASTA file with the pattern sequences
    #[serde(default)]
    pub patterns_path: PathBuf,

    /// Path the CSV match report is written to
    #[serde(default)]
    pub output_path: PathBuf,

    /// Number of worker threads for the scan
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> ScanResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> ScanResult<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ScanError::config_error(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let mut builder = ConfigBuilder::builder();

        // Default config locations
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("seqscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".seqscout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ScanError::config_error(e.to_string()))
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.genome_path.as_os_str().is_empty() {
            self.genome_path = cli_config.genome_path;
        }
        if !cli_config.patterns_path.as_os_str().is_empty() {
            self.patterns_path = cli_config.patterns_path;
        }
        if !cli_config.output_path.as_os_str().is_empty() {
            self.output_path = cli_config.output_path;
        }
        if cli_config.thread_count != default_thread_count() {
            self.thread_count = cli_config.thread_count;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
