//! CLI Tooling
//!
//! Command-line interface for the indexer. Each command runs one fetcher
//! operation to completion on a runtime owned by the context.

use crate::config::{ConfigLoader, IndexerConfig, PlatformEndpoint};
use crate::error::ApiError;
use crate::fetcher::Fetcher;
use crate::identity::is_resolvable_identity;
use crate::logging::LoggingConfig;
use crate::types::{ConnectionEntry, PlatformTag, PoapRecommendation, UserPoapIdentity};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Social Indexer CLI - Web3 social graph aggregation
#[derive(Parser)]
#[command(name = "social-indexer")]
#[command(about = "Aggregate an address's social graph and POAP co-attendees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for indexer.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line logging flags on top of the configured settings.
    pub fn logging_overrides(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merged follow graph across every enabled platform
    Connections {
        /// Address or ENS name
        address: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// People met at the same POAP events
    Recommend {
        /// Address or ENS name
        address: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// POAP tokens held by an address
    Attendance {
        /// Address or ENS name
        address: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List registered platforms and their endpoints
    Platforms,
    /// Print the effective configuration as TOML
    Config,
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Connections { .. } => "connections",
        Commands::Recommend { .. } => "recommend",
        Commands::Attendance { .. } => "attendance",
        Commands::Platforms => "platforms",
        Commands::Config => "config",
    }
}

/// JSON envelope for command results.
#[derive(Debug, Serialize)]
struct Report<'a, T: Serialize> {
    address: &'a str,
    generated_at: DateTime<Utc>,
    total: usize,
    results: &'a [T],
}

/// CLI context holding the loaded configuration and fetcher
pub struct CliContext {
    config: IndexerConfig,
    fetcher: Fetcher,
    runtime: Runtime,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        Self::from_config(Self::load_config(&workspace_root, config_path.as_deref())?)
    }

    /// Resolve configuration the way `new` does, without building a fetcher.
    ///
    /// Lets the binary install logging from the loaded settings before any
    /// component that logs is assembled.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<IndexerConfig, ApiError> {
        match config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path),
            None => ConfigLoader::load(workspace_root),
        }
    }

    /// Create a context from loaded configuration with the default HTTP transport.
    pub fn from_config(config: IndexerConfig) -> Result<Self, ApiError> {
        debug!(
            timeout_secs = config.http.timeout_secs,
            failure_policy = ?config.poap.failure_policy,
            "Configuration loaded"
        );
        let fetcher = Fetcher::new(&config)?;
        Self::with_fetcher(config, fetcher)
    }

    /// Create a context over an already assembled fetcher.
    pub fn with_fetcher(config: IndexerConfig, fetcher: Fetcher) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            config,
            fetcher,
            runtime,
        })
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Connections { address, format } => {
                let address = validate_address(address)?;
                let format = OutputFormat::parse(format)?;
                let edges = self.runtime.block_on(self.fetcher.fetch_connections(address));
                match format {
                    OutputFormat::Text => Ok(format_connections_text(address, &edges)),
                    OutputFormat::Json => format_report_json(address, &edges),
                }
            }
            Commands::Recommend { address, format } => {
                let address = validate_address(address)?;
                let format = OutputFormat::parse(format)?;
                let records = self.runtime.block_on(self.fetcher.recommend(address));
                match format {
                    OutputFormat::Text => Ok(format_recommendations_text(address, &records)),
                    OutputFormat::Json => format_report_json(address, &records),
                }
            }
            Commands::Attendance { address, format } => {
                let address = validate_address(address)?;
                let format = OutputFormat::parse(format)?;
                let records = self.runtime.block_on(self.fetcher.list_attendance(address));
                match format {
                    OutputFormat::Text => Ok(format_attendance_text(address, &records)),
                    OutputFormat::Json => format_report_json(address, &records),
                }
            }
            Commands::Platforms => Ok(format_platforms_text(
                &self.config,
                self.fetcher.platforms(),
            )),
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, ApiError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format '{}': expected text or json",
                other
            ))),
        }
    }
}

fn validate_address(address: &str) -> Result<&str, ApiError> {
    let trimmed = address.trim();
    if is_resolvable_identity(trimmed) {
        Ok(trimmed)
    } else {
        Err(ApiError::InvalidAddress(address.to_string()))
    }
}

fn format_report_json<T: Serialize>(address: &str, results: &[T]) -> Result<String, ApiError> {
    let report = Report {
        address,
        generated_at: Utc::now(),
        total: results.len(),
        results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Format merged edges as text
fn format_connections_text(address: &str, edges: &[ConnectionEntry]) -> String {
    if edges.is_empty() {
        return format!("No connections found for {}.", address);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["From", "To", "Platform"]);
    for edge in edges {
        table.add_row(vec![edge.from(), edge.to(), edge.platform().as_str()]);
    }
    format!("{}\n\nTotal: {} connection(s)", table, edges.len())
}

/// Format recommendations as text
fn format_recommendations_text(address: &str, records: &[PoapRecommendation]) -> String {
    if records.is_empty() {
        return format!("No POAP recommendations for {}.", address);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Address", "Event", "Token"]);
    for record in records {
        table.add_row(vec![&record.address, &record.event_id, &record.token_id]);
    }
    format!("{}\n\nTotal: {} recommendation(s)", table, records.len())
}

fn format_attendance_text(address: &str, records: &[UserPoapIdentity]) -> String {
    if records.is_empty() {
        return format!("No POAP tokens held by {}.", address);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Event", "Name", "Token", "URL"]);
    for record in records {
        table.add_row(vec![
            &record.event_id,
            &record.event_name,
            &record.token_id,
            &record.event_url,
        ]);
    }
    format!("{}\n\nTotal: {} token(s)", table, records.len())
}

fn format_platforms_text(config: &IndexerConfig, registered: &[PlatformTag]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Platform", "Enabled", "Method", "Following", "Followers"]);
    for platform in [PlatformTag::Context, PlatformTag::Rarible] {
        let endpoint: &PlatformEndpoint = match platform {
            PlatformTag::Context => &config.platforms.context,
            PlatformTag::Rarible => &config.platforms.rarible,
        };
        let enabled = if registered.contains(&platform) { "yes" } else { "no" };
        table.add_row(vec![
            platform.as_str().to_string(),
            enabled.to_string(),
            endpoint.method.to_string(),
            endpoint.following_url.clone(),
            endpoint.follower_url.clone(),
        ]);
    }
    table.to_string()
}
