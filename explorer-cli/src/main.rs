//! Command line front end: run the profile pipeline for one identifier.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use explorer::prelude::*;

/// `explorer` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "explorer",
    about = "Fetch a user profile, annotate it and store it",
    version
)]
struct CliArgs {
    /// Profile identifier. Falls back to the configured default.
    identifier: Option<String>,
    /// JSON configuration file.
    #[arg(long = "config", value_name = "path")]
    config: Option<PathBuf>,
    /// Overrides the API base URL.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<String>,
    /// Appends stored records to this JSON-lines file instead of keeping
    /// them in memory.
    #[arg(long = "store", value_name = "path")]
    store: Option<PathBuf>,
    /// Log line format: `text` or `json`.
    #[arg(long = "log-format", value_name = "format", default_value = "text")]
    log_format: LogFormat,
}

fn load_config(args: &CliArgs) -> anyhow::Result<ExplorerConfig> {
    let mut config = match &args.config {
        Some(path) => ExplorerConfig::from_json_file(path)
            .with_context(|| format!("load configuration from {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.fetch.base_url.clone_from(base_url);
    }
    config.validate()?;
    Ok(config)
}

fn build_pipeline(args: &CliArgs, config: ExplorerConfig) -> anyhow::Result<ProfilePipeline> {
    let mut builder =
        ProfilePipeline::builder(config).event_sink(Arc::new(LoggingEventSink::debug()));
    if let Some(path) = &args.store {
        builder = builder.store(Arc::new(JsonLinesRecordStore::new(path)));
    }
    builder.build().context("build profile pipeline")
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = CliArgs::parse();
    init_tracing(args.log_format)?;

    let config = load_config(&args)?;
    let identifier = args
        .identifier
        .clone()
        .unwrap_or_else(|| config.default_identifier.clone());
    let pipeline = build_pipeline(&args, config)?;

    match pipeline.run(&identifier).await {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("Error occurred: {err}");
            tracing::debug!(details = ?err.to_dict(), "Run failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = CliArgs::try_parse_from(["explorer"]).unwrap();
        assert!(args.identifier.is_none());
        assert_eq!(args.log_format, LogFormat::Text);

        let config = load_config(&args).unwrap();
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn test_args_overrides() {
        let args = CliArgs::try_parse_from([
            "explorer",
            "octocat",
            "--base-url",
            "http://localhost:9000",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.identifier.as_deref(), Some("octocat"));
        assert_eq!(args.log_format, LogFormat::Json);
        assert_eq!(load_config(&args).unwrap().fetch.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_bad_log_format_rejected() {
        assert!(CliArgs::try_parse_from(["explorer", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_missing_config_file_reported() {
        let args =
            CliArgs::try_parse_from(["explorer", "--config", "/no/such/config.json"]).unwrap();
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("/no/such/config.json"));
    }
}
