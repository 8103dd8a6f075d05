//! # Command Line Interface
//!
//! Local entrypoint for the resource handler: runs a single host request
//! against the JSON-file parameter store, or generates a password from a
//! policy.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process;

use crate::config::Config;
use crate::handler::{HandlerRequest, OperationStatus, ResourceHandler, SecretParameterHandler};
use crate::model::PasswordOptions;
use crate::observability::{init_logging, log_config_info};
use crate::password;
use crate::store::JsonFileParameterStore;

/// Exit code when the handler reports a failed operation.
const EXIT_OPERATION_FAILED: i32 = 2;

#[derive(Parser)]
#[command(name = "paramsecret")]
#[command(about = "Lifecycle handler for Surnet::ParameterStore::Secret")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one handler request and print the progress event
    Invoke {
        /// Request JSON file, or `-` for stdin
        #[arg(short, long)]
        request: String,

        /// Parameter store file (overrides PARAMSECRET_STORE_PATH)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },

    /// Generate a password from a policy and print it
    Generate {
        #[arg(long, default_value_t = crate::model::DEFAULT_PASSWORD_LENGTH)]
        length: i64,

        /// Leave digits out of the alphabet
        #[arg(long)]
        no_numbers: bool,

        /// Leave symbols out of the alphabet
        #[arg(long)]
        no_symbols: bool,

        /// Drop look-alike characters such as `l`, `I` and `0`
        #[arg(long)]
        exclude_similar: bool,
    },
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    init_logging(&config.logging)?;
    log_config_info(&config);

    match cli.command {
        Commands::Invoke { request, store } => {
            let store_path = store.unwrap_or_else(|| PathBuf::from(&config.store.path));
            let status = invoke(&request, store_path).await?;
            if status == OperationStatus::Failed {
                process::exit(EXIT_OPERATION_FAILED);
            }
        }
        Commands::Generate { length, no_numbers, no_symbols, exclude_similar } => {
            let options = PasswordOptions::default()
                .with_length(length)
                .with_numbers(!no_numbers)
                .with_symbols(!no_symbols)
                .with_exclude_similar(exclude_similar);
            let generated = password::generate(&options)?;
            println!("{}", generated.expose_secret());
        }
    }

    Ok(())
}

async fn invoke(request_source: &str, store_path: PathBuf) -> anyhow::Result<OperationStatus> {
    let raw = read_request(request_source)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("request is not valid JSON")?;
    let request = HandlerRequest::from_json(value)?;

    let handler = SecretParameterHandler::new(JsonFileParameterStore::new(store_path));
    let event = handler.invoke(&request).await;

    println!("{}", serde_json::to_string_pretty(&event.to_json()?)?);
    Ok(event.status)
}

fn read_request(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw).context("failed to read request from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read request file {}", source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from(["paramsecret", "generate", "--length", "8", "--no-symbols"]);
        match cli.command {
            Commands::Generate { length, no_symbols, no_numbers, .. } => {
                assert_eq!(length, 8);
                assert!(no_symbols);
                assert!(!no_numbers);
            }
            _ => panic!("expected generate"),
        }
    }

    #[tokio::test]
    async fn test_invoke_create_against_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let request_path = dir.path().join("create.json");
        std::fs::write(
            &request_path,
            r#"{"action":"CREATE","desiredResourceState":{"Name":"p1","PasswordOptions":{}}}"#,
        )
        .unwrap();

        let status =
            invoke(request_path.to_str().unwrap(), dir.path().join("store.json")).await.unwrap();
        assert_eq!(status, OperationStatus::Success);
        assert!(dir.path().join("store.json").exists());
    }
}
