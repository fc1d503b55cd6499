//! config-cascade binary.
//!
//! Thin CLI over the resolution engine: discover or accept a root config
//! file, resolve its `extends` chain, and print the result.

use anyhow::Result;
use clap::Parser;
use config_cascade::cli::{Cli, Command, OutputFormat};
use config_cascade::config::{self, LoadOptions};
use serde::Serialize;
use serde_yaml::Value;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// JSON shape of the `chain` subcommand output.
#[derive(Serialize)]
struct ChainOutput {
    documents: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let root_path = locate_config(&cli)?;

    match cli.command.unwrap_or(Command::Print {
        format: OutputFormat::Yaml,
    }) {
        Command::Print { format } => {
            let resolution = config::resolve(&root_path)?;
            match format {
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&resolution.tree)?),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&resolution.tree)?)
                }
            }
        }
        Command::Get { path } => {
            let loaded = config::load_from(&root_path)?;
            let view = loaded.get(&path)?;
            print_value(view.value())?;
        }
        Command::Chain { format } => {
            let resolution = config::resolve(&root_path)?;
            match format {
                OutputFormat::Yaml => {
                    for document in &resolution.documents {
                        println!("{}", document.display());
                    }
                }
                OutputFormat::Json => {
                    let output = ChainOutput {
                        documents: resolution.documents,
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
        }
    }

    Ok(())
}

/// Initialize logging based on the --log option.
fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

/// Pick the root config file: explicit flag, env override, then discovery.
fn locate_config(cli: &Cli) -> Result<PathBuf> {
    if let Some(ref explicit) = cli.config {
        return Ok(PathBuf::from(explicit));
    }
    if let Ok(from_env) = std::env::var(config::ENV_CONFIG_PATH) {
        return Ok(PathBuf::from(from_env));
    }
    let options = LoadOptions {
        file_name: cli.file_name.clone(),
        start_dir: cli.root.as_ref().map(PathBuf::from),
        ..LoadOptions::default()
    };
    Ok(config::discover(&options)?)
}

/// Print a single config value: scalars raw, trees as YAML.
fn print_value(value: &Value) -> Result<()> {
    match value {
        Value::Null => println!("null"),
        Value::Bool(flag) => println!("{flag}"),
        Value::Number(number) => println!("{number}"),
        Value::String(text) => println!("{text}"),
        other => print!("{}", serde_yaml::to_string(other)?),
    }
    Ok(())
}
