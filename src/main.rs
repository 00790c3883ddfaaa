//! gestalt CLI
//!
//! Loads a configuration directory (plus optional overlays) and prints keys,
//! single values or the whole tree.

use anyhow::Result;
use clap::Parser;
use gestalt::cli::{Cli, Command};
use gestalt::config::{Configuration, Value, kind_name};
use gestalt::format::{format_items, format_value};
use gestalt::logging::{self, LogTarget};
use std::process::ExitCode;
use tracing::{debug, info, warn};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let loader = cli.loader();
    let config = Configuration::load(&loader)?;
    info!(
        dir = %cli.dir.display(),
        format = %cli.format,
        keys = config.len(),
        "configuration loaded"
    );

    match cli.command {
        Command::Get {
            key,
            default,
            output,
        } => {
            let value = match (config.get(&key), default) {
                (Some(value), _) => value.clone(),
                (None, Some(raw)) => parse_default(raw),
                (None, None) => {
                    warn!(key = %key, "key not found");
                    eprintln!("key not found: {key}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            debug!(key = %key, kind = kind_name(&value), "resolved key");
            println!("{}", format_value(&value, output)?.trim_end());
        }
        Command::Dump { output } => {
            println!("{}", format_items(config.all(), output)?.trim_end());
        }
        Command::Keys => {
            for key in config.all().keys() {
                println!("{key}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// `--default` is JSON when it parses as JSON, a plain string otherwise.
fn parse_default(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}
