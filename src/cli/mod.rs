//! CLI command definitions for the `gestalt` binary.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::format::OutputFormat;
use crate::loader::{DirectoryLoader, Format, LayeredLoader};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect hierarchical configuration directories
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to load configuration files from
    #[arg(
        short,
        long,
        env = "GESTALT_CONFIG_DIR",
        default_value = "config",
        global = true
    )]
    pub dir: PathBuf,

    /// File format to load: ini, json, yaml or toml
    #[arg(short, long, default_value = "yaml", global = true)]
    pub format: Format,

    /// Extra directories merged on top of --dir, in order (missing ones are skipped)
    #[arg(long = "overlay", global = true)]
    pub overlays: Vec<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value at a literal or dotted key
    Get {
        key: String,

        /// Value to print when the key is missing (parsed as JSON, else used as a string)
        #[arg(long)]
        default: Option<String>,

        /// Output format: json, yaml or flat
        #[arg(short, long, default_value = "json", value_parser = parse_output_format)]
        output: OutputFormat,
    },

    /// Print the whole configuration
    Dump {
        /// Output format: json, yaml or flat
        #[arg(short, long, default_value = "json", value_parser = parse_output_format)]
        output: OutputFormat,
    },

    /// List top-level keys
    Keys,
}

fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_str(value)
        .ok_or_else(|| format!("unknown output format '{value}' (expected json, yaml or flat)"))
}

impl Cli {
    /// Loader for `--dir` plus any `--overlay` directories.
    pub fn loader(&self) -> LayeredLoader {
        let mut loader =
            LayeredLoader::new().with_layer(DirectoryLoader::new(&self.dir, self.format));
        for overlay in &self.overlays {
            loader.push(DirectoryLoader::new(overlay, self.format).optional());
        }
        loader
    }
}
