//! tinywhale CLI - compiles TinyWhale source files to WebAssembly.
//!
//! This is the main entry point for the tinywhale command-line tool. It uses
//! clap for argument parsing and dispatches to the `build` command.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::build::{run_build, BuildArgs};
use config::Config;

/// tinywhale - compiler for the TinyWhale language
#[derive(Parser, Debug)]
#[command(name = "tinywhale")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles TinyWhale source files to WebAssembly", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "TINYWHALE_VERBOSE")]
    verbose: bool,

    /// Path to a tinywhale.toml configuration file
    #[arg(long, global = true, env = "TINYWHALE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the tinywhale CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a .tw source file to WebAssembly
    Build(BuildCommandArgs),
}

/// Arguments for the build subcommand.
#[derive(Parser, Debug)]
struct BuildCommandArgs {
    /// Path to the .tw source file to compile
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output encoding: wasm or wat
    #[arg(short = 't', long = "type", default_value = "wasm")]
    output_format: String,

    /// Enable optimizations
    #[arg(long, default_value_t = false)]
    optimize: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build(args) => execute_build(args, cli.verbose, config),
    }
}

/// Initialize the logging system.
///
/// Internal library phases emit `tracing::debug!`/`trace!` events; only this
/// binary installs a subscriber to render them.
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .context("failed to initialize logging")
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Execute the build command.
fn execute_build(args: BuildCommandArgs, verbose: bool, config: Config) -> anyhow::Result<()> {
    let build_args = BuildArgs {
        verbose,
        input: args.input,
        output: args.output.or_else(|| Some(PathBuf::from(&config.output_dir))),
        format: args.output_format,
        optimize: args.optimize || config.build.optimize,
    };
    run_build(build_args).map_err(anyhow::Error::from)
}
