//! find-xrootd CLI - locate and validate an XRootD installation

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("xrootd_finder=debug")
    } else {
        EnvFilter::new("xrootd_finder=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, color),
        Commands::ShowUses(args) => commands::show_uses::execute(args, cli.verbose),
        Commands::Toolchain(args) => commands::toolchain::execute(args),
    }
}
