//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// find-xrootd - locate and validate an XRootD installation
#[derive(Parser)]
#[command(name = "find-xrootd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate XRootD and write the configuration cache
    Configure(ConfigureArgs),

    /// Show the compile/link flags of registered use targets
    ShowUses(ShowUsesArgs),

    /// Show the detected C++ compiler and host platform
    Toolchain(ToolchainArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Look for xrootd at the given path
    #[arg(long, value_name = "PATH")]
    pub with_xrootd: Option<PathBuf>,

    /// Abort when any step fails
    #[arg(long)]
    pub mandatory: bool,

    /// List of C++ compilers to try (e.g. "g++ clang++"), comma separated
    /// when a path contains spaces
    #[arg(long, value_name = "LIST")]
    pub check_cxx_compiler: Option<String>,

    /// Configuration cache to write
    #[arg(long, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowUsesArgs {
    /// Only show this use target
    pub name: Option<String>,

    /// Configuration cache to read
    #[arg(long, value_name = "FILE")]
    pub cache: Option<PathBuf>,
}

#[derive(Args)]
pub struct ToolchainArgs {
    /// List of C++ compilers to try (e.g. "g++ clang++"), comma separated
    /// when a path contains spaces
    #[arg(long, value_name = "LIST")]
    pub check_cxx_compiler: Option<String>,
}
