//! `find-xrootd toolchain` command

use anyhow::Result;

use crate::cli::ToolchainArgs;
use xrootd_finder::ops::find_base::CHECK_CXX_COMPILER;
use xrootd_finder::ops::find_xrootd as xrootd;
use xrootd_finder::util::ConfigContext;

pub fn execute(args: ToolchainArgs) -> Result<()> {
    let root = super::project_root()?;
    let config = super::project_config(&root);

    let mut ctx = ConfigContext::new().with_config(config);
    xrootd::register_options(ctx.options_mut());
    if let Some(list) = args.check_cxx_compiler {
        ctx.options_mut().set_value(CHECK_CXX_COMPILER, list)?;
    }
    xrootd::configure(&mut ctx)?;

    println!("Toolchain:");
    println!();

    match ctx.toolchain() {
        Some(toolchain) => {
            println!("  CXX:    {}", toolchain.cxx_compiler_path().display());
            println!("  Family: {}", toolchain.platform());
            if let Ok(out) = ctx.runner().run(&toolchain.version_command(), None) {
                if let Some(first_line) = out.stdout.lines().next() {
                    println!("          {}", first_line.trim());
                }
            }
        }
        None => println!("  CXX:    not found"),
    }

    let settings = &ctx.config().toolchain;
    if !settings.cxxflags.is_empty() {
        println!("  CXXFLAGS: {}", settings.cxxflags.join(" "));
    }
    if !settings.ldflags.is_empty() {
        println!("  LDFLAGS:  {}", settings.ldflags.join(" "));
    }

    println!();

    if let Some(platform) = ctx.platform() {
        println!("  Target: {}", platform.triple);
        println!("    Arch: {}", platform.triple.arch);
        println!("    OS:   {}", platform.triple.os);
        println!("  Search prefixes:");
        for prefix in &platform.default_prefixes {
            println!("    {}", prefix.display());
        }
        if let Some(home) = platform.env_root(xrootd::NAME) {
            println!("  {}={}", xrootd::XROOTD_HOME, home.display());
        }
    }

    Ok(())
}
