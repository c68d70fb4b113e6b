//! `find-xrootd configure` command

use anyhow::{bail, Context, Result};

use crate::cli::ConfigureArgs;
use xrootd_finder::core::FindOptions;
use xrootd_finder::ops::find_base::CHECK_CXX_COMPILER;
use xrootd_finder::ops::find_xrootd::{self as xrootd, WITH_XROOTD};
use xrootd_finder::util::diagnostic::{emit, suggestions, Diagnostic};
use xrootd_finder::util::ConfigContext;
use xrootd_finder::XrootdReport;

pub fn execute(args: ConfigureArgs, color: bool) -> Result<()> {
    let root = super::project_root()?;
    let config = super::project_config(&root);
    let cache = super::cache_path(&root, args.cache);

    // CLI overrides config
    let with_path = args.with_xrootd.or_else(|| config.xrootd.with_path.clone());
    let mandatory = args.mandatory || config.xrootd.mandatory.unwrap_or(false);

    let mut ctx = ConfigContext::new().with_config(config);
    xrootd::register_options(ctx.options_mut());
    if let Some(list) = args.check_cxx_compiler {
        ctx.options_mut().set_value(CHECK_CXX_COMPILER, list)?;
    }
    if let Some(path) = with_path {
        ctx.options_mut()
            .set_value(WITH_XROOTD, path.display().to_string())?;
    }

    for spec in ctx.options().specs() {
        tracing::debug!("{} = {:?}", spec.flag(), ctx.options().get(&spec.name));
    }

    xrootd::configure(&mut ctx)?;

    let report = match xrootd::find_xrootd(&mut ctx, FindOptions::new().mandatory(mandatory)) {
        Ok(report) => report,
        Err(e) => {
            emit(&e.to_diagnostic(), color);
            bail!("xrootd configuration failed");
        }
    };

    if !report.is_complete() {
        emit(&incomplete(&report), color);
    }

    ctx.store(&cache)?;

    if args.json {
        let out = serde_json::json!({
            "report": report,
            "env": ctx.env(),
            "cache": cache,
        });
        let text = serde_json::to_string_pretty(&out).context("failed to serialize report")?;
        println!("{}", text);
    } else {
        for (key, value) in ctx.env().iter() {
            println!("{} = {}", key, value);
        }
        println!();
        println!("Configuration written to {}", cache.display());
    }

    Ok(())
}

fn incomplete(report: &XrootdReport) -> Diagnostic {
    let mut diag = Diagnostic::warning("xrootd configuration is incomplete");

    if !report.discovery.found() {
        diag = diag
            .with_context(format!("{} not set", xrootd::XROOTD_HOME))
            .with_suggestion(suggestions::WITH_PATH);
    }
    if report.xrdcp.is_none() {
        diag = diag.with_context(format!("{} not set", xrootd::XRDCP_BIN));
    }
    if report.xrootd.is_none() {
        diag = diag.with_context(format!("{} not set", xrootd::XROOTD_BIN));
    }
    if !report.smoke_test {
        diag = diag
            .with_context("test program did not build and run")
            .with_suggestion(suggestions::VERBOSE);
    }
    diag
}
