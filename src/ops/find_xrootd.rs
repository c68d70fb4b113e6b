//! Locate and validate an XRootD installation.
//!
//! A configuration pass:
//! 1. probes for `xrootd/XrdVersion.hh` and records the root as `XROOTD_HOME`
//! 2. registers the `xrootd-posix`, `xrootd-client` and `xrootd-utils` uses
//! 3. finds `xrdcp` and `xrootd` under `<root>/bin`
//! 4. compiles, links and runs a program against the `xrootd` use
//! 5. sets `HEPWAF_FOUND_XROOTD = 1`
//!
//! Steps 2-5 run even when the probe fails and `mandatory` is false; the
//! sub-library uses are then registered without search paths.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use semver::Version;
use serde::Serialize;

use crate::core::{DiscoveryResult, FindOptions, OptionRegistry, OptionSpec, UseTarget};
use crate::ops::check::{check_fragment, FragmentCheck};
use crate::ops::find_base::{self, apply_policy, find_program, ProbeCriteria};
use crate::ops::platforms::Platform;
use crate::util::context::ConfigContext;
use crate::util::diagnostic::FindError;

/// Library name used for `--with-xrootd` and `XROOTD_HOME`.
pub const NAME: &str = "xrootd";

/// Header whose presence marks an installation.
pub const MARKER_HEADER: &str = "xrootd/XrdVersion.hh";

/// Option giving an install root to search first.
pub const WITH_XROOTD: &str = "with-xrootd";

pub const XROOTD_HOME: &str = "XROOTD_HOME";
pub const XROOTD_VERSION: &str = "XROOTD_VERSION";
pub const XRDCP_BIN: &str = "XRDCP-BIN";
pub const XROOTD_BIN: &str = "XROOTD-BIN";
pub const FOUND_FLAG: &str = "HEPWAF_FOUND_XROOTD";

/// Sub-library uses: (use name, library, header).
pub const SUB_LIBRARIES: [(&str, &str, &str); 3] = [
    ("xrootd-posix", "XrdPosix", "xrootd/XrdPosix/XrdPosix.hh"),
    ("xrootd-client", "XrdClient", "xrootd/XrdClient/XrdClient.hh"),
    ("xrootd-utils", "XrdUtils", "xrootd/Xrd/XrdConfig.hh"),
];

/// Programs looked up in `<root>/bin`: (program, env key).
pub const PROGRAMS: [(&str, &str); 2] = [("xrdcp", XRDCP_BIN), ("xrootd", XROOTD_BIN)];

static VERSION_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*#\s*define\s+XrdVERSION\s+"v?([^"]+)""#).expect("valid regex")
});

/// Outcome of [`find_xrootd`].
#[derive(Debug, Clone, Serialize)]
pub struct XrootdReport {
    pub discovery: DiscoveryResult,
    pub xrdcp: Option<PathBuf>,
    pub xrootd: Option<PathBuf>,
    /// Whether the compile-link-run check passed
    pub smoke_test: bool,
}

impl XrootdReport {
    /// Whether every step succeeded.
    pub fn is_complete(&self) -> bool {
        self.discovery.found() && self.xrdcp.is_some() && self.xrootd.is_some() && self.smoke_test
    }
}

/// Declare the options understood by [`find_xrootd`].
pub fn register_options(options: &mut OptionRegistry) {
    find_base::register_base_options(options);
    options.add_option(OptionSpec::new(
        WITH_XROOTD,
        "Look for xrootd at the given path",
    ));
}

/// Load the helpers [`find_xrootd`] relies on: the C++ toolchain and
/// platform detection.
pub fn configure(ctx: &mut ConfigContext) -> Result<()> {
    find_base::load(ctx)?;
    let platform = Platform::detect();
    tracing::debug!("Host platform: {}", platform.triple);
    ctx.load_platform(platform);
    Ok(())
}

/// Locate XRootD and register its uses in `ctx`.
///
/// Fails immediately, before touching `ctx`, when no C++ compiler is
/// loaded. Any other failure is fatal only with `opts.mandatory`.
pub fn find_xrootd(ctx: &mut ConfigContext, opts: FindOptions) -> Result<XrootdReport, FindError> {
    if ctx.toolchain().is_none() {
        return Err(FindError::EnvironmentUnavailable);
    }

    let opts = find_base::setup_options(ctx.options(), NAME, opts);
    let mandatory = opts.mandatory;

    let criteria = ProbeCriteria {
        name: NAME.to_string(),
        header: MARKER_HEADER.to_string(),
        with_path: opts.with_path,
    };
    let probed = find_base::probe(ctx, &criteria);
    let mut discovery = apply_policy("Checking for xrootd", probed, mandatory)?
        .unwrap_or_else(DiscoveryResult::not_found);

    match discovery.root().map(Path::to_path_buf) {
        Some(root) => {
            tracing::info!("Checking for xrootd: {}", root.display());
            discovery.version = read_version(&root);
            ctx.env_mut().set(XROOTD_HOME, root.as_path());
            match &discovery.version {
                Some(v) => ctx.env_mut().set(XROOTD_VERSION, v.to_string()),
                None => {
                    ctx.env_mut().unset(XROOTD_VERSION);
                }
            }
            ctx.uses_mut().define(
                UseTarget::new(NAME)
                    .with_header(MARKER_HEADER)
                    .with_include_path(discovery.include_dir())
                    .with_lib_path(discovery.lib_dir()),
            );
        }
        None => {
            ctx.env_mut().unset(XROOTD_HOME);
            ctx.env_mut().unset(XROOTD_VERSION);
            ctx.uses_mut().remove(NAME);
        }
    }

    let bin_dir = discovery.bin_dir();
    let lib_dir = discovery.lib_dir();
    let include_dir = discovery.include_dir();

    for (name, lib, header) in SUB_LIBRARIES {
        ctx.uses_mut().define(
            UseTarget::new(name)
                .with_lib(lib)
                .with_lib_path(lib_dir.clone())
                .with_header(header)
                .with_include_path(include_dir.clone()),
        );
    }

    let mut programs = Vec::with_capacity(PROGRAMS.len());
    for (program, key) in PROGRAMS {
        let what = format!("Checking for program {}", program);
        let found = apply_policy(&what, find_program(program, bin_dir.as_deref()), mandatory)?;
        match &found {
            Some(path) => {
                tracing::info!("{}: {}", what, path.display());
                ctx.env_mut().set(key, path.as_path());
            }
            None => {
                ctx.env_mut().unset(key);
            }
        }
        programs.push(found);
    }
    let xrootd = programs.pop().flatten();
    let xrdcp = programs.pop().flatten();

    let mut smoke = FragmentCheck::header(MARKER_HEADER).execute(true);
    if let Some(target) = ctx.uses().get(NAME) {
        smoke = smoke.with_use(target);
    }
    let smoke_test = apply_policy(
        "Checking compilation xrootd",
        check_fragment(ctx, &smoke),
        mandatory,
    )?
    .is_some();
    if smoke_test {
        tracing::info!("Checking compilation xrootd: ok");
    }

    ctx.env_mut().set(FOUND_FLAG, 1i64);

    Ok(XrootdReport {
        discovery,
        xrdcp,
        xrootd,
        smoke_test,
    })
}

/// Parse the `XrdVERSION` define of `XrdVersion.hh`.
///
/// Tags such as `v5.6.1` and `v4.12.3-rc1` are accepted; non-semver tags
/// (e.g. `unknown`) yield `None`.
pub fn parse_version(header: &str) -> Option<Version> {
    let raw = VERSION_DEFINE.captures(header)?.get(1)?.as_str().trim();
    Version::parse(raw).ok()
}

fn read_version(root: &Path) -> Option<Version> {
    let path = root.join("include").join(MARKER_HEADER);
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| tracing::debug!("Could not read {}: {}", path.display(), e))
        .ok()?;
    parse_version(&contents)
}
