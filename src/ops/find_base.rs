//! Shared base locator used by library find routines.
//!
//! Provides the generic pieces every `find_<lib>` routine needs: option
//! normalization, candidate root enumeration, the marker-header probe,
//! program lookup and the mandatory/optional failure policy.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::detect_toolchain;
use crate::core::{DiscoveryResult, FindOptions, OptionRegistry, OptionSpec};
use crate::ops::check::{check_fragment, FragmentCheck};
use crate::ops::platforms::Platform;
use crate::util::context::ConfigContext;
use crate::util::diagnostic::{FindError, ProbeError};

/// Option naming the C++ compilers to try.
pub const CHECK_CXX_COMPILER: &str = "check-cxx-compiler";

/// Declare the options shared by every find routine.
pub fn register_base_options(options: &mut OptionRegistry) {
    options.add_option(OptionSpec::new(
        CHECK_CXX_COMPILER,
        "list of C++ compilers to try (e.g. \"g++ clang++\")",
    ));
}

/// Load the shared helpers into a context: the C++ toolchain.
///
/// Not finding a compiler is not an error here; find routines check for
/// the compiler themselves.
pub fn load(ctx: &mut ConfigContext) -> Result<()> {
    let candidates = ctx.options().get_list(CHECK_CXX_COMPILER);
    match detect_toolchain(&ctx.config().toolchain, &candidates)? {
        Some(toolchain) => {
            tracing::info!(
                "Checking for C++ compiler: {} ({})",
                toolchain.cxx_compiler_path().display(),
                toolchain.platform()
            );
            ctx.load_compiler(toolchain);
        }
        None => tracing::warn!("Checking for C++ compiler: not found"),
    }
    Ok(())
}

/// Fill in option defaults for the library `name`.
///
/// An explicit `with_path` wins; otherwise the value of `--with-<name>` is
/// used when it was given.
pub fn setup_options(options: &OptionRegistry, name: &str, mut opts: FindOptions) -> FindOptions {
    if opts.with_path.is_none() {
        opts.with_path = options.get_path(&format!("with-{}", name));
    }
    opts
}

/// Roots to search, in order: the user path, `<NAME>_HOME`, then the
/// platform defaults. Duplicates are dropped, first occurrence wins.
pub fn candidate_roots(platform: &Platform, name: &str, with_path: Option<&Path>) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    let ordered = with_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain(platform.env_root(name).cloned())
        .chain(platform.default_prefixes.iter().cloned());

    for root in ordered {
        if !roots.contains(&root) {
            roots.push(root);
        }
    }
    roots
}

/// What to look for when probing for a library.
#[derive(Debug, Clone)]
pub struct ProbeCriteria {
    /// Library name (used for `--with-<name>` and `<NAME>_HOME`)
    pub name: String,
    /// Marker header, relative to `<root>/include`
    pub header: String,
    /// User-supplied root, searched first
    pub with_path: Option<PathBuf>,
}

/// Search candidate roots for the marker header.
///
/// A root is accepted when `<root>/include/<header>` exists and a program
/// including it compiles and links with `-I<root>/include -L<root>/lib`.
/// Does not touch the configuration environment.
pub fn probe(ctx: &ConfigContext, criteria: &ProbeCriteria) -> Result<DiscoveryResult, ProbeError> {
    let detected;
    let platform = match ctx.platform() {
        Some(p) => p,
        None => {
            detected = Platform::detect();
            &detected
        }
    };

    let roots = candidate_roots(platform, &criteria.name, criteria.with_path.as_deref());
    let mut last_failure = None;

    for root in &roots {
        let found = DiscoveryResult::found_at(root);
        let marker = root.join("include").join(&criteria.header);
        if !marker.is_file() {
            tracing::debug!("{}: no {}", root.display(), marker.display());
            continue;
        }

        let check = FragmentCheck::header(&criteria.header)
            .with_include_dir(found.include_dir())
            .with_lib_dir(found.lib_dir());

        match check_fragment(ctx, &check) {
            Ok(_) => return Ok(found),
            Err(e) => {
                tracing::debug!("{}: header present but check failed: {}", root.display(), e);
                last_failure = Some(e);
            }
        }
    }

    Err(last_failure.unwrap_or_else(|| ProbeError::HeaderNotFound {
        name: criteria.name.clone(),
        header: criteria.header.clone(),
        searched: roots,
    }))
}

/// Find a program by name, only looking in `path_list`.
pub fn find_program(name: &str, path_list: Option<&Path>) -> Result<PathBuf, ProbeError> {
    let not_found = || ProbeError::ProgramNotFound {
        name: name.to_string(),
        path_list: path_list.map(Path::to_path_buf),
    };

    let dir = path_list.ok_or_else(not_found)?;
    which::which_in(name, Some(dir), dir).map_err(|_| not_found())
}

/// Decide what a failed probe means.
///
/// With `mandatory`, any failure becomes fatal. Otherwise it is logged and
/// the caller continues with `None`.
pub fn apply_policy<T>(
    what: &str,
    result: Result<T, ProbeError>,
    mandatory: bool,
) -> Result<Option<T>, FindError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(source) if mandatory => Err(FindError::ProbeFailed {
            what: what.to_string(),
            source,
        }),
        Err(e) => {
            tracing::warn!("{}", tolerated_failure(what, &e));
            Ok(None)
        }
    }
}

/// Warning line for a failure that does not abort the pass.
fn tolerated_failure(what: &str, error: &ProbeError) -> String {
    format!("{}: failed ({})", what, first_line(&error.to_string()))
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
