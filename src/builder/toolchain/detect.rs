//! Toolchain detection functions.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::config::ToolchainSettings;
use crate::util::process::{find_executable, ProcessBuilder};

use super::{GccToolchain, Toolchain, ToolchainPlatform};

/// Compilers tried when nothing else is configured.
const DEFAULT_CXX_COMPILERS: &[&str] = &["c++", "g++", "clang++"];

/// Detect the available C++ toolchain.
///
/// Returns `Ok(None)` when no compiler can be found; it is up to the caller
/// to decide whether that is fatal.
///
/// Tries, in order:
/// 1. The `cxx` entry of the toolchain config file
/// 2. `candidates` (from `--check-cxx-compiler`); when non-empty, nothing
///    else is tried
/// 3. The `CXX` environment variable
/// 4. `c++`, `g++`, `clang++` on PATH
pub fn detect_toolchain(
    settings: &ToolchainSettings,
    candidates: &[String],
) -> Result<Option<Box<dyn Toolchain>>> {
    if let Some(toolchain) = try_detect_from_config(settings)? {
        return Ok(Some(toolchain));
    }

    if !candidates.is_empty() {
        for name in candidates {
            if let Some(cxx) = find_executable(name) {
                return Ok(Some(gcc_style(cxx)?));
            }
            tracing::debug!("C++ compiler candidate `{}` not found", name);
        }
        return Ok(None);
    }

    if let Ok(cxx_env) = std::env::var("CXX") {
        if let Some(cxx) = find_executable(cxx_env.trim()) {
            return Ok(Some(gcc_style(cxx)?));
        }
        tracing::warn!("CXX is set to `{}` but it was not found", cxx_env);
    }

    for name in DEFAULT_CXX_COMPILERS {
        if let Some(cxx) = find_executable(name) {
            return Ok(Some(gcc_style(cxx)?));
        }
    }

    Ok(None)
}

/// Try to create a toolchain from config file settings.
fn try_detect_from_config(settings: &ToolchainSettings) -> Result<Option<Box<dyn Toolchain>>> {
    let Some(cxx) = &settings.cxx else {
        return Ok(None);
    };

    let Some(cxx) = find_executable(&cxx.to_string_lossy()) else {
        tracing::warn!("Configured C++ compiler not found: {}", cxx.display());
        return Ok(None);
    };

    tracing::info!("Using C++ compiler from config: {}", cxx.display());
    Ok(Some(gcc_style(cxx)?))
}

fn gcc_style(cxx: PathBuf) -> Result<Box<dyn Toolchain>> {
    let family = detect_compiler_family(&cxx)?;
    tracing::debug!("Detected {} compiler at {}", family, cxx.display());
    Ok(Box::new(GccToolchain::new(cxx, family)))
}

/// Detect whether the compiler is GCC, Clang, or Apple Clang.
fn detect_compiler_family(cxx: &Path) -> Result<ToolchainPlatform> {
    // Check binary name first
    let name = cxx
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if name.contains("clang") {
        return Ok(clang_variant(&version_output(cxx)));
    } else if name.contains("g++") || name.contains("gcc") {
        return Ok(ToolchainPlatform::Gcc);
    }

    Ok(family_from_version(&version_output(cxx)))
}

/// Run `<cxx> --version`, returning lowercased stdout (empty on failure).
fn version_output(cxx: &Path) -> String {
    ProcessBuilder::new(cxx)
        .arg("--version")
        .exec()
        .map(|out| String::from_utf8_lossy(&out.stdout).to_lowercase())
        .unwrap_or_default()
}

fn family_from_version(version: &str) -> ToolchainPlatform {
    if version.contains("clang") {
        clang_variant(version)
    } else {
        // gcc, or anything we cannot identify
        ToolchainPlatform::Gcc
    }
}

fn clang_variant(version: &str) -> ToolchainPlatform {
    if version.contains("apple") {
        ToolchainPlatform::AppleClang
    } else {
        ToolchainPlatform::Clang
    }
}
