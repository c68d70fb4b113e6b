//! Use-target inspection for `show-uses`.
//!
//! Reads a finished configuration and reports, for each registered use,
//! whether its headers and libraries are actually present on disk.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{UseRegistry, UseTarget};

/// Status of one library of a use target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibStatus {
    pub name: String,
    /// First `lib<name>.*` file found in the lib paths
    pub file: Option<PathBuf>,
}

/// Status of one use target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseStatus {
    pub target: UseTarget,
    /// Headers that exist under one of the include paths
    pub headers_found: Vec<PathBuf>,
    pub headers_missing: Vec<String>,
    pub libs: Vec<LibStatus>,
}

impl UseStatus {
    /// Whether every header and library was located.
    pub fn is_usable(&self) -> bool {
        self.target.is_resolved()
            && self.headers_missing.is_empty()
            && self.libs.iter().all(|l| l.file.is_some())
    }
}

/// Inspect one use target.
pub fn inspect_use(target: &UseTarget) -> UseStatus {
    let mut headers_found = Vec::new();
    let mut headers_missing = Vec::new();

    for header in &target.headers {
        match target
            .include_paths
            .iter()
            .map(|dir| dir.join(header))
            .find(|p| p.is_file())
        {
            Some(path) => headers_found.push(path),
            None => headers_missing.push(header.clone()),
        }
    }

    let libs = target
        .libs
        .iter()
        .map(|name| LibStatus {
            name: name.clone(),
            file: find_library_file(&target.lib_paths, name),
        })
        .collect();

    UseStatus {
        target: target.clone(),
        headers_found,
        headers_missing,
        libs,
    }
}

/// Inspect every use target, or only `name` when given.
pub fn inspect_uses(uses: &UseRegistry, name: Option<&str>) -> Vec<UseStatus> {
    uses.iter()
        .filter(|t| name.map_or(true, |n| t.name == n))
        .map(inspect_use)
        .collect()
}

fn find_library_file(lib_paths: &[PathBuf], name: &str) -> Option<PathBuf> {
    lib_paths.iter().find_map(|dir| {
        let pattern = dir.join(format!("lib{}.*", glob::Pattern::escape(name)));
        let pattern = pattern.to_str()?;
        glob::glob(pattern).ok()?.filter_map(Result::ok).min()
    })
}

/// Format use statuses for display.
pub fn format_uses(statuses: &[UseStatus], verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    if statuses.is_empty() {
        output.push_str("No use targets registered.\n");
        return output;
    }

    for status in statuses {
        let mark = if status.is_usable() { "[OK]" } else { "[!!]" };
        let _ = writeln!(output, "{} {}", mark, status.target.name);

        let compile = status.target.compile_flags();
        let link = status.target.link_flags();
        if !compile.is_empty() {
            let _ = writeln!(output, "      cflags:  {}", compile.join(" "));
        }
        if !link.is_empty() {
            let _ = writeln!(output, "      ldflags: {}", link.join(" "));
        }

        for header in &status.headers_missing {
            let _ = writeln!(output, "      missing header: {}", header);
        }
        for lib in &status.libs {
            match &lib.file {
                Some(file) if verbose => {
                    let _ = writeln!(output, "      lib {}: {}", lib.name, file.display());
                }
                Some(_) => {}
                None => {
                    let _ = writeln!(output, "      missing library: lib{}", lib.name);
                }
            }
        }
        if verbose {
            for header in &status.headers_found {
                let _ = writeln!(output, "      header: {}", header.display());
            }
        }
    }

    let usable = statuses.iter().filter(|s| s.is_usable()).count();
    let _ = writeln!(output, "\n{} of {} use target(s) usable", usable, statuses.len());
    output
}
