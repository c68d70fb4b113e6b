//! Test fixtures for fake XRootD installations.

use std::path::{Path, PathBuf};

/// Headers an installation provides, relative to `include/`.
pub const INSTALL_HEADERS: &[&str] = &[
    "xrootd/XrdPosix/XrdPosix.hh",
    "xrootd/XrdClient/XrdClient.hh",
    "xrootd/Xrd/XrdConfig.hh",
];

/// Shared libraries an installation provides, relative to `lib/`.
pub const INSTALL_LIBS: &[&str] = &["libXrdPosix.so", "libXrdClient.so", "libXrdUtils.so"];

/// A fake XRootD install tree laid out under `root`.
#[derive(Debug, Clone)]
pub struct FakeInstall {
    root: PathBuf,
    version: String,
    programs: bool,
}

impl FakeInstall {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FakeInstall {
            root: root.into(),
            version: "v5.6.1".to_string(),
            programs: true,
        }
    }

    /// Value of the `XrdVERSION` define.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Leave `bin/` empty.
    pub fn without_programs(mut self) -> Self {
        self.programs = false;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the tree on disk.
    pub fn write(self) -> std::io::Result<Self> {
        let include = self.root.join("include");
        write_file(
            &include.join("xrootd/XrdVersion.hh"),
            &version_header(&self.version),
        )?;
        for header in INSTALL_HEADERS {
            write_file(&include.join(header), "#pragma once\n")?;
        }

        for lib in INSTALL_LIBS {
            write_file(&self.root.join("lib").join(lib), "")?;
        }

        let bin = self.root.join("bin");
        std::fs::create_dir_all(&bin)?;
        if self.programs {
            for program in ["xrdcp", "xrootd"] {
                write_executable(&bin.join(program), "#!/bin/sh\nexit 0\n")?;
            }
        }

        Ok(self)
    }
}

/// Contents of an `XrdVersion.hh` declaring `version`.
pub fn version_header(version: &str) -> String {
    format!(
        "#ifndef __XRD_VERSION_H__\n#define __XRD_VERSION_H__\n\n#define XrdVERSION \"{}\"\n\n#endif\n",
        version
    )
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

/// Write a file and mark it executable.
pub fn write_executable(path: &Path, contents: &str) -> std::io::Result<()> {
    write_file(path, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fake_install_layout() {
        let tmp = TempDir::new().unwrap();
        let install = FakeInstall::new(tmp.path().join("xrootd"))
            .with_version("v4.12.3")
            .write()
            .unwrap();

        let marker = install.root().join("include/xrootd/XrdVersion.hh");
        assert!(std::fs::read_to_string(marker).unwrap().contains("\"v4.12.3\""));
        assert!(install.root().join("lib/libXrdUtils.so").is_file());
        assert!(install.root().join("bin/xrdcp").is_file());
    }

    #[test]
    fn test_fake_install_without_programs() {
        let tmp = TempDir::new().unwrap();
        let install = FakeInstall::new(tmp.path()).without_programs().write().unwrap();
        assert!(install.root().join("bin").is_dir());
        assert!(!install.root().join("bin/xrootd").exists());
    }
}
