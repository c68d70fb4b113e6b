//! CLI integration tests for find-xrootd.
//!
//! A shell script stands in for the C++ compiler: it accepts any arguments
//! and, when given `-o <out>`, writes a program that exits successfully.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_CXX: &str = r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    --version) echo "g++ (fake) 13.2.0"; exit 0 ;;
    -o) out="$2"; shift ;;
  esac
  shift
done
if [ -n "$out" ]; then
  printf '#!/bin/sh\nexit 0\n' > "$out"
  chmod 755 "$out"
fi
exit 0
"#;

const BROKEN_CXX: &str = "#!/bin/sh\necho 'fatal error: cannot link' >&2\nexit 1\n";

/// Get the find-xrootd binary command, isolated from the host environment.
fn find_xrootd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("find-xrootd").unwrap();
    cmd.env("HOME", home)
        .env_remove("XROOTD_HOME")
        .env_remove("CXX")
        .current_dir(home);
    cmd
}

fn write_executable(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Lay out a minimal XRootD installation.
fn fake_install(root: &Path) -> PathBuf {
    write_file(
        &root.join("include/xrootd/XrdVersion.hh"),
        "#define XrdVERSION \"v5.6.1\"\n",
    );
    write_file(&root.join("include/xrootd/XrdPosix/XrdPosix.hh"), "");
    write_file(&root.join("include/xrootd/XrdClient/XrdClient.hh"), "");
    write_file(&root.join("include/xrootd/Xrd/XrdConfig.hh"), "");
    for lib in ["libXrdPosix.so", "libXrdClient.so", "libXrdUtils.so"] {
        write_file(&root.join("lib").join(lib), "");
    }
    write_executable(&root.join("bin/xrdcp"), "#!/bin/sh\nexit 0\n");
    write_executable(&root.join("bin/xrootd"), "#!/bin/sh\nexit 0\n");
    root.to_path_buf()
}

fn fake_cxx(dir: &Path) -> PathBuf {
    let path = dir.join("toolchain/fake-g++");
    write_executable(&path, FAKE_CXX);
    path
}

fn cache_file(project: &Path) -> PathBuf {
    project.join(".hepwaf/c4che/xrootd.toml")
}

// ============================================================================
// find-xrootd configure
// ============================================================================

#[test]
fn test_configure_with_path() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("opt/xrootd"));
    let cxx = fake_cxx(tmp.path());

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "XROOTD_HOME = {}",
            root.display()
        )))
        .stdout(predicate::str::contains(format!(
            "XRDCP-BIN = {}",
            root.join("bin/xrdcp").display()
        )))
        .stdout(predicate::str::contains("HEPWAF_FOUND_XROOTD = 1"))
        .stdout(predicate::str::contains("XROOTD_VERSION = 5.6.1"));

    let cache = fs::read_to_string(cache_file(tmp.path())).unwrap();
    assert!(cache.contains("xrootd-posix"));
    assert!(cache.contains("XrdPosix"));
}

#[test]
fn test_configure_json() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));
    let cxx = fake_cxx(tmp.path());

    let output = find_xrootd(tmp.path())
        .arg("configure")
        .arg("--json")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["smoke_test"], true);
    assert_eq!(json["report"]["discovery"]["version"], "5.6.1");
    assert_eq!(json["env"]["HEPWAF_FOUND_XROOTD"], 1);
    assert_eq!(
        json["env"]["XROOTD-BIN"],
        root.join("bin/xrootd").display().to_string()
    );
}

#[test]
fn test_configure_missing_optional_still_succeeds() {
    let tmp = TempDir::new().unwrap();
    let empty = tmp.path().join("nowhere");
    fs::create_dir_all(&empty).unwrap();
    let cxx = fake_cxx(tmp.path());

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--with-xrootd")
        .arg(&empty)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .success()
        .stdout(predicate::str::contains("HEPWAF_FOUND_XROOTD = 1"))
        .stdout(predicate::str::contains("XROOTD_HOME").not())
        .stderr(predicate::str::contains("incomplete"));

    assert!(cache_file(tmp.path()).exists());
}

#[test]
fn test_configure_missing_mandatory_fails() {
    let tmp = TempDir::new().unwrap();
    let empty = tmp.path().join("nowhere");
    fs::create_dir_all(&empty).unwrap();
    let cxx = fake_cxx(tmp.path());

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--mandatory")
        .arg("--with-xrootd")
        .arg(&empty)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .failure()
        .stderr(predicate::str::contains("xrootd/XrdVersion.hh"))
        .stderr(predicate::str::contains("--with-xrootd"));

    assert!(!cache_file(tmp.path()).exists());
}

#[test]
fn test_configure_without_compiler_fails() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(tmp.path().join("no-such-compiler"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("load a C++ compiler first"));
}

#[test]
fn test_configure_broken_compiler_mandatory() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));
    let cxx = tmp.path().join("toolchain/broken-g++");
    write_executable(&cxx, BROKEN_CXX);

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--mandatory")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot link"));
}

#[test]
fn test_configure_reads_project_config() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));
    let cxx = fake_cxx(tmp.path());

    write_file(
        &tmp.path().join(".hepwaf/xrootd.toml"),
        &format!(
            "[xrootd]\nwith_path = \"{}\"\n\n[toolchain]\ncxx = \"{}\"\n",
            root.display(),
            cxx.display()
        ),
    );

    find_xrootd(tmp.path())
        .arg("configure")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "XROOTD_HOME = {}",
            root.display()
        )))
        .stdout(predicate::str::contains(format!("CXX = {}", cxx.display())));
}

#[test]
fn test_configure_custom_cache_path() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));
    let cxx = fake_cxx(tmp.path());
    let cache = tmp.path().join("build/config.toml");

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .arg("--cache")
        .arg(&cache)
        .assert()
        .success();

    assert!(cache.exists());
    assert!(!cache_file(tmp.path()).exists());
}

// ============================================================================
// find-xrootd show-uses
// ============================================================================

#[test]
fn test_show_uses_after_configure() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));
    let cxx = fake_cxx(tmp.path());

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .success();

    find_xrootd(tmp.path())
        .arg("show-uses")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] xrootd-posix"))
        .stdout(predicate::str::contains("-lXrdPosix"))
        .stdout(predicate::str::contains("4 of 4 use target(s) usable"));

    find_xrootd(tmp.path())
        .args(["show-uses", "xrootd-utils"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-lXrdUtils"))
        .stdout(predicate::str::contains("xrootd-posix").not());
}

#[test]
fn test_show_uses_unknown_target() {
    let tmp = TempDir::new().unwrap();
    let root = fake_install(&tmp.path().join("xrootd"));
    let cxx = fake_cxx(tmp.path());

    find_xrootd(tmp.path())
        .arg("configure")
        .arg("--with-xrootd")
        .arg(&root)
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .success();

    find_xrootd(tmp.path())
        .args(["show-uses", "root"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no use target named `root`"));
}

#[test]
fn test_show_uses_without_cache() {
    let tmp = TempDir::new().unwrap();

    find_xrootd(tmp.path())
        .arg("show-uses")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configuration cache"));
}

// ============================================================================
// find-xrootd toolchain
// ============================================================================

#[test]
fn test_toolchain_shows_compiler() {
    let tmp = TempDir::new().unwrap();
    let cxx = fake_cxx(tmp.path());

    find_xrootd(tmp.path())
        .arg("toolchain")
        .arg("--check-cxx-compiler")
        .arg(&cxx)
        .assert()
        .success()
        .stdout(predicate::str::contains("Toolchain:"))
        .stdout(predicate::str::contains(cxx.display().to_string()))
        .stdout(predicate::str::contains("Family: gcc"));
}
