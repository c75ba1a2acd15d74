//! Integration tests for the zup CLI.

#![allow(deprecated)] // cargo_bin is deprecated but the replacement requires macros

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn zup() -> Command {
    let mut cmd = Command::cargo_bin("zup").unwrap();
    cmd.env_remove("ZUP_INSTALL_DIR");
    cmd.env_remove("ZUP_PATH_LINK");
    cmd.env_remove("ZUP_INDEX_URL");
    cmd.env_remove("ZUP_CONFIG_FILE");
    cmd
}

/// A command scoped to a temporary install root.
fn zup_in(root: &Path) -> Command {
    let mut cmd = zup();
    cmd.arg("--install-dir").arg(root);
    cmd
}

/// Fabricate an installed version the way the installer lays it out.
fn fake_install(root: &Path, version: &str) {
    let files = root.join(version).join("files");
    fs::create_dir_all(&files).unwrap();
    let exe = if cfg!(windows) { "zig.exe" } else { "zig" };
    fs::write(files.join(exe), b"").unwrap();
}

#[test]
fn test_help() {
    zup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("manage zig compilers"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("default"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_version() {
    zup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zup"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_no_command_shows_help() {
    zup()
        .assert()
        .success()
        .stdout(predicate::str::contains("manage zig compilers"));
}

#[test]
fn test_root_prints_install_dir() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("zigs");

    zup_in(&root)
        .arg("root")
        .assert()
        .success()
        .stdout(predicate::str::contains("zigs"));
}

#[test]
fn test_install_dir_env_var() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("env-root");

    zup()
        .env("ZUP_INSTALL_DIR", &root)
        .arg("root")
        .assert()
        .success()
        .stdout(predicate::str::contains("env-root"));
}

#[test]
fn test_config_file_sets_install_dir() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("store");
    let config = temp.path().join("config.toml");
    fs::write(&config, format!("install-dir = {:?}\n", root)).unwrap();

    zup()
        .arg("--config-file")
        .arg(&config)
        .arg("root")
        .assert()
        .success()
        .stdout(predicate::str::contains("store"));
}

#[test]
fn test_missing_explicit_config_file_is_a_config_error() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .arg("--config-file")
        .arg(temp.path().join("nope.toml"))
        .arg("list")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_list_empty() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No zig versions installed"));
}

#[cfg(unix)]
#[test]
fn test_list_warns_but_lists_when_the_default_pointer_is_unreadable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fake_install(root, "0.11.0");
    fs::write(root.join("default"), b"not a symlink").unwrap();

    zup_in(root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.11.0"))
        .stderr(predicate::str::contains("warning"))
        .stderr(predicate::str::contains("unreadable default pointer"));
}

#[test]
fn test_keep_then_clean_respects_the_marker() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fake_install(root, "0.10.0");
    fake_install(root, "0.11.0");

    zup_in(root).args(["keep", "0.11.0"]).assert().success();
    assert!(root.join("0.11.0").join("keep").exists());

    zup_in(root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.10.0"))
        .stdout(predicate::str::contains("0.11.0"))
        .stdout(predicate::str::contains("(keep)"));

    zup_in(root)
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("0.10.0"))
        .stderr(predicate::str::contains("has keep file"));
    assert!(!root.join("0.10.0").exists());
    assert!(root.join("0.11.0").exists());
}

#[test]
fn test_clean_refuses_a_kept_version() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fake_install(root, "0.11.0");

    zup_in(root).args(["keep", "0.11.0"]).assert().success();

    zup_in(root)
        .args(["clean", "0.11.0"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("refusing to remove"))
        .stderr(predicate::str::contains("has keep file"));
    assert!(root.join("0.11.0").exists());
}

#[test]
fn test_clean_unknown_version_exits_nonzero() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .args(["clean", "9.9.9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not installed"))
        .stderr(predicate::str::contains("zup fetch 9.9.9"));
}

#[test]
fn test_keep_requires_an_installed_version() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .args(["keep", "9.9.9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_default_reports_when_unset() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .arg("default")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no default compiler set"));
}

#[test]
fn test_default_rejects_unknown_versions() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .args(["default", "1.2.3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not installed"));
}

#[cfg(unix)]
#[test]
fn test_default_set_then_print_round_trips() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fake_install(root, "0.11.0");

    zup_in(root).args(["default", "0.11.0"]).assert().success();

    zup_in(root)
        .arg("default")
        .assert()
        .success()
        .stdout("0.11.0\n");

    zup_in(root)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(default)"));
}

#[cfg(unix)]
#[test]
fn test_default_from_path_finds_the_executable() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("zigs");
    let tree = temp.path().join("custom");
    fs::create_dir_all(tree.join("bin")).unwrap();
    fs::write(tree.join("bin").join("zig"), b"").unwrap();

    zup_in(&root).arg("default").arg(&tree).assert().success();

    let target = fs::read_link(root.join("default")).unwrap();
    assert_eq!(target, tree.join("bin"));
}

#[cfg(unix)]
#[test]
fn test_relative_install_dir_resolves_against_the_invocation_dir() {
    let temp = TempDir::new().unwrap();
    fake_install(&temp.path().join("zigroot"), "0.11.0");

    zup()
        .current_dir(temp.path())
        .args(["--install-dir", "zigroot", "default", "0.11.0"])
        .assert()
        .success();

    // the stored target must be absolute and traversable from anywhere
    let link = temp.path().join("zigroot").join("default");
    let target = fs::read_link(&link).unwrap();
    assert!(target.is_absolute());
    assert!(fs::metadata(&link).is_ok());

    zup()
        .current_dir(temp.path())
        .args(["--install-dir", "zigroot", "default"])
        .assert()
        .success()
        .stdout("0.11.0\n");
}

#[cfg(unix)]
#[test]
fn test_default_cleans_protect_the_pointed_version() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fake_install(root, "0.11.0");

    zup_in(root).args(["default", "0.11.0"]).assert().success();

    zup_in(root)
        .args(["clean", "0.11.0"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("is default compiler"));
    assert!(root.join("0.11.0").exists());
}

#[cfg(unix)]
#[test]
fn test_run_forwards_the_exit_status() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fake_install(root, "0.11.0");
    let exe = root.join("0.11.0").join("files").join("zig");
    fs::write(&exe, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

    zup_in(root).args(["run", "0.11.0", "version"]).assert().code(7);
}

#[test]
fn test_run_requires_an_installed_version() {
    let temp = TempDir::new().unwrap();

    zup_in(temp.path())
        .args(["run", "9.9.9", "version"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_completions_bash() {
    zup()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zup"));
}

#[test]
fn test_subcommand_help() {
    zup()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Download"));

    zup()
        .args(["clean", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unprotected"));
}
