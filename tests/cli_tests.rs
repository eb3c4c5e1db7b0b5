use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// CLI interface tests
#[cfg(test)]
mod cli_tests {
    use super::*;

    fn pacicli() -> Command {
        let mut cmd = cargo_bin_cmd!("pacicli");
        cmd.env_remove("PACICLI_CONFIG").env_remove("RUST_LOG");
        cmd
    }

    /// Config pointing at a port nothing listens on
    fn write_config(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("Pacifile");
        std::fs::write(
            &path,
            "BaseURL = \"http://127.0.0.1:9\"\nUsername = \"user\"\nPassword = \"secret\"\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_cli_help() {
        pacicli()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("reset-password"))
            .stdout(predicate::str::contains("backup-schedule-set"))
            .stdout(predicate::str::contains("autoscale-history"))
            .stdout(predicate::str::contains("lbattach"))
            .stdout(predicate::str::contains("oslist"));
    }

    #[test]
    fn test_cli_version() {
        pacicli()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_modify_help_lists_flags() {
        pacicli()
            .args(["modify", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--drop-ipv4"))
            .stdout(predicate::str::contains("--setting-file"));
    }

    #[test]
    fn test_missing_config_fails() {
        let dir = TempDir::new().unwrap();
        pacicli()
            .arg("--config")
            .arg(dir.path().join("absent"))
            .args(["info", "web1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration error"));
    }

    #[test]
    fn test_incomplete_config_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Pacifile");
        std::fs::write(&path, "{\"base_url\": \"http://127.0.0.1:9\"}").unwrap();
        pacicli()
            .arg("--config")
            .arg(&path)
            .arg("list")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("username, password"));
    }

    #[test]
    fn test_invalid_window_fails_before_request() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir);
        pacicli()
            .arg("--config")
            .arg(&config)
            .args(["usage", "web1", "--from", "last week", "--to", "2023-01-15 10:30 UTC"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid timestamp: last week"));
    }

    #[test]
    fn test_invalid_drop_address_fails() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir);
        pacicli()
            .env("PACICLI_CONFIG", &config)
            .args(["modify", "web1", "--drop-ipv4", "192.0.2.300"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid address"));
    }

    #[test]
    fn test_empty_modify_fails() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir);
        pacicli()
            .arg("--config")
            .arg(&config)
            .args(["modify", "web1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("There is no modification parameter"));
    }

    #[test]
    fn test_usage_errors_from_clap() {
        pacicli()
            .args(["usage", "web1", "--from", "2023-01-15 10:30 UTC"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--to"));

        pacicli()
            .args(["modify", "web1", "--custom-ns", "--no-custom-ns"])
            .assert()
            .failure();
    }
}
