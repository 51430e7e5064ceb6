//! CLI integration tests for propcrm admin and workspace commands.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("propcrm").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args([
                "admin",
                "init",
                "--data-dir",
                &self.data_dir_str(),
                "--template-name",
                "Modèle",
            ])
            .assert()
    }

    fn workspace(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        let data_dir = self.data_dir_str();
        let mut full = vec!["workspace"];
        full.extend_from_slice(args);
        full.extend_from_slice(&["--data-dir", data_dir.as_str()]);
        self.cmd().args(&full).assert()
    }

    fn workspace_json(&self, args: &[&str]) -> Value {
        let mut args = args.to_vec();
        args.push("--json");
        let output = self.workspace(&args).success();
        serde_json::from_slice(&output.get_output().stdout).expect("failed to parse JSON")
    }
}

#[test]
fn test_init_writes_token_and_config() {
    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("propcrm_"))
        .stdout(predicate::str::contains("Modèle"));

    ctx.temp_dir
        .child(".admin_token")
        .assert(predicate::str::starts_with("propcrm_"));
    ctx.temp_dir
        .child("propcrm.toml")
        .assert(predicate::str::contains("template_workspace_id"));
    ctx.temp_dir.child("workspaces").assert(predicate::path::is_dir());
}

#[test]
fn test_init_twice_fails() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.init()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_commands_require_init() {
    let ctx = TestContext::new();

    ctx.workspace(&["list"])
        .failure()
        .stderr(predicate::str::contains("propcrm admin init"));
}

#[test]
fn test_workspace_create_and_list() {
    let ctx = TestContext::new();
    ctx.init().success();

    let created = ctx.workspace_json(&["create", "Agence Centrale"]);
    assert_eq!(created["workspace"]["display_name"], "Agence Centrale");
    assert!(created["prefill"]["views"]["views_copied"].as_u64().unwrap() > 0);

    let listed = ctx.workspace_json(&["list"]);
    let workspaces = listed.as_array().expect("workspaces not an array");
    assert_eq!(workspaces.len(), 2);
    assert!(workspaces.iter().any(|ws| ws["is_template"] == true));
    assert!(
        workspaces
            .iter()
            .any(|ws| ws["id"] == created["workspace"]["id"] && !ws["prefilled_at"].is_null())
    );

    ctx.workspace(&["list"])
        .success()
        .stdout(predicate::str::contains("Agence Centrale"))
        .stdout(predicate::str::contains("template"));
}

#[test]
fn test_workspace_create_prints_report() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.workspace(&["create", "Agence du Port"])
        .success()
        .stdout(predicate::str::contains("Created workspace \"Agence du Port\""))
        .stdout(predicate::str::contains("feature flags: 4"));
}

#[test]
fn test_workspace_prefill_twice_fails() {
    let ctx = TestContext::new();
    ctx.init().success();

    let created = ctx.workspace_json(&["create", "Agence Centrale"]);
    let id = created["workspace"]["id"].as_str().unwrap();

    ctx.workspace(&["prefill", id])
        .failure()
        .stderr(predicate::str::contains("already been prefilled"));
}

#[test]
fn test_workspace_prefill_unknown_id_fails() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.workspace(&["prefill", "00000000-0000-0000-0000-000000000000"])
        .failure()
        .stderr(predicate::str::contains("not found"));
}
