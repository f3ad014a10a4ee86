//! Helpers for driving the `desk` binary inside a throwaway workspace.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// A temp directory used as cwd, HOME and data directory.
pub struct DeskWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub env: Vec<(String, String)>,
}

impl DeskWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            root,
            env: Vec::new(),
        }
    }

    /// A workspace whose board is hidden until someone logs in.
    pub fn gated() -> Self {
        let mut workspace = Self::new();
        workspace.set_env("DESK_REQUIRE_LOGIN", "true");
        workspace
    }

    pub fn set_env(&mut self, key: &str, value: &str) {
        self.env.push((key.to_string(), value.to_string()));
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(".desk").join("data")
    }

    pub fn issues_file(&self) -> PathBuf {
        self.data_dir().join("oxy-beaumonde-issues.json")
    }

    pub fn write_workspace_config(&self, yaml: &str) {
        let dir = self.root.join(".desk");
        fs::create_dir_all(&dir).expect("create .desk");
        fs::write(dir.join("config.yaml"), yaml).expect("write config");
    }
}

pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout))
    }
}

fn desk_command(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("desk").expect("desk binary");
    cmd.current_dir(root);
    cmd.env("HOME", root);
    cmd.env("XDG_CONFIG_HOME", root.join("xdg"));
    cmd.env("DESK_UTC_OFFSET_MINUTES", "0");
    for var in [
        "DESK_DATA_DIR",
        "DESK_ISSUES_KEY",
        "DESK_USER_KEY",
        "DESK_REQUIRE_LOGIN",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run `desk` with `args`; `label` names the step in failure messages.
pub fn run_desk<I, S>(workspace: &DeskWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = desk_command(&workspace.root);
    for (key, value) in &workspace.env {
        cmd.env(key, value);
    }
    cmd.args(args);
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("[{label}] failed to run desk: {e}"));
    RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run `desk`, asserting success.
pub fn run_desk_ok<I, S>(workspace: &DeskWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = run_desk(workspace, args, label);
    assert!(
        output.status.success(),
        "[{label}] desk failed\nstdout: {}\nstderr: {}",
        output.stdout,
        output.stderr
    );
    output
}

/// Submit a fully filled issue and return its ID.
pub fn submit_issue(workspace: &DeskWorkspace, title: &str, resident: &str, unit: &str) -> String {
    let output = run_desk_ok(
        workspace,
        [
            "submit",
            "--json",
            "--name",
            resident,
            "--unit",
            unit,
            "--contact",
            "+91 98450 00000",
            "--category",
            "Maintenance",
            "--title",
            title,
            "--description",
            "Reported from the test suite",
        ],
        "submit",
    );
    output.json()["id"]
        .as_str()
        .expect("submitted issue has an id")
        .to_string()
}
