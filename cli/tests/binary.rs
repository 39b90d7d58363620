//! End-to-end runs of the `taskdesk` binary against a temporary database

use assert_cmd::Command;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    database_url: String,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let database_url = format!("sqlite://{}", dir.path().join("tasks.db").display());
        Self {
            dir,
            database_url,
        }
    }

    fn taskdesk(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskdesk").unwrap();
        cmd.env_remove("CONFIG_FILE")
            .env_remove("RUST_LOG")
            .env("DATABASE_URL", &self.database_url)
            .env("LOG_LEVEL", "error");
        cmd
    }

    fn run(&self, args: &[&str]) -> (i32, String) {
        let output = self.taskdesk().args(args).output().unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        (output.status.code().unwrap_or(-1), stdout)
    }
}

#[test]
fn test_create_then_list() {
    let ws = Workspace::new();

    let (code, stdout) = ws.run(&["create", "--title", "Ship 1.0", "--priority", "Critical"]);
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.starts_with("Task created successfully"));

    let (code, stdout) = ws.run(&["list"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Retrieved 1 tasks"));
    assert!(stdout.contains("Ship 1.0"));
}

#[test]
fn test_validation_failure_exit_code() {
    let ws = Workspace::new();

    let (code, stdout) = ws.run(&["create", "--title", "  "]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Title cannot be empty or whitespace."));
}

#[test]
fn test_json_output() {
    let ws = Workspace::new();
    ws.run(&["seed"]);

    let (code, stdout) = ws.run(&["--json", "people"]);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["is_success"], true);
    assert_eq!(json["message"], "Retrieved 4 people");
    assert_eq!(json["data"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_invalid_configuration_is_startup_error() {
    let ws = Workspace::new();

    let output = ws
        .taskdesk()
        .env("DATABASE_URL", "postgres://localhost/tasks")
        .arg("list")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_command_is_usage_error() {
    let ws = Workspace::new();

    let output = ws.taskdesk().arg("launch").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_listed_ids_are_accepted_by_show() {
    let ws = Workspace::new();
    ws.run(&["create", "--title", "Find me"]);

    let (_, stdout) = ws.run(&["list"]);
    let row = stdout.lines().nth(2).unwrap();
    let id = row.split_whitespace().next().unwrap();

    let (code, stdout) = ws.run(&["show", id]);
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.contains("Title:       Find me"));
}

#[test]
fn test_export_writes_file() {
    let ws = Workspace::new();
    ws.run(&["seed"]);

    let path = ws.dir.path().join("export.csv");
    let path_arg = path.display().to_string();
    let (code, stdout) = ws.run(&["export", "--output", &path_arg]);
    assert_eq!(code, 0, "{stdout}");
    assert!(stdout.starts_with("Exported 7 tasks to CSV"));

    let contents = std::fs::read_to_string(path).unwrap();
    assert_eq!(contents.lines().next().map(|l| l.split(',').count()), Some(9));
}
