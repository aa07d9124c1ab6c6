use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn write_sample_csv(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("events.csv");
    fs::write(
        &path,
        "Issue Key,Date,Status\n\
         K1,2024-01-01,OPEN\n\
         K1,2024-01-03,IN PROGRESS\n\
         K2,2024-01-02,OPEN\n\
         ,2024-01-02,OPEN\n",
    )
    .unwrap();
    path
}

#[test]
fn analyze_json_is_reproducible_with_injected_now() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample_csv(&dir);

    let run = || {
        let output = Command::cargo_bin("statuschart")
            .unwrap()
            .args(["analyze"])
            .arg(&csv)
            .args(["--mode", "event", "--format", "json"])
            .args(["--now", "2024-01-05T00:00:00"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);

    let report: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(report["mode"], "event");
    assert_eq!(report["rows_seen"], 4);
    assert_eq!(report["rows_retained"], 3);
    assert_eq!(report["rows_dropped"], 1);
    assert_eq!(report["default_start"], "2024-01-01");
    assert_eq!(report["default_end"], "2024-01-03");
    assert_eq!(report["series"]["OPEN"][1]["count"], 1);
    assert_eq!(report["ranked_statuses"][0], "OPEN");
}

#[test]
fn analyze_writes_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample_csv(&dir);
    let out = dir.path().join("report.md");

    Command::cargo_bin("statuschart")
        .unwrap()
        .args(["analyze"])
        .arg(&csv)
        .args(["--mode", "cumulative", "--format", "markdown"])
        .args(["--now", "2024-01-05T00:00:00"])
        .arg("--output")
        .arg(&out)
        .current_dir(dir.path())
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("# Status Trend Report"));
    assert!(text.contains("| Rows dropped | 1 |"));
    assert!(text.contains("| OPEN |"));
}

#[test]
fn analyze_missing_file_fails_with_context() {
    let output = Command::cargo_bin("statuschart")
        .unwrap()
        .args(["analyze", "no-such-file.csv"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read input file"), "{stderr}");
}

#[test]
fn analyze_respects_custom_registry() {
    let dir = TempDir::new().unwrap();
    let csv = write_sample_csv(&dir);
    let config = dir.path().join("statuses.toml");
    fs::write(
        &config,
        "[[statuses]]\nname = \"IN PROGRESS\"\nrank = 1\n\n[[statuses]]\nname = \"OPEN\"\nrank = 2\n",
    )
    .unwrap();

    let output = Command::cargo_bin("statuschart")
        .unwrap()
        .args(["analyze"])
        .arg(&csv)
        .args(["--mode", "event", "--format", "json"])
        .args(["--now", "2024-01-05T00:00:00"])
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["ranked_statuses"][0], "IN PROGRESS");
    assert_eq!(report["ranked_statuses"][1], "OPEN");
}

#[test]
fn init_creates_config_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("statuschart")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success();
    let config = dir.path().join("statuschart.toml");
    let contents = fs::read_to_string(&config).unwrap();
    assert!(contents.contains("OPEN"));

    let output = Command::cargo_bin("statuschart")
        .unwrap()
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

    Command::cargo_bin("statuschart")
        .unwrap()
        .args(["init", "--force"])
        .current_dir(dir.path())
        .assert()
        .success();
}
