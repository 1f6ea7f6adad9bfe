use assert_cmd::prelude::*;
use indoc::indoc;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn riskboard(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_riskboard"));
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

const SNAPSHOT: &str = indoc! {r#"
    {
      "risks": [
        {"id": "R-1", "title": "Ransomware", "impact": 5, "probability": 5, "status": "ACTIVE", "created_at": "2024-03-01T09:00:00Z"},
        {"id": "R-2", "title": "Expired cert", "impact": 1, "probability": 1, "status": "MITIGATED", "created_at": "2024-03-02T09:00:00Z"},
        {"id": "R-3", "title": "Phishing", "impact": 3, "probability": 4, "status": "DRAFT", "created_at": "2024-03-03T09:00:00Z"}
      ],
      "history": [
        {"timestamp": "2024-03-01T08:00:00Z", "score": 18.5}
      ]
    }
"#};

#[test]
fn test_score_reports_tier() {
    let temp = TempDir::new().unwrap();
    let output = stdout_of(riskboard(&temp).args(["score", "5", "4"]));
    assert!(output.contains("Score: 20"), "{output}");
    assert!(output.contains("CRITICAL"), "{output}");
}

#[test]
fn test_score_json() {
    let temp = TempDir::new().unwrap();
    let output = stdout_of(riskboard(&temp).args(["score", "3", "3", "--format", "json"]));
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["score"], 9);
    assert_eq!(value["tier"], "LOW");
}

#[test]
fn test_score_rejects_out_of_range_rating() {
    let temp = TempDir::new().unwrap();
    let assert = riskboard(&temp).args(["score", "6", "1"]).assert().failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("impact"), "{stderr}");
}

#[test]
fn test_dashboard_json_output_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("snapshot.json"), SNAPSHOT).unwrap();

    riskboard(&temp)
        .args([
            "dashboard",
            "snapshot.json",
            "--format",
            "json",
            "--top",
            "1",
            "--output",
            "view.json",
        ])
        .assert()
        .success();

    let view: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("view.json")).unwrap()).unwrap();
    assert_eq!(view["top_risks"].as_array().unwrap().len(), 1);
    assert_eq!(view["top_risks"][0]["id"], "R-1");
    assert_eq!(view["summary"]["total_risks"], 3);
    assert_eq!(view["trend"][0]["score"], 18.5);
}

#[cfg(target_os = "linux")]
#[test]
fn test_dashboard_reports_failed_output_write() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("snapshot.json"), SNAPSHOT).unwrap();

    for format in ["json", "terminal"] {
        riskboard(&temp)
            .args([
                "dashboard",
                "snapshot.json",
                "--format",
                format,
                "--output",
                "/dev/full",
            ])
            .assert()
            .failure();
    }
}

#[test]
fn test_dashboard_terminal_output() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("snapshot.json"), SNAPSHOT).unwrap();

    let output = stdout_of(riskboard(&temp).args(["dashboard", "snapshot.json"]));
    assert!(output.contains("RISK POSTURE DASHBOARD"), "{output}");
    assert!(output.contains("Ransomware"), "{output}");
    assert!(!output.contains("Expired cert"), "{output}");
}

#[test]
fn test_dashboard_rejects_malformed_snapshot() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("snapshot.json"),
        SNAPSHOT.replace(r#""impact": 5"#, r#""impact": 0"#),
    )
    .unwrap();

    riskboard(&temp)
        .args(["dashboard", "snapshot.json"])
        .assert()
        .failure();
}

#[test]
fn test_profile_tallies_counters_from_snapshot() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("profile.json"),
        r#"{"user_id": "alice", "total_xp": 120}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("snapshot.json"),
        SNAPSHOT.replace(r#""status": "ACTIVE""#, r#""status": "ACTIVE", "owner": "alice""#),
    )
    .unwrap();

    let output = stdout_of(riskboard(&temp).args([
        "profile",
        "profile.json",
        "--risks",
        "snapshot.json",
        "--format",
        "json",
    ]));
    let profile: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(profile["level"], 2);
    assert_eq!(profile["risks_managed"], 1);
    assert_eq!(profile["badges"][0]["id"], "first_blood");
    assert_eq!(profile["badges"][0]["unlocked"], true);
}

#[test]
fn test_init_writes_config_and_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    riskboard(&temp).arg("init").assert().success();

    let written = fs::read_to_string(temp.path().join(".riskboard.toml")).unwrap();
    assert!(written.contains("[ranking]"), "{written}");
    assert!(written.contains("top_n = 5"), "{written}");

    riskboard(&temp).arg("init").assert().failure();
    riskboard(&temp).args(["init", "--force"]).assert().success();
}
