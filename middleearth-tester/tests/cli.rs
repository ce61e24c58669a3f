use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "middleearth-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_show_plan_writes_output() {
    let exe = env!("CARGO_BIN_EXE_middleearth-tester");
    let output_path = temp_path("plan");
    let status = Command::new(exe)
        .args(["--show-plan", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Plan: fellowship"));
    assert!(content.contains("Frodo leads DestroyRing"));
}

#[test]
fn cli_runs_seed_range_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_middleearth-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args(["--seeds", "1..=3", "--days", "5", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["campaigns"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["aggregate"]["runs"], 3);
}

#[test]
fn cli_rejects_invalid_seeds() {
    let exe = env!("CARGO_BIN_EXE_middleearth-tester");
    let output = Command::new(exe)
        .args(["--seeds", "mordor"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid seed"));
}

#[test]
fn cli_reads_plan_files() {
    let exe = env!("CARGO_BIN_EXE_middleearth-tester");
    let plan_path = temp_path("plan.json");
    std::fs::write(
        &plan_path,
        r#"{ "name": "shire-market", "steps": [
            { "day": 1, "action": "buy", "buyer": "Sam", "item": "Pipe Weed", "haggle": true } ] }"#,
    )
    .expect("write plan");
    let output_path = temp_path("market");
    let status = Command::new(exe)
        .args(["--report", "markdown", "--plan"])
        .arg(&plan_path)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("- **Plan**: shire-market"));
    assert!(content.contains("- **Rejected actions**: 0"));
}
