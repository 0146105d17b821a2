use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "fattree-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn rate_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| line.starts_with("RATE "))
        .map(str::to_string)
        .collect()
}

#[test]
fn cli_prints_one_report_line_per_rate_and_writes_json() {
    let dir = unique_temp_dir("sweep");
    let results_json = dir.join("results.json");
    let snapshot_json = dir.join("snapshot.json");

    let output = Command::new(env!("CARGO_BIN_EXE_fat_tree_resilience"))
        .env("RUST_LOG", "warn")
        .args([
            "--k",
            "4",
            "--trials",
            "5",
            "--rates",
            "0,5,10",
            "--fail-rate",
            "10",
            "--results-json",
            results_json.to_str().unwrap(),
            "--snapshot-json",
            snapshot_json.to_str().unwrap(),
        ])
        .output()
        .expect("run fat_tree_resilience");
    assert!(
        output.status.success(),
        "fat_tree_resilience failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = rate_lines(&stdout);
    assert_eq!(lines.len(), 3, "stdout={stdout}");
    assert!(lines[0].starts_with("RATE 0%: Avg Path="), "{}", lines[0]);
    assert!(lines[0].ends_with("Reachability=100.00%"), "{}", lines[0]);
    assert!(stdout.contains("Failure Rate (%), Avg Path Length (Hops), Reachability (%)"));
    assert!(stdout.contains("Links Failed in Snapshot: 5"));

    let raw = fs::read_to_string(&results_json).expect("read results.json");
    let v: Value = serde_json::from_str(&raw).expect("parse results.json");
    let rows = v["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["fail_rate_pct"].as_f64(), Some(5.0));
    assert_eq!(v["sampling"], "exhaustive");

    let raw = fs::read_to_string(&snapshot_json).expect("read snapshot.json");
    let v: Value = serde_json::from_str(&raw).expect("parse snapshot.json");
    assert_eq!(v["nodes"].as_array().map(Vec::len), Some(36));
    let failed = v["links"]
        .as_array()
        .expect("links array")
        .iter()
        .filter(|l| l["failed"].as_bool() == Some(true))
        .count();
    assert_eq!(failed, 5);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_reads_config_file_and_flags_override_it() {
    let dir = unique_temp_dir("config");
    let config = dir.join("experiment.json");
    fs::write(
        &config,
        r#"{ "k": 6, "fail_rates": [0.0, 2.0], "trials": 2, "max_sample_pairs": 40 }"#,
    )
    .expect("write config");
    let results_json = dir.join("results.json");

    let output = Command::new(env!("CARGO_BIN_EXE_fat_tree_resilience"))
        .env("RUST_LOG", "warn")
        .args([
            "--config",
            config.to_str().unwrap(),
            "--trials",
            "3",
            "--serial",
            "--results-json",
            results_json.to_str().unwrap(),
        ])
        .output()
        .expect("run fat_tree_resilience");
    assert!(
        output.status.success(),
        "fat_tree_resilience failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&results_json).expect("read results.json");
    let v: Value = serde_json::from_str(&raw).expect("parse results.json");
    assert_eq!(v["k"], 6);
    assert_eq!(v["trials"], 3);
    assert_eq!(v["sampling"], "random");
    assert_eq!(v["sample_pairs"].as_array().map(Vec::len), Some(40));
    assert_eq!(rate_lines(&String::from_utf8_lossy(&output.stdout)).len(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn cli_rejects_odd_k() {
    let output = Command::new(env!("CARGO_BIN_EXE_fat_tree_resilience"))
        .env("RUST_LOG", "off")
        .args(["--k", "5", "--skip-sweep"])
        .output()
        .expect("run fat_tree_resilience");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("even number"), "stderr={stderr}");
}
