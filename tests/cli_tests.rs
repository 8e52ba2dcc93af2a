use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    ranks_path: PathBuf,
    binary_path: PathBuf,
    input_path: PathBuf,
    batch_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let ranks_path = dir.path().join("ranks.csv");
        let binary_path = dir.path().join("binary.json");
        let input_path = dir.path().join("input.json");
        let batch_path = dir.path().join("batch.json");

        let mut ranks = File::create(&ranks_path).unwrap();
        writeln!(ranks, "step_number,step_name,commission_percentage,sales_quota").unwrap();
        writeln!(ranks, "4,Gold,14,5000").unwrap();
        writeln!(ranks, "6,Diamond,21,25000").unwrap();

        let mut binary = File::create(&binary_path).unwrap();
        writeln!(
            binary,
            r#"{{"cycleAmount": 2000, "cycleCommission": 200, "maxCyclesPerDay": 10, "sponsorBonusPercent": 10}}"#
        )
        .unwrap();

        let input = r#"{
            "leftVolume": 10000,
            "rightVolume": 8000,
            "evaluationDays": 30,
            "referralCounts": [5, 0, 0, 0, 0, 0, 0],
            "avgPurchaseAmount": 1000,
            "currentStepNumber": 6,
            "downline": { "4": { "count": 3, "sales": 10000 } }
        }"#;
        File::create(&input_path)
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();

        let batch = r#"[
            { "referralCounts": [1, 0, 0, 0, 0, 0, 0], "avgPurchaseAmount": 100 },
            { "referralCounts": [2, 0, 0, 0, 0, 0, 0], "avgPurchaseAmount": 100 },
            { "leftVolume": -5 }
        ]"#;
        File::create(&batch_path)
            .unwrap()
            .write_all(batch.as_bytes())
            .unwrap();

        Self {
            _dir: dir,
            ranks_path,
            binary_path,
            input_path,
            batch_path,
        }
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_payforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn json_total(ctx: &TestContext, extra: &[&str]) -> f64 {
    let mut args = vec![
        "calculate",
        "--json",
        "--ranks",
        ctx.ranks_path.to_str().unwrap(),
        "--binary",
        ctx.binary_path.to_str().unwrap(),
        "--input",
        ctx.input_path.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    let out = run(&args);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    value["grandTotal"].as_f64().unwrap()
}

#[test]
fn test_cli_calculate_json() {
    let ctx = TestContext::new();
    // 800 binary + 500 network + 700 differential
    let total = json_total(&ctx, &[]);
    assert!((total - 2_000.0).abs() < 1e-6, "total = {}", total);
}

#[test]
fn test_cli_flag_overrides_binary_file() {
    let ctx = TestContext::new();
    // 1000 per cycle -> 8 cycles -> 1600 binary
    let total = json_total(&ctx, &["--cycle-amount", "1000"]);
    assert!((total - 2_800.0).abs() < 1e-6, "total = {}", total);
}

#[test]
fn test_cli_calculate_table() {
    let out = run(&[
        "calculate",
        "--left-volume",
        "10000",
        "--right-volume",
        "8000",
        "--referrals",
        "5,0,0,0,0,0,0",
        "--avg-purchase",
        "1000",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);

    let re = Regex::new(r"grand_total\s*\|\s*([0-9.]+)").unwrap();
    let caps = re.captures(&stdout).expect("grand total row");
    assert_eq!(&caps[1], "1300.00");
}

#[test]
fn test_cli_reject_policy_fails() {
    let out = run(&["calculate", "--policy", "reject", "--left-volume", "-1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("leftVolume"));
}

#[test]
fn test_cli_batch_json() {
    let ctx = TestContext::new();
    let out = run(&[
        "batch",
        "--json",
        "--policy",
        "reject",
        "--input",
        ctx.batch_path.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!((rows[0]["grandTotal"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((rows[1]["grandTotal"].as_f64().unwrap() - 20.0).abs() < 1e-9);
    assert!(rows[2]["error"].as_str().unwrap().contains("leftVolume"));
}

#[test]
fn test_cli_autofill_plain() {
    let out = run(&["autofill", "--multiplier", "2", "--plain"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "2,4,8,16,32,64,128"
    );
}

#[test]
fn test_cli_sweep_rows() {
    let out = run(&[
        "sweep", "--from", "1", "--to", "3", "--step", "1", "--avg-purchase", "100",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let re = Regex::new(r"(?m)^\|\s*[123]\s*\|").unwrap();
    assert_eq!(re.find_iter(&stdout).count(), 3);
}

#[test]
fn test_cli_validate_flags_zero_cycle() {
    let ctx = TestContext::new();
    let ok = run(&["validate", "--ranks", ctx.ranks_path.to_str().unwrap()]);
    assert!(ok.status.success());

    let bad = run(&["validate", "--cycle-amount", "0"]);
    assert!(!bad.status.success());
    assert!(String::from_utf8_lossy(&bad.stdout).contains("cycle amount"));
}
