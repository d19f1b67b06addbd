use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn demedrive() -> Command {
    Command::cargo_bin("demedrive").unwrap()
}

#[test]
fn test_step_prints_next_frequencies() {
    demedrive()
        .args(["step", "-s", "0.5", "-c", "0.8", "--dominance", "0.3", "-m", "0.05"])
        .args(["--alpha", "1", "--q1", "0.7", "--q2", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("q1: 0.749767681806"))
        .stdout(predicate::str::contains("q2: 0.132124694168"));
}

#[test]
fn test_step_rejects_out_of_range_frequency() {
    demedrive()
        .args(["step", "--q1", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to advance one generation"));
}

#[test]
fn test_run_reports_convergence() {
    demedrive()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Converged after 33 generations"));
}

#[test]
fn test_run_reports_exhausted_budget() {
    demedrive()
        .args(["run", "--max-generations", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generation budget exhausted after 5"));
}

#[test]
fn test_run_writes_csv_history() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("history.csv");

    demedrive()
        .args(["run", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("History written to"));

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("generation,q1,q2"));
    assert_eq!(lines.next(), Some("0,0.7,0.1"));
    assert_eq!(content.lines().count(), 35);
}

#[test]
fn test_run_writes_json_history() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("history.json");

    demedrive()
        .args(["run", "--format", "json", "--output"])
        .arg(&path)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["generations"], 33);
}

#[test]
fn test_critical_b2() {
    demedrive()
        .args(["critical", "-s", "0.5", "-c", "0.6", "--dominance", "0.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("m* ≈ 0.1016"))
        .stdout(predicate::str::contains("Iterations: 9"));
}

#[test]
fn test_critical_with_monotonicity_check() {
    demedrive()
        .args(["critical", "-s", "0.73", "-c", "1.0", "--dominance", "0.5"])
        .args(["--check-monotonicity", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("m* ≈ 0.3203"))
        .stdout(predicate::str::contains("Monotonicity Check (5 samples)"));
}

#[test]
fn test_critical_rejects_zero_precision() {
    demedrive()
        .args(["critical", "--precision", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search parameters"));
}

#[test]
fn test_critical_tiny_precision_finishes() {
    demedrive()
        .args(["critical", "-s", "0.5", "-c", "0.6", "--dominance", "0.3"])
        .args(["--precision", "1e-18", "--max-generations", "200"])
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .success()
        .stdout(predicate::str::contains("m* ≈"));
}

#[test]
fn test_scan_preset() {
    demedrive()
        .args(["scan", "--preset", "b2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B2 configuration"))
        .stdout(predicate::str::contains("[loss]"))
        .stdout(predicate::str::contains("[fixation]"));
}

#[test]
fn test_scan_explicit_initials() {
    demedrive()
        .args(["scan", "-s", "0.6", "-c", "0.72", "--dominance", "1.0"])
        .args(["-m", "0.08", "--alpha", "0.1"])
        .args(["--initial", "0.8,0.2", "--initial", "0.7,0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[differential targeting]"));
}

#[test]
fn test_scan_rejects_unknown_preset() {
    demedrive()
        .args(["scan", "--preset", "mouse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset"));
}

#[test]
fn test_alpha_comparison_export() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("alpha.csv");

    demedrive()
        .args(["alpha", "-s", "0.5", "-c", "0.6", "--dominance", "0.3", "-m", "0.02"])
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("α=0.1"))
        .stdout(predicate::str::contains("α=10"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("alpha,generation,q1,q2\n"));
    // 100 + 100 + 99 + 81 + 64 states plus the header
    assert_eq!(content.lines().count(), 445);
}

#[test]
fn test_grid_writes_rows_in_order() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("grid.csv");

    demedrive()
        .args(["--threads", "2", "grid", "--no-progress"])
        .args(["-s", "0.5,0.73", "-c", "0.6,1.0", "--dominance", "0.3,0.5"])
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("8 configurations"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[1], "0.5,0.6,0.3,1,0.1015625,9,");
    assert_eq!(lines[8], "0.73,1,0.5,1,0.3203125,9,");
}

#[test]
fn test_sample_is_reproducible() {
    let run = || {
        demedrive()
            .args(["sample", "--seed", "42", "--q1", "0.7", "--q2", "0.1"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    let stdout = String::from_utf8(first.stdout).unwrap();
    assert!(stdout.contains("target deme"));
    assert!(stdout.contains("Migrants per tick: 1 each way"));
}

#[test]
fn test_init_then_run_from_config() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("demedrive.json");

    demedrive()
        .args(["init", "-m", "0.02", "--max-generations", "500", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to"));

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["model"]["m"], 0.02);
    assert_eq!(value["execution"]["max_generations"], 500);

    demedrive()
        .arg("--config")
        .arg(&path)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migration: 0.02"))
        .stdout(predicate::str::contains("Max Generations: 500"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("demedrive.json");
    std::fs::write(&path, "{}").unwrap();

    demedrive()
        .args(["init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    demedrive()
        .args(["init", "--force", "--output"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_invalid_config_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bad.json");
    std::fs::write(&path, r#"{"model": {"s": 2.0, "c": 0.5, "h": 0.5, "m": 0.1, "alpha": 1.0}}"#)
        .unwrap();

    demedrive()
        .arg("--config")
        .arg(&path)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
