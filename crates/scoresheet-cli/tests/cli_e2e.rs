use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn write_config(dir: &Path, judge_id: &str) -> std::path::PathBuf {
    let config_path = dir.join(format!("scoresheet-{judge_id}.yaml"));
    let store_path = dir.join("store.db");
    let yaml = format!(
        "store_path: {}\napp_instance_id: hackathon-2026\nidentity:\n  mode: fixed\n  judge_id: {judge_id}\n",
        store_path.display()
    );
    std::fs::write(&config_path, yaml).unwrap();
    config_path
}

fn scoresheet() -> Command {
    Command::cargo_bin("scoresheet").unwrap()
}

#[test]
fn criteria_lists_full_catalog() {
    scoresheet()
        .arg("criteria")
        .assert()
        .success()
        .stdout(predicate::str::contains("Innovation & Originality"))
        .stdout(predicate::str::contains("Total possible score: 100 points."));
}

#[test]
fn evaluate_then_show_round_trips() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "judge-a");

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "evaluate", "Team-X"])
        .args([
            "--score", "1=8", "--score", "2=9", "--score", "3=7", "--score", "4=8",
            "--score", "5=9", "--score", "6=10", "--score", "7=8",
        ])
        .args(["--comments", "strong submission", "--team-leader", "Lee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Team-X total: 84.50"));

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "show", "Team-X"])
        .assert()
        .success()
        .stdout(predicate::str::contains("judge: judge-a"))
        .stdout(predicate::str::contains("total:       84.50"))
        .stdout(predicate::str::contains("strong submission"));
}

#[test]
fn second_judge_does_not_clobber_the_first() {
    let tmp = tempdir().unwrap();
    let config_a = write_config(tmp.path(), "judge-a");
    let config_b = write_config(tmp.path(), "judge-b");

    scoresheet()
        .args(["--config", config_a.to_str().unwrap(), "evaluate", "Team-X"])
        .args(["--score", "1=8"])
        .assert()
        .success();

    scoresheet()
        .args(["--config", config_b.to_str().unwrap(), "evaluate", "Team-X"])
        .args(["--score", "1=4"])
        .assert()
        .success();

    scoresheet()
        .args(["--config", config_a.to_str().unwrap(), "show", "Team-X"])
        .assert()
        .success()
        .stdout(predicate::str::contains("judge: judge-a"))
        .stdout(predicate::str::contains("judge: judge-b"));
}

#[test]
fn out_of_range_scores_are_clamped() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "judge-a");

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "evaluate", "Team-X"])
        .args(["--score", "1=15", "--score", "2=-3"])
        .assert()
        .success()
        // 10 * 0.15 * 10 = 15.0; the -3 clamps to 0.
        .stdout(predicate::str::contains("Team-X total: 15.00"));
}

#[test]
fn malformed_score_flag_is_a_usage_error() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "judge-a");

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "evaluate", "Team-X"])
        .args(["--score", "nonsense"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected ID=VALUE"));
}

#[test]
fn show_with_unknown_judge_filter_names_the_judge() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "judge-a");

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "evaluate", "Team-X"])
        .args(["--score", "1=8"])
        .assert()
        .success();

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "show", "Team-X"])
        .args(["--judge", "judge-zz"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No evaluation by judge 'judge-zz' for Team-X",
        ));
}

#[test]
fn show_unknown_submission_fails_cleanly() {
    let tmp = tempdir().unwrap();
    let config = write_config(tmp.path(), "judge-a");

    scoresheet()
        .args(["--config", config.to_str().unwrap(), "show", "Team-Missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Submission not found"));
}
