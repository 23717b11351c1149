//! CLI integration tests using assert_cmd.
//!
//! Stdin is a pipe under the test harness, so every run here reads plain
//! lines, including runs with a time limit.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SECURITY_BANK: &str = "../../question-banks/security-basics.json";

fn qcm() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("qcm").unwrap();
    cmd.env_remove("QCM_TIME_LIMIT");
    cmd
}

fn run_in_order(output: &TempDir, count: usize) -> Command {
    let mut cmd = qcm();
    cmd.arg("run")
        .arg("--questions")
        .arg(SECURITY_BANK)
        .arg("--no-shuffle")
        .arg("--no-banner")
        .arg("--count")
        .arg(count.to_string())
        .arg("--output")
        .arg(output.path());
    cmd
}

#[test]
fn help_lists_commands() {
    qcm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    qcm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qcm"));
}

#[test]
fn validate_json_bank() {
    qcm()
        .arg("validate")
        .arg("--questions")
        .arg(SECURITY_BANK)
        .assert()
        .success()
        .stdout(predicate::str::contains("security-basics (10 questions)"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_directory() {
    qcm()
        .arg("validate")
        .arg("--questions")
        .arg("../../question-banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Network Basics (3 questions)"))
        .stdout(predicate::str::contains("security-basics"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"[{"question": "Pick one", "options": {"A": "Only"}, "answer": "B"}]"#,
    )
    .unwrap();

    qcm()
        .arg("validate")
        .arg("--questions")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Q-1] WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    qcm()
        .arg("validate")
        .arg("--questions")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    qcm()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created qcm.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.json"));

    assert!(dir.path().join("qcm.toml").exists());
    assert!(dir.path().join("question-banks/example.json").exists());

    // The generated bank is itself valid.
    qcm()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--questions")
        .arg("question-banks/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    qcm().current_dir(dir.path()).arg("init").assert().success();

    qcm()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn run_perfect_score_with_reprompt() {
    let out = TempDir::new().unwrap();

    run_in_order(&out, 3)
        .arg("--format")
        .arg("all")
        .write_stdin("b\nx\nB\na, c\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q-1) Which security principle"))
        .stdout(predicate::str::contains("A. Confidentiality"))
        .stdout(predicate::str::contains(
            "Invalid input. Please enter one of: A, B, C, D",
        ))
        .stdout(predicate::str::contains("your answer is correct"))
        .stdout(predicate::str::contains("Final Score: 3/3"))
        .stdout(predicate::str::contains("Perfect Score! Excellent work."));

    let mut txt = None;
    let mut json = None;
    for entry in std::fs::read_dir(out.path()).unwrap() {
        let path = entry.unwrap().path();
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => txt = Some(path),
            Some("json") => json = Some(path),
            _ => {}
        }
    }

    let text = std::fs::read_to_string(txt.expect("text report written")).unwrap();
    assert!(text.contains("Final Score: 3/3"));

    let content = std::fs::read_to_string(json.expect("json report written")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["score"]["raw_score"], 3);
    assert_eq!(report["outcomes"][2]["submitted"], "A, C");
    assert_eq!(report["outcomes"][2]["status"], "CORRECT");
}

#[test]
fn run_wrong_answers_show_correct_key() {
    let out = TempDir::new().unwrap();

    run_in_order(&out, 2)
        .write_stdin("A\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "your answer is not correct the correct answer is : B",
        ))
        .stdout(predicate::str::contains("Final Score: 1/2"))
        .stdout(predicate::str::contains("Keep practicing!"));
}

#[test]
fn timed_run_falls_back_when_stdin_is_piped() {
    let out = TempDir::new().unwrap();

    run_in_order(&out, 2)
        .arg("--time-limit")
        .arg("30")
        .write_stdin("B\nB\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have 30s per question."))
        .stdout(predicate::str::contains("Final Score: 2/2"))
        .stderr(predicate::str::contains("time limit disabled"));
}

#[test]
fn run_fails_when_input_ends_early() {
    let out = TempDir::new().unwrap();

    run_in_order(&out, 3)
        .write_stdin("B\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("input closed after 1 of 3 questions"));
}

#[test]
fn run_rejects_unknown_format() {
    let out = TempDir::new().unwrap();

    run_in_order(&out, 1)
        .arg("--format")
        .arg("pdf")
        .write_stdin("B\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report format"));
}

#[test]
fn run_uses_config_file() {
    let out = TempDir::new().unwrap();
    let config = out.path().join("qcm.toml");
    std::fs::write(&config, "question_count = 1\nshuffle = false\n").unwrap();

    qcm()
        .arg("run")
        .arg("--questions")
        .arg(SECURITY_BANK)
        .arg("--no-banner")
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(out.path())
        .write_stdin("B\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting Quiz (1 Questions)"))
        .stdout(predicate::str::contains("Final Score: 1/1"));
}

#[test]
fn run_with_tag_draws_only_tagged_questions() {
    let out = TempDir::new().unwrap();

    qcm()
        .arg("run")
        .arg("--questions")
        .arg("../../question-banks/network-basics.toml")
        .arg("--tag")
        .arg("ports")
        .arg("--no-shuffle")
        .arg("--no-banner")
        .arg("--output")
        .arg(out.path())
        .write_stdin("C\nD\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting Quiz (2 Questions)"))
        .stdout(predicate::str::contains("connectionless").not())
        .stdout(predicate::str::contains("Final Score: 2/2"));
}

#[test]
fn run_with_unknown_tag_fails() {
    let out = TempDir::new().unwrap();

    run_in_order(&out, 1)
        .arg("--tag")
        .arg("nonexistent")
        .write_stdin("B\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions tagged nonexistent"));
}
