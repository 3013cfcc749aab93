//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `mathdrill` isolated in `dir`: no local or global config, no env override.
fn mathdrill(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mathdrill").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MATHDRILL_PROGRESS_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn progress_json(dir: &Path) -> serde_json::Value {
    let output = mathdrill(dir)
        .args(["progress", "--json", "--progress", "progress.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn generated(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = mathdrill(dir)
        .arg("generate")
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn topics_lists_every_topic() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("fractions"))
        .stdout(predicate::str::contains("word-problems"))
        .stdout(predicate::str::contains("measurement"))
        .stdout(predicate::str::contains("built-in"));
}

#[test]
fn generate_prints_question() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["generate", "--topic", "algebra", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solve for x:"))
        .stdout(predicate::str::contains("hint:"));
}

#[test]
fn generate_json_includes_answer() {
    let dir = TempDir::new().unwrap();
    let problem = generated(
        dir.path(),
        &["--topic", "fractions", "--difficulty", "medium", "--seed", "9"],
    );
    assert_eq!(problem["topic"], "fractions");
    assert_eq!(problem["difficulty"], "medium");
    assert_eq!(problem["type"], "fill-in-blank");
    assert!(problem["correctAnswer"].is_string());
    assert!(!problem["explanation"].as_str().unwrap().is_empty());
}

#[test]
fn generate_is_reproducible_with_a_seed() {
    let dir = TempDir::new().unwrap();
    let args = ["--topic", "word-problems", "--difficulty", "hard", "--seed", "77"];
    let a = generated(dir.path(), &args);
    let b = generated(dir.path(), &args);
    assert_eq!(a["question"], b["question"]);
    assert_eq!(a["correctAnswer"], b["correctAnswer"]);
    assert_ne!(a["id"], b["id"]);
}

#[test]
fn generate_with_choices() {
    let dir = TempDir::new().unwrap();
    let problem = generated(
        dir.path(),
        &["--topic", "algebra", "--seed", "4", "--choices"],
    );
    assert_eq!(problem["type"], "multiple-choice");
    let options = problem["options"].as_array().unwrap();
    assert_eq!(options.len(), 4);
    let answer = problem["correctAnswer"].as_f64().unwrap().to_string();
    assert!(options.iter().any(|o| o.as_str() == Some(answer.as_str())));
}

#[test]
fn generate_unknown_topic_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["generate", "--topic", "calculus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("unknown topic: calculus"));
}

#[test]
fn generate_topic_without_generator_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["generate", "--topic", "measurement"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no generator registered"));
}

#[test]
fn practice_records_attempts() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args([
            "practice",
            "--topic",
            "algebra",
            "--count",
            "3",
            "--seed",
            "3",
            "--progress",
            "progress.json",
        ])
        .write_stdin("0\n0\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem 1/3"))
        .stdout(predicate::str::contains("Not quite."))
        .stdout(predicate::str::contains("Session complete: 0/3 correct"))
        .stdout(predicate::str::contains("Getting Started"));

    let progress = progress_json(dir.path());
    assert_eq!(progress["totalProblemsAttempted"], 3);
    assert_eq!(progress["totalCorrect"], 0);
    assert_eq!(progress["topicProgress"]["algebra"]["problemsAttempted"], 3);
    assert_eq!(progress["badges"][0]["id"], "first-problem");
}

#[test]
fn practice_accepts_correct_answer() {
    let dir = TempDir::new().unwrap();
    let problem = generated(dir.path(), &["--topic", "geometry", "--seed", "12"]);
    let answer = problem["correctAnswer"].as_f64().unwrap().to_string();

    mathdrill(dir.path())
        .args([
            "practice",
            "--topic",
            "geometry",
            "--count",
            "1",
            "--seed",
            "12",
            "--progress",
            "progress.json",
        ])
        .write_stdin(format!("?\n{answer}\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("hint:"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("1/1 correct"));

    assert_eq!(progress_json(dir.path())["totalCorrect"], 1);
}

#[test]
fn practice_stops_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args([
            "practice",
            "--topic",
            "fractions",
            "--count",
            "5",
            "--seed",
            "1",
            "--progress",
            "progress.json",
        ])
        .write_stdin("1/2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ending the session early"));

    assert_eq!(progress_json(dir.path())["totalProblemsAttempted"], 1);
}

#[test]
fn practice_refuses_locked_difficulty() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args([
            "practice",
            "--topic",
            "algebra",
            "--difficulty",
            "hard",
            "--progress",
            "progress.json",
        ])
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "difficulty 'hard' is locked for topic 'algebra'",
        ));
    assert!(!dir.path().join("progress.json").exists());
}

#[test]
fn progress_on_fresh_install() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["progress", "--progress", "progress.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 0 attempted"))
        .stdout(predicate::str::contains("grade F"))
        .stdout(predicate::str::contains("Badges (0/6)"))
        .stdout(predicate::str::contains("🔒 Getting Started"));
}

#[test]
fn corrupt_progress_falls_back_to_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("progress.json"), "{ definitely not json").unwrap();
    let progress = progress_json(dir.path());
    assert_eq!(progress["totalProblemsAttempted"], 0);
    assert_eq!(progress["userId"], "default-user");
}

#[test]
fn reset_clears_progress() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args([
            "practice",
            "--topic",
            "algebra",
            "--count",
            "2",
            "--progress",
            "progress.json",
        ])
        .write_stdin("1\n1\n")
        .assert()
        .success();
    assert_eq!(progress_json(dir.path())["totalProblemsAttempted"], 2);

    mathdrill(dir.path())
        .args(["reset", "--progress", "progress.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress reset for default-user"));
    assert_eq!(progress_json(dir.path())["totalProblemsAttempted"], 0);
}

#[test]
fn config_file_sets_user_and_session_length() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mathdrill.toml"),
        "user_id = \"ada\"\nsession_length = 2\nprogress_file = \"ada.json\"\n",
    )
    .unwrap();

    mathdrill(dir.path())
        .args(["practice", "--topic", "geometry", "--seed", "2"])
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem 2/2"));

    let saved = std::fs::read_to_string(dir.path().join("ada.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved["userId"], "ada");
    assert_eq!(saved["totalProblemsAttempted"], 2);
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["topics", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mathdrill.toml"));
    assert!(dir.path().join("mathdrill.toml").exists());

    mathdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn lowering_the_recent_scores_cap_keeps_history() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args([
            "practice",
            "--topic",
            "algebra",
            "--count",
            "4",
            "--seed",
            "6",
            "--progress",
            "progress.json",
        ])
        .write_stdin("0\n0\n0\n0\n")
        .assert()
        .success();

    std::fs::write(
        dir.path().join("mathdrill.toml"),
        "[tracker]\nrecent_scores_cap = 2\n",
    )
    .unwrap();
    let progress = progress_json(dir.path());
    assert_eq!(progress["totalProblemsAttempted"], 4);
    assert_eq!(progress["recentScores"].as_array().unwrap().len(), 2);
    assert_eq!(progress["badges"][0]["id"], "first-problem");
}
