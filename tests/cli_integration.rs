use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const ADD_ALICE: &str = "1\n10\nAlice\n30\nF\n555-1234\n";

#[test]
fn shell_add_search_exit() {
    Command::cargo_bin("profiledb").unwrap()
        .write_stdin(format!("{}3\n10\n7\n", ADD_ALICE))
        .assert()
        .success()
        .stdout(contains("Profile added successfully!"))
        .stdout(contains("ID: 10, Name: Alice, Age: 30, Gender: F, Contact: 555-1234"))
        .stdout(contains("Exiting..."));
}

#[test]
fn shell_subcommand_lists_inorder() {
    Command::cargo_bin("profiledb").unwrap()
        .arg("shell")
        .write_stdin("5\n7\n")
        .assert()
        .success()
        .stdout(contains("Inorder Traversal:"));
}

#[test]
fn shell_reports_missing_profile() {
    Command::cargo_bin("profiledb").unwrap()
        .write_stdin("2\n42\n3\n42\n")
        .assert()
        .success()
        .stdout(contains("Profile with ID 42 not found.").count(2));
}

#[test]
fn init_config_then_use_it() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("profiledb.json");

    Command::cargo_bin("profiledb").unwrap()
        .args(["init", "--path"])
        .arg(&config)
        .args(["--name-max-len", "3"])
        .assert()
        .success()
        .stdout(contains("Created configuration file"));

    Command::cargo_bin("profiledb").unwrap()
        .arg("--config")
        .arg(&config)
        .write_stdin(format!("{}7\n", ADD_ALICE))
        .assert()
        .success()
        .stdout(contains("Invalid name"));
}

#[test]
fn missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("profiledb").unwrap()
        .arg("--config")
        .arg(temp_dir.path().join("nope.json"))
        .write_stdin("7\n")
        .assert()
        .failure()
        .stderr(contains("Configuration file not found"));
}

#[test]
fn bench_runs_small_workload() {
    Command::cargo_bin("profiledb").unwrap()
        .args(["bench", "--keys", "500", "--operations", "5000", "--seed", "3"])
        .assert()
        .success()
        .stdout(contains("=== Benchmark Results ==="))
        .stdout(contains("AVL bound"));
}

#[test]
fn bench_rejects_bad_percentages() {
    Command::cargo_bin("profiledb").unwrap()
        .args(["bench", "--read-pct", "80", "--write-pct", "30", "--keys", "10"])
        .assert()
        .failure();
}
