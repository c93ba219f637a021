use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const PASSWORD: &str = "passwordpasswordpasswordpasswordpasswordpasswordpasswordpassword";

/// A command isolated from any `ironseal.toml` or `IRONSEAL__*` variables of the host.
fn ironseal(dir: &tempfile::TempDir, password: Option<&str>) -> Command {
    let mut cmd = Command::cargo_bin("ironseal").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("IRONSEAL_PASSWORD")
        .env_remove("IRONSEAL__SEAL__TTL")
        .env_remove("RUST_LOG")
        .env("IRONSEAL__LOG__LEVEL", "warn");
    if let Some(password) = password {
        cmd.env("IRONSEAL_PASSWORD", password);
    }
    cmd
}

fn seal(dir: &tempfile::TempDir, json: &str) -> String {
    let output = ironseal(dir, Some(PASSWORD)).args(["seal", json]).output().unwrap();
    assert!(output.status.success(), "seal failed: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap().trim().to_owned()
}

#[test]
fn seal_then_unseal_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let token = seal(&dir, r#"{"user":"ada","admin":true}"#);

    assert!(token.starts_with("Fe26.2**"));

    ironseal(&dir, Some(PASSWORD))
        .args(["unseal", &token])
        .assert()
        .success()
        .stdout(r#"{"admin":true,"user":"ada"}"#.to_owned() + "\n");
}

#[test]
fn unseal_reads_token_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let token = seal(&dir, "[1,2,3]");

    ironseal(&dir, Some(PASSWORD))
        .arg("unseal")
        .write_stdin(format!("{token}\n"))
        .assert()
        .success()
        .stdout("[1,2,3]\n");
}

#[test]
fn seal_reads_payload_from_stdin() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, Some(PASSWORD))
        .args(["seal", "--algorithm", "aes-128-ctr"])
        .write_stdin("\"Hello World!\"")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Fe26.2**"));
}

#[test]
fn wrong_password_is_rejected_by_kind() {
    let dir = tempfile::tempdir().unwrap();
    let token = seal(&dir, "42");

    ironseal(&dir, Some(&"x".repeat(40)))
        .args(["unseal", &token])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("IntegrityCheckFailed"));
}

#[test]
fn expired_token_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = ironseal(&dir, Some(PASSWORD)).args(["seal", "--ttl", "1", "42"]).output().unwrap();
    let token = String::from_utf8(output.stdout).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(20));

    ironseal(&dir, Some(PASSWORD))
        .env("IRONSEAL__SEAL__TIMESTAMP_SKEW_SEC", "0")
        .args(["unseal", token.trim()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TokenExpired"));
}

#[test]
fn missing_password_fails() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, None)
        .args(["seal", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IRONSEAL_PASSWORD"));
}

#[test]
fn short_password_fails() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, Some("short"))
        .args(["seal", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Password must be at least 32 bytes"));
}

#[test]
fn invalid_json_payload_fails() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, Some(PASSWORD))
        .args(["seal", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn password_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("password.txt");
    std::fs::write(&path, format!("{PASSWORD}\n")).unwrap();

    let token = seal(&dir, "\"from file\"");

    ironseal(&dir, None)
        .arg("--password-file")
        .arg(&path)
        .args(["unseal", &token])
        .assert()
        .success()
        .stdout("\"from file\"\n");
}

#[test]
fn key_command_matches_reference_vector() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, Some(PASSWORD))
        .args([
            "--iterations",
            "2",
            "key",
            "--algorithm",
            "aes-256-cbc",
            "--salt",
            "b27a06366ace6bb1560ea039a5595c352a429b87f3982542da9e830a32f5468e",
            "--iv",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(
                "\"key\": \"f3239f37552934ddfbb361bea47aabc76f621ed249250e1d9df538204bf16347\"",
            )
            .and(predicate::str::contains("\"iv\": \"000102030405060708090a0b0c0d0e0f\""))
            .and(predicate::str::contains("\"algorithm\": \"aes-256-cbc\"")),
        );
}

#[test]
fn key_command_rejects_bad_iv_length() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, Some(PASSWORD))
        .args(["key", "--algorithm", "aes-128-ctr", "--iv", "00ff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IV must be 16 bytes"));
}

#[test]
fn config_file_is_loaded_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(dir.path().join("ironseal.toml")).unwrap();
    writeln!(file, "[seal.encryption]\nalgorithm = \"aes-128-ctr\"\niterations = 3").unwrap();
    writeln!(file, "\n[seal.integrity]\nalgorithm = \"sha256\"\niterations = 3").unwrap();

    let token = seal(&dir, "\"configured\"");

    // Without the file the iteration count differs, so the MAC no longer matches.
    let elsewhere = tempfile::tempdir().unwrap();
    ironseal(&elsewhere, Some(PASSWORD))
        .args(["unseal", &token])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IntegrityCheckFailed"));

    ironseal(&dir, Some(PASSWORD))
        .args(["unseal", &token])
        .assert()
        .success()
        .stdout("\"configured\"\n");
}

#[test]
fn explicit_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    ironseal(&dir, Some(PASSWORD))
        .args(["--config", "absent.toml", "seal", "1"])
        .assert()
        .failure();
}

#[test]
fn configuration_is_logged_once_the_logger_is_installed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ironseal.toml"), "[seal.encryption]\nalgorithm = \"aes-128-ctr\"\n")
        .unwrap();

    ironseal(&dir, Some(PASSWORD))
        .env("IRONSEAL__LOG__LEVEL", "debug")
        .env("NO_COLOR", "1")
        .args(["seal", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded").and(predicate::str::contains("aes-128-ctr")));
}
