//! CLI integration tests for base32-codec
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;

fn base32_codec() -> Command {
    Command::cargo_bin("base32-codec").unwrap()
}

#[test]
fn test_help() {
    base32_codec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("RFC 4648"));
}

#[test]
fn test_encode_stdin() {
    base32_codec()
        .write_stdin("foobar")
        .assert()
        .success()
        .stdout("MZXW6YTBOI======\n");
}

#[test]
fn test_decode_stdin() {
    base32_codec()
        .arg("--decode")
        .write_stdin("MZXW6YTBOI======")
        .assert()
        .success()
        .stdout("foobar");
}

#[test]
fn test_decode_trims_trailing_newline() {
    base32_codec()
        .arg("--decode")
        .write_stdin("MZXW6YTBOI======\n")
        .assert()
        .success()
        .stdout("foobar");
}

#[test]
fn test_roundtrip() {
    // Encode
    let encoded = base32_codec()
        .write_stdin("test data 123")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // Decode
    base32_codec()
        .arg("--decode")
        .write_stdin(encoded)
        .assert()
        .success()
        .stdout("test data 123");
}

#[test]
fn test_engine_flag_matches_default() {
    let expected = base32_codec()
        .write_stdin("engine parity")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    base32_codec()
        .arg("--engine")
        .write_stdin("engine parity")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_engine_decode() {
    base32_codec()
        .args(["--decode", "--engine"])
        .write_stdin("MZXW6YTBOI======")
        .assert()
        .success()
        .stdout("foobar");
}

#[test]
fn test_encode_file() {
    let path = std::env::temp_dir().join("base32-codec-cli-encode.txt");
    std::fs::write(&path, "fooba").unwrap();

    base32_codec()
        .arg(&path)
        .assert()
        .success()
        .stdout("MZXW6YTB\n");

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_decode_invalid_character_fails() {
    base32_codec()
        .arg("--decode")
        .write_stdin("MZXW6YT!")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid character"));
}

#[test]
fn test_decode_invalid_length_fails() {
    base32_codec()
        .arg("--decode")
        .write_stdin("GE")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid length"));
}
