use assert_cmd::Command;
use predicates::prelude::*;
use rhash_core::{HashAlgorithm, PrintFlags};
use rhash_test_utils::{DataPattern, TestDataBuilder, hash_whole};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `rhash` with configuration isolated to `dir`
fn rhash(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rhash").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir)
        .env_remove("RHASH_HASH__ALGORITHMS")
        .arg("--config")
        .arg(dir.join("config.toml"));
    cmd
}

fn write_abc(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("abc.txt");
    fs::write(&path, b"abc").unwrap();
    path
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("rhash").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_hash_default_algorithms() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .arg("hash")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "MD5: 900150983cd24fb0d6963f7d28e17f72",
        ))
        .stdout(predicate::str::contains(
            "SHA1: vgmt4nsha2awvor6evyxqugcnsonbwe5",
        ))
        .stdout(predicate::str::contains("CRC32: 352441c2"));
}

#[test]
fn test_hash_selected_algorithm_hex_uppercase() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .args(["hash", "-a", "sha1", "--hex", "--uppercase"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SHA1: A9993E364706816ABA3E25717850C26C9CD0D89D",
        ))
        .stdout(predicate::str::contains("MD5").not());
}

#[test]
fn test_hash_reads_stdin() {
    let dir = TempDir::new().unwrap();

    rhash(dir.path())
        .args(["hash", "-a", "md5"])
        .write_stdin("abc")
        .assert()
        .success()
        .stdout("MD5: 900150983cd24fb0d6963f7d28e17f72  -\n");
}

#[test]
fn test_hash_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    let output = rhash(dir.path())
        .args(["hash", "-a", "crc32", "-a", "tth", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["size"], 3);
    assert_eq!(value["hashes"]["CRC32"], "352441c2");
    assert_eq!(
        value["hashes"]["TTH"],
        "asd4ujseh5m47pdyb46kbtsqtsgdklbhyxomuia"
    );
}

#[test]
fn test_hash_all_algorithms() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    let output = rhash(dir.path())
        .args(["hash", "--all"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 17);
    assert!(stdout.contains("ED2K: a448017aaf21d8525fc10ae87aa6729d"));
    assert!(stdout.contains("BLAKE2B: "));
}

#[test]
fn test_hash_file_larger_than_chunk_size() {
    let dir = TempDir::new().unwrap();
    let data = TestDataBuilder::new()
        .with_len(300_000)
        .with_pattern(DataPattern::Pseudorandom(7))
        .build();
    let file = dir.path().join("large.bin");
    fs::write(&file, &data).unwrap();

    let expected = hash_whole(HashAlgorithm::SHA256 | HashAlgorithm::TTH, &data).unwrap();

    let output = rhash(dir.path())
        .args(["hash", "-a", "sha256,tth", "--no-progress"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for digest in &expected {
        let line = format!("{}: {}", digest.algorithm(), digest.to_text(PrintFlags::DEFAULT));
        assert!(stdout.contains(&line), "missing {line} in {stdout}");
    }
}

#[test]
fn test_conflicting_encodings_are_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .args(["hash", "--hex", "--base64"])
        .arg(&file)
        .assert()
        .failure();
}

#[test]
fn test_unknown_algorithm_fails() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .args(["hash", "-a", "whirlpool"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("whirlpool"));
}

#[test]
fn test_missing_file_fails_but_other_inputs_print() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .args(["hash", "-a", "crc32"])
        .arg(dir.path().join("missing.bin"))
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("CRC32: 352441c2"))
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_magnet_link() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .args(["magnet", "-a", "tth"])
        .arg(&file)
        .assert()
        .success()
        .stdout(
            "magnet:?xl=3&dn=abc.txt&xt=urn:tree:tiger:asd4ujseh5m47pdyb46kbtsqtsgdklbhyxomuia\n",
        );
}

#[test]
fn test_magnet_continues_after_missing_file() {
    let dir = TempDir::new().unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .args(["magnet", "-a", "md5"])
        .arg(dir.path().join("missing.bin"))
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "magnet:?xl=3&dn=abc.txt&xt=urn:md5:900150983cd24fb0d6963f7d28e17f72",
        ))
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("1 input(s) could not be hashed"));
}

#[test]
fn test_list_algorithms() {
    let dir = TempDir::new().unwrap();

    rhash(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("SHA3-512"))
        .stdout(predicate::str::contains("0x00080"))
        .stdout(predicate::str::contains("base32"));
}

#[test]
fn test_config_set_then_get() {
    let dir = TempDir::new().unwrap();

    rhash(dir.path())
        .args(["config", "set", "hash.algorithms", "sha256,md5"])
        .assert()
        .success();

    rhash(dir.path())
        .args(["config", "get", "hash.algorithms"])
        .assert()
        .success()
        .stdout("sha256,md5\n");

    let file = write_abc(dir.path());
    rhash(dir.path())
        .arg("hash")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("SHA-256: "))
        .stdout(predicate::str::contains("CRC32").not());
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();

    rhash(dir.path())
        .args(["config", "set", "hash.colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_path() {
    let dir = TempDir::new().unwrap();

    rhash(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[io]\nchunk_size = 10\n").unwrap();
    let file = write_abc(dir.path());

    rhash(dir.path())
        .arg("hash")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk_size"));
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();

    rhash(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rhash"));
}
