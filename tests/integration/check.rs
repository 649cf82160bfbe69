//! Integration tests for the `litex` command line

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn litex(
    dir: &Path,
    args: &[&str],
) -> Output {
    Command::new(env!("CARGO_BIN_EXE_litex"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_check_valid_file() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(
        &temp_dir,
        "valid.lix",
        "know:\n    a = b\n    forall x N:\n        $p(x)\nproperty q(x N):\n    $p(x)\n",
    );

    let output = litex(temp_dir.path(), &["check", "valid.lix"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("2 statements"), "{}", stdout);
    assert!(stdout.contains("1 ground, 1 conditional, 1 universal"), "{}", stdout);
    assert!(stdout.contains("declared: 0 var, 1 property, 0 fn, 0 alias"), "{}", stdout);
}

#[test]
fn test_check_reports_error_chain() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "broken.lix", "know a = b\nclaim:\n    a = b\n");

    let output = litex(temp_dir.path(), &["check", "broken.lix"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("in `claim :`"), "{}", stderr);
    assert!(stderr.contains("claim must end with a 'proof' block"), "{}", stderr);
}

#[test]
fn test_check_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = litex(temp_dir.path(), &["check", "absent.lix"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read file"));
}

#[test]
fn test_ast_prints_source_form() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "expr.lix", "know 1 + 2 * 3 = 7\n");

    let output = litex(temp_dir.path(), &["ast", "expr.lix"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "know (1 + (2 * 3)) = 7\n");
}

#[test]
fn test_ast_json() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "know.lix", "pub know a = b\n");

    let output = litex(temp_dir.path(), &["ast", "know.lix", "--json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["is_pub"], serde_json::Value::Bool(true));
    assert_eq!(json[0]["stmt"]["Know"]["facts"][0]["Relational"]["operator"], "Eq");
}

#[test]
fn test_tokens_prints_block_tree() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "tree.lix", "know:\n  a=b\n");

    let output = litex(temp_dir.path(), &["tokens", "tree.lix"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "know :\n    a = b\n");
}

#[test]
fn test_config_file_is_honoured() {
    let temp_dir = TempDir::new().unwrap();
    create_test_file(&temp_dir, "litex.toml", "[lexer]\ntab_width = 0\n");
    create_test_file(&temp_dir, "ok.lix", "know a = b\n");

    let output = litex(temp_dir.path(), &["check", "ok.lix"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("tab_width"));

    let custom = create_test_file(&temp_dir, "custom.toml", "[log]\nlevel = \"error\"\n");
    let output = litex(
        temp_dir.path(),
        &["--config", custom.to_str().unwrap(), "check", "ok.lix"],
    );
    assert!(output.status.success());
}
