//! End-to-end integration tests for `oslc`: write a source file, invoke
//! the compiled binary, assert on exit code and stdout/stderr.

use std::path::PathBuf;
use std::process::Command;

fn find_oslc() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("cannot find current exe")
        .parent()
        .expect("cannot find parent dir")
        .to_path_buf();

    if path.file_name().map_or(false, |n| n == "deps") {
        path = path.parent().unwrap().to_path_buf();
    }

    let oslc = path.join("oslc");
    assert!(
        oslc.exists(),
        "oslc binary not found at {}. Run `cargo build -p oslc` first.",
        oslc.display()
    );
    oslc
}

fn write_source(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).expect("failed to write source file");
    path
}

#[test]
fn valid_program_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "function main():int { return 1; }");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap()])
        .output()
        .expect("failed to invoke oslc");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn lex_error_exits_with_failure_and_single_stderr_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "var x: int = $;");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap()])
        .output()
        .expect("failed to invoke oslc");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().last().unwrap().contains("Unexpected character"));
}

#[test]
fn parse_error_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "struct S{};");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap()])
        .output()
        .expect("failed to invoke oslc");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_input_file_is_an_open_failure() {
    let output = Command::new(find_oslc())
        .args(["--input", "/no/such/file.osl"])
        .output()
        .expect("failed to invoke oslc");

    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
}

#[test]
fn print_tokens_dumps_the_token_stream() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "var i:int=3;");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap(), "--print-tokens"])
        .output()
        .expect("failed to invoke oslc");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Token, kind:"));
    assert!(stdout.lines().count() == 7);
}

#[test]
fn print_ast_dumps_the_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "function main():int { return 1; }");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap(), "--print-ast"])
        .output()
        .expect("failed to invoke oslc");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TranslationUnit"));
    assert!(stdout.contains("DeclarationFunction, name: main"));
    assert!(stdout.contains("StatementReturn"));
}

#[test]
fn format_without_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "function main():void{}");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap(), "--format", "hlsl"])
        .output()
        .expect("failed to invoke oslc");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No output file"));
}

#[test]
fn format_reports_emitter_not_available() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "function main():void{}");
    let out_path = dir.path().join("main.hlsl");

    let output = Command::new(find_oslc())
        .args([
            "--input",
            input.to_str().unwrap(),
            "--format",
            "glsl",
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to invoke oslc");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not available in this build"));
}

#[test]
fn unknown_format_value_is_rejected_by_argument_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "main.osl", "function main():void{}");

    let output = Command::new(find_oslc())
        .args(["--input", input.to_str().unwrap(), "--format", "wgsl"])
        .output()
        .expect("failed to invoke oslc");

    assert!(!output.status.success());
}
