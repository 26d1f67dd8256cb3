use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn elide() -> Command {
    let mut cmd = Command::new(PathBuf::from(env!("CARGO_BIN_EXE_elide")));
    // Keep discovery away from any elide.toml in the working directory.
    cmd.current_dir(std::env::temp_dir());
    cmd
}

const FIVE_LINES: &str = "The quick brown fox jumps\nover the lazy dog again\nand again until the end\nof the paragraph arrives\nfinally.\n";

fn write_tmp(body: &str) -> tempfile::NamedTempFile {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), body).unwrap();
    tmp
}

fn empty_config() -> tempfile::NamedTempFile {
    write_tmp("")
}

#[test]
fn truncates_file_to_three_lines() {
    let input = write_tmp(FIVE_LINES);
    let cfg = empty_config();
    let out = elide()
        .arg(input.path())
        .args(["--width", "30", "--no-color", "--config"])
        .arg(cfg.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.starts_with("The quick brown fox jumps\nover the lazy dog again\n"));
    assert!(text.trim_end_matches('\n').ends_with("... ▾"));
    assert_eq!(text.trim_end_matches('\n').lines().count(), 3);
}

#[test]
fn reads_stdin_and_expands() {
    let cfg = empty_config();
    let mut child = elide()
        .args(["--width", "30", "--no-color", "--expanded", "--config"])
        .arg(cfg.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(FIVE_LINES.as_bytes())
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        text,
        format!("{} ▴\n", FIVE_LINES.trim_end_matches('\n'))
    );
}

#[test]
fn file_that_fits_is_printed_unchanged() {
    let input = write_tmp("alpha\nbeta\ngamma\n");
    let cfg = empty_config();
    let variants: [&[&str]; 2] = [&[], &["--expanded"]];
    for extra in variants {
        let out = elide()
            .arg(input.path())
            .args(["--width", "30", "--no-color", "--config"])
            .arg(cfg.path())
            .args(extra)
            .output()
            .unwrap();
        assert!(out.status.success());
        assert_eq!(String::from_utf8(out.stdout).unwrap(), "alpha\nbeta\ngamma\n");
    }
}

#[test]
fn config_file_controls_ellipsis_and_lines() {
    let input = write_tmp(FIVE_LINES);
    let cfg = write_tmp(
        "[truncate]\nmax_lines_on_shrink = 1\nellipsis_hint = \"…\"\nshow_to_expand_hint = false\n",
    );
    let out = elide()
        .arg(input.path())
        .args(["--width", "30", "--no-color", "--config"])
        .arg(cfg.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    let line = text.trim_end_matches('\n');
    assert!(line.starts_with("The quick brown fox"));
    assert!(line.ends_with('…'));
    assert!(!line.contains('\n'));
}

#[test]
fn missing_input_file_fails() {
    let out = elide()
        .arg("__definitely_missing__.txt")
        .args(["--width", "30"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}
