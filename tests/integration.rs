//! Integration tests: drive the built binary end to end
//!
//! Each test runs `test-shell` as a subprocess inside its own tempdir, so
//! tests never touch the shared process working directory and exit codes
//! are observed exactly as a calling environment would see them.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn test_shell() -> Command {
    Command::new(env!("CARGO_BIN_EXE_test-shell"))
}

/// Run a script file with the given content inside `dir`.
fn run_script_in(dir: &Path, script: &str) -> Output {
    let script_path = dir.join("script");
    fs::write(&script_path, script).unwrap();
    test_shell()
        .arg(&script_path)
        .current_dir(dir)
        .output()
        .expect("spawn test-shell")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn echo_lines_print_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(dir.path(), "echo one\necho two\necho three\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "one\ntwo\nthree\n");
}

#[test]
fn literal_command_form() {
    let dir = tempfile::tempdir().unwrap();
    let output = test_shell()
        .args(["-c", "echo from literal\n"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "from literal\n");
}

#[test]
fn false_stops_the_script() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(dir.path(), "false\necho must not appear\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn unrecognized_directive_exits_127() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(dir.path(), "frobnicate\necho must not appear\n");
    assert_eq!(output.status.code(), Some(127));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("frobnicate"));
}

#[test]
fn comments_and_set_lines_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(dir.path(), "# a comment\nset x=1\necho done\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "done\n");
    assert!(stderr_of(&output).is_empty());
}

#[test]
fn create_file_captures_raw_remainder() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(dir.path(), "create file out.txt\nhello\nworld");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        fs::read(dir.path().join("out.txt")).unwrap(),
        b"hello\nworld"
    );
}

#[test]
fn create_file_swallows_directive_looking_lines() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(
        dir.path(),
        "echo before\ncreate file out.txt\necho inside\nfalse\n",
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "before\n");
    assert_eq!(
        fs::read(dir.path().join("out.txt")).unwrap(),
        b"echo inside\nfalse\n"
    );
}

#[test]
fn printvar_prints_environment_value() {
    let dir = tempfile::tempdir().unwrap();
    let output = test_shell()
        .args(["-c", "printvar GREETING\n"])
        .env("GREETING", "hello")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "hello\n");
}

#[test]
fn file_exists_ends_the_script_with_success() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("present"), "x").unwrap();
    let output = run_script_in(dir.path(), "file exists present\necho must not appear\n");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).is_empty());
}

#[test]
fn file_exists_fails_for_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_script_in(dir.path(), "file exists absent\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("absent"));
}

#[test]
fn trace_flag_echoes_directives_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = test_shell()
        .args(["-x", "-c", "echo hi\n"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "hi\n");
    assert!(stderr_of(&output).contains("> echo hi"));
}

#[test]
fn command_and_script_are_mutually_exclusive() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("script"), "echo hi\n").unwrap();
    let output = test_shell()
        .args(["-c", "echo hi"])
        .arg(dir.path().join("script"))
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn unreadable_script_file_fails() {
    let output = test_shell()
        .arg("/nonexistent/script")
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(0));
    assert!(stderr_of(&output).contains("/nonexistent/script"));
}

#[test]
fn copy_files_deploys_the_working_tree() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let dest_root = dst.path().join("image");

    fs::write(src.path().join("a.txt"), "X").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(src.path().join("a.txt"), fs::Permissions::from_mode(0o644)).unwrap();
    }
    fs::create_dir(src.path().join("sub")).unwrap();
    #[cfg(unix)]
    std::os::unix::fs::symlink("../a.txt", src.path().join("sub/link")).unwrap();
    fs::create_dir(src.path().join(".git")).unwrap();
    fs::write(src.path().join(".git/HEAD"), "ref: main").unwrap();

    let script_path = src.path().join("deploy.script");
    fs::write(&script_path, "# deploy\nset -e\necho starting\ncopy files\necho done\n").unwrap();

    let output = test_shell()
        .arg(&script_path)
        .current_dir(src.path())
        .env("DESTDIR", &dest_root)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "starting\ndone\n");

    assert_eq!(fs::read_to_string(dest_root.join("a.txt")).unwrap(), "X");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(dest_root.join("a.txt"))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o644);
        let target = fs::read_link(dest_root.join("sub/link")).unwrap();
        assert_eq!(target.to_str(), Some("../a.txt"));
    }
    assert!(dest_root.join("sub").is_dir());
    assert!(!dest_root.join(".git").exists());
}

#[test]
fn copy_files_twice_tolerates_existing_directories() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let dest_root = dst.path().join("image");

    fs::create_dir(src.path().join("sub")).unwrap();
    fs::write(src.path().join("sub/data"), "v1").unwrap();

    for content in ["v1", "v2"] {
        fs::write(src.path().join("sub/data"), content).unwrap();
        let output = test_shell()
            .args(["-c", "copy files\n"])
            .current_dir(src.path())
            .env("DESTDIR", &dest_root)
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
        assert_eq!(
            fs::read_to_string(dest_root.join("sub/data")).unwrap(),
            content
        );
    }
}

#[test]
fn copy_files_without_destdir_fails() {
    let src = tempfile::tempdir().unwrap();
    let output = test_shell()
        .args(["-c", "copy files\necho must not appear\n"])
        .current_dir(src.path())
        .env_remove("DESTDIR")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("destination root"));
}
