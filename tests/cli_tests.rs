// End-to-end tests of the cshape binary

use std::fs;
use std::process::Command;

fn cshape() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cshape"))
}

#[test]
fn test_prints_path_and_shape_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let decl = dir.path().join("decl.c");
    let call = dir.path().join("call.c");
    fs::write(&decl, "int helper(int a);\nint x = 5;\n").unwrap();
    fs::write(&call, "int main() { helper(1); }\n").unwrap();

    let output = cshape().arg(&decl).arg(&call).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{}\t_v_=_v_;", decl.display()));
    assert_eq!(lines[1], format!("{}\t_f_(_p_);", call.display()));
}

#[test]
fn test_isolate_flag() {
    let dir = tempfile::tempdir().unwrap();
    let decl = dir.path().join("decl.c");
    let call = dir.path().join("call.c");
    fs::write(&decl, "int helper(int a);\n").unwrap();
    fs::write(&call, "helper(1);\n").unwrap();

    let output = cshape()
        .arg("--isolate")
        .arg(&decl)
        .arg(&call)
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("\t_v_(_v_);\n"));
}

#[test]
fn test_failure_sets_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.c");
    fs::write(&good, "return 0;\n").unwrap();
    let missing = dir.path().join("missing.c");

    let output = cshape().arg(&missing).arg(&good).output().unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, format!("{}\t_r__v_;\n", good.display()));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("cshape.toml");
    let source = dir.path().join("use.c");
    fs::write(&config, "extra_functions = [\"my_alloc\"]\n").unwrap();
    fs::write(&source, "p = my_alloc(8);\n").unwrap();

    let output = cshape()
        .arg("--config")
        .arg(&config)
        .arg(&source)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("\t_v_=_f_(_p_);\n"));
}
