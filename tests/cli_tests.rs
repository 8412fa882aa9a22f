//! CLI integration tests

use std::process::Command;

fn clipimg_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clipimg"))
}

#[test]
fn help_output() {
    let output = clipimg_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipboard image"));
    assert!(stdout.contains("paste"));
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("daemon"));
    assert!(stdout.contains("config"));
}

#[test]
fn paste_help_lists_flags() {
    let output = clipimg_bin()
        .args(["paste", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--retention"));
    assert!(stdout.contains("--prefix"));
    assert!(stdout.contains("--local"));
}

#[test]
fn version_output() {
    let output = clipimg_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clipimg"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    let output = clipimg_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn daemon_help() {
    let output = clipimg_bin()
        .args(["daemon", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("start"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("cleanup"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let output = clipimg_bin().output().expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn detect_json_reports_context() {
    let output = clipimg_bin()
        .args(["detect", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"context\""));
    assert!(stdout.contains("\"tools\""));
    assert!(stdout.contains("wl-paste"));
}

// dirs::config_dir only honors XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
mod linux {
    use super::clipimg_bin;

    #[test]
    fn config_path_command() {
        let home = tempfile::tempdir().unwrap();
        let output = clipimg_bin()
            .env("XDG_CONFIG_HOME", home.path())
            .args(["config", "path"])
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("clipimg"));
        assert!(stdout.contains("config.toml"));
    }

    #[test]
    fn config_set_then_get() {
        let home = tempfile::tempdir().unwrap();

        let set = clipimg_bin()
            .env("XDG_CONFIG_HOME", home.path())
            .args(["config", "set", "retention", "5m"])
            .output()
            .expect("Failed to execute command");
        assert!(set.status.success());
        assert!(home.path().join("clipimg").join("config.toml").exists());

        let get = clipimg_bin()
            .env("XDG_CONFIG_HOME", home.path())
            .args(["config", "get", "retention"])
            .output()
            .expect("Failed to execute command");
        assert!(get.status.success());
        assert_eq!(String::from_utf8_lossy(&get.stdout).trim(), "5m");
    }

    #[test]
    fn config_get_unset_key() {
        let home = tempfile::tempdir().unwrap();
        let output = clipimg_bin()
            .env("XDG_CONFIG_HOME", home.path())
            .args(["config", "get", "output_dir"])
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("(not set)"));
    }
}
