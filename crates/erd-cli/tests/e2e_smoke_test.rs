use std::{fs, path::PathBuf};

use tempfile::tempdir;

use erd::ErdError;
use erd_cli::{Args, FAILURE_MESSAGE, SUCCESS_MESSAGE, run_with_console};

fn args(output: Option<PathBuf>, config: Option<PathBuf>) -> Args {
    Args {
        output,
        config,
        log_level: "off".to_string(),
    }
}

fn run_captured(args: &Args) -> (Result<(), ErdError>, String) {
    let mut console = Vec::new();
    let result = run_with_console(args, &mut console);
    let console = String::from_utf8(console).expect("console output is UTF-8");
    (result, console)
}

#[test]
fn e2e_smoke_test_in_process_formats() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for extension in ["svg", "er"] {
        let output_path = temp_dir.path().join(format!("diagram.{extension}"));
        let (result, console) = run_captured(&args(Some(output_path.clone()), None));

        if let Err(err) = result {
            panic!("{extension} output failed: {err}");
        }
        assert_eq!(
            console,
            format!("{SUCCESS_MESSAGE} {}\n", output_path.display())
        );

        let written = fs::read_to_string(&output_path).expect("Failed to read diagram");
        assert!(!written.is_empty(), "{extension} output is empty");
    }
}

#[test]
fn e2e_smoke_test_missing_directory_reports_failure() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing").join("diagram.svg");

    let (result, console) = run_captured(&args(Some(output_path.clone()), None));

    assert!(result.is_err(), "writing into a missing directory succeeded");
    assert_eq!(console, format!("{FAILURE_MESSAGE}\n"));
    assert!(!output_path.exists());
}

#[test]
fn e2e_smoke_test_unsupported_extension_keeps_previous_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("diagram.bmp");
    fs::write(&output_path, "previous").expect("Failed to seed file");

    let (result, console) = run_captured(&args(Some(output_path.clone()), None));

    assert!(matches!(result, Err(ErdError::UnsupportedFormat { .. })));
    assert_eq!(console, format!("{FAILURE_MESSAGE}\n"));
    assert_eq!(fs::read_to_string(&output_path).unwrap(), "previous");
}

#[test]
fn e2e_smoke_test_default_png_output_is_all_or_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("diagram.png");
    let previous = b"previous".to_vec();
    fs::write(&output_path, &previous).expect("Failed to seed file");

    let (result, console) = run_captured(&args(Some(output_path.clone()), None));
    let written = fs::read(&output_path).expect("Failed to read output file");

    // Raster output depends on Graphviz being installed.
    match result {
        Ok(()) => {
            assert_eq!(
                console,
                format!("{SUCCESS_MESSAGE} {}\n", output_path.display())
            );
            assert!(written.starts_with(b"\x89PNG"), "not a PNG file");
        }
        Err(_) => {
            assert_eq!(console, format!("{FAILURE_MESSAGE}\n"));
            assert_eq!(written, previous, "failed render touched the file");
        }
    }
}

#[test]
fn e2e_smoke_test_config_file_selects_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("from-config.er");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[layout]\nengine = \"basic\"\n\n[output]\npath = {:?}\n",
            output_path.display().to_string()
        ),
    )
    .expect("Failed to write config");

    let (result, console) = run_captured(&args(None, Some(config_path)));

    assert!(result.is_ok(), "{console}");
    assert!(console.starts_with(SUCCESS_MESSAGE));
    let markup = fs::read_to_string(&output_path).expect("Failed to read diagram");
    assert!(markup.starts_with("[user]"));
}

#[test]
fn e2e_smoke_test_output_flag_overrides_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[output]\npath = \"ignored.er\"\n")
        .expect("Failed to write config");
    let output_path = temp_dir.path().join("flag.svg");

    let (result, _) = run_captured(&args(Some(output_path.clone()), Some(config_path)));

    assert!(result.is_ok());
    assert!(output_path.exists());
    assert!(!temp_dir.path().join("ignored.er").exists());
}

#[test]
fn e2e_smoke_test_bad_config_reports_failure() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[style]\nheader_color = \"nope\"\n")
        .expect("Failed to write config");
    let output_path = temp_dir.path().join("diagram.svg");

    let (result, console) = run_captured(&args(Some(output_path.clone()), Some(config_path)));

    assert!(matches!(result, Err(ErdError::Config(_))));
    assert_eq!(console, format!("{FAILURE_MESSAGE}\n"));
    assert!(!output_path.exists());
}
