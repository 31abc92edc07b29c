//! Integration tests for the `run` command.
use chargesim::cli::{RunOpts, handle_run_command};
use chargesim::log::is_logger_initialised;
use chargesim::output::ReportFormat;
use chargesim::settings::Settings;
use std::path::PathBuf;

/// Get the path to the bundled example simulation.
fn get_sim_dir() -> PathBuf {
    PathBuf::from("demos/simple")
}

/// An integration test for the `run` command.
///
/// We also check that the logger is initialised after it is run.
#[test]
fn test_handle_run_command() {
    unsafe { std::env::set_var("CHARGESIM_LOG_LEVEL", "off") };

    assert!(!is_logger_initialised());

    let opts = RunOpts {
        format: ReportFormat::Json,
        candidate_power: Some(150.0),
    };
    handle_run_command(&get_sim_dir(), &opts, Some(Settings::default())).unwrap();

    assert!(is_logger_initialised());

    // Second time will fail because the logging is already initialised
    assert_eq!(
        handle_run_command(&get_sim_dir(), &RunOpts::default(), Some(Settings::default()))
            .unwrap_err()
            .chain()
            .next()
            .unwrap()
            .to_string(),
        "Failed to initialise logging."
    );
}
