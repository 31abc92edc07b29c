//! The command line interface for the simulation.
use crate::dataset::SimulationDataset;
use crate::input::load_dataset;
use crate::log;
use crate::output::{ReportFormat, SimulationReport};
use crate::parameters::SimulationParameters;
use crate::settings::Settings;
use crate::units::Power;
use ::log::info;
use anyhow::{Context, Result, ensure};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the simulation.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Debug, Default)]
pub struct RunOpts {
    /// Format of the simulation report
    #[arg(short, long, value_enum, default_value_t)]
    pub format: ReportFormat,
    /// Override the power of the candidate site, in kW
    #[arg(long)]
    pub candidate_power: Option<f64>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Estimate the demand captured by the candidate site of a simulation directory.
    Run {
        /// Path to the simulation directory.
        sim_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Manage bundled example simulations.
    Example {
        /// The available subcommands for managing examples.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Validate a simulation directory without running it.
    Validate {
        /// Path to the simulation directory.
        sim_dir: PathBuf,
    },
    /// Manage program settings.
    Settings {
        /// The subcommands for managing settings.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { sim_dir, opts } => handle_run_command(&sim_dir, &opts, None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Validate { sim_dir } => handle_validate_command(&sim_dir, None),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start chargesim
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ chargesim --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided, and initialise the logger
fn init_logging(settings: Option<Settings>) -> Result<()> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(&settings.log_level).context("Failed to initialise logging.")
}

/// Load the dataset and parameters of a simulation directory
fn load_simulation(sim_path: &Path) -> Result<(SimulationDataset, SimulationParameters)> {
    let dataset = load_dataset(sim_path)?;
    let parameters = SimulationParameters::from_path(sim_path)?;

    Ok((dataset, parameters))
}

/// Replace the power of the candidate site
fn override_candidate_power(dataset: &mut SimulationDataset, power: f64) -> Result<()> {
    ensure!(
        power.is_finite() && power > 0.0,
        "Candidate power must be a finite number greater than zero"
    );
    let candidate = dataset
        .candidate
        .as_mut()
        .context("No candidate site to override the power of")?;
    candidate.max_power = Power(power);

    Ok(())
}

/// Handle the `run` command.
pub fn handle_run_command(
    sim_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    init_logging(settings)?;

    let (mut dataset, parameters) =
        load_simulation(sim_path).context("Failed to load simulation.")?;
    info!("Loaded simulation from {}", sim_path.display());

    // The power of the candidate site can be overridden by command-line argument
    if let Some(power) = opts.candidate_power {
        override_candidate_power(&mut dataset, power)?;
        info!("Candidate site power set to {power} kW");
    }

    dataset.simulate(&parameters);
    info!("Simulation complete!");

    SimulationReport::new(&dataset, &parameters).write(io::stdout().lock(), opts.format)
}

/// Handle the `validate` command.
pub fn handle_validate_command(sim_path: &Path, settings: Option<Settings>) -> Result<()> {
    init_logging(settings)?;

    load_simulation(sim_path).context("Failed to validate simulation.")?;
    info!("Simulation validation successful!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, scenario_dataset};
    use rstest::rstest;

    #[rstest]
    fn test_override_candidate_power(mut scenario_dataset: SimulationDataset) {
        override_candidate_power(&mut scenario_dataset, 150.0).unwrap();
        assert_eq!(
            scenario_dataset.candidate.unwrap().max_power,
            Power(150.0)
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-22.0)]
    #[case(f64::NAN)]
    fn test_override_candidate_power_invalid(
        mut scenario_dataset: SimulationDataset,
        #[case] power: f64,
    ) {
        assert_error!(
            override_candidate_power(&mut scenario_dataset, power),
            "Candidate power must be a finite number greater than zero"
        );
    }

    #[test]
    fn test_override_candidate_power_no_candidate() {
        let mut dataset = SimulationDataset::new();
        assert_error!(
            override_candidate_power(&mut dataset, 50.0),
            "No candidate site to override the power of"
        );
    }
}
