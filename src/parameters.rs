//! Defines the `SimulationParameters` struct, which represents the contents of `parameters.toml`.
use crate::input::{deserialise_proportion, input_err_msg, read_toml};
use crate::units::{Energy, Minutes};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

const PARAMETERS_FILE_NAME: &str = "parameters.toml";

macro_rules! define_unit_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            <$type>::new($value)
        }
    };
}

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_unit_param_default!(default_charge_energy, Energy, 35.0);
define_param_default!(default_ratio_home_charge, f64, 0.8);
define_param_default!(default_ratio_ve_hybrid, f64, 0.63);
define_param_default!(default_conso_ve, f64, 18.0);
define_param_default!(default_conso_hybrid, f64, 9.0);
define_param_default!(default_ratio_ve, f64, 0.02);
define_param_default!(default_dist_per_year, f64, 9000.0);
define_unit_param_default!(default_time_from_home, Minutes, 5.0);
define_param_default!(default_ratio_home_street, f64, 0.001);

/// The tunable constants of the demand model.
///
/// This is an immutable snapshot: it is passed into the simulation rather than stored in it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Parameters shared by all kinds of demand
    #[serde(default)]
    pub general: GeneralParameters,
    /// Parameters for roaming demand from national road traffic
    #[serde(default)]
    pub tmja: TmjaParameters,
    /// Parameters for local (home) demand
    #[serde(default)]
    pub local: LocalParameters,
}

/// Parameters shared by all kinds of demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralParameters {
    /// Energy charged during a single charging session
    #[serde(default = "default_charge_energy")]
    pub charge_energy: Energy,
    /// Share of energy charged at home
    #[serde(default = "default_ratio_home_charge")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub ratio_home_charge: f64,
    /// Share of battery electric vehicles among plug-in vehicles (the rest being hybrids)
    #[serde(default = "default_ratio_ve_hybrid")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub ratio_ve_hybrid: f64,
    /// Consumption of a battery electric vehicle in kWh per 100 km
    #[serde(default = "default_conso_ve")]
    pub conso_ve: f64,
    /// Consumption of a plug-in hybrid vehicle in kWh per 100 km
    #[serde(default = "default_conso_hybrid")]
    pub conso_hybrid: f64,
}

impl Default for GeneralParameters {
    fn default() -> Self {
        Self {
            charge_energy: default_charge_energy(),
            ratio_home_charge: default_ratio_home_charge(),
            ratio_ve_hybrid: default_ratio_ve_hybrid(),
            conso_ve: default_conso_ve(),
            conso_hybrid: default_conso_hybrid(),
        }
    }
}

/// Parameters for roaming demand from national road traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmjaParameters {
    /// Share of national road traffic made of electric vehicles
    #[serde(default = "default_ratio_ve")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub ratio_ve: f64,
}

impl Default for TmjaParameters {
    fn default() -> Self {
        Self {
            ratio_ve: default_ratio_ve(),
        }
    }
}

/// Parameters for local (home) demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalParameters {
    /// Distance driven every year by an electric car, in km
    #[serde(default = "default_dist_per_year")]
    pub dist_per_year: f64,
    /// Maximum driving time between a city and the candidate site for the city to be in range
    #[serde(default = "default_time_from_home")]
    pub time_from_home: Minutes,
    /// Share of home-charged energy which is charged on the street rather than in a garage
    #[serde(default = "default_ratio_home_street")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub ratio_home_street: f64,
}

impl Default for LocalParameters {
    fn default() -> Self {
        Self {
            dist_per_year: default_dist_per_year(),
            time_from_home: default_time_from_home(),
            ratio_home_street: default_ratio_home_street(),
        }
    }
}

/// Check that a parameter is a finite, non-negative number
fn check_non_negative(name: &str, value: f64) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{name} must be a finite number greater than or equal to zero"
    );

    Ok(())
}

/// Check that the `charge_energy` parameter is valid
fn check_charge_energy(value: Energy) -> Result<()> {
    ensure!(
        value.is_finite() && value > Energy(0.0),
        "charge_energy must be a finite number greater than zero"
    );

    Ok(())
}

impl SimulationParameters {
    /// Read the parameters file from the specified simulation directory.
    ///
    /// If the file is not present, default values are used.
    ///
    /// # Arguments
    ///
    /// * `sim_dir` - Folder containing the simulation input files
    ///
    /// # Returns
    ///
    /// The parameters as a [`SimulationParameters`] struct or an error if the file is invalid
    pub fn from_path<P: AsRef<Path>>(sim_dir: P) -> Result<SimulationParameters> {
        let file_path = sim_dir.as_ref().join(PARAMETERS_FILE_NAME);
        if !file_path.is_file() {
            return Ok(SimulationParameters::default());
        }

        let parameters: SimulationParameters = read_toml(&file_path)?;
        parameters
            .validate()
            .with_context(|| input_err_msg(&file_path))?;

        Ok(parameters)
    }

    /// Validate parameters after reading in file.
    ///
    /// Proportions have already been checked while deserialising.
    pub fn validate(&self) -> Result<()> {
        check_charge_energy(self.general.charge_energy)?;
        check_non_negative("conso_ve", self.general.conso_ve)?;
        check_non_negative("conso_hybrid", self.general.conso_hybrid)?;
        check_non_negative("dist_per_year", self.local.dist_per_year)?;
        check_non_negative("time_from_home", self.local.time_from_home.value())?;

        Ok(())
    }

    /// The average consumption of a plug-in vehicle in kWh per 100 km.
    ///
    /// Blends battery electric and hybrid consumptions according to the fleet mix.
    pub fn average_consumption(&self) -> f64 {
        let general = &self.general;
        general.conso_ve * general.ratio_ve_hybrid
            + general.conso_hybrid * (1.0 - general.ratio_ve_hybrid)
    }
}
