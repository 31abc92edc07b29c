//! Common routines for handling input data.
//!
//! A simulation directory holds the records produced by the upstream data-fetch steps: GeoJSON
//! feature collections for cities, traffic flows and charging sites, a JSON file describing the
//! candidate site, plus optional parameter and site adjustment files.
use crate::dataset::SimulationDataset;
use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use std::fmt::Display;
use std::fs;
use std::path::Path;

pub mod adjustment;
use adjustment::read_site_adjustments;
pub mod city;
pub use city::CityProperties;
pub mod site;
pub use site::{SimulationSiteRaw, SiteProperties};
pub mod traffic;
pub use traffic::FlowProperties;

const CITIES_FILE_NAME: &str = "cities.geojson";
const WORKFLUXES_FILE_NAME: &str = "workfluxes.geojson";
const TMJA_FILE_NAME: &str = "tmja.geojson";
const CHARGING_SITES_FILE_NAME: &str = "charging_sites.geojson";
const SIMULATION_SITE_FILE_NAME: &str = "simulation_site.json";

/// A GeoJSON feature collection whose features carry properties of type `P`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeatureCollection<P> {
    /// The features of the collection
    pub features: Vec<Feature<P>>,
}

/// A GeoJSON feature. Only the properties are of interest; geometry is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Feature<P> {
    /// The properties bag of the feature
    pub properties: P,
}

impl<P> FeatureCollection<P> {
    /// Iterate over the properties of every feature
    pub fn into_properties(self) -> impl Iterator<Item = P> {
        self.features.into_iter().map(|feature| feature.properties)
    }
}

impl<P> FromIterator<P> for FeatureCollection<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            features: iter
                .into_iter()
                .map(|properties| Feature { properties })
                .collect(),
        }
    }
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Parse a JSON (or GeoJSON) file at the specified path.
pub fn read_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let json_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let json_data = serde_json::from_str(&json_str).with_context(|| input_err_msg(file_path))?;
    Ok(json_data)
}

/// Read a series of type `T`s from a CSV file.
///
/// Unlike the other input files, CSV files may be empty (apart from their header).
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(file_path).with_context(|| input_err_msg(file_path))?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| input_err_msg(file_path))
}

/// Read an f64, checking that it is between 0 and 1
pub fn deserialise_proportion<'de, D>(deserialiser: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Deserialize::deserialize(deserialiser)?;
    if !(0.0..=1.0).contains(&value) {
        Err(serde::de::Error::custom("Value is not between 0 and 1"))?;
    }

    Ok(value)
}

/// Check that a quantity read from an input record is finite and not negative
pub(crate) fn check_non_negative<T: Into<f64>>(
    value: T,
    what: &str,
    id: impl Display,
) -> Result<()> {
    let value = value.into();
    anyhow::ensure!(
        value.is_finite() && value >= 0.0,
        "Invalid {what} for {id}: must be a finite number greater than or equal to zero"
    );

    Ok(())
}

/// Load a simulation dataset from the files in `sim_dir`.
///
/// # Arguments
///
/// * `sim_dir` - Folder containing the simulation input files
///
/// # Returns
///
/// A fully populated [`SimulationDataset`], ready to be simulated, or an error.
pub fn load_dataset<P: AsRef<Path>>(sim_dir: P) -> Result<SimulationDataset> {
    let sim_dir = sim_dir.as_ref();
    let mut dataset = SimulationDataset::new();

    let path_of = |file_name: &str| sim_dir.join(file_name);

    let path = path_of(CITIES_FILE_NAME);
    dataset
        .load_cities(read_json(&path)?)
        .with_context(|| input_err_msg(&path))?;

    let path = path_of(WORKFLUXES_FILE_NAME);
    dataset
        .load_workfluxes(read_json(&path)?)
        .with_context(|| input_err_msg(&path))?;

    let path = path_of(TMJA_FILE_NAME);
    dataset
        .load_tmja(read_json(&path)?)
        .with_context(|| input_err_msg(&path))?;

    let path = path_of(CHARGING_SITES_FILE_NAME);
    dataset
        .load_sites(read_json(&path)?)
        .with_context(|| input_err_msg(&path))?;

    let path = path_of(SIMULATION_SITE_FILE_NAME);
    dataset
        .load_simulation_site(read_json(&path)?)
        .with_context(|| input_err_msg(&path))?;

    if let Some(adjustments) = read_site_adjustments(sim_dir)? {
        dataset.apply_site_adjustments(adjustments)?;
    }

    info!(
        "Loaded {} cities, {} workfluxes, {} TMJA flows and {} charging sites",
        dataset.cities.len(),
        dataset.workfluxes.len(),
        dataset.tmja.len(),
        dataset.sites.len()
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{assert_error, write_simulation_dir};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: String,
        value: u32,
    }

    #[test]
    fn test_read_json_feature_collection() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("records.geojson");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(
                file,
                r#"{{"type": "FeatureCollection", "features": [
  {{"type": "Feature", "properties": {{"id": "a", "value": 1}}, "geometry": {{"type": "Point", "coordinates": [1.0, 2.0]}}}},
  {{"type": "Feature", "properties": {{"id": "b", "value": 2, "extra": "ignored"}}, "geometry": null}}
]}}"#
            )
            .unwrap();
        }

        let collection: FeatureCollection<Record> = read_json(&file_path).unwrap();
        assert_eq!(
            collection.into_properties().collect::<Vec<_>>(),
            [
                Record {
                    id: "a".into(),
                    value: 1
                },
                Record {
                    id: "b".into(),
                    value: 2
                }
            ]
        );
    }

    #[test]
    fn test_read_json_missing_field() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("records.geojson");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, r#"{{"features": [{{"properties": {{"id": "a"}}}}]}}"#).unwrap();
        }

        assert_error!(
            read_json::<FeatureCollection<Record>>(&file_path),
            input_err_msg(&file_path)
        );
    }

    #[test]
    fn test_read_csv() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("records.csv");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id,value\nhello,1\nworld,2\n").unwrap();
        }

        let records: Vec<Record> = read_csv(&file_path).unwrap();
        assert_eq!(
            records,
            [
                Record {
                    id: "hello".into(),
                    value: 1
                },
                Record {
                    id: "world".into(),
                    value: 2
                }
            ]
        );

        // Header only
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id,value").unwrap();
        }
        assert!(read_csv::<Record>(&file_path).unwrap().is_empty());
    }

    #[test]
    fn test_read_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id = \"hello\"\nvalue = 1").unwrap();
        }

        assert_eq!(
            read_toml::<Record>(&file_path).unwrap(),
            Record {
                id: "hello".into(),
                value: 1
            }
        );

        // Missing file
        assert!(read_toml::<Record>(&dir.path().join("missing.toml")).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Proportion {
        #[serde(deserialize_with = "deserialise_proportion")]
        value: f64,
    }

    #[test]
    fn test_deserialise_proportion() {
        let parse = |value: &str| serde_json::from_str::<Proportion>(&format!(r#"{{"value": {value}}}"#));

        assert_eq!(parse("0").unwrap().value, 0.0);
        assert_eq!(parse("0.5").unwrap().value, 0.5);
        assert_eq!(parse("1").unwrap().value, 1.0);
        assert!(parse("-0.1").is_err());
        assert!(parse("1.1").is_err());
    }

    #[test]
    fn test_load_dataset() {
        let dir = tempdir().unwrap();
        write_simulation_dir(dir.path());

        let dataset = load_dataset(dir.path()).unwrap();
        assert_eq!(dataset.cities.len(), 2);
        assert_eq!(dataset.workfluxes.len(), 1);
        assert_eq!(dataset.tmja.len(), 1);
        assert_eq!(dataset.sites.len(), 2);
        assert!(dataset.candidate.is_some());
        assert_eq!(dataset.cities_duration.len(), 2);
        assert_eq!(dataset.sites_duration.len(), 2);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let dir = tempdir().unwrap();
        write_simulation_dir(dir.path());
        fs::remove_file(dir.path().join(TMJA_FILE_NAME)).unwrap();

        assert_error!(
            load_dataset(dir.path()),
            input_err_msg(dir.path().join(TMJA_FILE_NAME))
        );
    }
}
