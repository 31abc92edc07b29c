//! Estimates the electric-vehicle charging demand a candidate charging site would capture.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod allocation;
pub mod city;
pub mod cli;
pub mod dataset;
pub mod id;
pub mod input;
pub mod log;
pub mod output;
pub mod parameters;
pub mod settings;
pub mod simulation;
pub mod site;
pub mod traffic;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the config folder for chargesim, which holds the settings file
pub fn get_chargesim_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("chargesim");

    path
}
