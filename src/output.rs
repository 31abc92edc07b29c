//! Reporting the outcome of a simulation.
//!
//! Nothing is written to disk: the report goes to any [`Write`] sink, normally stdout.
use crate::dataset::SimulationDataset;
use crate::parameters::SimulationParameters;
use crate::simulation::{SimulationResults, SimulationStats};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// The format in which to report simulation outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Machine-readable JSON document
    Json,
}

/// The candidate site as shown in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    /// Identifier of the candidate site
    pub id: String,
    /// Name of the candidate site
    pub name: String,
    /// Power of the candidate site in kW
    pub max_power: f64,
}

/// Everything there is to know about a completed simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport<'a> {
    /// The site whose demand was estimated, if any
    pub candidate: Option<CandidateSummary>,
    /// The parameters the simulation was run with
    pub parameters: &'a SimulationParameters,
    /// Intermediate figures
    pub stats: &'a SimulationStats,
    /// Demand estimates in kWh per year
    pub results: SimulationResults,
    /// Sum of all demand estimates
    pub total: f64,
}

impl<'a> SimulationReport<'a> {
    /// Build a report from a simulated dataset
    pub fn new(dataset: &'a SimulationDataset, parameters: &'a SimulationParameters) -> Self {
        let candidate = dataset.candidate.as_ref().map(|site| CandidateSummary {
            id: site.id.to_string(),
            name: site.name.clone(),
            max_power: site.max_power.value(),
        });

        Self {
            candidate,
            parameters,
            stats: &dataset.stats,
            results: dataset.results,
            total: dataset.results.total(),
        }
    }

    fn write_text<W: Write>(&self, mut out: W) -> Result<()> {
        if let Some(candidate) = &self.candidate {
            writeln!(
                out,
                "Candidate site: {} ({} kW)",
                candidate.name, candidate.max_power
            )?;
        }

        let local = &self.stats.local;
        writeln!(out, "Local demand")?;
        writeln!(
            out,
            "  {} cities, {} EVs in range, {} charging sites in range",
            local.nb_cities, local.in_range_ev_cars, local.in_range_sites
        )?;
        writeln!(out, "  street energy: {:.2} kWh", local.street_energy)?;
        writeln!(out, "  captured: {:.2} kWh/year", self.results.local)?;

        let workflux = &self.stats.workflux;
        writeln!(out, "Workflux demand")?;
        writeln!(
            out,
            "  {:.1} of {:.1} EV trips captured over {:.1} km",
            workflux.captured_traffic, workflux.total_ev_traffic, workflux.distance
        )?;
        writeln!(out, "  captured: {:.2} kWh/year", self.results.workflux)?;

        let tmja = &self.stats.tmja;
        writeln!(out, "TMJA demand")?;
        writeln!(
            out,
            "  {:.1} roaming EVs out of {:.1}, {:.1} captured over {:.1} km",
            tmja.roaming_ev_traffic, tmja.total_ev_traffic, tmja.captured_traffic, tmja.distance
        )?;
        writeln!(out, "  captured: {:.2} kWh/year", self.results.tmja)?;

        writeln!(out, "Total: {:.2} kWh/year", self.total)?;

        Ok(())
    }

    /// Write the report to `out` in the requested format
    pub fn write<W: Write>(&self, mut out: W, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(&mut out)?,
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut out, self)
                    .context("Failed to serialise report")?;
                writeln!(out)?;
            }
        }

        out.flush()?;

        Ok(())
    }
}
