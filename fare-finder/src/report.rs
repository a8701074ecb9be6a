//! Rendering of search results.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::Fare;
use crate::planner::PairFailure;

/// Printed instead of a report when no departure airport was given.
pub const NO_DEPARTURES: &str = "No departure airports specified.";

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per fare plus a summary line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Ranked fares and the pairs that failed, ready to print.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub fares: &'a [Fare],
    pub failures: &'a [PairFailure],
}

#[derive(Serialize)]
struct ReportDto<'a> {
    fares: &'a [Fare],
    failures: Vec<FailureDto>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

#[derive(Serialize)]
struct FailureDto {
    route: String,
    status: Option<u16>,
    error: String,
}

impl<'a> Report<'a> {
    pub fn new(fares: &'a [Fare], failures: &'a [PairFailure]) -> Self {
        Self { fares, failures }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json().map(|json| json + "\n"),
        }
    }

    /// Output for a search that never ran because the departure list was
    /// empty. JSON output is still a single document.
    pub fn render_no_departures(format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(format!("{NO_DEPARTURES}\n")),
            OutputFormat::Json => {
                let dto = ReportDto {
                    fares: &[],
                    failures: Vec::new(),
                    count: 0,
                    message: Some(NO_DEPARTURES),
                };
                serde_json::to_string_pretty(&dto).map(|json| json + "\n")
            }
        }
    }

    /// Fares in order, then failed pairs, then the summary line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for fare in self.fares {
            let _ = writeln!(out, "{fare}");
        }
        for failure in self.failures {
            let _ = writeln!(out, "Failed: {failure}");
        }
        let _ = writeln!(out, "Search completed. Found {} results.", self.fares.len());

        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let dto = ReportDto {
            fares: self.fares,
            failures: self
                .failures
                .iter()
                .map(|f| FailureDto {
                    route: f.query.route_label(),
                    status: f.error.status(),
                    error: f.error.to_string(),
                })
                .collect(),
            count: self.fares.len(),
            message: None,
        };

        serde_json::to_string_pretty(&dto)
    }
}
