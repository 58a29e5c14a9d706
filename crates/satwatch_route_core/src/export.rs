use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::model::{RouteResult, StartLocation};
use crate::summary::RouteSummary;

#[derive(Debug, Serialize)]
pub struct AnalysisExport<'a> {
    pub generated_at: String,
    pub backend: &'a str,
    pub query: Option<ExportQuery>,
    pub summary: RouteSummary,
    pub result: &'a RouteResult,
}

#[derive(Debug, Serialize)]
pub struct ExportQuery {
    pub start: ExportStart,
    pub destination: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExportStart {
    Text { name: String },
    Coordinates { lat: f64, lon: f64 },
}

impl From<&StartLocation> for ExportStart {
    fn from(s: &StartLocation) -> Self {
        match s {
            StartLocation::Text(name) => ExportStart::Text { name: name.clone() },
            StartLocation::Coordinates(c) => ExportStart::Coordinates {
                lat: c.lat,
                lon: c.lon,
            },
        }
    }
}

impl<'a> AnalysisExport<'a> {
    pub fn new(backend: &'a str, query: Option<ExportQuery>, result: &'a RouteResult) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            backend,
            query,
            summary: RouteSummary::from_result(result),
            result,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis export")
    }
}

pub fn default_export_filename() -> String {
    let ts = Local::now().format("%Y%m%d-%H%M%S");
    format!("route-analysis-{}.json", ts)
}
