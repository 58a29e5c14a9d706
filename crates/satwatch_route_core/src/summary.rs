use serde::Serialize;

use crate::model::RouteResult;

pub const CLEAR_MSG: &str = "Route appears clear. No major hazards detected along your path.";
pub const PROGRESS_MSG: &str = "Analyzing route, fetching satellite imagery and hazard data...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Safety {
    Clear,
    Caution { hazards: usize },
}

impl Safety {
    pub fn message(&self) -> String {
        match self {
            Safety::Clear => CLEAR_MSG.to_string(),
            Safety::Caution { hazards } => format!(
                "Caution: {hazards} potential hazard{} detected near your route.",
                if *hazards == 1 { "" } else { "s" }
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardItem {
    pub location_name: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub safety: Safety,
    /// Empty when the route is clear; the list is not rendered then.
    pub hazards: Vec<HazardItem>,
}

impl RouteSummary {
    pub fn from_result(result: &RouteResult) -> Self {
        let safety = if result.is_clear() {
            Safety::Clear
        } else {
            Safety::Caution {
                hazards: result.hazards.len(),
            }
        };
        Self {
            from: result.start_name.clone(),
            to: result.end_name.clone(),
            distance_km: result.distance_km(),
            safety,
            hazards: result
                .hazards
                .iter()
                .map(|h| HazardItem {
                    location_name: h.location_name.clone(),
                    details: h.details.clone(),
                })
                .collect(),
        }
    }

    pub fn has_hazard_list(&self) -> bool {
        !self.hazards.is_empty()
    }

    /// Plain text rendering, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            format!("From: {}", self.from),
            format!("To: {}", self.to),
        ];
        if self.distance_km > 0.0 {
            out.push(format!("Distance: ~{:.0} km", self.distance_km));
        }
        out.push(self.safety.message());
        if self.has_hazard_list() {
            out.push("Hazards:".to_string());
            for h in &self.hazards {
                out.push(format!("- {}: {}", h.location_name, h.details));
            }
        }
        out
    }
}

/// What the results panel currently shows. Replaced wholesale on each render.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsPanel {
    #[default]
    Empty,
    Progress(String),
    Error(String),
    Summary(RouteSummary),
}

impl ResultsPanel {
    pub fn text(&self) -> String {
        match self {
            ResultsPanel::Empty => String::new(),
            ResultsPanel::Progress(msg) | ResultsPanel::Error(msg) => msg.clone(),
            ResultsPanel::Summary(s) => s.lines().join("\n"),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResultsPanel::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&RouteSummary> {
        match self {
            ResultsPanel::Summary(s) => Some(s),
            _ => None,
        }
    }
}
