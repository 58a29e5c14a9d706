//! The route analysis controller.
//!
//! Owns the map view, the input fields, the two buttons and the results
//! panel. An analysis runs in three steps so that a GUI can keep the
//! network call off its UI thread:
//!
//! 1. [`RouteAnalysisController::begin_analysis`] validates, enters the
//!    analyzing state, clears the previous layers and builds the URL;
//! 2. [`PendingAnalysis::run`] performs the request (any thread);
//! 3. [`RouteAnalysisController::finish_analysis`] renders the outcome and
//!    always returns the controls to idle.
//!
//! [`RouteAnalysisController::analyze_route`] chains the three inline.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{Transport, fetch_route};
use crate::config::Config;
use crate::error::{AnalysisError, GeolocationError};
use crate::geolocation::{Geolocator, locate};
use crate::map::{Bounds, MapView};
use crate::model::{Coordinate, RouteQuery, RouteResult, StartLocation};
use crate::request::build_route_url;
use crate::summary::{PROGRESS_MSG, ResultsPanel, RouteSummary};

pub const ANALYZE_LABEL: &str = "Analyze Route";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const LOCATE_LABEL: &str = "Use My Location";
pub const LOCATING_LABEL: &str = "Locating...";

/// A button as the UI should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    pub enabled: bool,
    idle_label: &'static str,
}

impl Control {
    fn new(idle_label: &'static str) -> Self {
        Self {
            label: idle_label.to_string(),
            enabled: true,
            idle_label,
        }
    }

    fn busy(&mut self, label: &str) {
        self.enabled = false;
        self.label = label.to_string();
    }

    fn restore(&mut self) {
        self.enabled = true;
        self.label = self.idle_label.to_string();
    }
}

/// A request that has been prepared but not sent yet.
pub struct PendingAnalysis {
    pub query: RouteQuery,
    pub url: String,
    transport: Arc<dyn Transport>,
}

impl PendingAnalysis {
    pub fn run(self) -> Result<RouteResult, AnalysisError> {
        fetch_route(self.transport.as_ref(), &self.url)
    }
}

pub struct RouteAnalysisController {
    config: Config,
    transport: Arc<dyn Transport>,

    pub map: MapView,

    pub start_input: String,
    pub destination_input: String,

    pub analyze_button: Control,
    pub locate_button: Control,
    pub panel: ResultsPanel,
    /// Visual "working" cue while a request is in flight.
    pub pulsing: bool,

    /// Position behind the start field text after a successful geolocation.
    located_start: Option<(String, Coordinate)>,
    in_flight: bool,
    last_result: Option<RouteResult>,
}

impl RouteAnalysisController {
    /// Builds the map view on the configured default region with its base layer.
    pub fn initialize(config: Config, transport: Arc<dyn Transport>) -> Self {
        let map = MapView::new(config.center(), config.default_zoom, &config.base_tile_url);
        info!(
            backend = %config.backend_url,
            lat = map.center.lat,
            lon = map.center.lon,
            zoom = map.zoom,
            "route analysis controller initialized"
        );
        Self {
            config,
            transport,
            map,
            start_input: String::new(),
            destination_input: String::new(),
            analyze_button: Control::new(ANALYZE_LABEL),
            locate_button: Control::new(LOCATE_LABEL),
            panel: ResultsPanel::Empty,
            pulsing: false,
            located_start: None,
            in_flight: false,
            last_result: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight
    }

    pub fn last_result(&self) -> Option<&RouteResult> {
        self.last_result.as_ref()
    }

    /// Start as currently typed: the geolocated position while the field
    /// still shows its label, otherwise the text.
    pub fn current_start(&self) -> StartLocation {
        match &self.located_start {
            Some((label, coord)) if *label == self.start_input => StartLocation::Coordinates(*coord),
            _ => StartLocation::Text(self.start_input.trim().to_string()),
        }
    }

    pub fn begin_analysis(
        &mut self,
        start: StartLocation,
        destination: &str,
    ) -> Result<PendingAnalysis, AnalysisError> {
        if self.in_flight {
            warn!("analysis requested while another one is in flight, ignoring");
            return Err(AnalysisError::Busy);
        }

        let destination = destination.trim();
        if destination.is_empty() {
            let err = AnalysisError::MissingDestination;
            self.panel = ResultsPanel::Error(err.to_string());
            return Err(err);
        }

        self.in_flight = true;
        self.analyze_button.busy(ANALYZING_LABEL);
        self.panel = ResultsPanel::Progress(PROGRESS_MSG.to_string());
        self.pulsing = true;

        self.map.clear_analysis_layers();
        self.last_result = None;

        let query = RouteQuery {
            start,
            destination: destination.to_string(),
        };
        let url = build_route_url(&self.config.backend_url, &query);

        Ok(PendingAnalysis {
            query,
            url,
            transport: Arc::clone(&self.transport),
        })
    }

    pub fn finish_analysis(&mut self, outcome: Result<RouteResult, AnalysisError>) {
        match outcome {
            Ok(result) => {
                info!(
                    from = %result.start_name,
                    to = %result.end_name,
                    hazards = result.hazards.len(),
                    "route analysis complete"
                );
                self.render(&result);
                self.last_result = Some(result);
            }
            Err(e) => {
                self.panel = ResultsPanel::Error(e.to_string());
            }
        }

        self.analyze_button.restore();
        self.pulsing = false;
        self.in_flight = false;
    }

    fn render(&mut self, result: &RouteResult) {
        if !result.route.is_empty() {
            self.map.set_route(result.route.clone());
        }
        self.map
            .set_satellite(&result.satellite_url, self.config.satellite_opacity);
        for h in &result.hazards {
            self.map
                .add_hazard_marker(h.coords, &h.location_name, &h.details);
        }
        if let Some(bounds) = Bounds::from_points(&result.route) {
            self.map.fit_bounds(bounds, self.config.fit_padding);
        }

        self.panel = ResultsPanel::Summary(RouteSummary::from_result(result));
    }

    /// Full analysis, inline. The returned error is also shown in the panel
    /// (except `Busy`, which leaves the running analysis untouched).
    pub fn analyze_route(
        &mut self,
        start: StartLocation,
        destination: &str,
    ) -> Result<(), AnalysisError> {
        let pending = self.begin_analysis(start, destination)?;
        let outcome = pending.run();
        let ret = outcome.as_ref().map(|_| ()).map_err(|e| e.clone());
        self.finish_analysis(outcome);
        ret
    }

    /// Analysis from the current input fields.
    pub fn analyze_inputs(&mut self) -> Result<(), AnalysisError> {
        let start = self.current_start();
        let destination = self.destination_input.clone();
        self.analyze_route(start, &destination)
    }

    pub fn begin_locate(&mut self) {
        self.locate_button.busy(LOCATING_LABEL);
    }

    /// Applies a geolocation outcome. Returns the start to analyze when a
    /// destination is already filled in.
    pub fn finish_locate(
        &mut self,
        outcome: Result<Coordinate, GeolocationError>,
    ) -> Option<StartLocation> {
        self.locate_button.restore();

        match outcome {
            Ok(coord) => {
                let label = format!("Current location ({})", coord.approx_label());
                self.start_input = label.clone();
                self.located_start = Some((label, coord));
                info!(lat = coord.lat, lon = coord.lon, "device location resolved");

                if self.destination_input.trim().is_empty() {
                    None
                } else {
                    Some(StartLocation::Coordinates(coord))
                }
            }
            Err(e) => {
                warn!(error = %e, "device location unavailable");
                self.panel = ResultsPanel::Error(AnalysisError::from(e).to_string());
                None
            }
        }
    }

    /// Resolves the device position and, when a destination is present,
    /// analyzes from there.
    pub fn use_device_location(
        &mut self,
        geolocator: Option<&dyn Geolocator>,
    ) -> Result<(), AnalysisError> {
        self.begin_locate();
        let outcome = locate(geolocator);
        let failure = outcome.as_ref().err().cloned();

        match self.finish_locate(outcome) {
            Some(start) => {
                let destination = self.destination_input.clone();
                self.analyze_route(start, &destination)
            }
            None => match failure {
                Some(e) => Err(e.into()),
                None => Ok(()),
            },
        }
    }
}
