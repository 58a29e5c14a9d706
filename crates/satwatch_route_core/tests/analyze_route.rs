mod common;

use common::{BACKEND, DELHI_MUMBAI, FakeTransport, SHIMLA_KUFRI_HAZARDS, controller};
use satwatch_route_core::controller::{ANALYZE_LABEL, ANALYZING_LABEL};
use satwatch_route_core::error::{
    AnalysisError, BACKEND_UNREACHABLE_MSG, MISSING_DESTINATION_MSG, TransportError,
    UNKNOWN_SERVER_ERROR_MSG,
};
use satwatch_route_core::map::project;
use satwatch_route_core::model::{Coordinate, StartLocation};
use satwatch_route_core::summary::{CLEAR_MSG, PROGRESS_MSG, ResultsPanel, Safety};

#[test]
fn empty_destination_sends_nothing() {
    let t = FakeTransport::new();
    let mut ctl = controller(&t);

    for dest in ["", "   ", "\t"] {
        let r = ctl.analyze_route(StartLocation::text("Delhi"), dest);
        assert_eq!(r, Err(AnalysisError::MissingDestination));
        assert_eq!(ctl.panel.error(), Some(MISSING_DESTINATION_MSG));
    }

    assert!(t.requests().is_empty());
    assert!(ctl.analyze_button.enabled);
    assert_eq!(ctl.analyze_button.label, ANALYZE_LABEL);
}

#[test]
fn text_start_is_encoded_as_start_and_end() {
    let t = FakeTransport::new();
    t.push_ok(200, DELHI_MUMBAI);
    let mut ctl = controller(&t);

    ctl.analyze_route(StartLocation::text("New Delhi"), "Mumbai Central")
        .unwrap();

    let reqs = t.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0],
        format!("{BACKEND}/api/route?start=New%20Delhi&end=Mumbai%20Central")
    );
}

#[test]
fn coordinate_start_is_encoded_as_lat_lon() {
    let t = FakeTransport::new();
    t.push_ok(200, DELHI_MUMBAI);
    let mut ctl = controller(&t);

    ctl.analyze_route(Coordinate::new(12.9716, 77.5946).into(), "Chennai")
        .unwrap();

    assert!(t.requests()[0].contains("start_lat=12.9716&start_lon=77.5946&end=Chennai"));
}

#[test]
fn delhi_to_mumbai_renders_clear_summary_and_polyline() {
    let t = FakeTransport::new();
    t.push_ok(200, DELHI_MUMBAI);
    let mut ctl = controller(&t);

    ctl.analyze_route(StartLocation::text("Delhi"), "Mumbai").unwrap();

    let summary = ctl.panel.summary().expect("summary rendered");
    assert_eq!(summary.safety, Safety::Clear);
    assert!(!summary.has_hazard_list());

    let text = ctl.panel.text();
    assert!(text.contains("From: Delhi"));
    assert!(text.contains("To: Mumbai"));
    assert!(text.contains(CLEAR_MSG));
    assert!(!text.contains("Hazards:"));

    let route = ctl.map.route.as_ref().expect("polyline drawn");
    assert_eq!(
        route.points,
        vec![Coordinate::new(28.6, 77.2), Coordinate::new(19.0, 72.8)]
    );
    let sat = ctl.map.satellite.as_ref().expect("satellite overlay");
    assert_eq!(sat.url_template, "https://tiles/x");
    assert_eq!(sat.opacity, 0.5);
    assert!(ctl.map.hazards.is_empty());

    // Viewport moved to the route, both ends equally far from the center.
    assert!((ctl.map.center.lon - 75.0).abs() < 1e-9);
    assert!(ctl.map.center.lat > 19.0 && ctl.map.center.lat < 28.6);
    let (_, cy) = project(ctl.map.center, ctl.map.zoom);
    let (_, ny) = project(Coordinate::new(28.6, 77.2), ctl.map.zoom);
    let (_, sy) = project(Coordinate::new(19.0, 72.8), ctl.map.zoom);
    assert!(((cy - ny) - (sy - cy)).abs() < 1e-6);
    assert!(sy - ny <= ctl.map.viewport.1 - 2.0 * ctl.config().fit_padding);
}

#[test]
fn hazards_get_markers_open_popups_and_list_entries() {
    let t = FakeTransport::new();
    t.push_ok(200, SHIMLA_KUFRI_HAZARDS);
    let mut ctl = controller(&t);

    ctl.analyze_route(StartLocation::text("Shimla"), "Kufri").unwrap();

    assert_eq!(ctl.map.hazards.len(), 2);
    assert!(ctl.map.hazards.iter().all(|m| m.popup.open));
    assert_eq!(ctl.map.hazards[0].popup.title, "Kufri, Himachal Pradesh");

    let summary = ctl.panel.summary().unwrap();
    assert_eq!(summary.safety, Safety::Caution { hazards: 2 });
    assert_eq!(summary.hazards.len(), 2);
    assert_eq!(summary.hazards[1].location_name, "Near your route");
    assert_eq!(summary.hazards[1].details, "Weather Alert: light snow");

    let text = ctl.panel.text();
    assert!(text.contains("Hazards:"));
    assert!(text.contains("- Near your route: Weather Alert: light snow"));
}

#[test]
fn server_error_message_is_shown_verbatim() {
    let t = FakeTransport::new();
    t.push_ok(404, r#"{"error":"Location not found"}"#);
    let mut ctl = controller(&t);

    let r = ctl.analyze_route(StartLocation::text("Atlantis"), "Mumbai");

    assert_eq!(r, Err(AnalysisError::Server("Location not found".into())));
    assert_eq!(ctl.panel, ResultsPanel::Error("Location not found".into()));
    assert!(ctl.map.route.is_none());
}

#[test]
fn server_error_without_message_uses_fallback() {
    let t = FakeTransport::new();
    t.push_ok(500, r#"{"detail":"boom"}"#);
    let mut ctl = controller(&t);

    let _ = ctl.analyze_route(StartLocation::text("Delhi"), "Mumbai");
    assert_eq!(ctl.panel.error(), Some(UNKNOWN_SERVER_ERROR_MSG));
}

#[test]
fn connection_failure_suggests_backend_is_down() {
    let t = FakeTransport::new();
    t.push_err(TransportError::Connect(
        "tcp connect error: Connection refused (os error 111)".into(),
    ));
    let mut ctl = controller(&t);

    let r = ctl.analyze_route(StartLocation::text("Delhi"), "Mumbai");

    assert_eq!(r, Err(AnalysisError::BackendUnreachable));
    assert_eq!(ctl.panel.error(), Some(BACKEND_UNREACHABLE_MSG));
    assert!(!ctl.panel.text().contains("os error"));
}

#[test]
fn other_network_errors_pass_through() {
    let t = FakeTransport::new();
    t.push_err(TransportError::Other("error decoding response body".into()));
    let mut ctl = controller(&t);

    let _ = ctl.analyze_route(StartLocation::text("Delhi"), "Mumbai");
    assert_eq!(ctl.panel.error(), Some("error decoding response body"));
}

#[test]
fn controls_return_to_idle_after_every_outcome() {
    let t = FakeTransport::new();
    t.push_ok(200, DELHI_MUMBAI);
    t.push_ok(404, r#"{"error":"Could not find destination"}"#);
    t.push_err(TransportError::Connect("refused".into()));
    let mut ctl = controller(&t);

    for _ in 0..3 {
        let _ = ctl.analyze_route(StartLocation::text("Delhi"), "Mumbai");
        assert!(ctl.analyze_button.enabled);
        assert_eq!(ctl.analyze_button.label, ANALYZE_LABEL);
        assert!(!ctl.pulsing);
        assert!(!ctl.is_analyzing());
    }
    assert_eq!(t.requests().len(), 3);
}

#[test]
fn analyzing_state_is_entered_and_layers_cleared_before_request() {
    let t = FakeTransport::new();
    t.push_ok(200, SHIMLA_KUFRI_HAZARDS);
    let mut ctl = controller(&t);
    ctl.analyze_route(StartLocation::text("Shimla"), "Kufri").unwrap();
    assert_eq!(ctl.map.analysis_layer_count(), 4);

    let pending = ctl
        .begin_analysis(StartLocation::text("Shimla"), "Kufri")
        .unwrap();

    assert_eq!(ctl.map.analysis_layer_count(), 0);
    assert!(!ctl.analyze_button.enabled);
    assert_eq!(ctl.analyze_button.label, ANALYZING_LABEL);
    assert_eq!(ctl.panel, ResultsPanel::Progress(PROGRESS_MSG.into()));
    assert!(ctl.pulsing);
    assert_eq!(t.requests().len(), 1);

    let outcome = pending.run();
    ctl.finish_analysis(outcome);
    assert_eq!(t.requests().len(), 2);
}

#[test]
fn repeated_analysis_replaces_layers() {
    let t = FakeTransport::new();
    t.push_ok(200, SHIMLA_KUFRI_HAZARDS);
    t.push_ok(200, SHIMLA_KUFRI_HAZARDS);
    let mut ctl = controller(&t);

    ctl.analyze_route(StartLocation::text("Shimla"), "Kufri").unwrap();
    let first_route = ctl.map.route.as_ref().unwrap().id;
    let first_markers: Vec<u64> = ctl.map.hazards.iter().map(|m| m.id).collect();

    ctl.analyze_route(StartLocation::text("Shimla"), "Kufri").unwrap();

    assert_eq!(ctl.map.hazards.len(), 2);
    assert_eq!(ctl.map.analysis_layer_count(), 4);
    assert_ne!(ctl.map.route.as_ref().unwrap().id, first_route);
    assert!(ctl.map.hazards.iter().all(|m| !first_markers.contains(&m.id)));
}

#[test]
fn overlapping_begin_is_rejected_without_touching_panel() {
    let t = FakeTransport::new();
    let mut ctl = controller(&t);

    let _pending = ctl
        .begin_analysis(StartLocation::text("Delhi"), "Mumbai")
        .unwrap();
    let second = ctl.begin_analysis(StartLocation::text("Delhi"), "Pune");

    assert!(matches!(second, Err(AnalysisError::Busy)));
    assert_eq!(ctl.panel, ResultsPanel::Progress(PROGRESS_MSG.into()));
    assert!(t.requests().is_empty());
}

#[test]
fn current_start_prefers_typed_text() {
    let t = FakeTransport::new();
    t.push_ok(200, DELHI_MUMBAI);
    let mut ctl = controller(&t);
    ctl.start_input = "  Delhi ".into();
    ctl.destination_input = "Mumbai".into();

    ctl.analyze_inputs().unwrap();

    assert!(t.requests()[0].ends_with("?start=Delhi&end=Mumbai"));
    assert_eq!(ctl.last_result().unwrap().end_name, "Mumbai");
}

#[test]
fn failed_analysis_drops_the_previous_result() {
    let t = FakeTransport::new();
    t.push_ok(200, DELHI_MUMBAI);
    t.push_ok(404, r#"{"error":"Could not find destination"}"#);
    let mut ctl = controller(&t);

    ctl.analyze_route(StartLocation::text("Delhi"), "Mumbai").unwrap();
    assert!(ctl.last_result().is_some());

    let _ = ctl.analyze_route(StartLocation::text("Delhi"), "Nowhere");
    assert!(ctl.last_result().is_none());
    assert_eq!(ctl.panel.error(), Some("Could not find destination"));
}
