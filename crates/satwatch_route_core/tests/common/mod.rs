#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use satwatch_route_core::backend::{HttpReply, Transport};
use satwatch_route_core::config::Config;
use satwatch_route_core::controller::RouteAnalysisController;
use satwatch_route_core::error::TransportError;

pub const BACKEND: &str = "http://backend.test";

/// Records every URL and answers with queued replies (404 when empty).
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(HttpReply::new(status, body)));
    }

    pub fn push_err(&self, err: TransportError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<HttpReply, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpReply::new(404, "{}")))
    }
}

pub fn controller(transport: &Arc<FakeTransport>) -> RouteAnalysisController {
    let cfg = Config {
        backend_url: BACKEND.to_string(),
        ..Config::default()
    };
    RouteAnalysisController::initialize(cfg, transport.clone())
}

pub const DELHI_MUMBAI: &str = r#"{
    "route": [[28.6, 77.2], [19.0, 72.8]],
    "satelliteUrl": "https://tiles/x",
    "hazards": [],
    "startName": "Delhi",
    "endName": "Mumbai"
}"#;

pub const SHIMLA_KUFRI_HAZARDS: &str = r#"{
    "route": [[31.1048, 77.1734], [31.1020, 77.2200], [31.1005, 77.2658]],
    "satelliteUrl": "https://gibs.earthdata.nasa.gov/wmts/epsg4326/best/MODIS_Terra_CorrectedReflectance_TrueColor/default/2026-10-16/250m/{z}/{y}/{x}.jpg",
    "hazards": [
        {
            "coords": [31.1005, 77.2658],
            "location_name": "Kufri, Himachal Pradesh",
            "details": "Heavy Snowfall Warning: Kufri and surrounding areas experience heavy snow."
        },
        {
            "coords": [31.1048, 77.1734],
            "location_name": "Near your route",
            "details": "Weather Alert: light snow"
        }
    ],
    "startName": "Shimla, Himachal Pradesh, India",
    "endName": "Kufri, Shimla, Himachal Pradesh, India"
}"#;
