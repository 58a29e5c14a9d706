use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::model::{RouteQuery, StartLocation};

pub const ROUTE_PATH: &str = "/api/route";

/// Characters left untouched by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Query string for a route request, without the leading `?`.
pub fn route_query_string(start: &StartLocation, destination: &str) -> String {
    let end = encode_component(destination);
    match start {
        StartLocation::Coordinates(c) => {
            format!("start_lat={}&start_lon={}&end={end}", c.lat, c.lon)
        }
        StartLocation::Text(name) => {
            format!("start={}&end={end}", encode_component(name))
        }
    }
}

/// Full request URL against `backend_url` (scheme + host, optional path prefix).
pub fn build_route_url(backend_url: &str, query: &RouteQuery) -> String {
    let base = backend_url.trim_end_matches('/');
    let url = format!(
        "{base}{ROUTE_PATH}?{}",
        route_query_string(&query.start, &query.destination)
    );
    debug!(%url, "built route request");
    url
}
