//! Map view state owned by the controller.
//!
//! The view keeps one base tile layer for its whole life and, per analysis,
//! at most one route polyline, one satellite overlay and a set of hazard
//! markers. Painting lives in the GUI; this module only holds the layers and
//! the Web Mercator math needed to frame them.

use std::f64::consts::PI;

use tracing::debug;

use crate::model::Coordinate;

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Mercator projection breaks down past this latitude.
const MAX_LATITUDE: f64 = 85.051_128_78;

pub type LayerId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub id: LayerId,
    pub url_template: String,
    pub opacity: f32,
    pub attribution: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub id: LayerId,
    pub points: Vec<Coordinate>,
    pub color: [u8; 3],
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub body: String,
    pub open: bool,
}

/// Circle marker with a bound popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: LayerId,
    pub center: Coordinate,
    pub radius_px: f32,
    pub color: [u8; 3],
    pub popup: Popup,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    pub fn from_points(points: &[Coordinate]) -> Option<Bounds> {
        let first = points.first()?;
        let mut sw = *first;
        let mut ne = *first;
        for p in &points[1..] {
            sw.lat = sw.lat.min(p.lat);
            sw.lon = sw.lon.min(p.lon);
            ne.lat = ne.lat.max(p.lat);
            ne.lon = ne.lon.max(p.lon);
        }
        Some(Bounds {
            south_west: sw,
            north_east: ne,
        })
    }

    /// Midpoint in projected space, so the bounds sit symmetric on screen.
    pub fn center(&self) -> Coordinate {
        let (x0, y0) = project(self.south_west, 0.0);
        let (x1, y1) = project(self.north_east, 0.0);
        unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0, 0.0)
    }
}

/// Projects to world pixel coordinates at `zoom` (y grows southwards).
pub fn project(c: Coordinate, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let lat = c.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (c.lon + 180.0) / 360.0 * scale;
    let y = (1.0 - lat.tan().asinh() / PI) / 2.0 * scale;
    (x, y)
}

pub fn unproject(x: f64, y: f64, zoom: f64) -> Coordinate {
    let scale = TILE_SIZE * 2f64.powf(zoom);
    let lon = x / scale * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / scale)).sinh().atan().to_degrees();
    Coordinate::new(lat, lon)
}

/// Expands a `{z}/{x}/{y}` template (also `{s}` -> `a`).
pub fn tile_url(template: &str, z: u32, x: u32, y: u32) -> String {
    template
        .replace("{s}", "a")
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

#[derive(Debug, Clone)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
    /// Canvas size in pixels; the GUI keeps it current, fit math depends on it.
    pub viewport: (f64, f64),

    pub base: TileLayer,
    pub route: Option<Polyline>,
    pub satellite: Option<TileLayer>,
    pub hazards: Vec<Marker>,

    next_id: LayerId,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: f64, base_tile_url: &str) -> Self {
        let mut view = Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            viewport: (900.0, 600.0),
            base: TileLayer {
                id: 0,
                url_template: String::new(),
                opacity: 1.0,
                attribution: None,
            },
            route: None,
            satellite: None,
            hazards: Vec::new(),
            next_id: 1,
        };
        view.base = TileLayer {
            id: view.alloc_id(),
            url_template: base_tile_url.to_string(),
            opacity: 1.0,
            attribution: Some("© OpenStreetMap contributors".to_string()),
        };
        view
    }

    fn alloc_id(&mut self) -> LayerId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Removes route, overlay and hazard markers; returns how many layers went away.
    pub fn clear_analysis_layers(&mut self) -> usize {
        let mut removed = self.hazards.len();
        self.hazards.clear();
        if self.route.take().is_some() {
            removed += 1;
        }
        if self.satellite.take().is_some() {
            removed += 1;
        }
        if removed > 0 {
            debug!(removed, "cleared analysis layers");
        }
        removed
    }

    pub fn analysis_layer_count(&self) -> usize {
        self.hazards.len() + usize::from(self.route.is_some()) + usize::from(self.satellite.is_some())
    }

    pub fn set_route(&mut self, points: Vec<Coordinate>) -> LayerId {
        let id = self.alloc_id();
        self.route = Some(Polyline {
            id,
            points,
            color: [0x3b, 0x82, 0xf6],
            weight: 5.0,
        });
        id
    }

    pub fn set_satellite(&mut self, url_template: &str, opacity: f32) -> LayerId {
        let id = self.alloc_id();
        self.satellite = Some(TileLayer {
            id,
            url_template: url_template.to_string(),
            opacity: opacity.clamp(0.0, 1.0),
            attribution: Some("NASA GIBS".to_string()),
        });
        id
    }

    /// Adds a hazard circle with its popup already open.
    pub fn add_hazard_marker(&mut self, center: Coordinate, title: &str, body: &str) -> LayerId {
        let id = self.alloc_id();
        self.hazards.push(Marker {
            id,
            center,
            radius_px: 10.0,
            color: [0xef, 0x44, 0x44],
            popup: Popup {
                title: title.to_string(),
                body: body.to_string(),
                open: true,
            },
        });
        id
    }

    pub fn toggle_popup(&mut self, id: LayerId) {
        if let Some(m) = self.hazards.iter_mut().find(|m| m.id == id) {
            m.popup.open = !m.popup.open;
        }
    }

    /// Largest integer zoom at which `bounds` fits inside the viewport minus
    /// `padding` pixels on every side; recenters on the bounds.
    pub fn fit_bounds(&mut self, bounds: Bounds, padding: f64) {
        let (w, h) = self.viewport;
        let avail_w = (w - 2.0 * padding).max(1.0);
        let avail_h = (h - 2.0 * padding).max(1.0);

        let (x0, y0) = project(bounds.south_west, 0.0);
        let (x1, y1) = project(bounds.north_east, 0.0);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let zoom = if dx == 0.0 && dy == 0.0 {
            MAX_ZOOM
        } else {
            let scale = (avail_w / dx.max(f64::EPSILON)).min(avail_h / dy.max(f64::EPSILON));
            scale.log2().floor()
        };

        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.center = bounds.center();
        debug!(zoom = self.zoom, "fitted viewport to route bounds");
    }

    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = project(self.center, self.zoom);
        self.center = unproject(cx - dx, cy - dy, self.zoom);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> MapView {
        MapView::new(Coordinate::new(20.5937, 78.9629), 5.0, "https://tile/{z}/{x}/{y}.png")
    }

    #[test]
    fn projection_round_trips_near_equator() {
        let c = Coordinate::new(19.0, 72.8);
        let (x, y) = project(c, 7.0);
        let back = unproject(x, y, 7.0);
        assert!((back.lat - c.lat).abs() < 1e-9);
        assert!((back.lon - c.lon).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = Bounds::from_points(&[
            Coordinate::new(28.6, 77.2),
            Coordinate::new(19.0, 72.8),
            Coordinate::new(22.0, 80.0),
        ])
        .unwrap();
        assert_eq!(b.south_west, Coordinate::new(19.0, 72.8));
        assert_eq!(b.north_east, Coordinate::new(28.6, 80.0));
        assert!(Bounds::from_points(&[]).is_none());
    }

    fn screen_pos(v: &MapView, c: Coordinate) -> (f64, f64) {
        let (cx, cy) = project(v.center, v.zoom);
        let (x, y) = project(c, v.zoom);
        (v.viewport.0 / 2.0 + x - cx, v.viewport.1 / 2.0 + y - cy)
    }

    fn assert_inside_padding(v: &MapView, pts: &[Coordinate], padding: f64) {
        for p in pts {
            let (x, y) = screen_pos(v, *p);
            assert!(
                x >= padding - 1e-6 && x <= v.viewport.0 - padding + 1e-6,
                "{p:?} at x={x} (zoom {})",
                v.zoom
            );
            assert!(
                y >= padding - 1e-6 && y <= v.viewport.1 - padding + 1e-6,
                "{p:?} at y={y} (zoom {})",
                v.zoom
            );
        }
    }

    #[test]
    fn fit_bounds_centers_and_keeps_route_inside_viewport() {
        let mut v = view();
        let pts = [Coordinate::new(28.6, 77.2), Coordinate::new(19.0, 72.8)];
        v.fit_bounds(Bounds::from_points(&pts).unwrap(), 50.0);

        assert!((v.center.lon - 75.0).abs() < 1e-9);
        let (_, ya) = screen_pos(&v, pts[0]);
        let (_, yb) = screen_pos(&v, pts[1]);
        assert!((ya - (v.viewport.1 - yb)).abs() < 1e-6);
        assert_inside_padding(&v, &pts, 50.0);
    }

    #[test]
    fn fit_bounds_respects_padding_on_tall_routes() {
        for north in [30.0, 60.0, 80.0, 84.0] {
            let mut v = view();
            let pts = [Coordinate::new(0.0, 0.0), Coordinate::new(north, 1.0)];
            v.fit_bounds(Bounds::from_points(&pts).unwrap(), 50.0);
            assert_inside_padding(&v, &pts, 50.0);
        }
    }

    #[test]
    fn fit_bounds_respects_padding_on_wide_routes() {
        let mut v = view();
        v.viewport = (640.0, 900.0);
        let pts = [
            Coordinate::new(-33.86, 151.2),
            Coordinate::new(-31.95, 115.86),
            Coordinate::new(-12.46, 130.84),
        ];
        v.fit_bounds(Bounds::from_points(&pts).unwrap(), 50.0);
        assert_inside_padding(&v, &pts, 50.0);
    }

    #[test]
    fn single_point_fit_uses_max_zoom() {
        let mut v = view();
        let p = Coordinate::new(10.0, 10.0);
        v.fit_bounds(Bounds { south_west: p, north_east: p }, 50.0);
        assert_eq!(v.zoom, MAX_ZOOM);
    }

    #[test]
    fn clearing_removes_every_analysis_layer() {
        let mut v = view();
        v.set_route(vec![Coordinate::new(1.0, 1.0)]);
        v.set_satellite("https://sat/{z}/{y}/{x}.jpg", 0.5);
        v.add_hazard_marker(Coordinate::new(1.0, 1.0), "A", "a");
        v.add_hazard_marker(Coordinate::new(2.0, 2.0), "B", "b");

        assert_eq!(v.clear_analysis_layers(), 4);
        assert_eq!(v.analysis_layer_count(), 0);
        assert_eq!(v.base.url_template, "https://tile/{z}/{x}/{y}.png");
    }

    #[test]
    fn tile_url_expands_placeholders() {
        assert_eq!(
            tile_url("https://{s}.tile.org/{z}/{x}/{y}.png", 3, 5, 2),
            "https://a.tile.org/3/5/2.png"
        );
    }
}
