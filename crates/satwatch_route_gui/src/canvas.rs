// src/canvas.rs
//
// Paints a `MapView` with the egui painter: graticule in place of base
// tiles, a tint for the satellite overlay, the route polyline and hazard
// circles with their popups. Drag pans, wheel zooms, click toggles a popup.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use satwatch_route_core::map::{MapView, Marker, project, unproject};
use satwatch_route_core::model::Coordinate;
use satwatch_route_core::utils::formatting::truncate_ellipsis;

const POPUP_WIDTH: f32 = 220.0;

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

struct Projector {
    center: (f64, f64),
    zoom: f64,
    origin: Pos2,
}

impl Projector {
    fn new(map: &MapView, rect: Rect) -> Self {
        Self {
            center: project(map.center, map.zoom),
            zoom: map.zoom,
            origin: rect.center(),
        }
    }

    fn to_screen(&self, c: Coordinate) -> Pos2 {
        let (x, y) = project(c, self.zoom);
        Pos2::new(
            self.origin.x + (x - self.center.0) as f32,
            self.origin.y + (y - self.center.1) as f32,
        )
    }

    fn to_geo(&self, p: Pos2) -> Coordinate {
        unproject(
            self.center.0 + (p.x - self.origin.x) as f64,
            self.center.1 + (p.y - self.origin.y) as f64,
            self.zoom,
        )
    }
}

fn graticule_step(zoom: f64) -> f64 {
    if zoom < 4.0 {
        30.0
    } else if zoom < 7.0 {
        10.0
    } else if zoom < 10.0 {
        1.0
    } else {
        0.1
    }
}

/// Draws the map and applies pan/zoom/popup interaction. `pulse` in 0..=1
/// animates the route while an analysis is running.
pub fn show(ui: &mut egui::Ui, map: &mut MapView, pulse: Option<f32>) -> egui::Response {
    let size = ui.available_size().max(Vec2::new(200.0, 200.0));
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let rect = response.rect;
    map.viewport = (rect.width() as f64, rect.height() as f64);

    // --- interaction
    if response.dragged() {
        let d = response.drag_delta();
        map.pan_pixels(d.x as f64, d.y as f64);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            map.zoom_by((scroll / 120.0) as f64);
        }
    }

    let proj = Projector::new(map, rect);

    if response.clicked()
        && let Some(pos) = response.interact_pointer_pos()
        && let Some(id) = marker_at(&proj, &map.hazards, pos)
    {
        map.toggle_popup(id);
    }

    // --- base
    painter.rect_filled(rect, egui::CornerRadius::ZERO, Color32::from_rgb(222, 231, 236));
    draw_graticule(&painter, &proj, rect, map.zoom);

    if let Some(sat) = &map.satellite {
        let alpha = (sat.opacity * 90.0) as u8;
        painter.rect_filled(
            rect,
            egui::CornerRadius::ZERO,
            Color32::from_rgba_unmultiplied(24, 60, 40, alpha),
        );
    }

    // --- route
    if let Some(route) = &map.route {
        let points: Vec<Pos2> = route.points.iter().map(|c| proj.to_screen(*c)).collect();
        let mut color = rgb(route.color);
        if let Some(p) = pulse {
            color = color.gamma_multiply(0.4 + 0.6 * p);
        }
        if points.len() >= 2 {
            painter.add(egui::Shape::line(points, Stroke::new(route.weight, color)));
        } else if let Some(p) = points.first() {
            painter.circle_filled(*p, route.weight, color);
        }
    }

    // --- hazards
    for m in &map.hazards {
        let c = proj.to_screen(m.center);
        let color = rgb(m.color);
        painter.circle_filled(c, m.radius_px, color.gamma_multiply(0.5));
        painter.circle_stroke(c, m.radius_px, Stroke::new(2.0, color));
    }
    for m in map.hazards.iter().filter(|m| m.popup.open) {
        draw_popup(&painter, proj.to_screen(m.center), m);
    }

    // --- attribution
    let mut attribution = map.base.attribution.clone().unwrap_or_default();
    if let Some(sat) = &map.satellite
        && let Some(a) = &sat.attribution
    {
        attribution.push_str(" | ");
        attribution.push_str(a);
    }
    painter.text(
        rect.right_bottom() - Vec2::new(6.0, 4.0),
        Align2::RIGHT_BOTTOM,
        attribution,
        FontId::proportional(11.0),
        Color32::from_gray(70),
    );

    let hover = response
        .hover_pos()
        .map(|p| proj.to_geo(p))
        .map(|c| format!("{:.4}, {:.4}  z{:.0}", c.lat, c.lon, map.zoom));
    if let Some(text) = hover {
        painter.text(
            rect.left_bottom() + Vec2::new(6.0, -4.0),
            Align2::LEFT_BOTTOM,
            text,
            FontId::monospace(11.0),
            Color32::from_gray(60),
        );
    }

    response
}

fn marker_at(proj: &Projector, markers: &[Marker], pos: Pos2) -> Option<u64> {
    markers
        .iter()
        .rev()
        .find(|m| proj.to_screen(m.center).distance(pos) <= m.radius_px + 3.0)
        .map(|m| m.id)
}

fn draw_graticule(painter: &egui::Painter, proj: &Projector, rect: Rect, zoom: f64) {
    let step = graticule_step(zoom);
    let nw = proj.to_geo(rect.left_top());
    let se = proj.to_geo(rect.right_bottom());
    let stroke = Stroke::new(1.0, Color32::from_gray(200));

    let mut lon = (nw.lon / step).floor() * step;
    while lon <= se.lon {
        let x = proj.to_screen(Coordinate::new(0.0, lon)).x;
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        lon += step;
    }

    let mut lat = (se.lat / step).floor() * step;
    while lat <= nw.lat {
        let y = proj.to_screen(Coordinate::new(lat, 0.0)).y;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        lat += step;
    }
}

fn draw_popup(painter: &egui::Painter, anchor: Pos2, m: &Marker) {
    let title = painter.layout(
        truncate_ellipsis(&m.popup.title, 40),
        FontId::proportional(13.0),
        Color32::BLACK,
        POPUP_WIDTH,
    );
    let body = painter.layout(
        m.popup.body.clone(),
        FontId::proportional(12.0),
        Color32::from_gray(40),
        POPUP_WIDTH,
    );

    let pad = 6.0;
    let w = title.size().x.max(body.size().x) + 2.0 * pad;
    let h = title.size().y + body.size().y + 3.0 * pad;
    let min = Pos2::new(anchor.x - w / 2.0, anchor.y - m.radius_px - 8.0 - h);
    let frame = Rect::from_min_size(min, Vec2::new(w, h));

    painter.rect_filled(frame, egui::CornerRadius::same(4), Color32::WHITE);
    painter.rect_stroke(
        frame,
        egui::CornerRadius::same(4),
        Stroke::new(1.0, Color32::from_gray(160)),
        egui::StrokeKind::Outside,
    );
    painter.line_segment(
        [Pos2::new(anchor.x, frame.bottom()), Pos2::new(anchor.x, anchor.y - m.radius_px)],
        Stroke::new(1.0, Color32::from_gray(160)),
    );

    let title_pos = frame.min + Vec2::new(pad, pad);
    let body_pos = title_pos + Vec2::new(0.0, title.size().y + pad);
    painter.galley(title_pos, title, Color32::BLACK);
    painter.galley(body_pos, body, Color32::from_gray(40));
}
