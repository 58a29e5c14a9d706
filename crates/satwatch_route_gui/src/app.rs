// src/app.rs
//
// Window layout: inputs, buttons and the results panel on the left, the map
// canvas in the center, version/backend/status at the bottom.
// Requests and geolocation run on a worker thread; outcomes come back on a
// channel drained at the start of every frame.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui;

use satwatch_route_core::backend::Transport;
use satwatch_route_core::config::Config;
use satwatch_route_core::controller::RouteAnalysisController;
use satwatch_route_core::error::{AnalysisError, GeolocationError};
use satwatch_route_core::export::{AnalysisExport, default_export_filename};
use satwatch_route_core::geolocation::{Geolocator, locate};
use satwatch_route_core::model::{Coordinate, RouteResult, StartLocation};
use satwatch_route_core::summary::{ResultsPanel, Safety};

use crate::canvas;

enum WorkerMsg {
    Analysis(Result<RouteResult, AnalysisError>),
    Location(Result<Coordinate, GeolocationError>),
}

pub struct RouteAnalyzerApp {
    controller: RouteAnalysisController,
    geolocator: Option<Arc<dyn Geolocator>>,

    tx: Sender<WorkerMsg>,
    rx: Receiver<WorkerMsg>,

    // System/status message shown in the status area
    status: String,
    status_deadline: Option<Instant>,
    ready_status: &'static str,
}

impl RouteAnalyzerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let geolocator: Option<Arc<dyn Geolocator>> = config.geolocator().map(Arc::from);
        let controller = RouteAnalysisController::initialize(config, transport);
        let (tx, rx) = mpsc::channel();

        Self {
            controller,
            geolocator,
            tx,
            rx,
            status: "Ready.".to_string(),
            status_deadline: None,
            ready_status: "Ready.",
        }
    }

    fn app_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn set_status_ttl(&mut self, msg: impl Into<String>, ttl: Duration) {
        self.status = msg.into();
        self.status_deadline = Some(Instant::now() + ttl);
    }

    fn tick_status_deadline(&mut self) {
        if let Some(deadline) = self.status_deadline
            && Instant::now() >= deadline
        {
            self.status = self.ready_status.to_string();
            self.status_deadline = None;
        }
    }

    fn start_analysis(&mut self, ctx: &egui::Context, start: StartLocation) {
        let destination = self.controller.destination_input.clone();
        match self.controller.begin_analysis(start, &destination) {
            Ok(pending) => {
                self.status = format!("GET {}", pending.url);
                self.status_deadline = None;

                let tx = self.tx.clone();
                let ctx = ctx.clone();
                std::thread::spawn(move || {
                    let _ = tx.send(WorkerMsg::Analysis(pending.run()));
                    ctx.request_repaint();
                });
            }
            Err(AnalysisError::Busy) => {
                self.set_status_ttl("An analysis is already running.", Duration::from_secs(3));
            }
            Err(_) => {
                self.set_status_ttl("Validation error.", Duration::from_secs(4));
            }
        }
    }

    fn start_locate(&mut self, ctx: &egui::Context) {
        self.controller.begin_locate();
        self.status = "Resolving device location...".to_string();
        self.status_deadline = None;

        let geolocator = self.geolocator.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(WorkerMsg::Location(locate(geolocator.as_deref())));
            ctx.request_repaint();
        });
    }

    fn drain_worker(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                WorkerMsg::Analysis(outcome) => {
                    let ok = outcome.is_ok();
                    self.controller.finish_analysis(outcome);
                    let msg = if ok { "Done." } else { "Analysis failed." };
                    self.set_status_ttl(msg, Duration::from_secs(4));
                }
                WorkerMsg::Location(outcome) => {
                    let ok = outcome.is_ok();
                    if let Some(start) = self.controller.finish_locate(outcome) {
                        self.start_analysis(ctx, start);
                    } else if ok {
                        self.set_status_ttl("Location set.", Duration::from_secs(3));
                    } else {
                        self.set_status_ttl("Location unavailable.", Duration::from_secs(4));
                    }
                }
            }
        }
    }

    fn export_json(&mut self) {
        let Some(result) = self.controller.last_result() else {
            return;
        };
        let export = AnalysisExport::new(&self.controller.config().backend_url, None, result);
        let json = match export.to_pretty_json() {
            Ok(j) => j,
            Err(e) => {
                self.set_status_ttl(format!("Export failed: {e:#}"), Duration::from_secs(6));
                return;
            }
        };

        let path: Option<PathBuf> = rfd::FileDialog::new()
            .set_title("Export route analysis (JSON)")
            .set_file_name(default_export_filename())
            .add_filter("JSON", &["json"])
            .save_file();

        if let Some(path) = path {
            if let Err(e) = std::fs::write(&path, format!("{}\n", json)) {
                self.set_status_ttl(
                    format!("Failed to write file: {} ({})", path.display(), e),
                    Duration::from_secs(6),
                );
            } else {
                self.set_status_ttl(
                    format!("Export completed: {}", path.display()),
                    Duration::from_secs(5),
                );
            }
        } else {
            self.set_status_ttl("Export cancelled.", Duration::from_secs(3));
        }
    }

    fn results_panel(&self, ui: &mut egui::Ui, pulse: f32) {
        match &self.controller.panel {
            ResultsPanel::Empty => {
                ui.label(
                    egui::RichText::new("Enter a start and destination to analyze a route.").weak(),
                );
            }
            ResultsPanel::Progress(msg) => {
                let color = ui.visuals().text_color().gamma_multiply(0.4 + 0.6 * pulse);
                ui.label(egui::RichText::new(msg).italics().color(color));
            }
            ResultsPanel::Error(msg) => {
                ui.colored_label(ui.visuals().error_fg_color, msg.as_str());
            }
            ResultsPanel::Summary(s) => {
                ui.label(egui::RichText::new(format!("From: {}", s.from)).strong());
                ui.label(egui::RichText::new(format!("To: {}", s.to)).strong());
                if s.distance_km > 0.0 {
                    ui.label(format!("Distance: ~{:.0} km", s.distance_km));
                }
                ui.add_space(6.0);

                let color = match s.safety {
                    Safety::Clear => egui::Color32::from_rgb(0, 170, 0),
                    Safety::Caution { .. } => egui::Color32::from_rgb(230, 160, 0),
                };
                ui.colored_label(color, s.safety.message());

                if s.has_hazard_list() {
                    ui.add_space(6.0);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            for h in &s.hazards {
                                ui.label(egui::RichText::new(&h.location_name).strong());
                                ui.label(h.details.as_str());
                                ui.separator();
                            }
                        });
                }
            }
        }
    }
}

impl eframe::App for RouteAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker(ctx);
        self.tick_status_deadline();

        let pulse = if self.controller.pulsing {
            ctx.request_repaint_after(Duration::from_millis(50));
            let t = ctx.input(|i| i.time);
            (0.5 + 0.5 * (t * 4.0).sin()) as f32
        } else {
            1.0
        };

        let base = "Satwatch Route Analyzer";
        let title = if self.controller.is_analyzing() {
            format!("{base} — Analyzing…")
        } else {
            format!("{base} — Ready")
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));

        let enter = ctx.input(|i| i.key_pressed(egui::Key::Enter));
        let ctrl_s = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));

        // --- LEFT PANEL: inputs, buttons, results
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.heading("Route analysis");
                ui.add_space(6.0);

                ui.label("Start");
                ui.add(
                    egui::TextEdit::singleline(&mut self.controller.start_input)
                        .hint_text("e.g. Delhi")
                        .desired_width(f32::INFINITY),
                );
                ui.label("Destination");
                let dest = ui.add(
                    egui::TextEdit::singleline(&mut self.controller.destination_input)
                        .hint_text("e.g. Mumbai")
                        .desired_width(f32::INFINITY),
                );

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let analyze = ui.add_enabled(
                        self.controller.analyze_button.enabled,
                        egui::Button::new(self.controller.analyze_button.label.as_str()),
                    );
                    let submitted = dest.lost_focus() && enter;
                    if (analyze.clicked() || submitted) && self.controller.analyze_button.enabled {
                        let start = self.controller.current_start();
                        self.start_analysis(ctx, start);
                    }

                    let locate = ui.add_enabled(
                        self.controller.locate_button.enabled,
                        egui::Button::new(self.controller.locate_button.label.as_str()),
                    );
                    if locate.clicked() {
                        self.start_locate(ctx);
                    }
                });

                ui.separator();
                self.results_panel(ui, pulse);
            });

        // --- STATUS PANEL: very bottom
        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .exact_height(26.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("v{}", Self::app_version()))
                            .monospace()
                            .color(ui.visuals().weak_text_color()),
                    )
                    .on_hover_text(self.controller.config().backend_url.clone());
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(&self.status).weak());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let export = ui
                            .add_enabled(
                                self.controller.last_result().is_some()
                                    && !self.controller.is_analyzing(),
                                egui::Button::new("Export JSON"),
                            )
                            .on_hover_text("Export last analysis (Ctrl+S)");
                        if export.clicked() {
                            self.export_json();
                        }
                    });
                });
            });

        // --- CENTRAL: map
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let pulse = self.controller.pulsing.then_some(pulse);
                canvas::show(ui, &mut self.controller.map, pulse);
            });

        if ctrl_s && self.controller.last_result().is_some() && !self.controller.is_analyzing() {
            self.export_json();
        }
    }
}
