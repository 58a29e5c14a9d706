use std::sync::Arc;

use anyhow::Result;

use satwatch_route_core::backend::HttpTransport;
use satwatch_route_core::config::Config;
use satwatch_route_core::controller::RouteAnalysisController;
use satwatch_route_core::export::{AnalysisExport, ExportQuery};
use satwatch_route_core::model::{Coordinate, StartLocation};
use satwatch_route_core::summary::RouteSummary;
use satwatch_route_core::utils::formatting::print_kv_block_colored_keys;

use crate::cli::args::AnalyzeArgs;
use crate::cli::color::Colors;
use crate::ui::{Level, Style, print_line};

pub fn run(cfg: Config, args: &AnalyzeArgs) -> Result<()> {
    let style = Style::for_flags(args.plain);
    let transport = Arc::new(HttpTransport::new(cfg.request_timeout())?);
    let mut ctl = RouteAnalysisController::initialize(cfg, transport);
    ctl.destination_input = args.destination.clone();

    let (outcome, start) = if args.locate {
        let geolocator = ctl.config().geolocator();
        let outcome = ctl.use_device_location(geolocator.as_deref());
        (outcome, ctl.current_start())
    } else {
        let start = match (&args.from, args.lat, args.lon) {
            (Some(name), _, _) => StartLocation::text(name.trim()),
            (None, Some(lat), Some(lon)) => Coordinate::new(lat, lon).into(),
            _ => anyhow::bail!("No start location given"),
        };
        if let StartLocation::Text(name) = &start {
            ctl.start_input = name.clone();
        }
        (ctl.analyze_route(start.clone(), &args.destination), start)
    };

    // The panel text is the error message; main prints it once.
    outcome?;

    let Some(result) = ctl.last_result() else {
        anyhow::bail!("Analysis finished without a result");
    };

    if args.json {
        let query = ExportQuery {
            start: (&start).into(),
            destination: args.destination.trim().to_string(),
        };
        let export = AnalysisExport::new(&ctl.config().backend_url, Some(query), result);
        println!("{}", export.to_pretty_json()?);
        return Ok(());
    }

    let Some(summary) = ctl.panel.summary() else {
        anyhow::bail!("Analysis finished without a summary");
    };
    print_summary(summary, result.route.len(), style);
    Ok(())
}

fn print_summary(summary: &RouteSummary, points: usize, style: Style) {
    let colors = Colors::new(&style);

    let mut pairs: Vec<(&str, String)> = vec![
        ("From", summary.from.clone()),
        ("To", summary.to.clone()),
    ];
    if summary.distance_km > 0.0 {
        pairs.push((
            "Distance",
            format!("~{:.0} km ({} points)", summary.distance_km, points),
        ));
    }
    print_kv_block_colored_keys(&pairs, |k| colors.key(k));
    println!();

    let level = if summary.has_hazard_list() {
        Level::Warning
    } else {
        Level::Success
    };
    print_line(level, &summary.safety.message(), style);

    if summary.has_hazard_list() {
        println!();
        for (i, h) in summary.hazards.iter().enumerate() {
            println!(
                "{} {}",
                colors.dim(format!("{:>2}.", i + 1)),
                colors.hazard_name(&h.location_name)
            );
            println!("    {}", colors.safety(&summary.safety, &h.details));
        }
    }
}
