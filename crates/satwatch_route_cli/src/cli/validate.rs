// src/cli/validate.rs
use anyhow::{Result, bail};

use satwatch_route_core::error::MISSING_DESTINATION_MSG;

use crate::cli::args::AnalyzeArgs;

pub const TIP_NEGATIVE_COORDS: &str =
    "Note: for negative coordinates, use the '=' form, e.g.:\n  analyze Sydney --lat=-33.86 --lon=151.21";

pub fn validate_analyze(args: &AnalyzeArgs) -> Result<()> {
    if args.destination.trim().is_empty() {
        bail!(MISSING_DESTINATION_MSG);
    }

    if let Some(from) = &args.from {
        if from.trim().is_empty() {
            bail!("--from cannot be empty.");
        }
        return Ok(());
    }

    if args.locate {
        return Ok(());
    }

    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => validate_lat_lon(lat, lon),
        _ => bail!(
            "You must specify a start:\n\
             \n\
             - --from <PLACE>\n\
             \n\
             OR\n\
             \n\
             - --lat=<DEG> --lon=<DEG>\n\
             \n\
             OR\n\
             \n\
             - --locate\n\
             \n\
             {TIP_NEGATIVE_COORDS}"
        ),
    }
}

pub fn validate_lat_lon(lat: f64, lon: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        bail!("Invalid latitude: {lat} (must be within -90..=90)");
    }
    if !(-180.0..=180.0).contains(&lon) {
        bail!("Invalid longitude: {lon} (must be within -180..=180)");
    }
    Ok(())
}
