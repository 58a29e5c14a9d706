use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "satwatch_route",
    version,
    about = "Analyze a travel route for hazards using the route analysis backend"
)]
pub struct Cli {
    /// Backend base URL (overrides the config file), e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Path to the JSON config file (defaults to the OS config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Request a route to DESTINATION and print the safety summary
    Analyze(AnalyzeArgs),

    /// Open the map window
    Gui,

    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Destination place name (e.g. "Mumbai")
    pub destination: String,

    /// Start place name
    #[arg(long, conflicts_with_all = ["lat", "lon", "locate"])]
    pub from: Option<String>,

    /// Start latitude (degrees), together with --lon
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Start longitude (degrees), together with --lat
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Start from the device location (see `geolocation` in the config)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub locate: bool,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colors and emoji
    #[arg(long)]
    pub plain: bool,
}
