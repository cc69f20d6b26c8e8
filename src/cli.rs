use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Launch table to load (.csv, .json or .parquet)
    #[clap(
        env = "SPACEX_DASH_DATA",
        value_name = "FILE",
        default_value = "spacex_launch_dash.csv"
    )]
    pub data: PathBuf,

    /// Initial window width in points
    #[clap(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[clap(long, default_value_t = 900.0)]
    pub height: f32,
}
