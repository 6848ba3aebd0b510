//! Mirror the RBA chart pack: download each SVG and rasterize it to PNG.
//! Runs to completion regardless of per-chart failures.

use abscraper::charts;
use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    charts::run(
        &reqwest::blocking::Client::new(),
        Path::new(charts::OUTPUT_DIR),
    )
}
