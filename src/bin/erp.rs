//! Quarterly estimated resident population only.

use abscraper::{fetch::SdmxClient, pipeline::population};
use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    population::run(&SdmxClient::new(), Path::new("."))
}
