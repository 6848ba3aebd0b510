//! Annual GDP aggregates only, the first of the three original standalone
//! scripts.

use abscraper::{fetch::SdmxClient, pipeline::gdp};
use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    gdp::run(&SdmxClient::new(), Path::new("."))
}
