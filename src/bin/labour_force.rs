//! Monthly labour force survey series only.

use abscraper::{fetch::SdmxClient, pipeline::labour_force};
use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    labour_force::run(&SdmxClient::new(), Path::new("."))
}
