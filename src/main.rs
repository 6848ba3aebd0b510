use abscraper::{charts, fetch::SdmxClient, pipeline};
use anyhow::Result;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) statistics pipelines, fatal on first error ───────────────
    let client = SdmxClient::new();
    let out_dir = Path::new(".");
    pipeline::gdp::run(&client, out_dir)?;
    pipeline::population::run(&client, out_dir)?;
    pipeline::labour_force::run(&client, out_dir)?;

    // ─── 3) chart pack, per-chart failures isolated ──────────────────
    charts::run(
        &reqwest::blocking::Client::new(),
        Path::new(charts::OUTPUT_DIR),
    )?;

    info!("all done");
    Ok(())
}
