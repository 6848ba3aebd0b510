// src/pipeline/mod.rs
//
// The three statistics pipelines. Each is the same template — fetch every
// configured series, outer-merge on the period, optionally scale units or
// roll up to financial years, write one tidy CSV — instantiated against a
// different ABS dataflow. All parameters are compiled-in constants; there
// are no flags, env vars, or config files.

use crate::series::Frame;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub mod gdp;
pub mod labour_force;
pub mod population;

fn write_output(frame: &Frame, out_dir: &Path, file_name: &str) -> Result<()> {
    let path = out_dir.join(file_name);
    frame
        .write_csv(&path)
        .with_context(|| format!("writing {file_name}"))?;
    info!(rows = frame.len(), path = %path.display(), "wrote output");
    Ok(())
}
