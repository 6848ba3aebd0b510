// src/pipeline/labour_force.rs

use crate::fetch::{Dataset, SdmxClient};
use crate::series::{Frame, Series};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Monthly labour force survey: the headline original series plus the
/// seasonally adjusted splits used for trend analysis.
pub static DATASET: Dataset = Dataset {
    flow: "ABS,LF,1.0.0",
    key_suffix: ".AUS.M",
    series: &[
        // Original series
        ("M11.3.1599.10", "Working_Age_Population"),
        ("M10.3.1599.10", "Not_in_Labour_Force"),
        ("M9.3.1599.10", "Labour_Force"),
        ("M3.3.1599.10", "Employment"),
        ("M6.3.1599.10", "Unemployment"),
        ("M12.3.1599.10", "Participation_Rate"),
        ("M13.3.1599.10", "Unemployment_Rate"),
        // Seasonally adjusted series
        ("M1.3.1599.20", "Emp_SA_FT"),
        ("M2.3.1599.20", "Emp_SA_PT"),
        ("M3.3.1599.20", "Emp_SA_Total"),
        ("M12.1.1599.20", "PR_SA_Male"),
        ("M12.2.1599.20", "PR_SA_Female"),
        ("M12.3.1599.20", "PR_SA_Total"),
        ("M13.1.1599.20", "UR_SA_Male"),
        ("M13.2.1599.20", "UR_SA_Female"),
        ("M13.3.1599.20", "UR_SA_Total"),
    ],
};

pub const OUTPUT_FILE: &str = "LF_monthly.csv";

/// Person counts arrive in thousands (scaled to millions); the headline
/// rates arrive as percentages (scaled to fractions).
const SCALE_RULES: &[(&str, f64)] = &[
    ("Working_Age_Population", 1000.0),
    ("Not_in_Labour_Force", 1000.0),
    ("Labour_Force", 1000.0),
    ("Employment", 1000.0),
    ("Unemployment", 1000.0),
    ("Emp_SA_FT", 1000.0),
    ("Emp_SA_PT", 1000.0),
    ("Emp_SA_Total", 1000.0),
    ("Participation_Rate", 100.0),
    ("Unemployment_Rate", 100.0),
];

pub fn build_monthly(series: &[Series]) -> Result<Frame> {
    let mut frame = Frame::merge("Date", series)?;
    frame.scale(SCALE_RULES);
    Ok(frame)
}

pub fn run(client: &SdmxClient, out_dir: &Path) -> Result<()> {
    info!("fetching ABS labour force series");
    let series = client.fetch_dataset(&DATASET)?;
    let frame = build_monthly(&series)?;
    super::write_output(&frame, out_dir, OUTPUT_FILE)
}
