// src/pipeline/population.rs

use crate::fetch::{Dataset, SdmxClient};
use crate::series::{Frame, Series};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Estimated resident population, Australia-wide, quarterly.
pub static DATASET: Dataset = Dataset {
    flow: "ABS,ERP_Q,1.0.0",
    key_suffix: ".AUS.Q",
    series: &[("1.3.TOT", "Estimated_Resident_Population")],
};

pub const OUTPUT_FILE: &str = "ERP_quarterly.csv";

/// Head counts come back as persons; published in millions.
const SCALE_RULES: &[(&str, f64)] = &[("Estimated_Resident_Population", 1_000_000.0)];

pub fn build_quarterly(series: &[Series]) -> Result<Frame> {
    let mut frame = Frame::merge("Date", series)?;
    frame.scale(SCALE_RULES);
    Ok(frame)
}

pub fn run(client: &SdmxClient, out_dir: &Path) -> Result<()> {
    info!("fetching ABS ERP series");
    let series = client.fetch_dataset(&DATASET)?;
    let frame = build_quarterly(&series)?;
    super::write_output(&frame, out_dir, OUTPUT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::parse_series_csv;

    #[test]
    fn population_is_scaled_to_millions() -> Result<()> {
        let body = "TIME_PERIOD,OBS_VALUE\n2024-Q1,27100000\n2024-Q2,27200000\n";
        let series = vec![parse_series_csv(body, "Estimated_Resident_Population")?];
        let frame = build_quarterly(&series)?;

        assert_eq!(frame.columns(), ["Estimated_Resident_Population"]);
        assert_eq!(
            frame.value("2024-Q1", "Estimated_Resident_Population"),
            Some(27.1)
        );
        assert_eq!(
            frame.value("2024-Q2", "Estimated_Resident_Population"),
            Some(27.2)
        );
        Ok(())
    }
}
