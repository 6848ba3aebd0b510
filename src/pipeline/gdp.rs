// src/pipeline/gdp.rs

use crate::fetch::{Dataset, SdmxClient};
use crate::series::{Frame, Series};
use crate::transform::{aggregate_to_annual, growth_rate};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// National accounts aggregates, quarterly, all-sector (dimension `10`).
pub static DATASET: Dataset = Dataset {
    flow: "ABS,ANA_AGG,1.0.0",
    key_suffix: ".10..Q",
    series: &[
        ("M1.GPM", "Real_GDP"),
        ("M3.GPM", "Nominal_GDP"),
        ("M1.GPM_PCA", "Real_GDP_per_capita"),
        ("M3.GPM_PCA", "Nominal_GDP_per_capita"),
        ("M2.GPM_PCA", "Real_GDP_per_capita_growth"),
    ],
};

pub const OUTPUT_FILE: &str = "GDP_annual.csv";

/// The one column the ABS does not publish annually; derived here from the
/// aggregated per-capita series.
const GROWTH_SOURCE: &str = "Nominal_GDP_per_capita";
const GROWTH_COLUMN: &str = "Nominal_GDP_per_capita_growth";

/// Merge the quarterly series, roll each up to complete financial years,
/// outer-join the annual tables on Year, and derive nominal per-capita
/// growth from the annual figures.
pub fn build_annual(series: &[Series]) -> Result<Frame> {
    let quarterly = Frame::merge("Date", series)?;

    let columns: Vec<String> = quarterly.columns().to_vec();
    let mut annual_tables = Vec::with_capacity(columns.len());
    for column in &columns {
        annual_tables.push(aggregate_to_annual(&quarterly, column)?);
    }
    let mut annual = Frame::merge_frames(&annual_tables)?;

    if annual.columns().iter().any(|c| c == GROWTH_SOURCE) {
        growth_rate(&mut annual, GROWTH_SOURCE, GROWTH_COLUMN)?;
    }
    Ok(annual)
}

pub fn run(client: &SdmxClient, out_dir: &Path) -> Result<()> {
    info!("fetching ABS GDP series");
    let series = client.fetch_dataset(&DATASET)?;
    let annual = build_annual(&series)?;
    super::write_output(&annual, out_dir, OUTPUT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::parse_series_csv;

    /// Synthetic API body: 8 consecutive quarters spanning financial years
    /// 2020 and 2021, constant quarterly value.
    fn body(per_quarter: f64) -> String {
        let mut s = String::from("TIME_PERIOD,OBS_VALUE\n");
        for period in [
            "2019-Q3", "2019-Q4", "2020-Q1", "2020-Q2", "2020-Q3", "2020-Q4", "2021-Q1",
            "2021-Q2",
        ] {
            s.push_str(&format!("{period},{per_quarter}\n"));
        }
        s
    }

    #[test]
    fn two_complete_years_yield_two_annual_rows() -> Result<()> {
        let series = vec![
            parse_series_csv(&body(100.0), "Real_GDP")?,
            parse_series_csv(&body(50.0), "Nominal_GDP_per_capita")?,
        ];
        let annual = build_annual(&series)?;

        assert_eq!(annual.len(), 2);
        assert_eq!(annual.keys().collect::<Vec<_>>(), vec!["2020", "2021"]);
        assert_eq!(annual.value("2020", "Real_GDP"), Some(400.0));
        assert_eq!(annual.value("2021", "Real_GDP"), Some(400.0));
        assert_eq!(annual.value("2020", "Nominal_GDP_per_capita"), Some(200.0));
        Ok(())
    }

    #[test]
    fn growth_column_is_derived_with_a_null_first_row() -> Result<()> {
        let mut quarterly = String::from("TIME_PERIOD,OBS_VALUE\n");
        // FY2020 sums to 400, FY2021 to 440: 10% growth.
        for (period, v) in [
            ("2019-Q3", 100.0),
            ("2019-Q4", 100.0),
            ("2020-Q1", 100.0),
            ("2020-Q2", 100.0),
            ("2020-Q3", 110.0),
            ("2020-Q4", 110.0),
            ("2021-Q1", 110.0),
            ("2021-Q2", 110.0),
        ] {
            quarterly.push_str(&format!("{period},{v}\n"));
        }
        let series = vec![parse_series_csv(&quarterly, "Nominal_GDP_per_capita")?];
        let annual = build_annual(&series)?;

        assert_eq!(
            annual.columns(),
            ["Nominal_GDP_per_capita", "Nominal_GDP_per_capita_growth"]
        );
        assert_eq!(
            annual.column("Nominal_GDP_per_capita_growth").unwrap(),
            vec![None, Some(10.0)]
        );
        Ok(())
    }

    #[test]
    fn rerun_over_the_same_input_is_byte_identical() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let series = vec![
            parse_series_csv(&body(100.0), "Real_GDP")?,
            parse_series_csv(&body(50.0), "Nominal_GDP_per_capita")?,
        ];

        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        build_annual(&series)?.write_csv(&first)?;
        build_annual(&series)?.write_csv(&second)?;

        let text = std::fs::read_to_string(&first)?;
        assert_eq!(text, std::fs::read_to_string(&second)?);
        assert!(text.starts_with(
            "Year,Real_GDP,Nominal_GDP_per_capita,Nominal_GDP_per_capita_growth\n"
        ));
        Ok(())
    }

    #[test]
    fn partial_trailing_year_is_excluded_from_the_output() -> Result<()> {
        let mut quarterly = body(100.0);
        quarterly.push_str("2021-Q3,100.0\n");
        let series = vec![parse_series_csv(&quarterly, "Real_GDP")?];
        let annual = build_annual(&series)?;
        assert_eq!(annual.keys().collect::<Vec<_>>(), vec!["2020", "2021"]);
        Ok(())
    }
}
