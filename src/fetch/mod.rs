// src/fetch/mod.rs

use crate::series::Series;
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use reqwest::blocking::Client;
use std::collections::HashSet;
use tracing::info;

/// ABS SDMX REST data endpoint. Dataflow and dimension key are encoded in
/// the path; `format=csv` asks for a CSV body instead of SDMX-ML.
pub const ABS_DATA_URL: &str = "https://data.api.abs.gov.au/rest/data/";

const PERIOD_COLUMN: &str = "TIME_PERIOD";
const VALUE_COLUMN: &str = "OBS_VALUE";

/// Static description of one ABS dataflow: which flow to query, the fixed
/// trailing dimensions (region and frequency codes), and the series to pull
/// out of it with their display names. Order defines output column order.
pub struct Dataset {
    pub flow: &'static str,
    pub key_suffix: &'static str,
    pub series: &'static [(&'static str, &'static str)],
}

impl Dataset {
    pub fn series_url(&self, key: &str) -> String {
        format!(
            "{ABS_DATA_URL}{}/{}{}?format=csv",
            self.flow, key, self.key_suffix
        )
    }
}

/// Thin wrapper over a blocking HTTP client. One GET per series, sequential,
/// no retries: a failed fetch aborts the whole run.
pub struct SdmxClient {
    http: Client,
}

impl SdmxClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Fetch every configured series of `dataset`, in configuration order.
    pub fn fetch_dataset(&self, dataset: &Dataset) -> Result<Vec<Series>> {
        dataset
            .series
            .iter()
            .map(|&(key, name)| self.fetch_series(dataset, key, name))
            .collect()
    }

    /// Fetch one series and parse the CSV body into an observation table,
    /// renaming the value column to `name`.
    pub fn fetch_series(&self, dataset: &Dataset, key: &str, name: &str) -> Result<Series> {
        let url = dataset.series_url(key);
        info!(series = %name, %url, "fetching");
        let body = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("fetching series {name}"))?
            .text()
            .with_context(|| format!("reading body for series {name}"))?;
        parse_series_csv(&body, name).with_context(|| format!("parsing response for series {name}"))
    }
}

impl Default for SdmxClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an SDMX CSV body into a `Series`, keeping only the period and value
/// columns. The API echoes every dimension as its own column, so both are
/// located by header name. An empty OBS_VALUE is a null observation; a
/// repeated TIME_PERIOD is rejected here so the later join can never
/// multiply rows.
pub fn parse_series_csv(body: &str, name: &str) -> Result<Series> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body.as_bytes());

    let headers = rdr.headers().context("reading CSV header")?;
    let period_idx = headers
        .iter()
        .position(|h| h == PERIOD_COLUMN)
        .with_context(|| format!("response has no {PERIOD_COLUMN} column"))?;
    let value_idx = headers
        .iter()
        .position(|h| h == VALUE_COLUMN)
        .with_context(|| format!("response has no {VALUE_COLUMN} column"))?;

    let mut observations = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {idx}"))?;
        let period = record
            .get(period_idx)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .with_context(|| format!("record {idx} has an empty {PERIOD_COLUMN}"))?;
        if !seen.insert(period.to_string()) {
            bail!("duplicate period {period:?} in response");
        }

        let raw = record.get(value_idx).map(str::trim).unwrap_or_default();
        let value = if raw.is_empty() {
            None
        } else {
            Some(raw.parse::<f64>().with_context(|| {
                format!("record {idx} has a non-numeric {VALUE_COLUMN} {raw:?}")
            })?)
        };
        observations.push((period.to_string(), value));
    }

    Ok(Series::new(name, observations))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "\
DATAFLOW,MEASURE,TIME_PERIOD,OBS_VALUE,UNIT_MEASURE
ABS:ANA_AGG(1.0.0),M1,2023-Q4,550123.4,AUD
ABS:ANA_AGG(1.0.0),M1,2024-Q1,552000.1,AUD
ABS:ANA_AGG(1.0.0),M1,2024-Q2,,AUD
";

    #[test]
    fn parses_period_and_value_columns_by_header() -> Result<()> {
        let series = parse_series_csv(BODY, "Real_GDP")?;
        assert_eq!(series.name, "Real_GDP");
        assert_eq!(
            series.observations,
            vec![
                ("2023-Q4".to_string(), Some(550123.4)),
                ("2024-Q1".to_string(), Some(552000.1)),
                ("2024-Q2".to_string(), None),
            ]
        );
        Ok(())
    }

    #[test]
    fn rejects_a_response_missing_the_period_column() {
        let err = parse_series_csv("MEASURE,OBS_VALUE\nM1,1.0\n", "X").unwrap_err();
        assert!(err.to_string().contains("TIME_PERIOD"));
    }

    #[test]
    fn rejects_duplicate_periods() {
        let body = "TIME_PERIOD,OBS_VALUE\n2024-Q1,1.0\n2024-Q1,2.0\n";
        let err = parse_series_csv(body, "X").unwrap_err();
        assert!(err.to_string().contains("duplicate period"));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let body = "TIME_PERIOD,OBS_VALUE\n2024-Q1,n/a\n";
        let err = parse_series_csv(body, "X").unwrap_err();
        assert!(err.to_string().contains("non-numeric"));
    }

    #[test]
    fn builds_the_documented_series_url() {
        let ds = Dataset {
            flow: "ABS,ANA_AGG,1.0.0",
            key_suffix: ".10..Q",
            series: &[],
        };
        assert_eq!(
            ds.series_url("M1.GPM"),
            "https://data.api.abs.gov.au/rest/data/ABS,ANA_AGG,1.0.0/M1.GPM.10..Q?format=csv"
        );
    }
}
