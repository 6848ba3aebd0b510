// src/transform/mod.rs

use crate::series::{Frame, Series};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

/// The API labels quarters `2024-Q1`; the bare `2024Q1` form shows up in
/// older exports, so both are accepted.
static QUARTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-?Q([1-4])$").expect("quarter pattern should be valid"));

/// A calendar quarter parsed from a period label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    pub year: i32,
    pub number: u32,
}

impl Quarter {
    pub fn parse(period: &str) -> Result<Quarter> {
        let caps = QUARTER_RE
            .captures(period.trim())
            .with_context(|| format!("period {:?} is not a YYYY-Qn quarter", period))?;
        let year = caps[1].parse()?;
        let number = caps[2].parse()?;
        Ok(Quarter { year, number })
    }

    /// The Australian financial year this quarter belongs to, labeled by its
    /// ending calendar year: Q1/Q2 close out the FY labeled with their own
    /// year, Q3/Q4 open the FY labeled with the next.
    pub fn financial_year(&self) -> i32 {
        match self.number {
            1 | 2 => self.year,
            _ => self.year + 1,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Collapse one quarterly column to financial-year totals.
///
/// Null observations are dropped first, so each series is aggregated over the
/// periods it actually reported. A financial year makes it into the output
/// only when all four of its quarters are present; partial years at either
/// end of the data range would sum to misleading totals and are discarded.
pub fn aggregate_to_annual(frame: &Frame, column: &str) -> Result<Frame> {
    let values = frame
        .column(column)
        .with_context(|| format!("no column {:?} to aggregate", column))?;

    let mut quarters_seen: BTreeMap<i32, HashSet<u32>> = BTreeMap::new();
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();

    for (period, value) in frame.keys().zip(values) {
        let Some(value) = value else { continue };
        let quarter = Quarter::parse(period)?;
        let fy = quarter.financial_year();
        quarters_seen.entry(fy).or_default().insert(quarter.number);
        *totals.entry(fy).or_insert(0.0) += value;
    }

    let observations: Vec<(String, Option<f64>)> = totals
        .into_iter()
        .filter(|(fy, _)| quarters_seen[fy].len() == 4)
        .map(|(fy, total)| (fy.to_string(), Some(round2(total))))
        .collect();

    Frame::merge("Year", &[Series::new(column, observations)])
}

/// Append a period-over-period percent-change column for `value_col`, in the
/// frame's existing key order. The first row has no prior period and stays
/// null; a null observation yields a null change and the next change is
/// computed against the last non-null value.
pub fn growth_rate(frame: &mut Frame, value_col: &str, new_col: &str) -> Result<()> {
    let values = frame
        .column(value_col)
        .with_context(|| format!("no column {:?} to compute growth on", value_col))?;

    let mut growth = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for value in values {
        growth.push(match (prev, value) {
            (Some(p), Some(v)) => Some(round2((v - p) / p * 100.0)),
            _ => None,
        });
        if value.is_some() {
            prev = value;
        }
    }
    frame.push_column(new_col, growth)
}
