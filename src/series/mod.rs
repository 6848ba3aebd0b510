// src/series/mod.rs

use anyhow::{bail, Context, Result};
use csv::Writer;
use std::{collections::BTreeMap, path::Path};

/// One fetched time series: a display name plus (period, value) observations
/// in the order the API reported them. Values may be absent for a period.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub observations: Vec<(String, Option<f64>)>,
}

impl Series {
    pub fn new(name: impl Into<String>, observations: Vec<(String, Option<f64>)>) -> Self {
        Self {
            name: name.into(),
            observations,
        }
    }
}

/// A wide table: one key column (period or year label) and one value column
/// per merged series. Rows live in a `BTreeMap` keyed by the period label,
/// which keeps them sorted ascending — lexicographic order on `YYYY-Qn`,
/// `YYYY-MM`, and 4-digit year labels is chronological order.
#[derive(Debug, Clone)]
pub struct Frame {
    key_name: String,
    columns: Vec<String>,
    rows: BTreeMap<String, Vec<Option<f64>>>,
}

impl Frame {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            columns: Vec::new(),
            rows: BTreeMap::new(),
        }
    }

    /// Full outer join of `series`, left to right, on the key column.
    /// Every period present in any input appears in the output; combinations
    /// a series has no data for are `None`. Duplicate periods within one
    /// series are an error — joining on a non-unique key would multiply rows.
    pub fn merge(key_name: &str, series: &[Series]) -> Result<Frame> {
        let mut frame = Frame::new(key_name);
        for s in series {
            frame.push_series(s)?;
        }
        frame.pad_rows();
        Ok(frame)
    }

    /// Outer join of whole frames sharing the same key column, used to
    /// combine single-column annual tables into one wide annual table.
    pub fn merge_frames(frames: &[Frame]) -> Result<Frame> {
        let Some(first) = frames.first() else {
            bail!("cannot merge an empty list of frames");
        };
        let mut out = Frame::new(first.key_name.clone());
        for f in frames {
            if f.key_name != out.key_name {
                bail!(
                    "cannot merge frame keyed by {:?} into frame keyed by {:?}",
                    f.key_name,
                    out.key_name
                );
            }
            for (idx, col) in f.columns.iter().enumerate() {
                let observations: Vec<(String, Option<f64>)> = f
                    .rows
                    .iter()
                    .map(|(k, row)| (k.clone(), row[idx]))
                    .collect();
                out.push_series(&Series::new(col.clone(), observations))?;
            }
        }
        out.pad_rows();
        Ok(out)
    }

    /// Append one series as a new rightmost column.
    fn push_series(&mut self, series: &Series) -> Result<()> {
        let col_idx = self.columns.len();
        for (period, value) in &series.observations {
            let row = self.rows.entry(period.clone()).or_default();
            if row.len() < col_idx {
                row.resize(col_idx, None);
            }
            if row.len() > col_idx {
                bail!(
                    "duplicate period {:?} in series {:?}",
                    period,
                    series.name
                );
            }
            row.push(*value);
        }
        self.columns.push(series.name.clone());
        Ok(())
    }

    /// Bring every row up to the current column count. Rows created by an
    /// earlier series are only padded lazily, so this runs once after the
    /// last column is in.
    fn pad_rows(&mut self) {
        let width = self.columns.len();
        for row in self.rows.values_mut() {
            row.resize(width, None);
        }
    }

    /// Apply `(column, divisor)` unit-scaling rules in place. Each rule hits
    /// its column exactly once; rules naming a column this frame does not
    /// have are skipped.
    pub fn scale(&mut self, rules: &[(&str, f64)]) {
        for &(col, divisor) in rules {
            let Some(idx) = self.columns.iter().position(|c| c == col) else {
                continue;
            };
            for row in self.rows.values_mut() {
                if let Some(v) = row[idx] {
                    row[idx] = Some(v / divisor);
                }
            }
        }
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// One column's values in row-key order, or `None` if the frame has no
    /// such column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.values().map(|row| row[idx]).collect())
    }

    /// Cell lookup by key and column name, mainly for tests.
    pub fn value(&self, key: &str, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(key).and_then(|row| row[idx])
    }

    /// Append an already-computed column (one value per row, in key order).
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        if values.len() != self.rows.len() {
            bail!(
                "derived column has {} values for {} rows",
                values.len(),
                self.rows.len()
            );
        }
        for (row, v) in self.rows.values_mut().zip(values) {
            row.push(v);
        }
        self.columns.push(name.into());
        Ok(())
    }

    /// Write the frame as a tidy CSV: header row, key column first, value
    /// columns in merge order, empty cells for nulls.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut wtr = Writer::from_path(path)
            .with_context(|| format!("creating output file {}", path.display()))?;

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(self.key_name.as_str());
        header.extend(self.columns.iter().map(String::as_str));
        wtr.write_record(&header)?;

        for (key, row) in &self.rows {
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(key.clone());
            for v in row {
                record.push(v.map(|v| v.to_string()).unwrap_or_default());
            }
            wtr.write_record(&record)?;
        }
        wtr.flush()
            .with_context(|| format!("flushing output file {}", path.display()))?;
        Ok(())
    }
}
