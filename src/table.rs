//! In-memory CSV table. Every field is text; missing/null is the empty string.
//! Whole-file load, whole-file store with atomic promotion of the output.

use crate::util::{create_with_backoff, open_with_backoff, replace_file_atomic_backoff};
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    /// Load a whole CSV file. Short rows are padded to the header width and
    /// long rows truncated, so downstream column indexing never goes out of
    /// bounds on a ragged file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = open_with_backoff(path, 16, 50)
            .with_context(|| format!("open {}", path.display()))?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("read header of {}", path.display()))?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec.with_context(|| format!("read row of {}", path.display()))?;
            let mut row: Vec<String> = rec.iter().map(|f| f.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    /// Write the table to `path` via a temp file promoted atomically, so a
    /// failed run never leaves a half-written output.
    pub fn store(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("csv.inprogress");
        let file = create_with_backoff(&tmp, 16, 50)
            .with_context(|| format!("create {}", tmp.display()))?;
        let mut w = csv::Writer::from_writer(file);
        w.write_record(&self.headers)?;
        for row in &self.rows {
            w.write_record(row)?;
        }
        w.flush()?;
        drop(w);
        replace_file_atomic_backoff(&tmp, path)
    }

    /// Index of a named column, if present.
    pub fn col(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a derived column. `values` must be one per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.push(name.into());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
    }

    /// Apply `f` to every cell of the named columns. Unknown names are ignored,
    /// matching the ad hoc column checks of the source data.
    pub fn map_columns(&mut self, names: &[String], f: impl Fn(&str) -> Option<String>) {
        let idxs: Vec<usize> = names.iter().filter_map(|n| self.col(n)).collect();
        for row in &mut self.rows {
            for &i in &idxs {
                if let Some(new) = f(&row[i]) {
                    row[i] = new;
                }
            }
        }
    }

    /// Apply `f` to every cell of every column.
    pub fn map_all(&mut self, f: impl Fn(&str) -> Option<String>) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                if let Some(new) = f(cell) {
                    *cell = new;
                }
            }
        }
    }

    /// Append every row of `other`, aligning its columns to this table's
    /// headers by name. Columns present only in `other` are appended to the
    /// header set; cells with no source value become empty.
    pub fn concat(&mut self, other: &Table) {
        for h in &other.headers {
            if self.col(h).is_none() {
                let blank = vec![String::new(); self.rows.len()];
                self.push_column(h.clone(), blank);
            }
        }
        let width = self.headers.len();
        let mapping: Vec<Option<usize>> =
            self.headers.iter().map(|h| other.col(h)).collect();
        for src in &other.rows {
            let mut row = Vec::with_capacity(width);
            for m in &mapping {
                row.push(match m {
                    Some(i) => src.get(*i).cloned().unwrap_or_default(),
                    None => String::new(),
                });
            }
            self.rows.push(row);
        }
    }
}
