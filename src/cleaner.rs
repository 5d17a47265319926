//! Clean stage: one raw scrape CSV in, three CSVs out
//! (cleaned, removed-marker subset, final).

use crate::config::CleanOptions;
use crate::date::derive_timestamp;
use crate::decode::decode_entities;
use crate::dedupe::dedup_exact;
use crate::filters::removed_marker_rows;
use crate::mojibake::fix_text;
use crate::progress::ProgressScope;
use crate::table::Table;
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use std::path::Path;

/// Row accounting for one clean run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub removed_marker_rows: usize,
    pub rows_out: usize,
}

/// Builder facade over [`CleanOptions`].
#[derive(Clone, Default)]
pub struct CleanStage {
    opts: CleanOptions,
}

impl CleanStage {
    pub fn new() -> Self {
        Self { opts: CleanOptions::default() }
    }

    // -------- Builder methods --------
    pub fn input(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input(path); self }
    pub fn cleaned_out(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_cleaned_out(path); self }
    pub fn removed_out(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_removed_out(path); self }
    pub fn final_out(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_final_out(path); self }
    pub fn text_columns<I, S>(mut self, cols: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> { self.opts = self.opts.with_text_columns(cols); self }
    pub fn timestamp_column(mut self, name: impl Into<String>) -> Self { self.opts = self.opts.with_timestamp_column(name); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }

    /// Run the fixed transform sequence: dedup → entity-decode text columns →
    /// derive the timestamp column → capture `[removed]` rows → mojibake-repair
    /// every column → write all three outputs.
    pub fn run(self) -> Result<CleanReport> {
        init_tracing_once();
        let opts = self.opts;

        let mut table = Table::load(&opts.input)
            .with_context(|| format!("load {}", opts.input.display()))?;
        let rows_in = table.len();
        tracing::info!(rows = rows_in, input = %opts.input.display(), "loaded raw CSV");

        let duplicates_removed = dedup_exact(&mut table);
        tracing::info!(removed = duplicates_removed, remaining = table.len(), "deduplicated");

        let pb = ProgressScope::count(opts.progress, "Cleaning rows", table.len() as u64);

        table.map_columns(&opts.text_columns, |cell| {
            let decoded = decode_entities(cell);
            (decoded != cell).then_some(decoded)
        });

        if let Some(idx) = table.col("created_utc") {
            let derived: Vec<String> = table
                .rows
                .iter()
                .map(|row| {
                    pb.inc(1);
                    derive_timestamp(&row[idx])
                })
                .collect();
            table.push_column(opts.timestamp_column.clone(), derived);
        } else {
            tracing::warn!("no created_utc column; skipping timestamp derivation");
        }
        pb.finish("rows cleaned");

        // Captured before the repair pass: the removed-only file carries
        // decoded but not yet mojibake-repaired text.
        let removed = removed_marker_rows(&table, "text");
        tracing::info!(rows = removed.len(), "rows containing the [removed] marker");

        table.map_all(|cell| {
            let fixed = fix_text(cell);
            (fixed != cell).then_some(fixed)
        });

        table.store(&opts.cleaned_out)
            .with_context(|| format!("write {}", opts.cleaned_out.display()))?;
        removed.store(&opts.removed_out)
            .with_context(|| format!("write {}", opts.removed_out.display()))?;
        table.store(&opts.final_out)
            .with_context(|| format!("write {}", opts.final_out.display()))?;

        tracing::info!(
            cleaned = %opts.cleaned_out.display(),
            removed = %opts.removed_out.display(),
            final_out = %opts.final_out.display(),
            "clean stage complete"
        );

        Ok(CleanReport {
            rows_in,
            duplicates_removed,
            removed_marker_rows: removed.len(),
            rows_out: table.len(),
        })
    }
}
