//! Merge stage: two already-cleaned CSVs in, one merged CSV out.

use crate::config::MergeOptions;
use crate::date::derive_timestamp;
use crate::dedupe::dedup_exact;
use crate::filters::drop_author;
use crate::mojibake::fix_text;
use crate::progress::ProgressScope;
use crate::table::Table;
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use std::path::Path;

/// Row accounting for one merge run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub rows_in_a: usize,
    pub rows_in_b: usize,
    pub duplicates_removed: usize,
    pub bot_rows_removed: usize,
    pub rows_out: usize,
}

impl MergeReport {
    /// Rows gained over the larger input, the stat the old pipeline printed.
    pub fn rows_gained(&self) -> i64 {
        self.rows_out as i64 - self.rows_in_a.max(self.rows_in_b) as i64
    }
}

/// Builder facade over [`MergeOptions`].
#[derive(Clone, Default)]
pub struct MergeStage {
    opts: MergeOptions,
}

impl MergeStage {
    pub fn new() -> Self {
        Self { opts: MergeOptions::default() }
    }

    // -------- Builder methods --------
    pub fn input_a(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input_a(path); self }
    pub fn input_b(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input_b(path); self }
    pub fn output(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output(path); self }
    pub fn exclude_author(mut self, author: impl Into<String>) -> Self { self.opts = self.opts.with_exclude_author(author); self }
    pub fn timestamp_column(mut self, name: impl Into<String>) -> Self { self.opts = self.opts.with_timestamp_column(name); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }

    /// Run the fixed transform sequence: concat → dedup → drop the bot author
    /// → mojibake-repair every column → derive the timestamp column → write.
    pub fn run(self) -> Result<MergeReport> {
        init_tracing_once();
        let opts = self.opts;

        let mut merged = Table::load(&opts.input_a)
            .with_context(|| format!("load {}", opts.input_a.display()))?;
        let other = Table::load(&opts.input_b)
            .with_context(|| format!("load {}", opts.input_b.display()))?;
        let rows_in_a = merged.len();
        let rows_in_b = other.len();
        merged.concat(&other);
        tracing::info!(rows_a = rows_in_a, rows_b = rows_in_b, total = merged.len(), "concatenated inputs");

        let duplicates_removed = dedup_exact(&mut merged);
        let bot_rows_removed = drop_author(&mut merged, "author", &opts.exclude_author);
        tracing::info!(
            duplicates = duplicates_removed,
            bot_rows = bot_rows_removed,
            remaining = merged.len(),
            "deduplicated and filtered"
        );

        let pb = ProgressScope::count(opts.progress, "Merging rows", merged.len() as u64);
        merged.map_all(|cell| {
            let fixed = fix_text(cell);
            (fixed != cell).then_some(fixed)
        });

        if let Some(idx) = merged.col("created_utc") {
            let derived: Vec<String> = merged
                .rows
                .iter()
                .map(|row| {
                    pb.inc(1);
                    derive_timestamp(&row[idx])
                })
                .collect();
            merged.push_column(opts.timestamp_column.clone(), derived);
        } else {
            tracing::warn!("no created_utc column; skipping timestamp derivation");
        }
        pb.finish("rows merged");

        merged.store(&opts.output)
            .with_context(|| format!("write {}", opts.output.display()))?;

        let report = MergeReport {
            rows_in_a,
            rows_in_b,
            duplicates_removed,
            bot_rows_removed,
            rows_out: merged.len(),
        };
        tracing::info!(
            rows_out = report.rows_out,
            gained = report.rows_gained(),
            lost = report.duplicates_removed + report.bot_rows_removed,
            output = %opts.output.display(),
            "merge stage complete"
        );
        Ok(report)
    }
}
