mod config;
mod table;
mod decode;
mod mojibake;
mod dedupe;
mod date;
mod filters;

mod progress;
mod util;

mod collector;
mod cleaner;
mod merger;

pub use crate::config::{CleanOptions, CollectOptions, MergeOptions, BOT_AUTHOR, DEFAULT_TEXT_COLUMNS, RAW_HEADERS};
pub use crate::table::Table;

pub use crate::collector::{flatten_comment_forest, CollectReport, Collector};
pub use crate::cleaner::{CleanReport, CleanStage};
pub use crate::merger::{MergeReport, MergeStage};

// Expose the row/text transforms so application code can run them piecemeal.
pub use crate::date::{derive_timestamp, format_utc, parse_epoch_seconds};
pub use crate::decode::decode_entities;
pub use crate::dedupe::dedup_exact;
pub use crate::filters::{drop_author, removed_marker_rows, REMOVED_MARKER};
pub use crate::mojibake::fix_text;

// Expose progress helpers for binaries that drive multiple stages.
pub use crate::progress::{make_count_progress, ProgressScope};
