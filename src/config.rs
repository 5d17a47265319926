use std::path::{Path, PathBuf};

/// Column order of a raw scrape CSV. The Cleaner and Merger treat these as
/// plain text and only ever append derived columns after them.
pub const RAW_HEADERS: [&str; 13] = [
    "type",
    "id",
    "parent_id",
    "score",
    "title",
    "upvote_ratio",
    "comment_depth",
    "text",
    "author",
    "created_utc",
    "num_comments",
    "flair",
    "url",
];

/// Columns that carry user-entered text and go through entity decoding.
pub const DEFAULT_TEXT_COLUMNS: [&str; 3] = ["title", "text", "url"];

/// Bot account dropped from merged output (exact, case-sensitive match).
pub const BOT_AUTHOR: &str = "AutoModerator";

/// Options for the collect stage with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct CollectOptions {
    pub subreddit: String,          // no "r/" prefix
    pub limit: usize,               // newest-N submissions to enumerate
    pub out_path: PathBuf,
    pub user_agent: String,
    pub page_delay_ms: u64,         // polite pause between listing pages
    pub progress: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            subreddit: "Supplements".to_string(),
            limit: 1000,
            out_path: PathBuf::from("reddit_supplements_new.csv"),
            user_agent: "supplemeter/0.1".to_string(),
            page_delay_ms: 1_000,
            progress: true,
        }
    }
}

impl CollectOptions {
    pub fn with_subreddit(mut self, sub: impl AsRef<str>) -> Self {
        let s = sub.as_ref().trim();
        self.subreddit = s.strip_prefix("r/").unwrap_or(s).to_string();
        self
    }
    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = n.max(1);
        self
    }
    pub fn with_out_path(mut self, path: impl AsRef<Path>) -> Self {
        self.out_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }
    pub fn with_page_delay_ms(mut self, ms: u64) -> Self {
        self.page_delay_ms = ms;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}

/// Options for the clean stage.
#[derive(Clone, Debug)]
pub struct CleanOptions {
    pub input: PathBuf,
    pub cleaned_out: PathBuf,
    pub removed_out: PathBuf,
    pub final_out: PathBuf,
    pub text_columns: Vec<String>,    // columns given the entity-decode pass
    pub timestamp_column: String,     // derived column name
    pub progress: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("old_submissions.csv"),
            cleaned_out: PathBuf::from("cleaned_old_submissions.csv"),
            removed_out: PathBuf::from("removed_old_subs.csv"),
            final_out: PathBuf::from("cleaned_reddit_old_submissions.csv"),
            text_columns: DEFAULT_TEXT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            timestamp_column: "created_datetime".to_string(),
            progress: true,
        }
    }
}

impl CleanOptions {
    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = path.as_ref().to_path_buf();
        self
    }
    pub fn with_cleaned_out(mut self, path: impl AsRef<Path>) -> Self {
        self.cleaned_out = path.as_ref().to_path_buf();
        self
    }
    pub fn with_removed_out(mut self, path: impl AsRef<Path>) -> Self {
        self.removed_out = path.as_ref().to_path_buf();
        self
    }
    pub fn with_final_out(mut self, path: impl AsRef<Path>) -> Self {
        self.final_out = path.as_ref().to_path_buf();
        self
    }
    pub fn with_text_columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_columns = cols.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}

/// Options for the merge stage.
#[derive(Clone, Debug)]
pub struct MergeOptions {
    pub input_a: PathBuf,
    pub input_b: PathBuf,
    pub output: PathBuf,
    pub exclude_author: String,       // exact, case-sensitive
    pub timestamp_column: String,     // derived column name
    pub progress: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            input_a: PathBuf::from("cleaned_reddit_old_comments.csv"),
            input_b: PathBuf::from("cleaned_reddit_old_submissions.csv"),
            output: PathBuf::from("merged_supplements_old_data.csv"),
            exclude_author: BOT_AUTHOR.to_string(),
            timestamp_column: "date_time".to_string(),
            progress: true,
        }
    }
}

impl MergeOptions {
    pub fn with_input_a(mut self, path: impl AsRef<Path>) -> Self {
        self.input_a = path.as_ref().to_path_buf();
        self
    }
    pub fn with_input_b(mut self, path: impl AsRef<Path>) -> Self {
        self.input_b = path.as_ref().to_path_buf();
        self
    }
    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = path.as_ref().to_path_buf();
        self
    }
    pub fn with_exclude_author(mut self, author: impl Into<String>) -> Self {
        self.exclude_author = author.into();
        self
    }
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}
