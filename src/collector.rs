//! Collect stage: enumerate newest self-posts of one subreddit via Reddit's
//! public JSON listing and flatten each post plus its comment tree into CSV
//! rows. Rows are appended as they are fetched, so an interrupted run leaves
//! a partially populated file rather than nothing.

use crate::config::{CollectOptions, RAW_HEADERS};
use crate::progress::ProgressScope;
use crate::util::{create_with_backoff, init_tracing_once};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

/// Placeholder for accounts Reddit reports as deleted.
const DELETED_AUTHOR: &str = "[deleted]";
/// Listing page size cap imposed by the API.
const PAGE_SIZE: usize = 100;

/// Item accounting for one collect run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub submissions: usize,
    pub comments: usize,
    pub skipped: usize,
}

/// Builder facade over [`CollectOptions`].
#[derive(Clone, Default)]
pub struct Collector {
    opts: CollectOptions,
}

impl Collector {
    pub fn new() -> Self {
        Self { opts: CollectOptions::default() }
    }

    // -------- Builder methods --------
    pub fn subreddit(mut self, sub: impl AsRef<str>) -> Self { self.opts = self.opts.with_subreddit(sub); self }
    pub fn limit(mut self, n: usize) -> Self { self.opts = self.opts.with_limit(n); self }
    pub fn out_path(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_out_path(path); self }
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self { self.opts = self.opts.with_user_agent(ua); self }
    pub fn page_delay_ms(mut self, ms: u64) -> Self { self.opts = self.opts.with_page_delay_ms(ms); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }

    pub fn run(self) -> Result<CollectReport> {
        init_tracing_once();
        let opts = self.opts;

        let client = Client::builder()
            .user_agent(opts.user_agent.clone())
            .build()
            .context("build HTTP client")?;

        let file = create_with_backoff(&opts.out_path, 16, 50)
            .with_context(|| format!("create {}", opts.out_path.display()))?;
        let mut w = csv::Writer::from_writer(file);
        w.write_record(RAW_HEADERS)?;
        w.flush()?;

        tracing::info!(
            subreddit = %opts.subreddit,
            limit = opts.limit,
            "collecting newest submissions"
        );
        let pb = ProgressScope::count(opts.progress, "Fetching submissions", opts.limit as u64);

        let mut report = CollectReport::default();
        let mut seen = 0usize;
        let mut after: Option<String> = None;

        'pages: loop {
            let page = match fetch_listing_page(&client, &opts.subreddit, after.as_deref()) {
                Ok(p) => p,
                Err(e) => {
                    // Single best-effort attempt per page; a dead page ends
                    // the run with whatever was already written.
                    tracing::warn!(error = %e, "listing page fetch failed; stopping");
                    break;
                }
            };

            for submission in &page.children {
                if seen >= opts.limit {
                    break 'pages;
                }
                seen += 1;
                pb.inc(1);

                match write_submission(&client, &mut w, submission) {
                    Ok(Some(n_comments)) => {
                        report.submissions += 1;
                        report.comments += n_comments;
                    }
                    Ok(None) => {} // link post, not collected
                    Err(e) => {
                        report.skipped += 1;
                        let id = str_field(submission, "id");
                        tracing::warn!(id = %id, error = %e, "skipping submission");
                    }
                }
            }

            after = page.after;
            if after.is_none() {
                break;
            }
            sleep(Duration::from_millis(opts.page_delay_ms));
        }

        w.flush()?;
        pb.finish("collection done");
        tracing::info!(
            submissions = report.submissions,
            comments = report.comments,
            skipped = report.skipped,
            output = %opts.out_path.display(),
            "collect stage complete"
        );
        Ok(report)
    }
}

struct ListingPage {
    children: Vec<Value>,
    after: Option<String>,
}

fn fetch_listing_page(client: &Client, subreddit: &str, after: Option<&str>) -> Result<ListingPage> {
    let url = format!("https://www.reddit.com/r/{}/new.json", subreddit);
    let mut query: Vec<(&str, String)> = vec![("limit", PAGE_SIZE.to_string())];
    if let Some(a) = after {
        query.push(("after", a.to_string()));
    }
    let body: Value = client
        .get(&url)
        .query(&query)
        .send()
        .with_context(|| format!("GET {}", url))?
        .error_for_status()
        .with_context(|| format!("GET {}", url))?
        .json()
        .context("parse listing JSON")?;

    let data = body.get("data").ok_or_else(|| anyhow!("listing has no data object"))?;
    let children = data
        .get("children")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| (c.get("kind").and_then(Value::as_str) == Some("t3")).then(|| c["data"].clone()))
        .collect();
    let after = data.get("after").and_then(Value::as_str).map(|s| s.to_string());
    Ok(ListingPage { children, after })
}

/// Write one self-post plus its flattened comment tree. Returns the comment
/// count written, or `None` when the post is a link post and excluded. A
/// comments fetch failure is contained: the submission row stays, its
/// comments are omitted.
fn write_submission(client: &Client, w: &mut csv::Writer<std::fs::File>, sub: &Value) -> Result<Option<usize>> {
    if sub.get("is_self").and_then(Value::as_bool) != Some(true) {
        return Ok(None);
    }
    let id = str_field(sub, "id");

    w.write_record(&[
        "submission".to_string(),
        id.clone(),
        String::new(),
        str_field(sub, "score"),
        str_field(sub, "title"),
        str_field(sub, "upvote_ratio"),
        String::new(),
        str_field(sub, "selftext"),
        author_field(sub),
        str_field(sub, "created_utc"),
        str_field(sub, "num_comments"),
        str_field(sub, "link_flair_text"),
        str_field(sub, "url"),
    ])?;

    let mut n_comments = 0usize;
    match fetch_comment_tree(client, &id) {
        Ok(comments) => {
            for c in &comments {
                w.write_record(&[
                    "comment".to_string(),
                    str_field(c, "id"),
                    id.clone(),
                    str_field(c, "score"),
                    String::new(),
                    String::new(),
                    str_field(c, "depth"),
                    str_field(c, "body"),
                    author_field(c),
                    str_field(c, "created_utc"),
                    String::new(),
                    str_field(c, "author_flair_text"),
                    String::new(),
                ])?;
                n_comments += 1;
            }
        }
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "comments fetch failed; submission kept without comments");
        }
    }

    w.flush()?;
    Ok(Some(n_comments))
}

/// Fetch `/comments/<id>.json` and flatten the tree depth-first. Unresolved
/// "more" placeholders are dropped without a follow-up fetch.
fn fetch_comment_tree(client: &Client, submission_id: &str) -> Result<Vec<Value>> {
    let url = format!("https://www.reddit.com/comments/{}.json", submission_id);
    let body: Value = client
        .get(&url)
        .query(&[("limit", "500")])
        .send()
        .with_context(|| format!("GET {}", url))?
        .error_for_status()
        .with_context(|| format!("GET {}", url))?
        .json()
        .context("parse comments JSON")?;

    // Response is [post listing, comment listing].
    let forest = body
        .get(1)
        .and_then(|l| l.get("data"))
        .and_then(|d| d.get("children"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(flatten_comment_forest(&forest))
}

/// Flatten a listing's comment forest depth-first into the bare comment data
/// objects, dropping anything that is not a `t1` node (notably unresolved
/// "more" placeholders).
pub fn flatten_comment_forest(forest: &[Value]) -> Vec<Value> {
    let mut out = Vec::new();
    for node in forest {
        flatten_comments(node, &mut out);
    }
    out
}

fn flatten_comments(node: &Value, out: &mut Vec<Value>) {
    if node.get("kind").and_then(Value::as_str) != Some("t1") {
        return;
    }
    let Some(data) = node.get("data") else {
        return;
    };
    out.push(data.clone());
    // "replies" is an empty string on leaves, a listing object otherwise.
    if let Some(children) = data
        .get("replies")
        .and_then(|r| r.get("data"))
        .and_then(|d| d.get("children"))
        .and_then(Value::as_array)
    {
        for child in children {
            flatten_comments(child, out);
        }
    }
}

/// Render one JSON field as CSV text: strings verbatim, numbers via their
/// JSON form, absent/null as empty.
fn str_field(v: &Value, key: &str) -> String {
    match v.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn author_field(v: &Value) -> String {
    match v.get("author").and_then(Value::as_str) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => DELETED_AUTHOR.to_string(),
    }
}
