#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Header of a raw scrape CSV, as the Collector writes it.
pub const HEADERS: [&str; 13] = [
    "type", "id", "parent_id", "score", "title", "upvote_ratio", "comment_depth",
    "text", "author", "created_utc", "num_comments", "flair", "url",
];

/// Fresh temp dir promoted to a plain path (lives until the test process exits).
pub fn temp_base() -> PathBuf {
    tempfile::tempdir().unwrap().into_path()
}

/// Write a CSV file with the given header and rows.
pub fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut w = csv::Writer::from_path(path).unwrap();
    w.write_record(headers).unwrap();
    for row in rows {
        w.write_record(row).unwrap();
    }
    w.flush().unwrap();
}

/// Read a CSV file back as (headers, rows).
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .unwrap();
    let headers = rdr.headers().unwrap().iter().map(|h| h.to_string()).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
        .collect();
    (headers, rows)
}

/// A full raw record row. Only the fields a test cares about vary; the rest
/// hold plausible constants.
pub fn submission_row<'a>(
    id: &'a str,
    title: &'a str,
    text: &'a str,
    author: &'a str,
    created_utc: &'a str,
) -> Vec<&'a str> {
    vec![
        "submission", id, "", "12", title, "0.97", "", text, author, created_utc, "3", "",
        "https://www.reddit.com/r/Supplements/",
    ]
}

/// Column value for `name` in `row`, resolved against `headers`.
pub fn cell<'a>(headers: &[String], row: &'a [String], name: &str) -> &'a str {
    let idx = headers.iter().position(|h| h == name).unwrap();
    &row[idx]
}
