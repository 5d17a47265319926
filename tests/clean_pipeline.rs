#[path = "common/mod.rs"]
mod common;

use common::*;
use supplemeter::CleanStage;

/// Full clean run over a small raw CSV:
/// - two byte-identical rows collapse to one
/// - a row whose text contains "[REMOVED]" (any case) lands in the removed-only
///   output AND stays in the main cleaned output
/// - a row with garbage `created_utc` is retained with an empty timestamp
/// - valid `created_utc` renders as a UTC timestamp string
#[test]
fn clean_dedups_splits_and_derives_timestamps() {
    let base = temp_base();
    let input = base.join("old_submissions.csv");
    let cleaned = base.join("cleaned_old_submissions.csv");
    let removed = base.join("removed_old_subs.csv");
    let final_out = base.join("cleaned_reddit_old_submissions.csv");

    write_csv(
        &input,
        &HEADERS,
        &[
            submission_row("s1", "Creatine timing", "daily, with food", "alice", "1136073600"),
            submission_row("s1", "Creatine timing", "daily, with food", "alice", "1136073600"),
            submission_row("s2", "Mod note", "This comment was [REMOVED] by mod", "bob", "1136075600.0"),
            submission_row("s3", "No timestamp", "plain text", "carol", "not-a-number"),
        ],
    );

    let report = CleanStage::new()
        .input(&input)
        .cleaned_out(&cleaned)
        .removed_out(&removed)
        .final_out(&final_out)
        .progress(false)
        .run()
        .unwrap();

    assert_eq!(report.rows_in, 4);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.removed_marker_rows, 1);
    assert_eq!(report.rows_out, 3);

    let (headers, rows) = read_csv(&cleaned);
    assert_eq!(headers.last().map(String::as_str), Some("created_datetime"));
    assert_eq!(rows.len(), 3, "dedup keeps one of the identical rows");

    // Marker row is informational only: still present in the main output.
    assert!(rows.iter().any(|r| cell(&headers, r, "id") == "s2"));

    let s1 = rows.iter().find(|r| cell(&headers, r, "id") == "s1").unwrap();
    assert_eq!(cell(&headers, s1, "created_datetime"), "2006-01-01 00:00:00+00:00");

    // Fractional epoch seconds truncate to whole seconds.
    let s2 = rows.iter().find(|r| cell(&headers, r, "id") == "s2").unwrap();
    assert_eq!(cell(&headers, s2, "created_datetime"), "2006-01-01 00:33:20+00:00");

    // Garbage timestamp: row retained, derived value empty.
    let s3 = rows.iter().find(|r| cell(&headers, r, "id") == "s3").unwrap();
    assert_eq!(cell(&headers, s3, "created_datetime"), "");

    // Removed-only output holds exactly the marker row.
    let (rh, rrows) = read_csv(&removed);
    assert_eq!(rrows.len(), 1);
    assert_eq!(cell(&rh, &rrows[0], "id"), "s2");

    // Final output is a second copy of the cleaned table.
    let (_, frows) = read_csv(&final_out);
    assert_eq!(frows, rows);
}

/// Entity decoding hits the text-bearing columns: percent escapes first, HTML
/// entities second. Other columns pass through untouched.
#[test]
fn clean_decodes_percent_and_html_entities() {
    let base = temp_base();
    let input = base.join("old_submissions.csv");

    write_csv(
        &input,
        &HEADERS,
        &[submission_row(
            "s1",
            "Vitamin%20D &amp; Zinc",
            "it&#39;s cheap",
            "alice",
            "1136073600",
        )],
    );

    CleanStage::new()
        .input(&input)
        .cleaned_out(&base.join("cleaned.csv"))
        .removed_out(&base.join("removed.csv"))
        .final_out(&base.join("final.csv"))
        .progress(false)
        .run()
        .unwrap();

    let (headers, rows) = read_csv(&base.join("cleaned.csv"));
    assert_eq!(cell(&headers, &rows[0], "title"), "Vitamin D & Zinc");
    assert_eq!(cell(&headers, &rows[0], "text"), "it's cheap");
    assert_eq!(cell(&headers, &rows[0], "author"), "alice");
}

/// Mojibake repair runs over every column as the last pass before writing.
#[test]
fn clean_repairs_mojibake_in_all_columns() {
    let base = temp_base();
    let input = base.join("old_submissions.csv");

    write_csv(
        &input,
        &HEADERS,
        &[submission_row(
            "s1",
            "CoQ10 â€” worth it?",
            "creatine Ã©tude",
            "josÃ©",
            "1136073600",
        )],
    );

    CleanStage::new()
        .input(&input)
        .cleaned_out(&base.join("cleaned.csv"))
        .removed_out(&base.join("removed.csv"))
        .final_out(&base.join("final.csv"))
        .progress(false)
        .run()
        .unwrap();

    let (headers, rows) = read_csv(&base.join("cleaned.csv"));
    assert_eq!(cell(&headers, &rows[0], "title"), "CoQ10 — worth it?");
    assert_eq!(cell(&headers, &rows[0], "text"), "creatine étude");
    // Repair is not limited to the configured text columns.
    assert_eq!(cell(&headers, &rows[0], "author"), "josé");
}

/// A missing input file aborts the stage and produces no output (taxonomy (a)).
#[test]
fn clean_missing_input_is_fatal() {
    let base = temp_base();
    let cleaned = base.join("cleaned.csv");

    let err = CleanStage::new()
        .input(base.join("does_not_exist.csv"))
        .cleaned_out(&cleaned)
        .removed_out(&base.join("removed.csv"))
        .final_out(&base.join("final.csv"))
        .progress(false)
        .run();

    assert!(err.is_err());
    assert!(!cleaned.exists(), "failed stage must not leave partial output");
}
