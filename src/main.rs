use anyhow::{bail, Result};
use supplemeter::{CleanStage, Collector, MergeStage};

const SUBREDDIT: &str = "Supplements";
const LIMIT: usize = 1000;

fn main() -> Result<()> {
    let stage = std::env::args().nth(1).unwrap_or_else(|| "clean".to_string());

    match stage.as_str() {
        "collect" => {
            let report = Collector::new()
                .subreddit(SUBREDDIT)
                .limit(LIMIT)
                .run()?;
            println!(
                "Collected {} submissions, {} comments ({} skipped)",
                report.submissions, report.comments, report.skipped
            );
        }
        "clean" => {
            let report = CleanStage::new().run()?;
            println!(
                "Cleaned {} rows ({} duplicates dropped, {} contain '[removed]')",
                report.rows_out, report.duplicates_removed, report.removed_marker_rows
            );
        }
        "merge" => {
            let report = MergeStage::new().run()?;
            println!(
                "Merged {} + {} rows into {} ({} duplicates, {} bot rows dropped, {} gained)",
                report.rows_in_a,
                report.rows_in_b,
                report.rows_out,
                report.duplicates_removed,
                report.bot_rows_removed,
                report.rows_gained()
            );
        }
        other => bail!("unknown stage '{}': expected collect, clean, or merge", other),
    }
    Ok(())
}
