// Reporter, tabular half: persists the collected records to a CSV file,
// reads that file back, coerces the count columns to integers and sorts
// rows by popularity. The write-then-reload round trip is deliberate: a
// saved report can be re-rendered without hitting the API again.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One collected video as produced by the collector. Counts are still the
/// API's decimal strings at this point ("0" when the field was absent).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub title: String,
    pub view_count: String,
    pub like_count: String,
}

/// One reloaded row with counts coerced to integers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub title: String,
    pub view_count: u64,
    pub like_count: u64,
}

/// Write the records to `path` as CSV: header row
/// `title,view_count,like_count`, one row per record, no index column.
pub fn write_csv<P: AsRef<Path>>(records: &[VideoRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV writer for {}", path.display()))?;
    wtr.write_record(["title", "view_count", "like_count"])?;
    for record in records {
        wtr.write_record([
            record.title.as_str(),
            record.view_count.as_str(),
            record.like_count.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reload a report file, coercing both count columns to integers. Any
/// non-numeric count value is a data error and fails the whole load. Row
/// order follows the file.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ReportRow>> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open report file {}", path.display()))?;
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: ReportRow =
            result.with_context(|| format!("Invalid row in report file {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Sort rows by view count, most viewed first. `sort_by` is stable, so
/// rows with equal view counts keep their file order.
pub fn sort_by_views(rows: &mut [ReportRow]) {
    rows.sort_by(|a, b| b.view_count.cmp(&a.view_count));
}

/// Echo the collected table to stdout, one aligned line per record.
pub fn print_table(records: &[VideoRecord]) {
    println!("{:<60} {:>12} {:>12}", "title", "view_count", "like_count");
    for record in records {
        println!(
            "{:<60} {:>12} {:>12}",
            record.title, record.view_count, record.like_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("yt_report_test_{}_{}.csv", std::process::id(), name))
    }

    fn record(title: &str, views: &str, likes: &str) -> VideoRecord {
        VideoRecord {
            title: title.to_string(),
            view_count: views.to_string(),
            like_count: likes.to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_titles_and_counts() {
        let path = temp_path("round_trip");
        let records = vec![
            record("first, with a comma", "100", "10"),
            record("second", "2500", "0"),
            record("third \"quoted\"", "7", "3"),
        ];
        write_csv(&records, &path).unwrap();

        let rows = load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rows.len(), records.len());
        assert_eq!(rows[0].title, "first, with a comma");
        assert_eq!(rows[0].view_count, 100);
        assert_eq!(rows[0].like_count, 10);
        assert_eq!(rows[1].view_count, 2500);
        assert_eq!(rows[1].like_count, 0);
        assert_eq!(rows[2].title, "third \"quoted\"");
        assert_eq!(rows[2].view_count, 7);
    }

    #[test]
    fn header_row_matches_contract() {
        let path = temp_path("header");
        write_csv(&[record("only", "1", "1")], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(contents.starts_with("title,view_count,like_count\n"));
    }

    #[test]
    fn non_numeric_count_fails_the_load() {
        let path = temp_path("non_numeric");
        std::fs::write(&path, "title,view_count,like_count\nbad,many,5\n").unwrap();

        let result = load_csv(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut rows = vec![
            ReportRow { title: "low".into(), view_count: 5, like_count: 1 },
            ReportRow { title: "tie a".into(), view_count: 50, like_count: 2 },
            ReportRow { title: "high".into(), view_count: 900, like_count: 3 },
            ReportRow { title: "tie b".into(), view_count: 50, like_count: 4 },
        ];
        sort_by_views(&mut rows);

        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "tie a", "tie b", "low"]);
        for pair in rows.windows(2) {
            assert!(pair[0].view_count >= pair[1].view_count);
        }
    }

    #[test]
    fn zero_string_default_loads_as_zero() {
        let path = temp_path("zero_default");
        write_csv(&[record("likes hidden", "1234", "0")], &path).unwrap();

        let rows = load_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(rows[0].like_count, 0);
        assert_eq!(rows[0].view_count, 1234);
    }
}
