//! Audit output for a run: one CSV row per decision plus a summary table

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::runner::{Assignment, Summary};

const REPORTS_DIR: &str = "reports";

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: i64,
    title: &'a str,
    old_url: &'a str,
    new_url: &'a str,
    reason: &'a str,
    source: &'a str,
    outcome: &'a str,
    error: &'a str,
}

impl<'a> From<&'a Assignment> for ReportRow<'a> {
    fn from(a: &'a Assignment) -> Self {
        Self {
            id: a.id,
            title: &a.title,
            old_url: a.old_url.as_deref().unwrap_or(""),
            new_url: &a.new_url,
            reason: &a.reason,
            source: &a.source,
            outcome: a.outcome.as_str(),
            error: a.error.as_deref().unwrap_or(""),
        }
    }
}

/// `reports/image-fix-<timestamp>.csv`
pub fn default_report_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(REPORTS_DIR).join(format!("image-fix-{}.csv", stamp))
}

/// Write every assignment of the run to `path` as CSV
pub fn write_report(path: &Path, assignments: &[Assignment]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    for assignment in assignments {
        writer.serialize(ReportRow::from(assignment))?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the end-of-run table
pub fn print_summary(summary: &Summary, dry_run: bool) {
    let first_label = if dry_run { "Planned" } else { "Updated" };
    let first_count = if dry_run {
        summary.planned_count()
    } else {
        summary.updated_count
    };

    println!();
    println!("┌──────────┬──────────┐");
    println!("│ {:<8} │ {:>8} │", first_label, first_count);
    println!("│ {:<8} │ {:>8} │", "Skipped", summary.skipped_count);
    println!("│ {:<8} │ {:>8} │", "Failed", summary.failed_ids.len());
    println!("└──────────┴──────────┘");
    if !summary.failed_ids.is_empty() {
        let ids: Vec<String> = summary.failed_ids.iter().map(|id| id.to_string()).collect();
        println!("Failed grant ids: {}", ids.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Outcome;

    fn assignment(id: i64, outcome: Outcome, error: Option<&str>) -> Assignment {
        Assignment {
            id,
            title: format!("Grant, number {}", id),
            old_url: None,
            new_url: format!("https://img.test/{}.jpg", id),
            reason: "missing".to_string(),
            source: "pool:energy".to_string(),
            outcome,
            error: error.map(String::from),
        }
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.csv");
        let rows = vec![
            assignment(1, Outcome::Updated, None),
            assignment(2, Outcome::Failed, Some("HTTP 500")),
        ];
        write_report(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "title", "old_url", "new_url", "reason", "source", "outcome", "error"]
        );
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "Grant, number 1");
        assert_eq!(&records[0][6], "updated");
        assert_eq!(&records[1][7], "HTTP 500");
    }

    #[test]
    fn test_default_report_path() {
        let path = default_report_path();
        assert!(path.starts_with(REPORTS_DIR));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));
    }
}
