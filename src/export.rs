//! CSV export
//!
//! Writes synthesized series and derived monthly records as CSV for use in
//! spreadsheets. Column names match the JSON field names.

use crate::engine::{MonthlyPerformance, RevenueBreakdown, TimeSeriesPoint};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Write `rows` as CSV with a header row, returning the number of records
///
/// The header is derived from the first record, so an empty slice produces
/// empty output.
pub fn write_csv<T: Serialize, W: Write>(rows: &[T], writer: W) -> ExportResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

/// Export monthly performance records
pub fn write_performance_csv<W: Write>(
    rows: &[MonthlyPerformance],
    writer: W,
) -> ExportResult<usize> {
    write_csv(rows, writer)
}

/// Export a revenue/profit breakdown
pub fn write_breakdown_csv<W: Write>(rows: &[RevenueBreakdown], writer: W) -> ExportResult<usize> {
    write_csv(rows, writer)
}

/// Export a raw monthly series
pub fn write_series_csv<W: Write>(series: &[TimeSeriesPoint], writer: W) -> ExportResult<usize> {
    write_csv(series, writer)
}

/// Export records to a file, creating parent directories as needed
pub fn export_to_path<T: Serialize>(rows: &[T], path: &Path) -> ExportResult<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let written = write_csv(rows, File::create(path)?)?;
    tracing::info!(path = %path.display(), records = written, "Exported CSV");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{monthly_performance, ProfitSplit, SalesOverTime};
    use chrono::NaiveDate;

    fn point(month: u32, value: u64) -> TimeSeriesPoint {
        TimeSeriesPoint::new(NaiveDate::from_ymd_opt(2024, month, 1).unwrap(), value)
    }

    #[test]
    fn test_series_csv() {
        let mut out = Vec::new();
        let written = write_series_csv(&[point(1, 125_000), point(2, 131_250)], &mut out).unwrap();

        assert_eq!(written, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "date,value,label\n2024-01-01,125000,Jan 2024\n2024-02-01,131250,Feb 2024\n"
        );
    }

    #[test]
    fn test_performance_csv_header() {
        let sales = SalesOverTime::new(vec![point(3, 100_000)], vec![point(3, 850)]).unwrap();
        let rows = monthly_performance(&sales, &ProfitSplit::default());

        let mut out = Vec::new();
        write_performance_csv(&rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,revenue,profit,expenses,orders,profitMargin")
        );
        assert_eq!(lines.next(), Some("Mar,100000,35000,65000,850,35.0"));
    }

    #[test]
    fn test_empty_export() {
        let mut out = Vec::new();
        assert_eq!(write_series_csv(&[], &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("series.csv");

        let written = export_to_path(&[point(5, 10)], &path).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("date,value,label\n"));
    }
}
