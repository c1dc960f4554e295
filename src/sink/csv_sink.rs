use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::ScrapeError;
use crate::model::course_record::CourseRecord;
use crate::sink::{RecordSink, SinkReport};

pub const DEFAULT_CSV_PATH: &str = "course_data.csv";

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Cells in [`CourseRecord::COLUMNS`] order. Null is an empty cell; outcomes are a JSON array.
fn record_cells(record: &CourseRecord) -> Result<Vec<String>, ScrapeError> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    Ok(vec![
        record.course_code.clone(),
        record.course_name.clone(),
        text(&record.course_description),
        text(&record.offering_faculty),
        text(&record.learning_hours),
        serde_json::to_string(&record.course_learning_outcomes)?,
        text(&record.course_requirements),
        text(&record.course_equivalencies),
        text(&record.course_units),
    ])
}

/// Writes the header and one row per record, replacing whatever is at `path`.
pub fn write_csv<W: Write>(mut w: W, records: &[CourseRecord]) -> Result<(), ScrapeError> {
    let header: Vec<String> = CourseRecord::COLUMNS.iter().map(|c| c.to_string()).collect();
    write_row(&mut w, &header)?;
    for record in records {
        write_row(&mut w, &record_cells(record)?)?;
    }
    w.flush()?;
    Ok(())
}

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    async fn write(&self, records: &[CourseRecord]) -> Result<SinkReport, ScrapeError> {
        let mut buf = Vec::new();
        write_csv(&mut buf, records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = File::create(&self.path).await?;
        file.write_all(&buf).await?;
        file.flush().await?;
        log::info!("Saved {} courses to {}", records.len(), self.path.display());

        Ok(SinkReport {
            written: records.len(),
            failed: Vec::new(),
        })
    }
}
