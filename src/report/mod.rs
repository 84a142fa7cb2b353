//! Daily attendance export.

use chrono::NaiveDateTime;
use serde::Serialize;
use strum::{Display, EnumString};
use tracing::info;

use crate::attendance::start_of_day;
use crate::error::AppError;
use crate::model::attendance::AttendanceEntry;
use crate::store::AttendanceLedger;

mod csv_file;
mod pdf_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// One line of the report. Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub sn: usize,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub date: String,
    pub time: String,
}

impl ReportRow {
    fn from_entry(sn: usize, entry: AttendanceEntry) -> Self {
        Self {
            sn,
            name: entry.name,
            email: entry.email,
            phone: entry.phone,
            department: entry.department,
            date: entry.date.format("%Y-%m-%d").to_string(),
            time: entry.date.format("%I:%M:%S %p").to_string(),
        }
    }

    /// `{sn}. {name} | {email} | {phone} | {department} | {date} {time}`
    pub fn line(&self) -> String {
        format!(
            "{}. {} | {} | {} | {} | {} {}",
            self.sn, self.name, self.email, self.phone, self.department, self.date, self.time
        )
    }
}

pub struct ExportFile {
    pub filename: String,
    pub format: ExportFormat,
    pub body: Vec<u8>,
}

/// Renders today's attendance. An empty day wins over a bad format.
pub async fn export_attendance(
    ledger: &dyn AttendanceLedger,
    format: Option<&str>,
    now: NaiveDateTime,
) -> Result<ExportFile, AppError> {
    let entries = ledger.entries_since(start_of_day(now)).await?;
    if entries.is_empty() {
        return Err(AppError::NoData);
    }

    let format: ExportFormat = format
        .and_then(|f| f.trim().parse().ok())
        .ok_or(AppError::UnsupportedFormat)?;

    let rows: Vec<ReportRow> = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| ReportRow::from_entry(i + 1, entry))
        .collect();

    let body = match format {
        ExportFormat::Csv => csv_file::render(&rows)?,
        ExportFormat::Pdf => pdf_file::render(&rows)?,
    };

    info!(rows = rows.len(), %format, bytes = body.len(), "Attendance exported");

    Ok(ExportFile {
        filename: format!("attendance-{}.{}", now.format("%Y-%m-%d"), format),
        format,
        body,
    })
}
