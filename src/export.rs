//! Serialization of run results into downloadable files

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{PurifyError, Result};
use crate::summary::Summary;
use crate::types::{NormalizedAddress, ProcessResult};

pub const DETAILED_HEADER: &str = "email,status,motivo";
pub const STATUS_VALID: &str = "válido";
pub const STATUS_INVALID: &str = "inválido";

/// A serialized export ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime: &'static str,
}

impl ExportFile {
    /// Content as text. Exports are always UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    summary: &'a Summary,
    result: &'a ProcessResult,
}

/// Builds export files. Timestamps in file names have second resolution
/// and never repeat or go backwards for one exporter.
#[derive(Debug, Clone)]
pub struct Exporter {
    clock: fn() -> DateTime<Utc>,
    last: Option<DateTime<Utc>>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::with_clock(Utc::now)
    }
}

impl Exporter {
    #[must_use]
    pub const fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock, last: None }
    }

    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = (self.clock)();
        let now = now.with_nanosecond(0).unwrap_or(now);
        let stamp = match self.last {
            Some(last) if now <= last => last + TimeDelta::seconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }

    fn file_name(&mut self, prefix: &str, extension: &str) -> String {
        let stamp = self.next_stamp().format("%Y%m%dT%H%M%S");
        format!("{prefix}_{stamp}.{extension}")
    }

    /// One corrected address per line
    pub fn export_clean(&mut self, valid: &[NormalizedAddress]) -> ExportFile {
        let content = valid
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        let filename = self.file_name("emails_limpos", "txt");
        debug!("Exported {} clean addresses to {filename}", valid.len());

        ExportFile {
            bytes: content.into_bytes(),
            filename,
            mime: "text/plain",
        }
    }

    /// `email,status,motivo` rows: valid addresses first, then invalid ones.
    ///
    /// Valid rows are `<email>,válido,` with an empty reason. The email cell
    /// is quoted in either kind of row when it holds a `,`, `"` or line
    /// break, so such an address cannot shift the columns.
    pub fn export_detailed(&mut self, result: &ProcessResult) -> ExportFile {
        let mut lines = Vec::with_capacity(result.total + 1);
        lines.push(DETAILED_HEADER.to_string());

        for address in &result.valid {
            lines.push(format!(
                "{},{STATUS_VALID},",
                csv_field(&address.to_string())
            ));
        }
        for rejected in &result.invalid {
            lines.push(format!(
                "{},{STATUS_INVALID},{}",
                csv_field(&rejected.address),
                quoted(rejected.reason.label())
            ));
        }

        let filename = self.file_name("relatorio", "csv");
        debug!("Exported detailed report with {} rows to {filename}", result.total);

        ExportFile {
            bytes: lines.join("\n").into_bytes(),
            filename,
            mime: "text/csv",
        }
    }

    /// Full result plus summary as pretty-printed JSON
    pub fn export_json(&mut self, result: &ProcessResult, summary: &Summary) -> Result<ExportFile> {
        let stamp = self.next_stamp();
        let report = JsonReport {
            generated_at: stamp.to_rfc3339(),
            summary,
            result,
        };
        let bytes =
            serde_json::to_vec_pretty(&report).map_err(|e| PurifyError::Export(e.to_string()))?;

        Ok(ExportFile {
            bytes,
            filename: format!("relatorio_{}.json", stamp.format("%Y%m%dT%H%M%S")),
            mime: "application/json",
        })
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote only when the value would break the row
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}
