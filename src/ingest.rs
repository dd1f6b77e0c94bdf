//! Ingestion adapters: turn raw file content into a deduplicated address list

use calamine::{Data, Reader, Sheets, open_workbook_auto_from_rs};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use crate::error::{PurifyError, Result};
use crate::extract::extract_tokens;
use crate::normalize::{Deduplicator, Normalizer};

/// Shape of the input, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Rows of cells separated by `,`, `;`, `|` or tab
    Delimited,
    /// Anything else read as plain text
    FreeText,
    /// Multi-sheet spreadsheet (xlsx, xls, xlsb, ods)
    Workbook,
}

impl SourceFormat {
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") => Self::Delimited,
            Some("xlsx" | "xls" | "xlsb" | "ods") => Self::Workbook,
            _ => Self::FreeText,
        }
    }

    #[must_use]
    pub fn reader(self) -> &'static dyn SourceReader {
        match self {
            Self::Delimited => &DelimitedText,
            Self::FreeText => &FreeText,
            Self::Workbook => &WorkbookGrid,
        }
    }
}

/// Splits source content into extraction units, in a reproducible order.
pub trait SourceReader {
    /// Feed every unit of `content` to `sink`. Fails only when the content
    /// cannot be read at all.
    fn read_units(
        &self,
        source_name: &str,
        content: &[u8],
        sink: &mut dyn FnMut(&str),
    ) -> Result<()>;
}

/// One unit per cell of every non-blank line
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedText;

impl SourceReader for DelimitedText {
    fn read_units(
        &self,
        _source_name: &str,
        content: &[u8],
        sink: &mut dyn FnMut(&str),
    ) -> Result<()> {
        let text = decode_text(content);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            for cell in line.split([',', ';', '|', '\t']) {
                let cell = cell.trim().trim_matches(['"', '\'']);
                if !cell.is_empty() {
                    sink(cell);
                }
            }
        }
        Ok(())
    }
}

/// The whole text is a single unit
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeText;

impl SourceReader for FreeText {
    fn read_units(
        &self,
        _source_name: &str,
        content: &[u8],
        sink: &mut dyn FnMut(&str),
    ) -> Result<()> {
        let text = decode_text(content);
        sink(&*text);
        Ok(())
    }
}

/// One unit per non-empty text cell; sheet order, then rows, then columns
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookGrid;

impl SourceReader for WorkbookGrid {
    fn read_units(
        &self,
        source_name: &str,
        content: &[u8],
        sink: &mut dyn FnMut(&str),
    ) -> Result<()> {
        let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(content))
            .map_err(|e| PurifyError::ingestion(source_name, e))?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        if sheet_names.is_empty() {
            return Err(PurifyError::EmptyWorkbook(source_name.to_string()));
        }

        for sheet_name in &sheet_names {
            let range = workbook.worksheet_range(sheet_name).map_err(|e| {
                PurifyError::ingestion(source_name, format!("sheet '{sheet_name}': {e}"))
            })?;

            for row in range.rows() {
                for cell in row {
                    if let Data::String(s) = cell
                        && !s.trim().is_empty()
                    {
                        sink(s.as_str());
                    }
                }
            }
        }
        Ok(())
    }
}

/// UTF-8 with an optional BOM; invalid sequences are replaced
fn decode_text(content: &[u8]) -> Cow<'_, str> {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    String::from_utf8_lossy(content)
}

/// Runs a [`SourceReader`] through extraction and deduplication.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    normalizer: Normalizer,
}

impl Ingestor {
    #[must_use]
    pub const fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Ingest a file, choosing the adapter from its name
    pub fn ingest_file(&self, file_name: &str, content: &[u8]) -> Result<Vec<String>> {
        self.ingest(SourceFormat::from_file_name(file_name), file_name, content)
    }

    /// Unique canonical addresses in first-seen order. No addresses found is
    /// an empty list, not an error.
    pub fn ingest(
        &self,
        format: SourceFormat,
        source_name: &str,
        content: &[u8],
    ) -> Result<Vec<String>> {
        let mut dedup = Deduplicator::new(self.normalizer.clone());
        let mut tokens = 0usize;

        format.reader().read_units(source_name, content, &mut |unit: &str| {
            dedup.extend(extract_tokens(unit).inspect(|_| tokens += 1));
        })?;

        debug!(
            "Ingested {source_name} as {format:?}: {tokens} tokens, {} unique",
            dedup.len()
        );

        Ok(dedup.into_addresses())
    }
}
