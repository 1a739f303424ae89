// ============================================================
// REVIEW CSV PARSER
// ============================================================
// Decode uploaded bytes and turn them into raw review rows

use encoding_rs::{Encoding, WINDOWS_1252};

use super::header_validator::HeaderSet;
use super::line_splitter::split_line;
use crate::domain::error::{AppError, Result};
use crate::domain::review::RawRow;

/// Header plus data rows of one upload
#[derive(Debug, Clone)]
pub struct ParsedReviews {
    pub headers: HeaderSet,
    pub rows: Vec<RawRow>,
}

/// Line-oriented review parser
#[derive(Debug, Default)]
pub struct ReviewCsvParser;

impl ReviewCsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode raw upload bytes and parse them
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedReviews> {
        self.parse_content(&decode_bytes(bytes))
    }

    /// Parse review content already held in memory
    pub fn parse_content(&self, content: &str) -> Result<ParsedReviews> {
        let lines: Vec<&str> = content
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() < 2 {
            return Err(AppError::EmptyOrHeaderOnlyFile);
        }

        let headers = HeaderSet::validate(split_line(lines[0]))?;
        tracing::debug!(headers = ?headers.names, "CSV headers detected");

        let rows: Vec<RawRow> = lines[1..]
            .iter()
            .enumerate()
            .map(|(index, line)| RawRow::from_cells(index, &headers.names, split_line(line)))
            .collect();

        tracing::info!(rows = rows.len(), "Parsed review rows");

        Ok(ParsedReviews { headers, rows })
    }
}

/// Decode raw upload bytes to text.
///
/// A byte-order mark wins; otherwise strict UTF-8 is tried before falling back
/// to Windows-1252, which never fails.
pub fn decode_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("Upload is not valid UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}
