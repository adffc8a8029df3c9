//! Loading of the raw article table from delimited text.
//!
//! The file must carry a header row naming at least the five columns in
//! [`REQUIRED_COLUMNS`]. Extra columns are skipped. Empty cells, and cells
//! missing from rows shorter than the header, come through as `None`.

use crate::errors::IngestError;
use crate::models::RawRecord;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Columns the input must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "media_outlet", "title", "text", "url"];

/// Read every row of the file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, a required column is missing, or a
/// record is not valid delimited text. All of these end the run.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_raw_records(
    path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<Vec<RawRecord>, IngestError> {
    let file = File::open(path.as_ref())?;
    let records = read_raw_records(file, delimiter)?;
    info!(rows = records.len(), "Dataset loaded");
    Ok(records)
}

/// Read rows from any reader. Split out of [`load_raw_records`] for tests.
pub fn read_raw_records<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    debug!(headers = ?headers, "Input header");
    let mut positions = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or(IngestError::MissingColumn(column))?;
    }
    let [date, media_outlet, title, text, url] = positions;

    let mut records = Vec::new();
    let mut short_rows = 0usize;
    for result in reader.records() {
        let row = result?;
        if row.len() < headers.len() {
            short_rows += 1;
        }
        records.push(RawRecord {
            date: cell(&row, date),
            media_outlet: cell(&row, media_outlet),
            title: cell(&row, title),
            text: cell(&row, text),
            url: cell(&row, url),
        });
    }
    if short_rows > 0 {
        warn!(short_rows, "Rows with fewer fields than the header; missing cells left empty");
    }
    Ok(records)
}

fn cell(row: &StringRecord, idx: usize) -> Option<String> {
    row.get(idx).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_required_columns_and_ignores_extras() {
        let data = "\
id,date,media_outlet,title,text,url,extra
1,\"Sep 24, 2025 @ 00:00:00.000\",biobio,Titular,Cuerpo,https://example.cl/a,x
2,\"Sep 25, 2025 @ 00:00:00.000\",emol,,,,y
";
        let records = read_raw_records(data.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].date.as_deref(),
            Some("Sep 24, 2025 @ 00:00:00.000")
        );
        assert_eq!(records[0].media_outlet.as_deref(), Some("biobio"));
        assert_eq!(records[0].url.as_deref(), Some("https://example.cl/a"));
        assert_eq!(records[1].title, None);
        assert_eq!(records[1].text, None);
        assert_eq!(records[1].url, None);
    }

    #[test]
    fn test_quoted_fields_may_span_lines() {
        let data = "date,media_outlet,title,text,url\n\"Sep 24, 2025 @ 00:00:00.000\",m,t,\"linea uno\nlinea dos\",u\n";
        let records = read_raw_records(data.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text.as_deref(), Some("linea uno\nlinea dos"));
    }

    #[test]
    fn test_short_row_does_not_abort_the_batch() {
        let data = "\
date,media_outlet,title,text,url,seccion
\"Sep 24, 2025 @ 00:00:00.000\",biobio,Titular,Cuerpo,https://example.cl/a,pais
broken,row
\"Sep 25, 2025 @ 00:00:00.000\",emol,Otro,Texto,https://example.cl/b,mundo
";
        let records = read_raw_records(data.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title.as_deref(), Some("Titular"));
        assert_eq!(records[1].date.as_deref(), Some("broken"));
        assert_eq!(records[1].media_outlet.as_deref(), Some("row"));
        assert_eq!(records[1].title, None);
        assert_eq!(records[1].text, None);
        assert_eq!(records[1].url, None);
        assert_eq!(records[2].title.as_deref(), Some("Otro"));
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let data = "date,media_outlet,title,url\nx,y,z,w\n";
        let err = read_raw_records(data.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn("text")));
    }

    #[test]
    fn test_custom_delimiter() {
        let data = "date;media_outlet;title;text;url\nSep 24, 2025 @ 00:00:00.000;m;t;x;u\n";
        let records = read_raw_records(data.as_bytes(), b';').unwrap();
        assert_eq!(records[0].date.as_deref(), Some("Sep 24, 2025 @ 00:00:00.000"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,media_outlet,title,text,url").unwrap();
        writeln!(file, "\"Sep 24, 2025 @ 00:00:00.000\",m,t,x,u").unwrap();
        let records = load_raw_records(file.path(), b',').unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = load_raw_records("/definitely/not/here.csv", b',').unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
