//! Row cleaning: field selection, validity filters and date parsing.
//!
//! A row survives only if it has a title, a text longer than
//! [`MIN_TEXT_CHARS`] characters, and a `date` whose part before the `@`
//! parses as `%b %d, %Y` (e.g. `Sep 24, 2025 @ 00:00:00.000`). Rows failing
//! any check are dropped whole; nothing is repaired.

use crate::models::{CleanedRecord, RawRecord};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Texts of this many characters or fewer are discarded.
pub const MIN_TEXT_CHARS: usize = 200;

const DAY_FORMAT: &str = "%b %d, %Y";

/// Parse the calendar date out of a source `date` cell.
///
/// Returns `None` for a missing cell, a cell without `@`, a year that is not
/// exactly four digits, or a left segment that does not match `%b %d, %Y`.
///
/// # Examples
///
/// ```ignore
/// let d = parse_article_date(Some("Sep 24, 2025 @ 00:00:00.000"));
/// assert_eq!(d, NaiveDate::from_ymd_opt(2025, 9, 24));
/// assert_eq!(parse_article_date(Some("not a date")), None);
/// ```
pub fn parse_article_date(raw: Option<&str>) -> Option<NaiveDate> {
    let (day_part, _time_part) = raw?.split_once('@')?;
    let day_part = day_part.trim();
    // chrono's %Y also takes short or signed years.
    let (_, year) = day_part.rsplit_once(", ")?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(day_part, DAY_FORMAT).ok()
}

/// Clean one row, or `None` if it must be dropped.
pub fn clean_record(raw: RawRecord) -> Option<CleanedRecord> {
    let title = raw.title.filter(|t| !t.is_empty())?;
    let text = raw.text.filter(|t| !t.is_empty())?;
    if text.chars().count() <= MIN_TEXT_CHARS {
        return None;
    }
    let date = parse_article_date(raw.date.as_deref())?;

    Some(CleanedRecord {
        fecha_yyyy_mm_dd: date.format("%Y-%m-%d").to_string(),
        date,
        media_outlet: raw.media_outlet,
        title,
        text,
        url: raw.url,
    })
}

/// Clean a whole table, keeping surviving rows in their input order.
#[instrument(level = "info", skip_all, fields(rows_in = records.len()))]
pub fn normalize(records: Vec<RawRecord>) -> Vec<CleanedRecord> {
    let rows_in = records.len();
    let cleaned: Vec<CleanedRecord> = records.into_iter().filter_map(clean_record).collect();

    let dropped = rows_in - cleaned.len();
    debug!(dropped, "Rows rejected by normalization");
    info!(kept = cleaned.len(), dropped, "Rows after cleaning");
    cleaned
}
