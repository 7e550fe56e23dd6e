//! Turns the raw backend document list into rows the page can render.
//!
//! Everything here is pure: records are borrowed, never modified, and every
//! per-field problem falls back to a display value instead of failing.

use crate::error::RecordFieldInvalid;
use crate::models::{DisplayRow, DocumentRecord, Listing, ProcessStatus, RowAction};
use crate::services::backend_client::ApiEndpoints;
use chrono::{NaiveDateTime, Timelike};
use serde_json::Value;

/// Shown for unset dates and unknown status codes.
pub const PLACEHOLDER: &str = "-";

/// Shown when a record has no name.
pub const MISSING_NAME: &str = "N/A";

pub const TEST_CASE_ACTION_LABEL: &str = "Download Test Cases";

/// `2024-01-02T10:00:00.123456Z`. Tried first.
const FRACTIONAL_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
/// Longest fraction accepted; .NET writes seven digits, chrono reads up to nine.
const MAX_FRACTION_DIGITS: usize = 9;
/// `2024-01-02T10:00:00Z`.
const WHOLE_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
/// `January 02, 2024 10:00 AM`.
const DISPLAY_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Derived status of one record: the integer code when one could be read, and
/// the label to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClass {
    pub code: Option<i64>,
    pub label: String,
}

/// Build the documents section from a fetched list.
pub fn build_listing(records: &[DocumentRecord], endpoints: &ApiEndpoints) -> Listing {
    if records.is_empty() {
        return Listing::Empty;
    }

    Listing::Rows {
        rows: build_rows(records, endpoints),
    }
}

/// Sort newest first and derive one `DisplayRow` per record.
pub fn build_rows(records: &[DocumentRecord], endpoints: &ApiEndpoints) -> Vec<DisplayRow> {
    sorted_by_upload_desc(records)
        .into_iter()
        .map(|record| build_row(record, endpoints))
        .collect()
}

/// Newest first by the raw `uploadDateTime` text.
///
/// This is a plain string comparison, not a date comparison, which keeps the
/// order the backend's existing consumers see. Mixing the fractional and
/// whole-seconds formats for timestamps within the same second can order them
/// unexpectedly. Missing timestamps compare as the empty string and sink to
/// the bottom. The sort is stable.
pub fn sorted_by_upload_desc(records: &[DocumentRecord]) -> Vec<&DocumentRecord> {
    let mut sorted: Vec<&DocumentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| sort_key(b).cmp(sort_key(a)));
    sorted
}

fn sort_key(record: &DocumentRecord) -> &str {
    record.upload_date_time.as_deref().unwrap_or("")
}

pub fn build_row(record: &DocumentRecord, endpoints: &ApiEndpoints) -> DisplayRow {
    let name = record
        .document_name
        .clone()
        .unwrap_or_else(|| MISSING_NAME.to_string());

    let status = classify_status(record.document_process_status.as_ref());
    let formatted_date = format_timestamp(record.upload_date_time.as_deref().unwrap_or(""));

    let actions = if status.code == Some(ProcessStatus::Complete.code()) {
        vec![RowAction {
            label: TEST_CASE_ACTION_LABEL.to_string(),
            url: endpoints.test_case_download_link(&name).to_string(),
        }]
    } else {
        Vec::new()
    };

    DisplayRow {
        name,
        status_label: status.label,
        formatted_date,
        actions,
    }
}

/// Map a raw status to its label.
///
/// Integers go through the fixed code table (`"-"` for unknown codes). Values
/// that are not integers are shown as they are, or `"-"` when empty.
pub fn classify_status(raw: Option<&Value>) -> StatusClass {
    match parse_status_code(raw) {
        Ok(code) => StatusClass {
            code: Some(code),
            label: ProcessStatus::from_code(code)
                .map(ProcessStatus::label)
                .unwrap_or(PLACEHOLDER)
                .to_string(),
        },
        Err(err) => {
            tracing::debug!(field = err.field, raw = %err.raw, "Falling back to raw status");
            StatusClass {
                code: None,
                label: raw_status_text(raw),
            }
        }
    }
}

/// Read a status code the lenient way: integers, integral-looking strings
/// (surrounding whitespace and a sign allowed), floats truncated toward zero,
/// and booleans as 0/1.
pub fn parse_status_code(raw: Option<&Value>) -> Result<i64, RecordFieldInvalid> {
    let invalid = || {
        RecordFieldInvalid::new(
            "documentProcessStatus",
            raw.map(Value::to_string).unwrap_or_else(|| "null".to_string()),
        )
    };

    match raw {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .map(f64::trunc)
                    .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(invalid),
        Some(Value::Bool(flag)) => Ok(i64::from(*flag)),
        Some(Value::String(text)) => text.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn raw_status_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Array(items)) if !items.is_empty() => Value::Array(items.clone()).to_string(),
        Some(Value::Object(map)) if !map.is_empty() => Value::Object(map.clone()).to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Parse an upload timestamp in either accepted format. The result is the
/// wall-clock time as written; no timezone conversion happens.
///
/// Fractions longer than nine digits and leap seconds (`:60`) are rejected.
pub fn parse_upload_time(raw: &str) -> Result<NaiveDateTime, RecordFieldInvalid> {
    let invalid = || RecordFieldInvalid::new("uploadDateTime", raw);

    if raw.is_empty() || fraction_digits(raw) > MAX_FRACTION_DIGITS {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(raw, FRACTIONAL_SECONDS_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, WHOLE_SECONDS_FORMAT))
        .ok()
        .filter(|instant| instant.nanosecond() < 1_000_000_000)
        .ok_or_else(invalid)
}

/// Digits between the last `.` and the trailing `Z`; zero when there is no
/// fraction.
fn fraction_digits(raw: &str) -> usize {
    raw.strip_suffix('Z')
        .and_then(|rest| rest.rsplit_once('.'))
        .map_or(0, |(_, fraction)| fraction.len())
}

/// `"Month DD, YYYY hh:mm AM/PM"`, or `"-"` when the timestamp is unset or
/// unreadable.
pub fn format_timestamp(raw: &str) -> String {
    match parse_upload_time(raw) {
        Ok(instant) => instant.format(DISPLAY_FORMAT).to_string(),
        Err(err) => {
            if !raw.is_empty() {
                tracing::debug!(field = err.field, raw = %err.raw, "Unparseable upload time");
            }
            PLACEHOLDER.to_string()
        }
    }
}
