use serde::Serialize;

/// A link offered next to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowAction {
    pub label: String,
    pub url: String,
}

/// Render-ready form of a `DocumentRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub name: String,
    pub status_label: String,
    pub formatted_date: String,
    pub actions: Vec<RowAction>,
}

/// What the documents section shows.
///
/// `Empty` and `FetchError` are distinct on purpose: an empty backend list is
/// a normal state, a failed fetch is not, and neither carries rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Listing {
    Rows { rows: Vec<DisplayRow> },
    Empty,
    #[serde(rename = "error")]
    FetchError { message: String },
}

impl Listing {
    pub fn rows(&self) -> &[DisplayRow] {
        match self {
            Listing::Rows { rows } => rows,
            Listing::Empty | Listing::FetchError { .. } => &[],
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Listing::FetchError { message } => Some(message),
            _ => None,
        }
    }
}

/// Inline banner shown after an upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_serializes_with_state_tag() {
        let empty = serde_json::to_value(Listing::Empty).unwrap();
        assert_eq!(empty, json!({"state": "empty"}));

        let failed = serde_json::to_value(Listing::FetchError {
            message: "Error fetching documents: timeout".to_string(),
        })
        .unwrap();
        assert_eq!(
            failed,
            json!({"state": "error", "message": "Error fetching documents: timeout"})
        );

        let rows = serde_json::to_value(Listing::Rows {
            rows: vec![DisplayRow {
                name: "a.pdf".to_string(),
                status_label: "In Queue".to_string(),
                formatted_date: "-".to_string(),
                actions: vec![],
            }],
        })
        .unwrap();
        assert_eq!(rows["state"], "rows");
        assert_eq!(rows["rows"][0]["statusLabel"], "In Queue");
        assert_eq!(rows["rows"][0]["formattedDate"], "-");
        assert!(rows["rows"][0].get("status_label").is_none());
    }

    #[test]
    fn fetch_error_has_no_rows() {
        let listing = Listing::FetchError {
            message: "boom".to_string(),
        };
        assert!(listing.rows().is_empty());
        assert!(!listing.is_empty_state());
        assert_eq!(listing.error_message(), Some("boom"));
    }

    #[test]
    fn notice_accessors() {
        let notice = Notice::Error("Upload failed: HTTP 500".to_string());
        assert!(notice.is_error());
        assert_eq!(notice.message(), "Upload failed: HTTP 500");
        assert!(!Notice::Success("ok".to_string()).is_error());
    }
}
