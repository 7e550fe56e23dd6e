use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One document as reported by `GET /api/benefit/docs`.
///
/// Read-only snapshot; every field is optional because the backend makes no
/// promise about any of them, and a bad field must never sink the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub document_name: Option<String>,
    /// Raw status, normally an integer code but kept as-is for fallback display.
    #[serde(default)]
    pub document_process_status: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub upload_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user: Option<String>,
}

/// Accepts any JSON scalar; `null` becomes `None`, non-strings keep their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Backend processing states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    NotStarted = 0,
    InQueue = 1,
    Processing = 2,
    Complete = 3,
    Failed = 4,
}

impl ProcessStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ProcessStatus::NotStarted),
            1 => Some(ProcessStatus::InQueue),
            2 => Some(ProcessStatus::Processing),
            3 => Some(ProcessStatus::Complete),
            4 => Some(ProcessStatus::Failed),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessStatus::NotStarted => "Not Started",
            ProcessStatus::InQueue => "In Queue",
            ProcessStatus::Processing => "Processing",
            ProcessStatus::Complete => "Complete",
            ProcessStatus::Failed => "Failed",
        }
    }
}
