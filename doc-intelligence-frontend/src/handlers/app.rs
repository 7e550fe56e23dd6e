use crate::controller::{PageController, PageView};
use crate::models::{Listing, Notice, PageSession};
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub notice: Option<Notice>,
    pub listing: Listing,
    pub refresh_count: u64,
    pub max_upload_mb: String,
}

impl IndexTemplate {
    pub fn new(view: PageView, max_upload_bytes: u64) -> Self {
        Self {
            notice: view.notice,
            listing: view.listing,
            refresh_count: view.refresh_count,
            max_upload_mb: format_megabytes(max_upload_bytes),
        }
    }
}

/// `2097152` -> `"2"`, `1572864` -> `"1.5"`.
pub fn format_megabytes(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    let text = format!("{:.2}", mb);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub async fn index(
    State(state): State<AppState>,
    page_session: PageSession,
) -> impl IntoResponse {
    let controller = PageController::new(state.backend.as_ref(), page_session.refresh_count);
    let view = controller.render(None).await;

    IndexTemplate::new(view, state.backend.max_upload_bytes())
}

pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megabytes_drop_trailing_zeros() {
        assert_eq!(format_megabytes(2 * 1024 * 1024), "2");
        assert_eq!(format_megabytes(1024 * 1024 + 512 * 1024), "1.5");
        assert_eq!(format_megabytes(10 * 1024 * 1024), "10");
    }
}
