use crate::controller::PageController;
use crate::handlers::app::IndexTemplate;
use crate::models::PageSession;
use crate::services::backend_client::UPLOAD_FIELD;
use crate::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header::CONTENT_LENGTH, HeaderMap, StatusCode},
    response::IntoResponse,
};
use service_core::error::AppError;

/// What the submitted form held.
enum UploadForm {
    File { name: String, data: Vec<u8> },
    NoFile,
    /// The body limit cut the request off before the file was read.
    OverLimit,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::NoFile;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        if !name.is_empty() {
            form = UploadForm::File {
                name,
                data: data.to_vec(),
            };
        }
    }

    Ok(form)
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Take the `file` part of the form, relay it to the backend, then render
/// the page with the outcome and a fresh listing.
///
/// A form without a chosen file renders the page unchanged, the same as a
/// plain reload. A body over the server's request limit is reported as a
/// too-large file like any other oversize upload.
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    page_session: PageSession,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => UploadForm::OverLimit,
        Err(err) => {
            tracing::error!(error = %err, "Failed to read upload form");
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid upload form: {}",
                err.body_text()
            )));
        }
    };

    let mut controller = PageController::new(state.backend.as_ref(), page_session.refresh_count);

    let notice = match form {
        UploadForm::File { name, data } => {
            tracing::info!(file_name = %name, size = data.len(), "Upload requested");
            Some(controller.upload(&name, data).await)
        }
        UploadForm::NoFile => None,
        UploadForm::OverLimit => {
            // Without a declared length the limit itself is the best lower bound.
            let size = declared_length(&headers)
                .unwrap_or(state.max_request_bytes as u64 + 1);
            Some(controller.oversize_request(size))
        }
    };

    page_session.save(controller.refresh_count()).await?;

    let view = controller.render(notice).await;
    Ok(IndexTemplate::new(view, state.backend.max_upload_bytes()))
}
