use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use service_core::error::AppError;
use tower_sessions::Session;

const REFRESH_KEY: &str = "refresh";

/// Per-visitor page state kept in the server-side session.
///
/// Only the refresh counter lives here: it is bumped on a successful upload or
/// an explicit refresh and survives for the life of the session store.
pub struct PageSession {
    session: Session,
    pub refresh_count: u64,
}

#[async_trait]
impl<S> FromRequestParts<S> for PageSession
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract session",
                )
                    .into_response()
            })?;

        let refresh_count = session
            .get::<u64>(REFRESH_KEY)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to read refresh counter from session");
                AppError::SessionError(e.to_string()).into_response()
            })?
            .unwrap_or(0);

        Ok(PageSession {
            session,
            refresh_count,
        })
    }
}

impl PageSession {
    /// Persist the counter if it moved.
    pub async fn save(&self, refresh_count: u64) -> Result<(), AppError> {
        if refresh_count == self.refresh_count {
            return Ok(());
        }

        self.session
            .insert(REFRESH_KEY, refresh_count)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store refresh counter in session");
                AppError::SessionError(e.to_string())
            })
    }
}
