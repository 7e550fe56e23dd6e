use crate::controller::PageController;
use crate::models::{Listing, PageSession};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Json, Redirect},
};
use service_core::error::AppError;

/// The documents section on its own, for partial reloads.
#[derive(Template)]
#[template(path = "partials/listing.html")]
pub struct ListingTemplate {
    pub listing: Listing,
}

pub async fn listing_fragment(
    State(state): State<AppState>,
    page_session: PageSession,
) -> impl IntoResponse {
    let controller = PageController::new(state.backend.as_ref(), page_session.refresh_count);

    ListingTemplate {
        listing: controller.listing().await,
    }
}

/// The same view model as JSON.
pub async fn listing_json(
    State(state): State<AppState>,
    page_session: PageSession,
) -> Json<Listing> {
    let controller = PageController::new(state.backend.as_ref(), page_session.refresh_count);

    Json(controller.listing().await)
}

/// Refresh control: bump the counter and send the browser back to the page,
/// which fetches the list again.
pub async fn refresh_handler(
    State(state): State<AppState>,
    page_session: PageSession,
) -> Result<Redirect, AppError> {
    let mut controller = PageController::new(state.backend.as_ref(), page_session.refresh_count);
    controller.refresh();
    page_session.save(controller.refresh_count()).await?;

    tracing::debug!(refresh_count = controller.refresh_count(), "Refresh requested");

    Ok(Redirect::to("/"))
}
