//! Admin settings API handlers.
//!
//! Called by the merchant-facing admin page. The owner identity is always an
//! explicit path parameter; there is no ambient session state.
//!
//! # Endpoints
//!
//! - `GET  /{owner_id}/date-selection` – load the record, creating the
//!   default on first sight
//! - `POST /{owner_id}/date-selection` – replace the record, then republish
//!   the metafield blob

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use devesha_core::publisher::PublishError;

use crate::state::AppState;

mod load_settings;
mod save_settings;

/// Build the settings API router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{owner_id}/date-selection",
        get(load_settings::load_settings).post(save_settings::save_settings),
    )
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in settings API handlers.
#[derive(Debug)]
enum SettingsApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The record was saved but could not be published to the metadata
    /// channel. The store and the published blob now disagree.
    Publish(PublishError),
}

impl IntoResponse for SettingsApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            SettingsApiError::Database(e) => {
                tracing::error!(error = %e, "Settings API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            SettingsApiError::Publish(e) => {
                tracing::error!(error = %e, "Settings API publish error");
                (
                    StatusCode::BAD_GATEWAY,
                    "configuration saved but publishing to the storefront failed",
                )
                    .into_response()
            }
        }
    }
}
