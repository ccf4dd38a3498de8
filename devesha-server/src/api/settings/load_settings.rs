use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use devesha_core::entities::date_selection::EnsureDateSelection;
use devesha_core::framework::DatabaseProcessor;
use kanau::processor::Processor;

use super::SettingsApiError;
use crate::state::AppState;

/// `GET /api/v1/settings/{owner_id}/date-selection` — load the current record.
///
/// Synthesizes and persists the default record (`specific_date`, nothing
/// selected) the first time an owner is seen; every later call returns the
/// stored record unchanged.
pub(super) async fn load_settings(
    state: State<AppState>,
    Path(owner_id): Path<String>,
) -> Result<impl IntoResponse, SettingsApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let row = processor
        .process(EnsureDateSelection { owner_id })
        .await
        .map_err(SettingsApiError::Database)?;

    Ok(Json(row.into_record()))
}
