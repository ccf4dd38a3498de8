use axum::{
    Form, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use devesha_core::entities::date_selection::UpsertDateSelection;
use devesha_core::framework::DatabaseProcessor;
use devesha_sdk::objects::settings::SaveSettingsForm;
use kanau::processor::Processor;

use super::SettingsApiError;
use crate::state::AppState;

/// `POST /api/v1/settings/{owner_id}/date-selection` — replace the record,
/// then republish it to the metadata channel.
///
/// The upsert and the publish are two separate writes with nothing spanning
/// them: when the publish fails the store mutation stays committed and the
/// published blob goes stale. That partial-failure state is logged here and
/// reported to the caller as a 502 instead of being silently swallowed.
pub(super) async fn save_settings(
    state: State<AppState>,
    Path(owner_id): Path<String>,
    Form(form): Form<SaveSettingsForm>,
) -> Result<impl IntoResponse, SettingsApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let row = processor
        .process(UpsertDateSelection::from_form(owner_id.clone(), &form))
        .await
        .map_err(SettingsApiError::Database)?;
    let record = row.into_record();

    let publisher = state.publisher().await;
    if let Err(e) = publisher.publish_for_shop(&record).await {
        tracing::error!(
            owner_id = %owner_id,
            error = %e,
            "Date selection saved but not published; stored record and metafield blob now disagree"
        );
        return Err(SettingsApiError::Publish(e));
    }

    Ok(Json(record))
}
