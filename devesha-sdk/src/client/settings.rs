//! Typed client for the admin settings endpoints.

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::date_selection::DateSelectionRecord;
use crate::objects::settings::SaveSettingsForm;

/// Typed HTTP client for the devesha **admin settings API**.
///
/// Called by the merchant-facing admin page to load and save the delivery-date
/// configuration for one owner.
#[derive(Debug, Clone)]
pub struct SettingsClient {
    http: Client,
    base_url: Url,
}

impl SettingsClient {
    /// Create a new `SettingsClient`.
    ///
    /// * `base_url` – root URL of the devesha server (e.g. `https://dates.example.com`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/v1/settings/{owner_id}/date-selection` – load the current
    /// record, creating the default on a never-configured owner.
    pub async fn load(&self, owner_id: &str) -> Result<DateSelectionRecord, ClientError> {
        let url = self.endpoint(owner_id)?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/settings/{owner_id}/date-selection` – replace the record
    /// and republish the metafield blob.
    pub async fn save(
        &self,
        owner_id: &str,
        form: &SaveSettingsForm,
    ) -> Result<DateSelectionRecord, ClientError> {
        let url = self.endpoint(owner_id)?;
        let resp = self.http.post(url).form(form).send().await?;
        parse_response(resp).await
    }

    fn endpoint(&self, owner_id: &str) -> Result<Url, ClientError> {
        Ok(self
            .base_url
            .join(&format!("/api/v1/settings/{owner_id}/date-selection"))?)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
