//! Metafield publisher.
//!
//! Republishes a freshly saved [`DateSelectionRecord`] to the storefront's
//! metadata channel so checkout-side code can read it without a backend call:
//! the record is serialized to a JSON string and written under the fixed
//! `date-data`/`devesha` namespace+key, replacing any prior value.
//!
//! The publish runs after the store upsert with no transaction spanning the
//! two, so a failure here leaves the store committed and the channel stale.
//! Callers are expected to log and surface that partial-failure state.

use devesha_sdk::objects::date_selection::{
    DateSelectionRecord, METAFIELD_KEY, METAFIELD_NAMESPACE,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

const SHOP_ID_QUERY: &str = "query { shop { id } }";

const METAFIELDS_SET_MUTATION: &str = "\
mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields { key namespace updatedAt }
    userErrors { field message code }
  }
}";

/// Errors that can occur while publishing the configuration blob.
#[derive(Debug, Error)]
pub enum PublishError {
    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The owning shop's identity could not be resolved.
    #[error("failed to resolve shop id")]
    ShopIdResolution,

    /// The metafield write reported field-level errors.
    #[error("metafield write rejected: {0}")]
    UserErrors(String),

    /// Payload or response (de)serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes the configuration blob to the shop-scoped metadata channel via the
/// storefront platform's admin GraphQL endpoint.
pub struct MetafieldPublisher {
    http: reqwest::Client,
    api_url: Url,
    access_token: String,
}

impl MetafieldPublisher {
    /// Create a new publisher.
    ///
    /// * `api_url` – the platform's admin GraphQL endpoint.
    /// * `access_token` – bearer token authorizing metafield writes.
    pub fn new(api_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_url,
            access_token: access_token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// The admin GraphQL endpoint this publisher writes through.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Resolve the shop's global id, required as the metafield owner.
    pub async fn resolve_shop_id(&self) -> Result<String, PublishError> {
        let body = serde_json::json!({ "query": SHOP_ID_QUERY });
        let text = self.graphql(body).await?;
        parse_shop_id(&text)
    }

    /// Write the record as the shop's metafield blob, replacing any prior
    /// value. Full replace, not a merge.
    pub async fn publish(
        &self,
        shop_id: &str,
        record: &DateSelectionRecord,
    ) -> Result<(), PublishError> {
        let value = serde_json::to_string(record)?;
        let body = serde_json::json!({
            "query": METAFIELDS_SET_MUTATION,
            "variables": {
                "metafields": [{
                    "key": METAFIELD_KEY,
                    "namespace": METAFIELD_NAMESPACE,
                    "ownerId": shop_id,
                    "type": "json",
                    "value": value,
                }],
            },
        });

        let text = self.graphql(body).await?;
        check_metafields_set(&text)?;

        info!(
            owner_id = %record.relation_setting_id,
            shop_id = %shop_id,
            "Published date selection metafield"
        );
        Ok(())
    }

    /// Resolve the shop id, then publish.
    pub async fn publish_for_shop(&self, record: &DateSelectionRecord) -> Result<(), PublishError> {
        let shop_id = self.resolve_shop_id().await?;
        self.publish(&shop_id, record).await
    }

    async fn graphql(&self, body: serde_json::Value) -> Result<String, PublishError> {
        debug!(url = %self.api_url, "GraphQL request to storefront platform");
        let resp = self
            .http
            .post(self.api_url.clone())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.text().await?)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct GraphqlResponse<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ShopIdData {
    shop: Option<ShopNode>,
}

#[derive(Debug, Deserialize)]
struct ShopNode {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetafieldsSetData {
    #[serde(rename = "metafieldsSet")]
    metafields_set: Option<MetafieldsSetResult>,
}

#[derive(Debug, Default, Deserialize)]
struct MetafieldsSetResult {
    #[serde(default, rename = "userErrors")]
    user_errors: Vec<MetafieldUserError>,
}

#[derive(Debug, Deserialize)]
struct MetafieldUserError {
    #[serde(default)]
    field: Option<Vec<String>>,
    message: String,
    #[serde(default)]
    code: Option<String>,
}

fn parse_shop_id(body: &str) -> Result<String, PublishError> {
    let resp: GraphqlResponse<ShopIdData> = serde_json::from_str(body)?;
    resp.data
        .and_then(|d| d.shop)
        .and_then(|s| s.id)
        .filter(|id| !id.is_empty())
        .ok_or(PublishError::ShopIdResolution)
}

fn check_metafields_set(body: &str) -> Result<(), PublishError> {
    let resp: GraphqlResponse<MetafieldsSetData> = serde_json::from_str(body)?;
    let result = resp
        .data
        .and_then(|d| d.metafields_set)
        .unwrap_or_default();

    if result.user_errors.is_empty() {
        return Ok(());
    }

    let message = result
        .user_errors
        .iter()
        .map(|e| {
            let field = e
                .field
                .as_deref()
                .map(|f| f.join("."))
                .unwrap_or_default();
            let code = e.code.as_deref().unwrap_or("UNKNOWN");
            format!("{field} [{code}]: {}", e.message)
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(PublishError::UserErrors(message))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_shop_id_from_response() {
        let body = r#"{"data":{"shop":{"id":"gid://shopify/Shop/123"}}}"#;
        assert_eq!(parse_shop_id(body).ok().as_deref(), Some("gid://shopify/Shop/123"));
    }

    #[test]
    fn missing_shop_id_is_a_resolution_error() {
        for body in [
            r#"{"data":{"shop":null}}"#,
            r#"{"data":{"shop":{"id":null}}}"#,
            r#"{"data":{"shop":{"id":""}}}"#,
            r#"{"data":null}"#,
            r#"{}"#,
        ] {
            assert!(matches!(
                parse_shop_id(body),
                Err(PublishError::ShopIdResolution)
            ));
        }
    }

    #[test]
    fn empty_user_errors_is_success() {
        let body = r#"{"data":{"metafieldsSet":{"metafields":[{"key":"devesha","namespace":"date-data"}],"userErrors":[]}}}"#;
        assert!(check_metafields_set(body).is_ok());
    }

    #[test]
    fn user_errors_are_collected_into_the_error() {
        let body = r#"{"data":{"metafieldsSet":{"userErrors":[
            {"field":["metafields","0","value"],"message":"Value is invalid JSON","code":"INVALID_VALUE"}
        ]}}}"#;
        match check_metafields_set(body) {
            Err(PublishError::UserErrors(msg)) => {
                assert!(msg.contains("metafields.0.value"));
                assert!(msg.contains("INVALID_VALUE"));
                assert!(msg.contains("Value is invalid JSON"));
            }
            other => panic!("expected UserErrors, got {other:?}"),
        }
    }

    #[test]
    fn absent_metafields_set_section_is_treated_as_success() {
        // A response with no data section carries no userErrors to reject on.
        assert!(check_metafields_set(r#"{}"#).is_ok());
    }
}
