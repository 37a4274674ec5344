//! GraphQL over HTTP
//!
//! reqwest-backed [`Transport`] for one endpoint (shop or admin).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::traits::Transport;
use crate::domain::{DomainError, DomainResult, LanguageCode};

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphqlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// Client for a single GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Reuse an existing reqwest client (connection pool, cookies)
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for GraphqlClient {
    async fn request(&self, locale: &LanguageCode, document: &str, variables: Value) -> DomainResult<Value> {
        debug!(endpoint = %self.endpoint, locale = %locale, "graphql request");

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("languageCode", locale.as_str())])
            .json(&GraphqlRequest { query: document, variables })
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = %status, "graphql request rejected");
            // validation failures come back as 4xx with a GraphQL errors array
            let text = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<GraphqlResponse>(&text) {
                Ok(body) if !body.errors.is_empty() => first_error(body.errors),
                _ => DomainError::Transport(format!("HTTP {}", status)),
            });
        }

        let body: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Decode(e.to_string()))?;

        if !body.errors.is_empty() {
            return Err(first_error(body.errors));
        }

        body.data
            .ok_or_else(|| DomainError::Decode("response has no data".to_string()))
    }
}

/// Server error for the first entry of a non-empty `errors` array
fn first_error(errors: Vec<GraphqlError>) -> DomainError {
    match errors.into_iter().next() {
        Some(first) => DomainError::server(first.extensions.and_then(|ext| ext.code), first.message),
        None => DomainError::Internal("empty GraphQL errors array".to_string()),
    }
}

/// Decode `data[field]`, failing with `NotFound` when it is null or missing
pub(crate) fn decode_field<T: DeserializeOwned>(data: &Value, field: &str) -> DomainResult<T> {
    match data.get(field) {
        None | Some(Value::Null) => Err(DomainError::NotFound(field.to_string())),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

/// Decode an optional `data[field]`, mapping null to `None`
pub(crate) fn decode_optional<T: DeserializeOwned>(data: &Value, field: &str) -> DomainResult<Option<T>> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

/// Unwrap a result union: members carrying `errorCode` become server errors
pub(crate) fn check_result_union(value: &Value) -> DomainResult<&Value> {
    match value.get("errorCode").and_then(Value::as_str) {
        Some(code) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(code)
                .to_string();
            Err(DomainError::server(Some(code.to_string()), message))
        }
        None => Ok(value),
    }
}

/// Read the `id` of a mutation result, accepting string or numeric ids
pub(crate) fn result_id(value: &Value) -> DomainResult<String> {
    match value.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(DomainError::Decode("mutation result has no id".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_result_union() {
        let ok = json!({ "id": "3" });
        assert!(check_result_union(&ok).is_ok());

        let err = json!({ "errorCode": "NEGATIVE_QUANTITY_ERROR", "message": "Quantity may not be negative" });
        assert_eq!(
            check_result_union(&err).unwrap_err(),
            DomainError::server(
                Some("NEGATIVE_QUANTITY_ERROR".to_string()),
                "Quantity may not be negative"
            )
        );
    }

    #[test]
    fn test_result_id_accepts_numbers() {
        assert_eq!(result_id(&json!({ "id": 17 })).unwrap(), "17");
        assert!(matches!(result_id(&json!({})), Err(DomainError::Decode(_))));
    }

    #[test]
    fn test_decode_field_null_is_not_found() {
        let data = json!({ "collection": null });
        let result: DomainResult<Value> = decode_field(&data, "collection");
        assert!(matches!(result, Err(DomainError::NotFound(_))));
        let optional: Option<Value> = decode_optional(&data, "collection").unwrap();
        assert!(optional.is_none());
    }
}
