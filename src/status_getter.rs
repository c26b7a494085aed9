use log::{debug, error};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;

use crate::errors::PollError;

const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// A trait, necessary for every entity that will be used for getting homework
/// statuses from the review API.
#[allow(async_fn_in_trait)]
pub trait StatusGetter {
    /// Fetches everything that changed since `timestamp` (Unix seconds).
    /// Returns the decoded body as-is; semantic shape is checked later by
    /// [`crate::helpers::check_response`].
    async fn get_statuses(&self, timestamp: i64) -> Result<Value, PollError>;
}

/// Client of the Practicum homework review API.
pub struct PracticumClient {
    http_client: Client,
    token: String,
}

impl PracticumClient {
    pub fn new(http_client: Client, token: &str) -> Self {
        Self {
            http_client,
            token: token.to_owned(),
        }
    }
}

/// Pulls the `message` field out of an error body, falling back to a generic
/// text when the body is not JSON or carries no message.
fn error_message_from_body(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_owned()
}

impl StatusGetter for PracticumClient {
    async fn get_statuses(&self, timestamp: i64) -> Result<Value, PollError> {
        debug!("Requesting homework statuses from {}", timestamp);
        let response = self
            .http_client
            .get(ENDPOINT)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(|transport_error| {
                error!("API request failed: {}", transport_error);
                transport_error
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|transport_error| {
            error!("Failed to read API response body: {}", transport_error);
            transport_error
        })?;

        if status != StatusCode::OK {
            let message = error_message_from_body(&body);
            error!("API answered with status {}: {}", status.as_u16(), message);
            return Err(PollError::EndpointStatus {
                status: status.as_u16(),
                message,
            });
        }

        // A corrupt body on a 200 is a hard fault, never swallowed.
        serde_json::from_str(&body).map_err(|decode_error| {
            error!("API response body is not valid JSON: {}", decode_error);
            PollError::Decode(decode_error)
        })
    }
}
