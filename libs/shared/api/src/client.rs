use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{ApiEnvelope, AppError, Empty};

/// JSON client of the backend REST API. One instance is shared by
/// every cell service.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    tenant: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            tenant: config.tenant.clone(),
        }
    }

    fn headers(&self, token: Option<&str>) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| AppError::Validation("API key is not a valid header value".to_string()))?,
        );
        headers.insert(
            "x-tenant",
            HeaderValue::from_str(&self.tenant)
                .map_err(|_| AppError::Validation("tenant is not a valid header value".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    AppError::Validation("token is not a valid header value".to_string())
                })?,
            );
        }

        Ok(headers)
    }

    /// Sends the request and parses the body, also handing back the
    /// HTTP status so envelope unwrapping can report it.
    async fn dispatch<T>(&self, method: Method, path: &str,
                         token: Option<&str>, body: Option<Value>)
                         -> Result<(u16, T), AppError>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let headers = self.headers(token)?;

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| AppError::Network(e.to_string()))?;
            error!("API error ({}): {}", status, error_text);

            // Non-2xx bodies usually still follow the envelope shape;
            // fall back to the raw text when they don't.
            let message = serde_json::from_str::<ApiEnvelope<Empty>>(&error_text)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(error_text);

            return Err(match status.as_u16() {
                404 => AppError::NotFound(message),
                409 => AppError::Conflict(message),
                s => AppError::Api { status: s, message },
            });
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| AppError::Deserialize(e.to_string()))?;
        Ok((status.as_u16(), parsed))
    }

    pub async fn request<T>(&self, method: Method, path: &str,
                            token: Option<&str>, body: Option<Value>)
                            -> Result<T, AppError>
    where T: DeserializeOwned {
        let (_, parsed) = self.dispatch(method, path, token, body).await?;
        Ok(parsed)
    }

    /// GET an enveloped resource and unwrap its `data`.
    pub async fn get_data<T>(&self, path: &str, token: Option<&str>) -> Result<T, AppError>
    where T: DeserializeOwned {
        let (status, envelope) = self
            .dispatch::<ApiEnvelope<T>>(Method::GET, path, token, None)
            .await?;
        envelope.into_result(status)
    }

    /// POST a JSON body and unwrap the enveloped `data`.
    pub async fn post_data<T>(&self, path: &str, token: Option<&str>,
                              body: Value) -> Result<T, AppError>
    where T: DeserializeOwned {
        let (status, envelope) = self
            .dispatch::<ApiEnvelope<T>>(Method::POST, path, token, Some(body))
            .await?;
        envelope.into_result(status)
    }

    /// PUT a JSON body and unwrap the enveloped `data`.
    pub async fn put_data<T>(&self, path: &str, token: Option<&str>,
                             body: Value) -> Result<T, AppError>
    where T: DeserializeOwned {
        let (status, envelope) = self
            .dispatch::<ApiEnvelope<T>>(Method::PUT, path, token, Some(body))
            .await?;
        envelope.into_result(status)
    }

    /// PUT whose acknowledgement carries no payload.
    pub async fn put_ack(&self, path: &str, token: Option<&str>,
                         body: Value) -> Result<Option<String>, AppError> {
        let (status, envelope) = self
            .dispatch::<ApiEnvelope<Empty>>(Method::PUT, path, token, Some(body))
            .await?;
        envelope.into_ack(status)
    }

    /// DELETE whose acknowledgement carries no payload.
    pub async fn delete_empty(&self, path: &str, token: Option<&str>)
                              -> Result<Option<String>, AppError> {
        let (status, envelope) = self
            .dispatch::<ApiEnvelope<Empty>>(Method::DELETE, path, token, None)
            .await?;
        envelope.into_ack(status)
    }
}
