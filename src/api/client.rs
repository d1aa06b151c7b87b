//! Base HTTP client for the library API
//!
//! Provides the shared GET/POST JSON plumbing plus the one streaming
//! endpoint (`/chat`). The deployed API passes scalar parameters in request
//! headers and JSON bodies for mutations.

use crate::chat::transport::ByteStream;
use crate::errors::{ClientError, Result};
use futures_util::StreamExt;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Production deployment of the library API
pub const DEFAULT_BASE_URL: &str = "https://library-api-production-dccc.up.railway.app";

/// Request timeout (30 seconds)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Library API client
#[derive(Debug, Clone)]
pub struct LibraryClient {
    http: Client,
    base_url: String,
}

impl LibraryClient {
    /// Create a client against the production API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom deployment
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a JSON endpoint, passing scalar parameters as request headers
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let mut request = self.http.get(self.url(path));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = Self::check_status(request.send().await?).await?;
        response.json().await.map_err(ClientError::Http)
    }

    /// POST a JSON body and decode a JSON response
    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let response = Self::check_status(response).await?;
        response.json().await.map_err(ClientError::Http)
    }

    /// Open the streaming chat endpoint for one query
    ///
    /// The query travels verbatim in the `query` request header; the
    /// response body is an unframed UTF-8 text stream.
    pub async fn chat_stream(&self, query: &str) -> Result<ByteStream> {
        let response = self
            .http
            .get(self.url("chat"))
            .header("query", query)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let stream = response
            .bytes_stream()
            .map(|result| result.map_err(|e| ClientError::Streaming(e.to_string())));

        Ok(Box::pin(stream))
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::Api { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LibraryClient::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_custom_base_url_trims_trailing_slash() {
        let client = LibraryClient::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("chat"), "http://localhost:8080/chat");
    }
}
