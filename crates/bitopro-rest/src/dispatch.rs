//! HTTP request dispatcher
//!
//! One place owns the wire mechanics for every verb: URL assembly, header
//! merging, status mapping and the single diagnostic log line on failure.
//! Endpoint modules compose paths and bodies and hand them here.

use crate::error::{RestError, RestResult};
use bitopro_auth::{AuthHeaders, API_HEADER, SDK_IDENTIFIER};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

/// Dispatches requests against one REST base URL
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    client: Client,
    base_url: String,
}

impl Dispatcher {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// GET `base_url + path`, query params appended as `k=v` pairs
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: Option<&AuthHeaders>,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        let mut request = self.client.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(self.headers(request, auth), "GET", path).await
    }

    /// POST a JSON body; the same serde serialization the signature was
    /// computed over, so the signed payload matches the bytes on the wire
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        auth: &AuthHeaders,
        body: &B,
    ) -> RestResult<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(self.headers(request, Some(auth)), "POST", path)
            .await
    }

    /// PUT a JSON body (batch cancel uses this verb)
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        auth: &AuthHeaders,
        body: &B,
    ) -> RestResult<T> {
        let request = self.client.put(self.url(path)).json(body);
        self.send(self.headers(request, Some(auth)), "PUT", path)
            .await
    }

    /// DELETE `base_url + path`
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &AuthHeaders,
    ) -> RestResult<T> {
        let request = self.client.delete(self.url(path));
        self.send(self.headers(request, Some(auth)), "DELETE", path)
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fixed identification header first, auth headers merged over it
    fn headers(&self, mut request: RequestBuilder, auth: Option<&AuthHeaders>) -> RequestBuilder {
        request = request.header(API_HEADER, SDK_IDENTIFIER);
        if let Some(auth) = auth {
            for (name, value) in auth.pairs() {
                request = request.header(name, value);
            }
        }
        request
    }

    /// Single-attempt send with normalized failure mapping
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> RestResult<T> {
        debug!("{} {}", method, path);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                error!("{} {} failed: {}", method, path, err);
                return Err(RestError::Transport {
                    status: None,
                    body: None,
                    message: err.to_string(),
                });
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("{} {} failed reading body: {}", method, path, err);
                return Err(RestError::Transport {
                    status: Some(status.as_u16()),
                    body: None,
                    message: err.to_string(),
                });
            }
        };

        if !status.is_success() {
            let body: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();
            error!(
                "{} {} failed: {} {}",
                method,
                path,
                status.as_u16(),
                body.as_ref()
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned()),
            );
            return Err(RestError::Transport {
                status: Some(status.as_u16()),
                body,
                message: format!("unexpected status {}", status.as_u16()),
            });
        }

        if bytes.is_empty() {
            return Err(RestError::EmptyResponse);
        }

        serde_json::from_slice(&bytes).map_err(|err| RestError::Parse(err.to_string()))
    }
}
