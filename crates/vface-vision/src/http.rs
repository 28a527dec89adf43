//! Authenticated JSON transport shared by the detection clients.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{VisionError, VisionResult};
use crate::metrics::record_request;
use crate::retry::{with_retry, RetryConfig};
use crate::token::AccessTokenSource;

/// Bearer-authenticated JSON client with retry.
#[derive(Clone)]
pub struct GoogleApiTransport {
    http: Client,
    tokens: Arc<dyn AccessTokenSource>,
    retry: RetryConfig,
}

impl GoogleApiTransport {
    pub fn new(
        tokens: Arc<dyn AccessTokenSource>,
        request_timeout: Duration,
        retry: RetryConfig,
    ) -> VisionResult<Self> {
        let http = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("vface-vision/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(VisionError::Network)?;

        Ok(Self { http, tokens, retry })
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, operation: &str, url: &str, body: &B) -> VisionResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        with_retry(&self.retry, operation, || async {
            self.send(operation, self.http.post(url).json(body)).await
        })
        .await
    }

    /// GET and decode the JSON response.
    pub async fn get_json<T>(&self, operation: &str, url: &str) -> VisionResult<T>
    where
        T: DeserializeOwned,
    {
        with_retry(&self.retry, operation, || async {
            self.send(operation, self.http.get(url)).await
        })
        .await
    }

    async fn send<T: DeserializeOwned>(&self, operation: &str, request: RequestBuilder) -> VisionResult<T> {
        let token = self.tokens.access_token().await?;
        let start = Instant::now();

        let response = request.bearer_auth(&token).send().await?;
        let status = response.status();
        record_request(operation, status.as_u16(), start.elapsed().as_secs_f64());

        let body = response.text().await?;
        debug!(operation = %operation, status = %status, bytes = body.len(), "Detection response received");

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                self.tokens.invalidate().await;
            }
            return Err(VisionError::from_http_status(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
