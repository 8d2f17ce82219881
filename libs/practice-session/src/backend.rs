// Judge service boundary
// The session only ever sees `Backend`; HTTP lives here

use async_trait::async_trait;
use practice_common::api;
use practice_common::config::ClientConfig;
use practice_common::types::{Catalog, JudgeRequest, ResultSet};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::BackendError;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the whole catalog
    async fn list(&self) -> Result<Catalog, BackendError>;

    /// Run one submission through the judge
    async fn judge(&self, request: &JudgeRequest) -> Result<ResultSet, BackendError>;
}

/// `Backend` over the judge service's JSON HTTP API
///
/// No request timeout is set: a judge that never answers leaves the results
/// region as it was.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    list_url: String,
    judge_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let http = Client::builder()
            .build()
            .map_err(|source| BackendError::Transport {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            list_url: api::list_url(&config.base_url),
            judge_url: api::judge_url(&config.base_url),
            credentials: config
                .credentials()
                .map(|(user, password)| (user.to_string(), password.map(str::to_string))),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((user, password)) => request.basic_auth(user, password.as_deref()),
            None => request,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let transport = |source| BackendError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.authorize(request).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(url = %url, bytes = body.len(), "Response received");

        serde_json::from_slice(&body).map_err(|source| BackendError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list(&self) -> Result<Catalog, BackendError> {
        self.fetch(&self.list_url, self.http.get(&self.list_url))
            .await
    }

    async fn judge(&self, request: &JudgeRequest) -> Result<ResultSet, BackendError> {
        self.fetch(&self.judge_url, self.http.post(&self.judge_url).json(request))
            .await
    }
}
