//! HTTP implementation of the fetch capability.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::listing::api::{FetchError, ListingApi};
use crate::listing::model::RequestParams;

/// `GET <base_url>?<params>` returning a JSON body of type `R`.
pub struct HttpListingApi<R> {
    client: Client,
    url: Url,
    _response: PhantomData<fn() -> R>,
}

impl<R> HttpListingApi<R> {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let url = Url::parse(&config.base_url).map_err(|e| FetchError::InvalidEndpoint {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        Ok(Self {
            client,
            url,
            _response: PhantomData,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl<R> ListingApi<RequestParams, R> for HttpListingApi<R>
where
    R: DeserializeOwned + Send + 'static,
{
    async fn get_all(&self, params: RequestParams) -> Result<R, FetchError> {
        let query = params.to_query_pairs();
        let mut url = self.url.clone();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(&query);
        }
        tracing::debug!(url = %url, "listing request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: self.url.to_string(),
                source: e,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            url: self.url.to_string(),
            source: e,
        })?;

        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).trim().to_string();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    message
                },
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
