// HTTP sample source - single GET against the temperature endpoint
use crate::application::sample_source::{FetchError, SampleSource};
use crate::domain::sample::RawSample;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSampleSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSampleSource {
    pub fn new(url: String, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    async fn fetch(&self) -> Result<Vec<RawSample>, FetchError> {
        tracing::debug!("Fetching temperatures from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        response
            .json::<Vec<RawSample>>()
            .await
            .map_err(FetchError::Decode)
    }
}
