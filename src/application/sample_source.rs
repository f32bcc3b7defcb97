// Source trait for fetching raw temperature samples
use crate::domain::sample::RawSample;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach sample source: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("sample source answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode samples: {0}")]
    Decode(#[source] reqwest::Error),
}

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch every sample the source currently serves, in source order.
    async fn fetch(&self) -> Result<Vec<RawSample>, FetchError>;
}
