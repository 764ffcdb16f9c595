use async_trait::async_trait;

use crate::{Channel, ChannelId, EpgIndex, StreamDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    /// The upstream refused the request outright (HTTP 403). Distinct
    /// from [`ProviderError::Transport`] so the consumer can show an
    /// access-denied state instead of a generic failure.
    #[error("access denied by upstream")]
    AccessDenied,
    #[error("inconsistent upstream data: {0}")]
    DataInconsistency(String),
}

/// Capability every upstream IPTV service implementation exposes.
///
/// Instances are immutable after construction and shared behind an
/// `Arc`, so they are safe to use concurrently without locking.
#[async_trait]
pub trait ProviderInterface: Send + Sync {
    /// Full channel directory, fetched in one upstream call.
    async fn list_channels(&self) -> Result<Vec<Channel>, ProviderError>;

    /// Stream metadata plus assembled DRM license information for one
    /// channel. Fails with [`ProviderError::AccessDenied`] when the
    /// upstream refuses the request.
    async fn resolve_stream(&self, channel_id: ChannelId)
        -> Result<StreamDescriptor, ProviderError>;

    /// Program guide for `days` calendar days counted forward from the
    /// start of the current local day.
    async fn fetch_epg(&self, days: u32) -> Result<EpgIndex, ProviderError>;
}
