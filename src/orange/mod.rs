mod parser;
mod types;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use reqwest::header::{HOST, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::epg::{self, TimeWindow};
use crate::provider::{ProviderError, ProviderInterface};
use crate::utils::{random_ua, url_host};
use crate::{Channel, ChannelId, Drm, EpgIndex, StreamDescriptor};

use types::{RawChannel, RawProgram, RawStreamInfo};

const CHANNELS_ENDPOINT: &str =
    "https://mediation-tv.orange.fr/all/live/v3/applications/PC/channels";
const STREAM_ENDPOINT: &str =
    "https://mediation-tv.orange.fr/all/live/v3/applications/PC/users/me/channels/{channel_id}/stream?terminalModel=WEB_PC";
const PROGRAMS_ENDPOINT: &str =
    "https://mediation-tv.orange.fr/all/live/v3/applications/PC/programs?period={period}&mco=OFR";
const STREAM_URI_TEMPLATE: &str = "plugin://plugin.video.orange.fr/channel/{channel_id}";

const CHUNKS_PER_DAY: u32 = 2;
const DRM: Drm = Drm::Widevine;

const GROUPS: [(&str, &[u64]); 2] = [
    (
        "TNT",
        &[
            192, 4, 80, 34, 47, 118, 111, 445, 119, 195, 446, 444, 234, 78, 481, 226, 458, 482,
            3163, 1404, 1401, 1403, 1402, 1400, 1399, 112, 2111,
        ],
    ),
    ("Généralistes", &[205, 191, 145, 115, 225]),
];

/// An upstream refusal is a distinct result, not a generic HTTP error;
/// nothing past this point runs for a forbidden response.
pub(crate) fn check_access(status: StatusCode) -> Result<(), ProviderError> {
    if status == StatusCode::FORBIDDEN {
        return Err(ProviderError::AccessDenied);
    }

    Ok(())
}

pub struct OrangeFranceProvider {
    client: Client,
}

impl OrangeFranceProvider {
    pub fn new() -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP Client");

        Self { client }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, random_ua())
            .header(HOST, url_host(url).unwrap_or_default())
            .send()
            .await?;

        check_access(response.status())?;

        let body = response.error_for_status()?.text().await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Guide query for one window. The Orange API takes the period
    /// bounds in milliseconds.
    async fn fetch_window(&self, window: TimeWindow) -> Result<Vec<RawProgram>, ProviderError> {
        let period = format!("{},{}", window.start * 1000, window.end * 1000);
        let url = PROGRAMS_ENDPOINT.replace("{period}", &period);

        self.get_json(&url).await
    }
}

impl Default for OrangeFranceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderInterface for OrangeFranceProvider {
    async fn list_channels(&self) -> Result<Vec<Channel>, ProviderError> {
        let raw: Vec<RawChannel> = self.get_json(CHANNELS_ENDPOINT).await?;

        Ok(raw.into_iter().map(parser::channel_from_raw).collect())
    }

    async fn resolve_stream(
        &self,
        channel_id: ChannelId,
    ) -> Result<StreamDescriptor, ProviderError> {
        let url = STREAM_ENDPOINT.replace("{channel_id}", &channel_id.to_string());
        let raw: RawStreamInfo = self.get_json(&url).await?;

        let descriptor = parser::stream_descriptor(raw, DRM)?;
        debug!(?descriptor, "resolved stream");

        Ok(descriptor)
    }

    async fn fetch_epg(&self, days: u32) -> Result<EpgIndex, ProviderError> {
        let day_start = epg::local_day_start();
        let raw = epg::collect_windows(day_start, days, CHUNKS_PER_DAY, |window| {
            self.fetch_window(window)
        })
        .await?;

        Ok(parser::build_index(raw))
    }
}
