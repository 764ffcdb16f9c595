mod config;
mod epg;
mod orange;
mod provider;
mod registry;
mod utils;

use std::collections::HashMap;
use std::ops::Deref;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use config::Config;
pub use epg::{collect_windows, local_day_start, windows, TimeWindow};
pub use orange::OrangeFranceProvider;
pub use provider::{ProviderError, ProviderInterface};
pub use registry::{ProviderKey, ProviderRegistry};

#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug, Serialize)]
pub struct ChannelId(pub(crate) u64);

impl From<u64> for ChannelId {
    fn from(id: u64) -> Self {
        ChannelId(id)
    }
}

impl Deref for ChannelId {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The upstream APIs are inconsistent about whether channel ids are JSON
// numbers or strings, so accept both.
impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;

        match value {
            serde_json::Value::Number(number) => number
                .as_u64()
                .map(ChannelId)
                .ok_or_else(|| D::Error::custom("channel id is not an unsigned integer")),
            serde_json::Value::String(string) => string
                .parse::<u64>()
                .map(ChannelId)
                .map_err(|_| D::Error::custom("channel id string is not an unsigned integer")),
            _ => Err(D::Error::custom("expected number or string channel id")),
        }
    }
}

/// Content-protection scheme governing license acquisition.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum Drm {
    Widevine,
    PlayReady,
}

impl Drm {
    pub fn key_system(&self) -> &'static str {
        match self {
            Drm::Widevine => "com.widevine.alpha",
            Drm::PlayReady => "com.microsoft.playready",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Drm::Widevine => "widevine",
            Drm::PlayReady => "playready",
        }
    }
}

#[derive(PartialEq, Clone, Debug, Serialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub preset: u32,
    pub logo: String,
    pub stream_url: String,
    pub groups: Vec<String>,
}

/// Everything a DRM-capable player needs for one playback attempt.
/// Never persisted; assembled per stream resolution.
#[derive(PartialEq, Clone, Debug, Serialize)]
pub struct StreamDescriptor {
    pub path: String,
    pub mime_type: String,
    pub manifest_type: String,
    pub drm: String,
    pub license_type: String,
    pub license_key: String,
}

#[derive(PartialEq, Clone, Debug, Serialize)]
pub struct Program {
    pub start: DateTime<Local>,
    pub stop: DateTime<Local>,
    pub title: String,
    pub subtitle: Option<String>,
    pub episode: Option<String>,
    pub description: String,
    pub genre: Option<String>,
    pub image: Option<String>,
}

pub type EpgIndex = HashMap<ChannelId, Vec<Program>>;
