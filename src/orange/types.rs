//! Shapes of the Orange mediation API responses. Optional fields are
//! genuinely absent or null in the wild, so everything non-essential
//! decodes leniently.

use serde::{Deserialize, Deserializer};

use crate::ChannelId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawChannel {
    pub(crate) id: ChannelId,
    pub(crate) name: String,
    pub(crate) zapping_number: u32,
    pub(crate) logos: RawLogos,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLogos {
    pub(crate) square: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawStreamInfo {
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) protection_data: Vec<RawProtectionSystem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProtectionSystem {
    pub(crate) key_system: String,
    pub(crate) la_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawProgram {
    pub(crate) channel_id: ChannelId,
    /// Epoch seconds of the diffusion start.
    pub(crate) diffusion_date: i64,
    /// Seconds.
    pub(crate) duration: i64,
    pub(crate) program_type: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) season: Option<RawSeason>,
    #[serde(default)]
    pub(crate) episode_number: Option<u32>,
    #[serde(default)]
    pub(crate) synopsis: Option<String>,
    #[serde(default)]
    pub(crate) genre: Option<String>,
    #[serde(default)]
    pub(crate) genre_detailed: Option<String>,
    #[serde(default, deserialize_with = "lenient_covers")]
    pub(crate) covers: Vec<RawCover>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSeason {
    pub(crate) number: u32,
    pub(crate) serie: RawSerie,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSerie {
    pub(crate) title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCover {
    pub(crate) format: String,
    pub(crate) url: String,
}

// `covers` is sometimes null and sometimes not a list at all; anything
// that is not an array of covers counts as no covers.
fn lenient_covers<'de, D>(deserializer: D) -> Result<Vec<RawCover>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::Array(entries) => Ok(entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
