use chrono::{DateTime, Local};
use tracing::warn;

use crate::provider::ProviderError;
use crate::utils::{random_ua, url_host};
use crate::{Channel, ChannelId, Drm, EpgIndex, Program, StreamDescriptor};

use super::types::{RawChannel, RawProgram, RawStreamInfo};
use super::{GROUPS, STREAM_URI_TEMPLATE};

const COVER_FORMAT_16_9: &str = "RATIO_16_9";
const LICENSE_POST_DATA: &str = "R{SSM}";
const MIME_TYPE: &str = "application/xml+dash";
const MANIFEST_TYPE: &str = "mpd";

/// Names of every group table the id appears in. An id may belong to
/// zero, one, or several groups.
pub(crate) fn channel_groups(id: u64, tables: &[(&str, &[u64])]) -> Vec<String> {
    tables
        .iter()
        .filter(|(_, ids)| ids.contains(&id))
        .map(|(name, _)| name.to_string())
        .collect()
}

pub(crate) fn channel_from_raw(raw: RawChannel) -> Channel {
    Channel {
        stream_url: STREAM_URI_TEMPLATE.replace("{channel_id}", &raw.id.to_string()),
        groups: channel_groups(*raw.id, &GROUPS),
        id: raw.id,
        name: raw.name,
        preset: raw.zapping_number,
        logo: raw.logos.square,
    }
}

/// Composite license key consumed by the DRM-capable player: four
/// pipe-delimited fields `<license URL>|<headers>|<post data>|<response>`.
pub(crate) fn license_key(license_url: &str, user_agent: &str) -> String {
    let headers = format!(
        "Content-Type=&User-Agent={}&Host={}",
        user_agent,
        url_host(license_url).unwrap_or_default()
    );

    format!("{license_url}|{headers}|{LICENSE_POST_DATA}|")
}

pub(crate) fn stream_descriptor(
    raw: RawStreamInfo,
    drm: Drm,
) -> Result<StreamDescriptor, ProviderError> {
    let license_url = raw
        .protection_data
        .iter()
        .find(|system| system.key_system == drm.key_system())
        .map(|system| system.la_url.clone())
        .ok_or_else(|| {
            ProviderError::DataInconsistency(format!(
                "no protection system matches {}",
                drm.key_system()
            ))
        })?;

    Ok(StreamDescriptor {
        license_key: license_key(&license_url, &random_ua()),
        path: raw.url,
        mime_type: MIME_TYPE.into(),
        manifest_type: MANIFEST_TYPE.into(),
        drm: drm.name().into(),
        license_type: drm.key_system().into(),
    })
}

/// Folds concatenated window results into the per-channel index. The
/// records arrive in window order, which is chronological, so each
/// channel's sequence stays ordered by start time without a re-sort.
pub(crate) fn build_index(raw_programs: Vec<RawProgram>) -> EpgIndex {
    let mut index = EpgIndex::new();

    for raw_program in raw_programs {
        if let Some((channel_id, program)) = normalize_program(raw_program) {
            index.entry(channel_id).or_default().push(program);
        }
    }

    index
}

/// Canonical program entry for one raw guide record. Records with
/// timestamps outside the representable range are dropped with a
/// warning rather than failing the whole guide.
pub(crate) fn normalize_program(raw: RawProgram) -> Option<(ChannelId, Program)> {
    let start = DateTime::from_timestamp(raw.diffusion_date, 0);
    let stop = DateTime::from_timestamp(raw.diffusion_date + raw.duration, 0);

    let (Some(start), Some(stop)) = (start, stop) else {
        warn!(
            channel_id = %raw.channel_id,
            diffusion_date = raw.diffusion_date,
            "dropping guide record with out-of-range timestamps"
        );
        return None;
    };

    let (title, subtitle, episode) = match (raw.program_type.as_str(), &raw.season) {
        ("EPISODE", Some(season)) => (
            season.serie.title.clone(),
            Some(raw.title),
            raw.episode_number
                .map(|episode| format!("S{}E{}", season.number, episode)),
        ),
        ("EPISODE", None) => {
            // Episode entries normally carry their series; fall back to
            // the plain-title mapping when the upstream omits it.
            warn!(channel_id = %raw.channel_id, title = %raw.title, "episode without series data");
            (raw.title, None, None)
        }
        _ => (raw.title, None, None),
    };

    let image = raw
        .covers
        .iter()
        .find(|cover| cover.format == COVER_FORMAT_16_9)
        .map(|cover| cover.url.clone());

    let program = Program {
        start: start.with_timezone(&Local),
        stop: stop.with_timezone(&Local),
        title,
        subtitle,
        episode,
        description: raw.synopsis.unwrap_or_default(),
        genre: raw.genre_detailed.or(raw.genre),
        image,
    };

    Some((raw.channel_id, program))
}
