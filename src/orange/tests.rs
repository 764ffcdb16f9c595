use reqwest::StatusCode;

use crate::orange::check_access;
use crate::orange::parser::{
    build_index, channel_from_raw, channel_groups, license_key, normalize_program,
    stream_descriptor,
};
use crate::orange::types::{RawChannel, RawProgram, RawStreamInfo};
use crate::provider::ProviderError;
use crate::{ChannelId, Drm};

fn channels_fixture() -> Vec<RawChannel> {
    serde_json::from_str(include_str!("fixtures/channels.json"))
        .expect("Expected channels fixture to decode")
}

fn programs_fixture() -> Vec<RawProgram> {
    serde_json::from_str(include_str!("fixtures/programs.json"))
        .expect("Expected programs fixture to decode")
}

fn stream_fixture() -> RawStreamInfo {
    serde_json::from_str(include_str!("fixtures/stream.json"))
        .expect("Expected stream fixture to decode")
}

#[test]
fn maps_channel_directory_records() {
    let channels: Vec<_> = channels_fixture().into_iter().map(channel_from_raw).collect();

    assert_eq!(4, channels.len());

    let tf1 = &channels[0];
    assert_eq!(tf1.id, ChannelId(192));
    assert_eq!(tf1.name, "TF1");
    assert_eq!(tf1.preset, 1);
    assert_eq!(
        tf1.logo,
        "https://proxymedia.woopic.com/api/v1/images/2090/logos/tf1_square.png"
    );
    assert_eq!(tf1.stream_url, "plugin://plugin.video.orange.fr/channel/192");
    assert_eq!(tf1.groups, vec!["TNT".to_string()]);
}

#[test]
fn accepts_string_channel_ids() {
    let channels: Vec<_> = channels_fixture().into_iter().map(channel_from_raw).collect();

    assert_eq!(channels[1].id, ChannelId(47));
    assert_eq!(channels[1].groups, vec!["TNT".to_string()]);
}

#[test]
fn assigns_group_membership_per_table() {
    let channels: Vec<_> = channels_fixture().into_iter().map(channel_from_raw).collect();

    assert_eq!(channels[2].groups, vec!["Généralistes".to_string()]);
    assert!(channels[3].groups.is_empty());
}

#[test]
fn a_channel_may_belong_to_several_groups() {
    let tables: [(&str, &[u64]); 3] = [
        ("Nationales", &[1, 2, 3]),
        ("Cinéma", &[3, 4]),
        ("Jeunesse", &[5]),
    ];

    assert_eq!(
        channel_groups(3, &tables),
        vec!["Nationales".to_string(), "Cinéma".to_string()]
    );
    assert!(channel_groups(9, &tables).is_empty());
}

#[test]
fn episode_records_take_title_from_the_series() {
    let (channel_id, program) = normalize_program(programs_fixture().remove(0))
        .expect("Expected episode record to normalize");

    assert_eq!(channel_id, ChannelId(192));
    assert_eq!(program.title, "Demain nous appartient");
    assert_eq!(program.subtitle.as_deref(), Some("Le grand saut"));
    assert_eq!(program.episode.as_deref(), Some("S2E5"));
}

#[test]
fn non_episode_records_keep_the_raw_title() {
    let (_, program) = normalize_program(programs_fixture().remove(1))
        .expect("Expected movie record to normalize");

    assert_eq!(program.title, "Les Tontons flingueurs");
    assert_eq!(program.subtitle, None);
    assert_eq!(program.episode, None);
}

#[test]
fn detailed_genre_wins_over_the_coarse_one() {
    let (_, episode) = normalize_program(programs_fixture().remove(0)).unwrap();
    assert_eq!(episode.genre.as_deref(), Some("Série dramatique"));

    let (_, movie) = normalize_program(programs_fixture().remove(1)).unwrap();
    assert_eq!(movie.genre.as_deref(), Some("Cinéma"));
}

#[test]
fn picks_the_16_9_cover_when_present() {
    let (_, episode) = normalize_program(programs_fixture().remove(0)).unwrap();
    assert_eq!(
        episode.image.as_deref(),
        Some("https://proxymedia.woopic.com/api/v1/images/2090/covers/dna_16_9.jpg")
    );

    // Null covers and covers without a 16:9 entry both yield no image.
    let (_, movie) = normalize_program(programs_fixture().remove(1)).unwrap();
    assert_eq!(movie.image, None);

    let (_, live) = normalize_program(programs_fixture().remove(2)).unwrap();
    assert_eq!(live.image, None);
}

#[test]
fn timestamps_span_the_diffusion_duration() {
    let (_, program) = normalize_program(programs_fixture().remove(0)).unwrap();

    assert_eq!(program.start.timestamp(), 1_700_000_000);
    assert_eq!(program.stop.timestamp(), 1_700_003_600);
}

#[test]
fn assembles_the_stream_descriptor_from_the_widevine_entry() {
    let descriptor =
        stream_descriptor(stream_fixture(), Drm::Widevine).expect("Expected descriptor");

    assert_eq!(
        descriptor.path,
        "https://mediation-tv.orange.fr/all/live/v3/streams/192/manifest.mpd"
    );
    assert_eq!(descriptor.mime_type, "application/xml+dash");
    assert_eq!(descriptor.manifest_type, "mpd");
    assert_eq!(descriptor.drm, "widevine");
    assert_eq!(descriptor.license_type, "com.widevine.alpha");
    assert!(descriptor.license_key.starts_with("https://lic.example/foo|"));
}

#[test]
fn missing_protection_system_is_a_data_inconsistency() {
    let mut raw = stream_fixture();
    raw.protection_data.clear();

    assert!(matches!(
        stream_descriptor(raw, Drm::Widevine),
        Err(ProviderError::DataInconsistency(_))
    ));
}

#[test]
fn forbidden_status_maps_to_the_access_denied_sentinel() {
    assert!(matches!(
        check_access(StatusCode::FORBIDDEN),
        Err(ProviderError::AccessDenied)
    ));
}

#[test]
fn other_statuses_pass_the_access_check() {
    assert!(check_access(StatusCode::OK).is_ok());
    assert!(check_access(StatusCode::INTERNAL_SERVER_ERROR).is_ok());
}

#[test]
fn index_keeps_earlier_windows_entries_first_within_a_channel() {
    // Records as concatenated from two consecutive guide windows: the
    // morning window returns two entries for channel 192 and one for
    // channel 205, the evening window one more for each.
    let raw: Vec<RawProgram> = serde_json::from_str(
        r#"[
            {"channelId": 192, "diffusionDate": 1700000000, "duration": 3600,
             "programType": "LIVE", "title": "Matinale", "synopsis": ""},
            {"channelId": 205, "diffusionDate": 1700000000, "duration": 7200,
             "programType": "LIVE", "title": "Télé-achat", "synopsis": ""},
            {"channelId": 192, "diffusionDate": 1700003600, "duration": 1800,
             "programType": "LIVE", "title": "Météo", "synopsis": ""},
            {"channelId": 192, "diffusionDate": 1700043200, "duration": 3600,
             "programType": "LIVE", "title": "Journal du soir", "synopsis": ""},
            {"channelId": 205, "diffusionDate": 1700043200, "duration": 5400,
             "programType": "LIVE", "title": "Soirée cinéma", "synopsis": ""}
        ]"#,
    )
    .unwrap();

    let index = build_index(raw);

    assert_eq!(index.len(), 2);

    let titles: Vec<&str> = index[&ChannelId(192)]
        .iter()
        .map(|program| program.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Matinale", "Météo", "Journal du soir"]);

    let titles: Vec<&str> = index[&ChannelId(205)]
        .iter()
        .map(|program| program.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Télé-achat", "Soirée cinéma"]);

    // Arrival order is chronological, so each channel's sequence is
    // ordered by start time.
    for programs in index.values() {
        assert!(programs.windows(2).all(|pair| pair[0].start <= pair[1].start));
    }
}

#[test]
fn license_key_has_four_pipe_delimited_fields() {
    let composite = license_key("https://lic.example/foo", "TestAgent/1.0");
    let fields: Vec<&str> = composite.split('|').collect();

    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0], "https://lic.example/foo");
    assert_eq!(fields[1], "Content-Type=&User-Agent=TestAgent/1.0&Host=lic.example");
    assert_eq!(fields[2], "R{SSM}");
    assert_eq!(fields[3], "");
}

#[test]
fn episode_without_series_data_falls_back_to_the_raw_title() {
    let raw: RawProgram = serde_json::from_str(
        r#"{
            "channelId": 4,
            "diffusionDate": 1700000000,
            "duration": 1800,
            "programType": "EPISODE",
            "title": "Sans série",
            "synopsis": "Entrée de guide incomplète."
        }"#,
    )
    .unwrap();

    let (channel_id, program) = normalize_program(raw).unwrap();

    assert_eq!(channel_id, ChannelId(4));
    assert_eq!(program.title, "Sans série");
    assert_eq!(program.subtitle, None);
    assert_eq!(program.episode, None);
}
