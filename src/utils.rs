use rand::seq::SliceRandom;
use rand::Rng;

const PLATFORMS: [&str; 3] = [
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
];

/// Fresh randomized desktop-browser user agent. The upstream services
/// expect a generic web client, so this is generated per request and
/// never cached.
pub(crate) fn random_ua() -> String {
    let mut rng = rand::thread_rng();
    let platform = PLATFORMS
        .choose(&mut rng)
        .expect("platform table is non-empty");
    let major: u32 = rng.gen_range(118..=125);

    format!(
        "Mozilla/5.0 ({platform}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{major}.0.0.0 Safari/537.36"
    )
}

/// Host header value for a request, taken from the URL authority.
pub(crate) fn url_host(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;

    match parsed.port() {
        Some(port) => Some(format!("{host}:{port}")),
        None => Some(host.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{random_ua, url_host};

    #[test]
    fn user_agent_looks_like_a_desktop_browser() {
        let ua = random_ua();

        assert!(ua.starts_with("Mozilla/5.0 ("));
        assert!(ua.contains("Chrome/"));
        assert!(ua.ends_with("Safari/537.36"));
    }

    #[test]
    fn host_is_taken_from_the_url_authority() {
        assert_eq!(
            url_host("https://mediation-tv.orange.fr/all/live/v3/applications/PC/channels"),
            Some("mediation-tv.orange.fr".to_string())
        );
        assert_eq!(
            url_host("https://lic.example:8443/foo"),
            Some("lic.example:8443".to_string())
        );
        assert_eq!(url_host("not a url"), None);
    }
}
