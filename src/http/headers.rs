use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::ScrapeError;

/// Header set sent with every catalog request.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9,en-GB;q=0.8,en-CA;q=0.7";

const PLATFORMS: [&str; 3] = [
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
];

pub fn default_request_headers() -> HashMap<String, String> {
    HashMap::from([("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string())])
}

/// A desktop browser user agent with a randomized platform and version.
pub fn browser_user_agent() -> String {
    let mut rng = rand::rng();

    let platform = PLATFORMS.choose(&mut rng).copied().unwrap_or(PLATFORMS[0]);
    let browser = match rng.random_range(0..3) {
        0 => format!("Chrome/{}.0.0.0 Safari/537.36", 120 + rng.random_range(0..15)),
        1 => format!("Firefox/{}.0", 115 + rng.random_range(0..20)),
        _ => format!(
            "Chrome/{v}.0.0.0 Safari/537.36 Edg/{v}.0.0.0",
            v = 120 + rng.random_range(0..15)
        ),
    };

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) {}",
        platform, browser
    )
}

pub fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, ScrapeError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = |reason: String| ScrapeError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        let key = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(key, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_looks_like_a_browser() {
        for _ in 0..20 {
            let ua = browser_user_agent();
            assert!(ua.starts_with("Mozilla/5.0 ("));
            assert!(PLATFORMS.iter().any(|p| ua.contains(p)));
        }
    }

    #[test]
    fn default_headers_convert() {
        let map = to_header_map(&default_request_headers()).unwrap();
        assert_eq!(map.get("accept-language").unwrap(), ACCEPT_LANGUAGE);
    }

    #[test]
    fn bad_header_name_is_rejected() {
        let headers = HashMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(matches!(
            to_header_map(&headers),
            Err(ScrapeError::InvalidHeader { name, .. }) if name == "bad header"
        ));
    }
}
