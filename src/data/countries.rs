use std::collections::HashMap;
use std::sync::OnceLock;

use crate::data::config::CountryConfig;

/// One competition bucket. Built from static configuration at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub key: String,
    pub display_name: String,
    pub flag: String,
    pub channel_id: u64,
    pub map_url: String,
}

impl Country {
    pub fn from_config(cfg: &CountryConfig) -> Country {
        let key = normalize_country(&cfg.name);
        let flag = iso_alpha2(&key).map(flag_emoji).unwrap_or_default();
        Country {
            key,
            display_name: cfg.name.clone(),
            flag,
            channel_id: cfg.channel_id,
            map_url: cfg.map_url.clone(),
        }
    }
}

/// Normalizes a free-text country phrase into a stable key: lowercase,
/// truncated at the first comma, trimmed, spaces replaced with underscores.
pub fn normalize_country(raw: &str) -> String {
    raw.to_lowercase()
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .replace(' ', "_")
}

static ISO_ALPHA2_MAP: OnceLock<HashMap<String, String>> = OnceLock::new();

fn iso_alpha2_map() -> &'static HashMap<String, String> {
    ISO_ALPHA2_MAP.get_or_init(|| {
        let mut map = HashMap::new();
        let data = include_str!("../../assets/countries/iso_alpha2.txt");
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let key = parts.next().unwrap_or("").to_lowercase();
            let code = parts.next().unwrap_or("");
            if !key.is_empty() && !code.is_empty() {
                map.insert(key, code.to_string());
            }
        }
        map
    })
}

/// ISO 3166-1 alpha-2 code for a country name or normalized key.
pub fn iso_alpha2(name: &str) -> Option<&'static str> {
    let key = normalize_country(name);
    iso_alpha2_map().get(&key).map(|s| s.as_str())
}

/// Two-letter code to regional indicator symbols, e.g. "fr" -> 🇫🇷.
pub fn flag_emoji(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .filter_map(|c| char::from_u32(0x1F1E6 + (c.to_ascii_uppercase() as u32 - 'A' as u32)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::config::CountryConfig;

    #[test]
    fn normalize_lowercases_and_underscores() {
        assert_eq!(normalize_country("New Zealand"), "new_zealand");
    }

    #[test]
    fn normalize_truncates_at_comma() {
        assert_eq!(normalize_country("France, Metropolitan"), "france");
    }

    #[test]
    fn flag_for_known_country() {
        assert_eq!(iso_alpha2("France"), Some("fr"));
        assert_eq!(flag_emoji("fr"), "\u{1F1EB}\u{1F1F7}");
    }

    #[test]
    fn unknown_country_gets_empty_flag() {
        let c = Country::from_config(&CountryConfig {
            name: "Atlantis".to_string(),
            channel_id: 7,
            map_url: "https://x/maps/atlantis".to_string(),
        });
        assert_eq!(c.key, "atlantis");
        assert_eq!(c.flag, "");
    }

    #[test]
    fn country_from_config_derives_key_and_flag() {
        let c = Country::from_config(&CountryConfig {
            name: "United Kingdom".to_string(),
            channel_id: 7,
            map_url: "https://x/maps/uk".to_string(),
        });
        assert_eq!(c.key, "united_kingdom");
        assert_eq!(c.flag, "\u{1F1EC}\u{1F1E7}");
        assert_eq!(c.display_name, "United Kingdom");
    }
}
