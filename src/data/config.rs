use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryConfig {
    pub name: String,
    pub channel_id: u64,
    pub map_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotConfig {
    pub countries: Vec<CountryConfig>,
    /// Challenge round time limit in seconds, forwarded to challenge creation.
    #[serde(rename = "time-limit", default = "default_time_limit")]
    pub time_limit: u32,
}

fn default_time_limit() -> u32 {
    60
}

impl BotConfig {
    pub async fn load(path: &Path) -> Result<BotConfig, crate::Error> {
        let data = tokio::fs::read(path).await?;
        let parsed: BotConfig = serde_json::from_slice(&data)?;
        Ok(parsed)
    }
}

impl CountryConfig {
    /// Last path segment of the configured map URL, used as the map id when
    /// creating a new challenge.
    pub fn map_id(&self) -> Option<&str> {
        self.map_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }
}
