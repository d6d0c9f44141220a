use serde_json::Value;

use crate::engine::scoring::PlayerTelemetry;

const API_BASE: &str = "https://www.geoguessr.com/api/v3";
const USER_AGENT: &str = "daily-challenge-bot/0.1.0 (+https://github.com)";

/// Thin GeoGuessr API wrapper. Holds the `_ncfa` session cookie; everything
/// else is per-call.
pub struct GeoClient {
    http: reqwest::Client,
    ncfa: String,
}

impl GeoClient {
    pub fn new(ncfa: String) -> Self {
        GeoClient {
            http: reqwest::Client::new(),
            ncfa,
        }
    }

    /// Highscores for one challenge, in the order the service returns them
    /// (relevant for tie-breaking later). An unplayed challenge comes back
    /// as an empty list.
    pub async fn challenge_scores(&self, token: &str) -> Result<Vec<PlayerTelemetry>, crate::Error> {
        let url = format!("{}/results/highscores/{}?friends=false&limit=26", API_BASE, token);
        let res = self
            .http
            .get(&url)
            .header("user-agent", USER_AGENT)
            .header("cookie", format!("_ncfa={}", self.ncfa))
            .send()
            .await?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !res.status().is_success() {
            return Err(format!("highscores request failed: {}", res.status()).into());
        }
        let body: Value = res.json().await?;
        Ok(parse_highscores(&body))
    }

    /// Creates tomorrow's challenge on the given map and returns its token.
    pub async fn create_challenge(&self, map_id: &str, time_limit: u32) -> Result<String, crate::Error> {
        let url = format!("{}/challenges", API_BASE);
        let payload = serde_json::json!({
            "map": map_id,
            "timeLimit": time_limit,
            "forbidMoving": false,
            "forbidRotating": false,
            "forbidZooming": false,
        });
        let res = self
            .http
            .post(&url)
            .header("user-agent", USER_AGENT)
            .header("cookie", format!("_ncfa={}", self.ncfa))
            .json(&payload)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(format!("challenge creation failed: {}", res.status()).into());
        }
        let body: Value = res.json().await?;
        body.get("token")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| "challenge creation response had no token".into())
    }
}

fn parse_highscores(body: &Value) -> Vec<PlayerTelemetry> {
    let items = match body.get("items").and_then(|v| v.as_array()) {
        Some(items) => items,
        None => return Vec::new(),
    };
    items
        .iter()
        .map(|item| {
            let player = item.get("game").and_then(|g| g.get("player")).unwrap_or(item);
            PlayerTelemetry {
                player_id: player
                    .get("id")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
                raw_score: extract_total_score(player),
                raw_display_name: player
                    .get("nick")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string(),
            }
        })
        .collect()
}

// totalScore.amount arrives as a decimal string on current payloads and as a
// bare number on older ones.
fn extract_total_score(player: &Value) -> Option<i64> {
    let amount = player.get("totalScore").and_then(|t| t.get("amount"))?;
    if let Some(n) = amount.as_i64() {
        return Some(n);
    }
    amount.as_str().and_then(|s| s.parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_highscores_payload() {
        let body: Value = serde_json::json!({
            "items": [
                {"game": {"player": {"id": "g-1", "nick": "alice", "totalScore": {"amount": "24750"}}}},
                {"game": {"player": {"id": "g-2", "nick": "bob", "totalScore": {"amount": 18000}}}},
            ]
        });
        let parsed = parse_highscores(&body);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].player_id.as_deref(), Some("g-1"));
        assert_eq!(parsed[0].raw_score, Some(24750));
        assert_eq!(parsed[1].raw_display_name, "bob");
        assert_eq!(parsed[1].raw_score, Some(18000));
    }

    #[test]
    fn missing_fields_stay_none() {
        let body: Value = serde_json::json!({
            "items": [{"game": {"player": {"nick": "ghost"}}}]
        });
        let parsed = parse_highscores(&body);
        assert_eq!(parsed[0].player_id, None);
        assert_eq!(parsed[0].raw_score, None);
        assert_eq!(parsed[0].raw_display_name, "ghost");
    }

    #[test]
    fn payload_without_items_is_empty() {
        assert!(parse_highscores(&serde_json::json!({})).is_empty());
    }
}
