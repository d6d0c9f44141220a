use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the static lookup table mapping a GeoGuessr account id to a
/// Discord user id. Read-only during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMapping {
    pub user_id: String,
    pub discord_id: u64,
}

pub async fn load_user_mappings(path: &Path) -> Result<Vec<UserMapping>, crate::Error> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = tokio::fs::read(path).await?;
    let parsed: Vec<UserMapping> = serde_json::from_slice(&data)?;
    Ok(parsed)
}
