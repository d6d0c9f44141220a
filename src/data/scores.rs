use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::engine::scoring::Award;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub user: String,
    pub pts: i64,
}

/// Cumulative all-time leaderboard, country key -> entries sorted descending
/// by points. The file behind this is the only durable record of the
/// competition, so a file that exists but fails to parse is a fatal load
/// error rather than a silent reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ScoreBoard {
    pub countries: BTreeMap<String, Vec<ScoreEntry>>,

    /// Run-scoped guard for `merge_once`. Not persisted: across runs the
    /// at-most-once-per-challenge rule stays a caller invariant.
    #[serde(skip)]
    ingested: HashSet<String>,
}

impl ScoreBoard {
    /// Loads the board from disk. A missing file starts an empty board; a
    /// malformed one is an error and must abort the run before any merge.
    pub async fn load(path: &Path) -> Result<ScoreBoard, crate::Error> {
        if !path.exists() {
            return Ok(ScoreBoard::default());
        }
        let data = tokio::fs::read(path).await?;
        let parsed: ScoreBoard = serde_json::from_slice(&data)?;
        Ok(parsed)
    }

    /// Adds each award to the user's running total for `country`, creating
    /// entries at zero as needed, then re-sorts the country descending by
    /// points. Additive, not a replace: merging the same batch twice doubles
    /// the totals. An empty batch is a no-op and creates no country entry.
    pub fn merge(&mut self, country: &str, awards: &[Award]) {
        if awards.is_empty() {
            return;
        }
        let entries = self.countries.entry(country.to_string()).or_default();
        for award in awards {
            match entries.iter_mut().find(|e| e.user == award.user) {
                Some(entry) => entry.pts += award.points,
                None => entries.push(ScoreEntry {
                    user: award.user.clone(),
                    pts: award.points,
                }),
            }
        }
        // Stable sort keeps tie order deterministic within a run.
        entries.sort_by(|a, b| b.pts.cmp(&a.pts));
    }

    /// Merge guarded by an idempotency key (challenge token + date). Returns
    /// false and leaves the board untouched when the key was already merged
    /// during this run.
    pub fn merge_once(&mut self, key: &str, country: &str, awards: &[Award]) -> bool {
        if !self.ingested.insert(key.to_string()) {
            return false;
        }
        self.merge(country, awards);
        true
    }

    pub fn top(&self, country: &str, limit: usize) -> &[ScoreEntry] {
        match self.countries.get(country) {
            Some(entries) => &entries[..entries.len().min(limit)],
            None => &[],
        }
    }

    /// Writes the full board, replacing the previous file in one rename.
    pub async fn save(&self, path: &Path) -> Result<(), crate::Error> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        let json = serde_json::to_vec_pretty(self)?;
        let tmp_path: PathBuf = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await?;
        match tokio::fs::rename(&tmp_path, path).await {
            Ok(()) => {}
            Err(_) => {
                tokio::fs::write(path, &json).await?;
                let _ = tokio::fs::remove_file(&tmp_path).await;
            }
        }
        Ok(())
    }
}
