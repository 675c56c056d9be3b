//! Snapshot persistence
//!
//! The engines are stateless; history lives behind `SnapshotStore`, owned by the
//! calling layer. `JsonFileStore` keeps one pretty-printed JSON file per snapshot:
//! `<dir>/<listing_id>/<snapshot_id>.json`

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::ListingSnapshot;
use crate::{Error, Result};

/// Storage for listing history
pub trait SnapshotStore: Send + Sync {
    /// Persist a snapshot, returning where it was written
    fn save(&self, snapshot: &ListingSnapshot) -> Result<String>;

    /// All snapshots for a listing, oldest first
    fn history(&self, listing_id: &str) -> Result<Vec<ListingSnapshot>>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn listing_dir(&self, listing_id: &str) -> Result<PathBuf> {
        validate_id(listing_id)?;
        Ok(self.dir.join(listing_id))
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &ListingSnapshot) -> Result<String> {
        let dir = self.listing_dir(&snapshot.listing_id)?;
        validate_id(&snapshot.id)?;

        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{}.json", snapshot.id));
        std::fs::write(&path, json)?;

        debug!(path = %path.display(), "Saved snapshot");
        Ok(path.display().to_string())
    }

    fn history(&self, listing_id: &str) -> Result<Vec<ListingSnapshot>> {
        let dir = self.listing_dir(listing_id)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut snapshots = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match load_snapshot(&path) {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable snapshot"),
            }
        }

        snapshots.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(snapshots)
    }
}

/// Load one snapshot file
pub fn load_snapshot(path: &Path) -> Result<ListingSnapshot> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Ids become path components; keep them to a safe alphabet
fn validate_id(id: &str) -> Result<()> {
    let ok = !id.is_empty()
        && id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(Error::precondition(format!("invalid storage id: {:?}", id)))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn make_snapshot(listing_id: &str, id: &str, minutes: i64) -> ListingSnapshot {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
        ListingSnapshot {
            id: id.to_string(),
            listing_id: listing_id.to_string(),
            created_at,
            fingerprint: "ab".repeat(32),
            lqs_score: 71.5,
            lqs_visual_score: 25.0,
            lqs_seo_score: 22.5,
            lqs_zeitgeist_score: 24.0,
            lqs_reason: "Visual: 25.0/35, SEO: 22.5/35, Zeitgeist: 24.0/30".to_string(),
            suggested_title: "Ceramic Mug".to_string(),
            suggested_tags: vec!["Ceramic Mug".to_string()],
            predicted_price_min: 19.51,
            predicted_price_optimal: 22.95,
            predicted_price_max: 28.69,
            price_reason: "Quality-based valuation".to_string(),
            is_trendsetter: false,
        }
    }

    #[test]
    fn test_save_and_history_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(&make_snapshot("L-1", "snap_b", 10)).unwrap();
        store.save(&make_snapshot("L-1", "snap_a", 0)).unwrap();
        store.save(&make_snapshot("L-2", "snap_c", 5)).unwrap();

        let history = store.history("L-1").unwrap();
        let ids: Vec<&str> = history.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["snap_a", "snap_b"]);
    }

    #[test]
    fn test_unknown_listing_has_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.history("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let snapshot = make_snapshot("L-1", "snap_x", 0);

        let path = store.save(&snapshot).unwrap();
        let loaded = load_snapshot(Path::new(&path)).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_corrupt_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(&make_snapshot("L-1", "snap_ok", 0)).unwrap();
        std::fs::write(dir.path().join("L-1").join("broken.json"), "{not json").unwrap();

        let history = store.history("L-1").unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.history("../etc").unwrap_err().is_precondition());
        assert!(store.save(&make_snapshot("..", "snap", 0)).is_err());
        assert!(store.save(&make_snapshot("L-1", "a/b", 0)).is_err());
    }
}
