use anyhow::Result;
use serde_json::{Value, json};
use std::collections::BTreeSet;

use crate::client::ApiClient;
use crate::models::Bookmark;
use crate::store::Store;

const MIRROR_KEY: &str = "bookmarks.json";

/// Local mirror of bookmarked job ids for O(1) membership checks.
/// This is the single client-side source of truth; it is refreshed
/// from the backend list and updated on every toggle.
#[derive(Debug, Default)]
pub struct BookmarkSet {
    ids: BTreeSet<String>,
}

impl BookmarkSet {
    pub fn load(store: &Store) -> Result<Self> {
        let ids: Vec<String> = store.get_json(MIRROR_KEY)?.unwrap_or_default();
        Ok(Self {
            ids: ids.into_iter().collect(),
        })
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        let ids: Vec<&String> = self.ids.iter().collect();
        store.set_json(MIRROR_KEY, &ids)
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.ids.contains(job_id)
    }

    pub fn insert(&mut self, job_id: &str) {
        self.ids.insert(job_id.to_string());
    }

    pub fn remove(&mut self, job_id: &str) {
        self.ids.remove(job_id);
    }

    pub fn replace_with(&mut self, job_ids: impl IntoIterator<Item = String>) {
        self.ids = job_ids.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// --- Read paths ---

pub fn list(api: &ApiClient) -> Vec<Bookmark> {
    match api.get("/bookmarks", &[]) {
        Ok(value) => bookmark_list(&value),
        Err(e) => {
            tracing::warn!("Bookmark listing failed: {e}");
            Vec::new()
        }
    }
}

/// Dedicated per-job membership check against the backend.
pub fn check(api: &ApiClient, job_id: &str) -> bool {
    match api.get(&format!("/bookmarks/check/{}", job_id), &[]) {
        Ok(value) => value
            .get("bookmarked")
            .and_then(Value::as_bool)
            .or_else(|| value.as_bool())
            .unwrap_or(false),
        Err(e) => {
            tracing::warn!("Bookmark check failed: {e}");
            false
        }
    }
}

/// Refresh the local mirror from an already-fetched backend listing,
/// so callers that display the list don't fetch it twice.
pub fn sync(store: &Store, bookmarks: &[Bookmark]) -> Result<BookmarkSet> {
    let mut set = BookmarkSet::load(store)?;
    set.replace_with(bookmarks.iter().map(|b| b.job_id.clone()));
    set.save(store)?;
    Ok(set)
}

// --- Write paths: errors propagate so the caller can report them ---

pub fn add(api: &ApiClient, store: &Store, job_id: &str) -> Result<()> {
    api.post("/bookmarks", &json!({ "jobId": job_id }))
        .inspect_err(|e| tracing::error!("Bookmark add failed: {e}"))?;
    let mut set = BookmarkSet::load(store)?;
    set.insert(job_id);
    set.save(store)
}

pub fn remove(api: &ApiClient, store: &Store, job_id: &str) -> Result<()> {
    api.delete(&format!("/bookmarks/{}", job_id))
        .inspect_err(|e| tracing::error!("Bookmark remove failed: {e}"))?;
    let mut set = BookmarkSet::load(store)?;
    set.remove(job_id);
    set.save(store)
}

fn bookmark_list(value: &Value) -> Vec<Bookmark> {
    let items = value
        .as_array()
        .or_else(|| value.get("bookmarks").and_then(Value::as_array));
    match items {
        Some(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_toggle_returns_membership_to_prior_state() {
        let mut set = BookmarkSet::default();
        set.insert("j1");
        let before = set.contains("j2");

        // add then remove
        set.insert("j2");
        set.remove("j2");
        assert_eq!(set.contains("j2"), before);

        // remove then add, starting from a member
        let before = set.contains("j1");
        set.remove("j1");
        set.insert("j1");
        assert_eq!(set.contains("j1"), before);
    }

    #[test]
    fn test_insert_is_idempotent_in_effect() {
        let mut set = BookmarkSet::default();
        set.insert("j1");
        set.insert("j1");
        assert_eq!(set.len(), 1);
        set.remove("j1");
        assert!(set.is_empty());
        // Removing a non-member is a no-op.
        set.remove("j1");
        assert!(set.is_empty());
    }

    #[test]
    fn test_mirror_persists_across_loads() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        let mut set = BookmarkSet::load(&store).unwrap();
        assert!(set.is_empty());
        set.insert("j1");
        set.insert("j2");
        set.save(&store).unwrap();

        let reloaded = BookmarkSet::load(&store).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("j1"));
        assert!(reloaded.contains("j2"));
    }

    #[test]
    fn test_sync_rewrites_mirror_from_listing() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        let mut stale = BookmarkSet::default();
        stale.insert("gone");
        stale.save(&store).unwrap();

        let listing = vec![
            Bookmark {
                id: "b1".to_string(),
                job_id: "j1".to_string(),
                job: None,
            },
            Bookmark {
                id: "b2".to_string(),
                job_id: "j2".to_string(),
                job: None,
            },
        ];
        let set = sync(&store, &listing).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("j1"));
        assert!(!set.contains("gone"));

        let reloaded = BookmarkSet::load(&store).unwrap();
        assert!(reloaded.contains("j2"));
        assert!(!reloaded.contains("gone"));
    }

    #[test]
    fn test_replace_with_overwrites_mirror() {
        let mut set = BookmarkSet::default();
        set.insert("stale");
        set.replace_with(vec!["j3".to_string()]);
        assert!(!set.contains("stale"));
        assert!(set.contains("j3"));
    }

    #[test]
    fn test_bookmark_list_shapes() {
        let wrapped = json!({"bookmarks": [{"_id": "b1", "jobId": "j1"}]});
        assert_eq!(bookmark_list(&wrapped).len(), 1);
        assert_eq!(bookmark_list(&wrapped)[0].job_id, "j1");

        let bare = json!([{"_id": "b1", "jobId": "j1"}]);
        assert_eq!(bookmark_list(&bare).len(), 1);

        assert!(bookmark_list(&json!({})).is_empty());
    }
}
