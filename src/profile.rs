use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::Store;

const PROFILE_KEY: &str = "profile.json";

/// Candidate profile. Held locally only — the backend never sees it;
/// edits live in `profile.json` next to the session token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub completeness: u8,
}

impl ProfileData {
    pub fn load(store: &Store) -> Result<Self> {
        Ok(store.get_json(PROFILE_KEY)?.unwrap_or_default())
    }

    /// Recomputes the completeness score, then persists.
    pub fn save(&mut self, store: &Store) -> Result<()> {
        self.completeness = completeness(self);
        store.set_json(PROFILE_KEY, self)
    }
}

/// Weighted completeness heuristic, 0-100. Skills carry the most
/// weight since they drive recommendations.
pub fn completeness(profile: &ProfileData) -> u8 {
    let mut score = 0u8;
    if !profile.name.trim().is_empty() {
        score += 15;
    }
    if !profile.title.trim().is_empty() {
        score += 10;
    }
    if !profile.bio.trim().is_empty() {
        score += 15;
    }
    if !profile.email.trim().is_empty() {
        score += 10;
    }
    if !profile.phone.trim().is_empty() {
        score += 5;
    }
    if !profile.location.trim().is_empty() {
        score += 5;
    }
    if !profile.skills.is_empty() {
        score += 20;
    }
    if !profile.experience.is_empty() {
        score += 10;
    }
    if !profile.education.is_empty() {
        score += 10;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(completeness(&ProfileData::default()), 0);
    }

    #[test]
    fn test_full_profile_scores_hundred() {
        let profile = ProfileData {
            name: "Jane Doe".to_string(),
            title: "Rust Engineer".to_string(),
            bio: "Ships software.".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            location: "Remote".to_string(),
            skills: vec!["Rust".to_string()],
            experience: vec!["Acme, 2020-2024".to_string()],
            education: vec!["BSc CS".to_string()],
            completeness: 0,
        };
        assert_eq!(completeness(&profile), 100);
    }

    #[test]
    fn test_whitespace_fields_do_not_count() {
        let profile = ProfileData {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(completeness(&profile), 0);
    }

    #[test]
    fn test_save_recomputes_score_and_round_trips() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        let mut profile = ProfileData {
            name: "Jane".to_string(),
            skills: vec!["Rust".to_string()],
            completeness: 99, // stale, should be recomputed
            ..Default::default()
        };
        profile.save(&store).unwrap();
        assert_eq!(profile.completeness, 35);

        let loaded = ProfileData::load(&store).unwrap();
        assert_eq!(loaded.name, "Jane");
        assert_eq!(loaded.completeness, 35);
    }
}
