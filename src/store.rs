use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Local persistence for the handful of things the client owns: the
/// session token, the theme preference, the profile, and the bookmark
/// id mirror. One small file per key, like browser local storage but
/// on disk.
pub struct Store {
    root: PathBuf,
}

const TOKEN_KEY: &str = "token";
const THEME_KEY: &str = "theme";

impl Store {
    pub fn open() -> Result<Self> {
        let root = Self::default_root();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory: {}", root.display()))?;
        Ok(Self { root })
    }

    /// Store rooted at an explicit directory. Tests use this to avoid
    /// touching the real data dir.
    pub fn at(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create data directory: {}", root.display()))?;
        Ok(Self { root })
    }

    fn default_root() -> PathBuf {
        // XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobdeck") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".jobdeck")
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = fs::read_to_string(self.key_path(key)).ok()?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)
            .with_context(|| format!("Failed to write '{}' to local store", key))
    }

    pub fn clear(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove '{}' from local store", key))?;
        }
        Ok(())
    }

    // --- Session token ---

    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.set(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.clear(TOKEN_KEY)
    }

    // --- Theme preference ---

    pub fn theme(&self) -> String {
        self.get(THEME_KEY).unwrap_or_else(|| "light".to_string())
    }

    pub fn set_theme(&self, theme: &str) -> Result<()> {
        self.set(THEME_KEY, theme)
    }

    // --- JSON values (profile, bookmark mirror) ---

    pub fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read '{}' from local store", key))?;
        let value = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt '{}' in local store", key))?;
        Ok(Some(value))
    }

    pub fn set_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_token_lifecycle() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        assert!(store.token().is_none());
        store.set_token("abc123").unwrap();
        assert_eq!(store.token().as_deref(), Some("abc123"));
        store.clear_token().unwrap();
        assert!(store.token().is_none());
        // Clearing twice is fine.
        store.clear_token().unwrap();
    }

    #[test]
    fn test_theme_defaults_to_light() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.theme(), "light");
        store.set_theme("dark").unwrap();
        assert_eq!(store.theme(), "dark");
    }

    #[test]
    fn test_whitespace_token_treated_as_absent() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();
        store.set("token", "  \n").unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let store = Store::at(dir.path().to_path_buf()).unwrap();

        let ids = vec!["j1".to_string(), "j2".to_string()];
        store.set_json("bookmarks.json", &ids).unwrap();
        let loaded: Option<Vec<String>> = store.get_json("bookmarks.json").unwrap();
        assert_eq!(loaded.unwrap(), ids);

        let missing: Option<Vec<String>> = store.get_json("nope.json").unwrap();
        assert!(missing.is_none());
    }
}
