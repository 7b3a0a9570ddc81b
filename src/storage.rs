use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Durable key/value text storage, one file per key under the app's data
/// directory. Only the theme preference lives here today.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Platform data directory for the app, e.g. `~/.local/share/walltui`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("walltui"))
    }

    /// Read the value for a key. Missing or unreadable entries are None;
    /// a read failure is not worth interrupting the session over.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = fs::read_to_string(self.dir.join(key)).ok()?;
        let trimmed = value.trim_end_matches('\n').to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.dir.join(key);
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn get_returns_none_for_missing_key() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().to_path_buf());
        assert!(store.get("theme").is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().to_path_buf());
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().to_path_buf());
        store.set("theme", "dark").unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme"), Some("light".to_string()));
    }

    #[test]
    fn set_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("deeper"));
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme"), Some("light".to_string()));
    }

    #[test]
    fn get_ignores_trailing_newline() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("theme"), "dark\n").unwrap();
        let store = LocalStore::new(dir.path().to_path_buf());
        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }
}
