use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;

/// Key/value storage surviving between form pages.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove_item(&mut self, key: &str) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> anyhow::Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage persisted as one JSON object on disk, rewritten on every change.
pub struct FileStorage {
    path: PathBuf,
    items: HashMap<String, String>,
}

impl FileStorage {
    pub fn open<P: Into<PathBuf>>(path: P) -> anyhow::Result<Self> {
        let path = path.into();
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt storage file {}", path.display()))?
        } else {
            HashMap::new()
        };
        Ok(Self { path, items })
    }

    fn flush(&self) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.items.insert(key.to_string(), value);
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> anyhow::Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
