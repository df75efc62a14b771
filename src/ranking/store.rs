use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A flat store of integer values keyed by string, committed as a whole
pub(crate) trait KeyValueStore: fmt::Debug {
    /// Return the value for `key`, or `None` if it is absent or not a
    /// non-negative integer that fits in a `u32`
    fn get(&self, key: &str) -> Option<u32>;

    fn set(&mut self, key: &str, value: u32);

    /// Remove every entry whose key does not satisfy `keep`
    fn retain(&mut self, keep: &dyn Fn(&str) -> bool);

    /// Persist the current contents
    fn commit(&mut self) -> Result<(), SaveError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<u32> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) {
        (**self).set(key, value);
    }

    fn retain(&mut self, keep: &dyn Fn(&str) -> bool) {
        (**self).retain(keep);
    }

    fn commit(&mut self) -> Result<(), SaveError> {
        (**self).commit()
    }
}

/// A store that lives only as long as the program
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(BTreeMap<String, u32>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.0.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.0.insert(key.to_owned(), value);
    }

    fn retain(&mut self, keep: &dyn Fn(&str) -> bool) {
        self.0.retain(|k, _| keep(k.as_str()));
    }

    fn commit(&mut self) -> Result<(), SaveError> {
        Ok(())
    }
}

/// A store kept on disk as a JSON object.  Values that are not integers are
/// preserved but read back as absent.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    entries: serde_json::Map<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Open the store at `path`.  A missing file yields an empty store.
    pub(crate) fn open(path: &Path) -> Result<JsonFileStore, LoadError> {
        let entries = match fs_err::read(path) {
            Ok(src) => serde_json::from_slice(&src).map_err(LoadError::deserialize)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => serde_json::Map::new(),
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(JsonFileStore {
            path: path.to_owned(),
            entries,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.entries
            .get(key)?
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
    }

    fn set(&mut self, key: &str, value: u32) {
        self.entries.insert(key.to_owned(), value.into());
    }

    fn retain(&mut self, keep: &dyn Fn(&str) -> bool) {
        self.entries.retain(|k, _| keep(k.as_str()));
    }

    fn commit(&mut self) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&self.entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save rankings to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize rankings")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write rankings file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read rankings from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read rankings file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize rankings")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("rank_0_score"), None);
        store.set("rank_0_score", 7);
        store.set("volume", 3);
        assert_eq!(store.get("rank_0_score"), Some(7));
        store.retain(&|k| !k.starts_with("rank_"));
        assert_eq!(store.get("rank_0_score"), None);
        assert_eq!(store.get("volume"), Some(3));
        assert!(store.commit().is_ok());
    }

    #[test]
    fn open_missing_file() {
        let tmp = tempdir().unwrap();
        let store = JsonFileStore::open(&tmp.path().join("ranking.json")).unwrap();
        assert!(store.entries.is_empty());
    }

    #[test]
    fn commit_and_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("ranking.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("rank_0_score", 12);
        store.set("rank_0_duration", 34);
        store.commit().unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("rank_0_score"), Some(12));
        assert_eq!(reopened.get("rank_0_duration"), Some(34));
        assert_eq!(reopened, store);
    }

    #[test]
    fn non_integer_values_read_as_absent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ranking.json");
        fs_err::write(
            &path,
            r#"{"a": "twelve", "b": -3, "c": 1.5, "d": 5000000000, "e": 9}"#,
        )
        .unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
        assert_eq!(store.get("c"), None);
        assert_eq!(store.get("d"), None);
        assert_eq!(store.get("e"), Some(9));
        assert_eq!(store.get("f"), None);
    }

    #[test]
    fn open_garbage() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ranking.json");
        fs_err::write(&path, "[1, 2, 3]\n").unwrap();
        let e = JsonFileStore::open(&path).unwrap_err();
        assert_eq!(e.to_string(), "Failed to read rankings from disk");
        assert_eq!(
            std::error::Error::source(&e).map(ToString::to_string),
            Some(String::from("failed to deserialize rankings"))
        );
    }

    #[test]
    fn retain_keeps_non_integer_values() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ranking.json");
        fs_err::write(&path, r#"{"theme": "dark", "rank_0_score": 4}"#).unwrap();
        let mut store = JsonFileStore::open(&path).unwrap();
        store.retain(&|k| k != "rank_0_score");
        store.commit().unwrap();
        let src = fs_err::read_to_string(&path).unwrap();
        let value = serde_json::from_str::<serde_json::Value>(&src).unwrap();
        assert_eq!(value, serde_json::json!({"theme": "dark"}));
    }
}
