//! # Store File I/O
//!
//! The two primitives every store is built from.
//!
//! ```text
//! read_json(path)         write_json(path, value)
//!   missing   → empty       create parent dir
//!   unreadable→ empty+warn  encode, 4-space indent
//!   bad JSON  → empty+warn  write <file>.tmp → rename over <file>
//! ```
//!
//! Reads are lenient because an empty catalog or log is a valid starting
//! state. Writes are strict: any failure is returned to the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Reads and decodes a whole store file, or returns `T::default()`.
pub fn read_json<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Store file absent, starting empty");
            return T::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file unreadable, treating as empty");
            return T::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file is not valid JSON, treating as empty");
            T::default()
        }
    }
}

/// Encodes `value` as pretty JSON and replaces the file at `path`.
pub fn write_json<T>(path: &Path, value: &T) -> DbResult<()>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DbError::io(parent, e))?;
    }

    let tmp = staging_path(path);
    fs::write(&tmp, &buf).map_err(|e| DbError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| DbError::io(path, e))?;

    debug!(path = %path.display(), bytes = buf.len(), "Store file written");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let map: IndexMap<String, u32> = read_json(&dir.path().join("absent.json"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, "{ not json").unwrap();

        let map: IndexMap<String, u32> = read_json(&path);
        assert!(map.is_empty());
    }

    #[test]
    fn test_write_uses_four_space_indent_and_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let mut map = IndexMap::new();
        map.insert("b".to_string(), 2u32);
        map.insert("a".to_string(), 1u32);
        write_json(&path, &map).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"b\": 2,\n    \"a\": 1\n}");
        assert!(!staging_path(&path).exists());

        let back: IndexMap<String, u32> = read_json(&path);
        assert_eq!(back, map);
    }

    #[test]
    fn test_write_into_missing_location_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let err = write_json(&blocker.join("data.json"), &1u32).unwrap_err();
        assert!(matches!(err, DbError::Io { .. }));
    }
}
