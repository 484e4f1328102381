//! Location and loading of the static JSON data files.
//!
//! Name lists, phoneme presets, choice patterns, shift types, and the taste
//! rubric all live under one data directory. Loading distinguishes a file that
//! is absent (callers may fall back to built-in defaults) from one that is
//! present but malformed (always an error).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{LfError, LfResult};

/// Directory name looked up in the working directory when no path is given.
pub const DEFAULT_DIR_NAME: &str = "data";

/// Root directory of the static data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Use `root` as the data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data directory.
    ///
    /// An explicit path wins. Otherwise `./data` is used when it exists, and
    /// finally the `data/` directory shipped with the workspace.
    pub fn discover(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        let local = Path::new(DEFAULT_DIR_NAME);
        if local.is_dir() {
            return Self::new(local);
        }
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data"))
    }

    /// The root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A path relative to the root.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Sorted stems of the `.json` files directly inside `subdir`.
    ///
    /// A missing directory yields an empty list.
    pub fn json_stems(&self, subdir: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.join(subdir)) else {
            return Vec::new();
        };
        let mut stems: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        stems.sort();
        stems
    }
}

/// Load a JSON file, returning `Ok(None)` when it does not exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> LfResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "data file absent");
            return Ok(None);
        }
        Err(source) => {
            return Err(LfError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| LfError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Load a JSON file that must exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> LfResult<T> {
    load_json(path)?.ok_or_else(|| LfError::NotFound(format!("file {}", path.display())))
}

/// Write a value as pretty-printed JSON, replacing any existing file.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> LfResult<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content).map_err(|source| LfError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        names: Vec<String>,
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let loaded: Option<Sample> = load_json(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_json::<Sample>(&path).unwrap_err();
        assert!(matches!(err, LfError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn read_json_requires_file() {
        let dir = TempDir::new().unwrap();
        let err = read_json::<Sample>(&dir.path().join("gone.json")).unwrap_err();
        assert!(matches!(err, LfError::NotFound(_)));
    }

    #[test]
    fn write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json");
        let sample = Sample {
            names: vec!["Ada".into(), "Bram".into()],
        };
        write_json_pretty(&path, &sample).unwrap();
        let loaded: Sample = read_json(&path).unwrap();
        assert_eq!(loaded, sample);
        assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
    }

    #[test]
    fn json_stems_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("presets");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("neutral.json"), "{}").unwrap();
        fs::write(sub.join("elvish-like.json"), "{}").unwrap();
        fs::write(sub.join("README.md"), "").unwrap();

        let data = DataDir::new(dir.path());
        assert_eq!(data.json_stems("presets"), vec!["elvish-like", "neutral"]);
        assert!(data.json_stems("missing").is_empty());
    }

    #[test]
    fn explicit_path_wins() {
        let data = DataDir::discover(Some(Path::new("/tmp/somewhere")));
        assert_eq!(data.root(), Path::new("/tmp/somewhere"));
    }
}
