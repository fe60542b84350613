use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{ContentRecord, ContentSource};
use crate::errors::ContentError;

const EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// Reads content from YAML (or JSON) files in a local directory.
///
/// ```text
/// content/
/// ├── changelog.yml
/// ├── newsletter.yml
/// └── playlists/
///     ├── core-community-calls.yml
///     └── superteam-ecosystem-calls.yml
/// ```
///
/// Each file holds a list of records, newest first.
pub struct FileContentSource {
    dir: PathBuf,
    name: String,
}

impl FileContentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = dir.to_string_lossy().to_string();
        Self { dir, name }
    }

    fn find_file(&self, stem: &Path) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            // Appended rather than set, keys may contain dots
            .map(|extension| {
                self.dir
                    .join(format!("{}.{}", stem.to_string_lossy(), extension))
            })
            .find(|path| path.is_file())
    }

    fn read_collection(&self, stem: &Path) -> Result<Vec<ContentRecord>, ContentError> {
        let path = self.find_file(stem).ok_or_else(|| ContentError::Missing {
            collection: stem.to_string_lossy().to_string(),
        })?;
        debug!(target: "content", "reading {}", path.display());

        let raw = fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;

        // YAML is a superset of JSON, so this handles both
        serde_yaml::from_str(&raw).map_err(|source| ContentError::Parse { path, source })
    }
}

impl ContentSource for FileContentSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn changelog(&self) -> Result<Vec<ContentRecord>, ContentError> {
        self.read_collection(Path::new("changelog"))
    }

    fn newsletter(&self) -> Result<Vec<ContentRecord>, ContentError> {
        self.read_collection(Path::new("newsletter"))
    }

    fn playlist(&self, key: &str) -> Result<Vec<ContentRecord>, ContentError> {
        self.read_collection(&Path::new("playlists").join(key))
    }
}
