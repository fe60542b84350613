use rustc_hash::FxHashMap;

use super::{ContentRecord, ContentSource};
use crate::errors::ContentError;

/// Content held in memory. Handy for tests and for building the site with substitute data.
///
/// ## Example
/// ```rs
/// use solana_home::content::StaticContentSource;
///
/// let source = StaticContentSource::new()
///     .with_changelog(vec![changelog_entry])
///     .with_playlist("core-community-calls", vec![call]);
/// ```
#[derive(Default, Clone)]
pub struct StaticContentSource {
    changelog: Vec<ContentRecord>,
    newsletter: Vec<ContentRecord>,
    playlists: FxHashMap<String, Vec<ContentRecord>>,
}

impl StaticContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_changelog(mut self, records: Vec<ContentRecord>) -> Self {
        self.changelog = records;
        self
    }

    pub fn with_newsletter(mut self, records: Vec<ContentRecord>) -> Self {
        self.newsletter = records;
        self
    }

    pub fn with_playlist(mut self, key: impl Into<String>, records: Vec<ContentRecord>) -> Self {
        self.playlists.insert(key.into(), records);
        self
    }
}

impl ContentSource for StaticContentSource {
    fn name(&self) -> &str {
        "static"
    }

    fn changelog(&self) -> Result<Vec<ContentRecord>, ContentError> {
        Ok(self.changelog.clone())
    }

    fn newsletter(&self) -> Result<Vec<ContentRecord>, ContentError> {
        Ok(self.newsletter.clone())
    }

    fn playlist(&self, key: &str) -> Result<Vec<ContentRecord>, ContentError> {
        self.playlists
            .get(key)
            .cloned()
            .ok_or_else(|| ContentError::Missing {
                collection: format!("playlists/{}", key),
            })
    }
}
