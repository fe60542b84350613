//! Content records and the sources they are read from.
//!
//! A [`ContentSource`] exposes the three upstream collections the homepage cares about: the changelog, the newsletter and
//! community-call playlists. The [`latest`](crate::latest) aggregator reads them concurrently at build time.
//!
//! ## Example
//! ```rs
//! use std::sync::Arc;
//! use solana_home::content::{ContentSource, FileContentSource};
//!
//! let source: Arc<dyn ContentSource> = Arc::new(FileContentSource::new("content"));
//! let changelog = source.changelog()?;
//! ```
use serde::{Deserialize, Serialize};

mod api;
mod files;
mod memory;

pub use api::ApiContentSource;
pub use files::FileContentSource;
pub use memory::StaticContentSource;

use crate::errors::ContentError;

/// A single item of content, such as a changelog entry, a newsletter issue or a recorded call.
///
/// Field names on the wire match the upstream records (`SK`, `Title`, `Author`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique sort key of the record, used to build its local route.
    #[serde(rename = "SK")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "Img", default)]
    pub img: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Canonical link of the record. Upstream this points at the external source.
    #[serde(rename = "Url", default)]
    pub url: String,
}

impl ContentRecord {
    /// Returns a copy of this record linking to `url` instead.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }
}

/// Read access to the upstream content collections.
///
/// Every method returns the collection in upstream order, newest first. Implementations are blocking, callers on an async
/// runtime should go through [`tokio::task::spawn_blocking`], as [`aggregate_latest`](crate::latest::aggregate_latest) does.
pub trait ContentSource: Send + Sync {
    /// Short human readable name, used in logs.
    fn name(&self) -> &str;

    fn changelog(&self) -> Result<Vec<ContentRecord>, ContentError>;

    fn newsletter(&self) -> Result<Vec<ContentRecord>, ContentError>;

    /// Records of the playlist selected by `key`.
    fn playlist(&self, key: &str) -> Result<Vec<ContentRecord>, ContentError>;
}
