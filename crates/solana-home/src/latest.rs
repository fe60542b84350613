//! Build-time aggregation of the "latest content" strip.
//!
//! The homepage shows the newest entry of each of a few collections, one after the other. [`aggregate_latest`] reads every
//! collection concurrently, takes the first record of each, and links it to its local page instead of its upstream source.
//!
//! ## Example
//! ```rs
//! use std::sync::Arc;
//! use solana_home::content::FileContentSource;
//! use solana_home::latest::{aggregate_latest, LatestOptions};
//!
//! let latest = aggregate_latest(Arc::new(FileContentSource::new("content")), &LatestOptions::default()).await?;
//! assert_eq!(latest[0].url, format!("/changelog/{}", latest[0].id));
//! ```
use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::content::{ContentRecord, ContentSource};
use crate::errors::{ContentError, LatestError};
use crate::logging::{FormatElapsedTimeOptions, format_elapsed_time};

/// One collection shown in the latest strip, and how its entries are routed locally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LatestSection {
    Changelog,
    Newsletter,
    /// A playlist selected by `key` upstream, whose entries live under `/library/playlist/{slug}/`.
    Playlist { key: String, slug: String },
}

impl LatestSection {
    /// A playlist whose upstream key is also its local slug.
    pub fn playlist(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        LatestSection::Playlist {
            key: slug.clone(),
            slug,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LatestSection::Changelog => "changelog",
            LatestSection::Newsletter => "newsletter",
            LatestSection::Playlist { slug, .. } => slug,
        }
    }

    /// Index page of the section, e.g. `/library/playlist/core-community-calls`.
    pub fn index_url(&self) -> String {
        match self {
            LatestSection::Changelog => "/changelog".to_string(),
            LatestSection::Newsletter => "/newsletter".to_string(),
            LatestSection::Playlist { slug, .. } => format!("/library/playlist/{}", slug),
        }
    }

    /// Local page of the entry `id` in this section.
    pub fn local_url(&self, id: &str) -> String {
        format!("{}/{}", self.index_url(), id)
    }

    /// Human readable title, `core-community-calls` becomes `Core Community Calls`.
    pub fn label(&self) -> String {
        self.name()
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Stand-in record used by [`EmptyCollectionPolicy::Placeholder`].
    pub fn placeholder(&self) -> ContentRecord {
        ContentRecord {
            id: String::new(),
            title: self.label(),
            author: String::new(),
            img: String::new(),
            description: String::new(),
            url: self.index_url(),
        }
    }

    fn fetch(&self, source: &dyn ContentSource) -> Result<Vec<ContentRecord>, ContentError> {
        match self {
            LatestSection::Changelog => source.changelog(),
            LatestSection::Newsletter => source.newsletter(),
            LatestSection::Playlist { key, .. } => source.playlist(key),
        }
    }
}

/// What to do when a collection has no entries at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyCollectionPolicy {
    /// Fail the aggregation, and with it the build.
    #[default]
    Fail,
    /// Leave the section out of the strip.
    Skip,
    /// Show a card linking to the section's index page.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LatestOptions {
    /// Sections in display order.
    pub sections: Vec<LatestSection>,
    pub empty_collection: EmptyCollectionPolicy,
}

impl Default for LatestOptions {
    fn default() -> Self {
        Self {
            sections: vec![
                LatestSection::Changelog,
                LatestSection::Newsletter,
                LatestSection::playlist("core-community-calls"),
                LatestSection::playlist("superteam-ecosystem-calls"),
            ],
            empty_collection: EmptyCollectionPolicy::default(),
        }
    }
}

/// Reads every section of `options` concurrently and returns the first record of each, in section order, linked to its
/// local page.
///
/// All reads are started together and awaited with a fail-fast join: the first read to fail fails the whole aggregation and
/// the results of the others are discarded. Partial results are never returned. Source records are left untouched, the
/// returned records are copies with a rewritten `url`.
pub async fn aggregate_latest(
    source: Arc<dyn ContentSource>,
    options: &LatestOptions,
) -> Result<Vec<ContentRecord>, LatestError> {
    let fetches = options.sections.iter().cloned().map(|section| {
        let source = Arc::clone(&source);

        async move {
            let fetch_start = Instant::now();
            let task_section = section.clone();
            let records =
                tokio::task::spawn_blocking(move || task_section.fetch(source.as_ref()))
                    .await
                    .map_err(|source| LatestError::Task {
                        section: section.name().to_string(),
                        source,
                    })?
                    .map_err(|source| LatestError::Fetch {
                        section: section.name().to_string(),
                        source,
                    })?;

            debug!(target: "content", "{} returned {} records in {}", section.name(), records.len(), format_elapsed_time(Ok(fetch_start.elapsed()), &FormatElapsedTimeOptions::default()).unwrap_or_default());

            Ok::<_, LatestError>((section, records))
        }
    });

    let collections = try_join_all(fetches).await?;

    let mut latest = Vec::with_capacity(collections.len());
    for (section, records) in collections {
        match records.first() {
            Some(first) => latest.push(first.with_url(section.local_url(&first.id))),
            None => match options.empty_collection {
                EmptyCollectionPolicy::Fail => {
                    return Err(LatestError::EmptyCollection {
                        section: section.name().to_string(),
                    });
                }
                EmptyCollectionPolicy::Skip => {
                    warn!(target: "content", "{} is empty, leaving it out of the latest content", section.name());
                }
                EmptyCollectionPolicy::Placeholder => {
                    warn!(target: "content", "{} is empty, using a placeholder", section.name());
                    latest.push(section.placeholder());
                }
            },
        }
    }

    info!(target: "content", "latest content: {}", latest.iter().map(|record| record.url.as_str()).collect::<Vec<_>>().join(", "));

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticContentSource;
    use std::time::Duration;

    fn record(id: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: format!("Title {}", id),
            author: "Author".to_string(),
            img: format!("https://img.example.com/{}.png", id),
            description: format!("About {}", id),
            url: format!("https://upstream.example.com/{}", id),
        }
    }

    fn full_source() -> StaticContentSource {
        StaticContentSource::new()
            .with_changelog(vec![record("c1"), record("c0")])
            .with_newsletter(vec![record("n1"), record("n0")])
            .with_playlist("core-community-calls", vec![record("cc1")])
            .with_playlist("superteam-ecosystem-calls", vec![record("ec1"), record("ec0")])
    }

    /// Delays each collection differently so completion order differs from section order, and can fail one of them.
    struct SlowSource {
        inner: StaticContentSource,
        failing: Option<&'static str>,
    }

    impl SlowSource {
        fn read(
            &self,
            collection: &str,
            delay_ms: u64,
            read: impl FnOnce() -> Result<Vec<ContentRecord>, ContentError>,
        ) -> Result<Vec<ContentRecord>, ContentError> {
            std::thread::sleep(Duration::from_millis(delay_ms));
            if self.failing == Some(collection) {
                return Err(ContentError::Missing {
                    collection: collection.to_string(),
                });
            }
            read()
        }
    }

    impl ContentSource for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        fn changelog(&self) -> Result<Vec<ContentRecord>, ContentError> {
            self.read("changelog", 60, || self.inner.changelog())
        }

        fn newsletter(&self) -> Result<Vec<ContentRecord>, ContentError> {
            self.read("newsletter", 40, || self.inner.newsletter())
        }

        fn playlist(&self, key: &str) -> Result<Vec<ContentRecord>, ContentError> {
            self.read(key, 20, || self.inner.playlist(key))
        }
    }

    #[tokio::test]
    async fn test_latest_in_section_order_with_local_urls() {
        let latest = aggregate_latest(Arc::new(full_source()), &LatestOptions::default())
            .await
            .unwrap();

        let urls: Vec<_> = latest.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "/changelog/c1",
                "/newsletter/n1",
                "/library/playlist/core-community-calls/cc1",
                "/library/playlist/superteam-ecosystem-calls/ec1",
            ]
        );

        // Everything but the url is carried over from the first record
        assert_eq!(latest[0], record("c1").with_url("/changelog/c1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_order_does_not_depend_on_completion_order() {
        let source = SlowSource {
            inner: full_source(),
            failing: None,
        };

        let latest = aggregate_latest(Arc::new(source), &LatestOptions::default())
            .await
            .unwrap();

        let ids: Vec<_> = latest.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "n1", "cc1", "ec1"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_any_failed_fetch_fails_the_aggregation() {
        let source = SlowSource {
            inner: full_source(),
            failing: Some("newsletter"),
        };

        let result = aggregate_latest(Arc::new(source), &LatestOptions::default()).await;

        assert!(matches!(
            result,
            Err(LatestError::Fetch { section, .. }) if section == "newsletter"
        ));
    }

    #[tokio::test]
    async fn test_missing_playlist_fails_the_aggregation() {
        let source = StaticContentSource::new()
            .with_changelog(vec![record("c1")])
            .with_newsletter(vec![record("n1")])
            .with_playlist("core-community-calls", vec![record("cc1")]);

        let result = aggregate_latest(Arc::new(source), &LatestOptions::default()).await;

        assert!(matches!(
            result,
            Err(LatestError::Fetch { section, source: ContentError::Missing { .. } })
                if section == "superteam-ecosystem-calls"
        ));
    }

    #[tokio::test]
    async fn test_empty_collection_fails_by_default() {
        let source = full_source().with_newsletter(vec![]);

        let result = aggregate_latest(Arc::new(source), &LatestOptions::default()).await;

        assert!(matches!(
            result,
            Err(LatestError::EmptyCollection { section }) if section == "newsletter"
        ));
    }

    #[tokio::test]
    async fn test_empty_collection_skip() {
        let source = full_source().with_newsletter(vec![]);
        let options = LatestOptions {
            empty_collection: EmptyCollectionPolicy::Skip,
            ..Default::default()
        };

        let latest = aggregate_latest(Arc::new(source), &options).await.unwrap();

        let ids: Vec<_> = latest.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "cc1", "ec1"]);
    }

    #[tokio::test]
    async fn test_empty_collection_placeholder() {
        let source = full_source().with_playlist("core-community-calls", vec![]);
        let options = LatestOptions {
            empty_collection: EmptyCollectionPolicy::Placeholder,
            ..Default::default()
        };

        let latest = aggregate_latest(Arc::new(source), &options).await.unwrap();

        assert_eq!(latest.len(), 4);
        assert_eq!(latest[2].title, "Core Community Calls");
        assert_eq!(latest[2].url, "/library/playlist/core-community-calls");
    }

    #[tokio::test]
    async fn test_custom_playlist_key_and_slug() {
        let source = StaticContentSource::new().with_playlist("PL-upstream-id", vec![record("v9")]);
        let options = LatestOptions {
            sections: vec![LatestSection::Playlist {
                key: "PL-upstream-id".to_string(),
                slug: "validator-calls".to_string(),
            }],
            ..Default::default()
        };

        let latest = aggregate_latest(Arc::new(source), &options).await.unwrap();

        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].url, "/library/playlist/validator-calls/v9");
    }

    #[test]
    fn test_sections_from_yaml() {
        let yaml = r#"
empty_collection: placeholder
sections:
  - kind: changelog
  - kind: playlist
    key: PL123
    slug: core-community-calls
"#;
        let options: LatestOptions = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(options.empty_collection, EmptyCollectionPolicy::Placeholder);
        assert_eq!(
            options.sections,
            vec![
                LatestSection::Changelog,
                LatestSection::Playlist {
                    key: "PL123".to_string(),
                    slug: "core-community-calls".to_string()
                }
            ]
        );
    }
}
