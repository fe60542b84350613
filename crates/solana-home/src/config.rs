//! Site configuration, read from a YAML file.
//!
//! ```yaml
//! base_url: https://solana.com
//! revalidate: 3600
//! content:
//!   api:
//!     base_url: https://api.example.com
//!     timeout: 10
//! latest:
//!   empty_collection: skip
//! ```
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::debug;
use serde::Deserialize;

use crate::{
    BuildOptions, DEFAULT_REVALIDATE,
    content::{ApiContentSource, ContentSource, FileContentSource},
    errors::ConfigError,
    home::HomepageContent,
    latest::LatestOptions,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: Option<String>,
    pub output_dir: PathBuf,
    pub static_dir: PathBuf,
    /// Seconds a generated page stays fresh.
    pub revalidate: u64,
    /// Written as a single-key map, `files: { dir: ... }` or `api: { base_url: ... }`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub content: ContentConfig,
    pub latest: LatestOptions,
    pub homepage: HomepageContent,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let build = BuildOptions::default();
        Self {
            base_url: build.base_url,
            output_dir: build.output_dir,
            static_dir: build.static_dir,
            revalidate: DEFAULT_REVALIDATE.as_secs(),
            content: ContentConfig::default(),
            latest: build.latest,
            homepage: HomepageContent::default(),
        }
    }
}

/// Where the content collections are read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentConfig {
    /// YAML or JSON files in a local directory.
    Files { dir: PathBuf },
    /// The portal's JSON API. `timeout` is in seconds.
    Api {
        base_url: String,
        #[serde(default = "default_api_timeout")]
        timeout: u64,
    },
}

fn default_api_timeout() -> u64 {
    10
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig::Files {
            dir: "content".into(),
        }
    }
}

impl SiteConfig {
    /// Reads the config at `path`. A missing file isn't an error, the defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(target: "build", "No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        // An empty file deserializes to unit, not to an empty mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
            static_dir: self.static_dir.clone(),
            revalidate: Duration::from_secs(self.revalidate),
            latest: self.latest.clone(),
            ..Default::default()
        }
    }

    pub fn content_source(&self) -> Arc<dyn ContentSource> {
        match &self.content {
            ContentConfig::Files { dir } => Arc::new(FileContentSource::new(dir.clone())),
            ContentConfig::Api { base_url, timeout } => Arc::new(ApiContentSource::new(
                base_url.clone(),
                Duration::from_secs(*timeout),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latest::{EmptyCollectionPolicy, LatestSection};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();

        let config = SiteConfig::load(dir.path().join("solana-home.yml")).unwrap();

        assert_eq!(config, SiteConfig::default());
        let options = config.build_options();
        assert_eq!(options.revalidate, Duration::from_secs(3600));
        assert!(options.clean_output_dir);
        assert_eq!(config.content_source().name(), "content");
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solana-home.yml");
        fs::write(
            &path,
            r#"
base_url: https://solana.com
output_dir: public
revalidate: 600
content:
  api:
    base_url: https://api.example.com/
latest:
  empty_collection: placeholder
  sections:
    - kind: changelog
    - kind: playlist
      key: PLxyz
      slug: validator-calls
homepage:
  hero:
    title: Hello Solana
"#,
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://solana.com"));
        assert_eq!(
            config.content,
            ContentConfig::Api {
                base_url: "https://api.example.com/".to_string(),
                timeout: 10
            }
        );
        assert_eq!(config.content_source().name(), "https://api.example.com");
        assert_eq!(config.homepage.hero.title, "Hello Solana");
        assert_eq!(config.homepage.hero.highlight, "Solana");

        let options = config.build_options();
        assert_eq!(options.output_dir, PathBuf::from("public"));
        assert_eq!(options.static_dir, PathBuf::from("static"));
        assert_eq!(options.revalidate, Duration::from_secs(600));
        assert_eq!(
            options.latest.empty_collection,
            EmptyCollectionPolicy::Placeholder
        );
        assert_eq!(
            options.latest.sections,
            vec![
                LatestSection::Changelog,
                LatestSection::Playlist {
                    key: "PLxyz".to_string(),
                    slug: "validator-calls".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_content_files_form() {
        let config: SiteConfig = serde_yaml::from_str("content:\n  files:\n    dir: data\n").unwrap();

        assert_eq!(
            config.content,
            ContentConfig::Files {
                dir: PathBuf::from("data")
            }
        );
        assert_eq!(config.content_source().name(), "data");
    }

    #[test]
    fn test_shipped_site_config_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solana-home.yml");
        fs::write(&path, include_str!("../../../website/solana-home.yml")).unwrap();

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(
            config.content,
            ContentConfig::Files {
                dir: PathBuf::from("content")
            }
        );
        assert_eq!(config.base_url.as_deref(), Some("https://solana.com"));
        assert_eq!(config.latest, LatestOptions::default());
        assert_eq!(config.build_options().revalidate, Duration::from_secs(3600));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solana-home.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(SiteConfig::load(&path).unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("solana-home.yml");
        fs::write(&path, "revalidate: soon").unwrap();

        let err = SiteConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("solana-home.yml"));
    }
}
