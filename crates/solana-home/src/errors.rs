//! Error types for solana-home.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Rust's uses the Debug trait to show errors when they're returned from main
                    // But, thiserror uses the Display trait to show errors. This redirects Debug to Display, essentially.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// Errors returned by a [`ContentSource`](crate::content::ContentSource) read.
#[derive(Error)]
pub enum ContentError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },
    #[error("Failed to read content file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse content file: {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("No content found for collection `{collection}`")]
    Missing { collection: String },
}

#[derive(Error)]
pub enum LatestError {
    #[error("Fetching the `{section}` collection failed: {source}")]
    Fetch {
        section: String,
        #[source]
        source: ContentError,
    },
    #[error("The fetch task for the `{section}` collection did not complete")]
    Task {
        section: String,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error(
        "The `{section}` collection is empty, there is no latest entry to show. Set `latest.empty_collection` to `skip` or `placeholder` to build anyway."
    )]
    EmptyCollection { section: String },
}

#[derive(Error)]
pub enum BuildError {
    #[error("Could not load the latest content: {0}")]
    Latest(#[from] LatestError),

    #[error("Failed to render `{route}`: {source}")]
    Render {
        route: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write build output to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl_debug_for_error!(ContentError, LatestError, BuildError, ConfigError);
