use std::path::PathBuf;
use std::time::Duration;

use crate::latest::LatestOptions;

/// How long a generated page is considered fresh before its data is aggregated again.
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(3600);

/// Build options. Should be passed to [`generate()`](crate::generate()) or [`serve()`](crate::serve()).
///
/// ## Examples
/// Default values:
/// ```rs
/// use std::sync::Arc;
/// use solana_home::{content::FileContentSource, generate, routes, BuildOptions, BuildOutput};
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   generate(
///     routes![],
///     Arc::new(FileContentSource::new("content")),
///     BuildOptions::default(),
///   )
/// }
/// ```
/// Custom values:
/// ```rs
/// use std::time::Duration;
/// use solana_home::{BuildOptions, latest::{EmptyCollectionPolicy, LatestOptions}};
///
/// let options = BuildOptions {
///   output_dir: "public".into(),
///   revalidate: Duration::from_secs(600),
///   latest: LatestOptions {
///     empty_collection: EmptyCollectionPolicy::Skip,
///     ..Default::default()
///   },
///   ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Base URL for the site, e.g. `https://solana.com`.
    /// This value is used to generate canonical URLs through [`PageContext::canonical_url`](crate::route::PageContext::canonical_url) in pages.
    pub base_url: Option<String>,

    pub output_dir: PathBuf,
    /// Files in this directory are copied as-is into the output directory.
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before writing pages.
    ///
    /// Regeneration never cleans, so readers keep getting the previous page while it's being rewritten.
    pub clean_output_dir: bool,

    /// Time-to-live of the generated pages. After it elapses the latest content is aggregated again and the pages rewritten.
    pub revalidate: Duration,

    pub latest: LatestOptions,
}

/// Provides default values for [`crate::generate()`]. Designed to work for most deployments.
impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            output_dir: "dist".into(),
            static_dir: "static".into(),
            clean_output_dir: true,
            revalidate: DEFAULT_REVALIDATE,
            latest: LatestOptions::default(),
        }
    }
}
