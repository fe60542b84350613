use std::{
    process::Termination,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};

use crate::content::ContentRecord;

/// Metadata returned by [`generate()`](crate::generate) for a single page after a successful build.
#[derive(Debug)]
pub struct PageOutput {
    pub route: String,
    pub file_path: String,
}

/// Metadata returned by [`generate()`](crate::generate) for a single static asset after a successful build.
///
/// A static asset is a file that is copied to the output directory without any processing.
#[derive(Debug)]
pub struct StaticAssetOutput {
    pub file_path: String,
    pub original_path: String,
}

/// Metadata returned by [`generate()`](crate::generate) after a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    pub start_time: Instant,
    /// Wall-clock time at which the latest content was aggregated.
    pub generated_at: DateTime<Local>,
    pub revalidate: Duration,
    /// The latest content the pages were rendered with.
    pub latest: Vec<ContentRecord>,
    pub pages: Vec<PageOutput>,
    pub static_files: Vec<StaticAssetOutput>,
}

impl BuildOutput {
    pub fn new(start_time: Instant, revalidate: Duration) -> Self {
        Self {
            start_time,
            generated_at: Local::now(),
            revalidate,
            latest: Vec::new(),
            pages: Vec::new(),
            static_files: Vec::new(),
        }
    }

    /// When the pages of this build should be generated again, `None` if the interval is too large to be represented.
    pub fn next_regeneration(&self) -> Option<DateTime<Local>> {
        chrono::Duration::from_std(self.revalidate)
            .ok()
            .and_then(|revalidate| self.generated_at.checked_add_signed(revalidate))
    }

    /// Whether the data of this build is older than its revalidation interval at `now`.
    pub fn is_stale(&self, now: DateTime<Local>) -> bool {
        self.next_regeneration().is_some_and(|next| now >= next)
    }

    pub(crate) fn add_page(&mut self, route: String, file_path: String) {
        self.pages.push(PageOutput { route, file_path });
    }

    pub(crate) fn add_static_file(&mut self, file_path: String, original_path: String) {
        self.static_files.push(StaticAssetOutput {
            file_path,
            original_path,
        });
    }
}

impl Termination for BuildOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}
