//! Keeps the generated pages fresh by building them again every [`BuildOptions::revalidate`].
use std::sync::Arc;

use colored::Colorize;
use log::{error, info, warn};
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    BuildOptions, BuildOutput, build::build, content::ContentSource, errors::BuildError,
    route::FullRoute,
};

/// Runs a build on a fixed interval.
///
/// A regeneration never cleans the output directory: each page is written to a temporary file then renamed over the
/// previous one, so whatever serves the directory keeps returning the previous version until the new one is complete. A cycle that fails leaves the previous output as-is
/// and the next cycle tries again.
pub struct Regenerator<'a> {
    routes: &'a [&'a dyn FullRoute],
    source: Arc<dyn ContentSource>,
    options: BuildOptions,
}

impl<'a> Regenerator<'a> {
    pub fn new(
        routes: &'a [&'a dyn FullRoute],
        source: Arc<dyn ContentSource>,
        options: &BuildOptions,
    ) -> Self {
        Self {
            routes,
            source,
            options: BuildOptions {
                clean_output_dir: false,
                ..options.clone()
            },
        }
    }

    /// Runs a single regeneration cycle.
    pub async fn run_once(&self) -> Result<BuildOutput, BuildError> {
        build(self.routes, Arc::clone(&self.source), &self.options).await
    }

    /// Regenerates forever. The first cycle happens one interval from now, the initial build is expected to have run
    /// already.
    ///
    /// Returns immediately if the interval is zero, which disables regeneration.
    pub async fn run(&self) {
        if self.options.revalidate.is_zero() {
            warn!(target: "regenerate", "revalidate is 0, pages won't be regenerated");
            return;
        }

        let mut ticker = interval(self.options.revalidate);
        // A slow cycle pushes the next one back instead of triggering a burst of catch-up builds
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            info!(target: "regenerate", "{}", "regenerating pages".dimmed());
            match self.run_once().await {
                Ok(output) => {
                    info!(target: "regenerate", "regenerated {} pages", output.pages.len());
                }
                Err(err) => {
                    error!(target: "regenerate", "regeneration failed, keeping the previous pages: {}", err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRecord;
    use crate::errors::{ContentError, LatestError};
    use crate::route::{PageContext, RenderResult, Route};
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::tempdir;

    struct Titles;

    impl Route for Titles {
        fn route(&self) -> &str {
            "/"
        }

        fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
            ctx.latest
                .iter()
                .map(|record| record.title.clone())
                .collect::<Vec<_>>()
                .join(",")
        }
    }

    /// Publishes a new changelog entry on every read, and fails reads once `fail_after` reads happened.
    struct Publishing {
        reads: AtomicUsize,
        fail_after: usize,
    }

    impl Publishing {
        fn new(fail_after: usize) -> Self {
            Self {
                reads: AtomicUsize::new(0),
                fail_after,
            }
        }
    }

    fn record(id: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: id.to_string(),
            author: String::new(),
            img: String::new(),
            description: String::new(),
            url: String::new(),
        }
    }

    impl ContentSource for Publishing {
        fn name(&self) -> &str {
            "publishing"
        }

        fn changelog(&self) -> Result<Vec<ContentRecord>, ContentError> {
            let read = self.reads.fetch_add(1, Ordering::SeqCst);
            if read >= self.fail_after {
                return Err(ContentError::Missing {
                    collection: "changelog".to_string(),
                });
            }
            Ok(vec![record(&format!("c{}", read))])
        }

        fn newsletter(&self) -> Result<Vec<ContentRecord>, ContentError> {
            Ok(vec![record("n")])
        }

        fn playlist(&self, key: &str) -> Result<Vec<ContentRecord>, ContentError> {
            Ok(vec![record(key)])
        }
    }

    fn options(output_dir: &Path) -> BuildOptions {
        BuildOptions {
            output_dir: output_dir.to_path_buf(),
            static_dir: output_dir.join("no-static"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_once_picks_up_new_content() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("dist");
        let source: Arc<dyn ContentSource> = Arc::new(Publishing::new(usize::MAX));
        let options = options(&output_dir);

        build(&[&Titles], Arc::clone(&source), &options)
            .await
            .unwrap();
        let first = fs::read_to_string(output_dir.join("index.html")).unwrap();
        assert!(first.starts_with("c0,"));

        fs::write(output_dir.join("extra.txt"), "extra").unwrap();

        let routes: &[&dyn FullRoute] = &[&Titles];
        let regenerator = Regenerator::new(routes, source, &options);
        regenerator.run_once().await.unwrap();

        let second = fs::read_to_string(output_dir.join("index.html")).unwrap();
        assert_eq!(
            second,
            "c1,n,core-community-calls,superteam-ecosystem-calls"
        );
        assert!(output_dir.join("extra.txt").is_file());
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_previous_pages() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("dist");
        let source: Arc<dyn ContentSource> = Arc::new(Publishing::new(1));
        let options = options(&output_dir);

        build(&[&Titles], Arc::clone(&source), &options)
            .await
            .unwrap();

        let routes: &[&dyn FullRoute] = &[&Titles];
        let regenerator = Regenerator::new(routes, source, &options);
        let result = regenerator.run_once().await;

        assert!(matches!(
            result,
            Err(BuildError::Latest(LatestError::Fetch { .. }))
        ));
        assert!(
            fs::read_to_string(output_dir.join("index.html"))
                .unwrap()
                .starts_with("c0,")
        );
    }

    #[tokio::test]
    async fn test_zero_interval_disables_regeneration() {
        let dir = tempdir().unwrap();
        let options = BuildOptions {
            revalidate: Duration::ZERO,
            ..options(dir.path())
        };
        let routes: &[&dyn FullRoute] = &[&Titles];
        let regenerator = Regenerator::new(
            routes,
            Arc::new(Publishing::new(usize::MAX)),
            &options,
        );

        tokio::time::timeout(Duration::from_secs(1), regenerator.run())
            .await
            .unwrap();
        assert!(!dir.path().join("index.html").exists());
    }

    const LARGE_PAGE: usize = 4 * 1024 * 1024;

    struct Large;

    impl Route for Large {
        fn route(&self) -> &str {
            "/"
        }

        fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
            let marker = ctx.latest[0].title.chars().last().unwrap_or('x');
            format!("{}END", marker.to_string().repeat(LARGE_PAGE))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_readers_never_see_a_partial_page() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("dist");
        let source: Arc<dyn ContentSource> = Arc::new(Publishing::new(usize::MAX));
        let options = options(&output_dir);
        let routes: &[&dyn FullRoute] = &[&Large];

        build(routes, Arc::clone(&source), &options).await.unwrap();

        let page = output_dir.join("index.html");
        let done = Arc::new(AtomicBool::new(false));
        let reader = {
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                let mut reads = 0;
                let mut partial = 0;
                loop {
                    let content = fs::read(&page).unwrap();
                    reads += 1;
                    if content.len() != LARGE_PAGE + 3 || !content.ends_with(b"END") {
                        partial += 1;
                    }
                    if done.load(Ordering::SeqCst) {
                        break;
                    }
                }
                (reads, partial)
            })
        };

        let regenerator = Regenerator::new(routes, source, &options);
        for _ in 0..10 {
            regenerator.run_once().await.unwrap();
        }
        done.store(true, Ordering::SeqCst);

        let (reads, partial) = reader.join().unwrap();
        assert!(reads > 0);
        assert_eq!(partial, 0);
    }
}
