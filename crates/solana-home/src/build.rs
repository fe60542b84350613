use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use crate::{
    BuildOptions, BuildOutput,
    content::ContentSource,
    errors::BuildError,
    latest::aggregate_latest,
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    route::{FullRoute, PageContext, RenderError},
};
use colored::{ColoredString, Colorize};
use log::{info, trace, warn};
use rayon::prelude::*;

pub mod metadata;
pub mod options;

pub fn execute_build(
    routes: &[&dyn FullRoute],
    source: Arc<dyn ContentSource>,
    options: &BuildOptions,
    async_runtime: &tokio::runtime::Runtime,
) -> Result<BuildOutput, BuildError> {
    async_runtime.block_on(async { build(routes, source, options).await })
}

/// Aggregates the latest content, renders every route and writes the result to the output directory.
///
/// Nothing is written until the latest content is aggregated and every route rendered successfully, so a failed build
/// leaves the previous output in place.
pub async fn build(
    routes: &[&dyn FullRoute],
    source: Arc<dyn ContentSource>,
    options: &BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let build_start = Instant::now();
    let mut build_metadata = BuildOutput::new(build_start, options.revalidate);

    let section_format_options = FormatElapsedTimeOptions::section();
    let route_format_options = FormatElapsedTimeOptions {
        additional_fn: Some(&|msg: ColoredString| {
            let formatted_msg = format!("(+{})", msg);
            if msg.fgcolor.is_none() {
                formatted_msg.dimmed()
            } else {
                formatted_msg.into()
            }
        }),
        ..Default::default()
    };

    print_title("fetching latest content");
    let content_start = Instant::now();
    let source_name = source.name().to_string();

    let latest = aggregate_latest(source, &options.latest).await?;

    info!(target: "content", "{}", format!("{} latest entries from {} in {}", latest.len(), source_name, format_elapsed_time(Ok(content_start.elapsed()), &section_format_options).unwrap_or_default()).bold());

    print_title("generating pages");
    let pages_start = Instant::now();

    // Render everything in memory first, a route failing to render must not leave a half-written site behind
    let rendered = routes
        .par_iter()
        .map(|route| {
            let route_start = Instant::now();
            let url = route.url();

            let mut ctx = PageContext::new(&latest, &url, &options.base_url);
            let content = route
                .build(&mut ctx)
                .map_err(|source| (route.route_raw().to_string(), source))?;

            let file_path = route.file_path(&options.output_dir);

            Ok::<_, (String, RenderError)>((
                route.route_raw().to_string(),
                url,
                file_path,
                content,
                route_start,
            ))
        })
        .collect::<Result<Vec<_>, (String, RenderError)>>()
        .map_err(|(route, source)| BuildError::Render { route, source })?;

    trace!(target: "build", "Setting up required directories...");

    let old_dist_tmp_dir = if options.clean_output_dir {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let num = (duration.as_secs() + duration.subsec_nanos() as u64) % 100000;
        let new_dir_for_old_dist = env::temp_dir().join(format!("solana_home_old_dist_{}", num));
        move_old_output(&options.output_dir, new_dir_for_old_dist).map_err(|source| {
            BuildError::Io {
                path: options.output_dir.clone(),
                source,
            }
        })?
    } else {
        None
    };

    let clean_up_handle = tokio::task::spawn_blocking(move || {
        if let Some(old_dist) = old_dist_tmp_dir {
            let _ = fs::remove_dir_all(old_dist);
        }
    });

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    let page_count = rendered.len();
    for (route_raw, url, file_path, content, route_start) in rendered {
        write_route_file(&content, &file_path).map_err(|source| BuildError::Io {
            path: file_path.clone(),
            source,
        })?;

        info!(target: "pages", "{} -> {} {}", url, file_path.to_string_lossy().dimmed(), format_elapsed_time(Ok(route_start.elapsed()), &route_format_options).unwrap_or_default());

        build_metadata.add_page(route_raw, file_path.to_string_lossy().to_string());
    }

    info!(target: "pages", "{}", format!("generated {} pages in {}", page_count, format_elapsed_time(Ok(pages_start.elapsed()), &section_format_options).unwrap_or_default()).bold());

    // Check if static directory exists
    if options.static_dir.exists() {
        let assets_start = Instant::now();
        print_title("copying assets");

        copy_recursively(
            &options.static_dir,
            &options.output_dir,
            &mut build_metadata,
        )
        .map_err(|source| BuildError::Io {
            path: options.static_dir.clone(),
            source,
        })?;

        info!(target: "build", "{}", format!("Assets copied in {}", format_elapsed_time(Ok(assets_start.elapsed()), &FormatElapsedTimeOptions::default()).unwrap_or_default()).bold());
    }

    build_metadata.latest = latest;

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(Ok(build_start.elapsed()), &section_format_options).unwrap_or_default()).bold());
    if let Some(next) = build_metadata.next_regeneration() {
        info!(target: "build", "{}", format!("Pages are fresh until {}", next.format("%Y-%m-%d %H:%M:%S")).dimmed());
    }

    // The old output is only ever a leftover, failing to remove it isn't worth failing the build over
    let _ = clean_up_handle.await;

    Ok(build_metadata)
}

/// Moves the previous output to `destination` so it can be deleted in the background. When it can't be moved, e.g.
/// because `destination` is on another filesystem, it is deleted in place instead.
fn move_old_output(output_dir: &Path, destination: PathBuf) -> Result<Option<PathBuf>, io::Error> {
    if !output_dir.exists() {
        return Ok(None);
    }

    match fs::rename(output_dir, &destination) {
        Ok(()) => Ok(Some(destination)),
        Err(err) => {
            warn!(target: "build", "Could not move the previous output to {} ({}), removing it in place", destination.display(), err);
            fs::remove_dir_all(output_dir)?;
            Ok(None)
        }
    }
}

fn copy_recursively(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    build_metadata: &mut BuildOutput,
) -> io::Result<()> {
    fs::create_dir_all(&destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let filetype = entry.file_type()?;
        if filetype.is_dir() {
            copy_recursively(
                entry.path(),
                destination.as_ref().join(entry.file_name()),
                build_metadata,
            )?;
        } else {
            write_atomically(
                &fs::read(entry.path())?,
                &destination.as_ref().join(entry.file_name()),
            )?;

            build_metadata.add_static_file(
                destination
                    .as_ref()
                    .join(entry.file_name())
                    .to_string_lossy()
                    .to_string(),
                entry.path().to_string_lossy().to_string(),
            );
        }
    }
    Ok(())
}

fn write_route_file(content: &[u8], file_path: &Path) -> Result<(), io::Error> {
    // Create the parent directories if it doesn't exist
    if let Some(parent_dir) = file_path.parent() {
        fs::create_dir_all(parent_dir)?
    }

    write_atomically(content, file_path)
}

/// Writes `content` next to `file_path` then renames it into place. Readers of `file_path` get either the previous file
/// or the new one, never a truncated file.
fn write_atomically(content: &[u8], file_path: &Path) -> Result<(), io::Error> {
    let parent_dir = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(file_path)
        .map(|metadata| metadata.permissions())
        .ok()
        .or_else(default_file_permissions);

    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".tmp");
    if let Some(permissions) = permissions {
        builder.permissions(permissions);
    }

    let mut file = builder.tempfile_in(parent_dir)?;
    file.write_all(content)?;
    file.persist(file_path).map_err(|err| err.error)?;

    Ok(())
}

// Temporary files are created owner-only. New pages get the same mode as `fs::write` would give them, after umask
#[cfg(unix)]
fn default_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn default_file_permissions() -> Option<fs::Permissions> {
    None
}
