//! Serves the output directory over HTTP while a [`Regenerator`] keeps it fresh.
use std::{
    future::IntoFuture,
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{HeaderValue, StatusCode, header},
};
use colored::Colorize;
use local_ip_address::local_ip;
use log::{debug, info};
use tokio::net::{TcpListener, TcpSocket};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

use crate::{
    BuildOptions,
    build::build,
    content::ContentSource,
    logging::{FormatElapsedTimeOptions, format_elapsed_time},
    regenerate::Regenerator,
    route::FullRoute,
};

#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Listen on every interface instead of only localhost.
    pub host: bool,
    /// First port to try, the next free one is used if it's taken.
    pub port: u16,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: false,
            port: 3000,
        }
    }
}

/// `Cache-Control` value letting a CDN keep a page for the revalidation interval and serve it stale while it refetches.
pub fn cache_control(revalidate: Duration) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "s-maxage={}, stale-while-revalidate",
        revalidate.as_secs()
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

/// Router serving the files of `output_dir`, with a plain 404 for everything else.
pub fn router(output_dir: &Path, revalidate: Duration) -> Router {
    async fn handle_404() -> (StatusCode, &'static str) {
        (StatusCode::NOT_FOUND, "Not found")
    }

    let serve_dir = ServeDir::new(output_dir).not_found_service(handle_404.into_service());

    Router::new()
        .fallback_service(serve_dir)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            cache_control(revalidate),
        ))
}

/// Finds the first port at or after `starting_port` that can be bound on `address`.
pub async fn find_open_port(address: &IpAddr, starting_port: u16) -> io::Result<u16> {
    for port in starting_port..=u16::MAX {
        let socket = match address {
            IpAddr::V4(_) => TcpSocket::new_v4()?,
            IpAddr::V6(_) => TcpSocket::new_v6()?,
        };

        match socket.bind(SocketAddr::new(*address, port)) {
            Ok(_) => {
                debug!(target: "server", "Found open port: {}", port);
                return Ok(port);
            }
            Err(_) => {
                debug!(target: "server", "Port {} is already in use or failed to bind, trying next one", port);
            }
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AddrInUse,
        format!("no open port at or after {}", starting_port),
    ))
}

fn log_server_start(start_time: Instant, addr: SocketAddr, host: bool, revalidate: Duration) {
    let elapsed_time = format_elapsed_time(Ok(start_time.elapsed()), &FormatElapsedTimeOptions::section())
        .unwrap_or_default();

    info!(target: "SKIP_FORMAT", "");
    info!(target: "SKIP_FORMAT", "{} {}", "solana-home".bold().bright_magenta(), format!("server started in {}", elapsed_time));
    info!(target: "SKIP_FORMAT", "");

    let url = format!("http://localhost:{}", addr.port()).bold().underline().bright_blue();
    let network = if host {
        let ip = local_ip().unwrap_or(addr.ip());
        format!("http://{}:{}", ip, addr.port()).bold().underline().bright_magenta()
    } else {
        "Use --host to expose the server to your network".dimmed()
    };
    info!(target: "SKIP_FORMAT", "  {}    {}", "Local".bold(), url);
    info!(target: "SKIP_FORMAT", "  {}  {}", "Network".bold(), network);
    info!(target: "SKIP_FORMAT", "");

    info!(target: "server", "{}", format!("pages are regenerated every {}s", revalidate.as_secs()).dimmed());
}

/// Builds the site once, then serves it and regenerates it until the server stops.
pub async fn start_server(
    routes: &[&dyn FullRoute],
    source: Arc<dyn ContentSource>,
    options: &BuildOptions,
    serve_options: &ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    build(routes, Arc::clone(&source), options).await?;

    let address = if serve_options.host {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    } else {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    };
    let port = find_open_port(&address, serve_options.port).await?;
    let listener = TcpListener::bind(SocketAddr::new(address, port)).await?;
    let addr = listener.local_addr()?;

    log_server_start(start_time, addr, serve_options.host, options.revalidate);

    let regenerator = Regenerator::new(routes, source, options);
    let server = axum::serve(
        listener,
        router(&options.output_dir, options.revalidate).into_make_service(),
    )
    .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return Ok(result?),
        _ = regenerator.run() => {}
    }

    // Regeneration is disabled, keep serving what was built
    server.await?;

    Ok(())
}
