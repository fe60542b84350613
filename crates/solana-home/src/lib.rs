#![cfg_attr(docsrs, feature(doc_cfg))]
//! Static generator for the Solana ecosystem homepage.
//!
//! Pages are plain [`Route`](route::Route)s rendered with the latest entries of the portal's collections (see
//! [`latest`]). The output is written once by [`generate()`], or kept fresh by [`serve()`] which regenerates it every
//! [`BuildOptions::revalidate`].

// Modules the end-user will interact directly or indirectly with
pub mod config;
pub mod content;
pub mod errors;
pub mod home;
pub mod latest;
pub mod preview;
pub mod regenerate;
pub mod route;

// Exports for end-users
pub use build::metadata::{BuildOutput, PageOutput, StaticAssetOutput};
pub use build::options::{BuildOptions, DEFAULT_REVALIDATE};
pub use preview::ServeOptions;

mod build;
mod templating;

#[cfg(feature = "maud")]
#[cfg_attr(docsrs, doc(cfg(feature = "maud")))]
pub mod maud {
    //! Components and traits for [Maud](https://maud.lambda.xyz) templates.
    //!
    //! ## Example
    //! ```rs
    //! use solana_home::route::prelude::*;
    //! use solana_home::maud::Card;
    //! use maud::{html, Markup};
    //!
    //! pub struct Latest;
    //!
    //! impl Route for Latest {
    //!   fn route(&self) -> &str {
    //!     "/latest"
    //!   }
    //!
    //!   fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
    //!     html! {
    //!       @for record in ctx.latest {
    //!         (Card::from(record))
    //!       }
    //!     }
    //!   }
    //! }
    //! ```
    pub use crate::templating::maud_ext::*;
}

// Internal modules
mod logging;

use std::sync::Arc;

use build::execute_build;
use content::ContentSource;
use logging::init_logging;
use route::FullRoute;

#[macro_export]
/// Helps to define every route that should be built by [`generate()`] or [`serve()`].
///
/// ## Example
/// ```rs
/// use std::sync::Arc;
/// use solana_home::{content::FileContentSource, generate, routes, BuildOptions, BuildOutput};
///
/// # mod routes {
/// #   use solana_home::route::prelude::*;
/// #
/// #   pub struct Index;
/// #   impl Route for Index {
/// #      fn route(&self) -> &str { "/" }
/// #      fn render(&self, _ctx: &mut PageContext) -> impl Into<RenderResult> {
/// #          "Hello, world!"
/// #      }
/// #   }
/// # }
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///     generate(
///         routes![routes::Index],
///         Arc::new(FileContentSource::new("content")),
///         BuildOptions::default(),
///     )
/// }
/// ```
macro_rules! routes {
    [$($route:expr),*] => {
        &[$(&$route),*]
    };
}

/// The version of solana-home being used.
///
/// Can be used to create a generator tag in the output HTML, see [`maud::generator()`](crate::maud::generator).
pub const GENERATOR: &str = concat!("solana-home v", env!("CARGO_PKG_VERSION"));

fn async_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

/// Runs a single build: aggregates the latest content, renders every route and writes the output directory.
///
/// ## Example
/// Should be called from the main function of the binary crate.
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
pub fn generate(
    routes: &[&dyn FullRoute],
    source: Arc<dyn ContentSource>,
    options: BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    init_logging();

    let async_runtime = async_runtime()?;

    Ok(execute_build(routes, source, &options, &async_runtime)?)
}

/// Builds the site, then serves the output directory and regenerates it every [`BuildOptions::revalidate`].
///
/// Only returns if the initial build or the server fails.
pub fn serve(
    routes: &[&dyn FullRoute],
    source: Arc<dyn ContentSource>,
    options: BuildOptions,
    serve_options: ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let async_runtime = async_runtime()?;

    async_runtime.block_on(preview::start_server(
        routes,
        source,
        &options,
        &serve_options,
    ))
}
