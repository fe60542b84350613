//! Core traits and structs to define the pages of the site.
//!
//! Every page implements the [`Route`] trait. Pages are then passed to [`generate()`](crate::generate) or
//! [`serve()`](crate::serve), through the [`routes!`](crate::routes) macro, to be built.
use std::path::{Path, PathBuf};

use crate::content::ContentRecord;

/// Boxed error a route may return while rendering.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// The result of a page render, can be either text, raw bytes, or an error.
///
/// Typically used through the [`Into<RenderResult>`](std::convert::Into) implementations for common types.
///
/// ## Example
/// ```rs
/// use solana_home::route::prelude::*;
///
/// pub struct Index;
///
/// impl Route for Index {
///   fn route(&self) -> &str {
///     "/"
///   }
///
///   fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
///     "<h1>Hello, Solana!</h1>"
///   }
/// }
/// ```
pub enum RenderResult {
    Text(String),
    Raw(Vec<u8>),
    Err(RenderError),
}

impl<T> From<Result<T, RenderError>> for RenderResult
where
    T: Into<RenderResult>,
{
    fn from(val: Result<T, RenderError>) -> Self {
        match val {
            Ok(s) => s.into(),
            Err(e) => RenderResult::Err(e),
        }
    }
}

impl From<String> for RenderResult {
    fn from(val: String) -> Self {
        RenderResult::Text(val)
    }
}

impl From<&str> for RenderResult {
    fn from(val: &str) -> Self {
        RenderResult::Text(val.to_string())
    }
}

impl From<Vec<u8>> for RenderResult {
    fn from(val: Vec<u8>) -> Self {
        RenderResult::Raw(val)
    }
}

impl From<&[u8]> for RenderResult {
    fn from(val: &[u8]) -> Self {
        RenderResult::Raw(val.to_vec())
    }
}

/// Allows to access the build's data in a [`Route`] implementation.
///
/// ## Example
/// ```rs
/// use solana_home::route::prelude::*;
/// use maud::html;
///
/// pub struct Index;
///
/// impl Route for Index {
///   fn route(&self) -> &str {
///     "/"
///   }
///
///   fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult> {
///     html! {
///       ul {
///         @for record in ctx.latest {
///           li { a href=(record.url) { (record.title) } }
///         }
///       }
///     }
///   }
/// }
/// ```
pub struct PageContext<'a> {
    /// The latest content, as aggregated at the start of the build.
    pub latest: &'a [ContentRecord],
    /// The current path being rendered, e.g. `/`.
    pub current_path: &'a String,
    /// The base URL as defined in [`BuildOptions::base_url`](crate::BuildOptions::base_url)
    pub base_url: &'a Option<String>,
}

impl<'a> PageContext<'a> {
    pub fn new(
        latest: &'a [ContentRecord],
        current_path: &'a String,
        base_url: &'a Option<String>,
    ) -> Self {
        Self {
            latest,
            current_path,
            base_url,
        }
    }

    /// Returns the canonical URL for the current page. If [`BuildOptions::base_url`](crate::BuildOptions::base_url) is not set, this will return `None`.
    pub fn canonical_url(&self) -> Option<String> {
        self.base_url.as_ref().map(|base| {
            format!(
                "{}{}",
                base.trim_end_matches('/'),
                self.current_path
            )
        })
    }
}

/// Must be implemented for every page of the site.
pub trait Route {
    /// Path of the page, e.g. `/` or `/feed.xml`.
    fn route(&self) -> &str;

    fn render(&self, ctx: &mut PageContext) -> impl Into<RenderResult>;
}

/// Object-safe view of a [`Route`], used by the build to render pages.
///
/// Implemented automatically for every [`Route`].
pub trait FullRoute: Sync + Send {
    fn route_raw(&self) -> &str;

    #[doc(hidden)]
    fn render_internal(&self, ctx: &mut PageContext) -> RenderResult;

    fn is_endpoint(&self) -> bool {
        guess_if_route_is_endpoint(self.route_raw())
    }

    fn url(&self) -> String {
        build_url(self.route_raw(), self.is_endpoint())
    }

    fn file_path(&self, output_dir: &Path) -> PathBuf {
        build_file_path(self.route_raw(), output_dir, self.is_endpoint())
    }

    fn build(&self, ctx: &mut PageContext) -> Result<Vec<u8>, RenderError> {
        match self.render_internal(ctx) {
            RenderResult::Text(html) => Ok(html.into_bytes()),
            RenderResult::Raw(content) => Ok(content),
            RenderResult::Err(e) => Err(e),
        }
    }
}

impl<T> FullRoute for T
where
    T: Route + Sync + Send,
{
    fn route_raw(&self) -> &str {
        self.route()
    }

    fn render_internal(&self, ctx: &mut PageContext) -> RenderResult {
        self.render(ctx).into()
    }
}

pub fn guess_if_route_is_endpoint(raw_route: &str) -> bool {
    Path::new(raw_route).extension().is_some()
}

pub fn build_url(route: &str, is_endpoint: bool) -> String {
    // Collapse consecutive slashes
    let parts: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    let mut result = parts.join("/");

    // Ensure leading slash
    if !result.starts_with('/') {
        result.insert(0, '/');
    }

    // Ensure trailing slash for non-endpoints
    if !is_endpoint && !result.ends_with('/') {
        result.push('/');
    }

    result
}

pub fn build_file_path(route: &str, output_dir: &Path, is_endpoint: bool) -> PathBuf {
    let mut path = PathBuf::from(output_dir);
    path.extend(route.split('/').filter(|s| !s.is_empty()));

    // Pages are always written as `index.html` in a directory of their name, so they're served without an extension.
    if !is_endpoint {
        path.push("index.html");
    }

    path
}

pub mod prelude {
    //! Re-exports of the most commonly used types and traits for defining routes.
    //!
    //! This module is meant to be glob imported in your routes files.
    //!
    //! ## Example
    //! ```rs
    //! use solana_home::route::prelude::*;
    //! ```
    pub use super::{FullRoute, PageContext, RenderError, RenderResult, Route};
    pub use crate::content::ContentRecord;
}
