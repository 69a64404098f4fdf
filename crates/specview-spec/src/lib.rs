//! specview Spec - OpenAPI document handling
//!
//! Loosely-typed access to an OpenAPI document and the middlewares that
//! rewrite it before it is served.

pub mod document;
pub mod middleware;

pub use document::SpecDocument;
pub use middleware::{OidcUrl, RequestContext, ServerUrls, SpecMiddleware};
