//! specview UI
//!
//! Serves an OpenAPI document together with a Swagger UI viewer for it.
//!
//! ```rust,ignore
//! let ui = SwaggerUi::new(std::fs::read("openapi.yml")?)?
//!     .with_oidc("OAuth", "https://idp.example.com/.well-known/openid-configuration")
//!     .with_add_server_urls();
//!
//! let app = axum::Router::new().nest("/api", ui.router()?);
//! ```
//!
//! Routes, relative to where the router is mounted:
//!
//! - `GET /openapi.yml`: the document, rewritten by the registered middlewares
//! - `GET /swagger-ui/`: the viewer page and its assets
//! - `GET /swaggerui`: redirect to `/swagger-ui/`

mod handler;
mod handlers;
mod routes;
mod templates;
pub mod viewer;

use rust_embed::RustEmbed;

pub use handler::SwaggerUi;
pub use handlers::ApiError;
pub use templates::{Templates, BUNDLE_URL};
pub use viewer::{
    resolve_spec_url, CapabilityRef, SpecLocation, ViewerConfiguration, RENDERER_HANDLE,
};

/// Static files of the viewer page
#[derive(RustEmbed)]
#[folder = "dist/"]
pub struct StaticAssets;
