//! Documentation handler
//!
//! Holds the parsed OpenAPI document, the middlewares applied to it and the
//! viewer settings. [`SwaggerUi::router`] turns it into an axum router.

use std::sync::Arc;

use axum::Router;
use specview_common::config::{DocsConfig, ServerUrlMode};
use specview_common::Result;
use specview_spec::{OidcUrl, RequestContext, ServerUrls, SpecDocument, SpecMiddleware};
use tracing::info;

use crate::routes;
use crate::templates::Templates;
use crate::viewer::SpecLocation;

const DEFAULT_TITLE: &str = "Swagger UI";

/// Serves one OpenAPI document and the Swagger UI viewer for it
pub struct SwaggerUi {
    spec: SpecDocument,
    location: SpecLocation,
    middlewares: Vec<Arc<dyn SpecMiddleware>>,
}

impl SwaggerUi {
    /// Create a handler for the given YAML document. Fails if it is not valid YAML.
    pub fn new(spec_yml: impl AsRef<[u8]>) -> Result<Self> {
        let spec = SpecDocument::parse_yaml(spec_yml.as_ref())?;

        Ok(Self {
            spec,
            location: SpecLocation::default(),
            middlewares: Vec::new(),
        })
    }

    /// Create a handler configured from the `[docs]` section
    pub fn from_config(spec_yml: impl AsRef<[u8]>, config: &DocsConfig) -> Result<Self> {
        let mut ui = Self::new(spec_yml)?;

        for oidc in &config.oidc {
            ui = ui.with_oidc(&oidc.scheme, &oidc.url);
        }

        ui = match config.server_urls {
            ServerUrlMode::None => ui,
            ServerUrlMode::Add => ui.with_add_server_urls(),
            ServerUrlMode::Replace => ui.with_replace_server_urls(),
        };

        if let Some(base_path) = &config.base_path {
            ui = ui.with_location(SpecLocation::BasePath(base_path.clone()));
        }

        Ok(ui)
    }

    /// Replace the OpenID Connect URL of a security scheme
    pub fn with_oidc(self, scheme: impl Into<String>, url: impl Into<String>) -> Self {
        self.with_middleware(OidcUrl::new(scheme, url))
    }

    /// Add the request host to the served server list
    pub fn with_add_server_urls(self) -> Self {
        self.with_middleware(ServerUrls::add())
    }

    /// Replace the served server list with the request host
    pub fn with_replace_server_urls(self) -> Self {
        self.with_middleware(ServerUrls::replace())
    }

    /// Apply a middleware to every served document, after the ones already registered
    pub fn with_middleware(mut self, middleware: impl SpecMiddleware + 'static) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Set where the viewer loads the document from
    pub fn with_location(mut self, location: SpecLocation) -> Self {
        self.location = location;
        self
    }

    pub fn location(&self) -> &SpecLocation {
        &self.location
    }

    /// `info.title` of the document
    pub fn title(&self) -> &str {
        self.spec
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(|title| title.as_str())
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Document for one request, after all middlewares ran
    pub fn render_spec(&self, ctx: &RequestContext) -> Result<String> {
        let mut spec = self.spec.clone();

        for middleware in &self.middlewares {
            middleware.apply(ctx, &mut spec)?;
        }

        spec.to_yaml()
    }

    /// Build the router serving the document and the viewer
    pub fn router(self) -> Result<Router> {
        let templates = Templates::new()?;

        info!(
            title = %self.title(),
            middlewares = self.middlewares.len(),
            location = ?self.location,
            "Documentation routes ready"
        );

        Ok(routes::create_router(AppState {
            ui: Arc::new(self),
            templates: Arc::new(templates),
        }))
    }
}

/// State shared by the documentation handlers
#[derive(Clone)]
pub(crate) struct AppState {
    pub ui: Arc<SwaggerUi>,
    pub templates: Arc<Templates>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use specview_common::config::OidcConfig;
    use specview_common::Error;
    use std::path::PathBuf;

    const EXAMPLE_SPEC: &str = include_str!("../testdata/example.openapi.yml");

    fn docs_config() -> DocsConfig {
        DocsConfig {
            spec_path: PathBuf::from("openapi.yml"),
            prefix: "/".to_string(),
            base_path: None,
            server_urls: ServerUrlMode::None,
            oidc: Vec::new(),
        }
    }

    #[test]
    fn test_new_rejects_invalid_yaml() {
        let err = SwaggerUi::new("openapi: [3.0").err().unwrap();
        assert!(matches!(err, Error::SpecParse(_)));
    }

    #[test]
    fn test_title() {
        let ui = SwaggerUi::new(EXAMPLE_SPEC).unwrap();
        assert_eq!(ui.title(), "Example Pet Store");

        let ui = SwaggerUi::new("openapi: 3.0.3\n").unwrap();
        assert_eq!(ui.title(), "Swagger UI");
    }

    #[test]
    fn test_middlewares_run_in_order() {
        let ui = SwaggerUi::new("openapi: 3.0.3\n")
            .unwrap()
            .with_middleware(|_: &RequestContext, spec: &mut SpecDocument| -> Result<()> {
                spec.add_server_url("first");
                Ok(())
            })
            .with_middleware(|_: &RequestContext, spec: &mut SpecDocument| -> Result<()> {
                spec.add_server_url("second");
                Ok(())
            });

        let yaml = ui.render_spec(&RequestContext::default()).unwrap();
        let spec = SpecDocument::parse_yaml(yaml.as_bytes()).unwrap();
        assert_eq!(spec.server_urls(), vec!["second", "first"]);
    }

    #[test]
    fn test_render_spec_leaves_source_untouched() {
        let ui = SwaggerUi::new(EXAMPLE_SPEC).unwrap().with_add_server_urls();
        let ctx = RequestContext::new("docs.local", "/openapi.yml");

        let first = ui.render_spec(&ctx).unwrap();
        let second = ui.render_spec(&ctx).unwrap();
        assert_eq!(first, second);

        let spec = SpecDocument::parse_yaml(first.as_bytes()).unwrap();
        assert_eq!(
            spec.server_urls(),
            vec![
                "https://docs.local",
                "http://docs.local",
                "https://petstore.example.com/v1",
            ]
        );
    }

    #[test]
    fn test_render_spec_reports_middleware_error() {
        let ui = SwaggerUi::new(
            "components:\n  securitySchemes:\n    OAuth:\n      type: oauth2\n",
        )
        .unwrap()
        .with_oidc("OAuth", "https://idp/.well-known/openid-configuration");

        let err = ui.render_spec(&RequestContext::default()).unwrap_err();
        assert!(matches!(err, Error::SecurityScheme(_)));
    }

    #[test]
    fn test_from_config() {
        let mut config = docs_config();
        config.base_path = Some("/docs/".to_string());
        config.server_urls = ServerUrlMode::Replace;
        config.oidc = vec![OidcConfig {
            scheme: "OAuth".to_string(),
            url: "https://idp/.well-known/openid-configuration".to_string(),
        }];

        let ui = SwaggerUi::from_config(EXAMPLE_SPEC, &config).unwrap();
        assert_eq!(ui.location(), &SpecLocation::BasePath("/docs/".to_string()));
        assert_eq!(ui.middlewares.len(), 2);

        let yaml = ui
            .render_spec(&RequestContext::new("docs.local", "/docs/openapi.yml"))
            .unwrap();
        let spec = SpecDocument::parse_yaml(yaml.as_bytes()).unwrap();
        assert_eq!(
            spec.server_urls(),
            vec!["https://docs.local/docs", "http://docs.local/docs"]
        );
        assert!(yaml.contains("https://idp/.well-known/openid-configuration"));
    }

    #[test]
    fn test_from_config_defaults() {
        let ui = SwaggerUi::from_config(EXAMPLE_SPEC, &docs_config()).unwrap();
        assert_eq!(ui.location(), &SpecLocation::Derived);
        assert!(ui.middlewares.is_empty());
    }
}
