//! Spec middlewares
//!
//! A middleware rewrites the served document for a single request. Every
//! request works on its own copy of the document.

use specview_common::Result;
use tracing::debug;

use crate::document::SpecDocument;

/// File name the spec is served under
pub const SPEC_FILE_NAME: &str = "openapi.yml";

/// Request data visible to spec middlewares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of the `Host` header, empty when absent
    pub host: String,
    /// Full request path, including any nest prefix
    pub path: String,
}

impl RequestContext {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Request path without the trailing `/openapi.yml`
    pub fn base_path(&self) -> &str {
        self.path
            .strip_suffix(SPEC_FILE_NAME)
            .and_then(|p| p.strip_suffix('/'))
            .unwrap_or(self.path.as_str())
    }
}

/// Per-request rewrite of the served document
pub trait SpecMiddleware: Send + Sync {
    fn apply(&self, ctx: &RequestContext, spec: &mut SpecDocument) -> Result<()>;
}

impl<F> SpecMiddleware for F
where
    F: Fn(&RequestContext, &mut SpecDocument) -> Result<()> + Send + Sync,
{
    fn apply(&self, ctx: &RequestContext, spec: &mut SpecDocument) -> Result<()> {
        self(ctx, spec)
    }
}

/// Points one security scheme at an OpenID Connect provider.
///
/// Useful when the provider the API trusts is a deployment setting.
#[derive(Debug, Clone)]
pub struct OidcUrl {
    pub scheme: String,
    pub url: String,
}

impl OidcUrl {
    pub fn new(scheme: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            url: url.into(),
        }
    }
}

impl SpecMiddleware for OidcUrl {
    fn apply(&self, _ctx: &RequestContext, spec: &mut SpecDocument) -> Result<()> {
        spec.set_openid_connect_url(&self.scheme, &self.url)
    }
}

/// Adds the request host to the `servers` list, once over http and once over
/// https. The https URL ends up first.
///
/// For APIs that may be served under any hostname.
#[derive(Debug, Clone, Copy)]
pub struct ServerUrls {
    /// Drop previously listed servers first
    pub replace: bool,
}

impl ServerUrls {
    pub fn add() -> Self {
        Self { replace: false }
    }

    pub fn replace() -> Self {
        Self { replace: true }
    }
}

impl SpecMiddleware for ServerUrls {
    fn apply(&self, ctx: &RequestContext, spec: &mut SpecDocument) -> Result<()> {
        let path = ctx.base_path();
        let http_url = format!("http://{}{}", ctx.host, path);
        let https_url = format!("https://{}{}", ctx.host, path);

        if self.replace {
            spec.remove_server_urls();
        }
        spec.add_server_url(&http_url);
        spec.add_server_url(&https_url);

        debug!(host = %ctx.host, path = %path, replace = self.replace, "Added request host to servers");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec_with_server() -> SpecDocument {
        SpecDocument::parse_yaml(b"servers:\n  - url: https://api.example.com\n").unwrap()
    }

    #[test]
    fn test_base_path() {
        assert_eq!(RequestContext::new("h", "/openapi.yml").base_path(), "");
        assert_eq!(RequestContext::new("h", "/v1/openapi.yml").base_path(), "/v1");
        assert_eq!(RequestContext::new("h", "/v1/other").base_path(), "/v1/other");
    }

    #[test]
    fn test_server_urls_add() {
        let mut spec = spec_with_server();
        let ctx = RequestContext::new("docs.local:8080", "/prefix/openapi.yml");

        ServerUrls::add().apply(&ctx, &mut spec).unwrap();

        assert_eq!(
            spec.server_urls(),
            vec![
                "https://docs.local:8080/prefix",
                "http://docs.local:8080/prefix",
                "https://api.example.com",
            ]
        );
    }

    #[test]
    fn test_server_urls_replace() {
        let mut spec = spec_with_server();
        let ctx = RequestContext::new("docs.local", "/openapi.yml");

        ServerUrls::replace().apply(&ctx, &mut spec).unwrap();

        assert_eq!(
            spec.server_urls(),
            vec!["https://docs.local", "http://docs.local"]
        );
    }

    #[test]
    fn test_oidc_middleware() {
        let mut spec = SpecDocument::parse_yaml(b"openapi: 3.0.3\n").unwrap();
        let mw = OidcUrl::new("OAuth", "https://idp/.well-known/openid-configuration");

        mw.apply(&RequestContext::default(), &mut spec).unwrap();

        let url = spec
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(|s| s.get("OAuth"))
            .and_then(|s| s.get("openIdConnectUrl"))
            .and_then(|u| u.as_str());
        assert_eq!(url, Some("https://idp/.well-known/openid-configuration"));
    }

    #[test]
    fn test_closure_middleware() {
        let mw = |ctx: &RequestContext, spec: &mut SpecDocument| -> Result<()> {
            spec.add_server_url(&format!("custom://{}", ctx.host));
            Ok(())
        };

        let mut spec = SpecDocument::parse_yaml(b"openapi: 3.0.3\n").unwrap();
        mw.apply(&RequestContext::new("h", "/openapi.yml"), &mut spec)
            .unwrap();
        assert_eq!(spec.server_urls(), vec!["custom://h"]);
    }
}
