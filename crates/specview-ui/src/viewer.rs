//! Viewer bootstrap configuration
//!
//! Decides where the viewer loads the OpenAPI document from and which options
//! the Swagger UI bundle is started with. The result is handed to the browser
//! through the rendered `swagger-initializer.js`.

use std::fmt;

use specview_spec::middleware::SPEC_FILE_NAME;

/// Path segment the viewer is served under
pub const VIEWER_PATH_SEGMENT: &str = "swagger-ui/";

/// Element the viewer renders into
pub const MOUNT_POINT: &str = "#swagger-ui";

/// Built-in layout of the standalone preset
pub const STANDALONE_LAYOUT: &str = "StandaloneLayout";

/// Global (`window.ui`) holding the renderer returned by `SwaggerUIBundle`.
///
/// It is assigned once, when the page has loaded, and is only meant for
/// inspection from the browser devtools.
pub const RENDERER_HANDLE: &str = "ui";

/// Reference to a global provided by the Swagger UI bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityRef(&'static str);

impl CapabilityRef {
    pub const fn new(expression: &'static str) -> Self {
        Self(expression)
    }

    /// JavaScript expression naming the capability
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CapabilityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const APIS_PRESET: CapabilityRef = CapabilityRef::new("SwaggerUIBundle.presets.apis");
pub const STANDALONE_PRESET: CapabilityRef = CapabilityRef::new("SwaggerUIStandalonePreset");
pub const DOWNLOAD_URL_PLUGIN: CapabilityRef =
    CapabilityRef::new("SwaggerUIBundle.plugins.DownloadUrl");

/// Location of the OpenAPI document, as the page URL's prefix up to the first
/// `swagger-ui/` followed by `openapi.yml`.
///
/// Without a `swagger-ui/` segment the whole page URL is used as the prefix.
pub fn resolve_spec_url(page_url: &str) -> String {
    let prefix = match page_url.find(VIEWER_PATH_SEGMENT) {
        Some(idx) => &page_url[..idx],
        None => page_url,
    };

    format!("{}{}", prefix, SPEC_FILE_NAME)
}

/// Where the viewer fetches the OpenAPI document from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpecLocation {
    /// Derived from the page URL with [`resolve_spec_url`]
    #[default]
    Derived,
    /// Fixed base path, set at deployment time
    BasePath(String),
}

impl SpecLocation {
    pub fn resolve(&self, page_url: &str) -> String {
        match self {
            SpecLocation::Derived => resolve_spec_url(page_url),
            SpecLocation::BasePath(base) => {
                format!("{}/{}", base.trim_end_matches('/'), SPEC_FILE_NAME)
            }
        }
    }
}

/// Options passed to `SwaggerUIBundle`. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfiguration {
    spec_url: String,
    mount_point: String,
    deep_linking_enabled: bool,
    presets: Vec<CapabilityRef>,
    plugins: Vec<CapabilityRef>,
    layout_name: String,
}

impl ViewerConfiguration {
    pub fn new(spec_url: impl Into<String>) -> Self {
        Self {
            spec_url: spec_url.into(),
            mount_point: MOUNT_POINT.to_string(),
            deep_linking_enabled: true,
            presets: vec![APIS_PRESET, STANDALONE_PRESET],
            plugins: vec![DOWNLOAD_URL_PLUGIN],
            layout_name: STANDALONE_LAYOUT.to_string(),
        }
    }

    /// Configuration for the viewer page at `page_url`
    pub fn for_page(location: &SpecLocation, page_url: &str) -> Self {
        Self::new(location.resolve(page_url))
    }

    pub fn spec_url(&self) -> &str {
        &self.spec_url
    }

    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    pub fn deep_linking_enabled(&self) -> bool {
        self.deep_linking_enabled
    }

    pub fn presets(&self) -> &[CapabilityRef] {
        &self.presets
    }

    pub fn plugins(&self) -> &[CapabilityRef] {
        &self.plugins
    }

    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }
}
