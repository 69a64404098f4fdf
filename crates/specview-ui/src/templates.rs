//! Template Engine
//!
//! Renders the viewer page and its bootstrap script using minijinja.

use minijinja::{AutoEscape, Environment};
use serde_json::json;
use specview_common::{Error, Result};

use crate::viewer::{ViewerConfiguration, RENDERER_HANDLE};

/// Swagger UI distribution the page loads the renderer from
pub const BUNDLE_URL: &str = "https://unpkg.com/swagger-ui-dist@5";

const INDEX: &str = "index.html";
const INITIALIZER: &str = "swagger-initializer";

/// Template manager
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Create a new template manager
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        // values of the initializer are escaped before rendering
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        env.add_template(INDEX, include_str!("../templates/index.html"))
            .map_err(template_error)?;
        env.add_template(INITIALIZER, include_str!("../templates/swagger-initializer.js"))
            .map_err(template_error)?;

        Ok(Self { env })
    }

    /// Render the viewer page
    pub fn render_index(&self, title: &str, config: &ViewerConfiguration) -> Result<String> {
        let context = json!({
            "title": title,
            "bundle_url": BUNDLE_URL,
            "mount_id": config.mount_point().trim_start_matches('#'),
        });

        self.render(INDEX, &context)
    }

    /// Render `swagger-initializer.js`. The script starts the renderer once
    /// the page has loaded and keeps its handle in `window.ui`.
    pub fn render_initializer(&self, config: &ViewerConfiguration) -> Result<String> {
        let context = json!({
            "spec_url": js_string(config.spec_url())?,
            "handle": RENDERER_HANDLE,
            "mount_point": js_string(config.mount_point())?,
            "deep_linking": config.deep_linking_enabled(),
            "presets": config.presets().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "plugins": config.plugins().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "layout": js_string(config.layout_name())?,
        });

        self.render(INITIALIZER, &context)
    }

    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        let template = self.env.get_template(name).map_err(template_error)?;
        template.render(context).map_err(template_error)
    }
}

/// Quoted, escaped JavaScript string literal
fn js_string(value: &str) -> Result<String> {
    let quoted =
        serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?;
    // keep the literal from closing an enclosing <script> element
    Ok(quoted.replace("</", "<\\/"))
}

fn template_error(e: minijinja::Error) -> Error {
    Error::Internal(format!("Template error: {}", e))
}
