//! OpenAPI document model
//!
//! The document is kept as a YAML mapping. It is not validated against the
//! OpenAPI schema; only the nodes touched by the methods below are checked.

use serde_yaml::{Mapping, Value};
use specview_common::{Error, Result};

/// Security scheme type accepted by [`SpecDocument::set_openid_connect_url`]
pub const OPENID_CONNECT: &str = "openIdConnect";

/// An OpenAPI document with a mapping at its root
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    root: Mapping,
}

impl SpecDocument {
    /// Parse a YAML document. The root node must be a mapping.
    pub fn parse_yaml(raw: &[u8]) -> Result<Self> {
        let value: Value =
            serde_yaml::from_slice(raw).map_err(|e| Error::SpecParse(e.to_string()))?;

        match value {
            Value::Mapping(root) => Ok(Self { root }),
            other => Err(Error::SpecParse(format!(
                "expected a mapping at the document root, found {}",
                kind(&other)
            ))),
        }
    }

    /// Serialize back to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Top-level entry by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// The root mapping
    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Replace the OpenID Connect URL of a security scheme.
    ///
    /// Missing `components`, `securitySchemes` and scheme entries are created.
    /// A scheme without a `type` becomes an `openIdConnect` scheme; a scheme of
    /// any other type is rejected.
    pub fn set_openid_connect_url(&mut self, scheme_name: &str, url: &str) -> Result<()> {
        let components = child_mapping(&mut self.root, "components", "components")?;
        let schemes = child_mapping(
            components,
            "securitySchemes",
            "components.securitySchemes",
        )?;
        let path = format!("components.securitySchemes.{}", scheme_name);
        let scheme = child_mapping(schemes, scheme_name, &path)?;

        match scheme.get("type") {
            None | Some(Value::Null) => {}
            Some(Value::String(kind)) if kind == OPENID_CONNECT => {}
            Some(_) => {
                return Err(Error::SecurityScheme(format!(
                    "{} is not of type {}",
                    path, OPENID_CONNECT
                )));
            }
        }

        scheme.insert("type".into(), OPENID_CONNECT.into());
        scheme.insert("openIdConnectUrl".into(), url.into());
        Ok(())
    }

    /// Add a server URL in front of the `servers` list.
    ///
    /// The last URL added is listed first and becomes the default server in the
    /// viewer. Existing entries are kept with their `url` only.
    pub fn add_server_url(&mut self, server_url: &str) {
        let mut servers = vec![server_entry(server_url.into())];

        if let Some(Value::Sequence(existing)) = self.root.get("servers") {
            servers.extend(
                existing
                    .iter()
                    .filter_map(|entry| entry.get("url"))
                    .cloned()
                    .map(server_entry),
            );
        }

        self.root.insert("servers".into(), Value::Sequence(servers));
    }

    /// Remove every entry of the `servers` list
    pub fn remove_server_urls(&mut self) {
        self.root
            .insert("servers".into(), Value::Sequence(Vec::new()));
    }

    /// URLs of the `servers` list, in order
    pub fn server_urls(&self) -> Vec<&str> {
        match self.root.get("servers") {
            Some(Value::Sequence(servers)) => servers
                .iter()
                .filter_map(|entry| entry.get("url"))
                .filter_map(Value::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn server_entry(url: Value) -> Value {
    let mut entry = Mapping::new();
    entry.insert("url".into(), url);
    Value::Mapping(entry)
}

/// Mapping stored under `key`, created when absent or null
fn child_mapping<'a>(parent: &'a mut Mapping, key: &str, path: &str) -> Result<&'a mut Mapping> {
    let value = parent
        .entry(key.into())
        .or_insert(Value::Mapping(Mapping::new()));

    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }

    value
        .as_mapping_mut()
        .ok_or_else(|| Error::SpecShape(format!("{} is not a mapping", path)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
