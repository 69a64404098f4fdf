//! Documentation Handlers
//!
//! Request handlers for the document, the viewer page and its assets.

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use specview_common::Error;
use specview_spec::RequestContext;
use tracing::{debug, error, warn};

use crate::handler::AppState;
use crate::viewer::{ViewerConfiguration, VIEWER_PATH_SEGMENT};
use crate::StaticAssets;

/// Content type of the served document
pub const YAML_CONTENT_TYPE: &str = "application/x-yaml; charset=utf-8";

const JAVASCRIPT_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const INITIALIZER_FILE: &str = "swagger-initializer.js";
const INDEX_FILE: &str = "index.html";

/// Error rendered as a JSON body
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": {
                "code": self.0.code(),
                "message": self.0.to_string(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Serve the OpenAPI document
pub(crate) async fn spec(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let ctx = RequestContext::new(host(&headers).unwrap_or_default(), uri.path());

    match state.ui.render_spec(&ctx) {
        Ok(yaml) => ([(header::CONTENT_TYPE, YAML_CONTENT_TYPE)], yaml).into_response(),
        Err(e) => {
            warn!(path = %ctx.path, error = %e, "Failed to prepare spec");
            ApiError(e).into_response()
        }
    }
}

/// Viewer page at `/swagger-ui/`
pub(crate) async fn index(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    index_page(&state, &headers, &uri)
}

/// Files below `/swagger-ui/`
pub(crate) async fn viewer_file(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    match path.as_str() {
        INDEX_FILE => index_page(&state, &headers, &uri),
        INITIALIZER_FILE => initializer(&state, &headers, &uri),
        _ => static_file(&path),
    }
}

/// `/swagger-ui` to `/swagger-ui/`, so relative asset links resolve
pub(crate) async fn viewer_redirect(OriginalUri(uri): OriginalUri) -> Redirect {
    Redirect::permanent(&format!("{}/", uri.path()))
}

/// `/swaggerui` to `/swagger-ui/`, keeping any prefix in front of it
pub(crate) async fn legacy_redirect(OriginalUri(uri): OriginalUri) -> Redirect {
    Redirect::permanent(&redirect_path(uri.path()))
}

fn index_page(state: &AppState, headers: &HeaderMap, uri: &Uri) -> Response {
    let config = ViewerConfiguration::for_page(state.ui.location(), &page_url(headers, uri));

    match state.templates.render_index(state.ui.title(), &config) {
        Ok(html) => ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], html).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            ApiError(e).into_response()
        }
    }
}

fn initializer(state: &AppState, headers: &HeaderMap, uri: &Uri) -> Response {
    let page_url = page_url(headers, uri);
    let config = ViewerConfiguration::for_page(state.ui.location(), &page_url);
    debug!(page_url = %page_url, spec_url = %config.spec_url(), "Resolved spec url for viewer");

    match state.templates.render_initializer(&config) {
        Ok(script) => (
            [
                (header::CONTENT_TYPE, JAVASCRIPT_CONTENT_TYPE),
                (header::CACHE_CONTROL, "no-cache"),
                (header::VARY, "Referer"),
            ],
            script,
        )
            .into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            ApiError(e).into_response()
        }
    }
}

fn static_file(path: &str) -> Response {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => {
            debug!(path = %path, "Unknown viewer asset");
            ApiError(Error::NotFound(path.to_string())).into_response()
        }
    }
}

/// URL of the page the viewer runs in.
///
/// Browsers send it as the referrer of the initializer request. A referrer
/// policy may cut it down to the origin, so it is only trusted while it still
/// names the viewer path. Otherwise the URL is rebuilt from the request, which
/// sits next to the page.
fn page_url(headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(referer) = header_str(headers, header::REFERER.as_str())
        .filter(|referer| referer.contains(VIEWER_PATH_SEGMENT))
    {
        return referer.to_string();
    }

    let scheme = header_str(headers, "x-forwarded-proto")
        .and_then(|proto| proto.split(',').next())
        .map(str::trim)
        .filter(|proto| !proto.is_empty())
        .unwrap_or("http");
    let host = host(headers)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{}://{}{}", scheme, host, uri.path())
}

fn redirect_path(path: &str) -> String {
    let prefix = path.strip_suffix("swaggerui").unwrap_or("/");
    let prefix = prefix.trim_end_matches('/');
    format!("{}/swagger-ui/", prefix)
}

fn host(headers: &HeaderMap) -> Option<String> {
    header_str(headers, header::HOST.as_str()).map(str::to_string)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}
