// Resource endpoint - serves registered css/js by content hash

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::server::{error::ApiError, state::AppState};
use crate::view::registry::ResourceKind;
use crate::view::ResourceHash;

/// Content never changes for a given hash
const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Split `style-{hash}.css` / `script-{hash}.js` into kind and hash
pub fn parse_resource_file(file: &str) -> Option<(ResourceKind, ResourceHash)> {
    if let Some(hash) = file
        .strip_prefix("style-")
        .and_then(|rest| rest.strip_suffix(".css"))
    {
        return ResourceHash::parse(hash).map(|h| (ResourceKind::Style, h));
    }
    if let Some(hash) = file
        .strip_prefix("script-")
        .and_then(|rest| rest.strip_suffix(".js"))
    {
        return ResourceHash::parse(hash).map(|h| (ResourceKind::Script, h));
    }
    None
}

fn content_type(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Style => "text/css; charset=utf-8",
        ResourceKind::Script => "application/javascript; charset=utf-8",
    }
}

/// GET {resource_base}/:file
pub async fn get_resource(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (kind, hash) = parse_resource_file(&file)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown resource: {}", file)))?;

    let content = state.registry().get(kind, &hash).ok_or_else(|| {
        ApiError::NotFound(format!("No {} registered for hash {}", kind.as_str(), hash))
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type(kind)),
            (header::CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        content.to_string(),
    ))
}
