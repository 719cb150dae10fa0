// Fragment endpoint - renders one component per request

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::components::{is_valid_component_id, new_component_id};
use crate::server::{error::ApiError, state::AppState};
use crate::view::{is_valid_language_code, RenderContext, ResourceManifest};

/// Query parameters for GET /taghelper/:tag
#[derive(Debug, Default, Deserialize)]
pub struct FragmentQuery {
    /// Language code, falls back to the configured default
    pub lang: Option<String>,
    /// DOM id of the rendered root, generated when omitted
    pub id: Option<String>,
}

/// JSON body returned by /taghelper/:tag
#[derive(Debug, Serialize)]
pub struct FragmentResponse {
    pub html: String,
    /// Hashes the caller must link; empty in inline mode
    pub resources: ResourceManifest,
}

/// GET /taghelper/:tag
pub async fn render_fragment(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(query): Query<FragmentQuery>,
) -> Result<Json<FragmentResponse>, ApiError> {
    let spec = state
        .catalog
        .resolve(&tag)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown component: {}", tag)))?;

    let lang = query
        .lang
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| state.default_language.clone());
    if !is_valid_language_code(&lang) {
        return Err(ApiError::BadRequest(format!("Invalid language code: {}", lang)));
    }

    let id = match query.id.filter(|id| !id.is_empty()) {
        Some(id) if is_valid_component_id(&id) => id,
        Some(id) => return Err(ApiError::BadRequest(format!("Invalid component id: {}", id))),
        None => new_component_id(),
    };

    let ctx = RenderContext::new(id)
        .with_language(lang)
        .with_link_mode(state.link_mode);

    // One request is one render session
    let mut manifest = ResourceManifest::new();
    let html = state.compositor.compose(&spec.key, &ctx, &mut manifest).await?;

    tracing::debug!(
        tag = %spec.tag,
        styles = manifest.style_count(),
        scripts = manifest.script_count(),
        "Rendered fragment"
    );

    Ok(Json(FragmentResponse {
        html,
        resources: manifest,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentCatalog;
    use crate::view::{MemoryLoader, ResourceKey, ResourceRegistry, ViewCompositor};
    use axum::{http::StatusCode, response::IntoResponse};
    use std::sync::Arc;

    const HTML: &str = r#"<tag-helper>
<link rel="stylesheet" href="./Card.css">
<p class="title">@_Title_</p>
<script src="./Card.js"></script>
</tag-helper>"#;

    fn state(link_mode: bool) -> AppState {
        let loader = MemoryLoader::new()
            .with_file("Ui.Card.html", HTML)
            .with_file("Ui.Card.css", ".title { color: red; }")
            .with_file("Ui.Card.js", r#"document.querySelector("tag-helper").dataset.ready = "1";"#)
            .with_file("Ui.Card_i18n_en.js", r#"var t = {"_Title_": "Hello"};"#)
            .with_file("Ui.Card_i18n_it.js", r#"var t = {"_Title_": "Ciao"};"#);
        let compositor = ViewCompositor::new(Arc::new(loader), Arc::new(ResourceRegistry::new()));

        let mut catalog = ComponentCatalog::new();
        catalog.register("card", ResourceKey::new("Ui", "Card"));

        AppState::new(compositor, catalog).with_link_mode(link_mode)
    }

    fn query(lang: Option<&str>, id: Option<&str>) -> Query<FragmentQuery> {
        Query(FragmentQuery {
            lang: lang.map(String::from),
            id: id.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_inline_fragment() {
        let Json(body) = render_fragment(
            State(state(false)),
            Path("card".to_string()),
            query(None, Some("c1")),
        )
        .await
        .unwrap();

        assert!(body.html.contains("<p class=\"title\">Hello</p>"));
        assert!(body.html.contains("#c1 .title { color: red; }"));
        assert!(body.html.contains(r##"document.querySelector("#c1")"##));
        assert!(body.resources.is_empty());
    }

    #[tokio::test]
    async fn test_link_mode_fragment_returns_manifest() {
        let state = state(true);
        let Json(body) = render_fragment(
            State(state.clone()),
            Path("CARD".to_string()),
            query(Some("it"), Some("c2")),
        )
        .await
        .unwrap();

        assert!(body.html.contains("Ciao"));
        assert!(!body.html.contains("<style>"));
        assert!(!body.html.contains("<script"));
        assert_eq!(body.resources.style_count(), 1);
        assert_eq!(body.resources.script_count(), 1);

        let hash = body.resources.styles().next().unwrap();
        assert_eq!(
            state.registry().get_style(hash).as_deref(),
            Some("#c2 .title { color: red; }")
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["resources"]["styles"][0], hash.as_str());
    }

    #[tokio::test]
    async fn test_generated_id_when_omitted() {
        let Json(body) = render_fragment(
            State(state(false)),
            Path("card".to_string()),
            query(None, None),
        )
        .await
        .unwrap();
        assert!(body.html.contains("#tag-"));
    }

    #[tokio::test]
    async fn test_unknown_tag_is_not_found() {
        let response = render_fragment(
            State(state(false)),
            Path("nope".to_string()),
            query(None, None),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_inputs_are_bad_requests() {
        let response = render_fragment(
            State(state(false)),
            Path("card".to_string()),
            query(Some("../etc"), None),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = render_fragment(
            State(state(false)),
            Path("card".to_string()),
            query(None, Some("x\"); alert(1)")),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_template_is_internal_error() {
        let compositor = ViewCompositor::new(
            Arc::new(MemoryLoader::new()),
            Arc::new(ResourceRegistry::new()),
        );
        let mut catalog = ComponentCatalog::new();
        catalog.register("ghost", ResourceKey::new("Ui", "Ghost"));

        let response = render_fragment(
            State(AppState::new(compositor, catalog)),
            Path("ghost".to_string()),
            query(None, None),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
