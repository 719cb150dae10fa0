//! View Compositor - assemble one component instance into an HTML fragment
//!
//! Steps run in a fixed order: styles, scripts, localization, envelope
//! stripping. Only the template itself is required; every side asset that is
//! missing (or unreadable) turns its step into a no-op.

use std::sync::Arc;

use super::envelope::{self, ENVELOPE_CLOSE, ENVELOPE_OPEN};
use super::error::{LoadError, RenderError};
use super::loader::ResourceLoader;
use super::manifest::ResourceManifest;
use super::registry::ResourceRegistry;
use super::{css, i18n, includes, script};
use super::{AssetKind, RenderContext, ResourceKey};

/// Composes fragments from a loader, publishing linked assets to a registry
#[derive(Clone)]
pub struct ViewCompositor {
    loader: Arc<dyn ResourceLoader>,
    registry: Arc<ResourceRegistry>,
}

impl ViewCompositor {
    pub fn new(loader: Arc<dyn ResourceLoader>, registry: Arc<ResourceRegistry>) -> Self {
        Self { loader, registry }
    }

    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    /// Render one component instance.
    ///
    /// In link mode, styles and scripts are registered and their hashes added
    /// to `manifest`; the returned fragment then carries no inline blocks.
    pub async fn compose(
        &self,
        key: &ResourceKey,
        ctx: &RenderContext,
        manifest: &mut ResourceManifest,
    ) -> Result<String, RenderError> {
        tracing::debug!(
            component_id = %ctx.component_id,
            base_name = %key.base_name,
            lang = %ctx.language_code,
            link_mode = ctx.link_mode,
            "Composing view"
        );

        let html = self.load_template(key).await?;
        let html = self.embed_css(html, key, ctx, manifest).await;
        let html = self.embed_js(html, key, ctx, manifest).await;
        let html = self.localize(html, key, ctx).await;

        Ok(envelope::extract_inner(&html, ENVELOPE_OPEN, ENVELOPE_CLOSE))
    }

    async fn load_template(&self, key: &ResourceKey) -> Result<String, RenderError> {
        match self.loader.load(key, &AssetKind::Html).await {
            Ok(html) => Ok(html),
            Err(LoadError::NotFound { path }) => Err(RenderError::TemplateNotFound { path }),
            Err(e) => Err(e.into()),
        }
    }

    /// Load a side asset; absence or a read failure yields `None`
    async fn load_optional(&self, key: &ResourceKey, kind: AssetKind) -> Option<String> {
        match self.loader.load(key, &kind).await {
            Ok(text) => Some(text),
            Err(e) if e.is_not_found() => {
                tracing::debug!("Optional asset missing: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Optional asset unreadable, skipping: {:?}", e);
                None
            }
        }
    }

    async fn embed_css(
        &self,
        html: String,
        key: &ResourceKey,
        ctx: &RenderContext,
        manifest: &mut ResourceManifest,
    ) -> String {
        let Some(html) = includes::strip_style_include(&html, &key.base_name) else {
            return html;
        };
        let Some(raw) = self.load_optional(key, AssetKind::Css).await else {
            return html;
        };

        let scoped = css::scope_css(&raw, &ctx.component_id);

        if ctx.link_mode {
            let hash = self.registry.register_style(&scoped);
            manifest.add_style(hash);
            return html;
        }

        let block = format!("<style>\n{}\n</style>", scoped);
        envelope::insert_after_open(&html, ENVELOPE_OPEN, &block)
    }

    async fn embed_js(
        &self,
        html: String,
        key: &ResourceKey,
        ctx: &RenderContext,
        manifest: &mut ResourceManifest,
    ) -> String {
        let Some(html) = includes::strip_script_include(&html, &key.base_name) else {
            return html;
        };
        let Some(raw) = self.load_optional(key, AssetKind::Js).await else {
            return html;
        };

        let bound = script::bind_script(&raw, &ctx.component_id);

        if ctx.link_mode {
            let hash = self.registry.register_script(&bound);
            manifest.add_script(hash);
            return html;
        }

        envelope::insert_before_close(&html, ENVELOPE_CLOSE, &script::script_block(&bound))
    }

    async fn localize(&self, html: String, key: &ResourceKey, ctx: &RenderContext) -> String {
        let kind = AssetKind::I18n(ctx.language_code.clone());
        let Some(raw) = self.load_optional(key, kind).await else {
            return html;
        };

        match i18n::parse_translations(&raw) {
            Some(translations) => i18n::localize(&html, &translations),
            None => {
                tracing::debug!(
                    base_name = %key.base_name,
                    lang = %ctx.language_code,
                    "Translation data malformed or empty, leaving markup unlocalized"
                );
                html
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryLoader;

    const TEMPLATE: &str = r#"<tag-helper>
    <link rel="stylesheet" href="./Card.css">
    <p class="b">@_Greet_</p>
    <script src="./Card.js"></script>
</tag-helper>"#;

    const SCRIPT: &str = r#"const el = document.querySelector("tag-helper");
el.dataset.ready = "1";"#;

    fn card_loader() -> MemoryLoader {
        MemoryLoader::new()
            .with_file("Ui.Card.html", TEMPLATE)
            .with_file("Ui.Card.css", ".b{color:red}")
            .with_file("Ui.Card.js", SCRIPT)
    }

    fn compositor(loader: MemoryLoader) -> ViewCompositor {
        ViewCompositor::new(Arc::new(loader), Arc::new(ResourceRegistry::new()))
    }

    fn key() -> ResourceKey {
        ResourceKey::new("Ui", "Card")
    }

    #[tokio::test]
    async fn test_inline_mode_end_to_end() {
        let compositor = compositor(card_loader());
        let mut manifest = ResourceManifest::new();

        let html = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap();

        assert!(html.contains("<style>\n#c1 .b{color:red}\n</style>"));
        assert!(html.contains("<script>\n(() => {\n"));
        assert!(html.contains(r##"document.querySelector("#c1")"##));
        assert!(!html.contains(r#"querySelector("tag-helper")"#));
        assert!(!html.contains("./Card.js"));
        assert!(!html.contains("./Card.css"));
        assert!(!html.contains("<tag-helper"));
        assert!(!html.contains("</tag-helper>"));
        // No dictionary: tokens stay as authored
        assert!(html.contains("@_Greet_"));
        assert!(manifest.is_empty());
    }

    #[tokio::test]
    async fn test_inline_blocks_positioned_inside_fragment() {
        let compositor = compositor(card_loader());
        let mut manifest = ResourceManifest::new();

        let html = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap();

        assert!(html.starts_with("<style>"));
        assert!(html.ends_with("</script>"));
    }

    #[tokio::test]
    async fn test_link_mode_end_to_end() {
        let compositor = compositor(card_loader());
        let mut manifest = ResourceManifest::new();
        let ctx = RenderContext::new("c1").with_link_mode(true);

        let html = compositor.compose(&key(), &ctx, &mut manifest).await.unwrap();

        assert!(!html.contains("<style>"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("./Card.css"));
        assert_eq!(manifest.style_count(), 1);
        assert_eq!(manifest.script_count(), 1);

        let registry = compositor.registry();
        let style_hash = manifest.styles().next().unwrap();
        let script_hash = manifest.scripts().next().unwrap();
        assert_eq!(registry.get_style(style_hash).as_deref(), Some("#c1 .b{color:red}"));
        assert!(registry
            .get_script(script_hash)
            .unwrap()
            .contains(r##"document.querySelector("#c1")"##));
    }

    #[tokio::test]
    async fn test_link_mode_same_instance_twice_dedups() {
        let compositor = compositor(card_loader());
        let mut manifest = ResourceManifest::new();
        let ctx = RenderContext::new("c1").with_link_mode(true);

        compositor.compose(&key(), &ctx, &mut manifest).await.unwrap();
        compositor.compose(&key(), &ctx, &mut manifest).await.unwrap();

        assert_eq!(manifest.style_count(), 1);
        assert_eq!(compositor.registry().style_count(), 1);
    }

    #[tokio::test]
    async fn test_link_mode_distinct_instances_get_distinct_hashes() {
        let compositor = compositor(card_loader());
        let mut manifest = ResourceManifest::new();

        for id in ["c1", "c2"] {
            let ctx = RenderContext::new(id).with_link_mode(true);
            compositor.compose(&key(), &ctx, &mut manifest).await.unwrap();
        }

        assert_eq!(manifest.style_count(), 2);
        assert_eq!(manifest.script_count(), 2);
    }

    #[tokio::test]
    async fn test_localization_applied() {
        let loader = card_loader()
            .with_file("Ui.Card_i18n_it.js", r#"var t = { "_Greet_": "Ciao" };"#);
        let compositor = compositor(loader);
        let mut manifest = ResourceManifest::new();
        let ctx = RenderContext::new("c1").with_language("it");

        let html = compositor.compose(&key(), &ctx, &mut manifest).await.unwrap();
        assert!(html.contains("<p class=\"b\">Ciao</p>"));
    }

    #[tokio::test]
    async fn test_localization_missing_key_marker() {
        let loader =
            card_loader().with_file("Ui.Card_i18n_en.js", r#"var t = { "_Other_": "x" };"#);
        let compositor = compositor(loader);
        let mut manifest = ResourceManifest::new();

        let html = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap();
        assert!(html.contains("[MISSING _Greet_]"));
    }

    #[tokio::test]
    async fn test_malformed_translations_are_ignored() {
        let loader = card_loader().with_file("Ui.Card_i18n_en.js", "var t = { broken };");
        let compositor = compositor(loader);
        let mut manifest = ResourceManifest::new();

        let html = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap();
        assert!(html.contains("@_Greet_"));
    }

    #[tokio::test]
    async fn test_missing_template_is_fatal() {
        let compositor = compositor(MemoryLoader::new());
        let mut manifest = ResourceManifest::new();

        let err = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap_err();
        match err {
            RenderError::TemplateNotFound { path } => assert_eq!(path, "Ui.Card.html"),
            other => panic!("Expected TemplateNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_referenced_but_missing_side_assets_are_skipped() {
        let loader = MemoryLoader::new().with_file("Ui.Card.html", TEMPLATE);
        let compositor = compositor(loader);
        let mut manifest = ResourceManifest::new();
        let ctx = RenderContext::new("c1").with_link_mode(true);

        let html = compositor.compose(&key(), &ctx, &mut manifest).await.unwrap();
        assert!(html.contains("<p class=\"b\">"));
        assert!(!html.contains("<style>"));
        assert!(!html.contains("<script"));
        assert!(manifest.is_empty());
    }

    #[tokio::test]
    async fn test_unreferenced_assets_are_not_embedded() {
        let loader = MemoryLoader::new()
            .with_file("Ui.Card.html", "<tag-helper><p>plain</p></tag-helper>")
            .with_file("Ui.Card.css", ".b{}")
            .with_file("Ui.Card.js", "x();");
        let compositor = compositor(loader);
        let mut manifest = ResourceManifest::new();

        let html = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap();
        assert_eq!(html, "<p>plain</p>");
    }

    #[tokio::test]
    async fn test_template_without_envelope_keeps_blocks() {
        let loader = MemoryLoader::new()
            .with_file("Ui.Card.html", "<p>bare</p>\n<script src=\"./Card.js\"></script>")
            .with_file("Ui.Card.js", "go();");
        let compositor = compositor(loader);
        let mut manifest = ResourceManifest::new();

        let html = compositor
            .compose(&key(), &RenderContext::new("c1"), &mut manifest)
            .await
            .unwrap();
        assert!(html.starts_with("<p>bare</p>"));
        assert!(html.contains("<script>\n(() => {\ngo();\n})();\n</script>"));
    }

    #[tokio::test]
    async fn test_shipped_samples_render() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("components");
        let compositor = ViewCompositor::new(
            Arc::new(crate::view::DirLoader::new(dir)),
            Arc::new(ResourceRegistry::new()),
        );
        let mut manifest = ResourceManifest::new();

        let hello = compositor
            .compose(
                &ResourceKey::new("Samples", "HelloTagHelper"),
                &RenderContext::new("s1").with_language("it"),
                &mut manifest,
            )
            .await
            .unwrap();
        assert!(hello.contains("<h2>Ciao</h2>"));
        assert!(hello.contains("#s1 .greeting h2, #s1 .greeting p {"));
        assert!(hello.contains("    #s1 .greeting { padding: 0.5rem; }"));
        assert!(!hello.contains("@_"));

        // Single-quoted root lookup, no dictionary
        let counter = compositor
            .compose(
                &ResourceKey::new("Samples", "CounterTagHelper"),
                &RenderContext::new("s2").with_link_mode(true),
                &mut manifest,
            )
            .await
            .unwrap();
        assert!(!counter.contains("<script"));
        assert_eq!(manifest.style_count(), 1);
        assert_eq!(manifest.script_count(), 1);

        let hash = manifest.scripts().next().unwrap();
        let script = compositor.registry().get_script(hash).unwrap();
        assert!(script.contains(r##"document.querySelector("#s2")"##));
    }
}
