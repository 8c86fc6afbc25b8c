//! Preview compositor.
//!
//! Combines the three sources into a single HTML document. Nothing is escaped:
//! the document is only as safe as the sandboxed frame that displays it.

use tracing::debug;

use crate::models::{FontSize, SourceBundle};

/// Assemble the preview document. Styles come first with a trailing body
/// font-size rule, then the markup, then the script so the elements it
/// references already exist when it runs.
pub fn compose(bundle: &SourceBundle, preview_font_size: FontSize) -> String {
    format!(
        r#"<html>
  <head>
    <style>{css}
body {{ font-size: {px}px; }}</style>
  </head>
  <body>
    {html}
    <script>{js}</script>
  </body>
</html>"#,
        css = bundle.css,
        px = preview_font_size.px(),
        html = bundle.html,
        js = bundle.js,
    )
}

/// Last composed document shown in the preview frame.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    document: Option<String>,
}

impl Preview {
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Compose and keep the result. Called on run and whenever the preview
    /// font size changes.
    pub fn refresh(&mut self, bundle: &SourceBundle, preview_font_size: FontSize) -> &str {
        let document = compose(bundle, preview_font_size);
        debug!(bytes = document.len(), px = preview_font_size.px(), "Composed preview");
        self.document.insert(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_is_deterministic() {
        let bundle = SourceBundle::new("<p>a</p>", "p{}", "go()");
        assert_eq!(
            compose(&bundle, FontSize::DEFAULT),
            compose(&bundle, FontSize::DEFAULT)
        );
    }

    #[test]
    fn test_compose_embeds_sources_verbatim() {
        let bundle = SourceBundle::new(
            "<div id=\"x\">&amp; <b>hi</b></div>",
            "div > b { color: red; }",
            "document.getElementById('x').textContent = '<tag>';",
        );
        let doc = compose(&bundle, FontSize::clamped(18));
        assert!(doc.contains(&bundle.html));
        assert!(doc.contains(&bundle.css));
        assert!(doc.contains(&bundle.js));
        assert!(doc.contains("body { font-size: 18px; }"));
    }

    #[test]
    fn test_compose_ordering() {
        let bundle = SourceBundle::new("MARKUP", "STYLES", "SCRIPT");
        let doc = compose(&bundle, FontSize::DEFAULT);
        let css_at = doc.find("STYLES").unwrap();
        let rule_at = doc.find("body { font-size: 14px; }").unwrap();
        let html_at = doc.find("MARKUP").unwrap();
        let js_at = doc.find("SCRIPT").unwrap();
        assert!(css_at < rule_at);
        assert!(rule_at < doc.find("</style>").unwrap());
        assert!(html_at < js_at);
        assert!(doc[..js_at].ends_with("<script>"));
    }

    #[test]
    fn test_default_bundle_preview() {
        let doc = compose(&SourceBundle::default(), FontSize::clamped(14));
        assert!(doc.contains("Welcome to CodeCraft"));
    }

    #[test]
    fn test_preview_refresh_keeps_document() {
        let mut preview = Preview::default();
        assert!(preview.document().is_none());
        let bundle = SourceBundle::default();
        let composed = preview.refresh(&bundle, FontSize::DEFAULT).to_string();
        assert_eq!(preview.document(), Some(composed.as_str()));
    }
}
