//! Shared HTML components for the playground page.
//!
//! Contains the header toolbar, editor tabs, saved-snapshot list and the
//! base HTML template.

use crate::models::{DisplayMode, DisplayPreferences, Field, SourceBundle};

use super::styles::STYLE;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Header Toolbar
// ============================================================================

pub fn header_bar(prefs: &DisplayPreferences) -> String {
    let selected = |mode: DisplayMode| if prefs.display_mode == mode { " selected" } else { "" };

    format!(
        r#"<header class="app-header">
            <h1>CodeCraft</h1>
            <div class="toolbar">
                <select id="display-mode" onchange="setDisplayMode(this.value)">
                    <option value="code"{code}>Code Display</option>
                    <option value="output"{output}>Output Display</option>
                </select>
                <button class="btn-indigo" onclick="zoom('in')" title="Zoom in">+</button>
                <button class="btn-indigo" onclick="zoom('out')" title="Zoom out">-</button>
                <button class="btn-yellow" onclick="downloadCode()" title="Download code.json">Download</button>
            </div>
        </header>"#,
        code = selected(DisplayMode::Code),
        output = selected(DisplayMode::Output),
    )
}

// ============================================================================
// Editor Tabs
// ============================================================================

pub fn editor_tabs(bundle: &SourceBundle, prefs: &DisplayPreferences) -> String {
    let mut tabs = String::from(r#"<div class="tab-list">"#);
    let mut inputs = String::new();

    for field in Field::ALL {
        let active = if field == prefs.active_field { " active" } else { "" };
        tabs.push_str(&format!(
            r#"<button class="{active}" data-field="{name}" onclick="selectTab('{name}')">{label}</button>"#,
            active = active.trim_start(),
            name = field.as_str(),
            label = field.label(),
        ));
        inputs.push_str(&format!(
            r#"<textarea class="code-input{active}" id="code-{name}" data-field="{name}" spellcheck="false"
                placeholder="Enter {label} code here..." style="font-size: {px}px">
{text}</textarea>"#,
            active = active,
            name = field.as_str(),
            label = field.label(),
            px = prefs.editor_font_size.px(),
            text = html_escape(bundle.get(field)),
        ));
    }

    tabs.push_str("</div>");
    tabs.push_str(&inputs);
    tabs
}

// ============================================================================
// Saved Snapshots
// ============================================================================

pub fn snapshot_list(names: &[String]) -> String {
    let mut html = String::from(r#"<ul class="saved-list" id="saved-list">"#);

    for name in names {
        html.push_str(&format!(
            r#"<li class="saved-item" data-name="{name}">
                <button class="load" title="Load">{name}</button>
                <button class="delete" title="Delete">&#x2715;</button>
            </li>"#,
            name = html_escape(name),
        ));
    }

    html.push_str("</ul>");
    html
}

// ============================================================================
// Base HTML Template
// ============================================================================

pub fn base_html(title: &str, content: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {content}
    <div class="status" id="status"></div>
    <script>{script}</script>
</body>
</html>"#,
        title = html_escape(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_snapshot_list_escapes_names() {
        let html = snapshot_list(&["<b>".to_string(), "plain".to_string()]);
        assert!(html.contains(r#"data-name="&lt;b&gt;""#));
        assert!(html.contains(r#"data-name="plain""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_editor_tabs_mark_active_field() {
        let prefs = DisplayPreferences {
            active_field: Field::Css,
            ..DisplayPreferences::default()
        };
        let html = editor_tabs(&SourceBundle::default(), &prefs);
        assert!(html.contains(r#"class="code-input active" id="code-css""#));
        assert!(html.contains(r#"class="code-input" id="code-html""#));
        assert!(html.contains("&lt;h1&gt;Welcome to CodeCraft&lt;/h1&gt;"));
    }

    #[test]
    fn test_textarea_keeps_leading_newline() {
        // The parser drops one newline right after <textarea>, so content
        // starting with a newline needs a second one in the markup.
        let bundle = SourceBundle::new("\n<p>x</p>", "", "");
        let html = editor_tabs(&bundle, &DisplayPreferences::default());
        assert!(html.contains("px\">\n\n&lt;p&gt;x&lt;/p&gt;</textarea>"));
        assert!(html.contains("px\">\n</textarea>"));
    }
}
