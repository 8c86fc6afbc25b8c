//! Playground page: editor tabs, sandboxed preview and saved snapshots.
//!
//! The preview is an `<iframe sandbox="allow-scripts">` fed through
//! `srcdoc`. Without `allow-same-origin` the user's script runs in an opaque
//! origin and cannot reach this page's storage, cookies or DOM.

use crate::clipboard::COPIED_INDICATOR;
use crate::models::{DisplayPreferences, SourceBundle};
use crate::workspace::SAVE_PROMPT;

use super::components::{base_html, editor_tabs, header_bar, html_escape, snapshot_list};

/// Sandbox flags for the preview frame. Scripts only.
pub const PREVIEW_SANDBOX: &str = "allow-scripts";

pub fn render_playground(
    bundle: &SourceBundle,
    prefs: &DisplayPreferences,
    names: &[String],
    preview: Option<&str>,
) -> String {
    let save_prompt_json =
        serde_json::to_string(SAVE_PROMPT).unwrap_or_else(|_| "\"\"".to_string());

    let content = format!(
        r#"{header}
    <main class="workspace">
        <section class="pane">
            {tabs}
            <div class="pane-actions">
                <div>
                    <button class="btn-red" onclick="resetField('html')">Reset HTML</button>
                    <button class="btn-red" onclick="resetAll()">Reset All</button>
                </div>
                <button class="btn-blue" onclick="saveFile()">Save</button>
            </div>
        </section>
        <section class="pane">
            <div class="output-header">
                <h2>Output</h2>
                <div class="actions">
                    <button class="btn-blue" id="copy-btn" onclick="copyCode()">Copy</button>
                    <button class="btn-green" onclick="runCode()">Run</button>
                </div>
            </div>
            <iframe class="preview-frame" id="preview" title="Output"
                sandbox="{sandbox}" style="font-size: {preview_px}px"
                srcdoc="{srcdoc}"></iframe>
        </section>
    </main>
    <footer class="saved-files">
        <h3>Saved Files</h3>
        {saved}
    </footer>"#,
        header = header_bar(prefs),
        tabs = editor_tabs(bundle, prefs),
        sandbox = PREVIEW_SANDBOX,
        preview_px = prefs.preview_font_size.px(),
        srcdoc = html_escape(preview.unwrap_or("")),
        saved = snapshot_list(names),
    );

    let script = format!(
        r#"
    const COPIED_MS = {copied_ms};
    const SAVE_PROMPT = {save_prompt};
    const pending = new Map();
    let flushTimer = null;
    let flushing = Promise.resolve();

    function showStatus(message, isError) {{
        const el = document.getElementById('status');
        el.textContent = message;
        el.classList.toggle('error', !!isError);
        el.classList.add('visible');
        setTimeout(() => el.classList.remove('visible'), 2500);
    }}

    async function api(method, url, body) {{
        const options = {{ method, headers: {{ 'Content-Type': 'application/json' }} }};
        if (body !== undefined) options.body = JSON.stringify(body);
        return fetch(url, options);
    }}

    // Edits are pushed after a short pause and flushed before any action
    // that reads or replaces the server copy. Flushes run one after another
    // so PUTs for a field arrive in the order they were typed.
    document.querySelectorAll('.code-input').forEach((area) => {{
        area.addEventListener('input', () => {{
            pending.set(area.dataset.field, area.value);
            clearTimeout(flushTimer);
            flushTimer = setTimeout(flushEdits, 300);
        }});
    }});

    function flushEdits() {{
        clearTimeout(flushTimer);
        flushing = flushing.then(sendPending, sendPending);
        return flushing;
    }}

    async function sendPending() {{
        const edits = Array.from(pending.entries());
        pending.clear();
        for (const [field, text] of edits) {{
            await api('PUT', '/api/field/' + field, {{ text }});
        }}
    }}

    function applyBundle(bundle) {{
        for (const field of ['html', 'css', 'js']) {{
            document.getElementById('code-' + field).value = bundle[field];
        }}
    }}

    function applyPreferences(prefs) {{
        document.querySelectorAll('.code-input').forEach((area) => {{
            area.style.fontSize = prefs.editor_font_size + 'px';
            area.classList.toggle('active', area.dataset.field === prefs.active_field);
        }});
        document.querySelectorAll('.tab-list button').forEach((tab) => {{
            tab.classList.toggle('active', tab.dataset.field === prefs.active_field);
        }});
        document.getElementById('preview').style.fontSize = prefs.preview_font_size + 'px';
        document.getElementById('display-mode').value = prefs.display_mode;
    }}

    function showDocument(doc) {{
        document.getElementById('preview').srcdoc = doc;
    }}

    function renderSaved(names) {{
        const list = document.getElementById('saved-list');
        list.innerHTML = '';
        for (const name of names) {{
            const item = document.createElement('li');
            item.className = 'saved-item';
            item.dataset.name = name;
            const load = document.createElement('button');
            load.className = 'load';
            load.title = 'Load';
            load.textContent = name;
            const del = document.createElement('button');
            del.className = 'delete';
            del.title = 'Delete';
            del.textContent = '✕';
            item.append(load, del);
            list.appendChild(item);
        }}
    }}

    // Destructive actions are sent unconfirmed first. The server answers 409
    // with the question only when there is something to lose.
    async function withConfirmation(method, url) {{
        let response = await api(method, url, {{ confirm: false }});
        if (response.status === 409) {{
            const question = (await response.json()).prompt;
            if (!confirm(question)) return null;
            response = await api(method, url, {{ confirm: true }});
        }}
        if (!response.ok) {{
            showStatus('Failed: ' + await response.text(), true);
            return null;
        }}
        return response.json();
    }}

    async function selectTab(field) {{
        await flushEdits();
        const response = await api('POST', '/api/active/' + field);
        if (response.ok) applyPreferences(await response.json());
    }}

    async function runCode() {{
        await flushEdits();
        const response = await api('POST', '/api/run');
        if (response.ok) showDocument((await response.json()).document);
    }}

    async function setDisplayMode(mode) {{
        const response = await api('POST', '/api/display', {{ mode }});
        if (response.ok) applyPreferences(await response.json());
    }}

    async function zoom(direction) {{
        await flushEdits();
        const response = await api('POST', '/api/zoom/' + direction);
        if (!response.ok) return;
        const result = await response.json();
        applyPreferences(result.preferences);
        if (result.document !== null) showDocument(result.document);
    }}

    async function resetField(field) {{
        await flushEdits();
        const result = await withConfirmation('POST', '/api/reset/' + field);
        if (!result) return;
        applyBundle(result.bundle);
        applyPreferences(result.preferences);
        showStatus(field.toUpperCase() + ' reset to default');
    }}

    async function resetAll() {{
        await flushEdits();
        const result = await withConfirmation('POST', '/api/reset');
        if (!result) return;
        applyBundle(result.bundle);
        showStatus('Code reset to default');
    }}

    async function saveFile() {{
        await flushEdits();
        const name = prompt(SAVE_PROMPT);
        if (!name) return;
        const response = await api('POST', '/api/snapshots', {{ name }});
        if (!response.ok) {{
            showStatus('Save failed: ' + await response.text(), true);
            return;
        }}
        const result = await response.json();
        renderSaved(result.names);
        if (result.saved === null) return;
        showStatus('Your file "' + result.saved + '" has been saved.');
    }}

    async function loadFile(name) {{
        await flushEdits();
        const response = await api('POST', '/api/snapshots/' + encodeURIComponent(name) + '/load');
        if (!response.ok) return;
        const result = await response.json();
        if (!result.loaded) return;
        applyBundle(result.bundle);
        showStatus('Your file "' + name + '" has been loaded.');
    }}

    async function deleteFile(name) {{
        const result = await withConfirmation('DELETE', '/api/snapshots/' + encodeURIComponent(name));
        if (!result) return;
        renderSaved(result.names);
        showStatus('Your file "' + name + '" has been deleted.');
    }}

    document.getElementById('saved-list').addEventListener('click', (event) => {{
        const button = event.target.closest('button');
        if (!button) return;
        const name = button.closest('.saved-item').dataset.name;
        if (button.classList.contains('delete')) deleteFile(name);
        else loadFile(name);
    }});

    // The server hands out the active field; the page writes it and reports
    // back so the indicator only turns on after a successful write.
    async function copyCode() {{
        await flushEdits();
        const button = document.getElementById('copy-btn');
        const source = await api('POST', '/api/copy');
        if (!source.ok) return;
        const {{ text }} = await source.json();
        try {{
            await navigator.clipboard.writeText(text);
        }} catch (err) {{
            await api('POST', '/api/copy/ack', {{ ok: false, error: String(err) }});
            return;
        }}
        const response = await api('POST', '/api/copy/ack', {{ ok: true }});
        if (!response.ok || !(await response.json()).copied) return;
        button.textContent = 'Copied!';
        setTimeout(() => {{ button.textContent = 'Copy'; }}, COPIED_MS);
    }}

    async function downloadCode() {{
        await flushEdits();
        const a = document.createElement('a');
        a.href = '/code.json';
        a.download = 'code.json';
        document.body.appendChild(a);
        a.click();
        document.body.removeChild(a);
    }}
    "#,
        copied_ms = COPIED_INDICATOR.as_millis(),
        save_prompt = save_prompt_json,
    );

    base_html("CodeCraft", &content, &script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_frame_is_sandboxed() {
        let html = render_playground(
            &SourceBundle::default(),
            &DisplayPreferences::default(),
            &[],
            None,
        );
        assert!(html.contains(r#"sandbox="allow-scripts""#));
        assert!(!html.contains("allow-same-origin"));
        assert!(!html.contains("allow-top-navigation"));
    }

    #[test]
    fn test_preview_document_is_attribute_escaped() {
        let html = render_playground(
            &SourceBundle::default(),
            &DisplayPreferences::default(),
            &["demo".to_string()],
            Some(r#"<p class="x">hi</p>"#),
        );
        assert!(html.contains(r#"srcdoc="&lt;p class=&quot;x&quot;&gt;hi&lt;/p&gt;""#));
        assert!(html.contains(r#"data-name="demo""#));
        assert!(html.contains("const COPIED_MS = 2000;"));
    }

    fn script_function<'a>(html: &'a str, name: &str) -> &'a str {
        let start = html
            .find(&format!("function {}(", name))
            .unwrap_or_else(|| panic!("missing function {}", name));
        let rest = &html[start..];
        let end = rest.find("\n    }\n").unwrap_or(rest.len());
        &rest[..end]
    }

    #[test]
    fn test_bundle_replacing_actions_flush_edits_first() {
        let html = render_playground(
            &SourceBundle::default(),
            &DisplayPreferences::default(),
            &[],
            None,
        );
        for name in ["loadFile", "resetField", "resetAll", "saveFile", "copyCode", "runCode"] {
            let body = script_function(&html, name);
            assert!(
                body.contains("await flushEdits();"),
                "{} does not flush pending edits",
                name
            );
        }
        assert!(script_function(&html, "flushEdits").contains("flushing = flushing.then("));
    }

    #[test]
    fn test_save_status_uses_saved_name() {
        let html = render_playground(
            &SourceBundle::default(),
            &DisplayPreferences::default(),
            &[],
            None,
        );
        let body = script_function(&html, "saveFile");
        assert!(body.contains("if (result.saved === null) return;"));
    }

    #[test]
    fn test_copy_uses_server_text_then_acknowledges() {
        let html = render_playground(
            &SourceBundle::default(),
            &DisplayPreferences::default(),
            &[],
            None,
        );
        let body = script_function(&html, "copyCode");
        let fetch_at = body.find("api('POST', '/api/copy')").unwrap();
        let write_at = body.find("navigator.clipboard.writeText(text)").unwrap();
        let ack_at = body.find("'/api/copy/ack', { ok: true }").unwrap();
        assert!(fetch_at < write_at);
        assert!(write_at < ack_at);
    }
}
