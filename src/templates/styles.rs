//! CSS styles for the playground page.

pub const STYLE: &str = r#"
/* Dark Theme */
:root {
    --bg: #111827;
    --panel: #1f2937;
    --panel-hover: #374151;
    --fg: #f3f4f6;
    --muted: #9ca3af;
    --border: #374151;

    --blue: #2563eb;
    --blue-hover: #1d4ed8;
    --green: #16a34a;
    --green-hover: #15803d;
    --yellow: #ca8a04;
    --yellow-hover: #a16207;
    --red: #dc2626;
    --red-hover: #b91c1c;
    --indigo: #4f46e5;
    --indigo-hover: #4338ca;
    --purple: #9333ea;

    --title: #60a5fa;
    --output-title: #4ade80;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.5;
    color: var(--fg);
    background: var(--bg);
    min-height: 100vh;
    padding: 1rem;
    display: flex;
    flex-direction: column;
}

.app-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 1rem;
}

.app-header h1 { font-size: 1.5rem; font-weight: 700; color: var(--title); }

.toolbar { display: flex; gap: 0.5rem; align-items: center; }

button, select {
    font-family: inherit;
    font-size: 0.9rem;
    color: #fff;
    border: none;
    border-radius: 4px;
    padding: 0.4rem 0.8rem;
    cursor: pointer;
}

select { background: var(--purple); }
.btn-blue { background: var(--blue); }
.btn-blue:hover { background: var(--blue-hover); }
.btn-green { background: var(--green); }
.btn-green:hover { background: var(--green-hover); }
.btn-yellow { background: var(--yellow); }
.btn-yellow:hover { background: var(--yellow-hover); }
.btn-red { background: var(--red); }
.btn-red:hover { background: var(--red-hover); }
.btn-indigo { background: var(--indigo); }
.btn-indigo:hover { background: var(--indigo-hover); }

.workspace {
    flex: 1;
    display: grid;
    grid-template-columns: 1fr 1fr;
    gap: 10px;
}

.pane { display: flex; flex-direction: column; min-width: 0; }

.tab-list {
    display: grid;
    grid-template-columns: repeat(3, 1fr);
    background: var(--panel);
    border-radius: 4px;
    padding: 4px;
    gap: 4px;
}

.tab-list button { background: none; color: var(--muted); }
.tab-list button.active { color: #fff; }
.tab-list button.active[data-field="html"] { background: var(--blue); }
.tab-list button.active[data-field="css"] { background: var(--green); }
.tab-list button.active[data-field="js"] { background: var(--yellow); }

.code-input {
    display: none;
    width: 100%;
    min-height: 300px;
    flex: 1;
    margin-top: 0.5rem;
    padding: 0.75rem;
    background: var(--panel);
    color: var(--fg);
    border: 1px solid var(--border);
    border-radius: 4px;
    font-family: monospace;
    resize: vertical;
}
.code-input.active { display: block; }

.pane-actions {
    display: flex;
    justify-content: space-between;
    margin-top: 0.5rem;
}

.output-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 0.5rem;
}
.output-header h2 { font-size: 1.1rem; font-weight: 600; color: var(--output-title); }
.output-header .actions { display: flex; gap: 0.5rem; }

.preview-frame {
    flex: 1;
    width: 100%;
    min-height: 300px;
    background: #fff;
    border: none;
    border-radius: 4px;
}

.saved-files { margin-top: 1rem; }
.saved-files h3 { font-size: 1.1rem; font-weight: 600; margin-bottom: 0.5rem; }
.saved-list { display: flex; flex-wrap: wrap; gap: 0.5rem; list-style: none; }

.saved-item {
    display: flex;
    align-items: center;
    background: var(--panel);
    border-radius: 6px;
    overflow: hidden;
}
.saved-item button { background: none; }
.saved-item button:hover { background: var(--panel-hover); }
.saved-item .delete { color: #ef4444; }

.status {
    position: fixed;
    bottom: 1rem;
    right: 1rem;
    background: var(--panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 0.6rem 1rem;
    font-size: 0.9rem;
    opacity: 0;
    transition: opacity 0.2s;
}
.status.visible { opacity: 1; }
.status.error { border-color: var(--red); }
"#;
