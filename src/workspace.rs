//! The editing session: editor state, preview and snapshot store together.
//!
//! Every user action maps to one method here. Interactive steps (confirmation,
//! the snapshot name prompt, the clipboard) are passed in by the caller.

use std::time::Instant;

use tracing::{debug, info};

use crate::clipboard::{Clipboard, CopyIndicator};
use crate::compositor::Preview;
use crate::editor::Editor;
use crate::error::Result;
use crate::export::export_bundle;
use crate::models::{DisplayMode, Field, FontSize, SourceBundle};
use crate::prompt::{Confirm, PromptText};
use crate::store::SnapshotStore;

pub const SAVE_PROMPT: &str = "Enter a name for your file:";

pub fn delete_prompt(name: &str) -> String {
    format!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone.",
        name
    )
}

pub struct Workspace<S> {
    editor: Editor,
    preview: Preview,
    copied: CopyIndicator,
    store: S,
}

impl<S: SnapshotStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self {
            editor: Editor::new(),
            preview: Preview::default(),
            copied: CopyIndicator::default(),
            store,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn bundle(&self) -> &SourceBundle {
        self.editor.bundle()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.document()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    pub fn update_field(&mut self, field: Field, text: impl Into<String>) {
        self.editor.update_field(field, text);
    }

    pub fn set_active_field(&mut self, field: Field) {
        self.editor.set_active_field(field);
    }

    pub fn reset_all(&mut self, confirm: &mut dyn Confirm) -> bool {
        self.editor.reset_all(confirm)
    }

    pub fn reset_field(&mut self, field: Field, confirm: &mut dyn Confirm) -> bool {
        self.editor.reset_field(field, confirm)
    }

    // ------------------------------------------------------------------------
    // Preview
    // ------------------------------------------------------------------------

    pub fn run(&mut self) -> &str {
        let size = self.editor.preferences().preview_font_size;
        self.preview.refresh(self.editor.bundle(), size)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.editor.set_display_mode(mode);
    }

    /// Recomposes when the preview font changed and returns the new document.
    pub fn set_preview_font_size(&mut self, size: FontSize) -> Option<&str> {
        if self.editor.set_preview_font_size(size) {
            Some(self.run())
        } else {
            None
        }
    }

    pub fn zoom_in(&mut self) -> Option<&str> {
        if self.editor.zoom_in() {
            Some(self.run())
        } else {
            None
        }
    }

    pub fn zoom_out(&mut self) -> Option<&str> {
        if self.editor.zoom_out() {
            Some(self.run())
        } else {
            None
        }
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    /// Ask for a name and save the current bundle under it. Returns the name,
    /// or `None` when the prompt was cancelled or left empty.
    pub fn save_snapshot(&mut self, prompt: &mut dyn PromptText) -> Result<Option<String>> {
        let name = match prompt.prompt(SAVE_PROMPT) {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Ok(None),
        };
        self.store.save(&name, self.editor.bundle())?;
        Ok(Some(name))
    }

    /// Replace the working bundle with a snapshot. Unknown names leave the
    /// bundle as it is and return false.
    pub fn load_snapshot(&mut self, name: &str) -> Result<bool> {
        match self.store.load(name)? {
            Some(bundle) => {
                self.editor.replace_bundle(bundle);
                info!(name = %name, "Loaded snapshot");
                Ok(true)
            }
            None => {
                debug!(name = %name, "No snapshot to load");
                Ok(false)
            }
        }
    }

    /// Returns true when a snapshot was removed.
    pub fn delete_snapshot(&mut self, name: &str, confirm: &mut dyn Confirm) -> Result<bool> {
        if !confirm.confirm(&delete_prompt(name)) {
            return Ok(false);
        }
        self.store.delete(name)
    }

    pub fn snapshot_names(&self) -> Result<Vec<String>> {
        self.store.list_names()
    }

    // ------------------------------------------------------------------------
    // Clipboard and export
    // ------------------------------------------------------------------------

    /// Copy the active field. On failure nothing changes and the indicator
    /// stays off.
    pub fn copy_active_field(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        let field = self.editor.active_field();
        match clipboard.write_text(self.editor.active_text()) {
            Ok(()) => {
                self.copied.arm(now);
                debug!(field = %field, "Copied field to clipboard");
                true
            }
            Err(e) => {
                debug!(field = %field, error = %e, "Clipboard write failed");
                false
            }
        }
    }

    pub fn copied(&self, now: Instant) -> bool {
        self.copied.is_active(now)
    }

    pub fn export(&self) -> Result<String> {
        export_bundle(self.editor.bundle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ReportedWrite, COPIED_INDICATOR};
    use crate::prompt::Answers;
    use crate::store::SledSnapshotStore;

    fn workspace() -> Workspace<SledSnapshotStore> {
        let db = sled::Config::new().temporary(true).open().unwrap();
        Workspace::new(SledSnapshotStore::open(&db).unwrap())
    }

    fn save_as(ws: &mut Workspace<SledSnapshotStore>, name: &str) {
        let mut answers = Answers::with_text(Some(name.to_string()));
        assert_eq!(ws.save_snapshot(&mut answers).unwrap().as_deref(), Some(name));
    }

    #[test]
    fn test_default_run_shows_welcome() {
        let mut ws = workspace();
        let doc = ws.run().to_string();
        assert!(doc.contains("Welcome to CodeCraft"));
        assert!(doc.contains("body { font-size: 14px; }"));
        assert_eq!(ws.preview(), Some(doc.as_str()));
    }

    #[test]
    fn test_load_restores_saved_css() {
        let mut ws = workspace();
        ws.update_field(Field::Css, "body{color:red;}");
        save_as(&mut ws, "test1");
        ws.update_field(Field::Css, "body{color:blue;}");

        assert!(ws.load_snapshot("test1").unwrap());
        assert_eq!(ws.bundle().css, "body{color:red;}");
    }

    #[test]
    fn test_deleted_snapshot_cannot_be_loaded() {
        let mut ws = workspace();
        ws.update_field(Field::Html, "<p>B1</p>");
        save_as(&mut ws, "a");

        assert!(ws.delete_snapshot("a", &mut Answers::confirmed(true)).unwrap());
        assert!(ws.snapshot_names().unwrap().is_empty());

        ws.update_field(Field::Html, "<p>current</p>");
        let before = ws.bundle().clone();
        assert!(!ws.load_snapshot("a").unwrap());
        assert_eq!(ws.bundle(), &before);
    }

    #[test]
    fn test_delete_declined_keeps_snapshot() {
        let mut ws = workspace();
        save_as(&mut ws, "keep");
        let mut answers = Answers::confirmed(false);
        assert!(!ws.delete_snapshot("keep", &mut answers).unwrap());
        assert_eq!(answers.declined_prompt(), Some(delete_prompt("keep").as_str()));
        assert_eq!(ws.snapshot_names().unwrap(), vec!["keep"]);
    }

    #[test]
    fn test_save_cancelled_or_blank_is_noop() {
        let mut ws = workspace();
        assert_eq!(ws.save_snapshot(&mut Answers::with_text(None)).unwrap(), None);
        assert_eq!(
            ws.save_snapshot(&mut Answers::with_text(Some(String::new())))
                .unwrap(),
            None
        );
        assert!(ws.snapshot_names().unwrap().is_empty());
    }

    #[test]
    fn test_save_twice_lists_once() {
        let mut ws = workspace();
        save_as(&mut ws, "dup");
        ws.update_field(Field::Js, "changed()");
        save_as(&mut ws, "dup");
        assert_eq!(ws.snapshot_names().unwrap(), vec!["dup"]);
        assert_eq!(ws.store().load("dup").unwrap().unwrap().js, "changed()");
    }

    #[test]
    fn test_preview_font_change_recomposes() {
        let mut ws = workspace();
        ws.set_display_mode(DisplayMode::Output);
        let doc = ws.zoom_in().map(str::to_string).unwrap();
        assert!(doc.contains("body { font-size: 16px; }"));
        assert_eq!(ws.preview(), Some(doc.as_str()));

        assert!(ws.set_preview_font_size(FontSize::clamped(16)).is_none());
        let doc = ws
            .set_preview_font_size(FontSize::clamped(10))
            .map(str::to_string)
            .unwrap();
        assert!(doc.contains("body { font-size: 10px; }"));
    }

    #[test]
    fn test_editor_zoom_does_not_recompose() {
        let mut ws = workspace();
        assert!(ws.zoom_in().is_none());
        assert!(ws.preview().is_none());
    }

    #[test]
    fn test_copy_active_field() {
        let mut ws = workspace();
        ws.update_field(Field::Css, "p{}");
        ws.set_active_field(Field::Css);
        let now = Instant::now();

        let mut clipboard = ReportedWrite::new(true, None);
        assert!(ws.copy_active_field(&mut clipboard, now));
        assert_eq!(clipboard.written.as_deref(), Some("p{}"));
        assert!(ws.copied(now));
        assert!(!ws.copied(now + COPIED_INDICATOR));
    }

    #[test]
    fn test_copy_failure_is_silent() {
        let mut ws = workspace();
        let now = Instant::now();
        let before = ws.bundle().clone();
        assert!(!ws.copy_active_field(&mut ReportedWrite::new(false, None), now));
        assert!(!ws.copied(now));
        assert_eq!(ws.bundle(), &before);
    }

    #[test]
    fn test_export_leaves_snapshots_alone() {
        let ws = workspace();
        let json = ws.export().unwrap();
        let parsed: SourceBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, ws.bundle());
        assert!(ws.snapshot_names().unwrap().is_empty());
    }
}
