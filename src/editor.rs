//! Editor state: the working source bundle plus display preferences.

use tracing::info;

use crate::models::{DisplayMode, DisplayPreferences, Field, FontSize, SourceBundle};
use crate::prompt::Confirm;

pub const RESET_ALL_PROMPT: &str =
    "Are you sure you want to reset all code to the default boilerplate? This action cannot be undone.";

pub fn reset_field_prompt(field: Field) -> String {
    format!(
        "Are you sure you want to reset the {} to the default boilerplate? This action cannot be undone.",
        field.label()
    )
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    bundle: SourceBundle,
    prefs: DisplayPreferences,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bundle(&self) -> &SourceBundle {
        &self.bundle
    }

    pub fn preferences(&self) -> &DisplayPreferences {
        &self.prefs
    }

    pub fn field(&self, field: Field) -> &str {
        self.bundle.get(field)
    }

    pub fn active_field(&self) -> Field {
        self.prefs.active_field
    }

    pub fn active_text(&self) -> &str {
        self.bundle.get(self.prefs.active_field)
    }

    /// Replace one field, leaving the other two untouched.
    pub fn update_field(&mut self, field: Field, text: impl Into<String>) {
        *self.bundle.get_mut(field) = text.into();
    }

    pub fn set_active_field(&mut self, field: Field) {
        self.prefs.active_field = field;
    }

    /// Replace the whole bundle, e.g. after loading a snapshot.
    pub fn replace_bundle(&mut self, bundle: SourceBundle) {
        self.bundle = bundle;
    }

    /// Restore the default bundle. Asks first unless there is nothing to lose.
    /// Returns whether the reset happened.
    pub fn reset_all(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !self.bundle.is_default() && !confirm.confirm(RESET_ALL_PROMPT) {
            return false;
        }
        self.bundle = SourceBundle::default();
        info!("Reset all fields to defaults");
        true
    }

    /// Restore one field to its default and switch to its tab. Whitespace
    /// around the current text does not count as a change.
    pub fn reset_field(&mut self, field: Field, confirm: &mut dyn Confirm) -> bool {
        if self.bundle.get(field).trim() != field.default_text()
            && !confirm.confirm(&reset_field_prompt(field))
        {
            return false;
        }
        self.update_field(field, field.default_text());
        self.prefs.active_field = field;
        info!(field = %field, "Reset field to default");
        true
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.prefs.display_mode = mode;
    }

    /// Returns true when the preview font actually changed.
    pub fn set_preview_font_size(&mut self, size: FontSize) -> bool {
        let changed = self.prefs.preview_font_size != size;
        self.prefs.preview_font_size = size;
        changed
    }

    /// Grow the font of the surface selected by the display mode.
    /// Returns true when the preview font changed.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom(FontSize::larger)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom(FontSize::smaller)
    }

    fn zoom(&mut self, step: fn(FontSize) -> FontSize) -> bool {
        match self.prefs.display_mode {
            DisplayMode::Code => {
                self.prefs.editor_font_size = step(self.prefs.editor_font_size);
                false
            }
            DisplayMode::Output => {
                let next = step(self.prefs.preview_font_size);
                self.set_preview_font_size(next)
            }
        }
    }
}
