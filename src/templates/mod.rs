//! HTML templates and styling for the playground.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants for the dark theme
//! - `components` - Header toolbar, editor tabs, snapshot list, base template
//! - `playground` - The full playground page and its client script

mod components;
mod playground;
mod styles;

pub use components::{base_html, editor_tabs, header_bar, html_escape, snapshot_list};
pub use playground::{render_playground, PREVIEW_SANDBOX};
pub use styles::STYLE;
