//! JSON export of the working bundle.
//!
//! The download is a plain, pretty-printed `{html, css, js}` document. It is
//! independent of the snapshot store.

use crate::error::Result;
use crate::models::SourceBundle;

pub const EXPORT_FILENAME: &str = "code.json";

pub fn export_bundle(bundle: &SourceBundle) -> Result<String> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

/// `Content-Disposition` value that makes browsers save the export.
pub fn content_disposition() -> String {
    format!("attachment; filename=\"{}\"", EXPORT_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_is_pretty_json_with_three_fields() {
        let bundle = SourceBundle::new("<p>hi</p>", "p { color: red; }", "run();");
        let json = export_bundle(&bundle).unwrap();

        assert!(json.starts_with("{\n  \"html\""));
        let parsed: SourceBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bundle);
    }

    #[test]
    fn test_content_disposition_names_file() {
        assert_eq!(content_disposition(), "attachment; filename=\"code.json\"");
    }
}
