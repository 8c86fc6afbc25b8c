//! Clipboard capability and the transient "copied" indicator.

use std::time::{Duration, Instant};

/// How long the "Copied!" state stays visible after a successful copy.
pub const COPIED_INDICATOR: Duration = Duration::from_secs(2);

/// Destination for copied text. Failures are reported but never fatal.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// A write the browser already attempted with `navigator.clipboard`; the
/// page reports the outcome and this replays it.
#[derive(Debug, Clone)]
pub struct ReportedWrite {
    pub outcome: Result<(), String>,
    pub written: Option<String>,
}

impl ReportedWrite {
    pub fn new(ok: bool, error: Option<String>) -> Self {
        let outcome = if ok {
            Ok(())
        } else {
            Err(error.unwrap_or_else(|| "clipboard write failed".to_string()))
        };
        Self {
            outcome,
            written: None,
        }
    }
}

impl Clipboard for ReportedWrite {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        self.outcome.clone()?;
        self.written = Some(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyIndicator {
    until: Option<Instant>,
}

impl CopyIndicator {
    pub fn arm(&mut self, now: Instant) {
        self.until = Some(now + COPIED_INDICATOR);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        matches!(self.until, Some(until) if now < until)
    }
}
