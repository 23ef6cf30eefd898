//! Clipboard access used when copying a result.
//!
//! The primary path is the system clipboard API. When that is rejected
//! the caller retries through [`Clipboard::write_text_fallback`], which
//! front ends map to whatever legacy copy mechanism they have.

use crate::errors::{CalcError, CalcResult};

pub trait Clipboard {
    /// Write through the primary clipboard API
    fn write_text(&mut self, text: &str) -> CalcResult<()>;

    /// Write through the legacy mechanism. Defaults to "unavailable".
    fn write_text_fallback(&mut self, _text: &str) -> CalcResult<()> {
        Err(CalcError::ClipboardUnavailable {
            reason: "no fallback copy mechanism".to_string(),
        })
    }
}

/// In-process clipboard; can be told to reject either mechanism.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub reject_primary: bool,
    pub reject_fallback: bool,
    pub used_fallback: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose primary API always fails
    pub fn rejecting() -> Self {
        MemoryClipboard {
            reject_primary: true,
            ..Self::default()
        }
    }

    /// A clipboard where both mechanisms fail
    pub fn unavailable() -> Self {
        MemoryClipboard {
            reject_primary: true,
            reject_fallback: true,
            ..Self::default()
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> CalcResult<()> {
        if self.reject_primary {
            return Err(CalcError::ClipboardUnavailable {
                reason: "permission denied".to_string(),
            });
        }
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn write_text_fallback(&mut self, text: &str) -> CalcResult<()> {
        self.used_fallback = true;
        if self.reject_fallback {
            return Err(CalcError::ClipboardUnavailable {
                reason: "copy command not supported".to_string(),
            });
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
