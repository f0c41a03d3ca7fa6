//! IME context for platform communication.
//!
//! The `ImeContext` struct is a plain data container. After calling
//! `process_key()` the UI reads these fields to show what is being composed;
//! the transport never needs it, corrections have already been written to
//! the sink.

use crate::ime_engine::InputMode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeContext {
    /// Display text of the open syllable (what the peer currently shows for it)
    pub preedit_text: String,

    /// Text finalized by the last key
    pub commit_text: String,

    /// Active layout
    pub mode: InputMode,
}

impl ImeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_preedit(&self) -> bool {
        !self.preedit_text.is_empty()
    }

    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }
}
