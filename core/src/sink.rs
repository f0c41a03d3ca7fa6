//! Output sinks for corrections and passthrough keys.
//!
//! The transport understands two primitives only: erase one previously shown
//! character, and append literal text. Everything the IME produces is
//! expressed through [`OutputSink`].

use crate::correction::Correction;

/// Destination for erase/append operations.
pub trait OutputSink {
    /// Erase exactly one previously emitted display unit.
    fn erase_one(&mut self);

    /// Append literal text.
    fn append_text(&mut self, text: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn erase_one(&mut self) {
        (**self).erase_one();
    }

    fn append_text(&mut self, text: &str) {
        (**self).append_text(text);
    }
}

/// Default erase byte: DEL, which the console sends for backspace.
pub const DEFAULT_ERASE_BYTE: u8 = 0x7f;

/// Byte-stream sink: one erase byte per erase, UTF-8 for text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSink {
    bytes: Vec<u8>,
    erase_byte: u8,
}

impl ByteSink {
    pub fn new() -> Self {
        Self::with_erase_byte(DEFAULT_ERASE_BYTE)
    }

    /// Create a sink that encodes erase as `erase_byte` (e.g. 0x08 for BS).
    pub fn with_erase_byte(erase_byte: u8) -> Self {
        Self {
            bytes: Vec::new(),
            erase_byte,
        }
    }

    /// Bytes buffered so far.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Drain the buffered bytes, e.g. to hand them to a socket.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for ByteSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for ByteSink {
    fn erase_one(&mut self) {
        self.bytes.push(self.erase_byte);
    }

    fn append_text(&mut self, text: &str) {
        self.bytes.extend_from_slice(text.as_bytes());
    }
}

/// Model of the receiving terminal surface.
///
/// Erase removes one `char` from the end, the way a line editor on the
/// remote side deletes one character per DEL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenBuffer {
    text: String,
}

impl ScreenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl OutputSink for ScreenBuffer {
    fn erase_one(&mut self) {
        self.text.pop();
    }

    fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// A single operation seen by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp {
    Erase,
    Append(String),
}

/// Sink that records every operation in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    ops: Vec<SinkOp>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SinkOp> {
        std::mem::take(&mut self.ops)
    }

    /// Regroup the operations into corrections: each run of erases together
    /// with the append that follows it. Trailing erases form a correction
    /// with empty text.
    pub fn corrections(&self) -> Vec<Correction> {
        let mut out = Vec::new();
        let mut erase = 0;
        for op in &self.ops {
            match op {
                SinkOp::Erase => erase += 1,
                SinkOp::Append(text) => {
                    out.push(Correction::new(erase, text.clone()));
                    erase = 0;
                }
            }
        }
        if erase > 0 {
            out.push(Correction::new(erase, ""));
        }
        out
    }

    /// Replay the recorded operations onto a fresh screen.
    pub fn screen(&self) -> ScreenBuffer {
        let mut screen = ScreenBuffer::new();
        for op in &self.ops {
            match op {
                SinkOp::Erase => screen.erase_one(),
                SinkOp::Append(text) => screen.append_text(text),
            }
        }
        screen
    }
}

impl OutputSink for RecordingSink {
    fn erase_one(&mut self) {
        self.ops.push(SinkOp::Erase);
    }

    fn append_text(&mut self, text: &str) {
        self.ops.push(SinkOp::Append(text.to_string()));
    }
}
