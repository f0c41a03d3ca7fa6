//! Erase-and-retype corrections.
//!
//! The peer on the other side of the byte stream has no notion of a pending
//! composition. Every change to the open syllable is therefore sent as a
//! `Correction`: erase what was shown for the syllable, then append the new
//! display text.

use crate::sink::OutputSink;

/// An erase count followed by replacement text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Correction {
    /// Number of display units to erase (one per `char` previously emitted)
    pub erase: usize,
    /// Text to append after erasing
    pub text: String,
}

impl Correction {
    pub fn new<T: Into<String>>(erase: usize, text: T) -> Self {
        Self {
            erase,
            text: text.into(),
        }
    }

    /// Compute the correction that turns `previous` into `next`.
    ///
    /// Returns `None` when both texts are identical. A composed syllable is a
    /// single `char`, so it costs exactly one erase.
    pub fn between(previous: &str, next: &str) -> Option<Self> {
        if previous == next {
            return None;
        }
        Some(Self {
            erase: previous.chars().count(),
            text: next.to_string(),
        })
    }

    /// Send this correction to a sink.
    pub fn apply<S: OutputSink + ?Sized>(&self, sink: &mut S) {
        for _ in 0..self.erase {
            sink.erase_one();
        }
        if !self.text.is_empty() {
            sink.append_text(&self.text);
        }
    }
}

/// Diff `last_emitted` against `next`, apply the correction and remember
/// `next` as the new emitted text.
///
/// Returns the correction that was applied, if any.
pub fn emit<S: OutputSink + ?Sized>(
    last_emitted: &mut String,
    next: &str,
    sink: &mut S,
) -> Option<Correction> {
    let correction = Correction::between(last_emitted, next);
    if let Some(c) = &correction {
        c.apply(sink);
    }
    last_emitted.clear();
    last_emitted.push_str(next);
    correction
}
