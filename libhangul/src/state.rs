//! The in-progress syllable.
//!
//! Exactly one syllable is open at a time. Slots fill strictly in order:
//! a medial requires an initial and a final requires both. The text last
//! sent for the syllable travels with it so each correction can be computed
//! without any state outside this value.

use crate::jamo;
use libhangul_core::correction::{self, Correction};
use libhangul_core::OutputSink;

/// Which slots of the open syllable are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Empty,
    HasInitial,
    HasInitialMedial,
    HasInitialMedialFinal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionState {
    initial: Option<char>,
    medial: Option<char>,
    final_: Option<char>,
    last_emitted: String,
}

impl CompositionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        match (self.initial, self.medial, self.final_) {
            (None, _, _) => Stage::Empty,
            (Some(_), None, _) => Stage::HasInitial,
            (Some(_), Some(_), None) => Stage::HasInitialMedial,
            (Some(_), Some(_), Some(_)) => Stage::HasInitialMedialFinal,
        }
    }

    pub fn initial(&self) -> Option<char> {
        self.initial
    }

    pub fn medial(&self) -> Option<char> {
        self.medial
    }

    pub fn final_consonant(&self) -> Option<char> {
        self.final_
    }

    /// Text most recently sent to the sink for this syllable.
    pub fn last_emitted(&self) -> &str {
        &self.last_emitted
    }

    /// True when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.initial.is_none()
    }

    /// Display text for the current slots.
    ///
    /// A bare initial shows as the jamo itself; anything with a medial is a
    /// single precomposed syllable.
    pub fn display(&self) -> String {
        match (self.initial, self.medial) {
            (None, _) => String::new(),
            (Some(l), None) => l.to_string(),
            (Some(l), Some(v)) => match jamo::compose(l, v, self.final_) {
                Some(syllable) => syllable.to_string(),
                None => [Some(l), Some(v), self.final_].iter().flatten().collect(),
            },
        }
    }

    pub(crate) fn set_initial(&mut self, ch: char) {
        debug_assert!(jamo::is_initial(ch), "{} is not an initial", ch);
        self.initial = Some(ch);
    }

    pub(crate) fn set_medial(&mut self, ch: Option<char>) {
        debug_assert!(ch.is_none() || self.initial.is_some());
        self.medial = ch;
        if ch.is_none() {
            self.final_ = None;
        }
    }

    pub(crate) fn set_final(&mut self, ch: Option<char>) {
        debug_assert!(ch.is_none() || self.medial.is_some());
        self.final_ = ch;
    }

    /// Clear every slot, keeping `last_emitted` so the next emission can
    /// erase what is still on screen.
    pub(crate) fn clear_slots(&mut self) {
        self.initial = None;
        self.medial = None;
        self.final_ = None;
    }

    /// Bring the sink in line with `display()`.
    pub(crate) fn emit<S: OutputSink + ?Sized>(&mut self, sink: &mut S) -> Option<Correction> {
        let next = self.display();
        correction::emit(&mut self.last_emitted, &next, sink)
    }

    /// Forget the syllable entirely. Whatever was emitted stays on screen.
    pub(crate) fn reset(&mut self) {
        self.clear_slots();
        self.last_emitted.clear();
    }
}
