//! Two-set (dubeolsik) composition automaton.
//!
//! `HangulComposer` consumes one compatibility jamo at a time, updates the
//! open syllable and writes an erase-and-retype correction to the sink after
//! every accepted key. Syllables are finalized ("flushed") when the next key
//! cannot extend them, when a non-jamo key arrives, or on an explicit
//! `flush()`.
//!
//! A vowel that follows a final steals it: the final (or the second half of
//! a compound final) becomes the initial of a new syllable, and the vowel is
//! fed again as that syllable's medial. The re-fed vowel lands on a syllable
//! with no medial yet, so it can never trigger another carry.

use crate::config::HangulConfig;
use crate::jamo::{self, JamoKind};
use crate::state::{CompositionState, Stage};
use libhangul_core::{Composer, KeyResult, OutputSink};
use tracing::{debug, trace};

pub struct HangulComposer {
    state: CompositionState,
    config: HangulConfig,
    /// Text finalized since the last `take_committed()`, drained by the
    /// dispatcher after every key
    committed: String,
}

impl HangulComposer {
    pub fn new() -> Self {
        Self::with_config(HangulConfig::default())
    }

    pub fn with_config(config: HangulConfig) -> Self {
        Self {
            state: CompositionState::new(),
            config,
            committed: String::new(),
        }
    }

    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    pub fn config(&self) -> &HangulConfig {
        &self.config
    }

    /// Feed one character.
    ///
    /// Non-jamo input flushes the open syllable and is reported as
    /// `NotHandled`; the caller sends it through the normal path.
    ///
    /// Finished syllables pile up until `take_committed()` is called.
    /// `ImeEngine` drains them after every key; a caller driving the
    /// composer directly has to drain them itself.
    pub fn process<S: OutputSink + ?Sized>(&mut self, ch: char, sink: &mut S) -> KeyResult {
        let Some(kind) = jamo::classify(ch) else {
            self.flush(sink);
            return KeyResult::NotHandled;
        };

        let mut pending = Some(ch);
        let mut rounds = 0;
        while let Some(next) = pending.take() {
            rounds += 1;
            debug_assert!(rounds <= 2, "carry-over re-fed more than once");
            pending = self.step(next, kind, sink);
        }

        self.state.emit(sink);
        KeyResult::Handled
    }

    /// Peel one jamo off the open syllable.
    ///
    /// Compound finals and medials fall back to their first half. Returns
    /// `NotHandled` when no syllable is open.
    pub fn backspace<S: OutputSink + ?Sized>(&mut self, sink: &mut S) -> KeyResult {
        let stage = self.state.stage();
        if stage == Stage::Empty {
            return KeyResult::NotHandled;
        }

        if !self.config.decompose_on_backspace {
            self.state.clear_slots();
        } else {
            match stage {
                Stage::HasInitialMedialFinal => {
                    let kept = self
                        .state
                        .final_consonant()
                        .and_then(jamo::split_final)
                        .map(|(first, _)| first);
                    self.state.set_final(kept);
                }
                Stage::HasInitialMedial => {
                    let kept = self
                        .state
                        .medial()
                        .and_then(jamo::split_vowel)
                        .map(|(first, _)| first);
                    self.state.set_medial(kept);
                }
                Stage::HasInitial => self.state.clear_slots(),
                Stage::Empty => {}
            }
        }

        trace!(stage = ?self.state.stage(), "backspace");
        self.state.emit(sink);
        if self.state.is_empty() {
            self.state.reset();
        }
        KeyResult::Handled
    }

    /// Finalize the open syllable.
    ///
    /// Returns the committed text, or `None` when nothing was open; a second
    /// flush in a row is therefore a no-op.
    pub fn flush<S: OutputSink + ?Sized>(&mut self, sink: &mut S) -> Option<String> {
        if self.state.is_empty() {
            return None;
        }
        self.finish(sink)
    }

    /// Text finalized since the last call.
    pub fn take_committed(&mut self) -> String {
        std::mem::take(&mut self.committed)
    }

    /// Apply one jamo. Returns a jamo to feed again after a carry-over.
    fn step<S: OutputSink + ?Sized>(
        &mut self,
        ch: char,
        kind: JamoKind,
        sink: &mut S,
    ) -> Option<char> {
        let stage = self.state.stage();
        trace!(jamo = %ch, ?stage, ?kind, "step");

        match (stage, kind) {
            (Stage::Empty, JamoKind::Consonant) => self.open(ch, sink),
            (Stage::Empty, JamoKind::Vowel) => self.commit_literal(ch, sink),
            (Stage::HasInitial, JamoKind::Consonant) => {
                self.finish(sink);
                self.open(ch, sink);
            }
            (Stage::HasInitial, JamoKind::Vowel) => self.state.set_medial(Some(ch)),
            (Stage::HasInitialMedial, JamoKind::Consonant) => {
                if jamo::is_final(ch) {
                    self.state.set_final(Some(ch));
                } else {
                    self.finish(sink);
                    self.open(ch, sink);
                }
            }
            (Stage::HasInitialMedial, JamoKind::Vowel) => {
                match self.state.medial().and_then(|m| self.combine_vowels(m, ch)) {
                    Some(compound) => self.state.set_medial(Some(compound)),
                    None => {
                        self.finish(sink);
                        self.commit_literal(ch, sink);
                    }
                }
            }
            (Stage::HasInitialMedialFinal, JamoKind::Consonant) => {
                match self
                    .state
                    .final_consonant()
                    .and_then(|f| self.combine_finals(f, ch))
                {
                    Some(compound) => self.state.set_final(Some(compound)),
                    None => {
                        self.finish(sink);
                        self.open(ch, sink);
                    }
                }
            }
            (Stage::HasInitialMedialFinal, JamoKind::Vowel) => {
                let final_ = self.state.final_consonant()?;
                let (kept, carried) = match jamo::split_final(final_) {
                    Some((first, second)) => (Some(first), second),
                    None => (None, final_),
                };
                debug!(final_ = %final_, carried = %carried, "final carried to next syllable");
                self.state.set_final(kept);
                self.finish(sink);
                self.state.set_initial(carried);
                return Some(ch);
            }
        }
        None
    }

    /// Start a syllable with `ch` as its initial, or commit `ch` as literal
    /// text when it cannot begin a syllable (a compound final such as ㄳ).
    fn open<S: OutputSink + ?Sized>(&mut self, ch: char, sink: &mut S) {
        if jamo::is_initial(ch) {
            self.state.set_initial(ch);
        } else {
            self.commit_literal(ch, sink);
        }
    }

    /// A jamo that cannot join a syllable is sent as-is and committed.
    fn commit_literal<S: OutputSink + ?Sized>(&mut self, ch: char, sink: &mut S) {
        trace!(jamo = %ch, "literal");
        let mut buf = [0u8; 4];
        sink.append_text(ch.encode_utf8(&mut buf));
        self.committed.push(ch);
    }

    /// Make sure the syllable is fully emitted, commit it and reset.
    fn finish<S: OutputSink + ?Sized>(&mut self, sink: &mut S) -> Option<String> {
        self.state.emit(sink);
        let text = self.state.display();
        self.state.reset();
        if text.is_empty() {
            return None;
        }
        debug!(syllable = %text, "commit");
        self.committed.push_str(&text);
        Some(text)
    }

    fn combine_vowels(&self, first: char, second: char) -> Option<char> {
        if self.config.combine_vowels {
            jamo::combine_vowels(first, second)
        } else {
            None
        }
    }

    fn combine_finals(&self, first: char, second: char) -> Option<char> {
        if self.config.combine_finals {
            jamo::combine_finals(first, second)
        } else {
            None
        }
    }
}

impl Default for HangulComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer for HangulComposer {
    fn accepts(&self, ch: char) -> bool {
        jamo::is_jamo(ch)
    }

    fn process_char(&mut self, ch: char, sink: &mut dyn OutputSink) -> KeyResult {
        self.process(ch, sink)
    }

    fn backspace(&mut self, sink: &mut dyn OutputSink) -> KeyResult {
        HangulComposer::backspace(self, sink)
    }

    fn flush(&mut self, sink: &mut dyn OutputSink) -> Option<String> {
        HangulComposer::flush(self, sink)
    }

    fn is_composing(&self) -> bool {
        !self.state.is_empty()
    }

    fn preedit(&self) -> &str {
        self.state.last_emitted()
    }

    fn take_committed(&mut self) -> String {
        HangulComposer::take_committed(self)
    }

    fn name(&self) -> &'static str {
        "hangul"
    }
}
