//! Composition properties of the Hangul automaton.
//!
//! Covers:
//! - initial + medial always produces the formula syllable in one correction
//! - compound vowels typed as two keys equal the compound typed directly
//! - backspace unwinds a syllable one jamo at a time back to empty, whether
//!   a compound was typed as two keys or as one
//! - flush idempotence and carry-over of finals into the next syllable

use libhangul::jamo::{self, FINALS, INITIALS, MEDIALS, SYLLABLE_BASE};
use libhangul::{Correction, HangulComposer, KeyResult, RecordingSink, ScreenBuffer, Stage};
use proptest::prelude::*;

fn type_keys(composer: &mut HangulComposer, keys: &[char], sink: &mut RecordingSink) {
    for &ch in keys {
        assert_eq!(composer.process(ch, sink), KeyResult::Handled, "key {}", ch);
    }
}

/// Vowel keys that are not themselves compounds.
fn base_vowels() -> Vec<char> {
    MEDIALS
        .iter()
        .copied()
        .filter(|&v| jamo::split_vowel(v).is_none())
        .collect()
}

/// Keys that produce each medial: one key, or two for a compound.
fn medial_keys() -> Vec<Vec<char>> {
    MEDIALS
        .iter()
        .map(|&v| match jamo::split_vowel(v) {
            Some((a, b)) => vec![a, b],
            None => vec![v],
        })
        .collect()
}

/// Keys that produce each final: one key, or two for a compound.
fn final_keys() -> Vec<Vec<char>> {
    FINALS
        .iter()
        .map(|&f| match jamo::split_final(f) {
            Some((a, b)) => vec![a, b],
            None => vec![f],
        })
        .collect()
}

#[test]
fn initial_and_base_vowel_give_formula_syllable() {
    for (l, &initial) in INITIALS.iter().enumerate() {
        for &vowel in base_vowels().iter() {
            let v = jamo::medial_index(vowel).unwrap();
            let expected = char::from_u32(SYLLABLE_BASE + l as u32 * 21 * 28 + v * 28).unwrap();

            let mut composer = HangulComposer::new();
            let mut sink = RecordingSink::new();
            composer.process(initial, &mut sink);
            sink.take_ops();
            composer.process(vowel, &mut sink);

            assert_eq!(
                sink.corrections(),
                vec![Correction::new(1, expected.to_string())],
                "{} + {}",
                initial,
                vowel
            );
        }
    }
}

#[test]
fn two_key_compound_vowel_equals_direct_compound() {
    let compounds: Vec<char> = MEDIALS
        .iter()
        .copied()
        .filter(|&v| jamo::split_vowel(v).is_some())
        .collect();
    assert_eq!(compounds.len(), 11);

    for &initial in INITIALS.iter() {
        for &compound in compounds.iter() {
            let Some((a, b)) = jamo::split_vowel(compound) else {
                continue;
            };

            let mut typed = HangulComposer::new();
            let mut typed_sink = RecordingSink::new();
            type_keys(&mut typed, &[initial, a, b], &mut typed_sink);

            let mut direct = HangulComposer::new();
            let mut direct_sink = RecordingSink::new();
            type_keys(&mut direct, &[initial, compound], &mut direct_sink);

            assert_eq!(typed_sink.screen(), direct_sink.screen());
            assert_eq!(typed.state().medial(), Some(compound));
        }
    }
}

#[test]
fn simple_syllable_unwinds_in_three_backspaces() {
    let mut composer = HangulComposer::new();
    let mut sink = RecordingSink::new();
    type_keys(&mut composer, &['ㅂ', 'ㅏ', 'ㅁ'], &mut sink);
    assert_eq!(sink.screen().text(), "밤");

    for _ in 0..3 {
        assert_eq!(composer.backspace(&mut sink), KeyResult::Handled);
    }
    assert_eq!(composer.state().stage(), Stage::Empty);
    assert_eq!(composer.state().last_emitted(), "");
    assert_eq!(sink.screen().text(), "");
}

#[test]
fn directly_typed_compounds_unwind_through_their_halves() {
    let mut composer = HangulComposer::new();
    let mut sink = RecordingSink::new();
    type_keys(&mut composer, &['ㄱ', 'ㅘ', 'ㄺ'], &mut sink);
    assert_eq!(sink.screen().text(), "괅");

    // ㄺ -> ㄹ -> none, ㅘ -> ㅗ -> none, then the initial
    for expected in ["괄", "과", "고", "ㄱ", ""] {
        assert_eq!(composer.backspace(&mut sink), KeyResult::Handled);
        assert_eq!(sink.screen().text(), expected);
    }
    assert_eq!(composer.backspace(&mut sink), KeyResult::NotHandled);
}

#[test]
fn carry_over_produces_two_syllables() {
    let mut composer = HangulComposer::new();
    let mut sink = RecordingSink::new();
    type_keys(&mut composer, &['ㅁ', 'ㅏ', 'ㄱ'], &mut sink);
    assert_eq!(composer.state().stage(), Stage::HasInitialMedialFinal);
    sink.take_ops();

    composer.process('ㅏ', &mut sink);
    assert_eq!(
        sink.corrections(),
        vec![Correction::new(1, "마"), Correction::new(0, "가")]
    );
    assert_eq!(composer.state().initial(), Some('ㄱ'));
    assert_eq!(composer.state().medial(), Some('ㅏ'));
    assert_eq!(composer.take_committed(), "마");
}

#[test]
fn annyeong() {
    let mut composer = HangulComposer::new();
    let mut sink = RecordingSink::new();
    type_keys(&mut composer, &['ㅇ', 'ㅏ', 'ㄴ', 'ㄴ', 'ㅕ', 'ㅇ'], &mut sink);
    composer.flush(&mut sink);

    assert_eq!(sink.screen().text(), "안녕");
    assert_eq!(
        sink.corrections(),
        vec![
            Correction::new(0, "ㅇ"),
            Correction::new(1, "아"),
            Correction::new(1, "안"),
            Correction::new(0, "ㄴ"),
            Correction::new(1, "녀"),
            Correction::new(1, "녕"),
        ]
    );
    assert_eq!(composer.take_committed(), "안녕");
}

#[test]
fn trailing_hieut_closes_with_hieut() {
    // ㅎ as the last key is a final, giving 녛 rather than 녕
    let mut composer = HangulComposer::new();
    let mut screen = ScreenBuffer::new();
    for ch in ['ㅇ', 'ㅏ', 'ㄴ', 'ㄴ', 'ㅕ', 'ㅎ'] {
        composer.process(ch, &mut screen);
    }
    assert_eq!(screen.text(), "안녛");
}

#[test]
fn flush_twice_only_commits_once() {
    let mut composer = HangulComposer::new();
    let mut sink = RecordingSink::new();
    type_keys(&mut composer, &['ㄱ'], &mut sink);
    let emitted = sink.ops().len();

    assert_eq!(composer.flush(&mut sink), Some("ㄱ".to_string()));
    assert_eq!(composer.flush(&mut sink), None);
    assert_eq!(sink.ops().len(), emitted);
}

proptest! {
    /// Property: after a flush the screen shows exactly the committed text
    #[test]
    fn prop_screen_matches_committed(keys in proptest::collection::vec(
        proptest::char::range('\u{3131}', '\u{3163}'), 0..40)
    ) {
        let mut composer = HangulComposer::new();
        let mut screen = ScreenBuffer::new();
        for &ch in &keys {
            prop_assert_eq!(composer.process(ch, &mut screen), KeyResult::Handled);
        }
        composer.flush(&mut screen);
        prop_assert_eq!(composer.take_committed(), screen.text());
        prop_assert_eq!(composer.state().stage(), Stage::Empty);
    }

    /// Property: the screen only ever holds jamo and precomposed syllables,
    /// and shows the open syllable's display text at its end
    #[test]
    fn prop_open_syllable_is_last_on_screen(keys in proptest::collection::vec(
        proptest::char::range('\u{3131}', '\u{3163}'), 1..40)
    ) {
        let mut composer = HangulComposer::new();
        let mut screen = ScreenBuffer::new();
        for &ch in &keys {
            composer.process(ch, &mut screen);
            let display = composer.state().display();
            prop_assert!(screen.text().ends_with(&display));
            prop_assert_eq!(composer.state().last_emitted(), display.as_str());
        }
        let syllables = '\u{AC00}'..='\u{D7A3}';
        for ch in screen.text().chars() {
            prop_assert!(jamo::is_jamo(ch) || syllables.contains(&ch));
        }
    }

    /// Property: one backspace per key unwinds a syllable back to empty,
    /// whether its medial and final are simple or compound (including the
    /// ㅐ ㅒ ㅔ ㅖ family built from a vowel and ㅣ)
    #[test]
    fn prop_backspace_unwinds_syllable(
        initial in proptest::sample::select(INITIALS.to_vec()),
        medial in proptest::sample::select(medial_keys()),
        final_ in proptest::option::of(proptest::sample::select(final_keys())),
    ) {
        let mut keys = vec![initial];
        keys.extend(medial);
        keys.extend(final_.unwrap_or_default());

        let mut composer = HangulComposer::new();
        let mut sink = RecordingSink::new();
        for &ch in &keys {
            composer.process(ch, &mut sink);
        }
        prop_assert_eq!(sink.screen().text().chars().count(), 1);

        for _ in 0..keys.len() {
            prop_assert_eq!(composer.backspace(&mut sink), KeyResult::Handled);
        }
        prop_assert_eq!(composer.state().stage(), Stage::Empty);
        prop_assert!(sink.screen().text().is_empty());
        prop_assert_eq!(composer.backspace(&mut sink), KeyResult::NotHandled);
    }

    /// Property: a compound typed as one key still unwinds one constituent
    /// per backspace, so the count matches the two-key spelling
    #[test]
    fn prop_direct_compound_unwinds_by_constituents(
        initial in proptest::sample::select(INITIALS.to_vec()),
        medial in proptest::sample::select(MEDIALS.to_vec()),
        final_ in proptest::option::of(proptest::sample::select(FINALS.to_vec())),
    ) {
        let parts = |split: bool| if split { 2 } else { 1 };
        let mut expected = 1 + parts(jamo::split_vowel(medial).is_some());
        if let Some(f) = final_ {
            expected += parts(jamo::split_final(f).is_some());
        }

        let mut composer = HangulComposer::new();
        let mut sink = RecordingSink::new();
        composer.process(initial, &mut sink);
        composer.process(medial, &mut sink);
        if let Some(f) = final_ {
            composer.process(f, &mut sink);
        }
        prop_assert_eq!(sink.screen().text().chars().count(), 1);

        let mut presses = 0;
        while composer.backspace(&mut sink) == KeyResult::Handled {
            presses += 1;
            prop_assert!(presses <= expected);
        }
        prop_assert_eq!(presses, expected);
        prop_assert!(sink.screen().text().is_empty());
    }
}
