//! Jamo classification and the Hangul composition algebra.
//!
//! Input arrives as Hangul Compatibility Jamo (U+3131..U+3163), the code
//! points a Korean keyboard produces. A consonant may serve as an initial,
//! a final, or both; which role it plays is decided by the automaton, not
//! here.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// First code point of the Hangul Syllables block (가).
pub const SYLLABLE_BASE: u32 = 0xAC00;
/// Number of medials in the canonical ordering.
pub const MEDIAL_COUNT: u32 = 21;
/// Number of finals in the canonical ordering, counting "no final".
pub const FINAL_COUNT: u32 = 28;

/// Initial consonants (choseong) in Unicode order.
pub const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Medial vowels (jungseong) in Unicode order.
pub const MEDIALS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Final consonants (jongseong) in Unicode order. Index 0, "no final", is
/// not a character and is left out, so `FINALS[i]` has final index `i + 1`.
pub const FINALS: [char; 27] = [
    'ㄱ', 'ㄲ', 'ㄳ', 'ㄴ', 'ㄵ', 'ㄶ', 'ㄷ', 'ㄹ', 'ㄺ', 'ㄻ', 'ㄼ', 'ㄽ', 'ㄾ', 'ㄿ', 'ㅀ', 'ㅁ',
    'ㅂ', 'ㅄ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowel pairs that form a compound medial.
///
/// ㅐ ㅒ ㅔ ㅖ have keys of their own but also compose from a vowel and ㅣ,
/// so backspace on them falls back to the first vowel.
static VOWEL_PAIRS: Lazy<HashMap<(char, char), char>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(('ㅏ', 'ㅣ'), 'ㅐ');
    m.insert(('ㅑ', 'ㅣ'), 'ㅒ');
    m.insert(('ㅓ', 'ㅣ'), 'ㅔ');
    m.insert(('ㅕ', 'ㅣ'), 'ㅖ');
    m.insert(('ㅗ', 'ㅏ'), 'ㅘ');
    m.insert(('ㅗ', 'ㅐ'), 'ㅙ');
    m.insert(('ㅗ', 'ㅣ'), 'ㅚ');
    m.insert(('ㅜ', 'ㅓ'), 'ㅝ');
    m.insert(('ㅜ', 'ㅔ'), 'ㅞ');
    m.insert(('ㅜ', 'ㅣ'), 'ㅟ');
    m.insert(('ㅡ', 'ㅣ'), 'ㅢ');
    m
});

/// Consonant pairs that form a compound final.
static FINAL_PAIRS: Lazy<HashMap<(char, char), char>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(('ㄱ', 'ㅅ'), 'ㄳ');
    m.insert(('ㄴ', 'ㅈ'), 'ㄵ');
    m.insert(('ㄴ', 'ㅎ'), 'ㄶ');
    m.insert(('ㄹ', 'ㄱ'), 'ㄺ');
    m.insert(('ㄹ', 'ㅁ'), 'ㄻ');
    m.insert(('ㄹ', 'ㅂ'), 'ㄼ');
    m.insert(('ㄹ', 'ㅅ'), 'ㄽ');
    m.insert(('ㄹ', 'ㅌ'), 'ㄾ');
    m.insert(('ㄹ', 'ㅍ'), 'ㄿ');
    m.insert(('ㄹ', 'ㅎ'), 'ㅀ');
    m.insert(('ㅂ', 'ㅅ'), 'ㅄ');
    m
});

static VOWEL_SPLITS: Lazy<HashMap<char, (char, char)>> =
    Lazy::new(|| VOWEL_PAIRS.iter().map(|(&pair, &c)| (c, pair)).collect());

static FINAL_SPLITS: Lazy<HashMap<char, (char, char)>> =
    Lazy::new(|| FINAL_PAIRS.iter().map(|(&pair, &c)| (c, pair)).collect());

/// Broad class of a compatibility jamo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JamoKind {
    Consonant,
    Vowel,
}

/// Classify `ch`; `None` means "not Hangul jamo".
pub fn classify(ch: char) -> Option<JamoKind> {
    match ch {
        '\u{3131}'..='\u{314E}' => Some(JamoKind::Consonant),
        '\u{314F}'..='\u{3163}' => Some(JamoKind::Vowel),
        _ => None,
    }
}

pub fn is_jamo(ch: char) -> bool {
    classify(ch).is_some()
}

pub fn initial_index(ch: char) -> Option<u32> {
    INITIALS.iter().position(|&c| c == ch).map(|i| i as u32)
}

pub fn medial_index(ch: char) -> Option<u32> {
    MEDIALS.iter().position(|&c| c == ch).map(|i| i as u32)
}

/// Final index in 1..=27; 0 is reserved for "no final".
pub fn final_index(ch: char) -> Option<u32> {
    FINALS.iter().position(|&c| c == ch).map(|i| i as u32 + 1)
}

pub fn is_initial(ch: char) -> bool {
    initial_index(ch).is_some()
}

/// True for base and compound medials.
pub fn is_medial(ch: char) -> bool {
    medial_index(ch).is_some()
}

/// True for base and compound finals. ㄸ ㅃ ㅉ never close a syllable.
pub fn is_final(ch: char) -> bool {
    final_index(ch).is_some()
}

pub fn combine_vowels(first: char, second: char) -> Option<char> {
    VOWEL_PAIRS.get(&(first, second)).copied()
}

/// Constituents of a compound medial, `None` for base vowels.
pub fn split_vowel(ch: char) -> Option<(char, char)> {
    VOWEL_SPLITS.get(&ch).copied()
}

pub fn combine_finals(first: char, second: char) -> Option<char> {
    FINAL_PAIRS.get(&(first, second)).copied()
}

/// Constituents of a compound final, `None` for simple finals.
pub fn split_final(ch: char) -> Option<(char, char)> {
    FINAL_SPLITS.get(&ch).copied()
}

/// Compose a syllable from its parts.
///
/// `BASE + (initial × 21 + medial) × 28 + final`, with final index 0 when
/// there is no final. Returns `None` if any part is not valid in its role.
pub fn compose(initial: char, medial: char, final_: Option<char>) -> Option<char> {
    let l = initial_index(initial)?;
    let v = medial_index(medial)?;
    let t = match final_ {
        Some(c) => final_index(c)?,
        None => 0,
    };
    char::from_u32(SYLLABLE_BASE + (l * MEDIAL_COUNT + v) * FINAL_COUNT + t)
}
