//! # libhangul
//!
//! Hangul syllable composition for byte-stream terminals, built on
//! libhangul-core.
//!
//! Jamo typed one at a time are assembled into precomposed syllables. The
//! peer on the other end of the stream only understands "erase one
//! character" and "append text", so every change to the open syllable goes
//! out as an erase-and-retype correction.
//!
//! ```rust
//! use libhangul::{create_ime_engine, HangulConfig, KeyEvent, ScreenBuffer};
//!
//! let mut ime = create_ime_engine(HangulConfig::default());
//! let mut screen = ScreenBuffer::new();
//! for ch in "ㅎㅏㄴㄱㅡㄹ".chars() {
//!     ime.feed(KeyEvent::Char(ch), &mut screen);
//! }
//! ime.feed(KeyEvent::Enter, &mut screen);
//! assert_eq!(screen.text(), "한글\r");
//! ```

pub mod automaton;
pub mod config;
pub mod jamo;
pub mod state;

// Re-export dispatch components from core
pub use libhangul_core::*;

pub use automaton::HangulComposer;
pub use config::HangulConfig;
pub use jamo::JamoKind;
pub use state::{CompositionState, Stage};

/// Key dispatch wired to the Hangul automaton.
pub type HangulIme = ImeEngine<HangulComposer>;

/// Create an IME engine from a Hangul configuration.
pub fn create_ime_engine(config: HangulConfig) -> HangulIme {
    let base = config.base().clone();
    ImeEngine::with_config(HangulComposer::with_config(config), base)
}
