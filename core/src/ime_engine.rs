//! Key dispatch in front of a script-specific composer.
//!
//! `ImeEngine` receives key events from the UI layer, routes jamo to the
//! composer and makes sure every other key flushes the open syllable before
//! it reaches the transport. Keys the IME does not consume are reported as
//! `KeyResult::NotHandled`; `feed()` additionally encodes them onto the sink
//! so callers that only want bytes out do not have to.

use crate::context::ImeContext;
use crate::sink::OutputSink;
use crate::Config;
use tracing::debug;

/// Key event types that the IME can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Character input (jamo, ASCII letters, punctuation)
    Char(char),
    /// Backspace key
    Backspace,
    /// Space bar
    Space,
    /// Enter/Return key
    Enter,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Ctrl + character (e.g. Ctrl+C)
    Ctrl(char),
    /// Alt + character (sent with an ESC prefix)
    Alt(char),
    /// Korean/Latin layout toggle (한/영)
    ToggleLayout,
    /// Input focus moved to a different target
    FocusLost,
}

impl KeyEvent {
    /// Bytes the console sends for this key when the IME does not consume it.
    ///
    /// Returns `None` for keys that have no text form (backspace is an erase,
    /// layout toggles and focus changes never reach the transport).
    pub fn passthrough_text(&self, config: &Config) -> Option<String> {
        let text = match *self {
            KeyEvent::Char(ch) => ch.to_string(),
            KeyEvent::Space => " ".to_string(),
            KeyEvent::Enter => config.enter_sequence.clone(),
            KeyEvent::Tab => "\t".to_string(),
            KeyEvent::Escape => "\x1b".to_string(),
            KeyEvent::Left => "\x1b[D".to_string(),
            KeyEvent::Right => "\x1b[C".to_string(),
            KeyEvent::Up => "\x1b[A".to_string(),
            KeyEvent::Down => "\x1b[B".to_string(),
            KeyEvent::Ctrl(ch) => {
                let lower = ch.to_ascii_lowercase();
                if lower.is_ascii_lowercase() {
                    // Ctrl+a..z map to 0x01..0x1a
                    char::from(lower as u8 - 0x60).to_string()
                } else {
                    ch.to_string()
                }
            }
            KeyEvent::Alt(ch) => format!("\x1b{}", ch),
            KeyEvent::Backspace | KeyEvent::ToggleLayout | KeyEvent::FocusLost => return None,
        };
        Some(text)
    }
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (caller sends it through the normal path)
    NotHandled,
}

/// Active keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Jamo keys are composed into syllables
    #[default]
    Hangul,
    /// Every key passes straight through
    Latin,
}

/// Seam between the dispatch layer and a script-specific composition engine.
pub trait Composer {
    /// Whether `ch` is input this composer wants to see.
    fn accepts(&self, ch: char) -> bool;

    /// Process one accepted character, writing corrections to `sink`.
    fn process_char(&mut self, ch: char, sink: &mut dyn OutputSink) -> KeyResult;

    /// Undo one step of the open composition.
    ///
    /// Must return `NotHandled` when nothing is open, so the caller can
    /// delete already committed output instead.
    fn backspace(&mut self, sink: &mut dyn OutputSink) -> KeyResult;

    /// Commit the open composition and reset.
    ///
    /// Returns the committed text, or `None` when nothing was open.
    fn flush(&mut self, sink: &mut dyn OutputSink) -> Option<String>;

    /// Whether a composition is open.
    fn is_composing(&self) -> bool;

    /// Display text of the open composition.
    fn preedit(&self) -> &str;

    /// Text finalized since the last call, drained.
    fn take_committed(&mut self) -> String;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// IME engine: layout mode, flush discipline and passthrough encoding.
pub struct ImeEngine<C: Composer> {
    composer: C,
    mode: InputMode,
    context: ImeContext,
    config: Config,
}

impl<C: Composer> ImeEngine<C> {
    pub fn new(composer: C) -> Self {
        Self::with_config(composer, Config::default())
    }

    pub fn with_config(composer: C, config: Config) -> Self {
        Self {
            composer,
            mode: InputMode::Hangul,
            context: ImeContext::new(),
            config,
        }
    }

    pub fn composer(&self) -> &C {
        &self.composer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// State for the UI after the last key.
    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch layout, flushing any open composition first.
    pub fn set_mode(&mut self, mode: InputMode, sink: &mut dyn OutputSink) {
        if self.mode != mode {
            self.flush(sink);
            debug!(
                composer = self.composer.name(),
                from = ?self.mode,
                to = ?mode,
                "input mode switched"
            );
            self.mode = mode;
            self.context.mode = mode;
        }
    }

    /// Commit the open composition. The single entry point used by every
    /// non-jamo key, layout switch and focus change.
    pub fn flush(&mut self, sink: &mut dyn OutputSink) -> Option<String> {
        let committed = self.composer.flush(sink);
        self.sync_context();
        committed
    }

    /// Process a key event.
    ///
    /// Returns `KeyResult::NotHandled` when the caller should send the key
    /// itself; any open composition has already been flushed by then.
    pub fn process_key(&mut self, key: KeyEvent, sink: &mut dyn OutputSink) -> KeyResult {
        self.context.commit_text.clear();

        let result = match key {
            KeyEvent::ToggleLayout => {
                let next = match self.mode {
                    InputMode::Hangul => InputMode::Latin,
                    InputMode::Latin => InputMode::Hangul,
                };
                self.set_mode(next, sink);
                KeyResult::Handled
            }
            KeyEvent::FocusLost => {
                self.flush(sink);
                KeyResult::Handled
            }
            _ if self.mode == InputMode::Latin => KeyResult::NotHandled,
            KeyEvent::Char(ch) if self.composer.accepts(ch) => {
                self.composer.process_char(ch, sink)
            }
            KeyEvent::Backspace => self.composer.backspace(sink),
            _ => {
                self.flush(sink);
                KeyResult::NotHandled
            }
        };

        self.sync_context();
        result
    }

    /// Process a key and send it through the sink when the IME did not
    /// consume it.
    pub fn feed(&mut self, key: KeyEvent, sink: &mut dyn OutputSink) -> KeyResult {
        let result = self.process_key(key, sink);
        if result == KeyResult::NotHandled {
            if key == KeyEvent::Backspace {
                sink.erase_one();
            } else if let Some(text) = key.passthrough_text(&self.config) {
                sink.append_text(&text);
            }
        }
        result
    }

    fn sync_context(&mut self) {
        let committed = self.composer.take_committed();
        self.context.commit_text.push_str(&committed);
        self.context.preedit_text.clear();
        self.context.preedit_text.push_str(self.composer.preedit());
        self.context.mode = self.mode;
    }
}
