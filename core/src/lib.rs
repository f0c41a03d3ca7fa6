//! libhangul-core
//!
//! Script-agnostic plumbing shared by the composition engines: the output
//! sink contract, erase-and-retype corrections, key events and the dispatch
//! layer that guarantees an open composition is flushed before any other
//! key reaches the transport.
//!
//! Public API:
//! - `OutputSink` - erase/append destination (`ByteSink`, `ScreenBuffer`, `RecordingSink`)
//! - `Correction` - erase count plus replacement text
//! - `KeyEvent` / `KeyResult` - key dispatch vocabulary
//! - `Composer` - trait implemented by script-specific engines
//! - `ImeEngine` - dispatch wrapper around a `Composer`
//! - `Config` - transport-facing configuration
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

pub mod sink;
pub use sink::{ByteSink, OutputSink, RecordingSink, ScreenBuffer, SinkOp, DEFAULT_ERASE_BYTE};

pub mod correction;
pub use correction::Correction;

pub mod context;
pub use context::ImeContext;

pub mod ime_engine;
pub use ime_engine::{Composer, ImeEngine, InputMode, KeyEvent, KeyResult};

/// Transport-facing configuration.
///
/// Language crates flatten this into their own config (see `HangulConfig`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Byte the peer interprets as "delete previous character"
    pub erase_byte: u8,

    /// Sequence sent for the Enter key
    pub enter_sequence: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            erase_byte: DEFAULT_ERASE_BYTE,
            enter_sequence: "\r".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// A byte sink that encodes erases the way this peer expects.
    pub fn byte_sink(&self) -> ByteSink {
        ByteSink::with_erase_byte(self.erase_byte)
    }
}
