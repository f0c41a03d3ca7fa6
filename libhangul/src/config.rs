use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Hangul-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All transport options from `libhangul_core::Config` (flattened via serde)
/// - Whether compound vowels and compound finals are assembled from two keys
/// - Whether backspace peels one jamo off the open syllable or drops it whole
///
/// # Example
///
/// ```rust
/// use libhangul::HangulConfig;
///
/// let config = HangulConfig::from_toml_str("combine_finals = false").unwrap();
/// assert!(!config.combine_finals);
/// assert_eq!(config.base().erase_byte, 0x7f);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HangulConfig {
    /// Base configuration fields (erase byte, enter sequence)
    #[serde(flatten)]
    pub base: libhangul_core::Config,

    /// ㅗ + ㅏ → ㅘ and the other diphthongs
    #[serde(default = "enabled")]
    pub combine_vowels: bool,

    /// ㄹ + ㄱ → ㄺ and the other compound finals
    #[serde(default = "enabled")]
    pub combine_finals: bool,

    /// Backspace removes the last jamo instead of the whole open syllable
    #[serde(default = "enabled")]
    pub decompose_on_backspace: bool,
}

fn enabled() -> bool {
    true
}

impl Default for HangulConfig {
    fn default() -> Self {
        Self {
            base: libhangul_core::Config::default(),
            combine_vowels: true,
            combine_finals: true,
            decompose_on_backspace: true,
        }
    }
}

impl HangulConfig {
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
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libhangul_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libhangul_core::Config {
        &mut self.base
    }
}
