//! Process-wide tagging configuration
//!
//! The parse behaviour handed to `lofty` is fixed once per process, before
//! the first [`TagFile`](crate::TagFile) is opened, and never changes
//! afterwards. Call [`init`] early to pick non-default options; otherwise the
//! defaults are installed on first use.

use std::sync::OnceLock;

use lofty::{ParseOptions, ParsingMode};

static CONFIG: OnceLock<TagConfig> = OnceLock::new();

/// Options applied to every file opened in this process
#[derive(Debug, Clone)]
pub struct TagConfig {
    /// How strictly malformed files are rejected
    pub parsing_mode: ParsingMode,
    /// How many bytes of junk may precede a recognized header before the
    /// file is rejected
    pub max_junk_bytes: usize,
}

/// Junk tolerance lofty itself defaults to
const DEFAULT_MAX_JUNK_BYTES: usize = 1024;

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            parsing_mode: ParsingMode::BestAttempt,
            max_junk_bytes: DEFAULT_MAX_JUNK_BYTES,
        }
    }
}

impl TagConfig {
    /// Parse options for opening a file. Audio properties are always read.
    pub(crate) fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .read_properties(true)
            .parsing_mode(self.parsing_mode)
            .max_junk_bytes(self.max_junk_bytes)
    }
}

/// Install the process-wide configuration
///
/// Returns `false` if a configuration was already in place (either from an
/// earlier call or because a file has already been opened). The installed
/// configuration is left untouched in that case.
pub fn init(config: TagConfig) -> bool {
    match CONFIG.set(config) {
        Ok(()) => {
            log::debug!("Tag configuration installed: {:?}", CONFIG.get());
            true
        }
        Err(rejected) => {
            log::warn!(
                "Tag configuration already initialized, ignoring {:?}",
                rejected
            );
            false
        }
    }
}

/// The active configuration, installing the defaults if nothing was set yet
pub fn config() -> &'static TagConfig {
    CONFIG.get_or_init(|| {
        log::debug!("Using default tag configuration");
        TagConfig::default()
    })
}
