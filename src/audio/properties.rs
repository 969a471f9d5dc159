use std::time::Duration;

use lofty::FileProperties;

/// Audio stream characteristics captured when a file is opened
///
/// Values the library could not determine are reported as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioProperties {
    /// Playback length, truncated to whole seconds
    pub duration: Duration,
    /// Audio bitrate in kb/s
    pub bitrate: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u32,
}

impl From<&FileProperties> for AudioProperties {
    fn from(props: &FileProperties) -> Self {
        Self {
            duration: Duration::from_secs(props.duration().as_secs()),
            // Prefer the stream bitrate; fall back to the whole-file figure
            bitrate: props
                .audio_bitrate()
                .or_else(|| props.overall_bitrate())
                .unwrap_or(0),
            sample_rate: props.sample_rate().unwrap_or(0),
            channels: props.channels().map(u32::from).unwrap_or(0),
        }
    }
}
