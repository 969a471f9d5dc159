//! Test fixtures for tag handle tests
//!
//! Synthesizes small MPEG and FLAC files on the fly so tests need neither
//! bundled binaries nor an external encoder.

#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

use crate::{TagFile, TrackTags};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, no padding, joint stereo
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
/// 144 * 128000 / 44100, rounded down (padding bit clear)
const FRAME_LEN: usize = 417;
const BYTES_PER_SECOND: usize = 128_000 / 8;

const FLAC_SAMPLE_RATE: u64 = 44_100;

/// Tag values of the reference sample file
pub struct SampleTags {
    pub title: &'static str,
    pub artist: &'static str,
    pub album: &'static str,
    pub comment: &'static str,
    pub genre: &'static str,
    pub year: u32,
    pub track: u32,
}

pub const SAMPLE: SampleTags = SampleTags {
    title: "The Title",
    artist: "The Artist",
    album: "The Album",
    comment: "A Comment",
    genre: "Booty Bass",
    year: 1942,
    track: 42,
};

impl SampleTags {
    pub fn to_tags(&self) -> TrackTags {
        TrackTags {
            title: self.title.to_string(),
            artist: self.artist.to_string(),
            album: self.album.to_string(),
            comment: self.comment.to_string(),
            genre: self.genre.to_string(),
            year: self.year,
            track: self.track,
        }
    }
}

/// Route library logging to the test output. Safe to call from every test.
pub fn init_logging() {
    let _ = SimpleLogger::init(LevelFilter::Debug, Config::default());
}

/// Constant-bitrate MPEG frames of silence lasting at least `seconds`
///
/// The stream is measured from the first frame header to the last one, so
/// one frame beyond the requested length is added.
fn silent_mpeg_frames(seconds: u32) -> Vec<u8> {
    let stream_len = seconds as usize * BYTES_PER_SECOND;
    let frame_count = stream_len.div_ceil(FRAME_LEN) + 1;

    let mut data = Vec::with_capacity(frame_count * FRAME_LEN);
    for _ in 0..frame_count {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    data
}

/// Write an untagged constant-bitrate MP3 of silent frames
///
/// The frames carry no audio data, which is enough for the tagging library
/// to derive duration, bitrate, sample rate and channels from the headers.
pub fn write_silent_mp3(path: &Path, seconds: u32) {
    fs::write(path, silent_mpeg_frames(seconds)).expect("Failed to write MP3 fixture");
}

/// Write an MP3 whose only tag is an ID3v2.4 tag holding a single PRIV frame
pub fn write_mp3_with_private_frame(path: &Path, owner: &str, payload: &[u8]) {
    let mut body = owner.as_bytes().to_vec();
    body.push(0);
    body.extend_from_slice(payload);

    let mut frame = b"PRIV".to_vec();
    frame.extend_from_slice(&syncsafe(body.len()));
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&body);

    let mut data = b"ID3".to_vec();
    data.extend_from_slice(&[4, 0, 0]);
    data.extend_from_slice(&syncsafe(frame.len()));
    data.extend_from_slice(&frame);
    data.extend_from_slice(&silent_mpeg_frames(3));

    fs::write(path, data).expect("Failed to write MP3 fixture");
}

/// Write an MP3 carrying nothing but an ID3v1.1 tag at its end
pub fn write_mp3_with_id3v1(path: &Path, title: &str, artist: &str, year: u32, track: u8) {
    let mut data = silent_mpeg_frames(3);

    data.extend_from_slice(b"TAG");
    data.extend_from_slice(&fixed_field(title, 30));
    data.extend_from_slice(&fixed_field(artist, 30));
    data.extend_from_slice(&fixed_field("", 30));
    data.extend_from_slice(&fixed_field(&year.to_string(), 4));
    // ID3v1.1: 28-byte comment, zero byte, track number
    data.extend_from_slice(&fixed_field("", 28));
    data.push(0);
    data.push(track);
    data.push(255);

    fs::write(path, data).expect("Failed to write MP3 fixture");
}

/// Write an untagged FLAC stream: `fLaC`, a lone STREAMINFO block, no frames
///
/// 16-bit stereo at 44.1 kHz; the sample count gives the duration.
pub fn write_silent_flac(path: &Path, seconds: u32) {
    let total_samples = u64::from(seconds) * FLAC_SAMPLE_RATE;
    // sample rate (20 bits) | channels - 1 (3) | bits per sample - 1 (5) | samples (36)
    let packed = (FLAC_SAMPLE_RATE << 44) | (1 << 41) | (15 << 36) | total_samples;

    let mut data = b"fLaC".to_vec();
    // Last-metadata-block flag set, block type 0 (STREAMINFO), 34 bytes long
    data.extend_from_slice(&[0x80, 0, 0, 34]);
    data.extend_from_slice(&4096u16.to_be_bytes());
    data.extend_from_slice(&4096u16.to_be_bytes());
    data.extend_from_slice(&[0; 6]);
    data.extend_from_slice(&packed.to_be_bytes());
    data.extend_from_slice(&[0; 16]);

    fs::write(path, data).expect("Failed to write FLAC fixture");
}

/// Create `test.mp3` in `dir`: 42 seconds long and tagged with [`SAMPLE`]
pub fn sample_mp3(dir: &Path) -> PathBuf {
    let path = dir.join("test.mp3");
    write_silent_mp3(&path, 42);

    let file = TagFile::open(&path).expect("Failed to open MP3 fixture");
    file.set_tags(&SAMPLE.to_tags());
    file.save().expect("Failed to tag MP3 fixture");
    file.close();

    path
}

fn syncsafe(len: usize) -> [u8; 4] {
    let len = len as u32;
    [
        ((len >> 21) & 0x7F) as u8,
        ((len >> 14) & 0x7F) as u8,
        ((len >> 7) & 0x7F) as u8,
        (len & 0x7F) as u8,
    ]
}

fn fixed_field(value: &str, width: usize) -> Vec<u8> {
    let mut field = value.as_bytes().to_vec();
    field.resize(width, 0);
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_silent_mp3_covers_requested_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silent.mp3");
        write_silent_mp3(&path, 2);

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len() % FRAME_LEN, 0);
        // Header-to-last-header span still reaches the full length
        assert!(data.len() - FRAME_LEN >= 2 * BYTES_PER_SECOND);
        assert_eq!(&data[..4], &FRAME_HEADER);
        assert_eq!(&data[FRAME_LEN..FRAME_LEN + 4], &FRAME_HEADER);
    }

    #[test]
    fn test_syncsafe_spreads_seven_bits_per_byte() {
        assert_eq!(syncsafe(17), [0, 0, 0, 17]);
        assert_eq!(syncsafe(200), [0, 0, 1, 72]);
    }

    #[test]
    fn test_id3v1_block_is_128_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("v1.mp3");
        write_mp3_with_id3v1(&path, "T", "A", 1999, 7);

        let data = fs::read(&path).unwrap();
        let tag = &data[data.len() - 128..];
        assert_eq!(&tag[..3], b"TAG");
        assert_eq!(tag[126], 7);
    }

    #[test]
    fn test_flac_streaminfo_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("silent.flac");
        write_silent_flac(&path, 10);

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), 4 + 4 + 34);
        assert_eq!(&data[..4], b"fLaC");
        // 44100 Hz in the top 20 bits of the packed field
        assert_eq!(&data[18..21], &[0x0A, 0xC4, 0x42]);
    }

    #[test]
    fn test_sample_tags_match_constants() {
        let tags = SAMPLE.to_tags();
        assert_eq!(tags.title, "The Title");
        assert_eq!(tags.genre, "Booty Bass");
        assert_eq!(tags.year, 1942);
        assert_eq!(tags.track, 42);
    }
}
