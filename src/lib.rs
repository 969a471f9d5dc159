//! tagfile - thread-safe audio tag handles
//!
//! Opens a single audio file, exposes its tag fields (title, artist, album,
//! comment, genre, year, track) and audio properties (duration, bitrate,
//! sample rate, channels), and writes edited tags back to disk. All format
//! work is done by `lofty`; this crate only guards each open file with a
//! lock and turns library failures into [`Error`] values.
//!
//! ```no_run
//! use tagfile::TagFile;
//!
//! let file = TagFile::open("song.mp3")?;
//! println!("{} - {}", file.artist(), file.title());
//! file.set_year(1999);
//! file.save()?;
//! file.close();
//! # Ok::<(), tagfile::Error>(())
//! ```

pub mod audio;
pub mod config;
pub mod error;

#[cfg(test)]
mod test_fixtures;

pub use audio::{AudioProperties, TagFile, TrackTags};
pub use config::TagConfig;
pub use error::{Error, Result};
