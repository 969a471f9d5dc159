//! Per-file tag handle
//!
//! A [`TagFile`] owns one parsed audio file. Every operation takes the
//! handle's lock for its whole duration, so a handle can be shared between
//! threads; separate handles never contend with each other.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use lofty::{Accessor, AudioFile, Probe, Tag, TagType, TaggedFile, TaggedFileExt};

use super::properties::AudioProperties;
use super::tags::{self, TrackTags};
use super::write;
use crate::config;
use crate::error::{Error, Result};

/// Open audio file whose tags can be read, edited and saved
///
/// Edits stay in memory until [`save`](TagFile::save). After
/// [`close`](TagFile::close) getters return empty values, setters are ignored
/// and `save` fails.
pub struct TagFile {
    path: PathBuf,
    state: Mutex<Option<OpenFile>>,
}

/// Everything held while the file is open; dropped as a unit on close
struct OpenFile {
    file: TaggedFile,
    /// Primary tag type, guaranteed present in `file`
    tag_type: TagType,
    properties: AudioProperties,
}

impl OpenFile {
    fn tag(&self) -> Option<&Tag> {
        self.file.tag(self.tag_type)
    }

    fn tag_mut(&mut self) -> Option<&mut Tag> {
        self.file.tag_mut(self.tag_type)
    }
}

impl TagFile {
    /// Open and parse an audio file
    ///
    /// Fails with [`Error::InvalidFile`] if the path does not exist, is not a
    /// regular file, cannot be read, or holds a format the tagging library
    /// does not recognize.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = config::config();

        let metadata = fs::metadata(path)
            .map_err(|e| Error::invalid_file(path, format!("Failed to open file: {}", e)))?;
        if !metadata.is_file() {
            return Err(Error::invalid_file(path, "Not a regular file"));
        }

        let mut file = Probe::open(path)
            .map_err(|e| Error::invalid_file(path, format!("Failed to open file: {}", e)))?
            .options(config.parse_options())
            .guess_file_type()
            .map_err(|e| Error::invalid_file(path, format!("Failed to detect file type: {}", e)))?
            .read()
            .map_err(|e| Error::invalid_file(path, format!("Failed to read file: {}", e)))?;

        // Get or create the primary tag so setters always have a target.
        // A new one starts from whatever secondary tag the file carries
        // (ID3v1, APE, ...) so those values are not hidden.
        let tag_type = file.primary_tag_type();
        if file.tag(tag_type).is_none() {
            let mut tag = Tag::new(tag_type);
            match file.first_tag() {
                Some(other) => {
                    log::debug!(
                        "No {:?} tag in {}, seeding from {:?}",
                        tag_type,
                        path.display(),
                        other.tag_type()
                    );
                    TrackTags::from_tag(other).apply_to(&mut tag);
                }
                None => log::debug!("No {:?} tag in {}, creating one", tag_type, path.display()),
            }
            file.insert_tag(tag);
        }

        let properties = AudioProperties::from(file.properties());

        log::debug!(
            "Opened {} ({:?}, {}s, {} kbps)",
            path.display(),
            file.file_type(),
            properties.duration.as_secs(),
            properties.bitrate
        );

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(Some(OpenFile {
                file,
                tag_type,
                properties,
            })),
        })
    }

    /// Path this file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`close`](TagFile::close) has not been called yet
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Release the parsed file. Calling this again has no effect.
    pub fn close(&self) {
        let mut state = self.lock();
        if state.take().is_some() {
            log::debug!("Closed {}", self.path.display());
        }
    }

    /// Write pending tag edits to disk
    ///
    /// Fails with [`Error::SaveFailed`] if the handle is closed or the
    /// library cannot write the file (permissions, unsupported format,
    /// I/O errors). A failed save leaves the file on disk as it was.
    pub fn save(&self) -> Result<()> {
        let state = self.lock();
        let (open, tag) = state
            .as_ref()
            .and_then(|open| open.tag().map(|tag| (open, tag)))
            .ok_or_else(|| Error::save_failed(&self.path, "File is closed"))?;

        let options = config::config().parse_options();
        write::save_merged(&self.path, open.file.file_type(), tag, options).map_err(|e| {
            log::error!("Failed to save {}: {}", self.path.display(), e);
            Error::save_failed(&self.path, format!("Failed to save file: {}", e))
        })?;

        log::debug!("Saved tags to {}", self.path.display());
        Ok(())
    }

    /// Track title, or an empty string if not set
    pub fn title(&self) -> String {
        self.read_tag("title", |tag| tags::text(tag.title()))
    }

    /// Performing artist, or an empty string if not set
    pub fn artist(&self) -> String {
        self.read_tag("artist", |tag| tags::text(tag.artist()))
    }

    /// Album name, or an empty string if not set
    pub fn album(&self) -> String {
        self.read_tag("album", |tag| tags::text(tag.album()))
    }

    /// Comment, or an empty string if not set
    pub fn comment(&self) -> String {
        self.read_tag("comment", |tag| tags::text(tag.comment()))
    }

    /// Genre name, or an empty string if not set
    pub fn genre(&self) -> String {
        self.read_tag("genre", |tag| tags::text(tag.genre()))
    }

    /// Release year, or 0 if not set
    pub fn year(&self) -> u32 {
        self.read_tag("year", |tag| tag.year().unwrap_or(0))
    }

    /// Track number, or 0 if not set
    pub fn track(&self) -> u32 {
        self.read_tag("track", |tag| tag.track().unwrap_or(0))
    }

    /// All tag fields, read under a single lock
    pub fn tags(&self) -> TrackTags {
        self.read_tag("tags", TrackTags::from_tag)
    }

    /// Set the title; an empty string clears it
    pub fn set_title(&self, title: &str) {
        self.write_tag("set_title", |tag| {
            tags::write_text(tag, title, Tag::set_title, Tag::remove_title)
        });
    }

    /// Set the artist; an empty string clears it
    pub fn set_artist(&self, artist: &str) {
        self.write_tag("set_artist", |tag| {
            tags::write_text(tag, artist, Tag::set_artist, Tag::remove_artist)
        });
    }

    /// Set the album name; an empty string clears it
    pub fn set_album(&self, album: &str) {
        self.write_tag("set_album", |tag| {
            tags::write_text(tag, album, Tag::set_album, Tag::remove_album)
        });
    }

    /// Set the comment; an empty string clears it
    pub fn set_comment(&self, comment: &str) {
        self.write_tag("set_comment", |tag| {
            tags::write_text(tag, comment, Tag::set_comment, Tag::remove_comment)
        });
    }

    /// Set the genre; an empty string clears it
    pub fn set_genre(&self, genre: &str) {
        self.write_tag("set_genre", |tag| {
            tags::write_text(tag, genre, Tag::set_genre, Tag::remove_genre)
        });
    }

    /// Set the release year; 0 clears it
    pub fn set_year(&self, year: u32) {
        self.write_tag("set_year", |tag| {
            tags::write_number(tag, year, Tag::set_year, Tag::remove_year)
        });
    }

    /// Set the track number; 0 clears it
    pub fn set_track(&self, track: u32) {
        self.write_tag("set_track", |tag| {
            tags::write_number(tag, track, Tag::set_track, Tag::remove_track)
        });
    }

    /// Replace every tag field under a single lock
    pub fn set_tags(&self, values: &TrackTags) {
        self.write_tag("set_tags", |tag| values.apply_to(tag));
    }

    /// Playback length in whole seconds
    pub fn length(&self) -> Duration {
        self.properties().duration
    }

    /// Audio bitrate in kb/s
    pub fn bitrate(&self) -> u32 {
        self.properties().bitrate
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.properties().sample_rate
    }

    /// Number of audio channels
    pub fn channels(&self) -> u32 {
        self.properties().channels
    }

    /// Audio properties captured at open time
    pub fn properties(&self) -> AudioProperties {
        match self.lock().as_ref() {
            Some(open) => open.properties,
            None => {
                self.warn_closed("properties");
                AudioProperties::default()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<OpenFile>> {
        // The guarded data is plain parsed tags; a panic elsewhere cannot
        // leave it half-written
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_tag<R: Default>(&self, op: &str, read: impl FnOnce(&Tag) -> R) -> R {
        let state = self.lock();
        match state.as_ref().and_then(OpenFile::tag) {
            Some(tag) => read(tag),
            None => {
                self.warn_closed(op);
                R::default()
            }
        }
    }

    fn write_tag(&self, op: &str, edit: impl FnOnce(&mut Tag)) {
        let mut state = self.lock();
        match state.as_mut().and_then(OpenFile::tag_mut) {
            Some(tag) => edit(tag),
            None => self.warn_closed(op),
        }
    }

    fn warn_closed(&self, op: &str) {
        log::warn!("{} called on closed file {}", op, self.path.display());
    }
}

impl fmt::Debug for TagFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagFile")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}
