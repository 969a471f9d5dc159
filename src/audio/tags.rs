//! Tag field marshalling
//!
//! Converts between the library's optional tag items and the wrapper's
//! convention of empty strings and zero for unset fields.

use std::borrow::Cow;

use lofty::{Accessor, Tag};

/// All writable tag fields of a track
///
/// Empty strings and zero mean "unset", both when read and when written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub comment: String,
    pub genre: String,
    pub year: u32,
    pub track: u32,
}

impl TrackTags {
    /// Read every field from a tag
    pub(crate) fn from_tag(tag: &Tag) -> Self {
        Self {
            title: text(tag.title()),
            artist: text(tag.artist()),
            album: text(tag.album()),
            comment: text(tag.comment()),
            genre: text(tag.genre()),
            year: tag.year().unwrap_or(0),
            track: tag.track().unwrap_or(0),
        }
    }

    /// Overwrite every field of a tag, clearing the ones that are unset here
    pub(crate) fn apply_to(&self, tag: &mut Tag) {
        write_text(tag, &self.title, Tag::set_title, Tag::remove_title);
        write_text(tag, &self.artist, Tag::set_artist, Tag::remove_artist);
        write_text(tag, &self.album, Tag::set_album, Tag::remove_album);
        write_text(tag, &self.comment, Tag::set_comment, Tag::remove_comment);
        write_text(tag, &self.genre, Tag::set_genre, Tag::remove_genre);
        write_number(tag, self.year, Tag::set_year, Tag::remove_year);
        write_number(tag, self.track, Tag::set_track, Tag::remove_track);
    }
}

/// Owned copy of a text item, empty if absent
pub(crate) fn text(value: Option<Cow<'_, str>>) -> String {
    value.map(Cow::into_owned).unwrap_or_default()
}

/// Set a text item, or remove it when `value` is empty
pub(crate) fn write_text(
    tag: &mut Tag,
    value: &str,
    set: fn(&mut Tag, String),
    remove: fn(&mut Tag),
) {
    if value.is_empty() {
        remove(tag);
    } else {
        set(tag, value.to_string());
    }
}

/// Set a numeric item, or remove it when `value` is 0
pub(crate) fn write_number(tag: &mut Tag, value: u32, set: fn(&mut Tag, u32), remove: fn(&mut Tag)) {
    if value == 0 {
        remove(tag);
    } else {
        set(tag, value);
    }
}
