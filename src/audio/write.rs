//! Write an edited tag back over the one already on disk.
//!
//! lofty's generic [`Tag`] only carries items it can map to an `ItemKey`.
//! Saving it directly would drop everything else the format tag held
//! (private frames, binary frames, vendor data). For formats where the
//! concrete tag can be read back, the on-disk tag is split, its unmapped
//! remainder kept, and the edited generic tag merged into it before writing.

use std::fs::File;
use std::path::Path;

use lofty::flac::FlacFile;
use lofty::mpeg::MpegFile;
use lofty::{
    AudioFile, FileType, LoftyError, MergeTag, ParseOptions, SplitTag, Tag, TagExt, TagType,
};

/// Save `edited` to `path`, keeping items of the on-disk tag it cannot express
pub(crate) fn save_merged(
    path: &Path,
    file_type: FileType,
    edited: &Tag,
    options: ParseOptions,
) -> Result<(), LoftyError> {
    match (file_type, edited.tag_type()) {
        (FileType::Mpeg, TagType::Id3v2) => {
            let on_disk: MpegFile = read_concrete(path, options)?;
            merge_and_save(on_disk.id3v2().cloned(), edited, path)
        }
        (FileType::Flac, TagType::VorbisComments) => {
            let on_disk: FlacFile = read_concrete(path, options)?;
            merge_and_save(on_disk.vorbis_comments().cloned(), edited, path)
        }
        _ => edited.save_to_path(path),
    }
}

fn read_concrete<F: AudioFile>(path: &Path, options: ParseOptions) -> Result<F, LoftyError> {
    let mut reader = File::open(path)?;
    F::read_from(&mut reader, options)
}

fn merge_and_save<T>(on_disk: Option<T>, edited: &Tag, path: &Path) -> Result<(), LoftyError>
where
    T: SplitTag + TagExt<Err = LoftyError>,
    T::Remainder: MergeTag<Merged = T>,
{
    match on_disk {
        Some(concrete) => {
            let (remainder, _) = concrete.split_tag();
            remainder.merge_tag(edited.clone()).save_to_path(path)
        }
        // Nothing on disk yet, so nothing to preserve
        None => edited.save_to_path(path),
    }
}
