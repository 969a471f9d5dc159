// Audio module - the per-file tag handle and the values it hands out

pub mod file;
pub mod properties;
pub mod tags;
mod write;

pub use file::TagFile;
pub use properties::AudioProperties;
pub use tags::TrackTags;
