//! Adapters between the core and the outside world.

pub mod tag_reader;

pub use tag_reader::{AUDIO_EXTENSIONS, LoftyTagReader, TagReader, is_readable_audio};
