//! Tag reading behind an abstract seam, implemented with lofty.

use std::io;
use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::prelude::ItemKey;
use lofty::tag::Accessor;
use log::debug;

use crate::core::domain::tags::{TagBag, TagName, leading_number};
use crate::core::logging::LOG_TARGET;

/// Extensions recognized as audio, matched exactly as stored.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "ogg"];

/// Returns `true` when `path` is a regular, non-symlink file with a
/// recognized audio extension.
pub fn is_readable_audio(path: &Path) -> bool {
    let is_symlink = path
        .symlink_metadata()
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);

    !is_symlink
        && path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext))
}

/// The seam the parse tree consumes.
///
/// `read_tags` never panics and returns an empty bag for any soft failure:
/// no tag container, an empty container, or a file that cannot be parsed as
/// audio. Only fatal I/O errors (the path itself cannot be opened) surface
/// as `Err`.
pub trait TagReader {
    fn read_tags(&self, path: &Path) -> io::Result<TagBag>;

    fn is_readable_audio(&self, path: &Path) -> bool {
        is_readable_audio(path)
    }
}

/// Production tag reader backed by lofty.
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> io::Result<TagBag> {
        // Open the file first: a permission error here is fatal, whereas a
        // lofty parse failure below is not.
        drop(std::fs::File::open(path)?);

        let tagged_file = match lofty::read_from_path(path) {
            Ok(tagged_file) => tagged_file,
            Err(err) => {
                debug!(
                    target: LOG_TARGET,
                    "Could not read tags from {}: {}",
                    path.display(),
                    err
                );
                return Ok(TagBag::default());
            }
        };

        let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
            return Ok(TagBag::default());
        };

        let text = |value: Option<std::borrow::Cow<'_, str>>| {
            value.map(|value| value.trim().to_string())
        };

        let mut tags = TagBag::default();
        tags.set(TagName::Album, text(tag.album()));
        tags.set(TagName::Artist, text(tag.artist()));
        tags.set(TagName::Title, text(tag.title()));
        tags.set(TagName::Genre, text(tag.genre()));

        // Containers commonly store `N/M`; keep the leading integer verbatim
        // (zero padding included) and let templates handle the number.
        let tracknumber = tag
            .get_string(ItemKey::TrackNumber)
            .map(|value| leading_number(value.trim()).to_string())
            .or_else(|| tag.track().map(|number| number.to_string()));
        tags.set(TagName::TrackNumber, tracknumber);

        let date = tag
            .get_string(ItemKey::RecordingDate)
            .or_else(|| tag.get_string(ItemKey::Year))
            .map(|value| value.trim().to_string())
            .or_else(|| tag.date().map(|date| date.year.to_string()));
        tags.set(TagName::Date, date);

        Ok(tags)
    }
}
