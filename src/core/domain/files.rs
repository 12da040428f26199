//! Scanned-file and planned-operation value objects.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::domain::tags::TagBag;

/// Classification of a scanned entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A regular file with a recognized audio extension.
    Audio,
    /// Anything else: unrelated files, symlinks, and whole subdirectories
    /// without any audio descendant.
    Clutter,
}

/// A scanned source entry together with its tags.
///
/// Clutter entries start with an empty bag; the parse tree overwrites it
/// with the tags shared by the surrounding audio files, so clutter rides
/// along to the right destination folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedFile {
    pub path: PathBuf,
    pub tags: TagBag,
    pub kind: FileKind,
    pub is_directory: bool,
}

impl TaggedFile {
    /// An audio file with the given tags.
    pub fn audio(path: PathBuf, tags: TagBag) -> Self {
        Self {
            path,
            tags,
            kind: FileKind::Audio,
            is_directory: false,
        }
    }

    /// A clutter file, untagged until the parse tree assigns common tags.
    pub fn clutter(path: PathBuf) -> Self {
        Self {
            path,
            tags: TagBag::default(),
            kind: FileKind::Clutter,
            is_directory: false,
        }
    }

    /// A whole subdirectory demoted to a single clutter entry.
    pub fn clutter_directory(path: PathBuf) -> Self {
        Self {
            path,
            tags: TagBag::default(),
            kind: FileKind::Clutter,
            is_directory: true,
        }
    }

    /// The file extension as stored, without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }

    /// The file name component of the source path.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// How planned operations touch the source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Copy,
    Move,
}

impl OperationKind {
    /// Verb used in log lines ("copy x to y", "move x to y").
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Copy => "copy",
            OperationKind::Move => "move",
        }
    }
}

/// One planned filesystem action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub source: PathBuf,
    pub target: PathBuf,
    pub kind: OperationKind,
    pub is_directory: bool,
}

impl Operation {
    pub fn new(source: &Path, target: PathBuf, kind: OperationKind, is_directory: bool) -> Self {
        Self {
            source: source.to_path_buf(),
            target,
            kind,
            is_directory,
        }
    }
}
