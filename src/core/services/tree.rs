//! Recursive source scan producing the parse tree.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::adapters::tag_reader::TagReader;
use crate::core::domain::files::TaggedFile;
use crate::core::domain::tags::TagBag;
use crate::core::errors::TidysicError;
use crate::core::logging::LOG_TARGET;

/// One scanned source directory.
///
/// Children are kept heterogeneously in three containers: sub-nodes that
/// contain audio somewhere below, the audio files of this directory, and
/// everything else as clutter. A subdirectory without any audio descendant
/// is not kept as a node at all; it is demoted to a single clutter entry of
/// its parent and later copied or moved wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub root: PathBuf,
    pub children: Vec<Tree>,
    pub audio_files: Vec<TaggedFile>,
    pub clutter_files: Vec<TaggedFile>,
    /// The tags shared by every audio file in this subtree; `Some` iff the
    /// subtree contains audio at all.
    pub common_tags: Option<TagBag>,
}

impl Tree {
    /// Recursively scans `root`.
    ///
    /// Tags are read through `reader`; soft tag failures yield empty bags.
    /// I/O failures below the root demote the affected subtree to an opaque
    /// clutter entry with a warning; failing to list `root` itself is fatal.
    pub fn build(root: &Path, reader: &dyn TagReader) -> Result<Tree, TidysicError> {
        let mut node = Tree {
            root: root.to_path_buf(),
            children: Vec::new(),
            audio_files: Vec::new(),
            clutter_files: Vec::new(),
            common_tags: None,
        };

        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;

            if file_type.is_symlink() {
                // Symlinks are never followed, not even into directories.
                node.clutter_files.push(TaggedFile::clutter(path));
            } else if file_type.is_dir() {
                match Tree::build(&path, reader) {
                    Ok(child) if child.common_tags.is_some() => node.children.push(child),
                    Ok(_) => {
                        debug!(
                            target: LOG_TARGET,
                            "No audio under {}, treating it as clutter",
                            path.display()
                        );
                        node.clutter_files.push(TaggedFile::clutter_directory(path));
                    }
                    Err(err) => {
                        warn!(
                            target: LOG_TARGET,
                            "Could not scan {}: {}",
                            path.display(),
                            err
                        );
                        node.clutter_files.push(TaggedFile::clutter_directory(path));
                    }
                }
            } else if reader.is_readable_audio(&path) {
                let tags = reader.read_tags(&path)?;
                node.audio_files.push(TaggedFile::audio(path, tags));
            } else {
                node.clutter_files.push(TaggedFile::clutter(path));
            }
        }

        // The strongest inheritance the evidence permits: the intersection
        // of every audio bag in the subtree.
        node.common_tags = {
            let bags: Vec<&TagBag> = node
                .audio_files
                .iter()
                .map(|file| &file.tags)
                .chain(node.children.iter().filter_map(|child| child.common_tags.as_ref()))
                .collect();
            if bags.is_empty() {
                None
            } else {
                Some(TagBag::intersection(bags))
            }
        };

        // Clutter rides along with its audio neighbours.
        if let Some(common) = &node.common_tags {
            for clutter in &mut node.clutter_files {
                clutter.tags.copy_from(common);
            }
        }

        Ok(node)
    }

    /// Total number of files (audio and clutter) in the subtree.
    pub fn file_count(&self) -> usize {
        self.audio_files.len()
            + self.clutter_files.len()
            + self.children.iter().map(Tree::file_count).sum::<usize>()
    }
}
