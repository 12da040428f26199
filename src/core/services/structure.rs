//! The structure configuration: which tag shapes each level of the
//! destination tree, and how each level's name is rendered.

use std::path::Path;

use log::debug;

use crate::core::domain::tags::{TagBag, TagName};
use crate::core::errors::TidysicError;
use crate::core::logging::LOG_TARGET;
use crate::core::services::template::FormattedString;

/// File name looked up inside the target directory when no explicit config
/// path is given.
pub const STRUCTURE_FILE_NAME: &str = ".tidysic";

/// The built-in structure used when no configuration is found, and the text
/// printed by `--dump-config`.
pub const DEFAULT_STRUCTURE: &str = "\
# Default tidysic structure.
# One folder level per line: <tagname> <template>.
# The last line names the track file itself.
artist {{artist}}
album {({date}) }{{album}}
{{tracknumber:02d}. }{{title}}
";

/// One folder level of the destination tree.
///
/// The template alone drives the rendered name; the tag is consulted only
/// when the template renders empty, to produce the `Unknown <tag>` fallback
/// component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureStep {
    pub tag: TagName,
    pub template: FormattedString,
}

impl StructureStep {
    /// Renders the folder name for `tags`, falling back to `Unknown <tag>`
    /// when the template comes up empty.
    pub fn folder_name(&self, tags: &TagBag) -> Result<String, TidysicError> {
        match self.template.render(tags) {
            Ok(name) => Ok(name),
            Err(TidysicError::EmptyRender { .. }) => Ok(format!("Unknown {}", self.tag)),
            Err(other) => Err(other),
        }
    }
}

/// Ordered folder steps plus the track-name template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub folders: Vec<StructureStep>,
    pub track_format: FormattedString,
}

impl Structure {
    /// Parses the textual configuration format.
    ///
    /// Blank lines and `#` comments are ignored. The last remaining line is
    /// the track template; every preceding line is `<tagname> <template>`.
    pub fn parse(text: &str) -> Result<Self, TidysicError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let Some((track_line, folder_lines)) = lines.split_last() else {
            return Err(TidysicError::StructureParse("nothing to parse".to_string()));
        };

        let mut folders = Vec::with_capacity(folder_lines.len());
        for line in folder_lines {
            let Some((tag, raw_format)) = line.split_once(' ') else {
                return Err(TidysicError::StructureParse(format!(
                    "expected a tag name followed by a template in '{}'",
                    line
                )));
            };
            folders.push(StructureStep {
                tag: tag.parse()?,
                template: FormattedString::parse(raw_format.trim_start())?,
            });
        }

        Ok(Structure {
            folders,
            track_format: FormattedString::parse(track_line)?,
        })
    }

    /// Loads the structure to use for a run.
    ///
    /// Resolution order: an explicit config path (any failure there is
    /// fatal), then `<target>/.tidysic`, then the built-in default.
    pub fn load(explicit: Option<&Path>, target: &Path) -> Result<Self, TidysicError> {
        if let Some(path) = explicit {
            debug!(target: LOG_TARGET, "Reading structure from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            return Self::parse(&text);
        }

        let implicit = target.join(STRUCTURE_FILE_NAME);
        match std::fs::read_to_string(&implicit) {
            Ok(text) => {
                debug!(target: LOG_TARGET, "Reading structure from {}", implicit.display());
                Self::parse(&text)
            }
            Err(_) => {
                debug!(target: LOG_TARGET, "Using the built-in default structure");
                Self::parse(DEFAULT_STRUCTURE)
            }
        }
    }
}
