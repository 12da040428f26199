//! Centralized error types for tidysic.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::domain::tags::{TagBag, TagName};
use crate::core::logging::{DetailRole, Message};

/// Every fatal condition a run can surface.
///
/// Soft conditions (an unreadable tag container, a single failed copy) are
/// logged where they happen and never reach this enum.
#[derive(Debug)]
pub enum TidysicError {
    /// A structure file or template names a tag outside the known set.
    UnknownTag(String),
    /// Unbalanced or too-deep braces, or a malformed format spec.
    TemplateSyntax {
        template: String,
        column: usize,
        reason: String,
    },
    /// The structure file itself is unusable (empty, step without template).
    StructureParse(String),
    /// A template produced an empty name for a file.
    EmptyRender { template: String, tags: TagBag },
    /// Two or more planned operations share a destination.
    Collision {
        target: PathBuf,
        sources: Vec<PathBuf>,
    },
    /// An I/O failure that invalidates the whole run.
    Io(io::Error),
}

impl fmt::Display for TidysicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TidysicError::UnknownTag(name) => write!(f, "unknown tag name '{}'", name),
            TidysicError::TemplateSyntax {
                template,
                column,
                reason,
            } => write!(f, "bad template '{}': {} (col {})", template, reason, column),
            TidysicError::StructureParse(msg) => write!(f, "could not parse structure: {}", msg),
            TidysicError::EmptyRender { template, .. } => {
                write!(f, "template '{}' rendered an empty name", template)
            }
            TidysicError::Collision { target, sources } => write!(
                f,
                "{} files share the same target {}",
                sources.len(),
                target.display()
            ),
            TidysicError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for TidysicError {}

impl From<io::Error> for TidysicError {
    fn from(error: io::Error) -> Self {
        TidysicError::Io(error)
    }
}

impl From<serde_json::Error> for TidysicError {
    fn from(error: serde_json::Error) -> Self {
        TidysicError::Io(io::Error::new(io::ErrorKind::InvalidData, error))
    }
}

impl TidysicError {
    /// Renders the error as a structured multi-line message for the logger.
    pub fn message(&self) -> Message {
        match self {
            TidysicError::UnknownTag(name) => {
                Message::new("unknown tag name").detail(DetailRole::Tag, name.as_str())
            }
            TidysicError::TemplateSyntax {
                template,
                column,
                reason,
            } => Message::new(format!("bad template: {} (col {})", reason, column))
                .detail(DetailRole::Config, template.as_str()),
            TidysicError::StructureParse(msg) => {
                Message::new(format!("could not parse structure: {}", msg))
            }
            TidysicError::EmptyRender { template, tags } => {
                let mut message = Message::new("template rendered an empty name")
                    .detail(DetailRole::Config, template.as_str());
                for name in TagName::ALL {
                    message = message.detail(
                        DetailRole::Tag,
                        format!("{}: {}", name, tags.get(name).unwrap_or("<absent>")),
                    );
                }
                message.detail(
                    DetailRole::Config,
                    "try the required marker ({*{tag}}) to prevent empty names",
                )
            }
            TidysicError::Collision { target, sources } => {
                let mut message = Message::new("more than one file has the same target")
                    .detail(DetailRole::Path, target.display().to_string());
                for source in sources {
                    message = message.detail(DetailRole::Path, source.display().to_string());
                }
                message.detail(
                    DetailRole::Config,
                    "consider a structure with more specific tags to tell them apart",
                )
            }
            TidysicError::Io(err) => Message::new(format!("I/O error: {}", err)),
        }
    }
}
