//! Organize music files into a tidy hierarchy driven by their metadata tags.
//!
//! The library exposes the four subsystems behind the `tidysic` binary:
//! the recursive source scan ([`Tree`]), the template engine
//! ([`FormattedString`] and [`Structure`]), the planner/executor
//! ([`core::services::organizer`]), and the post-move cleanup
//! ([`core::services::cleanup`]). Tag reading sits behind the [`TagReader`]
//! seam so callers can substitute their own source of tags.

pub mod adapters;
pub mod cli;
pub mod core;

pub use crate::adapters::tag_reader::{LoftyTagReader, TagReader};
pub use crate::core::domain::files::{FileKind, Operation, OperationKind, TaggedFile};
pub use crate::core::domain::tags::{TagBag, TagName};
pub use crate::core::errors::TidysicError;
pub use crate::core::services::structure::{Structure, StructureStep};
pub use crate::core::services::template::FormattedString;
pub use crate::core::services::tree::Tree;
