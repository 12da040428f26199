//! Planning and execution of the destination layout.
//!
//! Planning turns the parse tree and the structure into a flat operation
//! list; collisions are caught on the list, before the filesystem is
//! touched. Execution then performs each copy or move, creating parent
//! directories lazily and never overwriting anything that already exists.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, error, info};

use crate::core::domain::files::{FileKind, Operation, OperationKind, TaggedFile};
use crate::core::errors::TidysicError;
use crate::core::logging::{self, LOG_TARGET};
use crate::core::services::structure::Structure;
use crate::core::services::tree::Tree;

// ── Planning ────────────────────────────────────────────────────────────────

/// Plans the destination path of every file in the tree.
///
/// Fails with [`TidysicError::Collision`] when two files would land on the
/// same target; no operation is executed in that case.
pub fn plan(
    tree: &Tree,
    target_root: &Path,
    structure: &Structure,
    kind: OperationKind,
) -> Result<Vec<Operation>, TidysicError> {
    let mut operations = Vec::new();
    plan_node(tree, target_root, structure, kind, &mut operations)?;
    detect_collisions(&operations)?;
    Ok(operations)
}

fn plan_node(
    node: &Tree,
    target_root: &Path,
    structure: &Structure,
    kind: OperationKind,
    operations: &mut Vec<Operation>,
) -> Result<(), TidysicError> {
    for file in node.audio_files.iter().chain(&node.clutter_files) {
        operations.push(plan_file(file, target_root, structure, kind)?);
    }
    for child in &node.children {
        plan_node(child, target_root, structure, kind, operations)?;
    }
    Ok(())
}

fn plan_file(
    file: &TaggedFile,
    target_root: &Path,
    structure: &Structure,
    kind: OperationKind,
) -> Result<Operation, TidysicError> {
    let mut target = target_root.to_path_buf();
    for step in &structure.folders {
        target.push(sanitize_component(&step.folder_name(&file.tags)?));
    }

    match file.kind {
        FileKind::Audio => {
            let rendered = sanitize_component(&structure.track_format.render(&file.tags)?);
            match file.extension() {
                Some(extension) => target.push(format!("{}.{}", rendered, extension)),
                None => target.push(rendered),
            }
        }
        // Clutter keeps its original name, extension and all.
        FileKind::Clutter => match file.path.file_name() {
            Some(name) => target.push(name),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("file has no name: {}", file.path.display()),
                )
                .into());
            }
        },
    }

    Ok(Operation::new(&file.path, target, kind, file.is_directory))
}

/// Replaces path separators inside a rendered component so a single template
/// output cannot create accidental sub-levels.
fn sanitize_component(component: &str) -> String {
    component.replace(['/', std::path::MAIN_SEPARATOR], "-")
}

/// Rejects the plan when any two operations share a target.
///
/// The first colliding target in emission order is reported, together with
/// every source that maps onto it.
fn detect_collisions(operations: &[Operation]) -> Result<(), TidysicError> {
    let mut sources_by_target: HashMap<&Path, Vec<&Path>> = HashMap::new();
    for operation in operations {
        sources_by_target
            .entry(operation.target.as_path())
            .or_default()
            .push(operation.source.as_path());
    }

    for operation in operations {
        if let Some(sources) = sources_by_target.get(operation.target.as_path()) {
            if sources.len() > 1 {
                return Err(TidysicError::Collision {
                    target: operation.target.clone(),
                    sources: sources.iter().map(|source| source.to_path_buf()).collect(),
                });
            }
        }
    }
    Ok(())
}

// ── Execution ───────────────────────────────────────────────────────────────

/// Executes a validated plan in emission order.
///
/// Per-operation failures are logged and counted but do not stop the run;
/// the caller turns a non-zero count into a non-zero exit code. In dry-run
/// mode nothing is touched and every operation is logged as the action it
/// would take.
pub fn execute(operations: &[Operation], dry_run: bool) -> usize {
    let mut failed = 0;
    for operation in operations {
        if dry_run {
            info!(
                target: LOG_TARGET,
                "Would {} {} to {}",
                operation.kind.verb(),
                operation.source.display(),
                operation.target.display()
            );
            continue;
        }

        match execute_one(operation) {
            Ok(true) => {
                debug!(
                    target: LOG_TARGET,
                    "{} {} to {}",
                    operation.kind.verb(),
                    operation.source.display(),
                    operation.target.display()
                );
                logging::progress(&format!(
                    "{} -> {}",
                    operation.source.display(),
                    operation.target.display()
                ));
            }
            Ok(false) => {
                debug!(
                    target: LOG_TARGET,
                    "{} is already in place",
                    operation.source.display()
                );
            }
            Err(err) => {
                error!(
                    target: LOG_TARGET,
                    "Could not {} {} to {}: {}",
                    operation.kind.verb(),
                    operation.source.display(),
                    operation.target.display(),
                    err
                );
                failed += 1;
            }
        }
    }
    failed
}

/// Runs one operation. `Ok(false)` means the file was already at its target
/// (an in-place re-run) and nothing was done.
fn execute_one(operation: &Operation) -> io::Result<bool> {
    if operation.source == operation.target {
        return Ok(false);
    }

    if let Some(parent) = operation.target.parent() {
        fs::create_dir_all(parent)?;
    }

    // symlink_metadata so even a dangling symlink counts as occupied.
    if operation.target.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target already exists",
        ));
    }

    match operation.kind {
        OperationKind::Move => move_entry(&operation.source, &operation.target, operation.is_directory),
        OperationKind::Copy => copy_entry(&operation.source, &operation.target, operation.is_directory),
    }
}

fn move_entry(source: &Path, target: &Path, is_directory: bool) -> io::Result<bool> {
    match fs::rename(source, target) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            copy_entry(source, target, is_directory)?;
            if is_directory {
                fs::remove_dir_all(source)?;
            } else {
                fs::remove_file(source)?;
            }
            Ok(true)
        }
        Err(err) => Err(err),
    }
}

fn copy_entry(source: &Path, target: &Path, is_directory: bool) -> io::Result<bool> {
    if is_directory {
        copy_dir_recursive(source, target)?;
    } else {
        fs::copy(source, target)?;
    }
    Ok(true)
}

/// Byte-copies a whole directory, preserving names. Metadata preservation
/// is best-effort only.
fn copy_dir_recursive(source: &Path, target: &Path) -> io::Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let child_target = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &child_target)?;
        } else {
            fs::copy(entry.path(), &child_target)?;
        }
    }
    Ok(())
}
