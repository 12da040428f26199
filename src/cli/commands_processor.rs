//! Glue between the parsed CLI arguments and the core services.

use std::io;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::adapters::tag_reader::LoftyTagReader;
use crate::cli::commands::Cli;
use crate::core::domain::files::OperationKind;
use crate::core::errors::TidysicError;
use crate::core::logging::LOG_TARGET;
use crate::core::services::structure::Structure;
use crate::core::services::tree::Tree;
use crate::core::services::{cleanup, organizer};

/// Outcome of a run that got as far as executing its plan.
pub struct RunReport {
    pub planned: usize,
    pub failed: usize,
}

/// Runs a full organize: scan, plan, execute, clean up.
pub fn run(cli: &Cli) -> Result<RunReport, TidysicError> {
    let source = required_path(&cli.source, "source")?;
    if !source.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source is not a directory: {}", source.display()),
        )
        .into());
    }

    let kind = if cli.in_place || cli.move_files {
        OperationKind::Move
    } else {
        OperationKind::Copy
    };
    let target = if cli.in_place {
        source.clone()
    } else {
        required_path(&cli.target, "target")?
    };

    if !target.exists() && !cli.dry_run {
        std::fs::create_dir_all(&target)?;
    }

    let structure = Structure::load(cli.config.as_deref(), &target)?;

    info!(
        target: LOG_TARGET,
        "Organizing {} into {}",
        source.display(),
        target.display()
    );

    let tree = Tree::build(&source, &LoftyTagReader)?;
    debug!(target: LOG_TARGET, "Scanned {} files", tree.file_count());

    let operations = organizer::plan(&tree, &target, &structure, kind)?;

    if cli.dry_run && cli.json {
        println!("{}", serde_json::to_string_pretty(&operations)?);
    }

    let failed = organizer::execute(&operations, cli.dry_run);

    if kind == OperationKind::Move && !cli.dry_run {
        let removed = cleanup::remove_empty_dirs(&source);
        if removed > 0 {
            debug!(
                target: LOG_TARGET,
                "Removed {} emptied source directories", removed
            );
        }
    }

    if failed > 0 {
        warn!(
            target: LOG_TARGET,
            "{} of {} operations failed",
            failed,
            operations.len()
        );
    }

    Ok(RunReport {
        planned: operations.len(),
        failed,
    })
}

/// Positional paths are validated by clap; this guards the invariant at the
/// library boundary for programmatic callers.
fn required_path(path: &Option<PathBuf>, name: &str) -> Result<PathBuf, TidysicError> {
    path.clone().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("missing required {} directory", name),
        )
        .into()
    })
}
