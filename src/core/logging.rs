//! Logging utilities for tidysic.

use log::LevelFilter;

/// Target used by every log call in the crate, so a front-end can filter.
pub const LOG_TARGET: &str = "tidysic";

/// Initialize application logging.
///
/// Verbose runs log at debug level; normal runs at info. The `RUST_LOG`
/// environment variable still takes precedence, as usual with env_logger.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .format_timestamp(None)
        .init();
}

/// Semantic role of a detail line, so a front-end may color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailRole {
    Path,
    Tag,
    Config,
}

/// A head line plus optional role-tagged detail lines.
///
/// Errors and verbose diagnostics are built as `Message`s so multi-line
/// output stays aligned and machine-classifiable.
#[derive(Debug, Clone)]
pub struct Message {
    head: String,
    details: Vec<(DetailRole, String)>,
}

impl Message {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            details: Vec::new(),
        }
    }

    /// Appends a detail line.
    pub fn detail(mut self, role: DetailRole, text: impl Into<String>) -> Self {
        self.details.push((role, text.into()));
        self
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.head)?;
        for (_, line) in &self.details {
            write!(f, "\n    {}", line)?;
        }
        Ok(())
    }
}

/// Prints a progress line, terminal only.
///
/// Progress output is cosmetic; when stdout is redirected it is dropped so
/// piped output stays clean.
pub fn progress(message: &str) {
    if atty::is(atty::Stream::Stdout) {
        println!("{}", message);
    }
}
