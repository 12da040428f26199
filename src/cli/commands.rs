//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tidysic")]
#[command(version)]
#[command(about = "Organize music files into a tidy hierarchy driven by their tags")]
#[command(
    long_about = "Reorganizes a tree of audio files into a destination tree whose directory \
and file names are derived from each file's embedded metadata tags, following a structure \
template.\n\nRecognized audio extensions: .mp3 .wav .flac .ogg"
)]
pub struct Cli {
    /// Directory whose content will be organized.
    #[arg(required_unless_present = "dump_config")]
    pub source: Option<PathBuf>,

    /// Directory (created if needed) into which the files are organized.
    #[arg(required_unless_present_any = ["in_place", "dump_config"], conflicts_with = "in_place")]
    pub target: Option<PathBuf>,

    /// Display more info when running.
    #[arg(short, long)]
    pub verbose: bool,

    /// Do nothing on the files themselves, but log the actions that would
    /// happen.
    #[arg(long)]
    pub dry_run: bool,

    /// Move files instead of copying them.
    #[arg(long = "move", conflicts_with = "copy")]
    pub move_files: bool,

    /// Copy files into the target (the default).
    #[arg(long)]
    pub copy: bool,

    /// Organize the source directory in place (implies --move).
    #[arg(long, conflicts_with = "copy")]
    pub in_place: bool,

    /// Path to a structure file, instead of <target>/.tidysic.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// With --dry-run, print the planned operations as JSON.
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Print the built-in default structure and exit.
    #[arg(long, exclusive = true)]
    pub dump_config: bool,
}
