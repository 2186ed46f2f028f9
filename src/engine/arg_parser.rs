use clap::Parser;
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Walk a directory tree, processing matched files in parallel and committing results serially.
#[derive(Clone, Parser)]
#[command(name = "deferwalk")]
#[command(
    about = "List matched files, or copy them under --output mirroring their relative paths."
)]
pub struct Cli {
    /// Directory (or single file) to walk. Default: current directory.
    #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Copy matched files under this directory instead of listing them.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Path prefixes to skip. Can specify multiple: -e path1 path2
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<PathBuf>,

    /// File extensions to match, without the dot. Default: xml.
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Vec<String>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Walk on a single thread.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub serial: Option<bool>,

    /// Skip dotfiles and dot-directories.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub skip_dotfiles: Option<bool>,

    /// Print failures as a JSON array on stdout.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
