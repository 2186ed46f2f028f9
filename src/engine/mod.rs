//! Engine module: path classification, exclusions, path tools, and the CLI layer

pub mod arg_parser;
pub mod classify;
pub mod exclusion;
pub mod handlers;
pub mod parallel;
pub mod progress;
pub mod report;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use classify::{classify, resolve_symlink};
pub use exclusion::{ExclusionSet, IgnoreFile, IgnoreSource, parse_ignore_file};
pub use handlers::handle_run;
pub use tools::{
    absolutize, has_supported_extension, is_hidden_name, is_os_hidden_file, map_output_path,
    path_relative_to,
};
