pub mod config;
pub mod deferwalk_toml;
pub mod fd_limit;
pub mod logger;

pub use config::*;
pub use deferwalk_toml::{apply_file_to_opts, load_deferwalk_toml, parse_deferwalk_toml};
pub use fd_limit::{FDS_PER_WORKER, max_open_fds, max_workers_by_fd_limit};
pub use logger::setup_logging;
