//! Path and filter utilities

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// Make `path` absolute against the current directory without resolving symlinks.
/// Falls back to the path as given when the current directory is unavailable.
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Output location for `input` (a descendant of `input_root`, or the root itself).
///
/// With an output root the relative part of `input` is re-rooted under it; without one the
/// input path is returned unchanged. The root itself maps to `output_root` exactly.
pub fn map_output_path(input_root: &Path, output_root: Option<&Path>, input: &Path) -> PathBuf {
    let Some(output_root) = output_root else {
        return input.to_path_buf();
    };
    match path_relative_to(input, input_root) {
        Some(rel) if rel.as_os_str().is_empty() => output_root.to_path_buf(),
        Some(rel) => output_root.join(rel),
        // Not under the root: nothing to substitute
        None => input.to_path_buf(),
    }
}

/// True when the file's extension is one of `supported` (case-sensitive, no leading dot).
pub fn has_supported_extension(path: &Path, supported: &HashSet<String>) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| supported.contains(e))
}

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(name: &str) -> bool {
    match name {
        // macOS
        ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
        // Windows
        "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" | "$RECYCLE.BIN" => true,
        // Linux
        ".directory" => true,
        _ => name.starts_with("._") || name.starts_with(".Trash-"),
    }
}

/// Dotfile or OS clutter name.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') || is_os_hidden_file(name)
}
