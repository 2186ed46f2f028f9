//! Load `.deferwalk.toml` from the walked directory (CLI only). The lib never reads it; library
//! callers pass everything through `WalkRequest`.

use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct DeferwalkToml {
    #[serde(default)]
    settings: WalkSection,
}

#[derive(Debug, Default, Deserialize)]
struct WalkSection {
    output: Option<String>,
    exclude: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
    follow_links: Option<bool>,
    serial: Option<bool>,
    skip_dotfiles: Option<bool>,
    verbose: Option<bool>,
}

/// Parse settings file contents. Unknown keys are ignored.
pub fn parse_deferwalk_toml(s: &str) -> Result<DeferwalkToml, toml::de::Error> {
    toml::from_str(s)
}

/// Load the settings file from `dir` if present. Returns None if missing, unreadable, or invalid (logged).
pub fn load_deferwalk_toml(dir: &Path) -> Option<DeferwalkToml> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = std::fs::read_to_string(&path).ok()?;
    parse_deferwalk_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Relative paths in the file are
/// taken relative to `dir`. Call before applying CLI flags.
pub fn apply_file_to_opts(file: &DeferwalkToml, dir: &Path, opts: &mut Opts) {
    let sec = &file.settings;
    if let Some(ref p) = sec.output {
        opts.output = Some(dir.join(p));
    }
    if let Some(ref v) = sec.exclude {
        opts.exclude = v.iter().map(|p| dir.join(p)).collect();
    }
    if let Some(ref v) = sec.extensions {
        opts.extensions = v.clone();
    }
    apply_file_opt!(sec, opts, follow_links => follow_links);
    apply_file_opt!(sec, opts, serial => serial);
    apply_file_opt!(sec, opts, skip_dotfiles => skip_dotfiles);
    apply_file_opt!(sec, opts, verbose => verbose);
}
