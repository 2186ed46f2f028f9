use deferwalk::engine::report::failures_to_json;
use deferwalk::engine::{
    ExclusionSet, has_supported_extension, is_hidden_name, is_os_hidden_file, map_output_path,
    parse_ignore_file, path_relative_to,
};
use deferwalk::utils::{PackagePaths, apply_file_to_opts, parse_deferwalk_toml};
use deferwalk::{
    ErrorKind, FileOptions, IgnoreFileError, Opts, Unsupported, WalkError, WalkOutcome,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/foo/bar/baz/qux");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("baz/qux"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/other/qux");
    assert_eq!(path_relative_to(&path, &base), None);
}

#[test]
fn test_path_relative_path_equals_base() {
    let base = PathBuf::from("/foo/bar");
    assert_eq!(path_relative_to(&base, &base), Some(PathBuf::new()));
}

// --- map_output_path ---

#[test]
fn test_map_output_without_output_root_is_identity() {
    let root = Path::new("/in");
    let input = Path::new("/in/a/b.xml");
    assert_eq!(map_output_path(root, None, input), PathBuf::from("/in/a/b.xml"));
}

#[test]
fn test_map_output_root_itself() {
    let root = Path::new("/in/layout.xml");
    assert_eq!(
        map_output_path(root, Some(Path::new("/out/copy.xml")), root),
        PathBuf::from("/out/copy.xml")
    );
}

#[test]
fn test_map_output_single_level() {
    assert_eq!(
        map_output_path(
            Path::new("/in"),
            Some(Path::new("/out")),
            Path::new("/in/a.xml")
        ),
        PathBuf::from("/out/a.xml")
    );
}

#[test]
fn test_map_output_multi_level() {
    assert_eq!(
        map_output_path(
            Path::new("/in"),
            Some(Path::new("/out/dir")),
            Path::new("/in/x/y/z.xml")
        ),
        PathBuf::from("/out/dir/x/y/z.xml")
    );
}

#[test]
fn test_map_output_not_under_root_unchanged() {
    assert_eq!(
        map_output_path(
            Path::new("/in"),
            Some(Path::new("/out")),
            Path::new("/elsewhere/a.xml")
        ),
        PathBuf::from("/elsewhere/a.xml")
    );
}

// --- ExclusionSet ---

#[test]
fn test_exclusion_prefix_matches_self_and_descendants() {
    let set = ExclusionSet::new([PathBuf::from("/a/b")]);
    assert!(set.is_excluded(Path::new("/a/b")));
    assert!(set.is_excluded(Path::new("/a/b/c/d.xml")));
    assert!(!set.is_excluded(Path::new("/a")));
}

#[test]
fn test_exclusion_is_component_prefix_not_string_prefix() {
    let set = ExclusionSet::new([PathBuf::from("/a/b")]);
    assert!(!set.is_excluded(Path::new("/a/bc")));
    assert!(!set.is_excluded(Path::new("/a/bc/d.xml")));
}

#[test]
fn test_exclusion_empty_set_excludes_nothing() {
    let set = ExclusionSet::default();
    assert!(set.is_empty());
    assert!(!set.is_excluded(Path::new("/anything")));
}

#[test]
fn test_exclusion_extended_does_not_touch_parent() {
    let parent = ExclusionSet::new([PathBuf::from("/a/x")]);
    let child = parent.extended(vec![PathBuf::from("/a/d/skip")]);
    assert_eq!(parent.len(), 1);
    assert_eq!(child.len(), 2);
    assert!(child.is_excluded(Path::new("/a/d/skip/f.xml")));
    assert!(!parent.is_excluded(Path::new("/a/d/skip/f.xml")));
    assert!(child.is_excluded(Path::new("/a/x/f.xml")));
}

#[test]
fn test_exclusion_extended_with_nothing_keeps_prefixes() {
    let parent = ExclusionSet::new([PathBuf::from("/a/x")]);
    let child = parent.extended(Vec::new());
    assert_eq!(child.iter().collect::<Vec<_>>(), vec![Path::new("/a/x")]);
}

// --- parse_ignore_file ---

#[test]
fn test_parse_ignore_file_relative_and_absolute() {
    let dir = Path::new("/proj/layouts");
    let contents = b"# generated files\n\nbuild\n  nested/old  \n/abs/path\n";
    let paths = parse_ignore_file(dir, contents).unwrap();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/proj/layouts/build"),
            PathBuf::from("/proj/layouts/nested/old"),
            PathBuf::from("/abs/path"),
        ]
    );
}

#[test]
fn test_parse_ignore_file_empty() {
    assert!(parse_ignore_file(Path::new("/d"), b"").unwrap().is_empty());
    assert!(
        parse_ignore_file(Path::new("/d"), b"# only a comment\n")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_parse_ignore_file_invalid_utf8() {
    let err = parse_ignore_file(Path::new("/d"), &[0x66, 0xff, 0xfe, b'\n']).unwrap_err();
    assert!(matches!(err, IgnoreFileError::InvalidUtf8));
}

#[test]
fn test_parse_ignore_file_nul_reports_line() {
    let err = parse_ignore_file(Path::new("/d"), b"ok\nbad\0entry\n").unwrap_err();
    assert!(matches!(err, IgnoreFileError::InvalidEntry { line: 2 }));
}

// --- extensions and hidden names ---

#[test]
fn test_has_supported_extension() {
    let supported: HashSet<String> = ["xml".to_string()].into();
    assert!(has_supported_extension(Path::new("/a/b.xml"), &supported));
    assert!(!has_supported_extension(Path::new("/a/b.XML"), &supported));
    assert!(!has_supported_extension(Path::new("/a/b.json"), &supported));
    assert!(!has_supported_extension(Path::new("/a/xml"), &supported));
}

#[test]
fn test_file_options_with_extensions_strips_dots() {
    let opts = FileOptions::default().with_extensions([".xml", "json"]);
    assert!(opts.supported_extensions.contains("xml"));
    assert!(opts.supported_extensions.contains("json"));
    assert_eq!(opts.supported_extensions.len(), 2);
}

#[test]
fn test_file_options_default() {
    let opts = FileOptions::default();
    assert!(!opts.follow_symlinks);
    assert!(!opts.skip_dotfiles);
    assert_eq!(opts.supported_extensions, HashSet::from(["xml".to_string()]));
}

#[test]
fn test_hidden_names() {
    assert!(is_hidden_name(".git"));
    assert!(is_hidden_name(".deferwalk-ignore"));
    assert!(is_hidden_name("Thumbs.db"));
    assert!(is_os_hidden_file("._resource"));
    assert!(!is_os_hidden_file("layout.xml"));
    assert!(!is_hidden_name("layout.xml"));
}

#[test]
fn test_package_paths() {
    let p = PackagePaths::get();
    assert_eq!(p.pkg_name(), "deferwalk");
    assert_eq!(p.ignore_filename(), ".deferwalk-ignore");
    assert_eq!(p.config_filename(), ".deferwalk.toml");
}

// --- settings file ---

#[test]
fn test_toml_applies_only_present_fields() {
    let file = parse_deferwalk_toml(
        r#"
[settings]
output = "out"
extensions = ["xml", "json"]
follow_links = true
"#,
    )
    .unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, Path::new("/proj"), &mut opts);
    assert_eq!(opts.output, Some(PathBuf::from("/proj/out")));
    assert_eq!(opts.extensions, vec!["xml".to_string(), "json".to_string()]);
    assert!(opts.follow_links);
    assert!(!opts.serial);
    assert!(opts.exclude.is_empty());
}

#[test]
fn test_toml_without_settings_section() {
    let file = parse_deferwalk_toml("").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, Path::new("/proj"), &mut opts);
    assert_eq!(opts.output, None);
    assert_eq!(opts.extensions, vec!["xml".to_string()]);
}

#[test]
fn test_toml_invalid() {
    assert!(parse_deferwalk_toml("[settings]\nserial = \"yes\"").is_err());
}

// --- errors and reporting ---

#[test]
fn test_error_path_and_kind() {
    let err = WalkError::UnsupportedType {
        path: PathBuf::from("/a/b.txt"),
        reason: Unsupported::Extension,
    };
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    assert_eq!(err.path(), Path::new("/a/b.txt"));
    assert!(err.to_string().contains("/a/b.txt"));
}

#[test]
fn test_commit_failed_message_includes_cause() {
    let err = WalkError::CommitFailed {
        path: PathBuf::from("/a/b.xml"),
        source: anyhow::anyhow!("disk full"),
    };
    let msg = err.to_string();
    assert!(msg.contains("/a/b.xml"));
    assert!(msg.contains("disk full"));
}

#[test]
fn test_failures_to_json() {
    let outcome = WalkOutcome::root_failure(WalkError::NotFound {
        path: PathBuf::from("/missing"),
    });
    let json = failures_to_json(&outcome).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["kind"], "NotFound");
    assert_eq!(value[0]["path"], "/missing");
}
