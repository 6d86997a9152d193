use std::fs;
use std::path::Path;
use tempfile::tempdir;
use treedump::{
    DumpError,
    ExclusionSet,
    ROOT_MARKER,
    matches_file_types,
    normalize_relative,
    render_tree,
};
#[test]
fn test_node_modules_always_excluded() {
    let set = ExclusionSet::default();
    assert!(set.is_excluded(Path::new("node_modules")));
    assert!(set.is_excluded(Path::new("web/node_modules/react/index.js")));
    assert!(!set.is_excluded(Path::new("node_modules_extra/x.js")));
    assert!(!set.is_excluded(Path::new("Node_Modules/x.js")));
    let with_patterns = ExclusionSet::new(["*.md"]).unwrap();
    assert!(with_patterns.is_excluded(Path::new("a/node_modules/b.js")));
}
#[test]
fn test_glob_semantics() {
    let set = ExclusionSet::new(["*.py", "?.txt", "[ab].md", "[!xy].cfg"]).unwrap();
    assert!(set.is_excluded_str("main.py"));
    assert!(set.is_excluded_str("src/deep/main.py"));
    assert!(set.is_excluded_str("a.txt"));
    assert!(!set.is_excluded_str("ab.txt"));
    assert!(set.is_excluded_str("b.md"));
    assert!(!set.is_excluded_str("c.md"));
    assert!(set.is_excluded_str("c.cfg"));
    assert!(!set.is_excluded_str("x.cfg"));
    assert!(!set.is_excluded_str("main.rs"));
}
#[test]
fn test_patterns_match_whole_path() {
    let set = ExclusionSet::new(["build"]).unwrap();
    assert!(set.is_excluded_str("build"));
    assert!(!set.is_excluded_str("src/build"));
    assert!(!set.is_excluded_str("build/out.o"));
}
#[test]
fn test_separator_normalization() {
    let set = ExclusionSet::new(["src/*.log"]).unwrap();
    let nested = Path::new("src").join("debug.log");
    assert!(set.is_excluded(&nested));
    assert_eq!(normalize_relative(&nested), "src/debug.log");
    assert_eq!(normalize_relative(Path::new("./a/b.txt")), "a/b.txt");
}
#[test]
fn test_braces_are_literal() {
    let set = ExclusionSet::new(["a{b,c}"]).unwrap();
    assert!(set.is_excluded_str("a{b,c}"));
    assert!(!set.is_excluded_str("ab"));
    assert!(!set.is_excluded_str("ac"));
}
#[test]
fn test_caret_is_class_member() {
    let set = ExclusionSet::new(["[^a]"]).unwrap();
    assert!(set.is_excluded_str("a"));
    assert!(set.is_excluded_str("^"));
    assert!(!set.is_excluded_str("b"));
    let only_caret = ExclusionSet::new(["x[^]"]).unwrap();
    assert!(only_caret.is_excluded_str("x^"));
    assert!(!only_caret.is_excluded_str("xa"));
}
#[test]
fn test_unclosed_bracket_keeps_rest_of_glob() {
    let set = ExclusionSet::new(["*["]).unwrap();
    assert!(set.is_excluded_str("x["));
    assert!(set.is_excluded_str("["));
    assert!(!set.is_excluded_str("x"));
    let prefix = ExclusionSet::new(["[abc*"]).unwrap();
    assert!(prefix.is_excluded_str("[abcdef"));
    assert!(!prefix.is_excluded_str("a"));
    let bang = ExclusionSet::new(["[!]"]).unwrap();
    assert!(bang.is_excluded_str("[!]"));
    assert!(!bang.is_excluded_str("a"));
}
#[test]
fn test_class_edge_members() {
    let bracket = ExclusionSet::new(["[]a]"]).unwrap();
    assert!(bracket.is_excluded_str("]"));
    assert!(bracket.is_excluded_str("a"));
    assert!(!bracket.is_excluded_str("b"));
    let not_bracket = ExclusionSet::new(["[!]a]"]).unwrap();
    assert!(not_bracket.is_excluded_str("b"));
    assert!(!not_bracket.is_excluded_str("]"));
    let dash = ExclusionSet::new(["[a-]"]).unwrap();
    assert!(dash.is_excluded_str("-"));
    assert!(dash.is_excluded_str("a"));
    assert!(!dash.is_excluded_str("b"));
    let range = ExclusionSet::new(["v[0-9]"]).unwrap();
    assert!(range.is_excluded_str("v7"));
    assert!(!range.is_excluded_str("vx"));
    let reversed = ExclusionSet::new(["[z-a]"]).unwrap();
    assert!(!reversed.is_excluded_str("m"));
    assert!(!reversed.is_excluded_str("z"));
    let dash_range = ExclusionSet::new(["[+--]"]).unwrap();
    assert!(dash_range.is_excluded_str(","));
    assert!(dash_range.is_excluded_str("-"));
    assert!(!dash_range.is_excluded_str("a"));
    let not_dash = ExclusionSet::new(["[!-#]"]).unwrap();
    assert!(not_dash.is_excluded_str("a"));
    assert!(!not_dash.is_excluded_str("#"));
    assert!(!not_dash.is_excluded_str("-"));
}
#[test]
fn test_escapes_and_stars_are_plain() {
    let backslash = ExclusionSet::new(["a\\b"]).unwrap();
    assert!(backslash.is_excluded_str("a\\b"));
    assert!(!backslash.is_excluded_str("ab"));
    let stars = ExclusionSet::new(["a**b"]).unwrap();
    assert!(stars.is_excluded_str("ab"));
    assert!(stars.is_excluded_str("a/x/b"));
    let recursive = ExclusionSet::new(["**/foo"]).unwrap();
    assert!(recursive.is_excluded_str("x/foo"));
    assert!(!recursive.is_excluded_str("foo"));
}
#[test]
fn test_parse_exclusion_file_format() {
    let set = ExclusionSet::parse("# comment\n\n*.log\n  *.log  \nbuild\n").unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.patterns().collect::<Vec<_>>(), vec!["*.log", "build"]);
}
#[test]
fn test_unreadable_exclusion_file_is_fatal() {
    let dir = tempdir().unwrap();
    let err = ExclusionSet::from_file(dir.path()).unwrap_err();
    assert!(matches!(err, DumpError::Io { .. }));
    assert_eq!(err.exit_code(), 1);
}
#[test]
fn test_missing_exclusion_file_is_empty() {
    let dir = tempdir().unwrap();
    let set = ExclusionSet::from_file(dir.path().join(".gitignore")).unwrap();
    assert!(set.is_empty());
}
#[test]
fn test_with_patterns_merges() {
    let set = ExclusionSet::new(["*.log"])
        .unwrap()
        .with_patterns(["*.tmp", "*.log"])
        .unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.is_excluded_str("x.tmp"));
    assert!(set.is_excluded_str("x.log"));
}
#[test]
fn test_file_type_filter() {
    let types = vec![".py".to_string(), ".tar.gz".to_string()];
    assert!(matches_file_types("a.py", Some(types.as_slice())));
    assert!(matches_file_types("dist.tar.gz", Some(types.as_slice())));
    assert!(!matches_file_types("a.txt", Some(types.as_slice())));
    assert!(matches_file_types("a.txt", None));
}
#[test]
fn test_tree_orders_dirs_first_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    fs::create_dir(dir.path().join("A")).unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    let tree = render_tree(dir.path(), &ExclusionSet::default()).unwrap();
    assert_eq!(tree, vec![ROOT_MARKER, "├── A", "├── a.txt", "└── b.txt"]);
}
#[test]
fn test_tree_connectors_and_indent() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/bin")).unwrap();
    fs::write(dir.path().join("src/main.rs"), "").unwrap();
    fs::write(dir.path().join("src/Lib.rs"), "").unwrap();
    fs::write(dir.path().join("src/bin/tool.rs"), "").unwrap();
    fs::create_dir(dir.path().join("tests")).unwrap();
    fs::write(dir.path().join("tests/it.rs"), "").unwrap();
    fs::write(dir.path().join("README.md"), "").unwrap();
    let tree = render_tree(dir.path(), &ExclusionSet::default()).unwrap();
    assert_eq!(
        tree,
        vec![
            ROOT_MARKER,
            "├── src",
            "│   ├── bin",
            "│   │   └── tool.rs",
            "│   ├── Lib.rs",
            "│   └── main.rs",
            "├── tests",
            "│   └── it.rs",
            "└── README.md",
        ]
    );
}
#[test]
fn test_tree_last_directory_uses_blank_indent() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("only")).unwrap();
    fs::write(dir.path().join("only/x.txt"), "").unwrap();
    fs::write(dir.path().join("only/y.txt"), "").unwrap();
    let tree = render_tree(dir.path(), &ExclusionSet::default()).unwrap();
    assert_eq!(
        tree,
        vec![ROOT_MARKER, "└── only", "    ├── x.txt", "    └── y.txt"]
    );
}
#[test]
fn test_tree_last_visible_sibling_gets_corner() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("z.log"), "").unwrap();
    let set = ExclusionSet::new(["*.log"]).unwrap();
    let tree = render_tree(dir.path(), &set).unwrap();
    assert_eq!(tree, vec![ROOT_MARKER, "└── a.txt"]);
}
#[test]
fn test_tree_prunes_excluded_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("target/debug")).unwrap();
    fs::write(dir.path().join("target/debug/app.py"), "").unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules/pkg.py"), "").unwrap();
    fs::write(dir.path().join("main.py"), "").unwrap();
    let set = ExclusionSet::new(["target"]).unwrap();
    let tree = render_tree(dir.path(), &set).unwrap();
    assert_eq!(tree, vec![ROOT_MARKER, "└── main.py"]);
}
#[test]
fn test_tree_includes_hidden_entries() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "").unwrap();
    fs::write(dir.path().join("app.py"), "").unwrap();
    let tree = render_tree(dir.path(), &ExclusionSet::default()).unwrap();
    assert_eq!(tree, vec![ROOT_MARKER, "├── .env", "└── app.py"]);
}
#[test]
fn test_tree_nested_last_visible_child_gets_corner() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "").unwrap();
    fs::write(dir.path().join("src/zz.log"), "").unwrap();
    fs::create_dir(dir.path().join("src/zz_cache")).unwrap();
    fs::write(dir.path().join("top.txt"), "").unwrap();
    let set = ExclusionSet::new(["*.log", "src/zz_cache"]).unwrap();
    let tree = render_tree(dir.path(), &set).unwrap();
    assert_eq!(
        tree,
        vec![ROOT_MARKER, "├── src", "│   └── lib.rs", "└── top.txt"]
    );
}
