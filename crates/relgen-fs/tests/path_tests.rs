use relgen_fs::NormalizedPath;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
}

#[test]
fn test_join_onto_empty_base() {
    let base = NormalizedPath::new("");
    assert_eq!(base.join("ci.yml").as_str(), "ci.yml");
}

#[test]
fn test_components_skip_empty_segments() {
    let path = NormalizedPath::new("/.github//workflows/ci.yml");
    assert_eq!(path.components(), vec![".github", "workflows", "ci.yml"]);
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.parent().unwrap().as_str(), "foo/bar");
    assert_eq!(NormalizedPath::new("/foo").parent().unwrap().as_str(), "/");
    assert!(NormalizedPath::new("foo").parent().is_none());
}

#[test]
fn test_extension() {
    assert_eq!(NormalizedPath::new("a/goreleaser.yml").extension(), Some("yml"));
    assert_eq!(NormalizedPath::new("a/.gitignore").extension(), None);
    assert_eq!(NormalizedPath::new("a/Makefile").extension(), None);
}
