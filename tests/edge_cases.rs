//! Edge case and error handling tests for dirsnap


use std::fs;

use dirsnap::{FileKind, MemoryFs, WalkError, WalkerConfig, walk, walk_iter};
use harness::{TestTree, relative_paths, run_dirsnap};

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
#[cfg(unix)]
fn test_symlink_to_directory_is_not_followed() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.txt", "x");
    tree.add_symlink("realdir", "linkdir");

    let entries = walk(tree.path(), &WalkerConfig::default()).unwrap();
    let mut paths = relative_paths(&entries, tree.path());
    paths.sort();
    assert_eq!(paths, vec!["linkdir", "realdir", "realdir/file.txt"]);

    let link = entries
        .iter()
        .find(|e| e.path.ends_with("linkdir"))
        .unwrap();
    assert_eq!(link.kind(), FileKind::Symlink);
}

#[test]
#[cfg(unix)]
fn test_symlink_counts_as_file_for_modes() {
    let tree = TestTree::new();
    tree.add_dir("realdir");
    tree.add_symlink("realdir", "linkdir");

    let dirs = walk(tree.path(), &WalkerConfig::default().include_files(false)).unwrap();
    assert_eq!(relative_paths(&dirs, tree.path()), vec!["realdir"]);

    let files = walk(
        tree.path(),
        &WalkerConfig::default().include_directories(false),
    )
    .unwrap();
    assert_eq!(relative_paths(&files, tree.path()), vec!["linkdir"]);
}

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.txt", "x");
    tree.add_symlink("..", "subdir/parent");

    let entries = walk(tree.path(), &WalkerConfig::default()).unwrap();
    assert_eq!(entries.len(), 3);
}

#[test]
#[cfg(unix)]
fn test_broken_and_self_referential_symlinks() {
    let tree = TestTree::new();
    tree.add_file("real.txt", "x");
    tree.add_symlink("nonexistent.txt", "broken");
    tree.add_symlink("selfref", "selfref");

    let entries = walk(tree.path(), &WalkerConfig::default()).unwrap();
    let mut paths = relative_paths(&entries, tree.path());
    paths.sort();
    assert_eq!(paths, vec!["broken", "real.txt", "selfref"]);
}

#[test]
#[cfg(unix)]
fn test_symlinked_root_is_listed() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.txt", "x");
    let link = tree.add_symlink("realdir", "rootlink");

    let entries = walk(&link, &WalkerConfig::default()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, link.join("file.txt"));
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[test]
#[cfg(unix)]
fn test_unreadable_directory_aborts_walk() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.add_file("readable/file.txt", "x");
    let unreadable = tree.add_dir("unreadable");
    fs::write(unreadable.join("hidden.txt"), "x").unwrap();

    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can read anyway; nothing to test then
    let still_readable = fs::read_dir(&unreadable).is_ok();
    let result = walk(tree.path(), &WalkerConfig::default());
    let (_stdout, stderr, success) = run_dirsnap(tree.path(), &[]);
    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o755)).unwrap();

    if still_readable {
        // Running privileged: the denied-directory tests below cover this path
        eprintln!("skipping: {} is still readable", unreadable.display());
        return;
    }
    match result {
        Err(WalkError::Io { path, source }) => {
            assert_eq!(path, unreadable);
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected Io error, got {:?}", other.map(|e| e.len())),
    }
    assert!(!success, "CLI should fail on unreadable directory");
    assert!(stderr.contains("failed to read"), "stderr: {}", stderr);
}

#[test]
#[cfg(unix)]
fn test_unreadable_directory_can_be_ignored() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.add_file("readable/file.txt", "x");
    let unreadable = tree.add_dir("unreadable");

    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o000)).unwrap();
    let config = WalkerConfig::default().ignore_patterns(["unreadable"]);
    let result = walk(tree.path(), &config);
    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o755)).unwrap();

    let entries = result.unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
#[cfg(unix)]
fn test_unreadable_directory_pruned_by_filter() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.add_file("readable/file.txt", "x");
    let unreadable = tree.add_dir("unreadable");

    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o000)).unwrap();
    let config = WalkerConfig::default()
        .filter(|e| !e.path.ends_with("unreadable"))
        .no_recurse_on_failed_filter(true);
    let result = walk(tree.path(), &config);
    fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(result.unwrap().len(), 2);
}

#[test]
fn test_error_yielded_once_from_virtual_fs() {
    let mut vfs = MemoryFs::new();
    vfs.write_file("/r/ok/a.txt", "a");
    vfs.mkdir_p("/r/locked/inner");
    vfs.deny("/r/locked");
    let config = WalkerConfig::default().fs(vfs);

    let items: Vec<_> = walk_iter("/r", &config).unwrap().collect();
    assert_eq!(items.len(), 4);
    assert!(items[..3].iter().all(Result::is_ok));
    assert!(matches!(items[3], Err(WalkError::Io { .. })));
}

#[test]
fn test_denied_directory_reports_failed_read() {
    let mut vfs = MemoryFs::new();
    vfs.write_file("/r/readable/file.txt", "x");
    vfs.write_file("/r/unreadable/hidden.txt", "x");
    vfs.deny("/r/unreadable");
    let config = WalkerConfig::default().fs(vfs);

    let err = walk("/r", &config).unwrap_err();
    assert!(!err.is_root_error());
    // Same text the CLI prints after "dirsnap: "
    let message = err.to_string();
    assert!(
        message.starts_with("failed to read /r/unreadable:"),
        "message: {}",
        message
    );
}

// ============================================================================
// Special Filenames
// ============================================================================

#[test]
fn test_filename_with_spaces_and_unicode() {
    let tree = TestTree::new();
    tree.add_file("file with spaces.txt", "x");
    tree.add_file("日本語/émoji_🎉.txt", "x");

    let entries = walk(tree.path(), &WalkerConfig::default()).unwrap();
    let mut paths = relative_paths(&entries, tree.path());
    paths.sort();
    assert_eq!(
        paths,
        vec!["file with spaces.txt", "日本語", "日本語/émoji_🎉.txt"]
    );
}

#[test]
fn test_glob_metacharacters_in_names_are_literal_to_filter() {
    let tree = TestTree::new();
    tree.add_file("[weird]*name?.txt", "x");
    tree.add_file("plain.txt", "x");

    let config = WalkerConfig::default().filter(|e| e.file_name().starts_with('['));
    let entries = walk(tree.path(), &config).unwrap();
    assert_eq!(relative_paths(&entries, tree.path()), vec!["[weird]*name?.txt"]);
}

// ============================================================================
// Virtual and real filesystems agree
// ============================================================================

#[test]
fn test_memory_fs_matches_real_fs() {
    let tree = TestTree::depth_fixture();
    let mut vfs = MemoryFs::new();
    for file in dirsnap::test_utils::DEPTH_FIXTURE {
        vfs.write_file(format!("/vroot/{file}"), "x");
    }

    for limit in [-1, 0, 1, 2, 3] {
        let real = WalkerConfig::default().with_depth_sentinel(limit).unwrap();
        let virt = WalkerConfig::default()
            .with_depth_sentinel(limit)
            .unwrap()
            .fs(vfs.clone());

        let mut real_paths = relative_paths(&walk(tree.path(), &real).unwrap(), tree.path());
        let mut virt_paths =
            relative_paths(&walk("/vroot", &virt).unwrap(), std::path::Path::new("/vroot"));
        real_paths.sort();
        virt_paths.sort();
        assert_eq!(real_paths, virt_paths, "depth limit {}", limit);
    }
}
