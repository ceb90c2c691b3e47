use super::*;
use std::path::{Path, PathBuf};

#[test]
fn local_file_is_named_after_file_name_with_extension() {
    let f = LocalFile::from_path(Path::new("/music/Artist - Song.flac"));
    assert_eq!(f.name, "Artist - Song.flac");
    assert_eq!(f.path, PathBuf::from("/music/Artist - Song.flac"));
}

#[test]
fn acquired_urls_are_unique_and_resolve_to_their_path() {
    let mut reg = SourceRegistry::with_session("s1");
    let a = reg.acquire(Path::new("/m/a.mp3"));
    let b = reg.acquire(Path::new("/m/a.mp3"));

    assert_ne!(a, b);
    assert!(a.starts_with("local://s1/"));
    assert_eq!(reg.resolve(&a), Some(PathBuf::from("/m/a.mp3")));
    assert_eq!(reg.len(), 2);
}

#[test]
fn released_urls_stop_resolving() {
    let mut reg = SourceRegistry::with_session("s1");
    let a = reg.acquire(Path::new("/m/a.mp3"));

    assert!(reg.release(&a));
    assert!(!reg.release(&a));
    assert_eq!(reg.resolve(&a), None);
    assert_eq!(reg.len(), 0);
}

#[test]
fn urls_from_another_session_do_not_resolve() {
    let mut old = SourceRegistry::with_session("old");
    let stale = old.acquire(Path::new("/m/a.mp3"));

    let mut current = SourceRegistry::with_session("new");
    current.acquire(Path::new("/m/b.mp3"));
    assert_eq!(current.resolve(&stale), None);
}

#[test]
fn fresh_registries_get_distinct_sessions() {
    let mut a = SourceRegistry::new();
    let mut b = SourceRegistry::new();
    let url = a.acquire(Path::new("/m/a.mp3"));

    assert_eq!(b.resolve(&url), None);
    assert_ne!(url, b.acquire(Path::new("/m/a.mp3")));
}
