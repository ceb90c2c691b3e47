use super::sink::resolve_source;
use super::*;
use crate::error::SourceError;
use crate::library::SourceRegistry;
use std::path::{Path, PathBuf};

#[test]
fn playback_info_starts_paused_and_not_ended() {
    let info = PlaybackInfo::default();
    assert!(info.paused);
    assert!(!info.ended);
}

#[test]
fn resolve_source_requires_a_loaded_url() {
    let reg = SourceRegistry::with_session("s");
    assert!(matches!(resolve_source(&reg, None), Err(SourceError::NoSource)));
}

#[test]
fn resolve_source_rejects_stale_urls() {
    let reg = SourceRegistry::with_session("s");
    let err = resolve_source(&reg, Some("local://other/0")).unwrap_err();
    assert!(matches!(err, SourceError::Unknown(ref url) if url == "local://other/0"));
}

#[test]
fn resolve_source_maps_live_urls_to_paths() {
    let mut reg = SourceRegistry::with_session("s");
    let url = reg.acquire(Path::new("/m/a.mp3"));
    assert_eq!(
        resolve_source(&reg, Some(&url)).unwrap(),
        PathBuf::from("/m/a.mp3")
    );
}
