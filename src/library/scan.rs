use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::LocalFile;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn walk_dir(dir: &Path, settings: &LibrarySettings, out: &mut Vec<LocalFile>) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            out.push(LocalFile::from_path(path));
        }
    }
}

/// Expand the user's selection into audio files, keeping selection order.
///
/// Files are taken as given when their extension is an audio one;
/// directories contribute their audio files sorted by name. Anything else is
/// skipped with a warning.
pub fn collect_files(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<LocalFile> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk_dir(path, settings, &mut files);
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                files.push(LocalFile::from_path(path));
            } else {
                warn!("skipping {}: not an audio file", path.display());
            }
        } else {
            warn!("skipping {}: no such file or directory", path.display());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn collect_files_keeps_selection_order_for_explicit_files() {
        let dir = tempdir().unwrap();
        let b = dir.path().join("b.mp3");
        let a = dir.path().join("a.ogg");
        fs::write(&b, b"not real").unwrap();
        fs::write(&a, b"not real").unwrap();

        let files = collect_files(&[b.clone(), a.clone()], &LibrarySettings::default());
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.mp3", "a.ogg"]);
        assert_eq!(files[0].path, b);
    }

    #[test]
    fn collect_files_skips_non_audio_and_missing_paths() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        fs::write(&txt, b"ignore me").unwrap();

        let files = collect_files(
            &[txt, dir.path().join("missing.mp3")],
            &LibrarySettings::default(),
        );
        assert!(files.is_empty());
    }

    #[test]
    fn collect_files_walks_directories_sorted_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.wav"), b"not real").unwrap();
        fs::write(dir.path().join("a.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("b.txt"), b"ignore me").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("d.flac"), b"not real").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &LibrarySettings::default());
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3", "c.wav", "d.flac"]);
    }

    #[test]
    fn collect_files_respects_recursive_false_and_hidden() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let files = collect_files(&[dir.path().to_path_buf()], &settings);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "root.mp3");
    }
}
