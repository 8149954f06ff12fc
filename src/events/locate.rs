//! Recursive discovery of event files beneath a run directory.

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File name pattern identifying scalar event logs.
pub const EVENT_FILE_PATTERN: &str = "events.out.tfevents*";

/// Find every event file anywhere under `root`, following symlinks.
///
/// Entries that disappear or become unreadable mid-walk are skipped. The
/// result is sorted so that merge order is reproducible between runs.
pub fn find_event_files(root: &Path) -> Vec<PathBuf> {
    let pattern = match Pattern::new(EVENT_FILE_PATTERN) {
        Ok(p) => p,
        Err(e) => unreachable!("invalid built-in pattern {EVENT_FILE_PATTERN}: {e}"),
    };

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.matches(name))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_matching_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("events.out.tfevents.1.host"), b"").unwrap();
        fs::write(nested.join("events.out.tfevents.2.host"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::write(nested.join("my.events.out.tfevents"), b"").unwrap();

        let found = find_event_files(dir.path());
        assert_eq!(
            found,
            vec![
                nested.join("events.out.tfevents.2.host"),
                dir.path().join("events.out.tfevents.1.host"),
            ]
        );
    }

    #[test]
    fn directories_named_like_event_files_are_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("events.out.tfevents.dir")).unwrap();
        assert!(find_event_files(dir.path()).is_empty());
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_event_files(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_and_files_are_followed() {
        use std::os::unix::fs::symlink;

        let store = tempfile::tempdir().unwrap();
        let shared = store.path().join("shared");
        fs::create_dir(&shared).unwrap();
        fs::write(shared.join("events.out.tfevents.1.host"), b"").unwrap();
        let loose = store.path().join("events.out.tfevents.2.host");
        fs::write(&loose, b"").unwrap();

        let run = tempfile::tempdir().unwrap();
        symlink(&shared, run.path().join("linked")).unwrap();
        symlink(&loose, run.path().join("events.out.tfevents.2.link")).unwrap();

        let found = find_event_files(run.path());
        assert_eq!(
            found,
            vec![
                run.path().join("events.out.tfevents.2.link"),
                run.path().join("linked").join("events.out.tfevents.1.host"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_root_is_walked() {
        use std::os::unix::fs::symlink;

        let store = tempfile::tempdir().unwrap();
        fs::write(store.path().join("events.out.tfevents.1.host"), b"").unwrap();
        let links = tempfile::tempdir().unwrap();
        let root = links.path().join("run");
        symlink(store.path(), &root).unwrap();

        assert_eq!(
            find_event_files(&root),
            vec![root.join("events.out.tfevents.1.host")]
        );
    }
}
