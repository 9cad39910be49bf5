//! Dataset file watching.
//!
//! When the dataset came from a real file (not the embedded sample), the
//! file is watched so edits show up without restarting. The watcher only
//! flips a shared flag; the event loop performs the actual reload between
//! frames. Watcher setup failure is non-fatal: the app just loses hot
//! reload.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

/// Set up a file watcher for dataset changes
pub fn setup_dataset_watcher(
    dataset_path: PathBuf,
    needs_reload: Arc<Mutex<bool>>,
) -> Option<RecommendedWatcher> {
    let config = Config::default().with_poll_interval(Duration::from_millis(500));

    // Canonicalize for reliable comparison; editors may report either form
    let canonical = dataset_path
        .canonicalize()
        .unwrap_or_else(|_| dataset_path.clone());
    let file_name = dataset_path.file_name().map(|s| s.to_os_string());

    let watcher_result = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let matches = event.paths.iter().any(|p| {
                    if let Ok(event_canonical) = p.canonicalize() {
                        if event_canonical == canonical {
                            return true;
                        }
                    }
                    // Fall back to filename comparison
                    if let (Some(expected), Some(actual)) = (&file_name, p.file_name()) {
                        return actual == expected.as_os_str();
                    }
                    false
                });

                if matches {
                    if let Ok(mut flag) = needs_reload.lock() {
                        *flag = true;
                    }
                }
            }
        },
        config,
    );

    match watcher_result {
        Ok(mut watcher) => {
            // Watch the parent directory since some editors replace files
            let _ = watcher.watch(watch_dir(&dataset_path), RecursiveMode::NonRecursive);
            Some(watcher)
        }
        Err(e) => {
            warn!("dataset watcher unavailable: {e}");
            None
        }
    }
}

/// Directory to watch for a dataset path. A bare filename has an empty
/// parent, which means the working directory.
fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
