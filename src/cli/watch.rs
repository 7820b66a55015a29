//! Rebuild-on-change for `build --watch`.
//!
//! Bursts of filesystem events are coalesced: after the first relevant event
//! the loop keeps draining until the channel has been quiet for the debounce
//! window, then runs a single rebuild. A change that lands while a rebuild
//! is pending supersedes it rather than queueing a second one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::{BeadError, Result};
use crate::output::{display_path, Printer};

/// Quiet period before a rebuild runs.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Block forever, calling `rebuild` whenever one of `files` changes.
///
/// Rebuild failures are reported and the loop keeps watching.
pub fn watch(files: &[PathBuf], printer: &Printer, mut rebuild: impl FnMut() -> Result<()>) -> Result<()> {
    let targets: HashSet<PathBuf> = files.iter().map(|f| canonical(f)).collect();

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;

    // Watch parent directories; editors often replace files by rename,
    // which would drop a watch placed on the file itself.
    let dirs: HashSet<PathBuf> = targets
        .iter()
        .filter_map(|t| t.parent().map(Path::to_path_buf))
        .collect();
    for dir in &dirs {
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(watch_error)?;
        printer.info("Watching", &display_path(dir));
    }

    while let Ok(event) = rx.recv() {
        let Some(changed) = relevant_change(event, &targets) else {
            continue;
        };

        while rx.recv_timeout(DEBOUNCE).is_ok() {}

        printer.info("Changed", &display_path(&changed));
        if let Err(e) = rebuild() {
            printer.error("Failed", &e.to_string());
        }
    }

    Ok(())
}

/// The first watched path touched by a create/modify/remove event.
fn relevant_change(event: notify::Result<Event>, targets: &HashSet<PathBuf>) -> Option<PathBuf> {
    let event = event.ok()?;
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
        _ => return None,
    }
    event.paths.into_iter().find(|p| targets.contains(&canonical(p)))
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn watch_error(e: notify::Error) -> BeadError {
    BeadError::Io {
        path: e.paths.first().cloned().unwrap_or_default(),
        message: format!("Failed to watch for changes: {}", e),
    }
}
