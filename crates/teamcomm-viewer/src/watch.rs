use crate::error::ViewerError;
use crate::generate::{Generator, TeamOutcome};
use crate::scanner::SimLogScanner;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

/// Quiet period used to coalesce bursts of writes from the simulator.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Returns the team directory whose page must be rebuilt after `path` changed.
///
/// Only log files at `<root>/<match>/<team>/<file>` qualify. The scanner never
/// treats the generated page as a log, so rebuilds do not retrigger themselves.
pub fn team_dir_of(root: &Path, scanner: &SimLogScanner, path: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.components().count() != 3 {
        return None;
    }
    let file_name = path.file_name()?.to_str()?;
    if !scanner.is_log_file(file_name) {
        return None;
    }
    path.parent().map(Path::to_path_buf)
}

/// Generates every page, then keeps pages up to date as logs change.
///
/// Blocks until the watcher's channel closes. `on_outcome` sees the result of
/// the initial run and of every rebuild.
pub fn watch(
    generator: &Generator,
    mut on_outcome: impl FnMut(&TeamOutcome),
) -> Result<(), ViewerError> {
    let scanner = generator.scanner();
    let root = std::fs::canonicalize(scanner.root())
        .map_err(|_| ViewerError::LogRootMissing(scanner.root().to_path_buf()))?;

    // Watch before the initial run so that writes during it are not lost
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let _ = tx.send(res);
    })?;
    watcher.watch(&root, RecursiveMode::Recursive)?;

    for outcome in &generator.run()?.teams {
        on_outcome(outcome);
    }
    log::info!("Watching {:?} for log changes", root);

    rebuild_on_events(generator, &root, &rx, &mut on_outcome);
    Ok(())
}

/// Regenerates the teams touched by `events` once they have been quiet for
/// [`DEBOUNCE`].
///
/// Returns when the sender side disconnects, after flushing any team still
/// pending.
fn rebuild_on_events(
    generator: &Generator,
    root: &Path,
    events: &Receiver<notify::Result<Event>>,
    on_outcome: &mut impl FnMut(&TeamOutcome),
) {
    let scanner = generator.scanner();
    let mut pending = BTreeSet::new();
    loop {
        let res = if pending.is_empty() {
            events.recv().map_err(|_| RecvTimeoutError::Disconnected)
        } else {
            events.recv_timeout(DEBOUNCE)
        };

        match res {
            Ok(Ok(event)) => {
                if matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    pending.extend(
                        event
                            .paths
                            .iter()
                            .filter_map(|p| team_dir_of(root, scanner, p)),
                    );
                }
            }
            Ok(Err(e)) => log::error!("watch error: {:?}", e),
            Err(timeout) => {
                for dir in std::mem::take(&mut pending) {
                    on_outcome(&generator.generate_team(&scanner.scan_team(&dir)));
                }
                if timeout == RecvTimeoutError::Disconnected {
                    break;
                }
            }
        }
    }
}
