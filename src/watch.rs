use anyhow::{Context, Result};
use notify::{recommended_watcher, Event, RecursiveMode, Watcher};
use std::{path::PathBuf, sync::mpsc, time::Duration};
use tracing::{debug, info, warn};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Block on filesystem changes under `paths`; each burst of events calls
/// `on_change` once. Returns when the watcher goes away or `on_change` fails.
pub fn watch_paths(paths: &[PathBuf], on_change: impl FnMut() -> Result<()>) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = recommended_watcher(tx).context("create watcher")?;
    let mut watched = 0;
    for p in paths {
        if !p.exists() { warn!(path = %p.display(), "not watching missing path"); continue; }
        watcher.watch(p, RecursiveMode::Recursive).with_context(|| format!("watch {}", p.display()))?;
        watched += 1;
    }
    if watched == 0 { anyhow::bail!("nothing to watch"); }
    info!(paths = watched, "watching for changes");
    on_events(&rx, on_change)
}

/// Debounce loop over a watcher channel. Ends when every sender is gone.
fn on_events(rx: &mpsc::Receiver<notify::Result<Event>>, mut on_change: impl FnMut() -> Result<()>) -> Result<()> {
    while let Ok(first) = rx.recv() {
        let mut relevant = is_relevant(&first);
        // drain the rest of the burst
        while let Ok(ev) = rx.recv_timeout(DEBOUNCE) { relevant |= is_relevant(&ev); }
        if !relevant { continue; }
        on_change()?;
    }
    Ok(())
}

fn is_relevant(ev: &notify::Result<Event>) -> bool {
    match ev {
        Ok(e) => !e.kind.is_access(),
        Err(err) => { debug!(error = %err, "watch error"); false }
    }
}
