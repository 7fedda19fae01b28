use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

pub(crate) const TMP_MARKER: &str = ".rebreaktmp.";

const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes temp files next to `document` left behind by interrupted writes.
pub(crate) fn purge_tmp(document: &Path) {
    let (Some(dir), Some(stem)) = (document.parent(), document.file_name().and_then(|n| n.to_str()))
    else {
        return;
    };
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    let prefix = format!("{stem}{TMP_MARKER}");

    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let now = SystemTime::now();
    let mut removed = 0_usize;
    let mut failed = 0_usize;

    for entry in entries.flatten() {
        let is_tmp = entry.file_type().is_ok_and(|kind| kind.is_file())
            && entry.file_name().to_str().is_some_and(|name| name.starts_with(&prefix));

        if !is_tmp || !is_stale(&entry.path(), now) {
            continue;
        }

        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Failed to remove temp file");
                failed += 1;
            },
        }
    }

    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary settings files");
    }
}

fn is_stale(path: &Path, now: SystemTime) -> bool {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > STALE_AFTER)
}
