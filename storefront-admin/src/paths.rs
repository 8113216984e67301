//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "storefront";
const APPLICATION: &str = "storefront-admin";

/// Name of the log file written by the running process.
pub const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
pub const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory holding `config.json`.
///
/// - Linux: `$XDG_CONFIG_HOME/storefront-admin` or `~/.config/storefront-admin`
/// - macOS: `~/Library/Application Support/com.storefront.storefront-admin`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Directory holding logs.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives.
///
/// Call at startup before creating the new log file.
pub fn rotate_logs() -> io::Result<()> {
    match cache_dir() {
        Some(dir) => rotate_logs_in(&dir, MAX_OLD_LOGS),
        None => Ok(()),
    }
}

/// Rename `latest.log` in `dir` to a timestamped name and keep at most
/// `keep` archives, removing the oldest first.
pub fn rotate_logs_in(dir: &Path, keep: usize) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
        fs::rename(&latest, dir.join(format!("{stamp}.log")))?;
    }

    let mut archived: Vec<(PathBuf, Option<std::time::SystemTime>)> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok();
            (entry.path(), modified)
        })
        .collect();

    if archived.len() <= keep {
        return Ok(());
    }

    // Oldest first; names are timestamps, so they break ties.
    archived.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    let excess = archived.len() - keep;
    for (path, _) in archived.into_iter().take(excess) {
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("Failed to remove old log {}: {}", path.display(), e);
        }
    }
    Ok(())
}
