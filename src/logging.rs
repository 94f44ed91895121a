//! Tracing setup. Output goes to a file because stdout is owned by the TUI.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Open (or create) the log file in append mode, creating parent directories.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Parse `level` as an `EnvFilter`, falling back to `info` on bad input.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once, before the UI starts.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let file = open_log_file(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("init tracing: {e}"))?;
    tracing::info!(log_file = %path.display(), "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_parents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("app.log");
        open_log_file(&path).expect("open");
        assert!(path.exists());
    }

    #[test]
    fn build_filter_accepts_directives() {
        let f = build_filter("usrlist_manager=debug,warn");
        assert!(f.to_string().contains("usrlist_manager=debug"));
    }
}
