//! Command-line options and the runtime settings derived from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Page sizes offered by the page-size selector. The first one is the default.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [5, 10, 20];

pub const DEFAULT_LATENCY_MS: u64 = 1000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// usrlist-manager: browse, search and delete users in a terminal UI.
#[derive(Parser, Debug, Clone)]
#[command(name = "usrlist-manager", version, about)]
pub struct Cli {
    /// Initial number of users per page (5, 10 or 20).
    #[arg(long, env = "USRLIST_PAGE_SIZE", default_value_t = PAGE_SIZE_OPTIONS[0], value_parser = parse_page_size)]
    pub page_size: u32,

    /// Simulated latency for each list query, in milliseconds.
    #[arg(long, env = "USRLIST_LATENCY_MS", default_value_t = DEFAULT_LATENCY_MS)]
    pub latency_ms: u64,

    /// Quiet interval before search input is applied, in milliseconds.
    #[arg(long, env = "USRLIST_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Theme file (created with defaults when missing).
    #[arg(long, env = "USRLIST_THEME", default_value = "theme.conf")]
    pub theme: PathBuf,

    /// Keybindings file (created with defaults when missing).
    #[arg(long, env = "USRLIST_KEYBINDS", default_value = "keybinds.conf")]
    pub keybinds: PathBuf,

    /// Where log output goes; the terminal itself belongs to the UI.
    #[arg(long, env = "USRLIST_LOG_FILE", default_value = "usrlist-manager.log")]
    pub log_file: PathBuf,

    /// Log filter in `tracing_subscriber::EnvFilter` syntax.
    #[arg(long, env = "USRLIST_LOG", default_value = "info")]
    pub log_level: String,
}

fn parse_page_size(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid page size '{s}': {e}"))?;
    if PAGE_SIZE_OPTIONS.contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "page size must be one of {:?}, got {n}",
            PAGE_SIZE_OPTIONS
        ))
    }
}

/// Resolved settings used to build the application state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub items_per_page: u32,
    pub latency: Duration,
    pub debounce: Duration,
    pub theme_path: PathBuf,
    pub keybinds_path: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            items_per_page: PAGE_SIZE_OPTIONS[0],
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            theme_path: PathBuf::from("theme.conf"),
            keybinds_path: PathBuf::from("keybinds.conf"),
            log_file: PathBuf::from("usrlist-manager.log"),
            log_level: "info".to_string(),
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            items_per_page: cli.page_size,
            latency: Duration::from_millis(cli.latency_ms),
            debounce: Duration::from_millis(cli.debounce_ms),
            theme_path: cli.theme,
            keybinds_path: cli.keybinds,
            log_file: cli.log_file,
            log_level: cli.log_level,
        }
    }
}
