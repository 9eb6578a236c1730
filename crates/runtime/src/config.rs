use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "filedeck";
pub const PROGRAM_LOG_LEVEL: &str = "FILEDECK_LOG_LEVEL";
/// Per-root ignore file, same syntax as `.gitignore`.
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".filedeckignore";

/// Batch size for sending records through the walker channel.
/// Larger batches reduce channel overhead but increase latency.
pub const BATCH_SIZE: usize = 64;

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(xdg_var).filter(|d| !d.is_empty()) {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix)
    }
}

/// Directory holding persistent per-user state (favourites).
pub fn filedeck_state_dir() -> PathBuf {
    xdg_or_home("XDG_STATE_HOME", ".local/state").join(PROGRAM_NAME)
}

/// Root used when no directory is given on the command line.
pub fn default_scan_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Patterns skipped while listing a project: VCS metadata, editor
/// backups and the usual build output folders.
pub const DEFAULT_PROJECT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    ".hg/",
    ".svn/",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    "*.bak",
    "*~",
    "node_modules/",
    "target/",
    "lost+found/",
];
