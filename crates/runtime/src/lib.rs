mod config;
pub mod favourites;
pub mod logging;

pub use config::{
    BATCH_SIZE, DEFAULT_IGNORE_FILE_NAME, DEFAULT_PROJECT_IGNORE_PATTERNS, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, default_scan_root, filedeck_state_dir, xdg_or_home,
};

pub use logging::init;
