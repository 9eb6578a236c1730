use std::{path::PathBuf, sync::Arc};

use crate::walker::ScanRoot;

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub full_path: PathBuf,
    /// File name
    pub name: String,
    /// Lowercase extension without dot e.g., 'cls'
    pub ext: Option<String>,
    /// Root this record was found under.
    pub root: Arc<ScanRoot>,
    pub is_dir: bool,
    /// Entry is a symlink; `is_dir` describes its target.
    pub is_symlink: bool,
    pub read_only: bool,
    pub hidden_os: bool,
    pub ignored_glob: bool,
}
