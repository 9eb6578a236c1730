use std::path::PathBuf;

use filedeck_fs::ScanRoot;
use hashbrown::HashSet;

/// Where a file panel lists its entries from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSource {
    /// Working directory, walked recursively.
    Local(PathBuf),
    /// Compilation output directory, walked recursively.
    Compilation(PathBuf),
    /// Every directory of the search path, direct children only.
    Propath(Vec<PathBuf>),
    /// Every known directory, each listed once, direct children only.
    Everywhere(Vec<PathBuf>),
}

impl ScanSource {
    pub fn label(&self) -> &'static str {
        match self {
            ScanSource::Local(_) => "Local path",
            ScanSource::Compilation(_) => "Compilation path",
            ScanSource::Propath(_) => "Propath",
            ScanSource::Everywhere(_) => "Everywhere",
        }
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self, ScanSource::Local(_) | ScanSource::Compilation(_))
    }

    /// Roots to walk, in order, without duplicates.
    pub fn roots(&self) -> Vec<ScanRoot> {
        match self {
            ScanSource::Local(path) | ScanSource::Compilation(path) => {
                vec![ScanRoot::recursive(path.clone())]
            }
            ScanSource::Propath(paths) | ScanSource::Everywhere(paths) => {
                let mut seen = HashSet::with_capacity(paths.len());
                paths
                    .iter()
                    .filter(|p| seen.insert(p.as_path()))
                    .map(|p| ScanRoot::flat(p.clone()))
                    .collect()
            }
        }
    }
}
