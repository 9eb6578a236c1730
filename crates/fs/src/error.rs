use std::{io, path::PathBuf};

use thiserror::Error;

/// A root directory that could not be listed.
#[derive(Debug, Error)]
#[error("{}: {source}", path.display())]
pub struct ScanFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Every root failure of one scan, reported together.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list {} of {total} root(s): {}", .failures.len(), join_failures(.failures))]
    Roots {
        failures: Vec<ScanFailure>,
        total: usize,
    },
    #[error("directory walker thread panicked")]
    WalkerPanicked,
}

impl ScanError {
    pub fn failures(&self) -> &[ScanFailure] {
        match self {
            ScanError::Roots { failures, .. } => failures,
            ScanError::WalkerPanicked => &[],
        }
    }
}

fn join_failures(failures: &[ScanFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
