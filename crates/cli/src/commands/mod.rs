pub mod fav;
pub mod list;
pub mod types;

use std::path::{self, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Subcommand, ValueEnum};
use filedeck_engine::FileListView;
use filedeck_lister::{BackgroundLister, ListOptions, ScanSource};
use filedeck_runtime::{default_scan_root, favourites::FavouriteStore};
use log::debug;

pub use fav::FavArgs;
pub use list::ListArgs;
pub use types::TypesArgs;

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List, rank and filter the entries of a source.
    ///
    /// Example:
    ///   filedeck list -q cust
    ///   filedeck list --source propath /app/src /app/lib --only p,i
    List(ListArgs),

    /// Show every entry type of a source with its count.
    Types(TypesArgs),

    /// Manage favourite files and folders.
    Fav(FavArgs),
}

/// Which location to explore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// One directory, walked recursively
    #[default]
    Local,
    /// Compilation output directory, walked recursively
    Compilation,
    /// Each directory flat
    Propath,
    /// Each unique directory flat
    Everywhere,
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Directories to list (defaults to the current directory)
    #[arg(value_name = "ROOTS")]
    pub roots: Vec<PathBuf>,

    /// Kind of location the roots describe
    #[arg(long, value_enum, default_value_t = SourceKind::Local)]
    pub source: SourceKind,

    /// Include dot-files and dot-directories
    #[arg(long)]
    pub hidden: bool,

    /// Extra ignore file, in gitignore syntax
    #[arg(long = "ignore-file", value_name = "PATH")]
    pub ignore_files: Vec<PathBuf>,
}

impl SourceArgs {
    pub fn scan_source(&self) -> CommandResult<ScanSource> {
        let mut roots = self
            .roots
            .iter()
            .map(|p| path::absolute(p).with_context(|| format!("Invalid root {}", p.display())))
            .collect::<CommandResult<Vec<_>>>()?;

        if roots.is_empty() {
            roots.push(default_scan_root());
        }

        Ok(match self.source {
            SourceKind::Local | SourceKind::Compilation if roots.len() > 1 => {
                bail!("{:?} source takes a single root", self.source)
            }
            SourceKind::Local => ScanSource::Local(roots.remove(0)),
            SourceKind::Compilation => ScanSource::Compilation(roots.remove(0)),
            SourceKind::Propath => ScanSource::Propath(roots),
            SourceKind::Everywhere => ScanSource::Everywhere(roots),
        })
    }

    pub fn list_options(&self, current: Option<PathBuf>) -> CommandResult<ListOptions> {
        let favourites = match FavouriteStore::new() {
            Some(store) => store.paths().into_iter().collect(),
            None => Default::default(),
        };

        let current = current
            .map(|p| path::absolute(&p).with_context(|| format!("Invalid path {}", p.display())))
            .transpose()?;

        Ok(ListOptions {
            show_hidden: self.hidden,
            favourites,
            current,
            extra_ignore_files: self.ignore_files.clone(),
            num_threads: None,
        })
    }

    /// List the source in the background and wait for the result. Also
    /// returns the source label.
    pub fn load(&self, current: Option<PathBuf>) -> CommandResult<(FileListView, &'static str)> {
        let source = self.scan_source()?;
        let options = self.list_options(current)?;
        let label = source.label();
        debug!("listing {label} ({:?})", source.roots());

        let mut lister = BackgroundLister::new();
        let mut view = FileListView::default();

        lister.request(source, options)?;
        lister.merge_blocking(&mut view)?;

        Ok((view, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(roots: &[&str], source: SourceKind) -> SourceArgs {
        SourceArgs {
            roots: roots.iter().map(PathBuf::from).collect(),
            source,
            hidden: false,
            ignore_files: Vec::new(),
        }
    }

    #[test]
    fn local_source_needs_one_root() {
        let err = args(&["/a", "/b"], SourceKind::Local)
            .scan_source()
            .unwrap_err();
        assert_eq!(err.to_string(), "Local source takes a single root");
    }

    #[test]
    fn multi_root_sources_keep_roots() {
        let source = args(&["/a", "/b"], SourceKind::Propath)
            .scan_source()
            .unwrap();
        assert_eq!(
            source,
            ScanSource::Propath(vec![PathBuf::from("/a"), PathBuf::from("/b")])
        );
    }

    #[test]
    fn no_roots_means_current_directory() {
        let source = args(&[], SourceKind::Compilation).scan_source().unwrap();
        assert_eq!(source, ScanSource::Compilation(default_scan_root()));
    }
}
