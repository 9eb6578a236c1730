use std::{
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use anyhow::{Context, Result};
use crossbeam::channel;
use filedeck_engine::{EntryFlags, FileEntry};
use filedeck_fs::{
    FileRecord, IgnoreEngine, IgnoreOptions, ScanContext, ScanError, ScanRoot, walk_parallel,
};
use filedeck_runtime::DEFAULT_IGNORE_FILE_NAME;
use hashbrown::HashSet;
use log::debug;

use crate::ScanSource;

/// Knobs for one listing.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Keep dot-files and descend into dot-directories.
    pub show_hidden: bool,
    /// Paths flagged as favourites.
    pub favourites: HashSet<PathBuf>,
    /// File currently open in the editor.
    pub current: Option<PathBuf>,
    /// Ignore files read in addition to each root's `.filedeckignore`.
    pub extra_ignore_files: Vec<PathBuf>,
    /// Walker threads; defaults to the available parallelism.
    pub num_threads: Option<usize>,
}

pub fn create_scan_context(roots: &[ScanRoot], options: &ListOptions) -> Result<Arc<ScanContext>> {
    let base = roots
        .first()
        .map(|r| r.path.as_path())
        .unwrap_or_else(|| Path::new("."));

    let extra_ignore_files = roots
        .iter()
        .map(|r| r.path.join(DEFAULT_IGNORE_FILE_NAME))
        .chain(options.extra_ignore_files.iter().cloned())
        .collect();

    let ignore = IgnoreEngine::new(
        base,
        Some(IgnoreOptions {
            extra_ignore_files,
            ..IgnoreOptions::default()
        }),
    )
    .with_context(|| format!("Failed to load ignore rules for {}", base.display()))?;

    debug!("ignore engine: {} pattern(s)", ignore.num_patterns());

    Ok(Arc::new(ScanContext {
        ignore,
        descend_hidden: options.show_hidden,
    }))
}

/// List `source` into file-panel entries.
///
/// Ignored entries and, unless `show_hidden` is set, dot-entries are
/// dropped. The result is de-duplicated and ordered by full path, which is
/// the listing order the base sort falls back on for equal names.
pub fn list_entries(source: &ScanSource, options: &ListOptions) -> Result<Vec<FileEntry>> {
    let mut roots = source.roots();

    if !source.is_recursive() {
        roots.retain(|root| {
            let exists = root.path.is_dir();
            if !exists {
                debug!("skipping missing directory {}", root.path.display());
            }
            exists
        });
    }

    let flat_multi = !source.is_recursive() && roots.len() > 1;
    let ctx = create_scan_context(&roots, options)?;
    let records = collect_records(roots, ctx, options.num_threads)
        .with_context(|| format!("Failed to list {}", source.label()))?;

    let entries: Vec<FileEntry> = records
        .into_iter()
        .filter(|r| !r.ignored_glob && (options.show_hidden || !r.hidden_os))
        .map(|record| {
            let sub_label = sub_label(&record, flat_multi);
            let mut entry = FileEntry::from_record(record);
            entry.sub_label = sub_label;
            entry.flags.set(
                EntryFlags::FAVOURITE,
                options.favourites.contains(&entry.full_path),
            );
            entry.flags.set(
                EntryFlags::CURRENT,
                options.current.as_deref() == Some(entry.full_path.as_path()),
            );
            entry
        })
        .collect();

    debug!("{}: {} entries", source.label(), entries.len());
    Ok(entries)
}

fn collect_records(
    roots: Vec<ScanRoot>,
    ctx: Arc<ScanContext>,
    num_threads: Option<usize>,
) -> Result<Vec<FileRecord>> {
    let (file_tx, file_rx) = channel::unbounded::<Vec<FileRecord>>();

    let num_threads = num_threads.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    });

    let walker_handle = thread::spawn(move || walk_parallel(roots, file_tx, ctx, num_threads));

    let mut records = Vec::new();
    while let Ok(batch) = file_rx.recv() {
        records.extend(batch);
    }

    walker_handle
        .join()
        .map_err(|_| ScanError::WalkerPanicked)??;

    records.sort_by(|a, b| a.full_path.cmp(&b.full_path));
    records.dedup_by(|a, b| a.full_path == b.full_path);
    Ok(records)
}

/// Relative parent directory under a recursive root, or the root's own
/// name when several flat roots are listed together.
fn sub_label(record: &FileRecord, flat_multi: bool) -> Option<String> {
    let root = &record.root;

    if root.recursive {
        let parent = record.full_path.parent()?;
        let rel = parent.strip_prefix(&root.path).ok()?;
        (!rel.as_os_str().is_empty()).then(|| rel.to_string_lossy().into_owned())
    } else if flat_multi {
        let name = root
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.path.display().to_string());
        Some(name)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
