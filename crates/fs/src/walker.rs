use std::{
    fs::{self, read_dir},
    io::Result,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use filedeck_runtime::BATCH_SIZE;
use log::{debug, warn};

use crate::{
    error::{ScanError, ScanFailure},
    excludes::IgnoreEngine,
    record::FileRecord,
};

/// A directory to list. Flat roots only report their direct children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    pub path: PathBuf,
    pub recursive: bool,
}

impl ScanRoot {
    pub fn recursive(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: true,
        }
    }

    pub fn flat(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: false,
        }
    }
}

#[derive(Default)]
pub struct ScanContext {
    pub ignore: IgnoreEngine,
    /// Recurse into dot-directories as well.
    pub descend_hidden: bool,
}

struct WorkItem {
    dir: PathBuf,
    root: Arc<ScanRoot>,
    is_root: bool,
}

/// Multi-threaded parallel walk over `roots`.
///
/// Workers pull directories from a shared queue and push subdirectories of
/// recursive roots back onto it. Records are batched before sending to
/// reduce channel overhead. A root that cannot be read ends up in the
/// returned [`ScanError`] once every other root has been walked; unreadable
/// subdirectories are only logged.
pub fn walk_parallel(
    roots: Vec<ScanRoot>,
    file_tx: Sender<Vec<FileRecord>>,
    ctx: Arc<ScanContext>,
    num_threads: usize,
) -> std::result::Result<(), ScanError> {
    let total = roots.len();
    let (work_tx, work_rx) = channel::unbounded::<WorkItem>();
    let (fail_tx, fail_rx) = channel::unbounded::<ScanFailure>();

    // Track pending work items to know when to terminate
    let pending = Arc::new(AtomicUsize::new(total));

    for root in roots {
        let _ = work_tx.send(WorkItem {
            dir: root.path.clone(),
            root: Arc::new(root),
            is_root: true,
        });
    }

    debug!("[walk_parallel] {total} root(s), {num_threads} thread(s)");

    thread::scope(|s| {
        for _thread_id in 0..num_threads.max(1) {
            let work_rx = work_rx.clone();
            let work_tx = work_tx.clone();
            let file_tx = file_tx.clone();
            let fail_tx = fail_tx.clone();
            let ctx = Arc::clone(&ctx);
            let pending = Arc::clone(&pending);

            s.spawn(move || {
                worker_loop(work_rx, work_tx, file_tx, fail_tx, &ctx, &pending);
            });
        }
    });

    drop(fail_tx);
    let failures: Vec<ScanFailure> = fail_rx.try_iter().collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ScanError::Roots { failures, total })
    }
}

fn worker_loop(
    work_rx: channel::Receiver<WorkItem>,
    work_tx: channel::Sender<WorkItem>,
    file_tx: Sender<Vec<FileRecord>>,
    fail_tx: Sender<ScanFailure>,
    ctx: &ScanContext,
    pending: &AtomicUsize,
) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    loop {
        // Use timeout to periodically check if all work is done
        match work_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(item) => {
                if let Err(e) = scan_dir(&item, &work_tx, &mut batch, ctx, pending) {
                    if item.is_root {
                        let _ = fail_tx.send(ScanFailure {
                            path: item.dir.clone(),
                            source: e,
                        });
                    } else {
                        warn!("[walk] read_dir({:?}) failed: {e}", item.dir);
                    }
                }

                if batch.len() >= BATCH_SIZE {
                    let to_send = std::mem::take(&mut batch);
                    if file_tx.send(to_send).is_err() {
                        return;
                    }
                }

                if pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if pending.load(Ordering::Acquire) == 0 {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    if !batch.is_empty() {
        let _ = file_tx.send(batch);
    }
}

/// List one directory: collect its children into `batch` and queue the
/// subdirectories that should be walked too.
fn scan_dir(
    item: &WorkItem,
    work_tx: &channel::Sender<WorkItem>,
    batch: &mut Vec<FileRecord>,
    ctx: &ScanContext,
    pending: &AtomicUsize,
) -> Result<()> {
    let rd = read_dir(&item.dir)?;

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[walk] error reading entry in {:?}: {e}", item.dir);
                continue;
            }
        };

        match inspect_fs_entry(&entry, &item.root, ctx) {
            Ok(Some(record)) => {
                if should_recurse(&record, ctx) {
                    pending.fetch_add(1, Ordering::AcqRel);
                    let _ = work_tx.send(WorkItem {
                        dir: record.full_path.clone(),
                        root: Arc::clone(&item.root),
                        is_root: false,
                    });
                }
                batch.push(record);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("[walk] inspect_entry error in {:?}: {e}", item.dir);
            }
        }
    }

    Ok(())
}

fn should_recurse(f: &FileRecord, ctx: &ScanContext) -> bool {
    f.root.recursive
        && f.is_dir
        && !f.is_symlink
        && !f.ignored_glob
        && (ctx.descend_hidden || !f.hidden_os)
}

fn inspect_fs_entry(
    entry: &fs::DirEntry,
    root: &Arc<ScanRoot>,
    ctx: &ScanContext,
) -> Result<Option<FileRecord>> {
    let mut metadata = entry.metadata()?;
    let full_path = entry.path();

    let is_symlink = metadata.is_symlink();
    if is_symlink {
        // Classify links by their target; dangling links are skipped.
        metadata = match fs::metadata(&full_path) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        };
    }

    let is_dir = metadata.is_dir();
    if !is_dir && !metadata.is_file() {
        return Ok(None);
    }

    let name = match entry.file_name().to_str() {
        Some(s) => s.to_owned(),
        None => return Ok(None),
    };

    let ext = if is_dir {
        None
    } else {
        extension_of(&full_path)
    };

    Ok(Some(FileRecord {
        hidden_os: name.starts_with('.'),
        ignored_glob: ctx.ignore.is_ignored(&full_path, is_dir),
        read_only: metadata.permissions().readonly(),
        root: Arc::clone(root),
        full_path,
        name,
        ext,
        is_dir,
        is_symlink,
    }))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|os| os.to_str())
        .map(|s| s.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
