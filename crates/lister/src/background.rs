use std::thread;

use anyhow::{Context, Result, anyhow};
use crossbeam::channel::{self, Receiver, TryRecvError};
use filedeck_engine::{FileEntry, FileListView};
use log::debug;

use crate::{ListOptions, ScanSource, list_entries};

struct PendingListing {
    generation: u64,
    rx: Receiver<Result<Vec<FileEntry>>>,
}

/// Runs listings off the calling thread and hands the newest one to a
/// [`FileListView`].
///
/// Every request gets a higher generation number. Only the newest request
/// keeps a receiver, so an older listing that finishes late has nowhere to
/// deliver and is dropped.
#[derive(Default)]
pub struct BackgroundLister {
    generation: u64,
    pending: Option<PendingListing>,
}

impl BackgroundLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listing `source`. Returns the generation of the new request.
    ///
    /// The generation only advances once the listing thread is running; a
    /// failed spawn leaves the previous request in flight.
    pub fn request(&mut self, source: ScanSource, options: ListOptions) -> Result<u64> {
        let generation = self.generation + 1;
        let (tx, rx) = channel::bounded(1);

        thread::Builder::new()
            .name(format!("filedeck-list-{generation}"))
            .spawn(move || {
                let result = list_entries(&source, &options);
                if tx.send(result).is_err() {
                    debug!("listing {generation} superseded; result discarded");
                }
            })
            .context("Failed to spawn listing thread")?;

        self.generation = generation;
        if let Some(old) = self.pending.replace(PendingListing { generation, rx }) {
            debug!("listing {} superseded by {generation}", old.generation);
        }

        Ok(generation)
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the newest request has not been merged yet.
    #[inline]
    pub fn is_listing(&self) -> bool {
        self.pending.is_some()
    }

    /// Merge the newest listing into `view` if it is ready. Returns the
    /// merged generation.
    pub fn try_merge(&mut self, view: &mut FileListView) -> Result<Option<u64>> {
        let Some(pending) = &self.pending else {
            return Ok(None);
        };

        let outcome = match pending.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => return Ok(None),
            Err(TryRecvError::Disconnected) => None,
        };

        self.finish(outcome, view).map(Some)
    }

    /// Wait for the newest listing and merge it into `view`.
    pub fn merge_blocking(&mut self, view: &mut FileListView) -> Result<Option<u64>> {
        let Some(pending) = &self.pending else {
            return Ok(None);
        };

        let outcome = pending.rx.recv().ok();
        self.finish(outcome, view).map(Some)
    }

    /// `outcome` is `None` when the listing thread died before sending.
    fn finish(
        &mut self,
        outcome: Option<Result<Vec<FileEntry>>>,
        view: &mut FileListView,
    ) -> Result<u64> {
        let Some(pending) = self.pending.take() else {
            return Err(anyhow!("no listing in flight"));
        };
        let generation = pending.generation;

        let entries = outcome
            .ok_or_else(|| anyhow!("listing thread {generation} exited without a result"))??;

        debug!("merging listing {generation}: {} entries", entries.len());
        view.refresh(entries);
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use filedeck_engine::Query;
    use tempfile::TempDir;

    use super::*;

    fn dir_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        dir
    }

    fn options() -> ListOptions {
        ListOptions {
            num_threads: Some(1),
            ..ListOptions::default()
        }
    }

    #[test]
    fn newest_request_wins() {
        let first = dir_with(&["old.p"]);
        let second = dir_with(&["new.p", "new.i"]);
        let mut lister = BackgroundLister::new();
        let mut view = FileListView::default();

        let g1 = lister
            .request(ScanSource::Local(first.path().to_path_buf()), options())
            .unwrap();
        let g2 = lister
            .request(ScanSource::Local(second.path().to_path_buf()), options())
            .unwrap();
        assert!(g2 > g1);
        assert!(lister.is_listing());

        assert_eq!(lister.merge_blocking(&mut view).unwrap(), Some(g2));
        assert!(!lister.is_listing());

        let filtered = view.apply(&Query::default());
        let names: Vec<_> = filtered.visible().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["new.i", "new.p"]);
    }

    #[test]
    fn generation_tracks_started_requests() {
        let dir = dir_with(&["a.p"]);
        let mut lister = BackgroundLister::new();
        let mut view = FileListView::default();
        assert_eq!(lister.generation(), 0);

        for expected in 1..=3 {
            let generation = lister
                .request(ScanSource::Local(dir.path().to_path_buf()), options())
                .unwrap();
            assert_eq!(generation, expected);
            assert_eq!(lister.generation(), expected);
        }

        assert_eq!(lister.merge_blocking(&mut view).unwrap(), Some(3));
        assert_eq!(lister.generation(), 3);
    }

    #[test]
    fn nothing_to_merge_without_a_request() {
        let mut lister = BackgroundLister::new();
        let mut view = FileListView::default();

        assert_eq!(lister.try_merge(&mut view).unwrap(), None);
        assert_eq!(lister.merge_blocking(&mut view).unwrap(), None);
    }

    #[test]
    fn try_merge_eventually_delivers() {
        let dir = dir_with(&["a.p"]);
        let mut lister = BackgroundLister::new();
        let mut view = FileListView::default();
        let generation = lister
            .request(ScanSource::Local(dir.path().to_path_buf()), options())
            .unwrap();

        let merged = loop {
            if let Some(g) = lister.try_merge(&mut view).unwrap() {
                break g;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        };

        assert_eq!(merged, generation);
        assert_eq!(view.total(), 1);
    }

    #[test]
    fn failed_listing_is_reported_once() {
        let dir = TempDir::new().unwrap();
        let mut lister = BackgroundLister::new();
        let mut view = FileListView::default();
        lister
            .request(ScanSource::Local(dir.path().join("gone")), options())
            .unwrap();

        assert!(lister.merge_blocking(&mut view).is_err());
        assert!(!lister.is_listing());
        assert_eq!(view.total(), 0);
    }
}
