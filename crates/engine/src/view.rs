use std::path::Path;

use log::debug;

use crate::{EntryFlags, FileEntry, Query, TypeFilterState, fully_matches, rerank, sort_entries};

/// Base-sorted entries plus the type filter state of one file panel.
#[derive(Debug, Clone, Default)]
pub struct FileListView {
    entries: Vec<FileEntry>,
    types: TypeFilterState,
}

/// Result of filtering a [`FileListView`]: every entry in display order
/// with its visibility bit.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    entries: &'a [FileEntry],
    order: Vec<usize>,
    visible: Vec<bool>,
    visible_count: usize,
}

impl FileListView {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        let mut view = Self::default();
        view.refresh(entries);
        view
    }

    /// Replace the listing. Entries are base-sorted and the type filter is
    /// rebuilt from their types.
    pub fn refresh(&mut self, mut entries: Vec<FileEntry>) {
        sort_entries(&mut entries);
        let replaced = self.types.rebuild(entries.iter().map(|e| e.entry_type));
        debug!(
            "refreshed file list: {} entries, {} types (filter {})",
            entries.len(),
            self.types.len(),
            if replaced { "reset" } else { "kept" }
        );
        self.entries = entries;
    }

    #[inline]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn type_filter(&self) -> &TypeFilterState {
        &self.types
    }

    pub fn type_filter_mut(&mut self) -> &mut TypeFilterState {
        &mut self.types
    }

    /// Whether `entry` passes both the name filter and the type filter.
    #[inline]
    pub fn is_visible(&self, entry: &FileEntry, query: &Query) -> bool {
        self.types.is_active(entry.entry_type) && fully_matches(&entry.name, query.as_str())
    }

    /// Rank and filter the base-sorted entries for `query`.
    pub fn apply(&self, query: &Query) -> FilteredView<'_> {
        let order = rerank(&self.entries, query);
        let visible: Vec<bool> = order
            .iter()
            .map(|&i| self.is_visible(&self.entries[i], query))
            .collect();
        let visible_count = visible.iter().filter(|v| **v).count();

        debug!(
            "filter {:?}: {visible_count}/{} visible",
            query.as_str(),
            self.entries.len()
        );

        FilteredView {
            entries: &self.entries,
            order,
            visible,
            visible_count,
        }
    }

    /// Flip the favourite flag of the entry at `path`. Returns the new
    /// flag, or `None` if no entry has that path. The base order is left
    /// alone until the next [`resort`](Self::resort) or refresh.
    pub fn toggle_favourite(&mut self, path: &Path) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.full_path == path)?;
        entry.flags.toggle(EntryFlags::FAVOURITE);
        Some(entry.is_favourite())
    }

    /// Mark the entry at `path` as the current file and clear the mark
    /// everywhere else.
    pub fn mark_current(&mut self, path: Option<&Path>) {
        for entry in &mut self.entries {
            let current = path.is_some_and(|p| entry.full_path == p);
            entry.flags.set(EntryFlags::CURRENT, current);
        }
    }

    pub fn resort(&mut self) {
        sort_entries(&mut self.entries);
    }
}

impl<'a> FilteredView<'a> {
    /// All entries in display order, with their visibility.
    pub fn iter(&self) -> impl Iterator<Item = (&'a FileEntry, bool)> + '_ {
        let entries = self.entries;
        self.order
            .iter()
            .zip(&self.visible)
            .map(move |(&i, &v)| (&entries[i], v))
    }

    /// Visible entries in display order.
    pub fn visible(&self) -> impl Iterator<Item = &'a FileEntry> + '_ {
        self.iter().filter(|(_, v)| *v).map(|(e, _)| e)
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Number of rows, hidden ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
