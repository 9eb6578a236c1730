mod decorations;
mod entry;
mod matcher;
mod query;
mod rank;
mod selection;
mod sort;
mod type_filter;
mod view;

pub use decorations::{FLAG_BADGES, RowDecoration, decorate};
pub use entry::{EntryFlags, EntryType, FileEntry, ParseEntryTypeError};
pub use matcher::{fully_matches, match_positions};
pub use query::Query;
pub use rank::{MatchRank, match_rank, rerank};
pub use selection::Selection;
pub use sort::{compare_entries, compare_names, sort_entries};
pub use type_filter::{ClickButton, CycleDirection, TypeFilterState};
pub use view::{FileListView, FilteredView};
