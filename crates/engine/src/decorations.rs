use smallvec::SmallVec;

use crate::{EntryFlags, FileEntry};

/// Flags drawn as badges, in display order. `CURRENT` is shown as the row
/// highlight instead.
pub const FLAG_BADGES: &[(EntryFlags, &str)] = &[
    (EntryFlags::FAVOURITE, "favourite"),
    (EntryFlags::READ_ONLY, "read-only"),
    (EntryFlags::HIDDEN, "hidden"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDecoration<'a> {
    pub highlight: bool,
    pub badges: SmallVec<[&'static str; 4]>,
    pub sub_label: Option<&'a str>,
}

pub fn decorate(entry: &FileEntry) -> RowDecoration<'_> {
    let badges = FLAG_BADGES
        .iter()
        .filter(|(flag, _)| entry.flags.contains(*flag))
        .map(|&(_, label)| label)
        .collect();

    RowDecoration {
        highlight: entry.is_current(),
        badges,
        sub_label: entry.sub_label.as_deref(),
    }
}
