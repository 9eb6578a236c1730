use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::FileEntry;

/// Base ordering of the file list:
/// favourites, then folders, then writable entries, then by name.
pub fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.is_favourite()
        .cmp(&a.is_favourite())
        .then_with(|| b.is_folder().cmp(&a.is_folder()))
        .then_with(|| a.is_read_only().cmp(&b.is_read_only()))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Stable in-place base sort; entries that compare equal keep their
/// listing order, which also makes sorting idempotent.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

/// Case-insensitive name collation.
///
/// Accents only break ties: `"eclair" < "éclair" < "ecole"`. Names that
/// differ only by case compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| decomposed(a).cmp(decomposed(b)))
}

fn base_letters(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn decomposed(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd().flat_map(char::to_lowercase)
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
