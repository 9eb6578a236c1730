use crate::{FileEntry, Query};

/// Transient sort key used while a query is active to bubble the best
/// matches to the top. Lower ranks come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchRank {
    /// Name equals the query, ignoring case.
    Exact = 0,
    /// Name starts with the query's first char.
    SameFirstChar = 1,
    Other = 2,
}

/// Rank `name` against a non-empty query.
pub fn match_rank(name: &str, query: &Query) -> MatchRank {
    let (Some(first), Some(wanted)) = (name.chars().next(), query.first_char()) else {
        return MatchRank::Other;
    };

    if !first.to_uppercase().eq(wanted.to_uppercase()) {
        return MatchRank::Other;
    }

    if name.chars().flat_map(char::to_lowercase).eq(query.as_str().chars()) {
        MatchRank::Exact
    } else {
        MatchRank::SameFirstChar
    }
}

/// Display order for `entries` under `query`, as indices into `entries`.
///
/// With an empty query this is the identity. Otherwise entries are stably
/// sorted by [`MatchRank`] only, so each rank keeps the base order.
pub fn rerank(entries: &[FileEntry], query: &Query) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();

    if query.is_empty() {
        return order;
    }

    order.sort_by_cached_key(|&i| match_rank(&entries[i].name, query));
    order
}

#[cfg(test)]
#[path = "rank_tests.rs"]
mod tests;
