use smallvec::SmallVec;

/// Case-insensitive in-order subsequence test: every char of the query
/// must appear in `name`, in order, not necessarily adjacent.
///
/// `query_lower` must already be lowercased. An empty query matches
/// everything.
#[inline]
pub fn fully_matches(name: &str, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }

    if name.is_ascii() && query_lower.is_ascii() {
        let needle = query_lower.as_bytes();
        if needle.len() > name.len() {
            return false;
        }

        let mut at = 0;
        for b in name.bytes() {
            if b.to_ascii_lowercase() == needle[at] {
                at += 1;
                if at == needle.len() {
                    return true;
                }
            }
        }
        false
    } else {
        // Slow path: full Unicode lowercasing of the name.
        let mut needle = query_lower.chars().peekable();
        for c in name.chars().flat_map(char::to_lowercase) {
            if needle.peek() == Some(&c) {
                needle.next();
                if needle.peek().is_none() {
                    return true;
                }
            }
        }
        false
    }
}

/// Char indices of `name` consumed by the greedy subsequence match, for
/// highlighting. `None` when the query does not fully match.
pub fn match_positions(name: &str, query_lower: &str) -> Option<SmallVec<[usize; 8]>> {
    let mut positions = SmallVec::new();
    let mut needle = query_lower.chars().peekable();

    for (idx, c) in name.chars().enumerate() {
        for lower in c.to_lowercase() {
            if needle.peek() == Some(&lower) {
                needle.next();
                if positions.last() != Some(&idx) {
                    positions.push(idx);
                }
            }
        }
        if needle.peek().is_none() {
            break;
        }
    }

    needle.peek().is_none().then_some(positions)
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
