/// Row cursor over the visible rows of a filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    pub fn at(index: usize) -> Self {
        Self { index: Some(index) }
    }

    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Move down one row, wrapping to the top.
    pub fn next(&mut self, count: usize) -> Option<usize> {
        self.index = match (count, self.index) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) if i + 1 >= n => Some(0),
            (_, Some(i)) => Some(i + 1),
        };
        self.index
    }

    /// Move up one row, wrapping to the bottom.
    pub fn prev(&mut self, count: usize) -> Option<usize> {
        self.index = match (count, self.index) {
            (0, _) => None,
            (n, None) => Some(n - 1),
            (n, Some(0)) => Some(n - 1),
            (n, Some(i)) => Some(i.min(n) - 1),
        };
        self.index
    }

    /// Re-anchor after the visible row count changed.
    pub fn clamp(&mut self, count: usize) -> Option<usize> {
        self.index = match self.index {
            _ if count == 0 => None,
            Some(i) if i < count => Some(i),
            _ => Some(0),
        };
        self.index
    }
}
