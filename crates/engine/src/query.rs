/// Filter-box text, stored lower-cased.
///
/// Folded one char at a time, the same way names are folded when matched.
///
/// Passed explicitly to every filtering call; there is no process-wide
/// filter text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.chars().flat_map(char::to_lowercase).collect(),
        }
    }

    /// A missing query behaves like the empty one.
    pub fn from_option(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_default()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
