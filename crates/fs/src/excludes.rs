use filedeck_runtime::DEFAULT_PROJECT_IGNORE_PATTERNS;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

pub struct IgnoreEngine {
    matcher: Gitignore,
}

#[derive(Debug, Clone)]
pub struct IgnoreOptions {
    /// Whether to use the default ignore patterns
    pub use_default_patterns: bool,

    /// Paths to additional ignore files
    pub extra_ignore_files: Box<[PathBuf]>,
}

impl Default for IgnoreEngine {
    fn default() -> Self {
        IgnoreEngine {
            matcher: Gitignore::empty(),
        }
    }
}

impl Default for IgnoreOptions {
    fn default() -> Self {
        Self {
            use_default_patterns: true,
            extra_ignore_files: Box::default(),
        }
    }
}

impl IgnoreEngine {
    /// Build an IgnoreEngine rooted at `root`, with default project patterns and optional extra ignore files.
    ///
    /// Extra ignore files that do not exist are skipped.
    pub fn new(root: &Path, options: Option<IgnoreOptions>) -> Result<Self, ignore::Error> {
        let IgnoreOptions {
            use_default_patterns,
            extra_ignore_files,
        } = options.unwrap_or_default();
        let mut builder = GitignoreBuilder::new(root);

        if use_default_patterns {
            for pat in DEFAULT_PROJECT_IGNORE_PATTERNS {
                builder.add_line(None, pat)?;
            }
        }

        for path in extra_ignore_files.iter().filter(|p| p.is_file()) {
            if let Some(err) = builder.add(path) {
                return Err(err);
            }
        }

        Ok(IgnoreEngine {
            matcher: builder.build()?,
        })
    }

    #[inline]
    pub fn with_defaults(root: &Path) -> Result<Self, ignore::Error> {
        Self::new(root, None)
    }

    /// Match a single path. The walker never descends into an ignored
    /// directory, so parents do not need to be checked here.
    #[inline]
    #[must_use]
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(path, is_dir).is_ignore()
    }

    pub fn num_patterns(&self) -> u64 {
        self.matcher.num_ignores()
    }
}

#[cfg(test)]
#[path = "excludes_tests.rs"]
mod tests;
