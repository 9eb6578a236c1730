use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use bitflags::bitflags;
use filedeck_fs::FileRecord;
use thiserror::Error;

bitflags! {
    /// Entry attributes shown as row decorations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryFlags: u8 {
        /// Pinned by the user; sorts first.
        const FAVOURITE = 0b0000_0001;
        const READ_ONLY = 0b0000_0010;
        /// The file currently open in the editor.
        const CURRENT   = 0b0000_0100;
        /// Dot-file or dot-directory.
        const HIDDEN    = 0b0000_1000;
    }
}

/// Category of an entry, used for icons and the type-filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryType {
    Folder,
    /// `.p`
    Procedure,
    /// `.i`
    Include,
    /// `.cls`
    Class,
    /// `.w`
    Window,
    /// `.t`
    Trigger,
    /// `.r`, compiled r-code
    Compiled,
    /// `.d`, data dump
    Data,
    /// `.df`, schema definition
    Schema,
    /// `.lst`, compile listing
    Listing,
    /// `.xref`
    Xref,
    /// `.pl`, procedure library
    Library,
    /// `.pf` / `.ini`
    Params,
    Log,
    Xml,
    Html,
    Text,
    Other,
}

impl EntryType {
    pub const ALL: [EntryType; 18] = [
        EntryType::Folder,
        EntryType::Procedure,
        EntryType::Include,
        EntryType::Class,
        EntryType::Window,
        EntryType::Trigger,
        EntryType::Compiled,
        EntryType::Data,
        EntryType::Schema,
        EntryType::Listing,
        EntryType::Xref,
        EntryType::Library,
        EntryType::Params,
        EntryType::Log,
        EntryType::Xml,
        EntryType::Html,
        EntryType::Text,
        EntryType::Other,
    ];

    /// Classify a lowercase extension (without the dot).
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("p") => EntryType::Procedure,
            Some("i") => EntryType::Include,
            Some("cls") => EntryType::Class,
            Some("w") => EntryType::Window,
            Some("t") => EntryType::Trigger,
            Some("r") => EntryType::Compiled,
            Some("d") => EntryType::Data,
            Some("df") => EntryType::Schema,
            Some("lst") => EntryType::Listing,
            Some("xref") => EntryType::Xref,
            Some("pl") => EntryType::Library,
            Some("pf" | "ini") => EntryType::Params,
            Some("log") => EntryType::Log,
            Some("xml" | "xsd") => EntryType::Xml,
            Some("html" | "htm") => EntryType::Html,
            Some("txt") => EntryType::Text,
            _ => EntryType::Other,
        }
    }

    /// Classify a path by its extension, ignoring case.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|os| os.to_str())
            .map(|s| s.to_ascii_lowercase());
        Self::from_extension(ext.as_deref())
    }

    /// Short key used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            EntryType::Folder => "folder",
            EntryType::Procedure => "p",
            EntryType::Include => "i",
            EntryType::Class => "cls",
            EntryType::Window => "w",
            EntryType::Trigger => "t",
            EntryType::Compiled => "r",
            EntryType::Data => "d",
            EntryType::Schema => "df",
            EntryType::Listing => "lst",
            EntryType::Xref => "xref",
            EntryType::Library => "pl",
            EntryType::Params => "pf",
            EntryType::Log => "log",
            EntryType::Xml => "xml",
            EntryType::Html => "html",
            EntryType::Text => "txt",
            EntryType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryType::Folder => "Folder",
            EntryType::Procedure => "Procedure",
            EntryType::Include => "Include",
            EntryType::Class => "Class",
            EntryType::Window => "Window",
            EntryType::Trigger => "Trigger",
            EntryType::Compiled => "Compiled",
            EntryType::Data => "Data",
            EntryType::Schema => "Schema",
            EntryType::Listing => "Listing",
            EntryType::Xref => "Xref",
            EntryType::Library => "Library",
            EntryType::Params => "Params",
            EntryType::Log => "Log",
            EntryType::Xml => "Xml",
            EntryType::Html => "Html",
            EntryType::Text => "Text",
            EntryType::Other => "Other",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entry type {0:?}")]
pub struct ParseEntryTypeError(pub String);

impl FromStr for EntryType {
    type Err = ParseEntryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('.');
        EntryType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEntryTypeError(s.to_owned()))
    }
}

/// One row of the file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub full_path: PathBuf,
    pub entry_type: EntryType,
    pub flags: EntryFlags,
    /// Extra annotation drawn at the right of the row.
    pub sub_label: Option<String>,
}

impl FileEntry {
    pub fn new(
        name: impl Into<String>,
        full_path: impl Into<PathBuf>,
        entry_type: EntryType,
    ) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            entry_type,
            flags: EntryFlags::empty(),
            sub_label: None,
        }
    }

    /// Build an entry named after the last component of `path`, typed by
    /// its extension.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let full_path = path.into();
        let name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let entry_type = EntryType::from_path(&full_path);
        Self::new(name, full_path, entry_type)
    }

    pub fn folder(path: impl Into<PathBuf>) -> Self {
        let mut entry = Self::file(path);
        entry.entry_type = EntryType::Folder;
        entry
    }

    pub fn with_flags(mut self, flags: EntryFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_sub_label(mut self, label: impl Into<String>) -> Self {
        self.sub_label = Some(label.into());
        self
    }

    pub fn from_record(record: FileRecord) -> Self {
        let entry_type = if record.is_dir {
            EntryType::Folder
        } else {
            EntryType::from_extension(record.ext.as_deref())
        };

        let mut flags = EntryFlags::empty();
        flags.set(EntryFlags::READ_ONLY, record.read_only);
        flags.set(EntryFlags::HIDDEN, record.hidden_os);

        Self {
            name: record.name,
            full_path: record.full_path,
            entry_type,
            flags,
            sub_label: None,
        }
    }

    #[inline]
    pub fn is_favourite(&self) -> bool {
        self.flags.contains(EntryFlags::FAVOURITE)
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        self.entry_type == EntryType::Folder
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(EntryFlags::READ_ONLY)
    }

    #[inline]
    pub fn is_current(&self) -> bool {
        self.flags.contains(EntryFlags::CURRENT)
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
