mod error;
mod excludes;
mod record;
mod walker;

pub use error::{ScanError, ScanFailure};
pub use excludes::{IgnoreEngine, IgnoreOptions};
pub use record::FileRecord;
pub use walker::{ScanContext, ScanRoot, walk_parallel};
