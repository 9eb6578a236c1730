mod background;
mod list;
mod source;

pub use background::BackgroundLister;
pub use list::{ListOptions, create_scan_context, list_entries};
pub use source::ScanSource;
