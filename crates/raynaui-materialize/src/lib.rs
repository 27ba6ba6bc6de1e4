//! Writes generated component bundles to disk and manages the baseline
//! project layout they expect.

mod atomic;
mod backup;
mod errors;
mod layout;
mod materializer;

pub use atomic::write_bytes_atomic;
pub use backup::{BACKUP_MARKER, backup_path_for};
pub use errors::{MaterializeError, MaterializeResult, WriteError};
pub use layout::{
    LayoutReport, ProjectLayout, REQUIRED_DIRS, SCAFFOLD_DIRS, ScaffoldReport, UTILS_CONTENT,
    UTILS_FILE,
};
pub use materializer::{BatchWriteReport, FileMaterializer, WriteReport};
