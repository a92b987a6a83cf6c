//! Utilities module.
//!
//! Path handling and source discovery shared by the cleaner and output.

mod paths;

pub use paths::{
    collect_source_files, normalize_display_path, relative_path, Discovery, WalkFailure,
};
