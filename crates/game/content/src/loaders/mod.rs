//! Content loaders for reading battle data from files.
//!
//! Each loader parses one file format into game-core types. The default
//! catalog and roster are also embedded in the binary so a battle can start
//! without any files on disk.

pub mod config;
pub mod roster;
pub mod spells;

pub use config::{ConfigLoader, Tuning};
pub use roster::RosterLoader;
pub use spells::{SpellCatalog, SpellLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
