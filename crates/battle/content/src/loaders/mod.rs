//! Content loaders for reading battle data from files.
//!
//! Each loader turns one RON or TOML file into battle-core types;
//! [`ContentFactory`] ties them to a data directory.

pub mod config;
pub mod factory;
pub mod items;
pub mod species;
pub mod spells;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use species::SpeciesLoader;
pub use spells::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
