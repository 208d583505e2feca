//! Data-driven battle content and loaders.
//!
//! This crate reads static battle content from RON/TOML data files:
//! - Species templates (RON)
//! - Spell definitions (RON)
//! - Item definitions (RON)
//! - Battle tuning parameters (TOML)
//!
//! Content is consumed by the battle session through a
//! [`Catalog`](battle_core::Catalog) and never appears in battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemLoader, LoadResult, SpeciesLoader, SpellLoader,
};

use std::path::{Path, PathBuf};

/// Directory holding the sample content shipped with this crate.
pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
