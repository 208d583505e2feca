//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            auto_resolve = false

            [damage]
            crit_chance = 0.25

            [flee]
            default_chance = 75.0
            "#,
        )
        .unwrap();

        assert!(!config.auto_resolve);
        assert_eq!(config.damage.crit_chance, 0.25);
        assert_eq!(config.damage.crit_multiplier, 1.5);
        assert_eq!(config.flee.default_chance, 75.0);
        assert_eq!(config.capture, BattleConfig::default().capture);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }
}
