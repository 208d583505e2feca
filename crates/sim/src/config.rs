//! Simulation configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one simulated battle.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub content_dir: PathBuf,
    pub seed: u64,
    pub max_rounds: u32,
    pub player_species: String,
    pub enemy_species: String,
    pub level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            content_dir: battle_content::bundled_data_dir(),
            seed: 0x5eed,
            max_rounds: 50,
            player_species: "squire".to_owned(),
            enemy_species: "slime".to_owned(),
            level: 5,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Directory with species/spells/items data (default: bundled data)
    /// - `BATTLE_SEED` - RNG seed (default: 0x5eed)
    /// - `BATTLE_MAX_ROUNDS` - Round limit before the run is abandoned (default: 50)
    /// - `BATTLE_PLAYER_SPECIES` - Player combatant template (default: squire)
    /// - `BATTLE_ENEMY_SPECIES` - Enemy combatant template (default: slime)
    /// - `BATTLE_LEVEL` - Level both combatants are built at (default: 5)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = read_env::<u32>("BATTLE_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        if let Ok(species) = env::var("BATTLE_PLAYER_SPECIES") {
            config.player_species = species;
        }
        if let Ok(species) = env::var("BATTLE_ENEMY_SPECIES") {
            config.enemy_species = species;
        }
        if let Some(level) = read_env::<u32>("BATTLE_LEVEL") {
            config.level = level.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
