pub mod range_types;

use crate::game_logic::errors::{DarkwoodError, DarkwoodResult};
use crate::resources::GameConfig;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use validator::Validate;

pub fn get_config_path() -> DarkwoodResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or(DarkwoodError::ConfigDirNotFound)?;
    path.push("darkwood");
    fs::create_dir_all(&path)?;
    path.push("config.toml");
    Ok(path)
}

/// Read and validate a config file
pub fn read_config(path: &Path) -> DarkwoodResult<GameConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str::<GameConfig>(&contents)?;
    config
        .validate()
        .map_err(|errors| DarkwoodError::InvalidConfig {
            reason: errors.to_string(),
        })?;
    Ok(config)
}

/// Load from `explicit` or the default location, falling back to defaults on any problem
pub fn load_config(explicit: Option<&Path>) -> GameConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match get_config_path() {
            Ok(path) => path,
            Err(err) => {
                warn!("No config location available ({err}), using defaults");
                return GameConfig::default();
            }
        },
    };

    if explicit.is_none() && !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return GameConfig::default();
    }

    match read_config(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            warn!("Ignoring config at {}: {err}", path.display());
            GameConfig::default()
        }
    }
}

pub fn save_config(config: &GameConfig, path: &Path) -> DarkwoodResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("darkwood-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn test_save_then_read_preserves_settings() {
        let path = scratch_path("roundtrip");
        let mut config = GameConfig::default();
        config.settings.tree_count = 123;

        save_config(&config, &path).unwrap();
        let loaded = read_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.settings.tree_count, 123);
        assert_eq!(loaded.settings.pursuer_model_path, "models/Bob.glb");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = scratch_path("invalid");
        fs::write(&path, "[settings]\ntree_count = 0\n").unwrap();

        let result = read_config(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(DarkwoodError::InvalidConfig { .. })));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let path = scratch_path("out-of-range");
        fs::write(
            &path,
            "[settings]\nwalk_speed = -3.0\nrun_speed = 900.0\ndwell_threshold = 0\npursuer_speed = -1.0\n",
        )
        .unwrap();

        let result = read_config(&path);
        let fallback = load_config(Some(&path));
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(DarkwoodError::InvalidConfig { .. })));
        assert_eq!(fallback.settings.walk_speed.get(), 0.05);
        assert_eq!(fallback.settings.dwell_threshold.get(), 100);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let path = scratch_path("malformed");
        fs::write(&path, "this is not = = toml").unwrap();

        let config = load_config(Some(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(config.settings.tree_count, 400);
    }

    #[test]
    fn test_missing_explicit_config_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/darkwood/config.toml")));

        assert_eq!(config.settings.walk_speed.get(), 0.05);
    }
}
