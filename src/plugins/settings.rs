use crate::config::load_config;
use bevy::prelude::*;
use std::path::PathBuf;

/// Inserts `GameConfig`. Add it after `DefaultPlugins` so loading is logged.
pub struct SettingsPlugin {
    pub config_path: Option<PathBuf>,
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let config = load_config(self.config_path.as_deref());
        debug!(
            "Forest of {} trees in a {}-unit field",
            config.settings.tree_count,
            config.settings.field_half_extent.get() * 2.0
        );
        app.insert_resource(config);
    }
}
