use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{MigrateError, Result};
use crate::model::config::MigrationConfig;
use crate::services::package::write_atomic;

pub fn load(path: &Path) -> Result<MigrationConfig> {
    if !path.exists() {
        return Err(MigrateError::Config {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
        });
    }

    let data = fs::read_to_string(path)?;

    let config =
        serde_json::from_str::<MigrationConfig>(&data).map_err(|e| MigrateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(
        path = %path.display(),
        languages = config.languages.len(),
        assets = config.assets.len(),
        "migration config loaded"
    );
    Ok(config)
}

pub fn save(path: &Path, config: &MigrationConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    write_atomic(path, json.as_bytes())
}
