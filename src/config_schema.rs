// src/config_schema.rs - JSON schema export for the cell configuration record

use crate::config::CobotConfig;
use crate::error::Result;
use schemars::schema_for;
use std::fs;
use std::path::Path;
use tracing::info;

/// Render the configuration record's JSON schema
pub fn schema_json() -> Result<String> {
    let schema = schema_for!(CobotConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// Write the schema to `dir/cobot-config.schema.json`
pub fn generate_schema(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let target = dir.join("cobot-config.schema.json");
    fs::write(&target, schema_json()?)?;

    info!("Generated JSON schema at {}", target.display());
    Ok(())
}
