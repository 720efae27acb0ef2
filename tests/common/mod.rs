#![allow(dead_code)]

use cobot_cell::config::{MachinePosition, PathPoint};
use cobot_cell::CobotConfig;

/// Shipped example cell; passes every rule
pub fn valid_config() -> CobotConfig {
    CobotConfig::from_yaml(include_str!("../../configs/cell.example.yaml"))
        .expect("example configuration must parse")
}

/// A well-formed 6-component position
pub fn position() -> Vec<f64> {
    vec![100.0, 200.0, 300.0, 180.0, 0.0, 90.0]
}

/// Machine position with a name, a valid pose and no approach path
pub fn machine_position(name: &str) -> MachinePosition {
    MachinePosition {
        name: name.to_string(),
        position: Some(position()),
        path: vec![PathPoint::at(position())],
    }
}

/// Dotted paths of every error in the tree
pub fn error_paths(config: &CobotConfig) -> Vec<String> {
    cobot_cell::validate(config)
        .errors
        .errors()
        .iter()
        .map(|error| error.path.to_string())
        .collect()
}
