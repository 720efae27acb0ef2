// src/config.rs - Cobot cell configuration record

use crate::error::{CobotError, Result};
use crate::io::IoPorts;
use crate::path::{self, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[cfg(feature = "json-schema")]
use schemars::JsonSchema;

/// A 6-component pose: three translations followed by three rotations
pub type Position = Vec<f64>;

// ============================================================================
// ROOT RECORD
// ============================================================================

/// Full configuration snapshot handed to the validation engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
pub struct CobotConfig {
    /// Cell setup
    #[serde(default)]
    pub config: CellConfig,
}

/// Cell setup: feeder, machine, grippers, layout, positions and wiring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct CellConfig {
    /// Selected part feeder
    pub feeder: Option<FeederType>,

    /// Drawer feeder settings
    pub drawer_feeder: DrawerFeederConfig,

    /// Pro feeder settings
    pub pro_feeder: ProFeederConfig,

    /// Machine tool settings
    pub machine: MachineConfig,

    /// Gripper selection and addons
    pub gripper: GripperConfig,

    /// Grid layout mode
    pub grid_type: Option<GridType>,

    /// Pinned grid X offset in mm
    pub grid_x_offset: String,

    /// Pinned grid Y offset in mm
    pub grid_y_offset: String,

    /// Pinned grid rotation in degrees
    pub grid_rotation: String,

    /// Named static grids
    pub static_grids: Vec<StaticGrid>,

    /// Static grid used by the (first) drawer or table
    pub static_grid_index: Option<usize>,

    /// Static grid used by the second drawer
    pub second_drawer_static_grid_index: Option<usize>,

    /// Fixed approach paths
    pub paths: PathsConfig,

    /// Positions where parts are picked out of the machine
    pub machine_pick_positions: Vec<MachinePosition>,

    /// Positions where parts are placed into the machine
    pub machine_place_positions: Vec<MachinePosition>,

    /// Positions where finished parts are dropped off
    pub drop_off_positions: Vec<NamedPosition>,

    /// Airpurge station
    pub airpurge: AirpurgeConfig,

    /// Clean station
    pub clean: CleanConfig,

    /// Named digital I/O assignments
    #[serde(flatten)]
    pub io: IoPorts,
}

impl CellConfig {
    /// Drawer feeder with its second drawer switched on
    pub fn has_second_drawer(&self) -> bool {
        self.feeder == Some(FeederType::DrawerFeeder) && self.drawer_feeder.has_second_drawer
    }

    /// Whether the grid mode is `mode`
    pub fn grid_is(&self, mode: GridType) -> bool {
        self.grid_type == Some(mode)
    }
}

// ============================================================================
// SELECTIONS
// ============================================================================

/// Part feeder variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeederType {
    /// Fixed table
    Table,
    /// One or two pull-out drawers
    DrawerFeeder,
    /// Motorized multi-drawer cabinet
    ProFeeder,
}

impl FeederType {
    /// All feeder variants
    pub const ALL: &'static [FeederType] = &[FeederType::Table, FeederType::DrawerFeeder, FeederType::ProFeeder];
}

/// Machine tool variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineType {
    /// Turning center, may carry a sub-spindle
    Lathe,
    /// Milling center with named fixture positions
    Mill,
}

impl MachineType {
    /// All machine variants
    pub const ALL: &'static [MachineType] = &[MachineType::Lathe, MachineType::Mill];
}

/// Gripper variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GripperType {
    /// Pneumatic parallel gripper
    Pneumatic,
    /// Electric parallel gripper
    Electric,
    /// Vacuum suction cup
    Vacuum,
}

impl GripperType {
    /// All gripper variants
    pub const ALL: &'static [GripperType] = &[GripperType::Pneumatic, GripperType::Electric, GripperType::Vacuum];

    /// Variants that can be mounted as the second gripper
    pub const SECOND: &'static [GripperType] = &[GripperType::Pneumatic, GripperType::Electric];
}

/// Grid layout modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridType {
    /// Grids selected from the static grid list
    Static,
    /// Grid computed from pinned offsets
    Pinned,
}

impl GridType {
    /// All grid modes
    pub const ALL: &'static [GridType] = &[GridType::Static, GridType::Pinned];
}

// ============================================================================
// FEEDERS
// ============================================================================

/// Drawer feeder settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct DrawerFeederConfig {
    /// Second drawer installed
    pub has_second_drawer: bool,

    /// Drawer pull-out distance in mm
    pub drawer_open_distance: String,

    /// Second drawer pull-out distance in mm
    pub second_drawer_open_distance: String,
}

/// Pro feeder settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ProFeederConfig {
    /// Number of drawers in the cabinet
    pub number_of_drawers: String,

    /// Vertical distance between drawers in mm
    pub drawer_pitch: String,
}

// ============================================================================
// MACHINE & GRIPPERS
// ============================================================================

/// Machine tool settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct MachineConfig {
    /// Machine variant
    #[serde(rename = "TYPE")]
    pub machine_type: Option<MachineType>,

    /// Sub-spindle installed
    pub has_sub_spindle: bool,

    /// Seconds to wait for the door to report open/closed
    pub door_timeout: String,
}

/// Gripper selection and addons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct GripperConfig {
    /// Primary gripper
    #[serde(rename = "GRIPPER_1")]
    pub gripper_1: Gripper,

    /// Second gripper mounted
    pub has_second_gripper: bool,

    /// Secondary gripper
    #[serde(rename = "GRIPPER_2")]
    pub gripper_2: Gripper,

    /// Optional stations
    pub addons: GripperAddons,
}

/// One gripper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Gripper {
    /// Gripper variant
    #[serde(rename = "TYPE")]
    pub gripper_type: Option<GripperType>,

    /// Finger length in mm
    pub finger_length: String,
}

/// Optional gripper stations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct GripperAddons {
    /// Airpurge station installed
    pub has_airpurge: bool,

    /// Clean station installed
    pub has_clean_station: bool,
}

/// Airpurge station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct AirpurgeConfig {
    /// Blow-off position
    pub position: Option<Position>,

    /// Blow-off duration in seconds
    pub duration: String,
}

/// Clean station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct CleanConfig {
    /// Cleaning position
    pub position: Option<Position>,

    /// Approach path
    pub path: Vec<PathPoint>,
}

// ============================================================================
// GRID & POSITIONS
// ============================================================================

/// One named static grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct StaticGrid {
    pub name: String,
    pub rows: String,
    pub columns: String,
    /// First cell of the grid
    pub origin: Option<Position>,
}

/// Waypoint wrapper used by every path list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct PathPoint {
    pub position: Option<Position>,
}

impl PathPoint {
    /// Waypoint at `position`
    pub fn at(position: Position) -> Self {
        Self { position: Some(position) }
    }
}

/// Fixed approach paths between the named locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct PathsConfig {
    pub home_to_feeder: Vec<PathPoint>,
    pub feeder_to_machine: Vec<PathPoint>,
    pub machine_to_feeder: Vec<PathPoint>,
}

/// Pick or place position inside the machine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct MachinePosition {
    pub name: String,
    pub position: Option<Position>,
    /// Approach path from the machine door
    pub path: Vec<PathPoint>,
}

/// Position with a display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct NamedPosition {
    pub name: String,
    pub position: Option<Position>,
}

// ============================================================================
// LOADING
// ============================================================================

impl CobotConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!("Loading cell configuration from {}", path.display());

        if text.trim().is_empty() {
            return Err(CobotError::Config(format!("{} is empty", path.display())));
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        }
    }

    /// Current value of the field at `path`, as the serialized record sees it
    pub fn value_at(&self, path: &FieldPath) -> Result<Option<serde_json::Value>> {
        let root = serde_json::to_value(self)?;
        Ok(path::get(&root, path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_loads_defaults() {
        let config = CobotConfig::from_yaml("config: {}").unwrap();
        assert_eq!(config, CobotConfig::default());
        assert!(config.config.machine_pick_positions.is_empty());
        assert_eq!(config.config.io.do_gripper1_open.value, crate::io::UNASSIGNED);
    }

    #[test]
    fn test_field_names_are_screaming_case() {
        let yaml = r#"
config:
  FEEDER: PRO_FEEDER
  PRO_FEEDER:
    NUMBER_OF_DRAWERS: "12"
  MACHINE:
    TYPE: LATHE
    HAS_SUB_SPINDLE: true
  GRID_TYPE: PINNED
  GRID_Y_OFFSET: "-12.5"
  DO_GRIPPER1_OPEN:
    type: flange
    value: 1
"#;
        let config = CobotConfig::from_yaml(yaml).unwrap();
        let cell = &config.config;
        assert_eq!(cell.feeder, Some(FeederType::ProFeeder));
        assert_eq!(cell.pro_feeder.number_of_drawers, "12");
        assert_eq!(cell.machine.machine_type, Some(MachineType::Lathe));
        assert!(cell.machine.has_sub_spindle);
        assert!(cell.grid_is(GridType::Pinned));
        assert_eq!(cell.grid_y_offset, "-12.5");
        assert_eq!(cell.io.do_gripper1_open, crate::io::IoAssignment::flange(1));
    }

    #[test]
    fn test_value_at_reads_nested_fields() {
        let mut config = CobotConfig::default();
        config.config.machine_pick_positions.push(MachinePosition {
            name: "vise".to_string(),
            ..Default::default()
        });

        let value = config
            .value_at(&FieldPath::parse("config.MACHINE_PICK_POSITIONS.0.NAME"))
            .unwrap();
        assert_eq!(value, Some(serde_json::json!("vise")));

        let missing = config
            .value_at(&FieldPath::parse("config.MACHINE_PICK_POSITIONS.3.NAME"))
            .unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_unknown_feeder_is_rejected() {
        assert!(CobotConfig::from_yaml("config:\n  FEEDER: CONVEYOR\n").is_err());
    }
}
