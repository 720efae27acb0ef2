// src/io.rs - Digital I/O assignments and the named port table

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "json-schema")]
use schemars::JsonSchema;

use crate::config::{CellConfig, FeederType};

/// Port value meaning "not wired yet"
pub const UNASSIGNED: i64 = -1;

/// Which physical connector a port number refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum IoType {
    /// Control box terminal block
    Controller,
    /// Tool flange connector
    Flange,
}

impl IoType {
    /// Inclusive port number range for this connector
    pub fn range(self) -> (i64, i64) {
        match self {
            IoType::Controller => (1, 16),
            IoType::Flange => (1, 6),
        }
    }
}

impl Default for IoType {
    fn default() -> Self {
        IoType::Controller
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoType::Controller => write!(f, "controller"),
            IoType::Flange => write!(f, "flange"),
        }
    }
}

/// Numbering space shared by every port of one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoPool {
    /// Digital inputs (`DI_*`)
    Input,
    /// Digital outputs (`DO_*`)
    Output,
}

/// A single port assignment, `{ "type": "controller", "value": 3 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(JsonSchema))]
pub struct IoAssignment {
    /// Connector the port lives on
    #[serde(rename = "type", default)]
    pub kind: IoType,

    /// Port number, [`UNASSIGNED`] when not wired
    #[serde(default = "default_unassigned")]
    pub value: i64,
}

impl IoAssignment {
    /// Assignment on the controller terminal block
    pub fn controller(value: i64) -> Self {
        Self { kind: IoType::Controller, value }
    }

    /// Assignment on the tool flange
    pub fn flange(value: i64) -> Self {
        Self { kind: IoType::Flange, value }
    }

    /// Whether the port has been wired at all
    pub fn is_assigned(&self) -> bool {
        self.value != UNASSIGNED
    }
}

impl Default for IoAssignment {
    fn default() -> Self {
        Self::controller(UNASSIGNED)
    }
}

fn default_unassigned() -> i64 {
    UNASSIGNED
}

macro_rules! io_ports {
    ($($variant:ident => $field:ident, $key:literal, $pool:ident, $label:literal;)*) => {
        /// Every named digital I/O field of the configuration record.
        ///
        /// Flattened into the cell configuration, so each port is addressed as
        /// `config.<KEY>`.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[cfg_attr(feature = "json-schema", derive(JsonSchema))]
        pub struct IoPorts {
            $(
                #[doc = $label]
                #[serde(rename = $key, default)]
                pub $field: IoAssignment,
            )*
        }

        /// Name of one I/O field in [`IoPorts`]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum IoPort {
            $(
                #[doc = $label]
                $variant,
            )*
        }

        impl IoPort {
            /// All ports in declaration order
            pub const ALL: &'static [IoPort] = &[$(IoPort::$variant,)*];

            /// Serialized field name
            pub fn key(self) -> &'static str {
                match self {
                    $(IoPort::$variant => $key,)*
                }
            }

            /// Human readable label
            pub fn label(self) -> &'static str {
                match self {
                    $(IoPort::$variant => $label,)*
                }
            }

            /// Pool the port number is allocated from
            pub fn pool(self) -> IoPool {
                match self {
                    $(IoPort::$variant => IoPool::$pool,)*
                }
            }
        }

        impl IoPorts {
            /// Assignment stored for `port`
            pub fn get(&self, port: IoPort) -> &IoAssignment {
                match port {
                    $(IoPort::$variant => &self.$field,)*
                }
            }
        }
    };
}

io_ports! {
    DoGripper1Open => do_gripper1_open, "DO_GRIPPER1_OPEN", Output, "Gripper 1 open output";
    DoGripper1Close => do_gripper1_close, "DO_GRIPPER1_CLOSE", Output, "Gripper 1 close output";
    DoGripper2Open => do_gripper2_open, "DO_GRIPPER2_OPEN", Output, "Gripper 2 open output";
    DoGripper2Close => do_gripper2_close, "DO_GRIPPER2_CLOSE", Output, "Gripper 2 close output";
    DoAirpurge => do_airpurge, "DO_AIRPURGE", Output, "Airpurge output";
    DoCleanStation => do_clean_station, "DO_CLEAN_STATION", Output, "Clean station output";
    DoMachineDoorOpen => do_machine_door_open, "DO_MACHINE_DOOR_OPEN", Output, "Machine door open output";
    DoMachineDoorClose => do_machine_door_close, "DO_MACHINE_DOOR_CLOSE", Output, "Machine door close output";
    DoMachineViseOpen => do_machine_vise_open, "DO_MACHINE_VISE_OPEN", Output, "Machine vise open output";
    DoMachineViseClose => do_machine_vise_close, "DO_MACHINE_VISE_CLOSE", Output, "Machine vise close output";
    DoMachineStart => do_machine_start, "DO_MACHINE_START", Output, "Machine start output";
    DoSubSpindleOpen => do_sub_spindle_open, "DO_SUB_SPINDLE_OPEN", Output, "Sub-spindle open output";
    DoSubSpindleClose => do_sub_spindle_close, "DO_SUB_SPINDLE_CLOSE", Output, "Sub-spindle close output";
    DiGripper1IsClosed => di_gripper1_is_closed, "DI_GRIPPER1_IS_CLOSED", Input, "Gripper 1 closed input";
    DiGripper2IsClosed => di_gripper2_is_closed, "DI_GRIPPER2_IS_CLOSED", Input, "Gripper 2 closed input";
    DiDoorIsOpened => di_door_is_opened, "DI_DOOR_IS_OPENED", Input, "Door opened input";
    DiDoorIsClosed => di_door_is_closed, "DI_DOOR_IS_CLOSED", Input, "Door closed input";
    DiViseIsOpened => di_vise_is_opened, "DI_VISE_IS_OPENED", Input, "Vise opened input";
    DiViseIsClosed => di_vise_is_closed, "DI_VISE_IS_CLOSED", Input, "Vise closed input";
    DiMachineReady => di_machine_ready, "DI_MACHINE_READY", Input, "Machine ready input";
    DiSubSpindleIsClosed => di_sub_spindle_is_closed, "DI_SUB_SPINDLE_IS_CLOSED", Input, "Sub-spindle closed input";
    DiDrawerIsClosed => di_drawer_is_closed, "DI_DRAWER_IS_CLOSED", Input, "Drawer closed input";
    DiSecondDrawerIsClosed => di_second_drawer_is_closed, "DI_SECOND_DRAWER_IS_CLOSED", Input, "Second drawer closed input";
    DiProFeederReady => di_pro_feeder_ready, "DI_PRO_FEEDER_READY", Input, "Pro feeder ready input";
}

impl IoPort {
    /// Whether the port is in use for the given cell.
    ///
    /// Ports belonging to a disabled feature are neither required nor part of
    /// the uniqueness scan.
    pub fn is_relevant(self, cell: &CellConfig) -> bool {
        use IoPort::*;

        match self {
            DoGripper2Open | DoGripper2Close | DiGripper2IsClosed => cell.gripper.has_second_gripper,
            DoAirpurge => cell.gripper.addons.has_airpurge,
            DoCleanStation => cell.gripper.addons.has_clean_station,
            DoSubSpindleOpen | DoSubSpindleClose | DiSubSpindleIsClosed => cell.machine.has_sub_spindle,
            DiDrawerIsClosed => cell.feeder == Some(FeederType::DrawerFeeder),
            DiSecondDrawerIsClosed => cell.has_second_drawer(),
            DiProFeederReady => cell.feeder == Some(FeederType::ProFeeder),
            _ => true,
        }
    }
}

impl fmt::Display for IoPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
