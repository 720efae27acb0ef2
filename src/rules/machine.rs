// src/rules/machine.rs - Machine tool type, sub-spindle and door settings

use super::{field, numeric_between, RuleTable};
use crate::config::{CellConfig, MachineType};
use crate::tree::ErrorKind;
use crate::validators::is_known_value;

/// Door open/close timeout limits in seconds
const DOOR_TIMEOUT: (f64, f64) = (1.0, 120.0);

pub(super) fn register<'a>(table: &mut RuleTable<'a>, cell: &'a CellConfig) {
    let machine = &cell.machine;

    table.rule(field("MACHINE.TYPE"), "Machine type", move || {
        is_known_value(machine.machine_type.as_ref(), MachineType::ALL)
    });

    table.rule(field("MACHINE.HAS_SUB_SPINDLE"), "Sub-spindle", move || {
        if machine.machine_type == Some(MachineType::Mill) && machine.has_sub_spindle {
            Some(ErrorKind::MillCannotHaveASubSpindle)
        } else {
            None
        }
    });

    let timeout = numeric_between(DOOR_TIMEOUT);
    table.rule(field("MACHINE.DOOR_TIMEOUT"), "Door timeout", move || timeout(&machine.door_timeout));
}
