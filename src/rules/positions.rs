// src/rules/positions.rs - Approach paths, machine positions and drop-off positions

use super::{field, RuleTable};
use crate::config::{CellConfig, MachinePosition, MachineType};
use crate::path::FieldPath;
use crate::validators::{array_size, max_length, required, valid_position};

const NAME_MAX_LENGTH: usize = 100;
const HOME_TO_FEEDER: (usize, usize) = (0, 5);
const FEEDER_TO_MACHINE: (usize, usize) = (1, 10);
const MACHINE_TO_FEEDER: (usize, usize) = (1, 10);
const MACHINE_POSITIONS: (usize, usize) = (1, 10);
const MACHINE_POSITION_PATH: (usize, usize) = (0, 5);
const DROP_OFF_POSITIONS: (usize, usize) = (0, 10);

pub(super) fn register<'a>(table: &mut RuleTable<'a>, cell: &'a CellConfig) {
    let paths = &cell.paths;
    table.waypoints(field("PATHS.HOME_TO_FEEDER"), "Home to feeder path", &paths.home_to_feeder, HOME_TO_FEEDER, true);
    table.waypoints(
        field("PATHS.FEEDER_TO_MACHINE"),
        "Feeder to machine path",
        &paths.feeder_to_machine,
        FEEDER_TO_MACHINE,
        true,
    );
    table.waypoints(
        field("PATHS.MACHINE_TO_FEEDER"),
        "Machine to feeder path",
        &paths.machine_to_feeder,
        MACHINE_TO_FEEDER,
        true,
    );

    // Mills address several fixtures, so their positions need names
    let names_required = cell.machine.machine_type == Some(MachineType::Mill);
    register_machine_positions(
        table,
        field("MACHINE_PICK_POSITIONS"),
        "Machine pick position",
        &cell.machine_pick_positions,
        names_required,
    );
    register_machine_positions(
        table,
        field("MACHINE_PLACE_POSITIONS"),
        "Machine place position",
        &cell.machine_place_positions,
        names_required,
    );

    let drop_offs = &cell.drop_off_positions;
    table.rule(field("DROP_OFF_POSITIONS"), "Drop-off positions", move || {
        let (min, max) = DROP_OFF_POSITIONS;
        array_size(drop_offs, min, max)
    });
    for (i, drop_off) in drop_offs.iter().enumerate() {
        let path = field("DROP_OFF_POSITIONS").index(i);
        table.rule(path.clone().key("NAME"), format!("Drop-off position {} name", i + 1), move || {
            vec![required(&drop_off.name), max_length(&drop_off.name, NAME_MAX_LENGTH)]
        });
        table.rule(path.key("POSITION"), format!("Drop-off position {}", i + 1), move || {
            valid_position(drop_off.position.as_deref())
        });
    }
}

fn register_machine_positions<'a>(
    table: &mut RuleTable<'a>,
    path: FieldPath,
    label: &str,
    positions: &'a [MachinePosition],
    names_required: bool,
) {
    table.rule(path.clone(), format!("{}s", label), move || {
        let (min, max) = MACHINE_POSITIONS;
        array_size(positions, min, max)
    });

    for (i, position) in positions.iter().enumerate() {
        let item = path.clone().index(i);
        let item_label = format!("{} {}", label, i + 1);

        table.rule(item.clone().key("NAME"), format!("{} name", item_label), move || {
            vec![
                names_required.then(|| required(&position.name)).flatten(),
                max_length(&position.name, NAME_MAX_LENGTH),
            ]
        });
        table.rule(item.clone().key("POSITION"), item_label.clone(), move || {
            valid_position(position.position.as_deref())
        });
        table.waypoints(item.key("PATH"), &format!("{} path", item_label), &position.path, MACHINE_POSITION_PATH, true);
    }
}
