// src/rules/grid.rs - Grid mode, pinned offsets and static grid selection
//
// Pinned mode requires the offsets, static mode requires a valid static grid
// selection; the two sets are never required together.

use super::{field, numeric_between, when, RuleTable};
use crate::config::{CellConfig, FeederType, GridType};
use crate::tree::ErrorKind;
use crate::validators::{is_known_value, max_length, required, valid_position};

/// Pinned grid offset limits in mm
const GRID_OFFSET: (f64, f64) = (-1000.0, 1000.0);
/// Pinned grid rotation limits in degrees
const GRID_ROTATION: (f64, f64) = (-180.0, 180.0);
/// Rows and columns of one static grid
const GRID_CELLS: (f64, f64) = (1.0, 50.0);
const NAME_MAX_LENGTH: usize = 100;

pub(super) fn register<'a>(table: &mut RuleTable<'a>, cell: &'a CellConfig) {
    let pinned = cell.grid_is(GridType::Pinned);
    let is_static = cell.grid_is(GridType::Static);

    table.rule(field("GRID_TYPE"), "Grid type", move || {
        is_known_value(cell.grid_type.as_ref(), GridType::ALL)
    });

    table.rule(field("GRID_TYPE"), "Grid type", move || {
        when(cell.has_second_drawer() && pinned, || {
            Some(ErrorKind::GridTypeMustBeStaticWhenHasSecondDrawerIsOn)
        })
    });

    table.rule(field("GRID_TYPE"), "Grid type", move || {
        when(cell.feeder == Some(FeederType::ProFeeder) && is_static, || {
            Some(ErrorKind::GridTypeMustBePinnedWhenUsingProFeeder)
        })
    });

    let offsets = [
        ("GRID_X_OFFSET", "Grid X offset", &cell.grid_x_offset, GRID_OFFSET),
        ("GRID_Y_OFFSET", "Grid Y offset", &cell.grid_y_offset, GRID_OFFSET),
        ("GRID_ROTATION", "Grid rotation", &cell.grid_rotation, GRID_ROTATION),
    ];
    for (key, label, text, bounds) in offsets {
        let check = numeric_between(bounds);
        table.rule(field(key), label, move || when(pinned, || check(text)));
    }

    // No size rule on STATIC_GRIDS itself: an empty list surfaces through the
    // grid index rules below as UNDEFINED_STATIC_GRID_CONFIGURATION.
    for (i, grid) in cell.static_grids.iter().enumerate() {
        let path = field("STATIC_GRIDS").index(i);
        let number = i + 1;

        table.rule(path.clone().key("NAME"), format!("Static grid {} name", number), move || {
            when(is_static, || vec![required(&grid.name), max_length(&grid.name, NAME_MAX_LENGTH)])
        });

        let cells = numeric_between(GRID_CELLS);
        table.rule(path.clone().key("ROWS"), format!("Static grid {} rows", number), move || {
            when(is_static, || cells(&grid.rows))
        });
        table.rule(path.clone().key("COLUMNS"), format!("Static grid {} columns", number), move || {
            when(is_static, || cells(&grid.columns))
        });

        table.rule(path.key("ORIGIN"), format!("Static grid {} origin", number), move || {
            when(is_static, || valid_position(grid.origin.as_deref()))
        });
    }

    table.rule(field("STATIC_GRID_INDEX"), "Static grid", move || {
        when(is_static, || defined_grid(cell, cell.static_grid_index))
    });

    table.rule(field("SECOND_DRAWER_STATIC_GRID_INDEX"), "Second drawer static grid", move || {
        when(is_static && cell.has_second_drawer(), || {
            defined_grid(cell, cell.second_drawer_static_grid_index)
        })
    });
}

fn defined_grid(cell: &CellConfig, index: Option<usize>) -> Option<ErrorKind> {
    match index {
        Some(i) if i < cell.static_grids.len() => None,
        _ => Some(ErrorKind::UndefinedStaticGridConfiguration),
    }
}
