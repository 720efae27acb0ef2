// src/rules/feeder.rs - Feeder selection and feeder specific settings

use super::{field, numeric_between, when, RuleTable};
use crate::config::{CellConfig, FeederType};
use crate::validators::is_known_value;

/// Drawer pull-out distance limits in mm
const DRAWER_OPEN_DISTANCE: (f64, f64) = (50.0, 300.0);
const PRO_FEEDER_DRAWERS: (f64, f64) = (1.0, 20.0);
/// Pro feeder drawer pitch limits in mm
const PRO_FEEDER_PITCH: (f64, f64) = (20.0, 200.0);

pub(super) fn register<'a>(table: &mut RuleTable<'a>, cell: &'a CellConfig) {
    let drawer = cell.feeder == Some(FeederType::DrawerFeeder);
    let pro = cell.feeder == Some(FeederType::ProFeeder);

    table.rule(field("FEEDER"), "Feeder", move || {
        is_known_value(cell.feeder.as_ref(), FeederType::ALL)
    });

    let distance = numeric_between(DRAWER_OPEN_DISTANCE);
    table.rule(field("DRAWER_FEEDER.DRAWER_OPEN_DISTANCE"), "Drawer open distance", move || {
        when(drawer, || distance(&cell.drawer_feeder.drawer_open_distance))
    });
    table.rule(
        field("DRAWER_FEEDER.SECOND_DRAWER_OPEN_DISTANCE"),
        "Second drawer open distance",
        move || {
            when(cell.has_second_drawer(), || {
                distance(&cell.drawer_feeder.second_drawer_open_distance)
            })
        },
    );

    let drawers = numeric_between(PRO_FEEDER_DRAWERS);
    table.rule(field("PRO_FEEDER.NUMBER_OF_DRAWERS"), "Number of drawers", move || {
        when(pro, || drawers(&cell.pro_feeder.number_of_drawers))
    });

    let pitch = numeric_between(PRO_FEEDER_PITCH);
    table.rule(field("PRO_FEEDER.DRAWER_PITCH"), "Drawer pitch", move || {
        when(pro, || pitch(&cell.pro_feeder.drawer_pitch))
    });
}
