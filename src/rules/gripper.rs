// src/rules/gripper.rs - Gripper selection and addon stations

use super::{field, numeric_between, when, RuleTable};
use crate::config::{CellConfig, Gripper, GripperType};
use crate::validators::{is_known_value, is_numeric, max_number, min_number, valid_position};

/// Finger length limits in mm
const FINGER_LENGTH: (f64, f64) = (0.0, 250.0);
/// Airpurge duration limits in seconds
const AIRPURGE_DURATION: (f64, f64) = (1.0, 30.0);
/// Clean station approach path length
const CLEAN_PATH: (usize, usize) = (0, 5);

pub(super) fn register<'a>(table: &mut RuleTable<'a>, cell: &'a CellConfig) {
    let gripper = &cell.gripper;
    let addons = &gripper.addons;

    register_gripper(table, "GRIPPER.GRIPPER_1", "Gripper 1", &gripper.gripper_1, GripperType::ALL, true);
    register_gripper(
        table,
        "GRIPPER.GRIPPER_2",
        "Gripper 2",
        &gripper.gripper_2,
        GripperType::SECOND,
        gripper.has_second_gripper,
    );

    table.rule(field("AIRPURGE.POSITION"), "Airpurge position", move || {
        when(addons.has_airpurge, || valid_position(cell.airpurge.position.as_deref()))
    });

    let duration = numeric_between(AIRPURGE_DURATION);
    table.rule(field("AIRPURGE.DURATION"), "Airpurge duration", move || {
        when(addons.has_airpurge, || duration(&cell.airpurge.duration))
    });

    table.rule(field("CLEAN.POSITION"), "Clean station position", move || {
        when(addons.has_clean_station, || valid_position(cell.clean.position.as_deref()))
    });

    table.waypoints(
        field("CLEAN.PATH"),
        "Clean station path",
        &cell.clean.path,
        CLEAN_PATH,
        addons.has_clean_station,
    );
}

fn register_gripper<'a>(
    table: &mut RuleTable<'a>,
    prefix: &str,
    label: &str,
    gripper: &'a Gripper,
    allowed: &'static [GripperType],
    applies: bool,
) {
    table.rule(field(&format!("{}.TYPE", prefix)), format!("{} type", label), move || {
        when(applies, || is_known_value(gripper.gripper_type.as_ref(), allowed))
    });

    table.rule(
        field(&format!("{}.FINGER_LENGTH", prefix)),
        format!("{} finger length", label),
        move || {
            when(applies, || {
                let (min, max) = FINGER_LENGTH;
                let text = &gripper.finger_length;
                vec![is_numeric(text), min_number(text, min), max_number(text, max)]
            })
        },
    );
}

#[cfg(test)]
mod tests {
    use crate::config::{CobotConfig, GripperType};
    use crate::rules::failing_paths;

    #[test]
    fn test_second_gripper_is_ignored_when_disabled() {
        let mut config = CobotConfig::default();
        config.config.gripper.gripper_2.gripper_type = Some(GripperType::Vacuum);
        config.config.gripper.gripper_2.finger_length = "-5".to_string();
        assert!(!failing_paths(&config).iter().any(|p| p.contains("GRIPPER_2")));

        config.config.gripper.has_second_gripper = true;
        let failing = failing_paths(&config);
        // Vacuum cannot be the second gripper
        assert!(failing.contains(&"config.GRIPPER.GRIPPER_2.TYPE".to_string()));
        assert!(failing.contains(&"config.GRIPPER.GRIPPER_2.FINGER_LENGTH".to_string()));
    }

    #[test]
    fn test_airpurge_follows_addon_flag() {
        let mut config = CobotConfig::default();
        assert!(!failing_paths(&config).iter().any(|p| p.starts_with("config.AIRPURGE")));

        config.config.gripper.addons.has_airpurge = true;
        let failing = failing_paths(&config);
        assert!(failing.contains(&"config.AIRPURGE.POSITION".to_string()));
        assert!(failing.contains(&"config.AIRPURGE.DURATION".to_string()));
    }
}
