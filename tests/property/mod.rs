//! Property tests for the validation engine

#[path = "../common/mod.rs"]
mod common;

use cobot_cell::config::{FeederType, GridType, NamedPosition, PathPoint};
use cobot_cell::validators::{number_between, valid_position};
use cobot_cell::{validate, ErrorKind, FieldPath, IoAssignment, IoPort, IoType};
use proptest::prelude::*;

fn io_assignment() -> impl Strategy<Value = IoAssignment> {
    prop_oneof![
        Just(IoAssignment::controller(-1)),
        (-3i64..20).prop_map(IoAssignment::controller),
        (-3i64..10).prop_map(IoAssignment::flange),
    ]
}

fn form_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{1,8}",
        (-5000.0f64..5000.0).prop_map(|v| v.to_string()),
        (-10i64..400).prop_map(|v| v.to_string()),
    ]
}

fn position() -> impl Strategy<Value = Option<Vec<f64>>> {
    prop_oneof![
        Just(None),
        prop::collection::vec(-1000.0f64..1000.0, 0..9).prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn test_validate_is_total_and_repeatable(
        feeder in prop::option::of(prop::sample::select(FeederType::ALL.to_vec())),
        grid in prop::option::of(prop::sample::select(GridType::ALL.to_vec())),
        second_drawer in any::<bool>(),
        second_gripper in any::<bool>(),
        offset in form_text(),
        distance in form_text(),
        drops in prop::collection::vec(("[A-Za-z]{0,4}", position()), 0..12),
        waypoints in prop::collection::vec(position(), 0..12),
        ports in prop::collection::vec(io_assignment(), IoPort::ALL.len()),
    ) {
        let mut config = common::valid_config();
        let cell = &mut config.config;
        cell.feeder = feeder;
        cell.grid_type = grid;
        cell.drawer_feeder.has_second_drawer = second_drawer;
        cell.drawer_feeder.drawer_open_distance = distance;
        cell.gripper.has_second_gripper = second_gripper;
        cell.grid_y_offset = offset;
        cell.drop_off_positions = drops
            .into_iter()
            .map(|(name, position)| NamedPosition { name, position })
            .collect();
        cell.paths.machine_to_feeder = waypoints.into_iter().map(|position| PathPoint { position }).collect();
        let wiring: serde_json::Map<String, serde_json::Value> = IoPort::ALL
            .iter()
            .zip(ports)
            .map(|(port, io)| (port.key().to_string(), serde_json::json!(io)))
            .collect();
        cell.io = serde_json::from_value(serde_json::Value::Object(wiring)).unwrap();

        let first = validate(&config);
        let second = validate(&config);
        prop_assert_eq!(first.is_valid(), first.value.is_some());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_disabled_second_gripper_never_reports(
        finger_length in form_text(),
        open in io_assignment(),
        closed in io_assignment(),
    ) {
        let mut config = common::valid_config();
        config.config.gripper.has_second_gripper = false;
        config.config.gripper.gripper_2.finger_length = finger_length;
        config.config.io.do_gripper2_open = open;
        config.config.io.di_gripper2_is_closed = closed;

        let result = validate(&config);
        prop_assert!(result.is_valid());
        prop_assert!(!result.errors.has_errors_at(&FieldPath::parse("config.GRIPPER.GRIPPER_2")));
    }

    #[test]
    fn test_uniqueness_is_symmetric(value in 6i64..=16) {
        let mut config = common::valid_config();
        config.config.io.do_machine_start = IoAssignment::controller(value);
        config.config.io.do_machine_door_open = IoAssignment::controller(value);

        let result = validate(&config);
        let start = result.errors.error_at(&FieldPath::parse("config.DO_MACHINE_START"), "IO_PORT_NOT_UNIQUE");
        let door = result.errors.error_at(&FieldPath::parse("config.DO_MACHINE_DOOR_OPEN"), "IO_PORT_NOT_UNIQUE");
        prop_assert_eq!(start.is_some(), door.is_some());
        prop_assert!(start.is_some());

        config.config.io.do_machine_start = IoAssignment::controller(-1);
        let result = validate(&config);
        prop_assert!(result.errors.errors().iter().all(|error| error.kind != ErrorKind::IoPortNotUnique));
    }

    #[test]
    fn test_number_between_bounds_are_inclusive(min in -1000i64..1000, span in 0i64..1000) {
        let max = min + span;
        let (lo, hi) = (min as f64, max as f64);
        let expected = Some(ErrorKind::NumberBetween { min: lo, max: hi });

        prop_assert_eq!(number_between(&min.to_string(), lo, hi), None);
        prop_assert_eq!(number_between(&max.to_string(), lo, hi), None);
        prop_assert_eq!(number_between(&(min - 1).to_string(), lo, hi), expected.clone());
        prop_assert_eq!(number_between(&(max + 1).to_string(), lo, hi), expected);
    }

    #[test]
    fn test_position_needs_six_components(components in prop::collection::vec(-1e6f64..1e6, 0..12)) {
        let result = valid_position(Some(components.as_slice()));
        if components.len() == 6 {
            prop_assert_eq!(result, None);
        } else {
            prop_assert_eq!(result, Some(ErrorKind::InvalidCobotPosition));
        }
    }

    #[test]
    fn test_out_of_range_ports_echo_bounds(value in prop_oneof![-50i64..-1, 17i64..100]) {
        let mut config = common::valid_config();
        config.config.io.do_machine_start = IoAssignment::controller(value);

        let result = validate(&config);
        let error = result.errors.error_at(&FieldPath::parse("config.DO_MACHINE_START"), "IO_PORT_OUT_OF_RANGE");
        prop_assert_eq!(
            error.map(|error| error.kind.clone()),
            Some(ErrorKind::IoPortOutOfRange { kind: IoType::Controller, min: 1, max: 16 })
        );
    }
}
