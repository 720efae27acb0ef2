// src/validators.rs - Stateless field checks shared by every rule
//
// Each check returns `None` when the value passes and `Some(kind)` when it
// fails. Range checks ignore text that does not parse; pair them with
// `is_numeric` so an unparsable value is reported exactly once.

use crate::config::CellConfig;
use crate::io::{IoAssignment, IoPort};
use crate::tree::ErrorKind;

/// Number of components in a cobot position
pub const POSITION_COMPONENTS: usize = 6;

/// Parse form text as a finite number
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Fails with `REQUIRED` when the trimmed text is empty
pub fn required(text: &str) -> Option<ErrorKind> {
    if text.trim().is_empty() {
        Some(ErrorKind::Required)
    } else {
        None
    }
}

/// Fails with `MAX_LENGTH` when the text has more than `max` characters
pub fn max_length(text: &str, max: usize) -> Option<ErrorKind> {
    if text.chars().count() > max {
        Some(ErrorKind::MaxLength { max })
    } else {
        None
    }
}

/// Fails with `MIN_LENGTH` when the text has fewer than `min` characters
pub fn min_length(text: &str, min: usize) -> Option<ErrorKind> {
    if text.chars().count() < min {
        Some(ErrorKind::MinLength { min })
    } else {
        None
    }
}

/// Fails with `NOT_A_NUMBER` when the text does not parse
pub fn is_numeric(text: &str) -> Option<ErrorKind> {
    match parse_number(text) {
        Some(_) => None,
        None => Some(ErrorKind::NotANumber),
    }
}

/// Fails with `NUMBER_BETWEEN` when the parsed text lies outside `[min, max]`.
///
/// # Panics
///
/// Panics when `min > max`; that is a mistake in the rule table, not in the data.
pub fn number_between(text: &str, min: f64, max: f64) -> Option<ErrorKind> {
    assert!(min <= max, "number_between: min ({}) is greater than max ({})", min, max);

    let value = parse_number(text)?;
    if value < min || value > max {
        Some(ErrorKind::NumberBetween { min, max })
    } else {
        None
    }
}

/// Fails with `MIN_NUMBER` when the parsed text is below `min`
pub fn min_number(text: &str, min: f64) -> Option<ErrorKind> {
    let value = parse_number(text)?;
    if value < min {
        Some(ErrorKind::MinNumber { min })
    } else {
        None
    }
}

/// Fails with `MAX_NUMBER` when the parsed text is above `max`
pub fn max_number(text: &str, max: f64) -> Option<ErrorKind> {
    let value = parse_number(text)?;
    if value > max {
        Some(ErrorKind::MaxNumber { max })
    } else {
        None
    }
}

/// Fails with `INVALID_COBOT_POSITION` unless the position exists and has
/// exactly six finite components
pub fn valid_position(position: Option<&[f64]>) -> Option<ErrorKind> {
    match position {
        Some(components)
            if components.len() == POSITION_COMPONENTS && components.iter().all(|c| c.is_finite()) =>
        {
            None
        }
        _ => Some(ErrorKind::InvalidCobotPosition),
    }
}

/// Fails with `ARRAY_SIZE` when the list length lies outside `[min, max]`.
///
/// # Panics
///
/// Panics when `min > max`.
pub fn array_size<T>(list: &[T], min: usize, max: usize) -> Option<ErrorKind> {
    assert!(min <= max, "array_size: min ({}) is greater than max ({})", min, max);

    if list.len() < min || list.len() > max {
        Some(ErrorKind::ArraySize { min, max })
    } else {
        None
    }
}

/// Fails with `REQUIRED` unless a value is selected and it is one of `allowed`
pub fn is_known_value<T: PartialEq>(value: Option<&T>, allowed: &[T]) -> Option<ErrorKind> {
    match value {
        Some(value) if allowed.contains(value) => None,
        _ => Some(ErrorKind::Required),
    }
}

/// Fails with `IO_PORT_NOT_DEFINED` for the unassigned sentinel and with
/// `IO_PORT_OUT_OF_RANGE` when the port number is outside its connector's range
pub fn valid_io_range(io: &IoAssignment) -> Option<ErrorKind> {
    if !io.is_assigned() {
        return Some(ErrorKind::IoPortNotDefined);
    }

    let (min, max) = io.kind.range();
    if io.value < min || io.value > max {
        Some(ErrorKind::IoPortOutOfRange { kind: io.kind, min, max })
    } else {
        None
    }
}

/// Fails with `IO_PORT_NOT_UNIQUE` when another relevant port of the same pool
/// carries the same assignment. Unassigned ports never collide.
pub fn is_io_port_unique(port: IoPort, io: &IoAssignment, cell: &CellConfig) -> Option<ErrorKind> {
    if !io.is_assigned() {
        return None;
    }

    let collides = IoPort::ALL
        .iter()
        .copied()
        .filter(|other| *other != port && other.pool() == port.pool() && other.is_relevant(cell))
        .any(|other| cell.io.get(other) == io);

    if collides {
        Some(ErrorKind::IoPortNotUnique)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::IoType;

    #[test]
    fn test_required_trims() {
        assert_eq!(required(""), Some(ErrorKind::Required));
        assert_eq!(required("   "), Some(ErrorKind::Required));
        assert_eq!(required(" x "), None);
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        assert_eq!(max_length("abc", 3), None);
        assert_eq!(max_length("abcd", 3), Some(ErrorKind::MaxLength { max: 3 }));
        assert_eq!(min_length("ab", 2), None);
        assert_eq!(min_length("a", 2), Some(ErrorKind::MinLength { min: 2 }));
        // Characters, not bytes
        assert_eq!(max_length("äöü", 3), None);
    }

    #[test]
    fn test_is_numeric() {
        assert_eq!(is_numeric("12"), None);
        assert_eq!(is_numeric("-0.5"), None);
        assert_eq!(is_numeric(" 3e2 "), None);
        assert_eq!(is_numeric(""), Some(ErrorKind::NotANumber));
        assert_eq!(is_numeric("12mm"), Some(ErrorKind::NotANumber));
        assert_eq!(is_numeric("NaN"), Some(ErrorKind::NotANumber));
        assert_eq!(is_numeric("inf"), Some(ErrorKind::NotANumber));
    }

    #[test]
    fn test_number_between_bounds() {
        assert_eq!(number_between("50", 50.0, 300.0), None);
        assert_eq!(number_between("300", 50.0, 300.0), None);
        assert_eq!(
            number_between("49", 50.0, 300.0),
            Some(ErrorKind::NumberBetween { min: 50.0, max: 300.0 })
        );
        assert_eq!(
            number_between("301", 50.0, 300.0),
            Some(ErrorKind::NumberBetween { min: 50.0, max: 300.0 })
        );
        // Unparsable text is left to is_numeric
        assert_eq!(number_between("", 50.0, 300.0), None);
    }

    #[test]
    #[should_panic(expected = "greater than max")]
    fn test_number_between_inverted_bounds_panics() {
        number_between("1", 10.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "greater than max")]
    fn test_array_size_inverted_bounds_panics() {
        array_size::<u8>(&[], 5, 1);
    }

    #[test]
    fn test_one_sided_numbers() {
        assert_eq!(min_number("0", 0.0), None);
        assert_eq!(min_number("-1", 0.0), Some(ErrorKind::MinNumber { min: 0.0 }));
        assert_eq!(max_number("250", 250.0), None);
        assert_eq!(max_number("251", 250.0), Some(ErrorKind::MaxNumber { max: 250.0 }));
        assert_eq!(min_number("x", 0.0), None);
        assert_eq!(max_number("x", 0.0), None);
    }

    fn pos(components: &[f64]) -> Option<&[f64]> {
        Some(components)
    }

    #[test]
    fn test_valid_position() {
        assert_eq!(valid_position(pos(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])), None);
        assert_eq!(valid_position(pos(&[1.0, 2.0, 3.0, 4.0, 5.0])), Some(ErrorKind::InvalidCobotPosition));
        assert_eq!(
            valid_position(pos(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])),
            Some(ErrorKind::InvalidCobotPosition)
        );
        assert_eq!(
            valid_position(pos(&[1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN])),
            Some(ErrorKind::InvalidCobotPosition)
        );
        assert_eq!(valid_position(None), Some(ErrorKind::InvalidCobotPosition));
    }

    #[test]
    fn test_array_size() {
        assert_eq!(array_size::<u8>(&[], 1, 10), Some(ErrorKind::ArraySize { min: 1, max: 10 }));
        assert_eq!(array_size(&[1], 1, 10), None);
        assert_eq!(array_size(&[0; 10], 1, 10), None);
        assert_eq!(array_size(&[0; 11], 1, 10), Some(ErrorKind::ArraySize { min: 1, max: 10 }));
    }

    #[test]
    fn test_is_known_value() {
        let allowed = ["A", "B"];
        assert_eq!(is_known_value(Some(&"A"), &allowed), None);
        assert_eq!(is_known_value(Some(&"C"), &allowed), Some(ErrorKind::Required));
        assert_eq!(is_known_value(None, &allowed), Some(ErrorKind::Required));
    }

    #[test]
    fn test_valid_io_range() {
        assert_eq!(valid_io_range(&IoAssignment::controller(-1)), Some(ErrorKind::IoPortNotDefined));
        assert_eq!(valid_io_range(&IoAssignment::controller(1)), None);
        assert_eq!(valid_io_range(&IoAssignment::controller(16)), None);
        assert_eq!(
            valid_io_range(&IoAssignment::controller(17)),
            Some(ErrorKind::IoPortOutOfRange { kind: IoType::Controller, min: 1, max: 16 })
        );
        assert_eq!(valid_io_range(&IoAssignment::flange(6)), None);
        assert_eq!(
            valid_io_range(&IoAssignment::flange(7)),
            Some(ErrorKind::IoPortOutOfRange { kind: IoType::Flange, min: 1, max: 6 })
        );
        assert_eq!(
            valid_io_range(&IoAssignment::flange(0)),
            Some(ErrorKind::IoPortOutOfRange { kind: IoType::Flange, min: 1, max: 6 })
        );
    }

    #[test]
    fn test_io_uniqueness_is_symmetric() {
        let mut cell = CellConfig::default();
        cell.io.do_machine_start = IoAssignment::controller(2);
        cell.io.do_machine_door_open = IoAssignment::controller(2);

        let start = IoPort::DoMachineStart;
        let door = IoPort::DoMachineDoorOpen;
        assert_eq!(is_io_port_unique(start, cell.io.get(start), &cell), Some(ErrorKind::IoPortNotUnique));
        assert_eq!(is_io_port_unique(door, cell.io.get(door), &cell), Some(ErrorKind::IoPortNotUnique));

        cell.io.do_machine_door_open = IoAssignment::controller(-1);
        assert_eq!(is_io_port_unique(start, cell.io.get(start), &cell), None);
        assert_eq!(is_io_port_unique(door, cell.io.get(door), &cell), None);
    }

    #[test]
    fn test_io_uniqueness_respects_pool_and_type() {
        let mut cell = CellConfig::default();
        cell.io.do_machine_start = IoAssignment::controller(3);
        // Same number, other pool
        cell.io.di_machine_ready = IoAssignment::controller(3);
        // Same number, other connector
        cell.io.do_gripper1_open = IoAssignment::flange(3);

        for port in [IoPort::DoMachineStart, IoPort::DiMachineReady, IoPort::DoGripper1Open] {
            assert_eq!(is_io_port_unique(port, cell.io.get(port), &cell), None, "{}", port);
        }
    }

    #[test]
    fn test_io_uniqueness_skips_disabled_ports() {
        let mut cell = CellConfig::default();
        cell.io.do_gripper1_open = IoAssignment::flange(1);
        cell.io.do_gripper2_open = IoAssignment::flange(1);

        let port = IoPort::DoGripper1Open;
        assert_eq!(is_io_port_unique(port, cell.io.get(port), &cell), None);

        cell.gripper.has_second_gripper = true;
        assert_eq!(is_io_port_unique(port, cell.io.get(port), &cell), Some(ErrorKind::IoPortNotUnique));
    }
}
