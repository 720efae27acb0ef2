// src/rules/io.rs - Digital I/O wiring: range and pool-wide uniqueness

use super::{field, when, RuleTable};
use crate::config::CellConfig;
use crate::io::IoPort;
use crate::validators::{is_io_port_unique, valid_io_range};

pub(super) fn register<'a>(table: &mut RuleTable<'a>, cell: &'a CellConfig) {
    for &port in IoPort::ALL {
        table.rule(field(port.key()), port.label(), move || {
            when(port.is_relevant(cell), || {
                let io = cell.io.get(port);
                vec![valid_io_range(io), is_io_port_unique(port, io, cell)]
            })
        });
    }
}
