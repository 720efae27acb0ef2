//! COBOT-CELL - Configuration validation engine for collaborative robot cells
//!
//! Checks a cell configuration (feeder, machine, grippers, grid layout,
//! positions and digital I/O wiring) against the cell's business rules and
//! reports every failure in a tree keyed by field path.
//!
//! # Feature Flags
//!
//! - **json-schema**: derive `JsonSchema` on the configuration record and
//!   build the `generate-schema` tool
//!
//! # Examples
//!
//! ```rust
//! use cobot_cell::{validate, CobotConfig};
//! use cobot_cell::path::FieldPath;
//!
//! let config = CobotConfig::from_yaml(r#"
//! config:
//!   GRID_TYPE: PINNED
//!   GRID_Y_OFFSET: ""
//! "#)?;
//!
//! let result = validate(&config);
//! assert!(!result.is_valid());
//! assert!(result
//!     .errors
//!     .error_at(&FieldPath::parse("config.GRID_Y_OFFSET"), "NOT_A_NUMBER")
//!     .is_some());
//! # Ok::<(), cobot_cell::CobotError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// CORE MODULES
// ============================================================================

/// Error handling for loading and exporting configurations
pub mod error;

/// The cell configuration record and its loaders
pub mod config;

/// Digital I/O assignments and the named port table
pub mod io;

/// Tagged field paths and nested value lookup
pub mod path;

// ============================================================================
// VALIDATION MODULES
// ============================================================================

/// Primitive field checks
pub mod validators;

/// The rule table built per configuration snapshot
pub mod rules;

/// Error records and the error tree
pub mod tree;

/// Rule evaluation into the error tree
pub mod aggregate;

/// Validation entry point
pub mod engine;

#[cfg(feature = "json-schema")]
#[cfg_attr(docsrs, doc(cfg(feature = "json-schema")))]
/// JSON schema export of the configuration record
pub mod config_schema;

// ============================================================================
// PUBLIC RE-EXPORTS
// ============================================================================

pub use config::{CellConfig, CobotConfig};
pub use engine::{validate, Validation};
pub use error::{CobotError, Result};
pub use io::{IoAssignment, IoPort, IoType};
pub use path::FieldPath;
pub use tree::{ErrorKind, ErrorTree, FieldError};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
