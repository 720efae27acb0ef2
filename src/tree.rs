// src/tree.rs - Validation error records and the path-keyed error tree

use crate::io::IoType;
use crate::path::{self, FieldPath, PathSegment};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Every way a field can fail validation.
///
/// Serializes with a `type` tag holding the SCREAMING_SNAKE_CASE kind name
/// plus the kind's extra fields, e.g.
/// `{ "type": "NUMBER_BETWEEN", "min": 50, "max": 300 }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Empty text or missing selection
    Required,
    /// Text longer than `max` characters
    MaxLength { max: usize },
    /// Text shorter than `min` characters
    MinLength { min: usize },
    /// Text does not parse as a number
    NotANumber,
    /// Number below `min`
    MinNumber {
        #[serde(serialize_with = "whole_number")]
        min: f64,
    },
    /// Number above `max`
    MaxNumber {
        #[serde(serialize_with = "whole_number")]
        max: f64,
    },
    /// Number outside `[min, max]`
    NumberBetween {
        #[serde(serialize_with = "whole_number")]
        min: f64,
        #[serde(serialize_with = "whole_number")]
        max: f64,
    },
    /// List length outside `[min, max]`
    ArraySize { min: usize, max: usize },
    /// Position missing or not 6 numeric components
    InvalidCobotPosition,
    /// Port left at the unassigned sentinel
    IoPortNotDefined,
    /// Port number outside the connector's range
    IoPortOutOfRange { kind: IoType, min: i64, max: i64 },
    /// Another relevant port of the same pool uses the same port
    IoPortNotUnique,
    GridTypeMustBeStaticWhenHasSecondDrawerIsOn,
    GridTypeMustBePinnedWhenUsingProFeeder,
    MillCannotHaveASubSpindle,
    /// Selected static grid index does not exist
    UndefinedStaticGridConfiguration,
}

/// Integral bounds render as integers (`50`, not `50.0`)
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Largest magnitude below which every integer is exactly representable
    const EXACT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() < EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl ErrorKind {
    /// Kind name used as the key of the `types` map
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "REQUIRED",
            ErrorKind::MaxLength { .. } => "MAX_LENGTH",
            ErrorKind::MinLength { .. } => "MIN_LENGTH",
            ErrorKind::NotANumber => "NOT_A_NUMBER",
            ErrorKind::MinNumber { .. } => "MIN_NUMBER",
            ErrorKind::MaxNumber { .. } => "MAX_NUMBER",
            ErrorKind::NumberBetween { .. } => "NUMBER_BETWEEN",
            ErrorKind::ArraySize { .. } => "ARRAY_SIZE",
            ErrorKind::InvalidCobotPosition => "INVALID_COBOT_POSITION",
            ErrorKind::IoPortNotDefined => "IO_PORT_NOT_DEFINED",
            ErrorKind::IoPortOutOfRange { .. } => "IO_PORT_OUT_OF_RANGE",
            ErrorKind::IoPortNotUnique => "IO_PORT_NOT_UNIQUE",
            ErrorKind::GridTypeMustBeStaticWhenHasSecondDrawerIsOn => {
                "GRID_TYPE_MUST_BE_STATIC_WHEN_HAS_SECOND_DRAWER_IS_ON"
            }
            ErrorKind::GridTypeMustBePinnedWhenUsingProFeeder => "GRID_TYPE_MUST_BE_PINNED_WHEN_USING_PRO_FEEDER",
            ErrorKind::MillCannotHaveASubSpindle => "MILL_CANNOT_HAVE_A_SUB_SPINDLE",
            ErrorKind::UndefinedStaticGridConfiguration => "UNDEFINED_STATIC_GRID_CONFIGURATION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MaxLength { max } => write!(f, "{} (max {})", self.code(), max),
            ErrorKind::MinLength { min } => write!(f, "{} (min {})", self.code(), min),
            ErrorKind::MinNumber { min } => write!(f, "{} (min {})", self.code(), min),
            ErrorKind::MaxNumber { max } => write!(f, "{} (max {})", self.code(), max),
            ErrorKind::NumberBetween { min, max } => write!(f, "{} ({}..{})", self.code(), min, max),
            ErrorKind::ArraySize { min, max } => write!(f, "{} ({}..{})", self.code(), min, max),
            ErrorKind::IoPortOutOfRange { kind, min, max } => {
                write!(f, "{} ({} {}..{})", self.code(), kind, min, max)
            }
            _ => f.write_str(self.code()),
        }
    }
}

/// A failed rule: the error kind plus the field it belongs to.
///
/// Serialized as `{ type, label, name, ...extra }` where `name` is the dotted
/// field path, so a renderer can map it straight back to a form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub label: String,
    #[serde(rename = "name")]
    pub path: FieldPath,
}

/// One level of the error tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorNode {
    types: BTreeMap<&'static str, FieldError>,
    children: BTreeMap<PathSegment, ErrorNode>,
}

impl ErrorNode {
    /// Errors reported for exactly this field, keyed by kind name
    pub fn types(&self) -> &BTreeMap<&'static str, FieldError> {
        &self.types
    }

    /// Error reported for this field with the given kind name
    pub fn error(&self, code: &str) -> Option<&FieldError> {
        self.types.get(code)
    }

    /// Nested field or list item
    pub fn child(&self, segment: &PathSegment) -> Option<&ErrorNode> {
        self.children.get(segment)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.children.is_empty()
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a FieldError>) {
        out.extend(self.types.values());
        for child in self.children.values() {
            child.collect(out);
        }
    }
}

/// All validation errors of one pass, nested by field path.
///
/// Rendered to JSON it has the shape external form code pattern-matches on:
///
/// ```text
/// { "config": { "GRID_Y_OFFSET": { "types": { "NOT_A_NUMBER": { "type": ..., "label": ..., "name": ... } } } } }
/// { "config": { "MACHINE_PICK_POSITIONS": { "types": { ... }, "0": { "NAME": { "types": { ... } } } } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTree {
    root: ErrorNode,
}

impl ErrorTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error under its own path; a second error of the same kind at
    /// the same path replaces the first
    pub fn insert(&mut self, error: FieldError) {
        let mut node = &mut self.root;
        for segment in error.path.segments() {
            node = node.children.entry(segment.clone()).or_default();
        }
        node.types.insert(error.kind.code(), error);
    }

    /// Node at `path`, if any error lives at or below it
    pub fn get(&self, path: &FieldPath) -> Option<&ErrorNode> {
        path.segments()
            .iter()
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// Error of kind `code` reported at exactly `path`
    pub fn error_at(&self, path: &FieldPath, code: &str) -> Option<&FieldError> {
        self.get(path).and_then(|node| node.error(code))
    }

    /// Whether any error lives at or below `path`
    pub fn has_errors_at(&self, path: &FieldPath) -> bool {
        self.get(path).map(|node| !node.is_empty()).unwrap_or(false)
    }

    /// All errors in path order
    pub fn errors(&self) -> Vec<&FieldError> {
        let mut out = Vec::new();
        self.root.collect(&mut out);
        out
    }

    /// Number of errors in the tree
    pub fn len(&self) -> usize {
        self.errors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Render as nested JSON objects, list indices becoming object keys
    pub fn to_json(&self) -> Value {
        let mut root = Value::Object(Default::default());
        for error in self.errors() {
            let at = error.path.clone().key("types").key(error.kind.code());
            let rendered = serde_json::to_value(error).unwrap_or(Value::Null);
            path::set(&mut root, &at, rendered);
        }
        root
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
