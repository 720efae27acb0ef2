// src/path.rs - Tagged field paths and nested value lookup

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Named record field
    Key(String),
    /// Position inside a list
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Address of a field inside the configuration record.
///
/// Renders as the dotted form consumers key on, e.g.
/// `config.MACHINE_PICK_POSITIONS.2.NAME`.
///
/// # Examples
///
/// ```rust
/// use cobot_cell::path::FieldPath;
///
/// let path = FieldPath::parse("config.MACHINE_PICK_POSITIONS")
///     .index(2)
///     .key("NAME");
/// assert_eq!(path.to_string(), "config.MACHINE_PICK_POSITIONS.2.NAME");
/// assert_eq!(FieldPath::parse(&path.to_string()), path);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Empty path addressing the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path; all-digit segments become list indices
    pub fn parse(dotted: &str) -> Self {
        let segments = dotted
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(segment.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Child path through a named field
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Child path through a list index
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// Segments from the root down
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read the value at `path`; `None` when any step is missing
pub fn get<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments().iter().try_fold(root, |current, segment| match (current, segment) {
        (Value::Object(map), segment) => map.get(&segment.to_string()),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    })
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// Existing arrays are indexed in place (appending when the index equals the
/// length); anything else on the way is replaced by an object keyed by the
/// segment text.
pub fn set(root: &mut Value, path: &FieldPath, value: Value) {
    let mut current = root;
    for segment in path.segments() {
        current = step_mut(current, segment);
    }
    *current = value;
}

fn step_mut<'a>(current: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    let in_array = match (&*current, segment) {
        (Value::Array(items), PathSegment::Index(index)) => *index <= items.len(),
        _ => false,
    };

    if in_array {
        match (current, segment) {
            (Value::Array(items), PathSegment::Index(index)) => {
                if *index == items.len() {
                    items.push(Value::Null);
                }
                &mut items[*index]
            }
            _ => unreachable!("checked above"),
        }
    } else {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        match current {
            Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
            _ => unreachable!("value was just replaced by an object"),
        }
    }
}
