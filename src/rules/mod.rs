// src/rules/mod.rs - Rule table built from one configuration snapshot
//
// The table is rebuilt for every validation pass: list-shaped fields get one
// rule per current item, so the set of index-scoped rules follows the data.

use crate::config::{CobotConfig, PathPoint};
use crate::path::FieldPath;
use crate::tree::ErrorKind;
use crate::validators::{array_size, is_numeric, number_between, valid_position};
use std::fmt;

mod feeder;
mod grid;
mod gripper;
mod io;
mod machine;
mod positions;

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Rule passed or does not apply to this configuration
    Pass,
    /// Single failure
    Fail(ErrorKind),
    /// Results of several checks; `None` entries are passes
    Many(Vec<Option<ErrorKind>>),
}

impl Outcome {
    /// Failures only
    pub fn into_errors(self) -> Vec<ErrorKind> {
        match self {
            Outcome::Pass => Vec::new(),
            Outcome::Fail(kind) => vec![kind],
            Outcome::Many(results) => results.into_iter().flatten().collect(),
        }
    }
}

impl From<Option<ErrorKind>> for Outcome {
    fn from(result: Option<ErrorKind>) -> Self {
        match result {
            Some(kind) => Outcome::Fail(kind),
            None => Outcome::Pass,
        }
    }
}

impl From<Vec<Option<ErrorKind>>> for Outcome {
    fn from(results: Vec<Option<ErrorKind>>) -> Self {
        Outcome::Many(results)
    }
}

/// Run `check` only when the rule applies; otherwise pass
pub fn when<O: Into<Outcome>>(applies: bool, check: impl FnOnce() -> O) -> Outcome {
    if applies {
        check().into()
    } else {
        Outcome::Pass
    }
}

/// One named, labeled check over the configuration snapshot
pub struct Rule<'a> {
    /// Field the errors are reported on
    pub path: FieldPath,
    /// Human readable field label
    pub label: String,
    check: Box<dyn Fn() -> Outcome + 'a>,
}

impl<'a> Rule<'a> {
    /// Rule reporting on `path`
    pub fn new<O, F>(path: FieldPath, label: impl Into<String>, check: F) -> Self
    where
        O: Into<Outcome>,
        F: Fn() -> O + 'a,
    {
        Self {
            path,
            label: label.into(),
            check: Box::new(move || check().into()),
        }
    }

    /// Failures this rule reports for the snapshot it was built from
    pub fn evaluate(&self) -> Vec<ErrorKind> {
        (self.check)().into_errors()
    }
}

impl fmt::Debug for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("path", &self.path)
            .field("label", &self.label)
            .finish()
    }
}

/// Ordered rule list for one configuration snapshot
#[derive(Debug, Default)]
pub struct RuleTable<'a> {
    rules: Vec<Rule<'a>>,
}

impl<'a> RuleTable<'a> {
    /// Build every rule for `config`.
    ///
    /// Construction only reads list lengths; all checks run in
    /// [`Rule::evaluate`].
    pub fn build(config: &'a CobotConfig) -> Self {
        let cell = &config.config;
        let mut table = Self::default();

        feeder::register(&mut table, cell);
        machine::register(&mut table, cell);
        gripper::register(&mut table, cell);
        grid::register(&mut table, cell);
        positions::register(&mut table, cell);
        io::register(&mut table, cell);

        table
    }

    /// Append a rule
    pub fn rule<O, F>(&mut self, path: FieldPath, label: impl Into<String>, check: F)
    where
        O: Into<Outcome>,
        F: Fn() -> O + 'a,
    {
        self.rules.push(Rule::new(path, label, check));
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Rule<'a>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Size rule for a waypoint list plus one position rule per waypoint
    pub(crate) fn waypoints(
        &mut self,
        path: FieldPath,
        label: &str,
        points: &'a [PathPoint],
        bounds: (usize, usize),
        applies: bool,
    ) {
        let (min, max) = bounds;
        assert!(min <= max, "{}: min size ({}) is greater than max size ({})", label, min, max);
        self.rule(path.clone(), label, move || when(applies, || array_size(points, min, max)));

        for (i, point) in points.iter().enumerate() {
            self.rule(
                path.clone().index(i).key("POSITION"),
                format!("{} waypoint {}", label, i + 1),
                move || when(applies, || valid_position(point.position.as_deref())),
            );
        }
    }
}

/// Path of a field below `config`
pub(crate) fn field(dotted: &str) -> FieldPath {
    FieldPath::parse(&format!("config.{}", dotted))
}

/// `NOT_A_NUMBER` or `NUMBER_BETWEEN` check for numeric form text.
///
/// # Panics
///
/// Panics at registration when `min > max`, whether or not the rule applies.
pub(crate) fn numeric_between((min, max): (f64, f64)) -> impl Fn(&str) -> Vec<Option<ErrorKind>> + Copy {
    assert!(min <= max, "numeric_between: min ({}) is greater than max ({})", min, max);
    move |text| vec![is_numeric(text), number_between(text, min, max)]
}

/// Paths of every rule that fails for `config`
#[cfg(test)]
pub(crate) fn failing_paths(config: &CobotConfig) -> Vec<String> {
    RuleTable::build(config)
        .iter()
        .filter(|rule| !rule.evaluate().is_empty())
        .map(|rule| rule.path.to_string())
        .collect()
}
