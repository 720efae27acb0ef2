// src/engine.rs - Validation entry point

use crate::aggregate::aggregate;
use crate::config::CobotConfig;
use crate::rules::RuleTable;
use crate::tree::ErrorTree;
use serde::Serialize;
use tracing::debug;

/// Result of one validation pass.
///
/// `value` holds the validated configuration when the tree is empty and is
/// `None` otherwise, so form code can gate submission on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub value: Option<CobotConfig>,
    pub errors: ErrorTree,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate one configuration snapshot.
///
/// Builds the rule table for this snapshot, evaluates every rule and folds the
/// failures into an [`ErrorTree`]. The input is never modified and the call
/// keeps no state, so repeated or concurrent calls are independent.
///
/// # Examples
///
/// ```rust
/// use cobot_cell::{validate, CobotConfig};
///
/// let config = CobotConfig::default();
/// let result = validate(&config);
/// assert!(!result.is_valid());
/// assert!(result.value.is_none());
/// ```
pub fn validate(config: &CobotConfig) -> Validation {
    let table = RuleTable::build(config);
    let errors = aggregate(&table);

    debug!("Evaluated {} rules, {} errors", table.len(), errors.len());

    if errors.is_empty() {
        Validation {
            value: Some(config.clone()),
            errors,
        }
    } else {
        Validation { value: None, errors }
    }
}

impl CobotConfig {
    /// Shorthand for [`validate`]
    pub fn validate(&self) -> Validation {
        validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_invalid_but_total() {
        let result = validate(&CobotConfig::default());
        assert!(!result.is_valid());
        assert!(result.value.is_none());
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_validation_serializes_value_and_errors() {
        let rendered = serde_json::to_value(validate(&CobotConfig::default())).unwrap();
        assert!(rendered["value"].is_null());
        assert!(rendered["errors"]["config"]["FEEDER"]["types"]["REQUIRED"].is_object());
    }
}
