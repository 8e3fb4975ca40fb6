//! Configuration validation logic.

use crate::errors::Error;
use crate::similarity::FieldWeights;
use std::path::{Path, PathBuf};

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the SQLite question store.
    pub database_path: PathBuf,
    /// Path to the JSON question collection.
    pub questions_path: PathBuf,
    /// Duplicate check threshold.
    pub duplicate_threshold: f64,
    /// Similar-question search threshold.
    pub similar_threshold: f64,
    /// Field weights for the overall score.
    pub weights: FieldWeights,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Both thresholds are between 0.0 and 1.0
    /// - Weights are finite, non-negative and not all zero
    /// - Neither path is empty
    /// - No NaN or infinite values
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        validate_threshold("duplicate threshold", self.duplicate_threshold)?;
        validate_threshold("similar threshold", self.similar_threshold)?;
        self.validate_weights()?;
        validate_path("Database path", &self.database_path)?;
        validate_path("Questions path", &self.questions_path)?;

        Ok(())
    }

    fn validate_weights(&self) -> Result<(), Error> {
        self.weights
            .validate()
            .map_err(|e| Error::Config(format!("Invalid field weights: {e}")))
    }
}

fn validate_threshold(name: &str, value: f64) -> Result<(), Error> {
    if value.is_nan() || value.is_infinite() {
        return Err(Error::Config(format!(
            "Invalid {name}: NaN and infinity are not allowed"
        )));
    }

    if !(0.0..=1.0).contains(&value) {
        return Err(Error::Config(format!(
            "Invalid {name}: {value} (must be between 0.0 and 1.0)"
        )));
    }

    Ok(())
}

fn validate_path(name: &str, path: &Path) -> Result<(), Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ConfigValidator {
        ConfigValidator {
            database_path: PathBuf::from("/test/q.db"),
            questions_path: PathBuf::from("/test/q.json"),
            duplicate_threshold: 0.75,
            similar_threshold: 0.3,
            weights: FieldWeights::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_threshold_range_validation() {
        let mut validator = valid();
        validator.duplicate_threshold = 1.5;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));

        let mut validator = valid();
        validator.similar_threshold = -0.1;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_valid_threshold_bounds() {
        let mut validator = valid();
        validator.duplicate_threshold = 0.0;
        validator.similar_threshold = 1.0;
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_threshold_nan_rejected() {
        let mut validator = valid();
        validator.duplicate_threshold = f64::NAN;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_threshold_infinity_rejected() {
        let mut validator = valid();
        validator.similar_threshold = f64::INFINITY;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut validator = valid();
        validator.weights.answer = -0.2;
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut validator = valid();
        validator.weights = FieldWeights {
            content: 0.0,
            explanation: 0.0,
            answer: 0.0,
        };
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_unnormalized_weights_accepted() {
        let mut validator = valid();
        validator.weights = FieldWeights {
            content: 5.0,
            explanation: 3.0,
            answer: 2.0,
        };
        assert!(validator.validate().is_ok());
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut validator = valid();
        validator.questions_path = PathBuf::new();
        assert!(matches!(validator.validate(), Err(Error::Config(_))));
    }
}
