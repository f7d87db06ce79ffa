//! Error types for the posterior-rs library.
//!
//! This module defines all error types that can occur when constructing or
//! querying distributions and when folding evidence into a posterior.

use thiserror::Error;

/// The main error type for the posterior-rs library.
///
/// This enum represents all possible errors that can occur when building
/// probability mass functions, deriving cumulative distributions, or
/// updating hypotheses against observed data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PosteriorError {
    /// Error when a numeric statistic is requested over non-numeric outcomes.
    #[error("Non-numeric outcomes: cannot compute the {statistic}")]
    NonNumericOutcome {
        /// The statistic that was requested
        statistic: &'static str,
    },

    /// Error when a table-form likelihood has no row for a hypothesis.
    #[error("Unknown hypothesis '{hypothesis}': no likelihood entries for it")]
    UnknownHypothesis {
        /// The hypothesis that was looked up
        hypothesis: String,
    },

    /// Error when a table-form likelihood row has no entry for an observation key.
    #[error("Unknown observation '{observation}' under hypothesis '{hypothesis}'")]
    UnknownObservation {
        /// The hypothesis whose row was consulted
        hypothesis: String,
        /// The observation key that was missing
        observation: String,
    },

    /// Error when a probability argument falls outside [0, 1].
    #[error("Invalid probability: {value} (must be in range [0, 1])")]
    ProbabilityOutOfRange {
        /// The invalid probability value
        value: f64,
    },

    /// Error when a credibility level falls outside [0, 1].
    #[error("Invalid credibility: {value} (must be in range [0, 1])")]
    InvalidCredibility {
        /// The invalid credibility level
        value: f64,
    },

    /// Error when a construction weight is negative or not finite.
    #[error("Invalid weight: {weight} (must be finite and non-negative)")]
    InvalidWeight {
        /// The invalid weight value
        weight: f64,
    },

    /// Error when a likelihood factor is negative or not finite.
    #[error("Invalid likelihood: {value} (must be finite and non-negative)")]
    InvalidLikelihood {
        /// The invalid likelihood value
        value: f64,
    },

    /// Error when an operation requires probability mass but the total is zero.
    #[error("Degenerate distribution: total probability mass is zero")]
    DegenerateDistribution,

    /// Error when an operation requires at least one outcome.
    #[error("Empty distribution: at least one outcome is required")]
    EmptyDistribution,
}

/// A specialized `Result` type for posterior operations.
///
/// This is a convenience type alias for `Result<T, PosteriorError>`.
pub type Result<T> = std::result::Result<T, PosteriorError>;

impl PosteriorError {
    /// Create an error for a statistic requested over non-numeric outcomes.
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::non_numeric("mean");
    /// assert!(error.to_string().contains("mean"));
    /// ```
    pub fn non_numeric(statistic: &'static str) -> Self {
        Self::NonNumericOutcome { statistic }
    }

    /// Create an error for a hypothesis missing from a likelihood table.
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::unknown_hypothesis("bowl3");
    /// assert!(error.to_string().contains("bowl3"));
    /// ```
    pub fn unknown_hypothesis(hypothesis: impl Into<String>) -> Self {
        Self::UnknownHypothesis {
            hypothesis: hypothesis.into(),
        }
    }

    /// Create an error for an observation key missing from a hypothesis row.
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::unknown_observation("bowl1", "strawberry");
    /// assert!(error.to_string().contains("strawberry"));
    /// ```
    pub fn unknown_observation(
        hypothesis: impl Into<String>,
        observation: impl Into<String>,
    ) -> Self {
        Self::UnknownObservation {
            hypothesis: hypothesis.into(),
            observation: observation.into(),
        }
    }

    /// Create an error for a probability argument outside [0, 1].
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::probability_out_of_range(1.5);
    /// assert!(error.to_string().contains("1.5"));
    /// ```
    pub fn probability_out_of_range(value: f64) -> Self {
        Self::ProbabilityOutOfRange { value }
    }

    /// Create an error for a credibility level outside [0, 1].
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::invalid_credibility(-0.9);
    /// assert!(error.to_string().contains("-0.9"));
    /// ```
    pub fn invalid_credibility(value: f64) -> Self {
        Self::InvalidCredibility { value }
    }

    /// Create an error for a negative or non-finite construction weight.
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::invalid_weight(-2.0);
    /// assert!(error.to_string().contains("-2"));
    /// ```
    pub fn invalid_weight(weight: f64) -> Self {
        Self::InvalidWeight { weight }
    }

    /// Create an error for a negative or non-finite likelihood factor.
    ///
    /// # Example
    /// ```
    /// use posterior_rs::error::PosteriorError;
    ///
    /// let error = PosteriorError::invalid_likelihood(f64::NAN);
    /// assert!(error.to_string().contains("NaN"));
    /// ```
    pub fn invalid_likelihood(value: f64) -> Self {
        Self::InvalidLikelihood { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_error() {
        let error = PosteriorError::non_numeric("variance");
        assert_eq!(
            error.to_string(),
            "Non-numeric outcomes: cannot compute the variance"
        );
    }

    #[test]
    fn test_unknown_hypothesis_error() {
        let error = PosteriorError::unknown_hypothesis("bowl3");
        assert_eq!(
            error.to_string(),
            "Unknown hypothesis 'bowl3': no likelihood entries for it"
        );
    }

    #[test]
    fn test_unknown_observation_error() {
        let error = PosteriorError::unknown_observation("bowl1", "strawberry");
        assert_eq!(
            error.to_string(),
            "Unknown observation 'strawberry' under hypothesis 'bowl1'"
        );
    }

    #[test]
    fn test_probability_out_of_range_error() {
        let error = PosteriorError::probability_out_of_range(1.5);
        assert!(error.to_string().contains("1.5"));
        assert!(error.to_string().contains("[0, 1]"));
    }

    #[test]
    fn test_invalid_credibility_error() {
        let error = PosteriorError::invalid_credibility(2.0);
        assert!(error.to_string().contains("2"));
        assert!(error.to_string().contains("[0, 1]"));
    }

    #[test]
    fn test_invalid_weight_error() {
        let error = PosteriorError::invalid_weight(-2.0);
        assert!(error.to_string().contains("-2"));
        assert!(error.to_string().contains("non-negative"));
    }

    #[test]
    fn test_invalid_likelihood_error() {
        let error = PosteriorError::invalid_likelihood(f64::NAN);
        assert!(error.to_string().contains("NaN"));
    }

    #[test]
    fn test_degenerate_distribution_error() {
        let error = PosteriorError::DegenerateDistribution;
        assert_eq!(
            error.to_string(),
            "Degenerate distribution: total probability mass is zero"
        );
    }

    #[test]
    fn test_empty_distribution_error() {
        let error = PosteriorError::EmptyDistribution;
        assert_eq!(
            error.to_string(),
            "Empty distribution: at least one outcome is required"
        );
    }

    #[test]
    fn test_error_clone() {
        let error = PosteriorError::DegenerateDistribution;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }

    #[test]
    fn test_error_debug() {
        let error = PosteriorError::EmptyDistribution;
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("EmptyDistribution"));
    }

    #[test]
    fn test_error_partial_eq() {
        let error1 = PosteriorError::unknown_hypothesis("bowl1");
        let error2 = PosteriorError::unknown_hypothesis("bowl1");
        let error3 = PosteriorError::unknown_hypothesis("bowl2");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }
}
