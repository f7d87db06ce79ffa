use crate::error::{PosteriorError, Result};
use crate::traits::Outcome;
use std::collections::BTreeMap;
use std::fmt;

/// A cumulative distribution function over a discrete, ordered outcome set.
///
/// Outcomes are stored sorted ascending beside their cumulative
/// probabilities; the probabilities are non-decreasing and the last one is
/// exactly 1. A `Cdf` is a read-only snapshot: build it from a
/// [`Pmf`](crate::Pmf) (or raw weights) once the evidence is in, then
/// answer quantile and credible-interval queries against it.
#[derive(Clone, Debug)]
pub struct Cdf<T: Outcome> {
    /// Outcomes sorted ascending.
    outcomes: Vec<T>,
    /// Cumulative probability at each outcome, ending at 1.
    cumulative: Vec<f64>,
}

impl<T: Outcome> Cdf<T> {
    /// Builds a cumulative distribution from outcome/weight pairs.
    ///
    /// The pairs may arrive unsorted and unnormalized: entries are sorted
    /// by outcome, duplicate outcomes coalesce by summing their weights,
    /// and the running totals are divided by the final total.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Cdf;
    ///
    /// let cdf = Cdf::from_weights([(3, 1.0), (1, 1.0), (2, 2.0)]).unwrap();
    /// assert_eq!(cdf.outcomes(), &[1, 2, 3]);
    /// assert!((cdf.likelihood(&2) - 0.75).abs() < 1e-9);
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::EmptyDistribution`] when no pairs are
    /// given, [`PosteriorError::InvalidWeight`] for a negative or
    /// non-finite weight, and [`PosteriorError::DegenerateDistribution`]
    /// when the weights sum to zero.
    pub fn from_weights<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut sorted: BTreeMap<T, f64> = BTreeMap::new();
        for (outcome, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PosteriorError::invalid_weight(weight));
            }
            *sorted.entry(outcome).or_insert(0.0) += weight;
        }
        if sorted.is_empty() {
            return Err(PosteriorError::EmptyDistribution);
        }

        let mut outcomes = Vec::with_capacity(sorted.len());
        let mut cumulative = Vec::with_capacity(sorted.len());
        let mut running = 0.0;
        for (outcome, weight) in sorted {
            running += weight;
            outcomes.push(outcome);
            cumulative.push(running);
        }
        if running == 0.0 {
            return Err(PosteriorError::DegenerateDistribution);
        }
        for value in &mut cumulative {
            *value /= running;
        }

        Ok(Self {
            outcomes,
            cumulative,
        })
    }

    /// P(X ≤ outcome): the cumulative probability at the highest stored
    /// outcome not exceeding the queried one.
    ///
    /// Returns 0 for a query below the smallest stored outcome.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Cdf;
    ///
    /// let cdf = Cdf::from_weights((1..=6).map(|face| (face, 1.0))).unwrap();
    /// assert!((cdf.likelihood(&3) - 0.5).abs() < 1e-9);
    /// assert_eq!(cdf.likelihood(&0), 0.0);
    /// assert!((cdf.likelihood(&100) - 1.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn likelihood(&self, outcome: &T) -> f64 {
        let position = self.outcomes.partition_point(|stored| stored <= outcome);
        if position == 0 {
            0.0
        } else {
            self.cumulative[position - 1]
        }
    }

    /// Inverse CDF: the smallest outcome whose cumulative probability
    /// reaches `probability`.
    ///
    /// A probability of 0 maps to the smallest stored outcome and 1 to the
    /// largest. A query equal to a stored cumulative value returns that
    /// outcome; anything in between returns the next outcome above.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Cdf;
    ///
    /// let cdf = Cdf::from_weights((1..=6).map(|face| (face, 1.0))).unwrap();
    /// assert_eq!(*cdf.outcome(0.5).unwrap(), 3);
    /// assert_eq!(*cdf.outcome(0.51).unwrap(), 4);
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::ProbabilityOutOfRange`] when `probability`
    /// falls outside [0, 1].
    #[allow(clippy::float_cmp)]
    pub fn outcome(&self, probability: f64) -> Result<&T> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(PosteriorError::probability_out_of_range(probability));
        }
        if probability == 0.0 {
            return Ok(&self.outcomes[0]);
        }
        if probability == 1.0 {
            return Ok(&self.outcomes[self.outcomes.len() - 1]);
        }

        let position = self.cumulative.partition_point(|&value| value <= probability);
        if position > 0 && self.cumulative[position - 1] == probability {
            return Ok(&self.outcomes[position - 1]);
        }
        Ok(&self.outcomes[position.min(self.outcomes.len() - 1)])
    }

    /// The equal-tailed credible interval at the given credibility level.
    ///
    /// For credibility `c`, the bounds sit at the `(1 − c) / 2` and
    /// `1 − (1 − c) / 2` quantiles, so the mass between them is at least
    /// `c` (discrete outcomes round outward).
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Cdf;
    ///
    /// let cdf = Cdf::from_weights((1..=6).map(|face| (face, 1.0))).unwrap();
    /// let (low, high) = cdf.credible_interval(0.5).unwrap();
    /// assert_eq!((low, high), (2, 5));
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::InvalidCredibility`] when `credibility`
    /// falls outside [0, 1].
    pub fn credible_interval(&self, credibility: f64) -> Result<(T, T)> {
        if !(0.0..=1.0).contains(&credibility) {
            return Err(PosteriorError::invalid_credibility(credibility));
        }
        let tail = (1.0 - credibility) / 2.0;
        let lower = self.outcome(tail)?.clone();
        let upper = self.outcome(1.0 - tail)?.clone();
        Ok((lower, upper))
    }

    /// The outcomes, sorted ascending.
    #[must_use]
    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }

    /// The cumulative probabilities, parallel to [`outcomes`](Cdf::outcomes).
    #[must_use]
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Iterates over (outcome, cumulative probability) pairs in ascending
    /// outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.outcomes.iter().zip(self.cumulative.iter().copied())
    }

    /// The number of distinct outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always false: construction rejects empty input. Present for API
    /// symmetry with the other containers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl<T: Outcome> fmt::Display for Cdf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .outcomes
            .iter()
            .map(|outcome| outcome.to_string().len())
            .chain(std::iter::once("Outcome".len()))
            .max()
            .unwrap_or(7);
        writeln!(f, "{:<width$}  Cumulative", "Outcome")?;
        writeln!(f, "{:-<width$}  {:-<10}", "", "")?;
        for (outcome, cumulative) in self.iter() {
            writeln!(f, "{:<width$}  {cumulative:.6}", outcome.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn die() -> Cdf<i32> {
        Cdf::from_weights((1..=6).map(|face| (face, 1.0))).unwrap()
    }

    #[test]
    fn test_from_weights_sorts_and_normalizes() {
        let cdf = Cdf::from_weights([("banana", 1.0), ("apple", 1.0), ("cherry", 2.0)]).unwrap();
        assert_eq!(cdf.outcomes(), &["apple", "banana", "cherry"]);
        assert_relative_eq!(cdf.cumulative()[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(cdf.cumulative()[1], 0.5, epsilon = 1e-12);
        assert_eq!(cdf.cumulative()[2], 1.0);
    }

    #[test]
    fn test_cumulative_is_monotone_and_ends_at_one() {
        let cdf = Cdf::from_weights([(10, 0.2), (30, 0.5), (20, 0.1), (40, 0.2)]).unwrap();
        for window in cdf.cumulative().windows(2) {
            assert!(window[0] <= window[1]);
        }
        assert_eq!(*cdf.cumulative().last().unwrap(), 1.0);
    }

    #[test]
    fn test_duplicate_outcomes_coalesce() {
        let cdf = Cdf::from_weights([("a", 1.0), ("a", 2.0), ("b", 3.0)]).unwrap();
        assert_eq!(cdf.len(), 2);
        assert_relative_eq!(cdf.likelihood(&"a"), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result: Result<Cdf<i32>> = Cdf::from_weights([]);
        assert_eq!(result.unwrap_err(), PosteriorError::EmptyDistribution);
    }

    #[test]
    fn test_zero_total_is_rejected() {
        let result = Cdf::from_weights([("a", 0.0), ("b", 0.0)]);
        assert_eq!(result.unwrap_err(), PosteriorError::DegenerateDistribution);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let result = Cdf::from_weights([("a", -0.5)]);
        assert_eq!(result.unwrap_err(), PosteriorError::invalid_weight(-0.5));
    }

    #[test]
    fn test_likelihood_at_and_between_outcomes() {
        let cdf = die();
        assert_relative_eq!(cdf.likelihood(&1), 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(cdf.likelihood(&3), 0.5, epsilon = 1e-12);
        assert_eq!(cdf.likelihood(&0), 0.0);
        assert_eq!(cdf.likelihood(&6), 1.0);
        assert_eq!(cdf.likelihood(&100), 1.0);
    }

    #[test]
    fn test_outcome_at_bounds() {
        let cdf = die();
        assert_eq!(*cdf.outcome(0.0).unwrap(), 1);
        assert_eq!(*cdf.outcome(1.0).unwrap(), 6);
    }

    #[test]
    fn test_outcome_exact_match_takes_left_outcome() {
        let cdf = die();
        // 3/6 is stored exactly, so the query lands on 3 rather than 4.
        assert_eq!(*cdf.outcome(0.5).unwrap(), 3);
    }

    #[test]
    fn test_outcome_at_tied_cumulative_takes_rightmost_tie() {
        // A zero-weight outcome repeats its predecessor's cumulative value,
        // and an exact query on that value resolves to the later outcome.
        let cdf = Cdf::from_weights([(1, 2.0), (2, 0.0), (3, 2.0)]).unwrap();
        assert_eq!(cdf.cumulative(), &[0.5, 0.5, 1.0]);
        assert_eq!(*cdf.outcome(0.5).unwrap(), 2);
        assert_eq!(*cdf.outcome(0.49).unwrap(), 1);
        assert_eq!(*cdf.outcome(0.51).unwrap(), 3);
    }

    #[test]
    fn test_outcome_between_values_takes_next_above() {
        let cdf = die();
        assert_eq!(*cdf.outcome(0.51).unwrap(), 4);
        assert_eq!(*cdf.outcome(0.05).unwrap(), 1);
    }

    #[test]
    fn test_outcome_rejects_out_of_range() {
        let cdf = die();
        assert_eq!(
            cdf.outcome(1.5).unwrap_err(),
            PosteriorError::probability_out_of_range(1.5)
        );
        assert!(cdf.outcome(-0.1).is_err());
    }

    #[test]
    fn test_round_trip_recovers_stored_outcomes() {
        let cdf = die();
        for face in 1..=6 {
            let p = cdf.likelihood(&face);
            assert_eq!(*cdf.outcome(p).unwrap(), face);
        }
    }

    #[test]
    fn test_credible_interval_of_fair_die() {
        let cdf = die();
        assert_eq!(cdf.credible_interval(0.5).unwrap(), (2, 5));
        assert_eq!(cdf.credible_interval(1.0).unwrap(), (1, 6));
        assert_eq!(cdf.credible_interval(0.0).unwrap(), (3, 3));
    }

    #[test]
    fn test_credible_interval_rejects_out_of_range() {
        let cdf = die();
        assert_eq!(
            cdf.credible_interval(1.2).unwrap_err(),
            PosteriorError::invalid_credibility(1.2)
        );
    }

    #[test]
    fn test_display_renders_table() {
        let cdf = die();
        let rendered = cdf.to_string();
        assert!(rendered.contains("Outcome"));
        assert!(rendered.contains("Cumulative"));
        assert!(rendered.contains("1.000000"));
    }
}
