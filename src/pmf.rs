use crate::distributions::Cdf;
use crate::error::{PosteriorError, Result};
use crate::traits::Outcome;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use std::collections::HashMap;
use std::fmt;

/// A probability mass function over a discrete set of outcomes.
///
/// `Pmf` is a dedicated container rather than a general mapping: keys are
/// unique, iteration follows insertion order, and every mutation goes
/// through [`normalize`](Pmf::normalize) (or the evidence-update path in
/// [`Hypotheses`](crate::Hypotheses)), so the probabilities sum to one
/// whenever any mass is present. The degenerate empty or all-zero state is
/// tolerated and keeps a total of zero.
#[derive(Clone, Debug)]
pub struct Pmf<T: Outcome> {
    /// Outcome/probability pairs in insertion order.
    entries: Vec<(T, f64)>,
    /// Outcome -> position in `entries`, for point lookups.
    index: HashMap<T, usize>,
}

impl<T: Outcome> Pmf<T> {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts or overwrites one weight. First insertion fixes the
    /// position; later writes to the same key keep it.
    fn insert_weight(&mut self, outcome: T, weight: f64) {
        if let Some(&position) = self.index.get(&outcome) {
            self.entries[position].1 = weight;
        } else {
            self.index.insert(outcome.clone(), self.entries.len());
            self.entries.push((outcome, weight));
        }
    }

    fn validated(weight: f64) -> Result<f64> {
        if weight.is_finite() && weight >= 0.0 {
            Ok(weight)
        } else {
            Err(PosteriorError::invalid_weight(weight))
        }
    }

    /// Creates a uniform distribution over the given outcomes.
    ///
    /// Every outcome receives the same probability. An empty iterator
    /// yields the degenerate empty distribution.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let die = Pmf::uniform(1..=6);
    /// assert_eq!(die.len(), 6);
    /// assert!((die.total() - 1.0).abs() < 1e-9);
    /// ```
    pub fn uniform<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut pmf = Self::empty();
        for outcome in outcomes {
            pmf.insert_weight(outcome, 1.0);
        }
        pmf.normalize();
        pmf
    }

    /// Creates a distribution by applying a weighting function to each
    /// outcome, then normalizing.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// // Power-law prior: weight each count by 1/count.
    /// let prior = Pmf::weighted(1..=100u32, |count| f64::from(*count).recip()).unwrap();
    /// assert!(prior.probability(&1).unwrap() > prior.probability(&100).unwrap());
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::InvalidWeight`] if the function produces a
    /// negative or non-finite weight.
    pub fn weighted<I, F>(outcomes: I, weight_fn: F) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> f64,
    {
        let mut pmf = Self::empty();
        for outcome in outcomes {
            let weight = Self::validated(weight_fn(&outcome))?;
            pmf.insert_weight(outcome, weight);
        }
        pmf.normalize();
        Ok(pmf)
    }

    /// Creates a distribution from explicit outcome/weight pairs, then
    /// normalizes.
    ///
    /// Duplicate outcomes keep their first position and their last weight.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let coin = Pmf::from_weights([("heads", 1.0), ("tails", 3.0)]).unwrap();
    /// assert!((coin.probability(&"tails").unwrap() - 0.75).abs() < 1e-9);
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::InvalidWeight`] for a negative or
    /// non-finite weight.
    pub fn from_weights<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut pmf = Self::empty();
        for (outcome, weight) in weights {
            let weight = Self::validated(weight)?;
            pmf.insert_weight(outcome, weight);
        }
        pmf.normalize();
        Ok(pmf)
    }

    /// Rescales the probabilities to sum to one.
    ///
    /// A zero total (empty or all-impossible distribution) is left
    /// unchanged. Idempotent once normalized.
    pub fn normalize(&mut self) {
        self.normalize_to(1.0);
    }

    /// Rescales the probabilities to sum to `target_total`.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let mut counts = Pmf::from_weights([("a", 2.0), ("b", 6.0)]).unwrap();
    /// counts.normalize_to(100.0);
    /// assert!((counts.total() - 100.0).abs() < 1e-9);
    /// ```
    pub fn normalize_to(&mut self, target_total: f64) {
        let total = self.total();
        if total == 0.0 {
            return;
        }
        let factor = target_total / total;
        for (_, probability) in &mut self.entries {
            *probability *= factor;
        }
    }

    /// The sum of all probabilities: 1 after normalization, 0 when
    /// degenerate.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, probability)| *probability).sum()
    }

    fn numeric_entries(&self, statistic: &'static str) -> Result<Vec<(f64, f64)>> {
        self.entries
            .iter()
            .map(|(outcome, probability)| {
                outcome
                    .numeric()
                    .map(|value| (value, *probability))
                    .ok_or(PosteriorError::non_numeric(statistic))
            })
            .collect()
    }

    /// The expected value Σ outcome·probability.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let die = Pmf::uniform(1..=6);
    /// assert!((die.mean().unwrap() - 3.5).abs() < 1e-9);
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::NonNumericOutcome`] unless every outcome
    /// is numeric.
    pub fn mean(&self) -> Result<f64> {
        Ok(self
            .numeric_entries("mean")?
            .iter()
            .map(|(value, probability)| value * probability)
            .sum())
    }

    fn second_central_moment(&self, statistic: &'static str) -> Result<f64> {
        let entries = self.numeric_entries(statistic)?;
        let mean: f64 = entries.iter().map(|(value, probability)| value * probability).sum();
        Ok(entries
            .iter()
            .map(|(value, probability)| probability * (value - mean).powi(2))
            .sum())
    }

    /// The variance Σ probability·(outcome − mean)².
    ///
    /// # Errors
    /// Returns [`PosteriorError::NonNumericOutcome`] unless every outcome
    /// is numeric.
    pub fn variance(&self) -> Result<f64> {
        self.second_central_moment("variance")
    }

    /// The standard deviation, √variance.
    ///
    /// # Errors
    /// Returns [`PosteriorError::NonNumericOutcome`] unless every outcome
    /// is numeric.
    pub fn standard_deviation(&self) -> Result<f64> {
        Ok(self.second_central_moment("standard deviation")?.sqrt())
    }

    /// Shannon entropy in bits over the nonzero probabilities.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let fair = Pmf::uniform(["a", "b", "c", "d"]);
    /// assert!((fair.entropy() - 2.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn entropy(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, probability)| *probability)
            .filter(|probability| *probability > 0.0)
            .map(|probability| -probability * probability.log2())
            .sum()
    }

    /// The largest probability value held (the magnitude, not the
    /// outcome). Zero for an empty distribution.
    #[must_use]
    pub fn max_likelihood(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, probability)| *probability)
            .fold(0.0, f64::max)
    }

    /// The modal entry: the outcome carrying the most mass, with its
    /// probability. `None` when empty.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let biased = Pmf::from_weights([("rain", 3.0), ("sun", 1.0)]).unwrap();
    /// let (outcome, probability) = biased.most_likely().unwrap();
    /// assert_eq!(*outcome, "rain");
    /// assert!((probability - 0.75).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn most_likely(&self) -> Option<(&T, f64)> {
        self.entries
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(outcome, probability)| (outcome, *probability))
    }

    /// Draws one outcome, weighted by the current probabilities.
    ///
    /// The generator is injected so callers control reproducibility; see
    /// [`seeded_rng`](crate::seeded_rng) for a deterministic source.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::{Pmf, seeded_rng};
    ///
    /// let die = Pmf::uniform(1..=6);
    /// let mut rng = seeded_rng(7);
    /// let face = die.sample(&mut rng).unwrap();
    /// assert!((1..=6).contains(face));
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::DegenerateDistribution`] when no outcome
    /// carries mass.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
        let weights = WeightedIndex::new(self.entries.iter().map(|(_, probability)| *probability))
            .map_err(|_| PosteriorError::DegenerateDistribution)?;
        Ok(&self.entries[weights.sample(rng)].0)
    }

    /// Draws `count` outcomes, reusing one weight table across draws.
    ///
    /// # Errors
    /// Returns [`PosteriorError::DegenerateDistribution`] when no outcome
    /// carries mass.
    pub fn sample_many<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<&T>> {
        let weights = WeightedIndex::new(self.entries.iter().map(|(_, probability)| *probability))
            .map_err(|_| PosteriorError::DegenerateDistribution)?;
        Ok((0..count)
            .map(|_| &self.entries[weights.sample(rng)].0)
            .collect())
    }

    /// P(X < Y) for X drawn from `self` and Y drawn from `other`,
    /// summed over the full cross product of entries.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let d4 = Pmf::uniform(1..=4);
    /// let d6 = Pmf::uniform(1..=6);
    /// assert!((d4.less_than(&d6) - 14.0 / 24.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn less_than(&self, other: &Self) -> f64 {
        self.cross_mass(other, |a, b| a < b)
    }

    /// P(X > Y) for X drawn from `self` and Y drawn from `other`.
    #[must_use]
    pub fn greater_than(&self, other: &Self) -> f64 {
        self.cross_mass(other, |a, b| a > b)
    }

    fn cross_mass<F>(&self, other: &Self, relation: F) -> f64
    where
        F: Fn(&T, &T) -> bool,
    {
        self.entries
            .iter()
            .map(|(outcome, probability)| {
                let mass: f64 = other
                    .entries
                    .iter()
                    .filter(|(candidate, _)| relation(outcome, candidate))
                    .map(|(_, q)| *q)
                    .sum();
                probability * mass
            })
            .sum()
    }

    /// The total mass of outcomes strictly below `threshold`.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let die = Pmf::uniform(1..=6);
    /// assert!((die.less_than_value(&4) - 0.5).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn less_than_value(&self, threshold: &T) -> f64 {
        self.entries
            .iter()
            .filter(|(outcome, _)| outcome < threshold)
            .map(|(_, probability)| *probability)
            .sum()
    }

    /// The total mass of outcomes strictly above `threshold`.
    #[must_use]
    pub fn greater_than_value(&self, threshold: &T) -> f64 {
        self.entries
            .iter()
            .filter(|(outcome, _)| outcome > threshold)
            .map(|(_, probability)| *probability)
            .sum()
    }

    /// Builds a cumulative distribution from the current snapshot.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Pmf;
    ///
    /// let die = Pmf::uniform(1..=6);
    /// let cdf = die.to_cdf().unwrap();
    /// assert!((cdf.likelihood(&3) - 0.5).abs() < 1e-9);
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::EmptyDistribution`] for an empty PMF and
    /// [`PosteriorError::DegenerateDistribution`] when the total mass is
    /// zero.
    pub fn to_cdf(&self) -> Result<Cdf<T>> {
        Cdf::from_weights(
            self.entries
                .iter()
                .map(|(outcome, probability)| (outcome.clone(), *probability)),
        )
    }

    /// The probability of one outcome, or `None` if it is not in the
    /// support.
    #[must_use]
    pub fn probability(&self, outcome: &T) -> Option<f64> {
        self.index
            .get(outcome)
            .map(|&position| self.entries[position].1)
    }

    /// Iterates over (outcome, probability) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.entries
            .iter()
            .map(|(outcome, probability)| (outcome, *probability))
    }

    /// Iterates over the outcomes in insertion order.
    pub fn outcomes(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(outcome, _)| outcome)
    }

    /// Iterates over the probabilities in insertion order.
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, probability)| *probability)
    }

    /// The number of outcomes in the support.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution has no outcomes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Multiplies each probability by its factor, in entry order. The
    /// caller renormalizes; factor count must match the entry count.
    pub(crate) fn scale(&mut self, factors: &[f64]) {
        debug_assert_eq!(factors.len(), self.entries.len());
        for ((_, probability), factor) in self.entries.iter_mut().zip(factors) {
            *probability *= factor;
        }
    }
}

impl<T: Outcome> fmt::Display for Pmf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|(outcome, _)| outcome.to_string().len())
            .chain(std::iter::once("Outcome".len()))
            .max()
            .unwrap_or(7);
        writeln!(f, "{:<width$}  Probability", "Outcome")?;
        writeln!(f, "{:-<width$}  {:-<11}", "", "")?;
        for (outcome, probability) in &self.entries {
            writeln!(f, "{:<width$}  {probability:.6}", outcome.to_string())?;
        }
        Ok(())
    }
}
