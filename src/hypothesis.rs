use crate::distributions::Cdf;
use crate::error::{PosteriorError, Result};
use crate::likelihood::Likelihood;
use crate::pmf::Pmf;
use crate::traits::Outcome;
use std::fmt;

/// A Bayesian updater: a prior over hypotheses plus the likelihood source
/// that folds observed data into it.
///
/// Each observation multiplies every hypothesis's probability by
/// P(observation | hypothesis) and renormalizes, so after a run of
/// [`evaluate`](Hypotheses::evaluate) calls the wrapped [`Pmf`] holds the
/// posterior. Updates are atomic per observation: every factor is computed
/// and validated before any probability changes, so a failed lookup leaves
/// the posterior exactly as it was.
pub struct Hypotheses<H: Outcome, D> {
    pmf: Pmf<H>,
    likelihood: Likelihood<H, D>,
}

impl<H: Outcome, D> Hypotheses<H, D> {
    /// Creates an updater with a uniform prior over the hypotheses.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::{Hypotheses, Likelihood, LikelihoodTable, LikelihoodValue};
    ///
    /// let bowls = LikelihoodTable::new([
    ///     ("bowl1", LikelihoodValue::map([("chocolate", 0.25), ("vanilla", 0.75)])),
    ///     ("bowl2", LikelihoodValue::map([("chocolate", 0.5), ("vanilla", 0.5)])),
    /// ]);
    /// let mut cookies = Hypotheses::new(["bowl1", "bowl2"], Likelihood::table(bowls));
    /// cookies.observe("vanilla").unwrap();
    /// assert!((cookies.probability(&"bowl1").unwrap() - 0.6).abs() < 1e-9);
    /// ```
    pub fn new<I>(hypotheses: I, likelihood: Likelihood<H, D>) -> Self
    where
        I: IntoIterator<Item = H>,
    {
        Self {
            pmf: Pmf::uniform(hypotheses),
            likelihood,
        }
    }

    /// Creates an updater whose prior weights each hypothesis by
    /// `weight_fn`.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::{Hypotheses, Likelihood};
    ///
    /// // Companies run fewer long trains: weight train counts by 1/count.
    /// let trains = Hypotheses::weighted(
    ///     1..=1000u32,
    ///     |count| f64::from(*count).recip(),
    ///     Likelihood::function(|count: &u32, seen: &u32| {
    ///         if count < seen { 0.0 } else { 1.0 / f64::from(*count) }
    ///     }),
    /// )
    /// .unwrap();
    /// # let _ = trains;
    /// ```
    ///
    /// # Errors
    /// Returns [`PosteriorError::InvalidWeight`] if the function produces
    /// a negative or non-finite weight.
    pub fn weighted<I, F>(hypotheses: I, weight_fn: F, likelihood: Likelihood<H, D>) -> Result<Self>
    where
        I: IntoIterator<Item = H>,
        F: Fn(&H) -> f64,
    {
        Ok(Self {
            pmf: Pmf::weighted(hypotheses, weight_fn)?,
            likelihood,
        })
    }

    /// The current distribution over hypotheses (prior or posterior,
    /// depending on how much evidence has been folded in).
    #[must_use]
    pub fn pmf(&self) -> &Pmf<H> {
        &self.pmf
    }

    /// Consumes the updater, returning the distribution.
    #[must_use]
    pub fn into_pmf(self) -> Pmf<H> {
        self.pmf
    }

    /// The current probability of one hypothesis.
    #[must_use]
    pub fn probability(&self, hypothesis: &H) -> Option<f64> {
        self.pmf.probability(hypothesis)
    }

    /// The posterior mean; requires numeric hypotheses.
    ///
    /// # Errors
    /// Returns [`PosteriorError::NonNumericOutcome`] unless every
    /// hypothesis is numeric.
    pub fn mean(&self) -> Result<f64> {
        self.pmf.mean()
    }

    /// The posterior variance; requires numeric hypotheses.
    ///
    /// # Errors
    /// Returns [`PosteriorError::NonNumericOutcome`] unless every
    /// hypothesis is numeric.
    pub fn variance(&self) -> Result<f64> {
        self.pmf.variance()
    }

    /// The maximum-a-posteriori entry: the likeliest hypothesis and its
    /// probability.
    #[must_use]
    pub fn most_likely(&self) -> Option<(&H, f64)> {
        self.pmf.most_likely()
    }

    /// Builds a cumulative distribution from the current posterior.
    ///
    /// # Errors
    /// Returns [`PosteriorError::EmptyDistribution`] or
    /// [`PosteriorError::DegenerateDistribution`] when no mass remains.
    pub fn to_cdf(&self) -> Result<Cdf<H>> {
        self.pmf.to_cdf()
    }

    /// Iterates over (hypothesis, probability) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&H, f64)> + '_ {
        self.pmf.iter()
    }

    /// The total posterior mass: 1, or 0 once every hypothesis is ruled
    /// out.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.pmf.total()
    }

    /// The number of hypotheses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pmf.len()
    }

    /// Whether the hypothesis set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pmf.is_empty()
    }
}

impl<H: Outcome, D: fmt::Display> Hypotheses<H, D> {
    /// Folds a sequence of observations into the posterior, in order.
    ///
    /// Each observation multiplies every hypothesis's probability by its
    /// likelihood and renormalizes before the next observation applies.
    /// All factors for an observation are computed and validated up front,
    /// so an error leaves the posterior at the state after the last
    /// successful observation.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::{Hypotheses, Likelihood};
    ///
    /// let roll = Likelihood::function(|sides: &u32, d: &u32| {
    ///     if sides < d { 0.0 } else { 1.0 / f64::from(*sides) }
    /// });
    /// let mut dice = Hypotheses::new([4u32, 6, 8, 12, 20], roll);
    /// dice.evaluate([6, 8, 7, 7, 5, 4]).unwrap();
    /// let (best, _) = dice.most_likely().unwrap();
    /// assert_eq!(*best, 8);
    /// ```
    ///
    /// # Errors
    /// Returns a lookup error for a table miss and
    /// [`PosteriorError::InvalidLikelihood`] for a negative or non-finite
    /// factor; either way the pending observation is not applied.
    pub fn evaluate<I>(&mut self, data: I) -> Result<()>
    where
        I: IntoIterator<Item = D>,
    {
        for observation in data {
            let factors = self.factors(&observation)?;
            self.pmf.scale(&factors);
            self.pmf.normalize();
        }
        Ok(())
    }

    /// Folds a single observation into the posterior.
    ///
    /// # Errors
    /// Same conditions as [`evaluate`](Hypotheses::evaluate).
    pub fn observe(&mut self, observation: D) -> Result<()> {
        self.evaluate(std::iter::once(observation))
    }

    /// P(observation | hypothesis) from the underlying likelihood source.
    ///
    /// # Errors
    /// Table sources return [`PosteriorError::UnknownHypothesis`] or
    /// [`PosteriorError::UnknownObservation`] on a missing key.
    pub fn likelihood(&self, hypothesis: &H, observation: &D) -> Result<f64> {
        self.likelihood.get(hypothesis, observation)
    }

    /// Likelihood factors for one observation across every hypothesis,
    /// validated before any mutation happens.
    fn factors(&self, observation: &D) -> Result<Vec<f64>> {
        self.pmf
            .outcomes()
            .map(|hypothesis| {
                let factor = self.likelihood.get(hypothesis, observation)?;
                if factor.is_finite() && factor >= 0.0 {
                    Ok(factor)
                } else {
                    Err(PosteriorError::invalid_likelihood(factor))
                }
            })
            .collect()
    }
}

impl<H, D> fmt::Debug for Hypotheses<H, D>
where
    H: Outcome + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hypotheses")
            .field("pmf", &self.pmf)
            .field("likelihood", &self.likelihood)
            .finish()
    }
}

impl<H: Outcome, D> fmt::Display for Hypotheses<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pmf, f)
    }
}
