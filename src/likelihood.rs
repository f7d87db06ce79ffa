use crate::error::{PosteriorError, Result};
use crate::traits::Outcome;
use std::collections::HashMap;
use std::fmt;

/// The conditional-probability source P(observation | hypothesis) behind a
/// [`Hypotheses`](crate::Hypotheses) updater.
///
/// Two forms exist: a pure function of (hypothesis, observation), and a
/// per-hypothesis table of flattened observation keys. Dispatch is explicit
/// per variant, and a table lookup that misses is an error; absent
/// likelihood data is a caller mistake, not evidence of probability zero.
pub enum Likelihood<H, D> {
    /// A pure function returning P(observation | hypothesis).
    Function(Box<dyn Fn(&H, &D) -> f64 + Send + Sync>),
    /// A table keyed by hypothesis, then by flattened observation key.
    Table(LikelihoodTable<H>),
}

impl<H, D> Likelihood<H, D> {
    /// Wraps a likelihood function.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::Likelihood;
    ///
    /// // A die with `sides` faces shows face `d` with probability 1/sides.
    /// let roll = Likelihood::function(|sides: &u32, d: &u32| {
    ///     if sides < d { 0.0 } else { 1.0 / f64::from(*sides) }
    /// });
    /// # let _ = roll;
    /// ```
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&H, &D) -> f64 + Send + Sync + 'static,
    {
        Self::Function(Box::new(f))
    }

    /// Wraps a likelihood table.
    #[must_use]
    pub fn table(table: LikelihoodTable<H>) -> Self {
        Self::Table(table)
    }
}

impl<H: Outcome, D: fmt::Display> Likelihood<H, D> {
    /// P(observation | hypothesis) from whichever form this source holds.
    ///
    /// # Errors
    /// Table form returns [`PosteriorError::UnknownHypothesis`] or
    /// [`PosteriorError::UnknownObservation`] on a missing key.
    pub fn get(&self, hypothesis: &H, observation: &D) -> Result<f64> {
        match self {
            Self::Function(f) => Ok(f(hypothesis, observation)),
            Self::Table(table) => table.get(hypothesis, observation),
        }
    }
}

impl<H: fmt::Debug, D> fmt::Debug for Likelihood<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("Likelihood::Function"),
            Self::Table(table) => f.debug_tuple("Likelihood::Table").field(table).finish(),
        }
    }
}

/// A two-level likelihood table: hypothesis → observation key → probability.
///
/// Rows are declared as [`LikelihoodValue`] nestings and flattened to
/// dot-joined string keys on construction, so an observation like
/// `"bag1.yellow"` addresses the `yellow` leaf inside the `bag1` mapping.
/// Observations are keyed by their `Display` rendering (numbers key as
/// their decimal form).
#[derive(Clone, Debug)]
pub struct LikelihoodTable<H> {
    rows: HashMap<H, HashMap<String, f64>>,
}

impl<H: Outcome> LikelihoodTable<H> {
    /// Builds a table from (hypothesis, nested value) rows, flattening each
    /// row's nesting into observation keys.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::{LikelihoodTable, LikelihoodValue};
    ///
    /// let bowls = LikelihoodTable::new([
    ///     ("bowl1", LikelihoodValue::map([("chocolate", 0.25), ("vanilla", 0.75)])),
    ///     ("bowl2", LikelihoodValue::map([("chocolate", 0.5), ("vanilla", 0.5)])),
    /// ]);
    /// assert_eq!(bowls.get(&"bowl1", &"vanilla").unwrap(), 0.75);
    /// ```
    pub fn new<I, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (H, V)>,
        V: Into<LikelihoodValue>,
    {
        let rows = rows
            .into_iter()
            .map(|(hypothesis, value)| (hypothesis, value.into().flatten()))
            .collect();
        Self { rows }
    }

    /// Looks up P(observation | hypothesis).
    ///
    /// # Errors
    /// Returns [`PosteriorError::UnknownHypothesis`] when the hypothesis
    /// has no row and [`PosteriorError::UnknownObservation`] when the row
    /// has no entry for the observation key.
    pub fn get<D: fmt::Display>(&self, hypothesis: &H, observation: &D) -> Result<f64> {
        let row = self
            .rows
            .get(hypothesis)
            .ok_or_else(|| PosteriorError::unknown_hypothesis(hypothesis.to_string()))?;
        let key = observation.to_string();
        row.get(&key)
            .copied()
            .ok_or_else(|| PosteriorError::unknown_observation(hypothesis.to_string(), key))
    }

    /// The number of hypothesis rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A nested likelihood value: a probability leaf, a keyed mapping, or an
/// indexed list.
///
/// Nestings collapse into dot-joined key paths via
/// [`flatten`](LikelihoodValue::flatten): mapping keys join their parent
/// path with `.`, and list positions contribute their decimal index, so
/// `{"bag1": {"yellow": 0.2}}` flattens to the single key `"bag1.yellow"`.
#[derive(Clone, Debug, PartialEq)]
pub enum LikelihoodValue {
    /// A probability leaf.
    Probability(f64),
    /// Keyed nesting in declaration order.
    Map(Vec<(String, LikelihoodValue)>),
    /// Indexed nesting; positions render as decimal keys.
    List(Vec<LikelihoodValue>),
}

impl LikelihoodValue {
    /// Builds a keyed nesting.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::LikelihoodValue;
    ///
    /// let colors = LikelihoodValue::map([("yellow", 0.2), ("green", 0.1)]);
    /// assert_eq!(colors.flatten().get("yellow"), Some(&0.2));
    /// ```
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<LikelihoodValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Builds an indexed nesting.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<LikelihoodValue>,
        I: IntoIterator<Item = V>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Collapses the nesting into a flat key → probability mapping with
    /// dot-joined key paths.
    ///
    /// A bare probability leaf flattens to the empty key; empty mappings
    /// and lists flatten to nothing.
    ///
    /// # Example
    /// ```rust
    /// use posterior_rs::LikelihoodValue;
    ///
    /// let bags = LikelihoodValue::map([
    ///     ("bag1", LikelihoodValue::map([("yellow", 0.2)])),
    ///     ("bag2", LikelihoodValue::map([("green", 0.1)])),
    /// ]);
    /// let flat = bags.flatten();
    /// assert_eq!(flat.get("bag1.yellow"), Some(&0.2));
    /// assert_eq!(flat.get("bag2.green"), Some(&0.1));
    /// ```
    #[must_use]
    pub fn flatten(&self) -> HashMap<String, f64> {
        let mut flat = HashMap::new();
        self.flatten_into(None, &mut flat);
        flat
    }

    fn flatten_into(&self, prefix: Option<&str>, flat: &mut HashMap<String, f64>) {
        match self {
            Self::Probability(probability) => {
                flat.insert(prefix.unwrap_or("").to_string(), *probability);
            }
            Self::Map(entries) => {
                for (key, value) in entries {
                    value.flatten_into(Some(&joined(prefix, key)), flat);
                }
            }
            Self::List(items) => {
                for (position, value) in items.iter().enumerate() {
                    value.flatten_into(Some(&joined(prefix, &position.to_string())), flat);
                }
            }
        }
    }
}

impl From<f64> for LikelihoodValue {
    fn from(probability: f64) -> Self {
        Self::Probability(probability)
    }
}

fn joined(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_single_level_map() {
        let bowl = LikelihoodValue::map([("chocolate", 0.25), ("vanilla", 0.75)]);
        let flat = bowl.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("chocolate"), Some(&0.25));
        assert_eq!(flat.get("vanilla"), Some(&0.75));
    }

    #[test]
    fn test_flatten_nested_map_joins_with_dots() {
        let bags = LikelihoodValue::map([
            ("bag1", LikelihoodValue::map([("yellow", 0.2), ("green", 0.1)])),
            ("bag2", LikelihoodValue::map([("yellow", 0.14)])),
        ]);
        let flat = bags.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat.get("bag1.yellow"), Some(&0.2));
        assert_eq!(flat.get("bag1.green"), Some(&0.1));
        assert_eq!(flat.get("bag2.yellow"), Some(&0.14));
    }

    #[test]
    fn test_flatten_list_uses_decimal_indices() {
        let ordered = LikelihoodValue::list([0.5, 0.3, 0.2]);
        let flat = ordered.flatten();
        assert_eq!(flat.get("0"), Some(&0.5));
        assert_eq!(flat.get("2"), Some(&0.2));
    }

    #[test]
    fn test_flatten_mixed_map_and_list_nesting() {
        let mixed = LikelihoodValue::map([(
            "colors",
            LikelihoodValue::list([
                LikelihoodValue::Probability(0.9),
                LikelihoodValue::map([("shade", 0.1)]),
            ]),
        )]);
        let flat = mixed.flatten();
        assert_eq!(flat.get("colors.0"), Some(&0.9));
        assert_eq!(flat.get("colors.1.shade"), Some(&0.1));
    }

    #[test]
    fn test_flatten_empty_structures() {
        assert!(LikelihoodValue::Map(Vec::new()).flatten().is_empty());
        assert!(LikelihoodValue::List(Vec::new()).flatten().is_empty());
    }

    #[test]
    fn test_flatten_bare_probability_uses_empty_key() {
        let bare = LikelihoodValue::Probability(0.4);
        assert_eq!(bare.flatten().get(""), Some(&0.4));
    }

    #[test]
    fn test_flatten_duplicate_keys_take_last() {
        let doubled = LikelihoodValue::map([("a", 0.1), ("a", 0.9)]);
        assert_eq!(doubled.flatten().get("a"), Some(&0.9));
    }

    #[test]
    fn test_table_lookup() {
        let bowls = LikelihoodTable::new([
            ("bowl1", LikelihoodValue::map([("vanilla", 0.75)])),
            ("bowl2", LikelihoodValue::map([("vanilla", 0.5)])),
        ]);
        assert_eq!(bowls.len(), 2);
        assert_eq!(bowls.get(&"bowl2", &"vanilla").unwrap(), 0.5);
    }

    #[test]
    fn test_table_clone_preserves_rows() {
        let bowls = LikelihoodTable::new([
            ("bowl1", LikelihoodValue::map([("vanilla", 0.75)])),
            ("bowl2", LikelihoodValue::map([("vanilla", 0.5)])),
        ]);
        let copy = bowls.clone();
        assert_eq!(copy.len(), bowls.len());
        assert_eq!(copy.get(&"bowl1", &"vanilla").unwrap(), 0.75);
        assert_eq!(copy.get(&"bowl2", &"vanilla").unwrap(), 0.5);
    }

    #[test]
    fn test_table_unknown_hypothesis() {
        let bowls = LikelihoodTable::new([("bowl1", LikelihoodValue::map([("vanilla", 0.75)]))]);
        assert_eq!(
            bowls.get(&"bowl3", &"vanilla").unwrap_err(),
            PosteriorError::unknown_hypothesis("bowl3")
        );
    }

    #[test]
    fn test_table_unknown_observation() {
        let bowls = LikelihoodTable::new([("bowl1", LikelihoodValue::map([("vanilla", 0.75)]))]);
        assert_eq!(
            bowls.get(&"bowl1", &"strawberry").unwrap_err(),
            PosteriorError::unknown_observation("bowl1", "strawberry")
        );
    }

    #[test]
    fn test_numeric_observations_key_by_decimal_rendering() {
        let table = LikelihoodTable::new([(1u32, LikelihoodValue::map([("6", 0.5)]))]);
        assert_eq!(table.get(&1, &6u32).unwrap(), 0.5);
    }

    #[test]
    fn test_function_likelihood_dispatch() {
        let roll: Likelihood<u32, u32> = Likelihood::function(|sides, d| {
            if sides < d { 0.0 } else { 1.0 / f64::from(*sides) }
        });
        assert_eq!(roll.get(&6, &8).unwrap(), 0.0);
        assert_eq!(roll.get(&8, &6).unwrap(), 0.125);
    }

    #[test]
    fn test_table_likelihood_dispatch() {
        let source: Likelihood<&str, &str> = Likelihood::table(LikelihoodTable::new([(
            "bowl1",
            LikelihoodValue::map([("vanilla", 0.75)]),
        )]));
        assert_eq!(source.get(&"bowl1", &"vanilla").unwrap(), 0.75);
        assert!(source.get(&"bowl1", &"cherry").is_err());
    }

    #[test]
    fn test_likelihood_debug_names_variant() {
        let function: Likelihood<u32, u32> = Likelihood::function(|_, _| 1.0);
        assert_eq!(format!("{function:?}"), "Likelihood::Function");

        let table: Likelihood<&str, &str> = Likelihood::table(LikelihoodTable::new([(
            "bowl1",
            LikelihoodValue::map([("vanilla", 0.75)]),
        )]));
        assert!(format!("{table:?}").starts_with("Likelihood::Table"));
    }
}
