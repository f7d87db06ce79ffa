use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The contract for values usable as outcomes or hypotheses.
///
/// Outcomes serve as mapping keys (equality + hashing), sort into the
/// ascending order a cumulative distribution needs, and render in tabular
/// output. `numeric` exposes the value as a point on the real line for the
/// statistics that need one; non-numeric outcome types return `None`, which
/// turns `mean`/`variance` into a domain error rather than a wrong answer.
pub trait Outcome: Clone + Eq + Hash + Ord + fmt::Display {
    /// The outcome as a point on the real line, if it has one.
    fn numeric(&self) -> Option<f64> {
        None
    }
}

macro_rules! numeric_outcome_impl {
    ($($t:ty),* $(,)?) => {$(
        impl Outcome for $t {
            #[allow(clippy::cast_precision_loss)]
            fn numeric(&self) -> Option<f64> {
                Some(*self as f64)
            }
        }
    )*};
}

numeric_outcome_impl!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Outcome for String {}

impl Outcome for &str {}

/// An `f64` outcome key with the total order and stable hashing a mapping
/// key requires.
///
/// Equality, ordering, and hashing all follow `f64::total_cmp` over the
/// underlying bit pattern, so `-0.0` sorts before `0.0` and NaN is a valid
/// (if unusual) key rather than a poisoned one.
#[derive(Debug, Clone, Copy)]
pub struct Real(f64);

impl Real {
    /// Wraps a float for use as an outcome key.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The wrapped float.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Real {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Outcome for Real {
    fn numeric(&self) -> Option<f64> {
        Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_integer_outcomes_are_numeric() {
        assert_eq!(6u32.numeric(), Some(6.0));
        assert_eq!((-3i64).numeric(), Some(-3.0));
    }

    #[test]
    fn test_string_outcomes_are_not_numeric() {
        assert_eq!("bowl1".numeric(), None);
        assert_eq!(String::from("bowl2").numeric(), None);
    }

    #[test]
    fn test_real_orders_totally() {
        let mut values = vec![Real::new(2.5), Real::new(-1.0), Real::new(f64::NAN)];
        values.sort();
        assert_eq!(values[0], Real::new(-1.0));
        assert_eq!(values[1], Real::new(2.5));
        // NaN sorts above every finite value under the total order.
        assert!(values[2] > values[1]);
    }

    #[test]
    fn test_real_nan_equals_itself() {
        assert_eq!(Real::new(f64::NAN), Real::new(f64::NAN));
    }

    #[test]
    fn test_real_works_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Real::new(0.5), "half");
        assert_eq!(map.get(&Real::new(0.5)), Some(&"half"));
        assert_eq!(map.get(&Real::new(0.25)), None);
    }

    #[test]
    fn test_real_display_and_numeric() {
        let real = Real::new(1.75);
        assert_eq!(real.to_string(), "1.75");
        assert_eq!(real.numeric(), Some(1.75));
        assert_eq!(real.value(), 1.75);
    }
}
