//! # posterior-rs
//!
//! A Rust library for discrete Bayesian inference: represent beliefs as
//! probability mass functions, fold observed evidence in through likelihoods,
//! and query the resulting posterior.
//!
//! ## Core Concept: Bayesian Updating
//!
//! Start from a prior over competing hypotheses, then let each observation
//! reweight them by how well it was predicted:
//!
//! ```rust
//! use posterior_rs::{Hypotheses, Likelihood};
//!
//! // Which die produced these rolls? A d4, d6, d8, d12, or d20.
//! let roll = Likelihood::function(|sides: &u32, roll: &u32| {
//!     if sides < roll { 0.0 } else { 1.0 / f64::from(*sides) }
//! });
//! let mut dice = Hypotheses::new([4u32, 6, 8, 12, 20], roll);
//!
//! // Each roll reshapes the posterior; an 8 rules the d4 and d6 out entirely.
//! dice.evaluate([6, 8, 7, 7, 5, 4]).unwrap();
//!
//! let (best, confidence) = dice.most_likely().unwrap();
//! assert_eq!(*best, 8);
//! assert!(confidence > 0.9);
//! ```
//!
//! ## Features
//!
//! - **Exact discrete updating**: posteriors computed from explicit
//!   likelihoods, no sampling loop required
//! - **Function or table likelihoods**: closures for parametric models,
//!   nested lookup tables for empirical ones
//! - **Cumulative queries**: quantiles and equal-tailed credible intervals
//!   through [`Cdf`]
//! - **Summary statistics**: mean, variance, entropy, maximum a posteriori
//! - **Reproducible sampling**: every sampler takes a caller-supplied
//!   [`rand::Rng`], with [`seeded_rng`] for deterministic runs

pub mod distributions;
pub mod error;
pub mod hypothesis;
pub mod likelihood;
pub mod pmf;
pub mod traits;

pub use distributions::Cdf;
pub use error::{PosteriorError, Result};
pub use hypothesis::Hypotheses;
pub use likelihood::{Likelihood, LikelihoodTable, LikelihoodValue};
pub use pmf::Pmf;
pub use traits::{Outcome, Real};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// A deterministically seeded random number generator.
///
/// Sampling methods take any [`rand::Rng`]; pass one of these when a run
/// has to be reproducible.
///
/// # Example
/// ```rust
/// use posterior_rs::{Pmf, seeded_rng};
///
/// let die = Pmf::uniform(1u32..=6);
/// let first = *die.sample(&mut seeded_rng(42)).unwrap();
/// let again = *die.sample(&mut seeded_rng(42)).unwrap();
/// assert_eq!(first, again);
/// ```
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
