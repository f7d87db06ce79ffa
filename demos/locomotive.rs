use posterior_rs::{Hypotheses, Likelihood, Result, seeded_rng};

const SIGHTINGS: [u32; 3] = [30, 60, 90];
const FLEET_CAP: u32 = 1000;

fn sighting() -> Likelihood<u32, u32> {
    Likelihood::function(|fleet: &u32, number: &u32| {
        if fleet < number { 0.0 } else { 1.0 / f64::from(*fleet) }
    })
}

/// Estimating a Fleet Size from Serial Numbers
///
/// A railroad numbers its locomotives 1..=N. Spotting engines 30, 60, and 90
/// says a lot about N, and the choice of prior says the rest.
fn main() -> Result<()> {
    println!("🚂 The Locomotive Problem");
    println!("=========================\n");

    println!("📊 Sightings: {SIGHTINGS:?} (fleet size capped at {FLEET_CAP})");

    // Uniform prior: every fleet size up to the cap is equally plausible.
    let mut uniform = Hypotheses::new(1..=FLEET_CAP, sighting());
    uniform.evaluate(SIGHTINGS)?;

    let mean = uniform.mean()?;
    let cdf = uniform.to_cdf()?;
    let median = cdf.outcome(0.5)?;
    let (low, high) = cdf.credible_interval(0.9)?;
    println!("\n🎯 Uniform prior:");
    println!("   Posterior mean: {mean:.1}");
    println!("   Posterior median: {median}");
    println!("   90% credible interval: [{low}, {high}]");

    // Power-law prior: small railroads outnumber giant ones.
    let mut power_law = Hypotheses::weighted(
        1..=FLEET_CAP,
        |fleet| f64::from(*fleet).recip(),
        sighting(),
    )?;
    power_law.evaluate(SIGHTINGS)?;

    let mean = power_law.mean()?;
    let cdf = power_law.to_cdf()?;
    let (low, high) = cdf.credible_interval(0.9)?;
    println!("\n🎯 Power-law prior (weight 1/N):");
    println!("   Posterior mean: {mean:.1}");
    println!("   90% credible interval: [{low}, {high}]");

    // Draw a few plausible fleet sizes from the informed posterior.
    let mut rng = seeded_rng(1903);
    let draws = power_law.pmf().sample_many(&mut rng, 5)?;
    println!("\n🎲 Five fleet sizes drawn from that posterior: {draws:?}");

    println!("\n💡 More data beats a better prior: with ten sightings the two");
    println!("   posteriors would be nearly indistinguishable.");

    Ok(())
}
