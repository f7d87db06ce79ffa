use posterior_rs::{Hypotheses, Likelihood, Result};

// One die drawn from the box, rolled six times.
const ROLLS: [u32; 6] = [6, 8, 7, 7, 5, 4];

fn die_roll() -> Likelihood<u32, u32> {
    Likelihood::function(|sides: &u32, roll: &u32| {
        if sides < roll { 0.0 } else { 1.0 / f64::from(*sides) }
    })
}

/// Identifying a Die from Its Rolls
///
/// A box holds a d4, d6, d8, d12, and d20. One die is drawn at random and
/// rolled repeatedly; every roll reshapes the belief about which die it is.
fn main() -> Result<()> {
    println!("🎲 Which Die Is Being Rolled?");
    println!("=============================\n");

    let mut dice = Hypotheses::new([4u32, 6, 8, 12, 20], die_roll());

    println!("📋 Prior (one die drawn at random):");
    println!("{dice}");

    let first = ROLLS[0];
    dice.observe(first)?;
    println!("🔄 After rolling a {first} (the d4 is ruled out):");
    println!("{dice}");

    dice.evaluate(ROLLS[1..].iter().copied())?;
    println!("🔄 After the full sequence {ROLLS:?}:");
    println!("{dice}");

    println!("🏁 Verdict:");
    if let Some((sides, confidence)) = dice.most_likely() {
        println!(
            "   The d{sides} wins with {:.1}% of the posterior",
            confidence * 100.0
        );
    }

    Ok(())
}
