//! Randomizer used for the team draw and schedule order.

use rand::Rng;

/// Return a uniformly shuffled copy of `items` (Fisher-Yates). The input is left untouched.
///
/// The random source is passed in so tests can use a seeded generator.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
