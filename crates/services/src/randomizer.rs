//! Unbiased shuffling of question order.

use rand::Rng;

/// A uniformly random permutation of `items`, using the thread-local RNG.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::rng())
}

/// Fisher–Yates over a copy of `items`; the input slice is left untouched.
#[must_use]
pub fn shuffled_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}
