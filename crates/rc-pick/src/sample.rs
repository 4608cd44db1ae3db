//! Uniform sampling without replacement.
//!
//! Both helpers draw through `rand`'s Fisher–Yates based slice methods, so
//! every subset of a given size (and every ordering of it) is equally
//! likely. Sorting with a random comparator is not uniform and must not be
//! used here.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Draw `k` distinct items uniformly at random, in random order.
///
/// `k` is clamped to `items.len()`.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Vec<T> {
    let mut pool = items.to_vec();
    let k = k.min(pool.len());
    let (picked, _) = pool.partial_shuffle(rng, k);
    picked.to_vec()
}

/// Draw one item uniformly at random. `None` if `items` is empty.
pub fn choose<T: Copy, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Option<T> {
    items.choose(rng).copied()
}
