use rand::Rng;

use crate::selection::Count;

/// Pick `min(requested, pool_size)` distinct indices from `0..pool_size`,
/// every subset equally likely. Uses the thread-local entropy source.
pub fn sample(pool_size: usize, requested: Count) -> Vec<usize> {
    sample_with(&mut rand::thread_rng(), pool_size, requested)
}

/// [`sample`] with a caller-supplied random source
pub fn sample_with<R: Rng>(rng: &mut R, pool_size: usize, requested: Count) -> Vec<usize> {
    let take = requested.resolve(pool_size);
    let mut indices: Vec<usize> = (0..pool_size).collect();

    // Partial Fisher-Yates: after step i, indices[..=i] is a uniform sample
    for i in 0..take {
        let j = rng.gen_range(i..pool_size);
        indices.swap(i, j);
    }

    indices.truncate(take);
    indices
}
