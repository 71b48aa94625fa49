//! Uniform random selection

use rand::Rng;

use crate::{Error, Result};

/// Pick one element with probability 1/N using the thread-local RNG
pub fn pick<T>(items: &[T]) -> Result<&T> {
    pick_with(items, &mut rand::thread_rng())
}

/// Pick one element with probability 1/N using `rng`
///
/// Selecting from an empty slice is a caller bug and fails with
/// `Error::InvalidArgument`.
pub fn pick_with<'a, T, R>(items: &'a [T], rng: &mut R) -> Result<&'a T>
where
    R: Rng,
{
    if items.is_empty() {
        return Err(Error::InvalidArgument(
            "cannot select from an empty sequence".to_string(),
        ));
    }

    Ok(&items[rng.gen_range(0..items.len())])
}
