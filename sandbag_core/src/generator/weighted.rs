//! Weighted random selection

use rand::Rng;

/// Index of a candidate drawn with probability proportional to its weight
///
/// Draws `r` uniformly in `[0, total)` and walks the candidates, subtracting
/// each weight until `r` falls below the current one. If floating-point drift
/// exhausts the walk without a match, the first candidate is returned.
/// Returns `None` only for an empty slice.
pub fn weighted_index<T, R>(candidates: &[T], weight: impl Fn(&T) -> f64, rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let total: f64 = candidates.iter().map(&weight).sum();
    let mut roll = rng.gen::<f64>() * total;

    for (index, candidate) in candidates.iter().enumerate() {
        let w = weight(candidate);
        if roll < w {
            return Some(index);
        }
        roll -= w;
    }

    Some(0)
}

/// Candidate drawn with probability proportional to its weight
///
/// See [`weighted_index`] for the exact walk and fallback.
pub fn weighted_pick<'a, T, R>(
    candidates: &'a [T],
    weight: impl Fn(&T) -> f64,
    rng: &mut R,
) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    weighted_index(candidates, weight, rng).map(|i| &candidates[i])
}
