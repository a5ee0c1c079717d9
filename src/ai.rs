// Opponent targeting: uniform choice over cells not yet fired at.
// Uses no_std and avoids heap allocations.

use rand::Rng;

use crate::common::Coord;
use crate::grid::BB;

/// Picks a cell uniformly from the complement of `fired`. Sampling the
/// complement directly means the choice never repeats and always
/// terminates; `None` once every cell has been fired at.
pub fn uniform_target<R: Rng + ?Sized>(fired: &BB, rng: &mut R) -> Option<Coord> {
    let open = !*fired;
    let remaining = open.count_ones();
    if remaining == 0 {
        return None;
    }
    let k = rng.random_range(0..remaining);
    open.iter().nth(k)
}
