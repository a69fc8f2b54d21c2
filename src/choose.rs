use crate::network::Network;
use crate::network::ROOT;

/// A branching heuristic: given the network, return the header id of the
/// next item to cover.  Only called while the root's ring is non-empty.
pub type Choose<T> = fn(&Network<T>) -> usize;

/// Returns the active primary item with the fewest remaining options
/// (minimum remaining values).  Ties go to the item encountered first in
/// ring order.
///
/// # Example
///
/// ```
/// let matrix = vec![vec![0, 1, 0], vec![1, 1, 0], vec![1, 0, 1]];
/// let net = xcover::build_network(&matrix, None, None, None).unwrap();
/// assert_eq!(xcover::mrv(&net), 3);
/// ```
pub fn mrv<T>(net: &Network<T>) -> usize {
    let mut best = ROOT;
    let mut best_size = usize::MAX;
    let mut j = net.right(ROOT);
    while j != ROOT {
        if net.size(j) < best_size {
            best = j;
            best_size = net.size(j);
        }
        j = net.right(j);
    }
    best
}
