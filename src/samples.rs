//! Builders for some well-known exact cover problems, handy for tests and
//! doc examples.

use crate::Network;

/// Builds the network for the toy problem in equation (49) of Knuth
/// 7.2.2.1.
///
/// The problem has 3 primary items, `p`, `q`, and `r`, and 2 secondary
/// items, `x` and `y`.  The options are:
/// - `p q x y:A`
/// - `p r x:A y`
/// - `p x:B`
/// - `q x:A`
/// - `r y:B`
///
/// # Example
///
/// ```
/// use xcover::samples::toy;
///
/// let mut net = toy();
/// let solutions = net.solve_all();
/// assert_eq!(solutions.len(), 1);
/// ```
pub fn toy() -> Network<usize> {
    let mut builder = Network::builder();
    builder.add_primary_items(["p", "q", "r"]);
    builder.add_secondary_items(["x", "y"]);
    builder.add_option(1, ["p", "q", "x", "y:A"]);
    builder.add_option(2, ["p", "r", "x:A", "y"]);
    builder.add_option(3, ["p", "x:B"]);
    builder.add_option(4, ["q", "x:A"]);
    builder.add_option(5, ["r", "y:B"]);
    builder.build()
}

/// Builds the network for the example shown in Table 1 of Knuth 7.2.2.1:
/// seven items `a` through `g` and six options, with exactly one exact
/// cover.  Each option's meaning is its row number.
///
/// # Example
///
/// ```
/// use xcover::samples::knuth;
///
/// let mut net = knuth();
/// let solution = net.solve_unique().unique().cloned().unwrap();
/// assert_eq!(solution.meanings(&net), [&3, &4, &0]);
/// ```
pub fn knuth() -> Network<usize> {
    let mut builder = Network::builder();
    builder.add_primary_items(["a", "b", "c", "d", "e", "f", "g"]);
    builder.add_option(0, ["c", "e"]);
    builder.add_option(1, ["a", "d", "g"]);
    builder.add_option(2, ["b", "c", "f"]);
    builder.add_option(3, ["a", "d", "f"]);
    builder.add_option(4, ["b", "g"]);
    builder.add_option(5, ["d", "e", "g"]);
    builder.build()
}
