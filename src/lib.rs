//! Exact Cover solver based on Knuth's Dancing Links.
//!
//! This crate implements Exact Cover in two flavors: plain exact cover
//! (Algorithm X) and exact cover with secondary items and colors
//! (Algorithm C), as described in Donald Knuth's _The Art of Computer
//! Programming_, Volume 4B, under "Dancing links".
//!
//! The solver takes:
//! * a set of _primary items_, each of which must be covered exactly once;
//! * a set of _secondary items_, each of which may be covered at most once,
//!   or any number of times with one consistent color;
//! * a set of _options_, which are subsets of the primary and secondary items.
//!
//! The solver's job is to find every subset of the options that covers each
//! primary item once and only once, and colors each secondary item
//! consistently.
//!
//! Options can contain secondary items with or without colors.  If a
//! secondary item has no color, then the solver will not use it more than
//! once (so that it defines a "zero or one" constraint).  If an option has a
//! secondary item with a color, then the solver can use that item _with the
//! same color_ as many times as it wants, but not uncolored or with a
//! different color.
//!
//! Problems are described either with the [`Builder`] (named items, colors
//! spelled `"x:A"`), or as a plain integer matrix via [`build_network`].
//! Both compile to the same [`Network`]: a single arena of nodes forming
//! circular doubly linked lists, which the search unlinks and relinks as it
//! explores the option tree.
//!
//! ```
//! use xcover::Network;
//!
//! let mut builder = Network::builder();
//! builder.add_primary_items(["a", "b", "c"]);
//! builder.add_option("first", ["a", "c"]);
//! builder.add_option("second", ["b"]);
//! builder.add_option("third", ["a", "b", "c"]);
//! let mut net = builder.build();
//!
//! let solutions = net.solve_all();
//! assert_eq!(solutions.len(), 2);
//! assert_eq!(solutions[0].meanings(&net), [&"first", &"second"]);
//! assert_eq!(solutions[1].meanings(&net), [&"third"]);
//! ```
//!
//! The solver can be used for many different kinds of problems:
//! - Sudoku-like puzzles
//! - Shape puzzles, such as "tile a 6x10 rectangle with the 12 pentominos"
//! - Langford pairings and N-Queens placements (see the `demos` directory)
//! - Most Nikoli puzzles
//! - Graph coloring
//! - Scheduling
//! - Many more!

mod arena;
mod builder;
mod choose;
mod network;
pub mod samples;
mod search;
mod unique;

pub use self::builder::BuildError;
pub use self::builder::Builder;
pub use self::choose::mrv;
pub use self::choose::Choose;
pub use self::network::build_network;
pub use self::network::Network;
pub use self::network::ROOT;
pub use self::search::progress;
pub use self::search::Search;
pub use self::search::Solution;
pub use self::unique::Unique;
