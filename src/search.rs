use crate::choose::Choose;
use crate::network::Network;
use log::debug;
use log::trace;
use std::time::Duration;
use std::time::Instant;

/// A lazy search over a [`Network`], yielding every exact cover.
///
/// This is Knuth's Algorithm X (Algorithm C on colored networks) with the
/// recursion unrolled into an explicit state machine: one entry in each of
/// the level vectors per open search level.  Covers and commits performed
/// on the way down are undone in exact reverse order on the way back up,
/// so a search that has been drained leaves the network exactly as built.
/// A search that is dropped early leaves the network mid-backtrack, and
/// callers who want to search again should rebuild it.
///
/// The search also keeps the per-level choice and branch counts, from
/// which [`progress`] computes a completion estimate; a caller driving the
/// iterator can read them between solutions to report how far along a long
/// run is.
pub struct Search<'a, T> {
    net: &'a mut Network<T>,
    choose: Choose<T>,
    state: State,
    /// Item covered at each level.
    items: Vec<usize>,
    /// Option node currently tried at each level.
    sol: Vec<usize>,
    /// 1-based index of the candidate tried at each level.
    choices: Vec<usize>,
    /// Number of candidates the level started with.
    branches: Vec<usize>,
    started: Instant,
}

enum State {
    /// Enter a level: yield if everything is covered, otherwise choose and
    /// cover an item.
    Enter,
    /// Try the current candidate of the deepest level.
    Try,
    /// The level below has been exhausted; undo the current candidate and
    /// move to the next one.
    Resume,
    Done,
}

impl<'a, T> Search<'a, T> {
    pub(crate) fn new(net: &'a mut Network<T>, choose: Choose<T>) -> Self {
        let depth = net.num_primary();
        Search {
            net,
            choose,
            state: State::Enter,
            items: Vec::with_capacity(depth),
            sol: Vec::with_capacity(depth),
            choices: Vec::with_capacity(depth),
            branches: Vec::with_capacity(depth),
            started: Instant::now(),
        }
    }

    /// Current depth of the search tree.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    /// 1-based candidate index per open level.
    pub fn choices(&self) -> &[usize] {
        &self.choices
    }

    /// Candidate count per open level, as of when the level was entered.
    pub fn branches(&self) -> &[usize] {
        &self.branches
    }

    /// Estimated fraction of the search space already explored.
    pub fn progress(&self) -> f64 {
        progress(&self.choices, &self.branches)
    }

    /// When the search started.
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Wall-clock time since the search started.
    pub fn runtime(&self) -> Duration {
        self.started.elapsed()
    }
}

impl<T> Iterator for Search<'_, T> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        loop {
            match self.state {
                State::Enter => {
                    if self.net.all_covered() {
                        debug!("solution at depth {}", self.sol.len());
                        self.state = State::Resume;
                        return Some(Solution::new(self.sol.clone()));
                    }
                    let i = (self.choose)(&*self.net);
                    trace!(
                        "level {}: branching on {} ({} candidates)",
                        self.items.len(),
                        self.net.name(i),
                        self.net.size(i)
                    );
                    self.net.cover(i);
                    self.branches.push(self.net.size(i));
                    self.choices.push(1);
                    self.sol.push(self.net.down(i));
                    self.items.push(i);
                    self.state = State::Try;
                }
                State::Try => {
                    let i = *self.items.last().unwrap();
                    let x = *self.sol.last().unwrap();
                    if x == i {
                        // Out of candidates for this item.
                        self.net.uncover(i);
                        self.items.pop();
                        self.sol.pop();
                        self.choices.pop();
                        self.branches.pop();
                        self.state = if self.items.is_empty() {
                            State::Done
                        } else {
                            State::Resume
                        };
                    } else {
                        self.net.commit_row(x);
                        self.state = State::Enter;
                    }
                }
                State::Resume => {
                    if self.sol.is_empty() {
                        // The solution was the empty cover; nothing to undo.
                        self.state = State::Done;
                        continue;
                    }
                    let x = *self.sol.last().unwrap();
                    self.net.uncommit_row(x);
                    *self.sol.last_mut().unwrap() = self.net.down(x);
                    *self.choices.last_mut().unwrap() += 1;
                    self.state = State::Try;
                }
                State::Done => return None,
            }
        }
    }
}

/// One exact cover: an option node id per search level.
///
/// Each id points somewhere into an option row of the network that produced
/// it; the row itself is recovered with [`Network::option_nodes`] or the
/// convenience accessors below.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    nodes: Vec<usize>,
}

impl Solution {
    pub(crate) fn new(nodes: Vec<usize>) -> Self {
        Solution { nodes }
    }

    /// The chosen option nodes, one per level.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the option numbers of the chosen options.  These are the
    /// 0-based indices of the options in the order they were originally
    /// added.
    ///
    /// ```
    /// let mut net = xcover::samples::toy();
    /// let solution = net.solve_all().remove(0);
    /// assert_eq!(solution.option_indices(&net), [3, 1]);
    /// ```
    pub fn option_indices<T>(&self, net: &Network<T>) -> Vec<usize> {
        self.nodes.iter().map(|&n| net.option_index(n)).collect()
    }

    /// Returns the meanings of the chosen options.  The meanings come from
    /// the parameter to `Builder::add_option()`.
    ///
    /// ```
    /// let mut net = xcover::samples::toy();
    /// let solution = net.solve_all().remove(0);
    /// assert_eq!(solution.meanings(&net), [&4, &2]);
    /// ```
    pub fn meanings<'a, T>(&self, net: &'a Network<T>) -> Vec<&'a T> {
        self.nodes
            .iter()
            .map(|&n| net.meaning(net.option_index(n)))
            .collect()
    }
}

/// Estimates how much of the search space has been explored, from the
/// per-level choice and branch counts.
///
/// Working from the deepest level up, each level maps the estimate into the
/// slice of its parent's range that the current candidate occupies, starting
/// from the middle of the current slice.
///
/// # Example
///
/// ```
/// assert_eq!(xcover::progress(&[1, 3], &[2, 4]), 0.3125);
/// ```
pub fn progress(choices: &[usize], branches: &[usize]) -> f64 {
    let mut estimate = 0.5;
    for (&c, &b) in choices.iter().zip(branches).rev() {
        estimate = (estimate + c as f64 - 1.0) / b as f64;
    }
    estimate
}
