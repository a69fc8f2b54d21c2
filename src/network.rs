use crate::arena::Arena;
use crate::arena::Node;
use crate::builder::BuildError;
use crate::builder::Builder;
use crate::choose::mrv;
use crate::choose::Choose;
use crate::search::Search;
use crate::search::Solution;
use crate::unique::Unique;
use fixedbitset::FixedBitSet;
use log::debug;

/// Id of the root sentinel, the head of the horizontal item ring.
pub const ROOT: usize = 0;

/// Whether the network carries color constraints.  Chosen once at build
/// time; the colored link operations differ from the plain ones only in
/// that they leave purified-consistent nodes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Plain,
    Colored,
}

/// A compiled exact cover problem: one arena of doubly linked nodes, ready
/// to be searched.
///
/// Ids are assigned in build order: the root is 0, the item headers are
/// `1..=width`, and each option row is preceded by a spacer, with one final
/// spacer after the last row.  The type parameter `T` is a caller-supplied
/// meaning attached to each option by the [`Builder`]; the solver never
/// looks at it.
///
/// To build a network, use the `builder()` method:
/// ```
/// use xcover::Network;
/// let mut builder = Network::builder();
/// builder.add_primary_item("a");
/// builder.add_option(1, ["a"]);
/// let net = builder.build();
/// ```
/// or compile an integer matrix directly with [`build_network`].
#[derive(Debug, Clone, PartialEq)]
pub struct Network<T> {
    arena: Arena,
    /// Header names, indexed by header id; index 0 is the root.
    names: Vec<String>,
    width: usize,
    primary: usize,
    flavor: Flavor,
    /// Dense color id (1-based) to the original matrix token.
    color_tokens: Vec<u32>,
    /// Dense color id to a display label.
    color_labels: Vec<String>,
    /// One meaning per option row.
    meanings: Vec<T>,
}

/// Compiles an exact cover matrix into a [`Network`].
///
/// Matrix values: `0` means the option does not include the item; `1` means
/// it does; a value `k >= 2` in a secondary column includes the item with
/// color token `k`.  Columns `0..primary` are primary, the rest secondary.
/// When `primary` and `secondary` are both omitted every column is primary;
/// giving one determines the other from the width.
///
/// Distinct color tokens are numbered densely from 1 in first-encounter
/// order, and the original tokens are kept so solutions can be reported in
/// the caller's vocabulary.
///
/// # Example
///
/// ```
/// let matrix = vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 1, 1]];
/// let mut net = xcover::build_network(&matrix, Some(&["A", "B", "C"]), None, None).unwrap();
/// let solutions = net.solve_all();
/// assert_eq!(solutions.len(), 2);
/// assert_eq!(solutions[0].option_indices(&net), [0, 1]);
/// assert_eq!(solutions[1].option_indices(&net), [2]);
/// ```
pub fn build_network(
    matrix: &[Vec<u32>],
    names: Option<&[&str]>,
    primary: Option<usize>,
    secondary: Option<usize>,
) -> Result<Network<()>, BuildError> {
    let meanings = vec![(); matrix.len()];
    Network::build(matrix, names, primary, secondary, meanings)
}

impl<T> Network<T> {
    /// Creates a [`Builder`] to configure a network from named items.
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    pub(crate) fn build(
        matrix: &[Vec<u32>],
        names: Option<&[&str]>,
        primary: Option<usize>,
        secondary: Option<usize>,
        meanings: Vec<T>,
    ) -> Result<Self, BuildError> {
        let width = matrix.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(BuildError::EmptyMatrix);
        }
        for (row, cells) in matrix.iter().enumerate() {
            if cells.len() != width {
                return Err(BuildError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        let primary = match (primary, secondary) {
            (None, None) => width,
            (Some(p), None) => {
                if p > width {
                    return Err(BuildError::PrimaryOutOfRange { count: p, width });
                }
                p
            }
            (None, Some(s)) => {
                if s > width {
                    return Err(BuildError::SecondaryOutOfRange { count: s, width });
                }
                width - s
            }
            (Some(p), Some(s)) => {
                if p + s != width {
                    return Err(BuildError::SplitMismatch {
                        primary: p,
                        secondary: s,
                        width,
                    });
                }
                p
            }
        };

        let names = names.unwrap_or(&[]);
        if names.len() > width {
            return Err(BuildError::TooManyNames {
                count: names.len(),
                width,
            });
        }

        // Color tokens are the distinct secondary values above 1, numbered
        // densely in first-encounter order.  A value above 1 anywhere makes
        // the network colored, but primary entries never take a color.
        let mut flavor = Flavor::Plain;
        let mut color_tokens: Vec<u32> = Vec::new();
        for row in matrix {
            for (index, &val) in row.iter().enumerate() {
                if val > 1 {
                    flavor = Flavor::Colored;
                    if index >= primary && !color_tokens.contains(&val) {
                        color_tokens.push(val);
                    }
                }
            }
        }
        let color_labels = color_tokens.iter().map(u32::to_string).collect();
        let color_of = |index: usize, val: u32| -> i32 {
            if index < primary || val <= 1 {
                0
            } else {
                color_tokens.iter().position(|&t| t == val).unwrap() as i32 + 1
            }
        };

        let mut arena = Arena::new();
        let root = arena.add_header();
        debug_assert_eq!(root, ROOT);

        // Headers, with only the primary ones spliced into the root's ring.
        let mut header_names = Vec::with_capacity(width + 1);
        header_names.push(ROOT.to_string());
        let mut left = root;
        for index in 0..width {
            let header = arena.add_header();
            let name = names
                .get(index)
                .map_or_else(|| header.to_string(), |n| (*n).to_string());
            header_names.push(name);
            if index < primary {
                arena.add_right(left, header);
                left = header;
            }
        }

        // Option rows, each preceded by a spacer.  A spacer's up link is the
        // first node of the row before it, its down link the last node of
        // the row after it; the unreachable ends keep their self-loops.
        let mut first = None;
        for row in matrix {
            let spacer = arena.add_spacer();
            if let Some(f) = first {
                arena[spacer].up = f;
            }
            first = None;
            let mut last = None;
            for (index, &val) in row.iter().enumerate() {
                if val == 0 {
                    continue;
                }
                let node = arena.add_option_node(index + 1);
                arena[node].color = color_of(index, val);
                first.get_or_insert(node);
                last = Some(node);
            }
            if let Some(l) = last {
                arena[spacer].down = l;
            }
        }
        let spacer = arena.add_spacer();
        if let Some(f) = first {
            arena[spacer].up = f;
        }

        debug!(
            "built network: {} items ({} primary), {} options, {} colors, {} nodes",
            width,
            primary,
            matrix.len(),
            color_tokens.len(),
            arena.len()
        );

        Ok(Network {
            arena,
            names: header_names,
            width,
            primary,
            flavor,
            color_tokens,
            color_labels,
            meanings,
        })
    }

    /// Number of items (columns), primary and secondary together.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of primary items.  Their headers are ids `1..=num_primary()`.
    pub fn num_primary(&self) -> usize {
        self.primary
    }

    /// Number of options (rows).
    pub fn num_options(&self) -> usize {
        self.meanings.len()
    }

    /// True if any option carries a color constraint.
    pub fn is_colored(&self) -> bool {
        self.flavor == Flavor::Colored
    }

    /// The meaning attached to an option by the builder.
    pub fn meaning(&self, option_index: usize) -> &T {
        &self.meanings[option_index]
    }

    /// Name of the item with header id `header`.
    pub fn name(&self, header: usize) -> &str {
        &self.names[header]
    }

    /// The original matrix token behind a dense color id.
    pub fn color_token(&self, color: i32) -> Option<u32> {
        usize::try_from(color - 1)
            .ok()
            .and_then(|i| self.color_tokens.get(i).copied())
    }

    pub(crate) fn color_tokens(&self) -> &[u32] {
        &self.color_tokens
    }

    pub(crate) fn set_color_labels(&mut self, labels: Vec<String>) {
        debug_assert_eq!(labels.len(), self.color_tokens.len());
        self.color_labels = labels;
    }

    pub fn up(&self, id: usize) -> usize {
        self.arena[id].up
    }

    pub fn down(&self, id: usize) -> usize {
        self.arena[id].down
    }

    pub fn left(&self, id: usize) -> usize {
        self.arena[id].left
    }

    pub fn right(&self, id: usize) -> usize {
        self.arena[id].right
    }

    /// A header's own id, an option node's header id, or a spacer's
    /// non-positive serial.
    pub fn column(&self, id: usize) -> isize {
        self.arena[id].column
    }

    /// Count of active option nodes in a header's column.
    pub fn size(&self, header: usize) -> usize {
        self.arena[header].size
    }

    /// The node's color: 0 for none, a positive dense id, or -1 while the
    /// node is consistent with a committed color.
    pub fn color(&self, id: usize) -> i32 {
        self.arena[id].color
    }

    /// True for the spacer nodes separating option rows.
    pub fn is_spacer(&self, id: usize) -> bool {
        id != ROOT && self.arena[id].column <= 0
    }

    /// True when every primary item has been covered.
    pub(crate) fn all_covered(&self) -> bool {
        self.arena[ROOT].right == ROOT
    }

    /// Covers item `i`: hides every option that contains it, then unlinks
    /// the header from the horizontal ring.
    pub fn cover(&mut self, i: usize) {
        let mut p = self.arena[i].down;
        while p != i {
            self.hide(p);
            p = self.arena[p].down;
        }
        let l = self.arena[i].left;
        let r = self.arena[i].right;
        self.arena[l].right = r;
        self.arena[r].left = l;
    }

    /// Exact reverse of [`cover`](Network::cover): relinks the header, then
    /// unhides its options bottom to top.
    pub fn uncover(&mut self, i: usize) {
        let l = self.arena[i].left;
        let r = self.arena[i].right;
        self.arena[l].right = i;
        self.arena[r].left = i;
        let mut p = self.arena[i].up;
        while p != i {
            self.unhide(p);
            p = self.arena[p].up;
        }
    }

    /// Unlinks the other nodes of `p`'s option from their columns.
    ///
    /// The row is walked by id increment, bouncing from the end spacer back
    /// to the row's first node via the spacer's up link.
    pub fn hide(&mut self, p: usize) {
        match self.flavor {
            Flavor::Plain => self.hide_plain(p),
            Flavor::Colored => self.hide_colored(p),
        }
    }

    /// Exact reverse of [`hide`](Network::hide): walks the row by id
    /// decrement, bouncing at the leading spacer via its down link.
    pub fn unhide(&mut self, p: usize) {
        match self.flavor {
            Flavor::Plain => self.unhide_plain(p),
            Flavor::Colored => self.unhide_colored(p),
        }
    }

    fn hide_plain(&mut self, p: usize) {
        let mut q = p + 1;
        while q != p {
            let Node {
                up, down, column, ..
            } = self.arena[q];
            if column <= 0 {
                q = up;
            } else {
                self.arena[up].down = down;
                self.arena[down].up = up;
                self.arena[column as usize].size -= 1;
                q += 1;
            }
        }
    }

    fn unhide_plain(&mut self, p: usize) {
        let mut q = p - 1;
        while q != p {
            let Node {
                up, down, column, ..
            } = self.arena[q];
            if column <= 0 {
                q = down;
            } else {
                self.arena[up].down = q;
                self.arena[down].up = q;
                self.arena[column as usize].size += 1;
                q -= 1;
            }
        }
    }

    fn hide_colored(&mut self, p: usize) {
        let mut q = p + 1;
        while q != p {
            let Node {
                up,
                down,
                column,
                color,
                ..
            } = self.arena[q];
            if column <= 0 {
                q = up;
            } else {
                // A negative color marks a node already accounted for by a
                // committed color; it stays linked and keeps its size.
                if color >= 0 {
                    self.arena[up].down = down;
                    self.arena[down].up = up;
                    self.arena[column as usize].size -= 1;
                }
                q += 1;
            }
        }
    }

    fn unhide_colored(&mut self, p: usize) {
        let mut q = p - 1;
        while q != p {
            let Node {
                up,
                down,
                column,
                color,
                ..
            } = self.arena[q];
            if column <= 0 {
                q = down;
            } else {
                if color >= 0 {
                    self.arena[up].down = q;
                    self.arena[down].up = q;
                    self.arena[column as usize].size += 1;
                }
                q -= 1;
            }
        }
    }

    /// Commits to the part of an option that touches item `j` via node `p`.
    ///
    /// In a plain network this covers `j`.  In a colored network an
    /// uncolored node covers `j`, a colored node purifies the item instead,
    /// and a node already marked consistent needs no work at all.
    pub fn commit(&mut self, p: usize, j: usize) {
        match self.flavor {
            Flavor::Plain => self.cover(j),
            Flavor::Colored => {
                let c = self.arena[p].color;
                if c == 0 {
                    self.cover(j);
                } else if c > 0 {
                    self.purify(p);
                }
            }
        }
    }

    /// Exact reverse of [`commit`](Network::commit).
    pub fn uncommit(&mut self, p: usize, j: usize) {
        match self.flavor {
            Flavor::Plain => self.uncover(j),
            Flavor::Colored => {
                let c = self.arena[p].color;
                if c == 0 {
                    self.uncover(j);
                } else if c > 0 {
                    self.unpurify(p);
                }
            }
        }
    }

    /// Restricts `p`'s item to `p`'s color: options of the same color are
    /// marked consistent (color -1) and stay linked; options of any other
    /// color are hidden.  The committed color is recorded on the header.
    ///
    /// Only called on a node that has already been detached from its column
    /// by the cover of the chosen option's item, so the walk never visits
    /// `p` itself.
    pub fn purify(&mut self, p: usize) {
        let c = self.arena[p].color;
        let i = self.arena[p].column as usize;
        self.arena[i].color = c;
        let mut q = self.arena[i].down;
        while q != i {
            if self.arena[q].color == c {
                self.arena[q].color = -1;
            } else {
                self.hide(q);
            }
            q = self.arena[q].down;
        }
    }

    /// Exact reverse of [`purify`](Network::purify): walks the column bottom
    /// to top restoring consistent nodes to their color and unhiding the
    /// rest, then clears the committed color from the header.
    pub fn unpurify(&mut self, p: usize) {
        let c = self.arena[p].color;
        let i = self.arena[p].column as usize;
        let mut q = self.arena[i].up;
        while q != i {
            if self.arena[q].color < 0 {
                self.arena[q].color = c;
            } else {
                self.unhide(q);
            }
            q = self.arena[q].up;
        }
        self.arena[i].color = 0;
    }

    /// Commits every other item of the option containing `x`, left to right.
    pub(crate) fn commit_row(&mut self, x: usize) {
        let mut p = x + 1;
        while p != x {
            let j = self.arena[p].column;
            if j <= 0 {
                p = self.arena[p].up;
            } else {
                self.commit(p, j as usize);
                p += 1;
            }
        }
    }

    /// Exact reverse of [`commit_row`](Network::commit_row), right to left.
    pub(crate) fn uncommit_row(&mut self, x: usize) {
        let mut p = x - 1;
        while p != x {
            let j = self.arena[p].column;
            if j <= 0 {
                p = self.arena[p].down;
            } else {
                self.uncommit(p, j as usize);
                p -= 1;
            }
        }
    }

    /// All node ids of the option row containing `node`, in column order.
    pub fn option_nodes(&self, node: usize) -> Vec<usize> {
        debug_assert!(!self.is_spacer(node));
        let mut q = node;
        while self.arena[q].column > 0 {
            q += 1;
        }
        let mut ids = Vec::new();
        let mut q = self.arena[q].up;
        while self.arena[q].column > 0 {
            ids.push(q);
            q += 1;
        }
        ids
    }

    /// 0-based row index of the option containing `node`, recovered from
    /// the serial of the spacer that precedes the row.
    pub fn option_index(&self, node: usize) -> usize {
        debug_assert!(!self.is_spacer(node));
        let mut q = node;
        while self.arena[q].column > 0 {
            q -= 1;
        }
        (-self.arena[q].column) as usize
    }

    /// Item names of the option containing `node`, with `:color` suffixes
    /// on colored entries.
    ///
    /// ```
    /// let mut net = xcover::samples::toy();
    /// let solutions = net.solve_all();
    /// assert_eq!(net.format_option(solutions[0].nodes()[0]), "q x:A");
    /// assert_eq!(net.format_option(solutions[0].nodes()[1]), "p r x:A y");
    /// ```
    pub fn format_option(&self, node: usize) -> String {
        let mut out = String::new();
        for id in self.option_nodes(node) {
            if !out.is_empty() {
                out.push(' ');
            }
            let column = self.arena[id].column as usize;
            out.push_str(self.name(column));
            let mut color = self.arena[id].color;
            if color < 0 {
                // Consistent nodes carry their color on the header.
                color = self.arena[column].color;
            }
            if color > 0 {
                out.push(':');
                out.push_str(&self.color_labels[(color - 1) as usize]);
            }
        }
        out
    }

    /// Checks that a solution covers every primary item exactly once and
    /// uses each secondary item consistently: either a single uncolored
    /// use, or any number of uses of one color.
    pub fn is_exact_cover(&self, solution: &Solution) -> bool {
        let mut covered = FixedBitSet::with_capacity(self.width + 1);
        let mut uses: Vec<Vec<i32>> = vec![Vec::new(); self.width + 1];
        for &node in solution.nodes() {
            for id in self.option_nodes(node) {
                let column = self.arena[id].column as usize;
                if column <= self.primary {
                    if covered.contains(column) {
                        return false;
                    }
                    covered.insert(column);
                } else {
                    let mut c = self.arena[id].color;
                    if c < 0 {
                        c = self.arena[column].color;
                    }
                    uses[column].push(c);
                }
            }
        }
        if (1..=self.primary).any(|h| !covered.contains(h)) {
            return false;
        }
        uses.iter()
            .all(|u| u.len() <= 1 || u.iter().all(|&c| c > 0 && c == u[0]))
    }

    /// Starts a lazy search using the default [`mrv`] heuristic.
    ///
    /// Solutions come out in a deterministic order: items are chosen by
    /// minimum remaining values with ties going to ring order, and each
    /// chosen item's options are tried top to bottom.  Draining the search
    /// restores the network to its freshly built state; dropping it early
    /// leaves the network mid-search, so rebuild before reusing it.
    pub fn search(&mut self) -> Search<'_, T> {
        Search::new(self, mrv)
    }

    /// Starts a lazy search with a caller-supplied branching heuristic.
    pub fn search_with(&mut self, choose: Choose<T>) -> Search<'_, T> {
        Search::new(self, choose)
    }

    /// Finds all solutions.
    ///
    /// # Example
    ///
    /// ```
    /// let mut net = xcover::samples::toy();
    /// let solutions = net.solve_all();
    /// assert_eq!(solutions.len(), 1);
    /// assert_eq!(solutions[0].option_indices(&net), [3, 1]);
    /// ```
    pub fn solve_all(&mut self) -> Vec<Solution> {
        self.search().collect()
    }

    /// Finds the first solution, if any.  The network is left mid-search.
    pub fn solve_once(&mut self) -> Option<Solution> {
        self.search().next()
    }

    /// Solves the network, distinguishing no solution, a unique solution,
    /// and multiple solutions.  The network is left mid-search unless the
    /// problem had no solution.
    ///
    /// # Examples
    ///
    /// ```
    /// use xcover::Network;
    ///
    /// // The following problem is ambiguous, because options
    /// // a and b are identical.
    /// let mut builder = Network::builder();
    /// builder.add_primary_item("x");
    /// builder.add_primary_item("y");
    /// builder.add_option("a", ["x", "y"]);
    /// builder.add_option("b", ["x", "y"]);
    /// let mut net = builder.build();
    /// assert!(net.solve_unique().is_ambiguous());
    /// ```
    pub fn solve_unique(&mut self) -> Unique<Solution> {
        let mut search = self.search();
        match (search.next(), search.next()) {
            (Some(s1), Some(s2)) => Unique::Ambiguous(s1, s2),
            (Some(s1), None) => Unique::One(s1),
            (None, _) => Unique::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ups<T>(net: &Network<T>) -> Vec<usize> {
        (0..net.arena.len()).map(|i| net.arena[i].up).collect()
    }

    fn downs<T>(net: &Network<T>) -> Vec<usize> {
        (0..net.arena.len()).map(|i| net.arena[i].down).collect()
    }

    fn columns<T>(net: &Network<T>) -> Vec<isize> {
        (0..net.arena.len()).map(|i| net.arena[i].column).collect()
    }

    fn colors<T>(net: &Network<T>) -> Vec<i32> {
        (0..net.arena.len()).map(|i| net.arena[i].color).collect()
    }

    fn sizes<T>(net: &Network<T>, headers: usize) -> Vec<usize> {
        (1..=headers).map(|i| net.arena[i].size).collect()
    }

    fn lefts<T>(net: &Network<T>, upto: usize) -> Vec<usize> {
        (0..=upto).map(|i| net.arena[i].left).collect()
    }

    fn rights<T>(net: &Network<T>, upto: usize) -> Vec<usize> {
        (0..=upto).map(|i| net.arena[i].right).collect()
    }

    fn seven_items() -> Network<()> {
        // The example from TAOCP 7.2.2.1, Table 1:
        //       a   b   c   d   e   f   g
        //       0   0   1   0   1   0   0
        //       1   0   0   1   0   0   1
        //       0   1   1   0   0   1   0
        //       1   0   0   1   0   1   0
        //       0   1   0   0   0   0   1
        //       0   0   0   1   1   0   1
        let matrix = vec![
            vec![0, 0, 1, 0, 1, 0, 0],
            vec![1, 0, 0, 1, 0, 0, 1],
            vec![0, 1, 1, 0, 0, 1, 0],
            vec![1, 0, 0, 1, 0, 1, 0],
            vec![0, 1, 0, 0, 0, 0, 1],
            vec![0, 0, 0, 1, 1, 0, 1],
        ];
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        build_network(&matrix, Some(&names), None, None).unwrap()
    }

    fn four_items() -> Network<()> {
        //       B   C   E   F
        //       0   1   1   1
        //       1   1   0   1
        let matrix = vec![vec![0, 1, 1, 1], vec![1, 1, 0, 1]];
        build_network(&matrix, Some(&["B", "C", "E", "F"]), None, None).unwrap()
    }

    fn toy_matrix() -> Network<()> {
        //       p   q   r   x   y
        //       1   1       1   2
        //       1       1   2   1
        //       1           3
        //           1       2
        //               1       3
        let matrix = vec![
            vec![1, 1, 0, 1, 2],
            vec![1, 0, 1, 2, 1],
            vec![1, 0, 0, 3, 0],
            vec![0, 1, 0, 2, 0],
            vec![0, 0, 1, 0, 3],
        ];
        build_network(&matrix, Some(&["p", "q", "r", "x", "y"]), Some(3), None).unwrap()
    }

    #[test]
    fn test_build_seven_items() {
        // Node ids:
        //   0   1   2   3   4   5   6   7
        //   8           9       10
        //   11  12          13          14
        //   15      16  17          18
        //   19  20          21      22
        //   23      24                  25
        //   26              27  28      29
        //   30
        let net = seven_items();

        assert_eq!(net.names, ["0", "a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(lefts(&net, 7), [7, 0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(rights(&net, 7), [1, 2, 3, 4, 5, 6, 7, 0]);
        assert_eq!(sizes(&net, 7), [2, 2, 2, 3, 2, 2, 3]);
        assert_eq!(
            columns(&net),
            [
                0, 1, 2, 3, 4, 5, 6, 7, //
                0, 3, 5, //
                -1, 1, 4, 7, //
                -2, 2, 3, 6, //
                -3, 1, 4, 6, //
                -4, 2, 7, //
                -5, 4, 5, 7, //
                -6
            ]
        );
        assert_eq!(
            ups(&net),
            [
                0, 20, 24, 17, 27, 28, 22, 29, //
                8, 3, 5, //
                9, 1, 4, 7, //
                12, 2, 9, 6, //
                16, 12, 13, 18, //
                20, 16, 14, //
                24, 21, 10, 25, //
                27
            ]
        );
        assert_eq!(
            downs(&net),
            [
                0, 12, 16, 9, 13, 10, 18, 14, //
                10, 17, 28, //
                14, 20, 21, 25, //
                18, 24, 3, 22, //
                22, 1, 27, 6, //
                25, 2, 29, //
                29, 4, 5, 7, //
                30
            ]
        );
        assert!(!net.is_colored());
    }

    #[test]
    fn test_build_colored() {
        // Node ids:
        //   0   1   2   3   4   5
        //   6   7   8       9   10
        //   11  12      13  14  15
        //   16  17          18
        //   19      20      21
        //   22          23      24
        //   25
        let net = toy_matrix();

        assert_eq!(net.names, ["0", "p", "q", "r", "x", "y"]);
        assert!(net.is_colored());
        assert_eq!(net.num_primary(), 3);
        // Secondary headers stay out of the root's ring.
        assert_eq!(lefts(&net, 5), [3, 0, 1, 2, 4, 5]);
        assert_eq!(rights(&net, 5), [1, 2, 3, 0, 4, 5]);
        assert_eq!(sizes(&net, 5), [3, 2, 2, 4, 3]);
        assert_eq!(net.color_tokens, [2, 3]);
        assert_eq!(
            columns(&net),
            [
                0, 1, 2, 3, 4, 5, //
                0, 1, 2, 4, 5, //
                -1, 1, 3, 4, 5, //
                -2, 1, 4, //
                -3, 2, 4, //
                -4, 3, 5, //
                -5
            ]
        );
        assert_eq!(
            colors(&net),
            [
                0, 0, 0, 0, 0, 0, //
                0, 0, 0, 0, 1, //
                0, 0, 0, 1, 0, //
                0, 0, 2, //
                0, 0, 1, //
                0, 0, 2, //
                0
            ]
        );
        assert_eq!(
            ups(&net),
            [
                0, 17, 20, 23, 21, 24, //
                6, 1, 2, 4, 5, //
                7, 7, 3, 9, 10, //
                12, 12, 14, //
                17, 8, 18, //
                20, 13, 15, //
                23
            ]
        );
        assert_eq!(
            downs(&net),
            [
                0, 7, 8, 13, 9, 10, //
                10, 12, 20, 14, 15, //
                15, 17, 23, 18, 24, //
                18, 1, 21, //
                21, 2, 4, //
                24, 3, 5, //
                25
            ]
        );
    }

    #[test]
    fn test_hide_unhide() {
        // Node ids:
        //   0   1   2   3   4
        //   5       6   7   8
        //   9   10  11      12
        //   13
        let mut net = four_items();
        let fresh = net.clone();

        assert_eq!(ups(&net), [0, 10, 11, 7, 12, 5, 2, 3, 4, 6, 1, 6, 8, 10]);
        assert_eq!(downs(&net), [0, 10, 6, 7, 8, 8, 11, 3, 12, 12, 1, 2, 4, 13]);
        assert_eq!(sizes(&net, 4), [1, 2, 1, 2]);

        net.hide(10);
        assert_eq!(ups(&net), [0, 10, 6, 7, 8, 5, 2, 3, 4, 6, 1, 6, 8, 10]);
        assert_eq!(downs(&net), [0, 10, 6, 7, 8, 8, 2, 3, 4, 12, 1, 2, 4, 13]);
        assert_eq!(sizes(&net, 4), [1, 1, 1, 1]);
        // The horizontal ring is untouched.
        assert_eq!(lefts(&net, 4), [4, 0, 1, 2, 3]);
        assert_eq!(rights(&net, 4), [1, 2, 3, 4, 0]);

        net.unhide(10);
        assert_eq!(net, fresh);
    }

    #[test]
    fn test_cover_uncover() {
        let mut net = four_items();
        let fresh = net.clone();

        net.cover(1);
        assert_eq!(lefts(&net, 4), [4, 0, 0, 2, 3]);
        assert_eq!(rights(&net, 4), [2, 2, 3, 4, 0]);
        assert_eq!(sizes(&net, 4), [1, 1, 1, 1]);

        net.uncover(1);
        assert_eq!(net, fresh);
    }

    #[test]
    fn test_cover_uncover_restores_seven_items() {
        let mut net = seven_items();
        let fresh = net.clone();
        net.cover(1);
        net.uncover(1);
        assert_eq!(net, fresh);
    }

    #[test]
    fn test_commit_uncommit_restores_colored() {
        let mut net = toy_matrix();
        let fresh = net.clone();

        // Take the option "q x:2" the way the search would: cover the
        // chosen item, commit the rest of the option, then back all the
        // way out.
        net.cover(2);
        net.commit_row(20);
        net.uncommit_row(20);
        net.uncover(2);
        assert_eq!(net, fresh);
    }

    #[test]
    fn test_purify_marks_and_hides() {
        let mut net = toy_matrix();

        // Covering q detaches node 21 (x with color 1) from column x;
        // committing it purifies x.
        net.cover(2);
        net.commit(21, 4);
        assert_eq!(net.color(4), 1, "header records the committed color");
        assert_eq!(net.color(14), -1, "matching node marked consistent");
        assert_eq!(net.color(18), 2, "conflicting node keeps its color");
        // The conflicting option "p x:3" lost its other nodes: p no longer
        // offers row 2.
        assert_eq!(net.size(1), 1);

        net.uncommit(21, 4);
        assert_eq!(net.color(4), 0);
        assert_eq!(net.color(14), 1);
        net.uncover(2);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let err = build_network(&[], None, None, None).unwrap_err();
        assert!(matches!(err, BuildError::EmptyMatrix));

        let err = build_network(&[vec![]], None, None, None).unwrap_err();
        assert!(matches!(err, BuildError::EmptyMatrix));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let matrix = vec![vec![1, 0], vec![1]];
        let err = build_network(&matrix, None, None, None).unwrap_err();
        assert!(matches!(
            err,
            BuildError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_bad_split_rejected() {
        let matrix = vec![vec![1, 0, 1]];
        let err = build_network(&matrix, None, Some(4), None).unwrap_err();
        assert!(matches!(
            err,
            BuildError::PrimaryOutOfRange { count: 4, width: 3 }
        ));

        let err = build_network(&matrix, None, None, Some(4)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::SecondaryOutOfRange { count: 4, width: 3 }
        ));

        let err = build_network(&matrix, None, Some(2), Some(2)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::SplitMismatch {
                primary: 2,
                secondary: 2,
                width: 3
            }
        ));

        let err = build_network(&matrix, Some(&["a", "b", "c", "d"]), None, None).unwrap_err();
        assert!(matches!(
            err,
            BuildError::TooManyNames { count: 4, width: 3 }
        ));
    }

    /// Active headers reachable from the root, walking right.
    fn ring<T>(net: &Network<T>) -> Vec<usize> {
        let mut items = Vec::new();
        let mut j = net.right(ROOT);
        while j != ROOT {
            items.push(j);
            j = net.right(j);
        }
        items
    }

    #[test]
    fn test_ring_integrity() {
        let mut net = seven_items();
        assert_eq!(ring(&net), [1, 2, 3, 4, 5, 6, 7]);

        net.cover(4);
        assert_eq!(ring(&net), [1, 2, 3, 5, 6, 7]);
        // Walking left visits the same headers in reverse.
        let mut reversed = Vec::new();
        let mut j = net.left(ROOT);
        while j != ROOT {
            reversed.push(j);
            j = net.left(j);
        }
        assert_eq!(reversed, [7, 6, 5, 3, 2, 1]);

        // Every active column's ring length matches its size, both ways.
        for &header in &ring(&net) {
            let mut count = 0;
            let mut p = net.down(header);
            while p != header {
                count += 1;
                p = net.down(p);
            }
            assert_eq!(count, net.size(header), "down ring of {header}");
            let mut count = 0;
            let mut p = net.up(header);
            while p != header {
                count += 1;
                p = net.up(p);
            }
            assert_eq!(count, net.size(header), "up ring of {header}");
        }
        net.uncover(4);
    }

    #[test]
    fn test_option_walk() {
        let net = seven_items();
        // Node 13 sits in the middle of option 1 (a d g).
        assert_eq!(net.option_nodes(13), [12, 13, 14]);
        assert_eq!(net.option_index(13), 1);
        assert_eq!(net.format_option(13), "a d g");
        // First and last rows work the same way.
        assert_eq!(net.option_nodes(9), [9, 10]);
        assert_eq!(net.option_index(9), 0);
        assert_eq!(net.option_nodes(29), [27, 28, 29]);
        assert_eq!(net.option_index(29), 5);
    }

    #[test]
    fn test_format_option_colors() {
        let net = toy_matrix();
        assert_eq!(net.format_option(7), "p q x y:2");
        assert_eq!(net.format_option(18), "p x:3");
    }

    #[test]
    fn test_is_exact_cover() {
        let net = seven_items();
        // Rows 3 (a d f), 4 (b g), 0 (c e) partition the items.
        assert!(net.is_exact_cover(&Solution::new(vec![20, 24, 9])));
        // Rows 1 and 3 both cover a.
        assert!(!net.is_exact_cover(&Solution::new(vec![12, 20])));
        // Missing items.
        assert!(!net.is_exact_cover(&Solution::new(vec![9])));

        let colored = toy_matrix();
        // Rows 3 (q x:2) and 1 (p r x:2 y) agree on x's color.
        assert!(colored.is_exact_cover(&Solution::new(vec![20, 12])));
        // Rows 0 (p q x y:2) and 4 (r y:3) cover the primaries but collide
        // on y's color.
        assert!(!colored.is_exact_cover(&Solution::new(vec![7, 23])));
    }
}
