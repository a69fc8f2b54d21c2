use crate::network::Network;
use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("matrix must have at least one option and one item")]
    EmptyMatrix,
    #[error("option {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{count} primary items requested, but the matrix is only {width} wide")]
    PrimaryOutOfRange { count: usize, width: usize },
    #[error("{count} secondary items requested, but the matrix is only {width} wide")]
    SecondaryOutOfRange { count: usize, width: usize },
    #[error("{primary} primary and {secondary} secondary items do not sum to the matrix width {width}")]
    SplitMismatch {
        primary: usize,
        secondary: usize,
        width: usize,
    },
    #[error("{count} names given for {width} items")]
    TooManyNames { count: usize, width: usize },
    #[error("item {0} is used in an option, but not declared")]
    ItemNotDeclared(String),
    #[error("item {0} is declared as both primary and secondary")]
    ItemDeclaredTwice(String),
    #[error("primary item {0} cannot take a color")]
    ColoredPrimary(String),
    #[error("no items declared")]
    NoItems,
}

/// A builder for a [`Network`].
///
/// The usual way to use this is to call `Network::builder()` to get a
/// Builder, call `add_primary_items()`, `add_secondary_items()`, and
/// `add_option()` to describe the problem, and finally call `build()` to
/// get a Network.
///
/// The `add_option()` method takes a parameter of type `T`, which can carry
/// any data you want.  The solver will not look at the meanings, but simply
/// returns them to you when you call `meanings()` on a Solution.  Typically,
/// this meaning is a struct or enum that helps you reconstruct a solution
/// from a chosen set of options.  For example, if you are solving a Sudoku
/// puzzle, the meaning might be a struct that contains the row, column, and
/// value of a cell.  You can then reconstruct the puzzle by starting from a
/// blank grid and filling in the cells.  See `demos/queens.rs` for a worked
/// example.
///
/// An item in an option is either a declared item name, or `"name:color"`
/// to use a secondary item with a color.  Every item must be declared as
/// either primary or secondary before calling `build()`, although it's OK
/// to call `add_option()` before `add_primary_items()` or
/// `add_secondary_items()`.
///
/// # Example
/// ```
/// use xcover::Network;
///
/// let mut builder = Network::builder();
/// builder.add_primary_items(["p", "q", "r"]);
/// builder.add_secondary_items(["x", "y"]);
/// builder.add_option(1, ["p", "q", "x", "y:A"]);
/// builder.add_option(2, ["p", "r", "x:A", "y"]);
/// builder.add_option(3, ["p", "x:B"]);
/// builder.add_option(4, ["q", "x:A"]);
/// builder.add_option(5, ["r", "y:B"]);
/// let net = builder.build();
/// ```
#[derive(Debug, Clone)]
pub struct Builder<T> {
    primary_items: Vec<String>,
    secondary_items: Vec<String>,
    options: Vec<(T, Vec<String>)>,
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self {
            primary_items: Vec::new(),
            secondary_items: Vec::new(),
            options: Vec::new(),
        }
    }
}

impl<T> Builder<T> {
    /// Creates a new Builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds primary items to the problem.
    pub fn add_primary_items<S: Display>(&mut self, items: impl IntoIterator<Item = S>) {
        self.primary_items
            .extend(items.into_iter().map(|t| t.to_string()));
    }

    /// Adds secondary items to the problem.
    pub fn add_secondary_items<S: Display>(&mut self, items: impl IntoIterator<Item = S>) {
        self.secondary_items
            .extend(items.into_iter().map(|t| t.to_string()));
    }

    /// Adds a single primary item to the problem.
    pub fn add_primary_item(&mut self, item: impl Display) {
        self.primary_items.push(item.to_string());
    }

    /// Adds a single secondary item to the problem.
    pub fn add_secondary_item(&mut self, item: impl Display) {
        self.secondary_items.push(item.to_string());
    }

    /// Adds an option to the problem.
    pub fn add_option<S: Display>(&mut self, meaning: T, items: impl IntoIterator<Item = S>) {
        let items = items.into_iter().map(|i| i.to_string()).collect();
        self.options.push((meaning, items));
    }

    /// Builds the network.  If there is a problem, this will panic.
    pub fn build(self) -> Network<T> {
        self.try_build().unwrap()
    }

    /// Builds the network, returning a Result.  If there is a problem, this
    /// will return a [`BuildError`].
    pub fn try_build(self) -> Result<Network<T>, BuildError> {
        if self.primary_items.is_empty() && self.secondary_items.is_empty() {
            return Err(BuildError::NoItems);
        }
        for name in &self.primary_items {
            if self.secondary_items.contains(name) {
                return Err(BuildError::ItemDeclaredTwice(name.clone()));
            }
        }

        let primary = self.primary_items.len();
        let width = primary + self.secondary_items.len();
        let index_of = |name: &str| -> Option<usize> {
            self.primary_items
                .iter()
                .chain(self.secondary_items.iter())
                .position(|n| n == name)
        };

        // Number the color names in encounter order; token k maps a color to
        // the matrix value k + 2, leaving 0 and 1 their plain meanings.
        let mut color_names: Vec<String> = Vec::new();
        for (_, items) in &self.options {
            for item in items {
                if let Some((_, color)) = item.split_once(':') {
                    if !color_names.iter().any(|c| c == color) {
                        color_names.push(color.to_string());
                    }
                }
            }
        }

        let mut matrix = Vec::with_capacity(self.options.len());
        let mut meanings = Vec::with_capacity(self.options.len());
        for (meaning, items) in self.options {
            let mut row = vec![0u32; width];
            for item in &items {
                match item.split_once(':') {
                    Some((name, color)) => {
                        let index = index_of(name)
                            .ok_or_else(|| BuildError::ItemNotDeclared(name.to_string()))?;
                        if index < primary {
                            return Err(BuildError::ColoredPrimary(name.to_string()));
                        }
                        let token = color_names.iter().position(|c| c == color).unwrap();
                        row[index] = token as u32 + 2;
                    }
                    None => {
                        let index = index_of(item)
                            .ok_or_else(|| BuildError::ItemNotDeclared(item.clone()))?;
                        row[index] = 1;
                    }
                }
            }
            matrix.push(row);
            meanings.push(meaning);
        }

        let names: Vec<&str> = self
            .primary_items
            .iter()
            .chain(self.secondary_items.iter())
            .map(String::as_str)
            .collect();
        let mut net = Network::build(&matrix, Some(&names), Some(primary), None, meanings)?;

        // The network numbered the tokens in its own encounter order; label
        // each dense color id with the name behind its token.
        let labels = net
            .color_tokens()
            .iter()
            .map(|&token| color_names[token as usize - 2].clone())
            .collect();
        net.set_color_labels(labels);
        Ok(net)
    }
}
