use clap::Parser;
use xcover::Network;

#[derive(Parser)]
struct Cmdline {
    /// Do not print solutions, just the count.
    #[clap(short, long)]
    no_print: bool,

    size: usize,
}

/// Solves the N-Queens problem: place N queens on an NxN chessboard
/// so that no queen can attack any other queen.  Queens can attack
/// horizontally, vertically, or diagonally.

pub fn main() {
    env_logger::init();
    let cmdline = Cmdline::parse();
    let n = cmdline.size;

    let mut net = build_network(n);
    let start_time = std::time::Instant::now();
    let mut count = 0;
    for solution in net.solve_all() {
        count += 1;
        if cmdline.no_print {
            continue;
        }
        let mut grid = vec![vec!['.'; n]; n];
        for &node in solution.nodes() {
            let &Queen { row, col } = net.meaning(net.option_index(node));
            grid[row][col] = 'Q';
        }
        for row in grid {
            println!("{}", row.into_iter().collect::<String>());
        }
        println!();
    }
    let elapsed = start_time.elapsed();
    println!("Found {} solutions in {:?}", count, elapsed);
}

/// The meaning of an option is the position of a queen.
pub struct Queen {
    row: usize,
    col: usize,
}

pub fn build_network(n: usize) -> Network<Queen> {
    let mut builder = Network::builder();

    // We define primary items Ri and Cj to represent the presence of a queen
    // in row i and column j.  We also define secondary items Di and Ei to
    // represent the presence of a queen on the two diagonals.
    //
    // We do not assign a color to the secondary items, so each diagonal is
    // used at most once.
    for i in 0..n {
        builder.add_primary_item(format!("R{}", i));
        builder.add_primary_item(format!("C{}", i));
    }

    for i in 0..2 * n - 1 {
        builder.add_secondary_item(format!("D{}", i));
        builder.add_secondary_item(format!("E{}", i));
    }

    // For each square on the board, we add an option that says that its row,
    // column, and two diagonals are occupied.
    for row in 0..n {
        for col in 0..n {
            let d = row + col;
            let e = n - 1 - row + col;

            builder.add_option(
                Queen { row, col },
                [
                    format!("R{}", row),
                    format!("C{}", col),
                    format!("D{}", d),
                    format!("E{}", e),
                ],
            );
        }
    }

    builder.build()
}
