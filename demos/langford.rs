use clap::Parser;
use xcover::Network;

#[derive(Parser)]
struct Cmdline {
    /// Do not print the sequences, just the count.
    #[clap(short, long)]
    no_print: bool,

    n: usize,
}

/// Finds Langford pairings: permutations of 1, 1, 2, 2, ..., n, n in which
/// the two 1s are one unit apart, the two 2s two units apart, and in
/// general the two copies of k are k units apart.  Each pairing is found
/// twice, once per reading direction.

pub fn main() {
    env_logger::init();
    let cmdline = Cmdline::parse();
    let n = cmdline.n;
    if n < 2 {
        // No digit can be placed at all, so there is nothing to build.
        println!("n = {}, pairings = 0 (0 with reversals)", n);
        return;
    }

    let mut net = build_network(n);
    let mut count = 0;
    for solution in net.solve_all() {
        count += 1;
        if cmdline.no_print {
            continue;
        }
        let mut sequence = vec![0; 2 * n];
        for &node in solution.nodes() {
            let &Pair { digit, low, high } = net.meaning(net.option_index(node));
            sequence[low] = digit;
            sequence[high] = digit;
        }
        let text: Vec<String> = sequence.iter().map(usize::to_string).collect();
        println!("{}", text.join(" "));
    }
    println!("n = {}, pairings = {} ({} with reversals)", n, count / 2, count);
}

/// The meaning of an option: digit placed at the two slots `low` and `high`.
pub struct Pair {
    digit: usize,
    low: usize,
    high: usize,
}

/// One primary item per digit, one per slot; an option places a digit into
/// the two slots the right distance apart.
pub fn build_network(n: usize) -> Network<Pair> {
    let mut builder = Network::builder();

    for digit in 1..=n {
        builder.add_primary_item(digit);
    }
    for slot in 0..2 * n {
        builder.add_primary_item(format!("s{}", slot));
    }

    for digit in 1..=n {
        for low in 0..2 * n {
            let high = low + digit + 1;
            if high >= 2 * n {
                break;
            }
            builder.add_option(
                Pair { digit, low, high },
                [
                    digit.to_string(),
                    format!("s{}", low),
                    format!("s{}", high),
                ],
            );
        }
    }

    builder.build()
}
