use clap::Parser;
use probe_hash::HashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Random insert/remove workload that reports table statistics.
#[derive(Parser, Debug)]
struct Args {
    /// Number of insert attempts, and then of remove attempts.
    #[arg(short = 'c', long = "count", default_value_t = 300_000)]
    count: usize,

    /// Keys are drawn uniformly from `0..key_range`.
    #[arg(short = 'k', long = "key_range", default_value_t = 300_000)]
    key_range: u64,

    /// Seed for the key generator. Random when omitted.
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut map: HashMap<u64, bool> = HashMap::new();

    let mut duplicates = 0;
    for _ in 0..args.count {
        let key = rng.random_range(0..args.key_range);
        if map.contains_key(&key) {
            duplicates += 1;
        } else if let Err(err) = map.insert(key, true) {
            eprintln!("insert of {key} failed: {err}");
            return;
        }
    }

    println!("{} insertions, {} duplicates", args.count, duplicates);
    println!(
        "capacity {} (index {}), load factor {:.2}%",
        map.capacity(),
        map.capacity_index(),
        map.load_factor() * 100.0
    );
    map.probe_histogram().print();
    map.debug_stats().print();

    let mut unknown = 0;
    for _ in 0..args.count {
        let key = rng.random_range(0..args.key_range);
        if map.remove(&key).is_err() {
            unknown += 1;
        }
    }

    println!();
    println!("{} removals, {} unknown", args.count, unknown);
    println!("{} left", map.len());
    map.probe_histogram().print();
    map.debug_stats().print();
}
