use arbitrary::{unstructured::Unstructured, Arbitrary};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use structopt::StructOpt;

use std::{ops::Bound, time};

use ostable::OMap;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u128>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "sets", default_value = "100000")]
    sets: usize,

    #[structopt(long = "dels", default_value = "100000")]
    dels: usize,

    #[structopt(long = "gets", default_value = "100000")]
    gets: usize,

    #[structopt(long = "ranks", default_value = "100000")]
    ranks: usize,

    #[structopt(long = "scans", default_value = "1000")]
    scans: usize,
}

fn main() {
    let opts = Opt::from_args();
    let seed = opts.seed.unwrap_or_else(random);
    println!("seed {}", seed);
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    // initial load, through the zero-compare bulk constructor
    let start = time::Instant::now();
    let entries = (0..opts.loads).map(|key| (key as u64, key as u64));
    let mut index: OMap<u64, u64> = OMap::from_sorted(entries);
    println!("loaded {} items in {:?}", opts.loads, start.elapsed());

    do_incremental(&mut index, &opts, &mut rng);

    let start = time::Instant::now();
    let mut n = 0;
    for _entry in index.iter() {
        n += 1;
    }
    println!("iter-ed {} items, took {:?}", n, start.elapsed());

    if !index.is_empty() {
        let start = time::Instant::now();
        for _i in 0..opts.ranks {
            let rank = rng.gen::<usize>() % index.len();
            index.select(rank);
        }
        println!("select-ed {} ranks, took {:?}", opts.ranks, start.elapsed());
    }

    do_scans(&index, &opts, seed);
}

fn do_incremental(index: &mut OMap<u64, u64>, opts: &Opt, rng: &mut SmallRng) {
    let start = time::Instant::now();
    let total = opts.sets + opts.dels + opts.gets;
    let key_space = (opts.loads as u64) * 2 + 1;
    let mut n = total;
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        let key = rng.gen::<u64>() % key_space;
        if op < opts.sets {
            let val = rng.gen::<u64>();
            index.set(key, val);
        } else if op < (opts.sets + opts.dels) {
            index.remove(&key);
        } else {
            index.get(&key);
        }
        n -= 1;
    }
    println!("incremental for operations {}, took {:?}", total, start.elapsed());
}

fn do_scans(index: &OMap<u64, u64>, opts: &Opt, seed: u128) {
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());

    let start = time::Instant::now();
    let mut n: usize = 0;
    for _i in 0..opts.scans {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let (low, high): (Limit<u64>, Limit<u64>) = uns.arbitrary().unwrap();
        let r = (Bound::from(low), Bound::from(high));
        n += index.range(r).count();
        n += index.range_len(r);
    }
    println!(
        "scan-ed {} ranges touching {} items, took {:?}",
        opts.scans,
        n,
        start.elapsed()
    );
}

#[derive(Clone, Debug, Arbitrary, Eq, PartialEq)]
enum Limit<T> {
    Unbounded,
    Included(T),
    Excluded(T),
}

impl<T> From<Limit<T>> for Bound<T> {
    fn from(limit: Limit<T>) -> Self {
        match limit {
            Limit::Unbounded => Bound::Unbounded,
            Limit::Included(v) => Bound::Included(v),
            Limit::Excluded(v) => Bound::Excluded(v),
        }
    }
}
