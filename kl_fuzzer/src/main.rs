
extern crate kl_dense_fsa;
extern crate rand;

mod rnd;
mod regex_gen;
mod check;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};
use kl_dense_fsa::{Compiler, Config};
use regex_gen::*;
use check::Outcome;

#[derive(Debug, Parser)]
#[clap(name = "kl_fuzzer")]
#[clap(about = "Checks that the NFA and the DFA of random regexes agree")]
struct Args {
    #[clap(long, default_value_t = 1000)]
    iterations: usize,

    /// Seed of the generator. Taken from the system time when missing.
    #[clap(long)]
    seed: Option<u64>,

    /// Longest input string compared.
    #[clap(long, default_value_t = 5)]
    max_len: usize,

    /// Depth of the generated syntax trees.
    #[clap(long, default_value_t = 4)]
    depth: usize,

    #[clap(long, default_value = "abc")]
    charset: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::default();
    if args.charset.is_empty() {
        bail!("the charset can not be empty");
    }
    if let Some(c) = args.charset.chars().find(|c| !config.alphabet.is_symbol(*c)) {
        bail!("'{}' is not a symbol of the alphabet", c);
    }

    let seed = args.seed.unwrap_or_else(rnd::seed_from_system_time);
    rnd::set_seed(seed);
    info!("seed: {}", seed);

    let gen = RandomRegexGenerator::with_depth_and_charset(args.depth, &args.charset);
    let mut edit = RandomEdit::new();
    edit.add(InsertOperator);
    edit.add(EraseRange);

    let mut compiler = Compiler::new(config);
    let mut compared = 0;
    let mut rejected = 0;
    for i in 0..args.iterations {
        let mut source = gen.generate();
        if rnd::chance(1, 3) {
            source = edit.edit(&source);
        }
        debug!("#{}: {:?}", i, source);

        let outcome = check::check(&mut compiler, &source, args.max_len)
            .with_context(|| format!("mismatch with seed {}", seed))?;
        match outcome {
            Outcome::Agreed(n) => compared += n,
            Outcome::Rejected(stage) => {
                debug!("{:?} rejected during {}", source, stage);
                rejected += 1;
            },
        }
    }

    println!("{} regexes, {} rejected, {} strings compared (seed {})",
        args.iterations, rejected, compared, rnd::current_seed());
    Ok(())
}
