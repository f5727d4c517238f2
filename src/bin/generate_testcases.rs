extern crate getopts;
use anyhow::Context;
use getopts::Options;
use prefix_distinct::testcase_generator::{GeneratorSystem, InputGenerator};
use std::env;

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} [options]", program);
    print!("{}", opts.usage(&brief));
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt(
        "d",
        "dir",
        "directory that receives input/ and output/. default value is the current directory.",
        "DIR",
    );
    opts.optopt("s", "seed", "seed for the random generator", "SEED");
    opts.optflag("h", "help", "print this help menu");

    let matches = opts
        .parse(&args[1..])
        .context("failed to parse command line")?;
    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return Ok(());
    }

    let root = matches.opt_str("d").unwrap_or(".".to_string());
    let mut generator = match matches.opt_str("s") {
        Some(seed) => {
            let seed: u64 = seed
                .parse()
                .with_context(|| format!("invalid seed: {:?}", seed))?;
            InputGenerator::from_seed(seed)
        }
        None => InputGenerator::from_entropy(),
    };

    eprintln!("output directory: {:?}", root);
    let system = GeneratorSystem::new(&root);
    let cases = system
        .run(&mut generator)
        .with_context(|| format!("failed to generate test cases under {:?}", root))?;
    eprintln!("finish writing {} test cases", cases);
    Ok(())
}
