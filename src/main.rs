extern crate getopts;
use anyhow::Context;
use getopts::Options;
use prefix_distinct::runner::run_files;
use std::io::{self, Write};
use std::path::Path;
use std::{env, process};

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} INPUT OUTPUT [options]", program);
    print!("{}", opts.usage(&brief));
    // process::exit skips the stdout flush
    let _ = io::stdout().flush();
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("v", "verbose", "print progress to stderr");
    opts.optflag("h", "help", "print this help menu");

    let matches = opts
        .parse(&args[1..])
        .context("failed to parse command line")?;
    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return Ok(());
    }
    if matches.free.len() < 2 {
        print_usage(&program, &opts);
        process::exit(1);
    }
    let verbose = matches.opt_present("v");
    let input_file = Path::new(&matches.free[0]);
    let output_file = Path::new(&matches.free[1]);

    if verbose {
        eprintln!("input  file: {:?}", input_file);
        eprintln!("output file: {:?}", output_file);
    }
    let n = run_files(input_file, output_file)
        .with_context(|| format!("failed to process {:?}", input_file))?;
    if verbose {
        eprintln!("finish writing {} counts to output file: {:?}", n, output_file);
    }
    Ok(())
}
