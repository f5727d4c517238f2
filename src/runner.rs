use crate::distinct_count_util::{format_counts, prefix_distinct_counts};
use crate::error::Error;
use crate::sequence_reader_util::read_sequence;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Reads `N` and `N` integers from `source`, writes the running distinct counts to `sink`.
/// Returns `N`.
pub fn run<R: Read, W: Write>(source: R, mut sink: W) -> Result<usize, Error> {
    let values: Vec<i64> = read_sequence(source)?;
    let counts: Vec<usize> = prefix_distinct_counts(&values);
    sink.write_all(format_counts(&counts).as_bytes())?;
    sink.flush()?;
    Ok(values.len())
}

/// File form of [`run`]. The output file is created only after the whole
/// input has been parsed, so a malformed input leaves `output` untouched.
pub fn run_files(input: &Path, output: &Path) -> Result<usize, Error> {
    let f: File = File::open(input).map_err(|e| Error::io(input, e))?;
    let values: Vec<i64> = read_sequence(BufReader::new(f)).map_err(|e| match e {
        Error::Stream(source) => Error::io(input, source),
        other => other,
    })?;
    let counts: Vec<usize> = prefix_distinct_counts(&values);
    let line: String = format_counts(&counts);

    let mut w = BufWriter::new(File::create(output).map_err(|e| Error::io(output, e))?);
    w.write_all(line.as_bytes())
        .and_then(|_| w.flush())
        .map_err(|e| Error::io(output, e))?;
    Ok(values.len())
}
