pub mod distinct_count_util;
pub mod error;
pub mod generator_util;
pub mod runner;
pub mod sequence_reader_util;
pub mod testcase_generator;

pub use error::Error;
