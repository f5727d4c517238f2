use crate::error::Error;
use crate::generator_util::{randint, randints};
use crate::runner::run_files;
use crate::sequence_reader_util::format_sequence;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::ZipWriter;

pub const N_LOWER: usize = 1;
pub const N_UPPER: usize = 200_000;
pub const ELEM_ABS_MAX: i64 = 1_000_000_000;

pub const INPUT_DIR: &str = "input";
pub const OUTPUT_DIR: &str = "output";
pub const ARCHIVE_NAME: &str = "testcases.zip";

/// Inclusive range `[lower, upper]`.
#[derive(Debug, Clone, Copy)]
pub struct Bounds<T> {
    pub lower: T,
    pub upper: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(lower: T, upper: T) -> Bounds<T> {
        Bounds { lower, upper }
    }

    pub fn contains(&self, x: T) -> bool {
        self.lower <= x && x <= self.upper
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestcaseInput {
    pub n: usize,
    pub a: Vec<i64>,
}

impl TestcaseInput {
    pub fn new(a: Vec<i64>) -> TestcaseInput {
        TestcaseInput { n: a.len(), a }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Constraints {
    pub n_bounds: Bounds<usize>,
    pub elem_bounds: Bounds<i64>,
}

impl Constraints {
    pub fn general() -> Constraints {
        Constraints {
            n_bounds: Bounds::new(N_LOWER, N_UPPER),
            elem_bounds: Bounds::new(-ELEM_ABS_MAX, ELEM_ABS_MAX),
        }
    }

    pub fn validate(&self, input: &TestcaseInput) -> Result<(), Error> {
        if !self.n_bounds.contains(input.n) {
            return Err(Error::ConstraintViolation(format!(
                "n = {} is outside [{}, {}]",
                input.n, self.n_bounds.lower, self.n_bounds.upper
            )));
        }
        if input.n != input.a.len() {
            return Err(Error::ConstraintViolation(format!(
                "n = {} but the array holds {} elements",
                input.n,
                input.a.len()
            )));
        }
        if let Some((i, x)) = input
            .a
            .iter()
            .enumerate()
            .find(|(_, &x)| !self.elem_bounds.contains(x))
        {
            return Err(Error::ConstraintViolation(format!(
                "a[{}] = {} is outside [{}, {}]",
                i, x, self.elem_bounds.lower, self.elem_bounds.upper
            )));
        }
        Ok(())
    }
}

pub struct InputGenerator {
    rng: StdRng,
    general: Constraints,
}

impl InputGenerator {
    pub fn new(rng: StdRng) -> InputGenerator {
        InputGenerator {
            rng,
            general: Constraints::general(),
        }
    }

    pub fn from_seed(seed: u64) -> InputGenerator {
        InputGenerator::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> InputGenerator {
        InputGenerator::new(StdRng::from_entropy())
    }

    fn random_elements(&mut self, n: usize, bounds: Bounds<i64>) -> Result<Vec<i64>, Error> {
        randints(&mut self.rng, n, bounds.lower, bounds.upper)
    }

    fn random_case(&mut self, constraints: Constraints) -> Result<TestcaseInput, Error> {
        let n: usize = self
            .rng
            .gen_range(constraints.n_bounds.lower..=constraints.n_bounds.upper);
        let a = self.random_elements(n, constraints.elem_bounds)?;
        self.validate_and_return(TestcaseInput::new(a), constraints)
    }

    pub fn all_random(&mut self) -> Result<TestcaseInput, Error> {
        self.random_case(self.general)
    }

    pub fn small_random(&mut self) -> Result<TestcaseInput, Error> {
        self.random_case(Constraints {
            n_bounds: Bounds::new(1, 100),
            elem_bounds: Bounds::new(0, 100),
        })
    }

    pub fn n_max(&mut self) -> Result<TestcaseInput, Error> {
        let constraints = self.general;
        let a = self.random_elements(constraints.n_bounds.upper, constraints.elem_bounds)?;
        self.validate_and_return(TestcaseInput::new(a), constraints)
    }

    pub fn all_different(&mut self) -> Result<TestcaseInput, Error> {
        let constraints = self.general;
        let lower = constraints.elem_bounds.lower;
        let span = (constraints.elem_bounds.upper - lower + 1) as usize;
        let a: Vec<i64> = index::sample(&mut self.rng, span, constraints.n_bounds.upper)
            .into_iter()
            .map(|offset| lower + offset as i64)
            .collect();
        self.validate_and_return(TestcaseInput::new(a), constraints)
    }

    pub fn all_same(&mut self) -> Result<TestcaseInput, Error> {
        let constraints = self.general;
        let x: i64 = randint(
            &mut self.rng,
            constraints.elem_bounds.lower,
            constraints.elem_bounds.upper,
        )?;
        let a = vec![x; constraints.n_bounds.upper];
        self.validate_and_return(TestcaseInput::new(a), constraints)
    }

    /// Every generator in order: all_random, small_random, n_max, all_different, all_same.
    pub fn generate(&mut self) -> Result<Vec<TestcaseInput>, Error> {
        eprintln!("Generating inputs...");
        let generators: [fn(&mut InputGenerator) -> Result<TestcaseInput, Error>; 5] = [
            InputGenerator::all_random,
            InputGenerator::small_random,
            InputGenerator::n_max,
            InputGenerator::all_different,
            InputGenerator::all_same,
        ];
        let mut inputs: Vec<TestcaseInput> = Vec::with_capacity(generators.len());
        for (i, generate) in generators.iter().enumerate() {
            let input = generate(self)?;
            eprintln!("generator [{}/{}]: n = {}", i + 1, generators.len(), input.n);
            inputs.push(input);
        }
        Ok(inputs)
    }

    // any input must also satisfy the general constraints
    fn validate_and_return(
        &self,
        input: TestcaseInput,
        constraints: Constraints,
    ) -> Result<TestcaseInput, Error> {
        constraints.validate(&input)?;
        self.general.validate(&input)?;
        Ok(input)
    }
}

/// Lays out `root/input/input_<k>.txt` and the solver's `root/output/output_<k>.txt`.
pub struct GeneratorSystem {
    root: PathBuf,
}

impl GeneratorSystem {
    pub fn new(root: impl Into<PathBuf>) -> GeneratorSystem {
        GeneratorSystem { root: root.into() }
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join(INPUT_DIR)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn input_path(&self, case_no: usize) -> PathBuf {
        self.input_dir().join(format!("input_{}.txt", case_no))
    }

    pub fn output_path(&self, case_no: usize) -> PathBuf {
        self.output_dir().join(format!("output_{}.txt", case_no))
    }

    /// Creates both directories and removes any files already in them.
    pub fn prepare_io_folders(&self) -> Result<(), Error> {
        for dir in [self.input_dir(), self.output_dir()] {
            fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
            for entry in fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
                let path = entry.map_err(|e| Error::io(&dir, e))?.path();
                if path.is_file() {
                    fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
                }
            }
        }
        Ok(())
    }

    pub fn write_input_files(&self, inputs: &[TestcaseInput]) -> Result<(), Error> {
        eprintln!("Generating input files...");
        for (case_no, input) in inputs.iter().enumerate() {
            let path = self.input_path(case_no);
            fs::write(&path, format_sequence(&input.a)).map_err(|e| Error::io(&path, e))?;
        }
        Ok(())
    }

    /// Runs the solver on every `input_<k>.txt` in the input directory and
    /// writes `output_<k>.txt` with the same `<k>`.
    pub fn write_output_files(&self) -> Result<usize, Error> {
        eprintln!("Generating output files...");
        let input_dir = self.input_dir();
        let mut cases: Vec<(usize, String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&input_dir).map_err(|e| Error::io(&input_dir, e))? {
            let path = entry.map_err(|e| Error::io(&input_dir, e))?.path();
            if let Some(case_name) = case_name(&path) {
                if let Ok(case_no) = case_name.parse::<usize>() {
                    cases.push((case_no, case_name, path));
                }
            }
        }
        cases.sort();
        let output_dir = self.output_dir();
        for (_, case_name, input_path) in &cases {
            let output_path = output_dir.join(format!("output_{}.txt", case_name));
            let n = run_files(input_path, &output_path)?;
            eprintln!("output_{}.txt: {} counts", case_name, n);
        }
        Ok(cases.len())
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_NAME)
    }

    /// Packs every file under `input/` and `output/` into `root/testcases.zip`,
    /// keeping the `input/` and `output/` prefixes. Returns the number of entries.
    pub fn zip_testcases(&self) -> Result<usize, Error> {
        eprintln!("Zipping the test cases into {:?}...", self.archive_path());
        let archive_path = self.archive_path();
        let file = File::create(&archive_path).map_err(|e| Error::io(&archive_path, e))?;
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default();

        let mut entries: usize = 0;
        for (dir_name, dir) in [(INPUT_DIR, self.input_dir()), (OUTPUT_DIR, self.output_dir())] {
            let mut paths: Vec<PathBuf> = Vec::new();
            for entry in fs::read_dir(&dir).map_err(|e| Error::io(&dir, e))? {
                let path = entry.map_err(|e| Error::io(&dir, e))?.path();
                if path.is_file() {
                    paths.push(path);
                }
            }
            paths.sort();
            for path in paths {
                let file_name = match path.file_name().and_then(|n| n.to_str()) {
                    Some(n) => n.to_string(),
                    None => continue,
                };
                let contents = fs::read(&path).map_err(|e| Error::io(&path, e))?;
                writer.start_file(format!("{}/{}", dir_name, file_name), options)
                    .map_err(|e| Error::archive(&archive_path, e))?;
                writer.write_all(&contents)
                    .map_err(|e| Error::io(&archive_path, e))?;
                entries += 1;
            }
        }
        writer.finish().map_err(|e| Error::archive(&archive_path, e))?;
        Ok(entries)
    }

    pub fn run(&self, generator: &mut InputGenerator) -> Result<usize, Error> {
        self.prepare_io_folders()?;
        let inputs = generator.generate()?;
        self.write_input_files(&inputs)?;
        let cases = self.write_output_files()?;
        self.zip_testcases()?;
        Ok(cases)
    }
}

// `<k>` of `input_<k>.txt`, kept verbatim so that leading zeros survive
fn case_name(path: &Path) -> Option<String> {
    let name = path
        .file_name()?
        .to_str()?
        .strip_prefix("input_")?
        .strip_suffix(".txt")?;
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use crate::distinct_count_util::prefix_distinct_counts;
    use crate::error::Error;
    use crate::sequence_reader_util::parse_sequence;
    use crate::testcase_generator::{
        case_name, Bounds, Constraints, GeneratorSystem, InputGenerator, TestcaseInput, N_UPPER,
    };
    use ::function_name::named;
    use std::collections::HashSet;
    use std::fs::{self, File};
    use std::io::Read;
    use std::path::Path;

    #[test]
    #[named]
    fn bounds_are_inclusive() {
        let b = Bounds::new(-3i64, 3);
        assert!(b.contains(-3) && b.contains(3), "{} failed", function_name!());
        assert!(!b.contains(4) && !b.contains(-4), "{} failed", function_name!());
    }

    #[test]
    #[named]
    fn validate_rejects_out_of_bounds() {
        let general = Constraints::general();
        assert!(
            general.validate(&TestcaseInput::new(vec![1, 2, 3])).is_ok(),
            "{} failed",
            function_name!()
        );
        assert!(
            matches!(
                general.validate(&TestcaseInput::new(vec![])),
                Err(Error::ConstraintViolation(_))
            ),
            "{} failed",
            function_name!()
        );
        assert!(
            matches!(
                general.validate(&TestcaseInput::new(vec![0, 1_000_000_001])),
                Err(Error::ConstraintViolation(_))
            ),
            "{} failed",
            function_name!()
        );
        let mismatched = TestcaseInput { n: 3, a: vec![1, 2] };
        assert!(
            general.validate(&mismatched).is_err(),
            "{} failed",
            function_name!()
        );
    }

    #[test]
    #[named]
    fn generators_respect_constraints() {
        let mut generator = InputGenerator::from_seed(42);
        let inputs = generator.generate().unwrap();
        assert_eq!(inputs.len(), 5, "{} failed", function_name!());
        for input in &inputs {
            assert!(
                Constraints::general().validate(input).is_ok(),
                "{} failed",
                function_name!()
            );
        }

        let small = &inputs[1];
        assert!(small.n <= 100, "{} failed", function_name!());
        assert!(
            small.a.iter().all(|&x| (0..=100).contains(&x)),
            "{} failed",
            function_name!()
        );
        assert_eq!(inputs[2].n, N_UPPER, "{} failed", function_name!());

        let distinct: HashSet<i64> = inputs[3].a.iter().copied().collect();
        assert_eq!(distinct.len(), N_UPPER, "{} failed", function_name!());

        let same: HashSet<i64> = inputs[4].a.iter().copied().collect();
        assert_eq!(same.len(), 1, "{} failed", function_name!());
        assert_eq!(inputs[4].n, N_UPPER, "{} failed", function_name!());
    }

    #[test]
    #[named]
    fn same_seed_same_inputs() {
        let a = InputGenerator::from_seed(7).small_random().unwrap();
        let b = InputGenerator::from_seed(7).small_random().unwrap();
        assert_eq!(a, b, "{} failed", function_name!());
    }

    #[test]
    #[named]
    fn case_name_from_file_name() {
        assert_eq!(
            case_name(Path::new("x/input_12.txt")),
            Some("12".to_string()),
            "{} failed",
            function_name!()
        );
        assert_eq!(
            case_name(Path::new("x/input_012.txt")),
            Some("012".to_string()),
            "{} failed",
            function_name!()
        );
        assert_eq!(case_name(Path::new("x/output_1.txt")), None, "{} failed", function_name!());
        assert_eq!(case_name(Path::new("x/input_a.txt")), None, "{} failed", function_name!());
        assert_eq!(case_name(Path::new("x/input_.txt")), None, "{} failed", function_name!());
        assert_eq!(case_name(Path::new("x/input_+1.txt")), None, "{} failed", function_name!());
    }

    #[test]
    #[named]
    fn outputs_keep_zero_padded_case_names() {
        let dir = tempfile::tempdir().unwrap();
        let system = GeneratorSystem::new(dir.path());
        system.prepare_io_folders().unwrap();
        fs::write(system.input_dir().join("input_012.txt"), "4\n5 5 3 3").unwrap();
        fs::write(system.input_dir().join("input_3.txt"), "1\n42").unwrap();

        let written = system.write_output_files().unwrap();
        assert_eq!(written, 2, "{} failed", function_name!());
        assert_eq!(
            fs::read_to_string(system.output_dir().join("output_012.txt")).unwrap(),
            "1 1 2 2",
            "{} failed",
            function_name!()
        );
        assert_eq!(
            fs::read_to_string(system.output_path(3)).unwrap(),
            "1",
            "{} failed",
            function_name!()
        );
    }

    #[test]
    #[named]
    fn zip_holds_every_input_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let system = GeneratorSystem::new(dir.path());
        system.run(&mut InputGenerator::from_seed(11)).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(system.archive_path()).unwrap()).unwrap();
        assert_eq!(archive.len(), 10, "{} failed", function_name!());
        for case_no in 0..5 {
            for (name, path) in [
                (format!("input/input_{}.txt", case_no), system.input_path(case_no)),
                (format!("output/output_{}.txt", case_no), system.output_path(case_no)),
            ] {
                let mut entry = archive.by_name(&name).unwrap();
                let mut contents: Vec<u8> = Vec::new();
                entry.read_to_end(&mut contents).unwrap();
                assert_eq!(
                    contents,
                    fs::read(&path).unwrap(),
                    "{} failed on {}",
                    function_name!(),
                    name
                );
            }
        }
    }

    #[test]
    #[named]
    fn zip_of_empty_folders() {
        let dir = tempfile::tempdir().unwrap();
        let system = GeneratorSystem::new(dir.path());
        system.prepare_io_folders().unwrap();

        assert_eq!(system.zip_testcases().unwrap(), 0, "{} failed", function_name!());
        let archive = zip::ZipArchive::new(File::open(system.archive_path()).unwrap()).unwrap();
        assert_eq!(archive.len(), 0, "{} failed", function_name!());
    }

    #[test]
    #[named]
    fn system_writes_matching_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let system = GeneratorSystem::new(dir.path());
        fs::create_dir_all(system.output_dir()).unwrap();
        fs::write(system.output_dir().join("leftover.txt"), "old").unwrap();

        let written = system.run(&mut InputGenerator::from_seed(2024)).unwrap();
        assert_eq!(written, 5, "{} failed", function_name!());
        assert!(
            !system.output_dir().join("leftover.txt").exists(),
            "{} failed",
            function_name!()
        );

        for case_no in 0..5 {
            let text = fs::read_to_string(system.input_path(case_no)).unwrap();
            assert!(!text.ends_with('\n'), "{} failed", function_name!());
            let values = parse_sequence(&text).unwrap();
            let output = fs::read_to_string(system.output_path(case_no)).unwrap();
            let counts: Vec<usize> = output
                .split(' ')
                .map(|t| t.parse().unwrap())
                .collect();
            assert_eq!(counts.len(), values.len(), "{} failed", function_name!());
            assert_eq!(
                counts,
                prefix_distinct_counts(&values),
                "{} failed on case {}",
                function_name!(),
                case_no
            );
        }
    }
}
