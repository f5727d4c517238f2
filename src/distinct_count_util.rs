use fxhash::FxHashSet;

/// Set of values seen so far. Only membership and cardinality are tracked.
pub struct DistinctCounter {
    seen: FxHashSet<i64>,
}

impl DistinctCounter {
    pub fn new() -> DistinctCounter {
        DistinctCounter {
            seen: FxHashSet::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> DistinctCounter {
        DistinctCounter {
            seen: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts `value` and returns the number of distinct values after insertion.
    pub fn observe(&mut self, value: i64) -> usize {
        self.seen.insert(value);
        self.seen.len()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Default for DistinctCounter {
    fn default() -> Self {
        DistinctCounter::new()
    }
}

/// `ret[i]` is the number of distinct values in `values[0..=i]`.
pub fn prefix_distinct_counts(values: &[i64]) -> Vec<usize> {
    let mut counter = DistinctCounter::with_capacity(values.len());
    values.iter().map(|&v| counter.observe(v)).collect()
}

// single space between counts, nothing before or after
pub fn format_counts(counts: &[usize]) -> String {
    let mut ret = String::with_capacity(counts.len() * 7);
    for (i, count) in counts.iter().enumerate() {
        if i != 0 {
            ret.push(' ');
        }
        ret.push_str(&count.to_string());
    }
    ret
}
