use crate::error::Error;
use rand::Rng;

// numbers with the most divisors below 10^12 are never divisible by a greater prime
const SMALL_PRIMES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
pub const DIVISOR_SEARCH_LIMIT: u64 = 1_000_000_000_000;

/// `n` random integers within `[lower_bound, upper_bound]`.
pub fn randints<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    lower_bound: i64,
    upper_bound: i64,
) -> Result<Vec<i64>, Error> {
    if lower_bound > upper_bound {
        return Err(Error::ConstraintViolation(format!(
            "lower bound {} is greater than upper bound {}",
            lower_bound, upper_bound
        )));
    }
    Ok((0..n)
        .map(|_| rng.gen_range(lower_bound..=upper_bound))
        .collect())
}

pub fn randint<R: Rng + ?Sized>(
    rng: &mut R,
    lower_bound: i64,
    upper_bound: i64,
) -> Result<i64, Error> {
    Ok(randints(rng, 1, lower_bound, upper_bound)?[0])
}

/// `n` random integers, each at least `lower_bound`, that sum up to `target_sum`.
pub fn randints_with_target_sum<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    target_sum: i64,
    lower_bound: i64,
) -> Result<Vec<i64>, Error> {
    if n == 0 {
        return Err(Error::ConstraintViolation(
            "the number of integers to generate must be positive".to_string(),
        ));
    }
    let minimum_sum = i64::try_from(n)
        .ok()
        .and_then(|n| n.checked_mul(lower_bound))
        .ok_or_else(|| {
            Error::ConstraintViolation(format!("{} * {} overflows", n, lower_bound))
        })?;
    if minimum_sum > target_sum {
        return Err(Error::ConstraintViolation(format!(
            "the minimum possible sum {} is greater than the target sum {}",
            minimum_sum, target_sum
        )));
    }

    // split [0, normalized_sum] at n - 1 random cut points, then shift every part by lower_bound
    let normalized_sum = target_sum - minimum_sum;
    let mut cuts: Vec<i64> = randints(rng, n - 1, 0, normalized_sum)?;
    cuts.sort();
    let mut prefix_sums: Vec<i64> = Vec::with_capacity(n + 1);
    prefix_sums.push(0);
    prefix_sums.extend(cuts);
    prefix_sums.push(normalized_sum);

    let ret: Vec<i64> = prefix_sums
        .windows(2)
        .map(|w| w[1] - w[0] + lower_bound)
        .collect();
    debug_assert_eq!(ret.iter().sum::<i64>(), target_sum);
    Ok(ret)
}

/// All positive integers not exceeding `limit` that have the maximum number of
/// divisors, in ascending order. `limit` must be within `[1, 10^12]`.
pub fn numbers_with_max_number_of_divisors(limit: u64) -> Result<Vec<u64>, Error> {
    if !(1..=DIVISOR_SEARCH_LIMIT).contains(&limit) {
        return Err(Error::ConstraintViolation(format!(
            "limit {} must be within [1, {}]",
            limit, DIVISOR_SEARCH_LIMIT
        )));
    }
    let mut max_number_of_divisors: u64 = 0;
    let mut target_numbers: Vec<u64> = Vec::new();
    collect_max_divisor_numbers(
        1,
        0,
        1,
        limit,
        &mut max_number_of_divisors,
        &mut target_numbers,
    );
    target_numbers.sort();
    Ok(target_numbers)
}

fn collect_max_divisor_numbers(
    num: u64,
    prime_idx: usize,
    divisor_cnt: u64,
    limit: u64,
    max_number_of_divisors: &mut u64,
    target_numbers: &mut Vec<u64>,
) {
    if divisor_cnt > *max_number_of_divisors {
        *max_number_of_divisors = divisor_cnt;
        target_numbers.clear();
        target_numbers.push(num);
    } else if divisor_cnt == *max_number_of_divisors {
        target_numbers.push(num);
    }
    if prime_idx == SMALL_PRIMES.len() {
        return;
    }
    let p = SMALL_PRIMES[prime_idx];
    let mut power: u64 = 1;
    let mut next = num * p;
    while next <= limit {
        collect_max_divisor_numbers(
            next,
            prime_idx + 1,
            divisor_cnt * (power + 1),
            limit,
            max_number_of_divisors,
            target_numbers,
        );
        power += 1;
        next *= p;
    }
}

pub fn is_prime(num: u64) -> bool {
    if num < 2 {
        return false;
    }
    let mut i: u64 = 2;
    while i <= num / i {
        if num % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Largest prime strictly less than `n`. `n` must be at least 3.
pub fn prev_prime(n: u64) -> Result<u64, Error> {
    if n <= 2 {
        return Err(Error::ConstraintViolation(format!(
            "there is no prime below {}",
            n
        )));
    }
    let mut ret = n - 1;
    while !is_prime(ret) {
        ret -= 1;
    }
    Ok(ret)
}

/// Smallest prime strictly greater than `n`.
pub fn next_prime(n: u64) -> u64 {
    let mut ret = n + 1;
    while !is_prime(ret) {
        ret += 1;
    }
    ret
}
