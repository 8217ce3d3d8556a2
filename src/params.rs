use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use crate::cmwc32::Cmwc32;
use crate::error::{Error, Result};

// This module searches for CMWC parameters (A, B, R) with long periods.
//
// A CMWC generator with multiplier A, modulus B and lag count R has period
// equal to the multiplicative order of B modulo M = A * B**R + 1 when M is prime.
// The order divides M - 1 = A * B**R. For B a power of two and A prime,
// every divisor of M - 1 is 2**k or A * 2**k, and the order of B is again
// of one of those forms, so only those exponents need testing.

/// Default number of candidate multipliers drawn before giving up.
pub const DEFAULT_ATTEMPTS: u32 = 1_000_000;

/// Default number of Miller-Rabin rounds.
pub const DEFAULT_ROUNDS: u32 = 20;

/// Small primes for trial division ahead of Miller-Rabin.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Multiplier and exact period of a CMWC generator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Params {
    pub multiplier: u32,
    pub period: BigUint,
}

/// Limits of a parameter search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// Candidate multipliers drawn before the search reports exhaustion.
    pub attempts: u32,
    /// Miller-Rabin rounds per primality test.
    pub rounds: u32,
    /// Multipliers whose period is below this are rejected.
    pub min_period: BigUint,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { attempts: DEFAULT_ATTEMPTS, rounds: DEFAULT_ROUNDS, min_period: BigUint::zero() }
    }
}

/// Validates modulus and lag count and returns the lag count as an exponent.
fn check_shape(modulus: u64, lag_count: u64) -> Result<u32> {
    if !modulus.is_power_of_two() || !(2 ..= 1 << 32).contains(&modulus) {
        return Err(Error::Construction("modulus must be a power of two between 2 and 2**32"));
    }
    if !lag_count.is_power_of_two() || lag_count > 1 << 31 {
        return Err(Error::Construction("lag count must be a power of two between 2**0 and 2**31"));
    }
    Ok(lag_count as u32)
}

/// Miller-Rabin probable prime test with `rounds` random bases.
/// Composites pass with probability at most 4**-rounds.
pub fn is_probably_prime<R: Rng + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2**s with d odd.
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0 .. rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1 .. s {
            x = &x * &x % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Order of B modulo A * B**R + 1 for exponents of the form 2**k and A * 2**k.
fn bounded_order(multiplier: u32, modulus: u64, lag_count: u32) -> Option<BigUint> {
    if multiplier == 0 {
        return None;
    }
    let one = BigUint::one();
    let b = BigUint::from(modulus);
    let b_r = b.pow(lag_count);
    let m = BigUint::from(multiplier) * &b_r + &one;

    // Candidates are visited by repeated squaring: B**(2p) = (B**p)**2.
    // All 2**k come first; if none is the order, it is the least A * 2**k.
    let mut p = BigUint::from(2u32);
    let mut x = b.modpow(&p, &m);
    while p <= b_r {
        if x == one {
            return Some(p);
        }
        x = &x * &x % &m;
        p <<= 1usize;
    }

    let mut p = BigUint::from(multiplier);
    let mut x = b.modpow(&p, &m);
    while p < m {
        if x == one {
            return Some(p);
        }
        x = &x * &x % &m;
        p <<= 1usize;
    }
    None
}

/// Returns the multiplicative order of `modulus` modulo M = multiplier * modulus**lag_count + 1.
/// Requires M to be prime and the multiplier to be prime; returns None when no
/// exponent of the form 2**k or multiplier * 2**k below M is the order.
pub fn multiplicative_order(multiplier: u32, modulus: u64, lag_count: u64) -> Result<Option<BigUint>> {
    let lag_count = check_shape(modulus, lag_count)?;
    Ok(bounded_order(multiplier, modulus, lag_count))
}

/// Searches for CMWC parameters with the default configuration.
/// See `search_params_with`.
pub fn search_params<R: Rng + ?Sized>(modulus: u64, lag_count: u64, rng: &mut R) -> Result<Params> {
    search_params_with(modulus, lag_count, &SearchConfig::default(), rng)
}

/// Searches for a prime multiplier A < modulus such that M = A * modulus**lag_count + 1
/// is prime, and returns A with the period of the resulting generator.
/// Modulus and lag count must be powers of two. Repeated calls may return
/// different valid multipliers. Fails with `Error::SearchExhausted` when
/// `config.attempts` candidates are rejected.
pub fn search_params_with<R: Rng + ?Sized>(modulus: u64, lag_count: u64, config: &SearchConfig, rng: &mut R) -> Result<Params> {
    let exponent = check_shape(modulus, lag_count)?;
    let b_r = BigUint::from(modulus).pow(exponent);

    for attempt in 0 .. config.attempts {
        let candidate = BigUint::from(rng.gen_range(0 .. modulus));
        if !is_probably_prime(&candidate, config.rounds, rng) {
            continue;
        }
        let m = &candidate * &b_r + BigUint::one();
        if !is_probably_prime(&m, config.rounds, rng) {
            continue;
        }
        let multiplier = match candidate.to_u32() {
            Some(multiplier) if BigUint::from(multiplier) == candidate => multiplier,
            _ => {
                error!(%candidate, modulus, lag_count, "multiplier does not fit in 32 bits");
                return Err(Error::InternalConsistency(candidate));
            }
        };
        debug!(multiplier, attempt, "multiplier and modulus are probably prime");

        match bounded_order(multiplier, modulus, exponent) {
            Some(period) if period >= config.min_period => {
                info!(multiplier, modulus, lag_count, attempts = attempt + 1, %period, "found CMWC parameters");
                return Ok(Params { multiplier, period });
            }
            Some(period) => debug!(multiplier, %period, "period below minimum"),
            None => debug!(multiplier, "no order within bounds"),
        }
    }

    warn!(modulus, lag_count, attempts = config.attempts, "parameter search exhausted");
    Err(Error::SearchExhausted { modulus, lag_count, attempts: config.attempts })
}

/// Runs `count` independent searches in parallel. Worker i draws candidates
/// from a Cmwc32 seeded with base_seed + i, so results are reproducible
/// and returned in worker order.
pub fn search_many(modulus: u64, lag_count: u64, count: usize, config: &SearchConfig, base_seed: u64) -> Vec<Result<Params>> {
    (0 .. count)
        .into_par_iter()
        .map(|worker| {
            let mut rng = <Cmwc32 as rand_core::SeedableRng>::seed_from_u64(base_seed.wrapping_add(worker as u64));
            search_params_with(modulus, lag_count, config, &mut rng)
        })
        .collect()
}
