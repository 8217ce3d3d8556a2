use wrapping_arithmetic::wrappit;
use rand_core::{CryptoRng, OsRng};

use crate::error::{Error, Result};

// Cmwc32 features
// -complementary-multiply-with-carry generator due to George Marsaglia
// -modulus B = 2**32 so that reduction is free
// -lag count R is a power of two so that the ring index is a mask
// -32-bit output, 32 * (R + 1) bits of state
// -period is the multiplicative order of B modulo A * B**R + 1,
//  see the constants in the crate root for tested parameters

/// Mixing constant for `seed`. Rotated by 3 bits for every group of four lag slots.
const SEED_MIX: u32 = 0x9e3779b9;

/// Number of warm-up draws per lag slot after `seed`.
const WARM_UP_ROUNDS: usize = 10;

/// Largest supported log2 of the lag count; the count must fit its 32-bit field.
pub const MAX_LOG2_LAG_COUNT: u32 = 31;

/// CMWC non-cryptographic RNG with B = 2**32 and R a power of two. 32-bit output.
#[derive(Clone, Eq, PartialEq)]
pub struct Cmwc32 {
    /// Lag table, length R.
    q: Vec<u32>,
    /// R - 1.
    mask: usize,
    /// Multiplier A.
    multiplier: u32,
    /// Carry C.
    carry: u32,
    /// Index of the most recently written lag slot.
    index: usize,
}

// This Debug implementation does not expose internal state.
impl core::fmt::Debug for Cmwc32 {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Cmwc32 {{ multiplier: {}, lag_count: {} }}", self.multiplier, self.q.len())
    }
}

impl Cmwc32 {

    fn from_valid(multiplier: u32, lag_count: usize) -> Self {
        Cmwc32 { q: vec![0; lag_count], mask: lag_count - 1, multiplier, carry: 0, index: 0 }
    }

    /// Creates a new Cmwc32 RNG with (A, B, R) = (multiplier, 2**32, 2**log2_lag_count).
    /// The lag table and carry are zero. Call one of the seeding methods before use.
    pub fn new(multiplier: u32, log2_lag_count: u32) -> Result<Self> {
        if log2_lag_count > MAX_LOG2_LAG_COUNT {
            return Err(Error::Construction("lag count must be between 2**0 and 2**31"));
        }
        Ok(Self::from_valid(multiplier, 1 << log2_lag_count))
    }

    /// Rebuilds a generator from raw state.
    /// The lag table length must be a power of two and the index must point inside it.
    pub fn from_parts(multiplier: u32, carry: u32, index: usize, lag_table: Vec<u32>) -> Result<Self> {
        let lag_count = lag_table.len();
        if !lag_count.is_power_of_two() || lag_count > 1 << MAX_LOG2_LAG_COUNT {
            return Err(Error::Construction("lag count must be a power of two between 2**0 and 2**31"));
        }
        if index >= lag_count {
            return Err(Error::Construction("lag index is outside the lag table"));
        }
        Ok(Cmwc32 { q: lag_table, mask: lag_count - 1, multiplier, carry, index })
    }

    /// Generates the next 32-bit random number.
    #[wrappit] #[inline]
    pub fn next(&mut self) -> u32 {
        self.index = (self.index + 1) & self.mask;
        // A * Q + C < 2**64 as both A and Q are below 2**32.
        let t = (self.multiplier as u64) * (self.q[self.index] as u64) + (self.carry as u64);
        // Complement form keeps the intermediate non-negative.
        let x = u32::MAX - t as u32;
        self.q[self.index] = x;
        self.carry = (t >> 32) as u32;
        x
    }

    /// Returns a value in [0, 2**63) built from two consecutive outputs, first output high.
    #[inline]
    pub fn next_i63(&mut self) -> i64 {
        let hi = self.next() as u64;
        let lo = self.next() as u64;
        ((hi << 32) | lo) as i64 & i64::MAX
    }

    /// Initializes the generator deterministically from a 64-bit seed.
    /// Fills every lag slot and the carry, then discards 10 * R outputs.
    pub fn seed(&mut self, seed: i64) {
        let lo = seed as u32;
        let hi = ((seed as u64) >> 32) as u32;
        let mut mix = SEED_MIX;
        for (i, q) in self.q.iter_mut().enumerate() {
            if i > 0 && i & 3 == 0 {
                mix = mix.rotate_left(3);
            }
            let word = match i & 3 {
                0 => lo,
                1 => hi,
                2 => !lo,
                _ => !hi,
            };
            *q = word ^ mix;
        }
        // Keep the carry in [0, A) so the seeded state is already on a cycle.
        self.carry = (lo ^ hi ^ mix).checked_rem(self.multiplier).unwrap_or(0);
        self.index = 0;
        for _ in 0 .. self.q.len() * WARM_UP_ROUNDS {
            self.next();
        }
    }

    /// Fills the lag table and carry from a cryptographically strong source. No warm-up.
    pub fn seed_from_rng<R: RngCore + CryptoRng + ?Sized>(&mut self, rng: &mut R) {
        let mut bytes = vec![0u8; 4 * (self.q.len() + 1)];
        rng.fill_bytes(&mut bytes);
        let mut words = bytes.chunks_exact(4).map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]));
        for q in self.q.iter_mut() {
            *q = words.next().unwrap_or_default();
        }
        self.carry = words.next().unwrap_or_default();
        self.index = 0;
    }

    /// Fills the lag table and carry from operating system entropy. No warm-up.
    pub fn seed_from_entropy(&mut self) {
        self.seed_from_rng(&mut OsRng);
    }

    /// Multiplier A.
    #[inline]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Current carry C.
    #[inline]
    pub fn carry(&self) -> u32 {
        self.carry
    }

    /// Index of the most recently written lag slot.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Lag count R.
    #[inline]
    pub fn lag_count(&self) -> usize {
        self.q.len()
    }

    /// The lag table in storage order.
    #[inline]
    pub fn lag_table(&self) -> &[u32] {
        &self.q
    }
}

impl Default for Cmwc32 {
    /// Unseeded generator with the default parameters.
    fn default() -> Self {
        Self::from_valid(super::DEFAULT_MULTIPLIER, 1 << super::DEFAULT_LOG2_LAG_COUNT)
    }
}

impl super::Int63Source for Cmwc32 {
    #[inline]
    fn next_i63(&mut self) -> i64 {
        Cmwc32::next_i63(self)
    }
}

use super::{RngCore, SeedableRng};

impl RngCore for Cmwc32 {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = dest.len();
        let mut i = 0;
        while i < bytes {
            let x = self.next();
            let j = bytes.min(i + 4);
            // Always use Little-Endian.
            dest[i .. j].copy_from_slice(&x.to_le_bytes()[0 .. (j - i)]);
            i = j;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Cmwc32 {
    type Seed = [u8; 8];

    /// Creates a Cmwc32 RNG with the default parameters, seeded with `seed` (Little-Endian).
    fn from_seed(seed: Self::Seed) -> Self {
        let mut cmwc = Cmwc32::default();
        cmwc.seed(i64::from_le_bytes(seed));
        cmwc
    }
}
