use crate::cmwc32::Cmwc32;
use crate::error::{Error, Result};

/// Generic CMWC generator for any modulus B in [2, 2**32] and any lag count R.
/// It does not take advantage of B = 2**32 and exists to check `Cmwc32`
/// and to measure periods of small configurations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferenceCmwc {
    q: Vec<u64>,
    multiplier: u64,
    modulus: u64,
    /// Raw seeds may exceed the modulus, so the carry can outgrow 64 bits.
    carry: u128,
    index: usize,
}

impl ReferenceCmwc {

    /// Creates a generator with (A, B, R) = (multiplier, modulus, lag_count).
    /// Lag table and carry start at zero.
    pub fn new(multiplier: u32, modulus: u64, lag_count: usize) -> Result<Self> {
        if !(2 ..= 1 << 32).contains(&modulus) {
            return Err(Error::Construction("modulus must be between 2 and 2**32"));
        }
        if lag_count == 0 {
            return Err(Error::Construction("lag table must not be empty"));
        }
        Ok(ReferenceCmwc { q: vec![0; lag_count], multiplier: multiplier as u64, modulus, carry: 0, index: 0 })
    }

    /// Copies the exact state of a fast generator into a reference generator with B = 2**32.
    pub fn from_cmwc32(cmwc: &Cmwc32) -> Self {
        ReferenceCmwc {
            q: cmwc.lag_table().iter().map(|&q| q as u64).collect(),
            multiplier: cmwc.multiplier() as u64,
            modulus: 1 << 32,
            carry: cmwc.carry() as u128,
            index: cmwc.index(),
        }
    }

    /// Generates the next output, which is below the modulus.
    pub fn next(&mut self) -> u32 {
        self.index = (self.index + 1) % self.q.len();
        let modulus = self.modulus as u128;
        // A < 2**32, Q < 2**64 and C < 2**97, so t < 2**128.
        let t = self.multiplier as u128 * self.q[self.index] as u128 + self.carry;
        let x = modulus - 1 - t % modulus;
        self.q[self.index] = x as u64;
        self.carry = t / modulus;
        x as u32
    }

    /// Sets every lag slot to the raw seed value. No warm-up.
    pub fn seed(&mut self, seed: i64) {
        for q in self.q.iter_mut() {
            *q = seed as u64;
        }
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier as u32
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn carry(&self) -> u128 {
        self.carry
    }

    pub fn set_carry(&mut self, carry: u128) {
        self.carry = carry;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Sets the index of the most recently written slot, reduced modulo the lag count.
    pub fn set_index(&mut self, index: usize) {
        self.index = index % self.q.len();
    }

    pub fn lag_table(&self) -> &[u64] {
        &self.q
    }

    pub fn lag_table_mut(&mut self) -> &mut [u64] {
        &mut self.q
    }
}
