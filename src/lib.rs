pub mod check;
pub mod cmwc32;
pub mod codec;
pub mod error;
pub mod params;
pub mod reference;

pub use cmwc32::*;
pub use error::{Error, Result};
pub use params::{search_many, search_params, search_params_with, Params, SearchConfig};
pub use reference::ReferenceCmwc;
pub use rand_core::*;

/// Source of non-negative 63-bit integers, for code that only needs
/// a plain numeric stream. Implemented by `Cmwc32`.
pub trait Int63Source {
    /// Returns a value in [0, 2**63).
    fn next_i63(&mut self) -> i64;
}

// CMWC multipliers for B = 2**32, with the exact period of each generator.
// Every A is prime, A * 2**(32 * R) + 1 is prime and the period is the
// multiplicative order of 2**32 modulo that prime.

// R = 1 (log2 lag count 0).
pub const CMWC_R1_A1: u32 = 4253332471; // period 285436310343122944
pub const CMWC_R1_A2: u32 = 4264505017; // period 286186087213170688
pub const CMWC_R1_A3: u32 = 4283145667; // period 287437040058892288
pub const CMWC_R1_A4: u32 = 4285374253; // period 287586597933678592
pub const CMWC_R1_A5: u32 = 4288278103; // period 287781472008404992

// R = 2 (log2 lag count 1).
pub const CMWC_R2_A1: u32 = 4231509211; // period 1219649491575962978152873984
pub const CMWC_R2_A2: u32 = 4231512247; // period 1219650366643384974749728768
pub const CMWC_R2_A3: u32 = 4246691611; // period 1224025520438848726534979584
pub const CMWC_R2_A4: u32 = 4269449707; // period 1230585095009425492969259008
pub const CMWC_R2_A5: u32 = 4269838273; // period 1230697091533765258994778112

// R = 4 (log2 lag count 2).
pub const CMWC_R4_A1: u32 = 4250569903; // period 22599906052433497083007582018186157588859584512
pub const CMWC_R4_A2: u32 = 4252386973; // period 22609567253690700671348291300966252011734433792
pub const CMWC_R4_A3: u32 = 4256424451; // period 22631034168850563433623090969454758271966511104
pub const CMWC_R4_A4: u32 = 4261847173; // period 22659866304433598515911669683172908474765934592
pub const CMWC_R4_A5: u32 = 4292669383; // period 22823745282129445683379567487218682232341266432

// R = 8 (log2 lag count 3).
pub const CMWC_R8_A1: u32 = 4224759397; // period 7.644 x 10**84
pub const CMWC_R8_A2: u32 = 4250989063; // period 7.691 x 10**84
pub const CMWC_R8_A3: u32 = 4268111437; // period 7.722 x 10**84
pub const CMWC_R8_A4: u32 = 4270484551; // period 7.726 x 10**84
pub const CMWC_R8_A5: u32 = 4285415527; // period 7.753 x 10**84

// R = 16 (log2 lag count 4).
pub const CMWC_R16_A1: u32 = 3864648517; // period 8.096 x 10**161
pub const CMWC_R16_A2: u32 = 4092063091; // period 8.573 x 10**161
pub const CMWC_R16_A3: u32 = 4116967117; // period 8.625 x 10**161
pub const CMWC_R16_A4: u32 = 4144055527; // period 8.682 x 10**161
pub const CMWC_R16_A5: u32 = 4270521133; // period 8.947 x 10**161

// R = 32 (log2 lag count 5).
pub const CMWC_R32_A1: u32 = 1992756781; // period 5.597 x 10**315
pub const CMWC_R32_A2: u32 = 2392853653; // period 6.721 x 10**315
pub const CMWC_R32_A3: u32 = 2625435811; // period 7.375 x 10**315
pub const CMWC_R32_A4: u32 = 3372549937; // period 9.473 x 10**315
pub const CMWC_R32_A5: u32 = 3945340957; // period 1.108 x 10**316

/// Multiplier used by `Default` and `SeedableRng`.
pub const DEFAULT_MULTIPLIER: u32 = CMWC_R16_A5;

/// Log2 of the lag count used by `Default` and `SeedableRng`.
pub const DEFAULT_LOG2_LAG_COUNT: u32 = 4;
