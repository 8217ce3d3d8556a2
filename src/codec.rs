use crate::cmwc32::Cmwc32;
use crate::error::{Error, Result};

// Fixed Little-Endian layout of Cmwc32 state:
//
// offset  size    field
// 0       4       multiplier
// 4       4       carry
// 8       4       index
// 12      4       lag count R
// 16      4 * R   lag table
//
// There is no version or checksum; integrity is up to the caller.

const HEADER_LEN: usize = 16;

/// Encoded size of a generator with the given lag count.
pub fn encoded_len(lag_count: usize) -> usize {
    HEADER_LEN + 4 * lag_count
}

/// `encoded_len` for untrusted counts. None if the size does not fit in usize.
fn checked_encoded_len(lag_count: usize) -> Option<usize> {
    lag_count.checked_mul(4)?.checked_add(HEADER_LEN)
}

/// Serializes generator state.
pub fn encode(cmwc: &Cmwc32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(cmwc.lag_count()));
    bytes.extend_from_slice(&cmwc.multiplier().to_le_bytes());
    bytes.extend_from_slice(&cmwc.carry().to_le_bytes());
    // Both fit: the lag count is at most 2**31.
    bytes.extend_from_slice(&(cmwc.index() as u32).to_le_bytes());
    bytes.extend_from_slice(&(cmwc.lag_count() as u32).to_le_bytes());
    for q in cmwc.lag_table() {
        bytes.extend_from_slice(&q.to_le_bytes());
    }
    bytes
}

#[inline] fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Deserializes generator state written by `encode`.
pub fn decode(bytes: &[u8]) -> Result<Cmwc32> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::Truncated { needed: HEADER_LEN, available: bytes.len() });
    }
    let multiplier = read_u32(bytes, 0);
    let carry = read_u32(bytes, 4);
    let index = read_u32(bytes, 8) as usize;
    let lag_count = read_u32(bytes, 12) as usize;
    if !lag_count.is_power_of_two() {
        return Err(Error::Malformed("lag count is not a power of two"));
    }
    let needed = checked_encoded_len(lag_count).ok_or(Error::Malformed("lag count does not fit in memory"))?;
    if bytes.len() < needed {
        return Err(Error::Truncated { needed, available: bytes.len() });
    }
    if bytes.len() > needed {
        return Err(Error::Malformed("trailing bytes after lag table"));
    }
    if index >= lag_count {
        return Err(Error::Malformed("lag index is outside the lag table"));
    }
    let lag_table = bytes[HEADER_LEN ..].chunks_exact(4).map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]])).collect();
    Cmwc32::from_parts(multiplier, carry, index, lag_table).map_err(|_| Error::Malformed("inconsistent generator state"))
}

impl Cmwc32 {
    /// Serializes the generator state. See the `codec` module for the layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }

    /// Restores a generator serialized with `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode(bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Cmwc32 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&encode(self))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cmwc32 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let bytes = <Vec<u8> as serde::Deserialize>::deserialize(deserializer)?;
        decode(&bytes).map_err(serde::de::Error::custom)
    }
}
