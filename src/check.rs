use crate::reference::ReferenceCmwc;

// This module measures CMWC periods empirically, to validate analytic
// periods of small configurations. It is an offline tool.

/// Length of the leading output signature searched for.
pub const SIGNATURE_LEN: usize = 10;

/// Returns the earliest offset > 0 at which the leading signature of `sequence` recurs,
/// or 0 if it does not recur.
pub fn find_period(sequence: &[u8]) -> usize {
    if sequence.len() <= SIGNATURE_LEN {
        return 0;
    }
    let signature = &sequence[0 .. SIGNATURE_LEN];
    sequence[1 ..]
        .windows(SIGNATURE_LEN)
        .position(|window| window == signature)
        .map_or(0, |offset| offset + 1)
}

/// Measures the period of a reference generator.
/// Resets the generator to lag table Q[i] = (i + 1) mod B with zero carry,
/// draws 3 * upper_bound_guess outputs and looks for the first recurrence of
/// their low bytes. Returns 0 if the window is too short to see one.
pub fn measure_period(cmwc: &mut ReferenceCmwc, upper_bound_guess: usize) -> usize {
    let modulus = cmwc.modulus();
    for (i, q) in cmwc.lag_table_mut().iter_mut().enumerate() {
        *q = (i as u64 + 1) % modulus;
    }
    cmwc.set_carry(0);
    cmwc.set_index(0);
    let sequence: Vec<u8> = (0 .. upper_bound_guess * 3).map(|_| cmwc.next() as u8).collect();
    find_period(&sequence)
}
