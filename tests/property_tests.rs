//! Property tests for the CMWC generators, the state codec and the parameter search.
//!
//! Run with `cargo test --test property_tests`; raise `PROPTEST_CASES` for
//! a more thorough run.

use cmwc::*;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use proptest::prelude::*;

/// Multipliers and log2 lag counts of the published parameter sets.
fn published() -> impl Strategy<Value = (u32, u32)> {
    prop_oneof![
        prop::sample::select(vec![CMWC_R1_A1, CMWC_R1_A2, CMWC_R1_A3, CMWC_R1_A4, CMWC_R1_A5]).prop_map(|a| (a, 0)),
        prop::sample::select(vec![CMWC_R2_A1, CMWC_R2_A2, CMWC_R2_A3, CMWC_R2_A4, CMWC_R2_A5]).prop_map(|a| (a, 1)),
        prop::sample::select(vec![CMWC_R4_A1, CMWC_R4_A2, CMWC_R4_A3, CMWC_R4_A4, CMWC_R4_A5]).prop_map(|a| (a, 2)),
        prop::sample::select(vec![CMWC_R8_A1, CMWC_R8_A2, CMWC_R8_A3, CMWC_R8_A4, CMWC_R8_A5]).prop_map(|a| (a, 3)),
        prop::sample::select(vec![CMWC_R16_A1, CMWC_R16_A2, CMWC_R16_A3, CMWC_R16_A4, CMWC_R16_A5]).prop_map(|a| (a, 4)),
        prop::sample::select(vec![CMWC_R32_A1, CMWC_R32_A2, CMWC_R32_A3, CMWC_R32_A4, CMWC_R32_A5]).prop_map(|a| (a, 5)),
    ]
}

proptest! {
    /// The fast generator and the reference generator agree for any multiplier,
    /// lag count and starting state.
    #[test]
    fn prop_cmwc32_matches_reference(
        multiplier in any::<u32>(),
        log2_lag_count in 0u32..7,
        seed in any::<i64>(),
        draws in 0usize..300,
    ) {
        let mut fast = Cmwc32::new(multiplier, log2_lag_count).unwrap();
        fast.seed(seed);
        for _ in 0..draws {
            fast.next();
        }
        let mut slow = ReferenceCmwc::from_cmwc32(&fast);
        for _ in 0..2000 {
            prop_assert_eq!(fast.next(), slow.next());
        }
    }

    /// Raw-filled lag tables give the same stream on both generators.
    #[test]
    fn prop_raw_seed_matches_reference(
        (multiplier, log2_lag_count) in published(),
        seed in any::<u32>(),
    ) {
        let lag_count = 1usize << log2_lag_count;
        let mut fast = Cmwc32::from_parts(multiplier, 0, 0, vec![seed; lag_count]).unwrap();
        let mut slow = ReferenceCmwc::new(multiplier, 1 << 32, lag_count).unwrap();
        slow.seed(seed as i64);
        for _ in 0..2000 {
            prop_assert_eq!(fast.next(), slow.next());
        }
    }

    /// Seeding is a pure function of (multiplier, lag count, seed).
    #[test]
    fn prop_seed_is_deterministic(
        (multiplier, log2_lag_count) in published(),
        seed in any::<i64>(),
        noise in any::<i64>(),
    ) {
        let mut cmwc1 = Cmwc32::new(multiplier, log2_lag_count).unwrap();
        let mut cmwc2 = Cmwc32::new(multiplier, log2_lag_count).unwrap();
        cmwc2.seed(noise);
        cmwc2.next();
        cmwc1.seed(seed);
        cmwc2.seed(seed);
        prop_assert_eq!(&cmwc1, &cmwc2);
        for _ in 0..500 {
            prop_assert_eq!(cmwc1.next_i63(), cmwc2.next_i63());
        }
    }

    /// Decoding an encoded generator resumes the same stream.
    #[test]
    fn prop_codec_resumes_stream(
        (multiplier, log2_lag_count) in published(),
        seed in any::<i64>(),
        draws in 0usize..1000,
    ) {
        let mut original = Cmwc32::new(multiplier, log2_lag_count).unwrap();
        original.seed(seed);
        for _ in 0..draws {
            original.next();
        }
        let bytes = original.to_bytes();
        prop_assert_eq!(codec::encoded_len(original.lag_count()), bytes.len());
        let mut restored = Cmwc32::from_bytes(&bytes).unwrap();
        for _ in 0..500 {
            prop_assert_eq!(original.next(), restored.next());
        }
    }

    /// Any strict prefix of an encoded generator fails to decode.
    #[test]
    fn prop_codec_rejects_prefixes(
        log2_lag_count in 0u32..5,
        cut in any::<prop::sample::Index>(),
    ) {
        let cmwc = Cmwc32::new(CMWC_R2_A1, log2_lag_count).unwrap();
        let bytes = cmwc.to_bytes();
        let len = cut.index(bytes.len());
        let is_truncated = matches!(Cmwc32::from_bytes(&bytes[..len]), Err(Error::Truncated { .. }));
        prop_assert!(is_truncated);
    }

    /// next_i63 stays in [0, 2**63).
    #[test]
    fn prop_next_i63_non_negative(multiplier in any::<u32>(), seed in any::<i64>()) {
        let mut cmwc = Cmwc32::new(multiplier, 3).unwrap();
        cmwc.seed(seed);
        for _ in 0..1000 {
            prop_assert!(cmwc.next_i63() >= 0);
        }
    }

    /// Miller-Rabin agrees with trial division on small numbers.
    #[test]
    fn prop_primality_matches_trial_division(n in 0u64..1_000_000, seed in any::<u64>()) {
        let mut rng = Cmwc32::seed_from_u64(seed);
        let expected = n >= 2 && (2u64..).take_while(|d| d * d <= n).all(|d| n % d != 0);
        prop_assert_eq!(expected, params::is_probably_prime(&BigUint::from(n), 20, &mut rng));
    }

    /// Any search result for B = 16 or 256 is a prime multiplier whose period is
    /// the measured period of the reference generator.
    #[test]
    fn prop_search_period_is_measured_period(seed in any::<u64>(), wide in any::<bool>()) {
        let modulus = if wide { 256 } else { 16 };
        let mut rng = Cmwc32::seed_from_u64(seed);
        let found = search_params(modulus, 1, &mut rng).unwrap();
        prop_assert!((found.multiplier as u64) < modulus);
        prop_assert!(params::is_probably_prime(&BigUint::from(found.multiplier), 20, &mut rng));
        let period = found.period.to_usize().unwrap();
        let mut cmwc = ReferenceCmwc::new(found.multiplier, modulus, 1).unwrap();
        prop_assert_eq!(period, check::measure_period(&mut cmwc, period + 16));
    }
}
