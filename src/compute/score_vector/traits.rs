//! Per-representation constants for generic DP code.

use super::{ScoreVector, TraceMask};
use crate::compute::simd_abstraction::SimdEngine;

/// Describes a score representation: its lane count, scalar types, zero
/// sentinel and score range.
///
/// DP code written against `ScoreTraits` decodes stored lane values through
/// [`int_score`](Self::int_score) and never assumes a particular bias.
pub trait ScoreTraits: Copy {
    const CHANNELS: usize;

    /// Stored scalar lane value.
    type Score: Copy;
    /// Unsigned true score of a lane, for code that buckets scores.
    type Unsigned: Copy;
    type TraceMask: Copy + Default;

    /// Vector with every lane at the zero sentinel.
    fn zero() -> Self;

    /// Stored value meaning true score 0.
    fn zero_score() -> Self::Score;

    /// Largest stored value.
    fn max_score() -> Self::Score;

    /// True score of a stored lane value: `s - zero_score()`.
    fn int_score(s: Self::Score) -> i32;

    /// Largest representable true score.
    fn max_int_score() -> i32;

    /// True score as an unsigned value: `int_score(s)` without widening.
    fn to_unsigned(s: Self::Score) -> Self::Unsigned;

    /// Normalize a vector after arithmetic. Saturating int8 lanes never
    /// leave their range, so this does nothing for them.
    fn saturate(_v: &mut Self) {}
}

impl<E: SimdEngine> ScoreTraits for ScoreVector<E> {
    const CHANNELS: usize = E::WIDTH_8;

    type Score = i8;
    type Unsigned = u8;
    type TraceMask = TraceMask<E>;

    #[inline]
    fn zero() -> Self {
        ScoreVector::zero()
    }

    #[inline]
    fn zero_score() -> i8 {
        i8::MIN
    }

    #[inline]
    fn max_score() -> i8 {
        i8::MAX
    }

    #[inline]
    fn int_score(s: i8) -> i32 {
        s as i32 - i8::MIN as i32
    }

    #[inline]
    fn max_int_score() -> i32 {
        i8::MAX as i32 - i8::MIN as i32
    }

    #[inline]
    fn to_unsigned(s: i8) -> u8 {
        (s as u8) ^ 0x80
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::matrix::RowLookupTable;
    use crate::compute::score_vector::ResidueVector;
    use crate::compute::simd_abstraction::SimdEngine128;

    type Sv = ScoreVector<SimdEngine128>;

    #[test]
    fn test_constants() {
        assert_eq!(<Sv as ScoreTraits>::CHANNELS, 16);
        assert_eq!(Sv::zero_score(), -128);
        assert_eq!(Sv::max_score(), 127);
        assert_eq!(Sv::max_int_score(), 255);
        assert_eq!(Sv::int_score(Sv::zero_score()), 0);
        assert_eq!(Sv::int_score(Sv::max_score()), Sv::max_int_score());
    }

    #[test]
    fn test_to_unsigned_matches_int_score() {
        assert_eq!(Sv::to_unsigned(Sv::zero_score()), 0);
        assert_eq!(Sv::to_unsigned(Sv::max_score()), 255);
        for s in i8::MIN..=i8::MAX {
            assert_eq!(Sv::to_unsigned(s) as i32, Sv::int_score(s), "stored {}", s);
        }
    }

    #[test]
    fn test_zero_decodes_to_zero_in_every_lane() {
        let z = <Sv as ScoreTraits>::zero();
        assert!(z.to_vec().iter().all(|&s| Sv::int_score(s) == 0));
    }

    #[test]
    fn test_repeated_adds_decode_to_true_sum() {
        let v = Sv::zero() + Sv::splat(3) + Sv::splat(3);
        assert_eq!(Sv::int_score(v.get(0)), 6);
    }

    #[test]
    fn test_lookup_added_to_zero_decodes_to_matrix_entry() {
        let mut values = vec![0i8; 32 * 32];
        values[5 * 32..5 * 32 + 4].copy_from_slice(&[4, -1, -2, -2]);
        let table = RowLookupTable::new(32, &values).unwrap();

        let seq = ResidueVector::<SimdEngine128>::load(&[0, 1, 2, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let delta = Sv::from_row(&table, 5, &seq);
        assert_eq!(&delta.to_vec()[..4], &[4, -1, -2, 4]);

        let v = Sv::zero() + delta;
        assert_eq!(Sv::int_score(v.get(0)), 4);
        assert_eq!(Sv::int_score(v.get(3)), 4);
        // A biased lane cannot drop below the zero sentinel.
        assert_eq!(Sv::int_score(v.get(1)), 0);
    }

    #[test]
    fn test_saturate_is_a_no_op() {
        let mut v = Sv::splat(17);
        Sv::saturate(&mut v);
        assert_eq!(v, Sv::splat(17));
    }
}
