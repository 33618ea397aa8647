//! Row lookup: substitution scores for 32 residue codes with two shuffles.
//!
//! A byte shuffle resolves at most 16 table entries per call, so each matrix
//! row is split into a table for codes 0..16 and one for codes 16..32 (see
//! `matrix::RowLookupTable`). Bit 4 of a code (`0x10`) picks the table. It is
//! moved into bit 7 of the shuffle index, the "emit zero" bit:
//!
//! ```text
//! high_mask = (code & 0x10) << 3            0x80 for codes >= 16, else 0
//! seq_low   = code | high_mask              zeroes codes >= 16 in table 0
//! seq_high  = code | (high_mask ^ 0x80)     zeroes codes <  16 in table 1
//! score     = shuffle(t0, seq_low) | shuffle(t1, seq_high)
//! ```
//!
//! Exactly one of the two shuffles yields the score for each lane and the
//! other yields 0, so the OR is exact for negative scores too. The lookup is
//! branch-free and constant-time whichever residue each lane holds.
//!
//! Codes must lie in `0..32`; `ResidueVector` checks this when it is built.
//! Bits 5 and 6 of a code are ignored by the shuffle, and a code with bit 7
//! set resolves to 0.

use super::{ResidueVector, ScoreVector};
use crate::compute::matrix::RowLookupTable;
use crate::compute::simd_abstraction::SimdEngine;
use crate::defaults::RESIDUE_HIGH_BIT;

/// Substitution scores of row `row` against each lane's residue code.
///
/// Panics if `row` is not below 32.
#[inline]
pub fn lookup_row<E: SimdEngine>(table: &RowLookupTable, row: usize, seq: E::Vec8) -> E::Vec8 {
    unsafe {
        let (r1, r2) = E::load_row_blocks(table, row);

        let high_mask = E::slli_epi16::<3>(E::and_si128(seq, E::set1_epi8(RESIDUE_HIGH_BIT as i8)));
        let seq_low = E::or_si128(seq, high_mask);
        let seq_high = E::or_si128(seq, E::xor_si128(high_mask, E::set1_epi8(i8::MIN)));

        let s1 = E::shuffle_epi8(r1, seq_low);
        let s2 = E::shuffle_epi8(r2, seq_high);
        E::or_si128(s1, s2)
    }
}

impl<E: SimdEngine> ScoreVector<E> {
    /// Lane `i` holds `table.score(row, seq[i])`.
    ///
    /// The result is a vector of signed substitution deltas, ready to be
    /// added to biased running scores.
    #[inline]
    pub fn from_row(table: &RowLookupTable, row: usize, seq: &ResidueVector<E>) -> Self {
        Self::from_raw(lookup_row::<E>(table, row, seq.data()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::simd_abstraction::SimdEngine128;

    type Sv = ScoreVector<SimdEngine128>;
    type Rv = ResidueVector<SimdEngine128>;

    #[test]
    fn test_every_code_in_every_lane() {
        let table = RowLookupTable::from_fn(|a, b| (b as i32 - a as i32) as i8);
        for row in 0..32 {
            for shift in 0..32u8 {
                let codes: Vec<u8> = (0..16u8).map(|i| (i + shift) % 32).collect();
                let got = Sv::from_row(&table, row, &Rv::load(&codes)).to_vec();
                for (lane, &c) in codes.iter().enumerate() {
                    assert_eq!(got[lane], table.score(row, c as usize), "row {} lane {}", row, lane);
                }
            }
        }
    }

    #[test]
    fn test_negative_scores_survive_the_or() {
        let table = RowLookupTable::from_fn(|_, b| if b < 16 { -1 } else { -128 });
        let codes = [0u8, 16, 15, 31, 1, 17, 14, 30, 2, 18, 13, 29, 3, 19, 12, 28];
        let got = Sv::from_row(&table, 0, &Rv::load(&codes)).to_vec();
        for (lane, &c) in codes.iter().enumerate() {
            assert_eq!(got[lane], if c < 16 { -1 } else { -128 });
        }
    }
}
