//! Shuffle-ready projection of a substitution matrix.
//!
//! Byte shuffles resolve at most 16 table entries per instruction, while the
//! protein alphabet needs up to 32 codes. Each matrix row is therefore stored
//! as two 16-entry tables (codes 0..16 and 16..32) in the layouts the two
//! engines load directly:
//!
//! ```text
//! matrix8(a)       [ s(a,0)  .. s(a,15) | s(a,16) .. s(a,31) ]   128-bit engine
//! matrix8_low(a)   [ s(a,0)  .. s(a,15) | s(a,0)  .. s(a,15) ]   256-bit engine
//! matrix8_high(a)  [ s(a,16) .. s(a,31) | s(a,16) .. s(a,31) ]   256-bit engine
//! ```
//!
//! The wide shuffle works within each 128-bit half, so its tables repeat the
//! 16 entries in both halves. Every row is 32-byte aligned.

use crate::defaults::{LOOKUP_ALPHABET, LOOKUP_PAD_SCORE, LOOKUP_ROW_BYTES};
use crate::error::{Result, ScoreError};

/// One 32-byte, 32-byte aligned block of a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(32))]
pub struct LookupRow([i8; LOOKUP_ROW_BYTES]);

impl Default for LookupRow {
    fn default() -> Self {
        LookupRow([0; LOOKUP_ROW_BYTES])
    }
}

impl LookupRow {
    #[inline]
    pub fn as_ptr(&self) -> *const i8 {
        self.0.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }
}

/// Options for projecting a matrix into a `RowLookupTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLookupConfig {
    /// Score stored for any code at or beyond the matrix's alphabet size.
    pub pad_score: i8,
}

impl Default for RowLookupConfig {
    fn default() -> Self {
        RowLookupConfig {
            pad_score: LOOKUP_PAD_SCORE,
        }
    }
}

/// Read-only, precomputed row lookup layout of a substitution matrix.
///
/// Always holds 32 rows so that any residue code 0..32 is a valid row index.
#[derive(Debug, Clone)]
pub struct RowLookupTable {
    size: usize,
    matrix8: Vec<LookupRow>,
    matrix8_low: Vec<LookupRow>,
    matrix8_high: Vec<LookupRow>,
}

impl RowLookupTable {
    /// Build from a row-major `size × size` score matrix, padding the
    /// remaining codes with `LOOKUP_PAD_SCORE`.
    pub fn new(size: usize, scores: &[i8]) -> Result<Self> {
        Self::with_config(size, scores, &RowLookupConfig::default())
    }

    pub fn with_config(size: usize, scores: &[i8], config: &RowLookupConfig) -> Result<Self> {
        if size > LOOKUP_ALPHABET {
            return Err(ScoreError::MatrixTooLarge {
                size,
                max: LOOKUP_ALPHABET,
            });
        }
        if scores.len() != size * size {
            return Err(ScoreError::MatrixShape {
                expected: size * size,
                actual: scores.len(),
            });
        }

        let pad = config.pad_score;
        Ok(Self::build(size, |a, b| {
            if a < size && b < size {
                scores[a * size + b]
            } else {
                pad
            }
        }))
    }

    /// Build from a score function evaluated for every `(row, code)` pair in
    /// `0..32 × 0..32`.
    pub fn from_fn(f: impl FnMut(usize, usize) -> i8) -> Self {
        Self::build(LOOKUP_ALPHABET, f)
    }

    /// BLOSUM62 in `AMINO_ACIDS` order.
    pub fn blosum62() -> Self {
        let mut flat = [0i8; BLOSUM62_SIZE * BLOSUM62_SIZE];
        for (a, row) in BLOSUM62.iter().enumerate() {
            flat[a * BLOSUM62_SIZE..(a + 1) * BLOSUM62_SIZE].copy_from_slice(row);
        }
        Self::build(BLOSUM62_SIZE, |a, b| {
            if a < BLOSUM62_SIZE && b < BLOSUM62_SIZE {
                flat[a * BLOSUM62_SIZE + b]
            } else {
                LOOKUP_PAD_SCORE
            }
        })
    }

    fn build(size: usize, mut f: impl FnMut(usize, usize) -> i8) -> Self {
        let mut matrix8 = vec![LookupRow::default(); LOOKUP_ALPHABET];
        let mut matrix8_low = vec![LookupRow::default(); LOOKUP_ALPHABET];
        let mut matrix8_high = vec![LookupRow::default(); LOOKUP_ALPHABET];

        for a in 0..LOOKUP_ALPHABET {
            for b in 0..LOOKUP_ALPHABET {
                let s = f(a, b);
                matrix8[a].0[b] = s;
                let half = if b < 16 { &mut matrix8_low[a] } else { &mut matrix8_high[a] };
                half.0[b & 15] = s;
                half.0[(b & 15) + 16] = s;
            }
        }

        log::debug!("Built row lookup table for a {}-symbol alphabet", size);

        RowLookupTable {
            size,
            matrix8,
            matrix8_low,
            matrix8_high,
        }
    }

    /// Number of symbols taken from the source matrix; the rest are padding.
    pub fn alphabet_size(&self) -> usize {
        self.size
    }

    /// Row `a` as codes 0..16 followed by codes 16..32.
    #[inline]
    pub fn matrix8(&self, a: usize) -> &LookupRow {
        &self.matrix8[a]
    }

    /// Codes 0..16 of row `a`, repeated in both 128-bit halves.
    #[inline]
    pub fn matrix8_low(&self, a: usize) -> &LookupRow {
        &self.matrix8_low[a]
    }

    /// Codes 16..32 of row `a`, repeated in both 128-bit halves.
    #[inline]
    pub fn matrix8_high(&self, a: usize) -> &LookupRow {
        &self.matrix8_high[a]
    }

    /// Scalar score of row `a` against code `b`.
    #[inline]
    pub fn score(&self, a: usize, b: usize) -> i8 {
        self.matrix8[a].0[b]
    }

    /// Highest score among the source matrix's symbols.
    pub fn high_score(&self) -> i8 {
        (0..self.size)
            .flat_map(|a| self.matrix8[a].0[..self.size].iter().copied())
            .max()
            .unwrap_or(0)
    }
}

// ============================================================================
// BLOSUM62 and residue encoding
// ============================================================================

/// Residue letters in code order (NCBI matrix order).
pub const AMINO_ACIDS: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

const BLOSUM62_SIZE: usize = 24;

/// Code of the unknown residue `X`.
pub const UNKNOWN_RESIDUE: u8 = 22;

#[rustfmt::skip]
pub const BLOSUM62: [[i8; BLOSUM62_SIZE]; BLOSUM62_SIZE] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4], // R
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4], // Q
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4], // V
    [-2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4], // B
    [-1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // Z
    [ 0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4], // X
    [-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1], // *
];

/// Map an amino-acid letter (either case) to its code; unknown letters map
/// to `X`.
#[inline]
pub fn encode_residue(letter: u8) -> u8 {
    let upper = letter.to_ascii_uppercase();
    AMINO_ACIDS
        .iter()
        .position(|&c| c == upper)
        .map(|i| i as u8)
        .unwrap_or(UNKNOWN_RESIDUE)
}

pub fn encode_sequence(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&c| encode_residue(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blosum62_is_symmetric() {
        for a in 0..BLOSUM62_SIZE {
            for b in 0..BLOSUM62_SIZE {
                assert_eq!(BLOSUM62[a][b], BLOSUM62[b][a], "({}, {})", a, b);
            }
        }
    }

    #[test]
    fn test_layouts_agree_with_scalar_scores() {
        let table = RowLookupTable::from_fn(|a, b| (a * 3 + b) as i8 - 40);
        for a in 0..LOOKUP_ALPHABET {
            let narrow = table.matrix8(a).as_slice();
            let low = table.matrix8_low(a).as_slice();
            let high = table.matrix8_high(a).as_slice();
            for b in 0..16 {
                assert_eq!(narrow[b], table.score(a, b));
                assert_eq!(narrow[b + 16], table.score(a, b + 16));
                assert_eq!(low[b], table.score(a, b));
                assert_eq!(low[b + 16], table.score(a, b));
                assert_eq!(high[b], table.score(a, b + 16));
                assert_eq!(high[b + 16], table.score(a, b + 16));
            }
        }
    }

    #[test]
    fn test_rows_are_32_byte_aligned() {
        let table = RowLookupTable::blosum62();
        for a in 0..LOOKUP_ALPHABET {
            assert_eq!(table.matrix8(a).as_ptr() as usize % 32, 0);
            assert_eq!(table.matrix8_low(a).as_ptr() as usize % 32, 0);
            assert_eq!(table.matrix8_high(a).as_ptr() as usize % 32, 0);
        }
    }

    #[test]
    fn test_small_matrix_is_padded() {
        let config = RowLookupConfig { pad_score: -7 };
        let table = RowLookupTable::with_config(2, &[1, -1, -1, 1], &config).unwrap();
        assert_eq!(table.alphabet_size(), 2);
        assert_eq!(table.score(0, 0), 1);
        assert_eq!(table.score(1, 0), -1);
        assert_eq!(table.score(0, 2), -7);
        assert_eq!(table.score(31, 31), -7);
        assert_eq!(table.high_score(), 1);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert_eq!(
            RowLookupTable::new(3, &[0; 8]).unwrap_err(),
            ScoreError::MatrixShape {
                expected: 9,
                actual: 8
            }
        );
        assert!(matches!(
            RowLookupTable::new(33, &[0; 33 * 33]),
            Err(ScoreError::MatrixTooLarge { size: 33, .. })
        ));
    }

    #[test]
    fn test_encode_sequence() {
        assert_eq!(encode_sequence(b"ARnd*"), vec![0, 1, 2, 3, 23]);
        assert_eq!(encode_residue(b'J'), UNKNOWN_RESIDUE);
        assert_eq!(RowLookupTable::blosum62().high_score(), 11);
    }
}
