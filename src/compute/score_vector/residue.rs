//! Packed residue codes, one per lane.

use std::fmt;

use crate::compute::simd_abstraction::SimdEngine;
use crate::defaults::{LOOKUP_ALPHABET, MAX_CHANNELS};
use crate::error::{Result, ScoreError};

/// One residue code (0..32) per lane, the query side of a row lookup.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct ResidueVector<E: SimdEngine> {
    data: E::Vec8,
}

impl<E: SimdEngine> ResidueVector<E> {
    pub const CHANNELS: usize = E::WIDTH_8;

    /// Load the first `CHANNELS` codes of `codes`.
    ///
    /// Panics if `codes` is too short. Codes of 32 or more are a caller
    /// error, checked only in debug builds; use [`Self::try_load`] for
    /// untrusted input.
    #[inline]
    pub fn load(codes: &[u8]) -> Self {
        assert!(
            codes.len() >= E::WIDTH_8,
            "residue buffer holds {} codes, need {}",
            codes.len(),
            E::WIDTH_8
        );
        debug_assert!(
            codes[..E::WIDTH_8].iter().all(|&c| (c as usize) < LOOKUP_ALPHABET),
            "residue codes must be below {}",
            LOOKUP_ALPHABET
        );
        Self {
            data: unsafe { E::loadu_si128(codes.as_ptr() as *const E::Vec8) },
        }
    }

    pub fn try_load(codes: &[u8]) -> Result<Self> {
        if codes.len() < E::WIDTH_8 {
            return Err(ScoreError::BufferTooShort {
                needed: E::WIDTH_8,
                actual: codes.len(),
            });
        }
        if let Some((lane, &code)) = codes[..E::WIDTH_8]
            .iter()
            .enumerate()
            .find(|&(_, &c)| c as usize >= LOOKUP_ALPHABET)
        {
            return Err(ScoreError::ResidueOutOfRange { lane, code });
        }
        Ok(Self {
            data: unsafe { E::loadu_si128(codes.as_ptr() as *const E::Vec8) },
        })
    }

    /// Every lane holds `code`.
    #[inline]
    pub fn splat(code: u8) -> Self {
        debug_assert!((code as usize) < LOOKUP_ALPHABET);
        Self {
            data: unsafe { E::set1_epi8(code as i8) },
        }
    }

    #[inline]
    pub fn from_raw(data: E::Vec8) -> Self {
        Self { data }
    }

    #[inline]
    pub fn data(self) -> E::Vec8 {
        self.data
    }

    pub fn codes(&self) -> Vec<u8> {
        const { assert!(E::WIDTH_8 <= MAX_CHANNELS) };
        let mut buf = [0u8; MAX_CHANNELS];
        unsafe { E::storeu_si128(buf.as_mut_ptr() as *mut E::Vec8, self.data) };
        buf[..E::WIDTH_8].to_vec()
    }
}

impl<E: SimdEngine> fmt::Debug for ResidueVector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResidueVector").field(&self.codes()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::simd_abstraction::SimdEngine128;

    type Rv = ResidueVector<SimdEngine128>;

    #[test]
    fn test_load_round_trips_codes() {
        let codes: Vec<u8> = (0..16).map(|i| (i * 2) as u8).collect();
        assert_eq!(Rv::load(&codes).codes(), codes);
        assert_eq!(Rv::splat(7).codes(), vec![7; 16]);
    }

    #[test]
    fn test_try_load_rejects_out_of_range_code() {
        let mut codes = [0u8; 16];
        codes[5] = 32;
        assert_eq!(
            Rv::try_load(&codes).unwrap_err(),
            ScoreError::ResidueOutOfRange { lane: 5, code: 32 }
        );
        assert!(matches!(
            Rv::try_load(&codes[..3]),
            Err(ScoreError::BufferTooShort { needed: 16, actual: 3 })
        ));
    }

    #[test]
    fn test_try_load_ignores_bytes_past_the_lanes() {
        let mut codes = [1u8; 20];
        codes[18] = 200;
        assert!(Rv::try_load(&codes).is_ok());
    }
}
