//! # Lane-packed int8 score vectors
//!
//! `ScoreVector<E>` packs one signed byte score per DP cell into a single
//! SIMD register of engine `E` (16 lanes on `SimdEngine128`, 32 on
//! `SimdEngine256`) and advances all of them with one instruction.
//!
//! ## Biased scores
//!
//! A stored lane value `s` stands for the true score `s - i8::MIN`, so the
//! all-`i8::MIN` vector returned by [`ScoreVector::zero`] means "true score 0"
//! and is also the DP initialization sentinel. Substitution scores and
//! penalties are plain signed deltas added to or subtracted from it. All
//! arithmetic saturates; results clamp to `[-128, 127]` and never wrap.
//! Use [`ScoreTraits::int_score`](traits::ScoreTraits::int_score) to decode a
//! lane back to its true score.
//!
//! ## Safety
//!
//! Every method here is safe. The unsafe engine calls are sound because an
//! engine type is only compiled when the build's target features guarantee
//! its instructions (see `simd_abstraction`), and every buffer access is
//! length-checked before the raw load or store. The `*_ptr` functions are
//! the unchecked escape hatches.

pub mod dispatch;
pub mod lookup;
pub mod residue;
pub mod trace;
pub mod traits;

use std::fmt;
use std::ops::{Add, AddAssign, BitAndAssign, Sub, SubAssign};

use crate::compute::simd_abstraction::SimdEngine;
use crate::defaults::MAX_CHANNELS;
use crate::error::{Result, ScoreError};

pub use residue::ResidueVector;
pub use trace::{TraceMask, TraceWord};
pub use traits::ScoreTraits;

/// A vector of `E::WIDTH_8` saturating, biased int8 scores.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct ScoreVector<E: SimdEngine> {
    data: E::Vec8,
}

impl<E: SimdEngine> ScoreVector<E> {
    /// Number of lanes.
    pub const CHANNELS: usize = E::WIDTH_8;

    /// Every lane at the sentinel `i8::MIN` (true score 0).
    #[inline]
    pub fn zero() -> Self {
        Self::splat(i8::MIN)
    }

    /// Every lane set to `x`.
    #[inline]
    pub fn splat(x: i8) -> Self {
        Self {
            data: unsafe { E::set1_epi8(x) },
        }
    }

    /// Every lane set to the low byte of `x`.
    #[inline]
    pub fn from_int(x: i32) -> Self {
        Self::splat(x as i8)
    }

    #[inline]
    pub fn from_raw(data: E::Vec8) -> Self {
        Self { data }
    }

    /// Load the first `CHANNELS` values of `s`.
    ///
    /// Panics if `s` is shorter than the lane count.
    #[inline]
    pub fn load(s: &[i8]) -> Self {
        assert!(
            s.len() >= E::WIDTH_8,
            "score buffer holds {} values, need {}",
            s.len(),
            E::WIDTH_8
        );
        unsafe { Self::load_ptr(s.as_ptr()) }
    }

    /// Load the first `CHANNELS` bytes of `s`, reinterpreted as signed.
    #[inline]
    pub fn load_u8(s: &[u8]) -> Self {
        assert!(
            s.len() >= E::WIDTH_8,
            "score buffer holds {} values, need {}",
            s.len(),
            E::WIDTH_8
        );
        unsafe { Self::load_ptr(s.as_ptr() as *const i8) }
    }

    pub fn try_load(s: &[i8]) -> Result<Self> {
        if s.len() < E::WIDTH_8 {
            return Err(ScoreError::BufferTooShort {
                needed: E::WIDTH_8,
                actual: s.len(),
            });
        }
        Ok(unsafe { Self::load_ptr(s.as_ptr()) })
    }

    /// Unaligned load of `CHANNELS` bytes.
    ///
    /// # Safety
    /// `p` must be valid for reads of `CHANNELS` bytes.
    #[inline]
    pub unsafe fn load_ptr(p: *const i8) -> Self {
        Self {
            data: unsafe { E::loadu_si128(p as *const E::Vec8) },
        }
    }

    /// Write all lanes, in lane order, to the front of `out`.
    ///
    /// Panics if `out` is shorter than the lane count.
    #[inline]
    pub fn store(&self, out: &mut [i8]) {
        assert!(
            out.len() >= E::WIDTH_8,
            "output buffer holds {} values, need {}",
            out.len(),
            E::WIDTH_8
        );
        unsafe { self.store_ptr(out.as_mut_ptr()) }
    }

    /// Unaligned store of `CHANNELS` bytes.
    ///
    /// # Safety
    /// `p` must be valid for writes of `CHANNELS` bytes.
    #[inline]
    pub unsafe fn store_ptr(&self, p: *mut i8) {
        unsafe { E::storeu_si128(p as *mut E::Vec8, self.data) }
    }

    pub fn to_vec(&self) -> Vec<i8> {
        self.to_lanes()[..E::WIDTH_8].to_vec()
    }

    #[inline]
    fn to_lanes(self) -> [i8; MAX_CHANNELS] {
        const { assert!(E::WIDTH_8 <= MAX_CHANNELS) };
        let mut buf = [0i8; MAX_CHANNELS];
        unsafe { self.store_ptr(buf.as_mut_ptr()) };
        buf
    }

    /// Read lane `i`.
    ///
    /// Scalar escape hatch for band edges; it spills the register, so keep
    /// it out of the inner loop. Panics if `i >= CHANNELS`.
    #[inline]
    pub fn get(&self, i: usize) -> i8 {
        assert!(i < E::WIDTH_8, "lane {} out of range for {} channels", i, E::WIDTH_8);
        self.to_lanes()[i]
    }

    /// Overwrite lane `i` with `v`. Panics if `i >= CHANNELS`.
    #[inline]
    pub fn set(&mut self, i: usize, v: i8) {
        assert!(i < E::WIDTH_8, "lane {} out of range for {} channels", i, E::WIDTH_8);
        let mut buf = self.to_lanes();
        buf[i] = v;
        *self = unsafe { Self::load_ptr(buf.as_ptr()) };
    }

    /// Saturating `+1` on every lane.
    #[inline]
    pub fn incr(&mut self) -> &mut Self {
        self.data = unsafe { E::adds_epi8(self.data, E::set1_epi8(1)) };
        self
    }

    /// Per-lane equality: all-ones where lanes match, zero elsewhere.
    #[inline]
    pub fn cmpeq(&self, other: &Self) -> Self {
        Self {
            data: unsafe { E::cmpeq_epi8(self.data, other.data) },
        }
    }

    #[inline]
    pub fn max_assign(&mut self, rhs: Self) -> &mut Self {
        self.data = unsafe { E::max_epi8(self.data, rhs.data) };
        self
    }

    #[inline]
    pub fn min_assign(&mut self, rhs: Self) -> &mut Self {
        self.data = unsafe { E::min_epi8(self.data, rhs.data) };
        self
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        max(self, rhs)
    }

    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        min(self, rhs)
    }
}

/// Lane `i` of the result is `w[i]` if the sign bit of `mask[i]` is set,
/// otherwise `v[i]`.
#[inline]
pub fn blend<E: SimdEngine>(
    v: ScoreVector<E>,
    w: ScoreVector<E>,
    mask: ScoreVector<E>,
) -> ScoreVector<E> {
    ScoreVector {
        data: unsafe { E::blendv_epi8(v.data, w.data, mask.data) },
    }
}

/// Bit `i` is set iff lane `i` of `v` equals lane `i` of `w`.
#[inline]
pub fn cmp_mask<E: SimdEngine>(v: ScoreVector<E>, w: ScoreVector<E>) -> u32 {
    unsafe { E::movemask_epi8(E::cmpeq_epi8(v.data, w.data)) as u32 }
}

#[inline]
pub fn max<E: SimdEngine>(lhs: ScoreVector<E>, rhs: ScoreVector<E>) -> ScoreVector<E> {
    ScoreVector {
        data: unsafe { E::max_epi8(lhs.data, rhs.data) },
    }
}

#[inline]
pub fn min<E: SimdEngine>(lhs: ScoreVector<E>, rhs: ScoreVector<E>) -> ScoreVector<E> {
    ScoreVector {
        data: unsafe { E::min_epi8(lhs.data, rhs.data) },
    }
}

impl<E: SimdEngine> Default for ScoreVector<E> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<E: SimdEngine> Add for ScoreVector<E> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            data: unsafe { E::adds_epi8(self.data, rhs.data) },
        }
    }
}

impl<E: SimdEngine> Sub for ScoreVector<E> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            data: unsafe { E::subs_epi8(self.data, rhs.data) },
        }
    }
}

impl<E: SimdEngine> AddAssign for ScoreVector<E> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.data = unsafe { E::adds_epi8(self.data, rhs.data) };
    }
}

impl<E: SimdEngine> SubAssign for ScoreVector<E> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.data = unsafe { E::subs_epi8(self.data, rhs.data) };
    }
}

impl<E: SimdEngine> BitAndAssign for ScoreVector<E> {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.data = unsafe { E::and_si128(self.data, rhs.data) };
    }
}

/// Whole-vector equality (every lane equal).
impl<E: SimdEngine> PartialEq for ScoreVector<E> {
    fn eq(&self, other: &Self) -> bool {
        let all = u32::MAX >> (32 - E::WIDTH_8);
        cmp_mask(*self, *other) == all
    }
}

impl<E: SimdEngine> Eq for ScoreVector<E> {}

impl<E: SimdEngine> fmt::Debug for ScoreVector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScoreVector").field(&self.to_vec()).finish()
    }
}

impl<E: SimdEngine> fmt::Display for ScoreVector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in &self.to_lanes()[..E::WIDTH_8] {
            write!(f, "{:>3} ", x)?;
        }
        Ok(())
    }
}
