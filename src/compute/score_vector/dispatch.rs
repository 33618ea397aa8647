//! The widest score vector this build can run.
//!
//! Chosen at compile time from the enabled target features: 32 lanes when
//! AVX2 is enabled on x86_64, 16 lanes otherwise. Callers that do not care
//! about the width use these aliases; callers that do stay generic over
//! `E: SimdEngine`.

use super::{ResidueVector, ScoreVector, TraceMask};

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub type DispatchEngine = crate::compute::simd_abstraction::SimdEngine256;

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
pub type DispatchEngine = crate::compute::simd_abstraction::SimdEngine128;

pub type DispatchScoreVector = ScoreVector<DispatchEngine>;
pub type DispatchResidueVector = ResidueVector<DispatchEngine>;
pub type DispatchTraceMask = TraceMask<DispatchEngine>;

/// Lane count of the dispatched score vector.
pub const DISPATCH_CHANNELS: usize = DispatchScoreVector::CHANNELS;

/// Load a dispatched score vector from the front of `s`.
///
/// Panics if `s` holds fewer than `DISPATCH_CHANNELS` values.
#[inline]
pub fn load_sv(s: &[i8]) -> DispatchScoreVector {
    DispatchScoreVector::load(s)
}

#[inline]
pub fn load_sv_u8(s: &[u8]) -> DispatchScoreVector {
    DispatchScoreVector::load_u8(s)
}
