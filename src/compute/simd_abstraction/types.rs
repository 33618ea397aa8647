//! Register types shared by the engines.
//!
//! `simd_arch` names the target's `std::arch` module. `__m128i` is the native
//! SSE register on x86_64; on aarch64 it is a transparent wrapper over a NEON
//! `uint8x16_t`, so the portable intrinsics can keep x86 signatures on both
//! targets. `__m256i` exists only in AVX2 builds.

#[cfg(target_arch = "x86_64")]
pub use std::arch::x86_64 as simd_arch;

#[cfg(target_arch = "aarch64")]
pub use std::arch::aarch64 as simd_arch;

#[allow(non_camel_case_types)]
#[cfg(target_arch = "x86_64")]
pub type __m128i = simd_arch::__m128i;

#[allow(non_camel_case_types)]
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub type __m256i = simd_arch::__m256i;

/// 16 byte lanes in a NEON register.
#[allow(non_camel_case_types)]
#[cfg(target_arch = "aarch64")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct __m128i(pub simd_arch::uint8x16_t);

#[cfg(target_arch = "aarch64")]
impl __m128i {
    /// Lanes in memory order.
    #[inline]
    pub fn to_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        unsafe { simd_arch::vst1q_u8(out.as_mut_ptr(), self.0) };
        out
    }

    // Bitcasts between lane widths; no lane reordering.

    #[inline]
    pub fn as_s8(self) -> simd_arch::int8x16_t {
        unsafe { simd_arch::vreinterpretq_s8_u8(self.0) }
    }

    #[inline]
    pub fn from_s8(v: simd_arch::int8x16_t) -> Self {
        Self(unsafe { simd_arch::vreinterpretq_u8_s8(v) })
    }

    /// 16-bit view, for the word shifts of the row lookup.
    #[inline]
    pub fn as_s16(self) -> simd_arch::int16x8_t {
        unsafe { simd_arch::vreinterpretq_s16_u8(self.0) }
    }

    #[inline]
    pub fn from_s16(v: simd_arch::int16x8_t) -> Self {
        Self(unsafe { simd_arch::vreinterpretq_u8_s16(v) })
    }
}

#[cfg(target_arch = "aarch64")]
impl std::fmt::Debug for __m128i {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__m128i({:?})", self.to_bytes())
    }
}
