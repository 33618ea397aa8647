//! Portable helpers that mirror the subset of x86 SSE intrinsics used by the
//! 128‑bit engine
//!
//! Every helper has one definition per target:
//! - x86_64 with the relevant target feature enabled at build time maps
//!   straight to the SSSE3/SSE4.1 instruction;
//! - x86_64 without it (the default `x86_64-unknown-linux-gnu` baseline is
//!   SSE2 only) uses the SSE2 sequences in [`sse2`];
//! - aarch64 maps to the equivalent NEON operation.
//!
//! The [`sse2`] sequences keep the narrow score vector available on every
//! x86_64 build, and nothing here executes an instruction the build did not
//! declare. They are branch-free but slower: the byte shuffle costs sixteen
//! compare/select steps instead of one `pshufb`, and it sits on the row
//! lookup's hot path. Build with `RUSTFLAGS="-C target-feature=+ssse3,+sse4.1"`
//! (or `-C target-cpu=native`) to get the native instructions.
//!
//! All functions are `unsafe` for the same reasons as the underlying
//! intrinsics (pointer validity for loads and stores).

use super::types::{__m128i, simd_arch};

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_set1_epi8(a: i8) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_set1_epi8(a) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vdupq_n_u8(a as u8)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_adds_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_adds_epi8(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i::from_s8(simd_arch::vqaddq_s8(a.as_s8(), b.as_s8())) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_subs_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_subs_epi8(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i::from_s8(simd_arch::vqsubq_s8(a.as_s8(), b.as_s8())) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_and_si128(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_and_si128(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vandq_u8(a.0, b.0)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_or_si128(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_or_si128(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vorrq_u8(a.0, b.0)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_xor_si128(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_xor_si128(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::veorq_u8(a.0, b.0)) }
    }
}

/// Shift each 16‑bit lane left by the immediate `IMM8`.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_slli_epi16<const IMM8: i32>(a: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_slli_epi16::<IMM8>(a) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i::from_s16(simd_arch::vshlq_n_s16::<IMM8>(a.as_s16())) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_cmpeq_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_cmpeq_epi8(a, b) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vceqq_u8(a.0, b.0)) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_movemask_epi8(a: __m128i) -> i32 {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { simd_arch::_mm_movemask_epi8(a) }
    }
    #[cfg(target_arch = "aarch64")]
    {
        // No single NEON instruction; gather sign bits lane by lane.
        a.to_bytes()
            .iter()
            .enumerate()
            .fold(0i32, |acc, (i, &x)| acc | (((x >> 7) as i32) << i))
    }
}

/// Byte shuffle with x86 `pshufb` semantics: index bit 7 zeroes the output
/// byte, otherwise the low four bits select one of the 16 table bytes.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_shuffle_epi8(table: __m128i, idx: __m128i) -> __m128i {
    #[cfg(all(target_arch = "x86_64", target_feature = "ssse3"))]
    {
        unsafe { simd_arch::_mm_shuffle_epi8(table, idx) }
    }
    #[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3")))]
    {
        sse2::shuffle_epi8(table, idx)
    }
    #[cfg(target_arch = "aarch64")]
    {
        // vqtbl1q yields 0 for any index >= 16; keeping bit 7 preserves the
        // pshufb zeroing rule while dropping bits 4..=6.
        unsafe {
            let masked = simd_arch::vandq_u8(idx.0, simd_arch::vdupq_n_u8(0x8F));
            __m128i(simd_arch::vqtbl1q_u8(table.0, masked))
        }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_blendv_epi8(a: __m128i, b: __m128i, mask: __m128i) -> __m128i {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
    {
        unsafe { simd_arch::_mm_blendv_epi8(a, b, mask) }
    }
    #[cfg(all(target_arch = "x86_64", not(target_feature = "sse4.1")))]
    {
        sse2::blendv_epi8(a, b, mask)
    }
    #[cfg(target_arch = "aarch64")]
    {
        // vbslq_u8 selects per bit, so replicate the sign bit across the byte
        // first (arithmetic shift right by 7).
        unsafe {
            let mask_expanded = simd_arch::vshrq_n_s8::<7>(mask.as_s8());
            __m128i(simd_arch::vbslq_u8(
                simd_arch::vreinterpretq_u8_s8(mask_expanded),
                b.0,
                a.0,
            ))
        }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_max_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
    {
        unsafe { simd_arch::_mm_max_epi8(a, b) }
    }
    #[cfg(all(target_arch = "x86_64", not(target_feature = "sse4.1")))]
    {
        sse2::max_epi8(a, b)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i::from_s8(simd_arch::vmaxq_s8(a.as_s8(), b.as_s8())) }
    }
}

#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_min_epi8(a: __m128i, b: __m128i) -> __m128i {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
    {
        unsafe { simd_arch::_mm_min_epi8(a, b) }
    }
    #[cfg(all(target_arch = "x86_64", not(target_feature = "sse4.1")))]
    {
        sse2::min_epi8(a, b)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i::from_s8(simd_arch::vminq_s8(a.as_s8(), b.as_s8())) }
    }
}

/// Load 128 bits from 16-byte aligned memory.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_load_si128(p: *const __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_load_si128(p)
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe { __m128i(simd_arch::vld1q_u8(p as *const u8)) }
    }
}

/// Load 128 bits from unaligned memory.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_loadu_si128(p: *const __m128i) -> __m128i {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_loadu_si128(p)
    }
    #[cfg(target_arch = "aarch64")]
    {
        // NEON loads are unaligned by default
        unsafe { __m128i(simd_arch::vld1q_u8(p as *const u8)) }
    }
}

/// Store 128 bits to unaligned memory.
#[inline]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn _mm_storeu_si128(p: *mut __m128i, a: __m128i) {
    #[cfg(target_arch = "x86_64")]
    {
        simd_arch::_mm_storeu_si128(p, a);
    }
    #[cfg(target_arch = "aarch64")]
    {
        unsafe {
            simd_arch::vst1q_u8(p as *mut u8, a.0);
        }
    }
}

/// SSE2-only versions of the SSSE3/SSE4.1 byte operations.
///
/// SSE2 is part of the x86_64 baseline, so these are compiled on every
/// x86_64 build, whichever path the wrappers above take.
#[cfg(target_arch = "x86_64")]
#[allow(unsafe_op_in_unsafe_fn)]
pub mod sse2 {
    use super::simd_arch::*;

    /// `pshufb`: bit 7 of an index zeroes the byte, bits 0..=3 pick the entry.
    ///
    /// Each table entry is broadcast and selected where the cleaned index
    /// equals its position; an index with bit 7 set matches none of them.
    #[inline]
    pub unsafe fn shuffle_epi8(table: __m128i, idx: __m128i) -> __m128i {
        let mut entries = [0i8; 16];
        _mm_storeu_si128(entries.as_mut_ptr() as *mut __m128i, table);

        let key = _mm_and_si128(idx, _mm_set1_epi8(0x8Fu8 as i8));
        let mut out = _mm_setzero_si128();
        for (j, &entry) in entries.iter().enumerate() {
            let hit = _mm_cmpeq_epi8(key, _mm_set1_epi8(j as i8));
            out = _mm_or_si128(out, _mm_and_si128(hit, _mm_set1_epi8(entry)));
        }
        out
    }

    /// `pblendvb`: lane from `b` where the sign bit of `mask` is set.
    #[inline]
    pub unsafe fn blendv_epi8(a: __m128i, b: __m128i, mask: __m128i) -> __m128i {
        let m = _mm_cmpgt_epi8(_mm_setzero_si128(), mask);
        _mm_or_si128(_mm_and_si128(m, b), _mm_andnot_si128(m, a))
    }

    #[inline]
    pub unsafe fn max_epi8(a: __m128i, b: __m128i) -> __m128i {
        let gt = _mm_cmpgt_epi8(a, b);
        _mm_or_si128(_mm_and_si128(gt, a), _mm_andnot_si128(gt, b))
    }

    #[inline]
    pub unsafe fn min_epi8(a: __m128i, b: __m128i) -> __m128i {
        let gt = _mm_cmpgt_epi8(a, b);
        _mm_or_si128(_mm_and_si128(gt, b), _mm_andnot_si128(gt, a))
    }
}
