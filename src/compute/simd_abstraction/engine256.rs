//! 256‑bit SIMD engine (AVX2)
//!
//! This module provides the AVX2 implementation of the `SimdEngine` trait on
//! x86_64. It offers 32 lanes for 8‑bit operations, mapping directly to
//! `_mm256_*` intrinsics. The whole module is compiled only when the build
//! enables the `avx2` target feature, so every instruction below is
//! guaranteed to exist on the machine the binary targets.
//!
//! Highlights
//! - `_mm256_shuffle_epi8` looks up within each 128‑bit half independently,
//!   which is why the row lookup reads `matrix8_low`/`matrix8_high` (each a
//!   16-entry table duplicated into both halves) instead of `matrix8`.
//! - Compared to the 128‑bit engine, a recurrence step advances twice as
//!   many DP cells per instruction.

use super::SimdEngine;
use super::types::{__m256i, simd_arch};
use crate::compute::matrix::RowLookupTable;

/// 256-bit SIMD engine (AVX2 on x86_64)
///
/// Provides 32-way parallelism for 8-bit score lanes.
/// Requires AVX2 (Intel Haswell 2013+ or AMD Excavator 2015+) enabled at
/// build time.
#[derive(Clone, Copy, Debug)]
pub struct SimdEngine256;

#[allow(unsafe_op_in_unsafe_fn)]
impl SimdEngine for SimdEngine256 {
    const WIDTH_8: usize = 32; // 256 bits ÷ 8 bits = 32 lanes

    type Vec8 = __m256i;
    type TraceWord = u64;

    #[inline]
    unsafe fn set1_epi8(a: i8) -> Self::Vec8 {
        simd_arch::_mm256_set1_epi8(a)
    }

    #[inline]
    unsafe fn adds_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_adds_epi8(a, b)
    }

    #[inline]
    unsafe fn subs_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_subs_epi8(a, b)
    }

    #[inline]
    unsafe fn max_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_max_epi8(a, b)
    }

    #[inline]
    unsafe fn min_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_min_epi8(a, b)
    }

    #[inline]
    unsafe fn cmpeq_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_cmpeq_epi8(a, b)
    }

    #[inline]
    unsafe fn movemask_epi8(a: Self::Vec8) -> i32 {
        simd_arch::_mm256_movemask_epi8(a)
    }

    #[inline]
    unsafe fn blendv_epi8(a: Self::Vec8, b: Self::Vec8, mask: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_blendv_epi8(a, b, mask)
    }

    #[inline]
    unsafe fn and_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_and_si256(a, b)
    }

    #[inline]
    unsafe fn or_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_or_si256(a, b)
    }

    #[inline]
    unsafe fn xor_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_xor_si256(a, b)
    }

    #[inline]
    unsafe fn slli_epi16<const IMM8: i32>(a: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_slli_epi16::<IMM8>(a)
    }

    #[inline]
    unsafe fn shuffle_epi8(table: Self::Vec8, idx: Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_shuffle_epi8(table, idx)
    }

    #[inline]
    unsafe fn loadu_si128(p: *const Self::Vec8) -> Self::Vec8 {
        simd_arch::_mm256_loadu_si256(p)
    }

    #[inline]
    unsafe fn storeu_si128(p: *mut Self::Vec8, a: Self::Vec8) {
        simd_arch::_mm256_storeu_si256(p, a)
    }

    #[inline]
    unsafe fn load_row_blocks(table: &RowLookupTable, row: usize) -> (Self::Vec8, Self::Vec8) {
        let lo = table.matrix8_low(row).as_ptr() as *const __m256i;
        let hi = table.matrix8_high(row).as_ptr() as *const __m256i;
        (simd_arch::_mm256_load_si256(lo), simd_arch::_mm256_load_si256(hi))
    }
}
