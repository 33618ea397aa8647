//! 128‑bit SIMD engine (SSE on x86_64; NEON on aarch64)
//!
//! This module implements the 128‑bit `SimdEngine` backend on top of the
//! helpers in `portable_intrinsics.rs`, which pick SSSE3/SSE4.1 instructions
//! when the build enables them and SSE2 or NEON equivalents otherwise.
//!
//! Highlights
//! - Provides the baseline width, compiled on every supported target.
//! - The row lookup reads the 32-byte `matrix8` row as two consecutive
//!   16-byte shuffle tables.

use super::SimdEngine;
use super::portable_intrinsics::*;
use super::types::__m128i;
use crate::compute::matrix::RowLookupTable;

/// 128-bit SIMD engine (SSE on x86_64, NEON on aarch64)
///
/// Provides 16-way parallelism for 8-bit score lanes.
#[derive(Clone, Copy, Debug)]
pub struct SimdEngine128;

#[allow(unsafe_op_in_unsafe_fn)]
impl SimdEngine for SimdEngine128 {
    const WIDTH_8: usize = 16; // 128 bits ÷ 8 bits = 16 lanes

    type Vec8 = __m128i;
    type TraceWord = u32;

    #[inline]
    unsafe fn set1_epi8(a: i8) -> Self::Vec8 {
        _mm_set1_epi8(a)
    }

    #[inline]
    unsafe fn adds_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_adds_epi8(a, b)
    }

    #[inline]
    unsafe fn subs_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_subs_epi8(a, b)
    }

    #[inline]
    unsafe fn max_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_max_epi8(a, b)
    }

    #[inline]
    unsafe fn min_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_min_epi8(a, b)
    }

    #[inline]
    unsafe fn cmpeq_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_cmpeq_epi8(a, b)
    }

    #[inline]
    unsafe fn movemask_epi8(a: Self::Vec8) -> i32 {
        _mm_movemask_epi8(a)
    }

    #[inline]
    unsafe fn blendv_epi8(a: Self::Vec8, b: Self::Vec8, mask: Self::Vec8) -> Self::Vec8 {
        _mm_blendv_epi8(a, b, mask)
    }

    #[inline]
    unsafe fn and_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_and_si128(a, b)
    }

    #[inline]
    unsafe fn or_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_or_si128(a, b)
    }

    #[inline]
    unsafe fn xor_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8 {
        _mm_xor_si128(a, b)
    }

    #[inline]
    unsafe fn slli_epi16<const IMM8: i32>(a: Self::Vec8) -> Self::Vec8 {
        _mm_slli_epi16::<IMM8>(a)
    }

    #[inline]
    unsafe fn shuffle_epi8(table: Self::Vec8, idx: Self::Vec8) -> Self::Vec8 {
        _mm_shuffle_epi8(table, idx)
    }

    #[inline]
    unsafe fn loadu_si128(p: *const Self::Vec8) -> Self::Vec8 {
        _mm_loadu_si128(p)
    }

    #[inline]
    unsafe fn storeu_si128(p: *mut Self::Vec8, a: Self::Vec8) {
        _mm_storeu_si128(p, a)
    }

    #[inline]
    unsafe fn load_row_blocks(table: &RowLookupTable, row: usize) -> (Self::Vec8, Self::Vec8) {
        // Rows are 32-byte aligned, so both halves satisfy the 16-byte
        // alignment of the aligned load.
        let p = table.matrix8(row).as_ptr() as *const __m128i;
        (_mm_load_si128(p), _mm_load_si128(p.add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes(v: __m128i) -> [i8; 16] {
        let mut out = [0i8; 16];
        unsafe { SimdEngine128::storeu_si128(out.as_mut_ptr() as *mut _, v) };
        out
    }

    fn vec(values: &[i8; 16]) -> __m128i {
        unsafe { SimdEngine128::loadu_si128(values.as_ptr() as *const _) }
    }

    #[test]
    fn test_shuffle_epi8_pshufb_semantics() {
        let table: [i8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

        // Identity and reverse
        let identity = table;
        let reverse: [i8; 16] = [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        unsafe {
            assert_eq!(lanes(SimdEngine128::shuffle_epi8(vec(&table), vec(&identity))), table);
            assert_eq!(lanes(SimdEngine128::shuffle_epi8(vec(&table), vec(&reverse))), reverse);
        }

        // Bit 7 zeroes the lane; bits 4..=6 are ignored
        let control: [i8; 16] = [0, 1, 2, -1, 4, 5, 6, -128, 0x18, 0x29, 10, 11, 12, 13, 14, 15];
        let expected: [i8; 16] = [0, 1, 2, 0, 4, 5, 6, 0, 8, 9, 10, 11, 12, 13, 14, 15];
        unsafe {
            assert_eq!(lanes(SimdEngine128::shuffle_epi8(vec(&table), vec(&control))), expected);
        }
    }

    #[test]
    fn test_blendv_uses_sign_bit_only() {
        let a = [1i8; 16];
        let b = [2i8; 16];
        let mut mask = [0i8; 16];
        mask[0] = -1;
        mask[3] = i8::MIN;
        mask[5] = 0x7F; // high bit clear: keep a
        let out = unsafe { lanes(SimdEngine128::blendv_epi8(vec(&a), vec(&b), vec(&mask))) };
        for (i, &x) in out.iter().enumerate() {
            let expected = if i == 0 || i == 3 { 2 } else { 1 };
            assert_eq!(x, expected, "lane {}", i);
        }
    }

    #[test]
    fn test_max_min_signed() {
        let mut a = [0i8; 16];
        let mut b = [0i8; 16];
        for i in 0..16 {
            a[i] = (i as i32 * 16 - 128) as i8;
            b[i] = (127 - i as i32 * 16) as i8;
        }
        let max = unsafe { lanes(SimdEngine128::max_epi8(vec(&a), vec(&b))) };
        let min = unsafe { lanes(SimdEngine128::min_epi8(vec(&a), vec(&b))) };
        for i in 0..16 {
            assert_eq!(max[i], a[i].max(b[i]));
            assert_eq!(min[i], a[i].min(b[i]));
        }
    }

    #[test]
    fn test_movemask_epi8() {
        let values = [-1i8, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0, -1, 0];
        assert_eq!(unsafe { SimdEngine128::movemask_epi8(vec(&values)) }, 0x5555);
        assert_eq!(unsafe { SimdEngine128::movemask_epi8(vec(&[-1i8; 16])) }, 0xFFFF);
        assert_eq!(unsafe { SimdEngine128::movemask_epi8(vec(&[1i8; 16])) }, 0);
    }

    #[test]
    fn test_slli_epi16_does_not_cross_bytes_for_bit4() {
        let v = [0x10i8; 16];
        let out = unsafe { lanes(SimdEngine128::slli_epi16::<3>(vec(&v))) };
        assert_eq!(out, [i8::MIN; 16]);
    }
}
