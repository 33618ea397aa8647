//! SIMD abstraction layer
//!
//! This module exposes a single surface for the handful of byte-lane SIMD
//! operations the score vector needs. It hides ISA differences between
//! x86_64 (SSE2/SSSE3/SSE4.1/AVX2) and aarch64 (NEON) behind the `SimdEngine`
//! trait, while preserving zero‑cost calls to architecture intrinsics.
//!
//! ## Engines and widths
//!
//! - `SimdEngine128`: 128‑bit vectors, 16 lanes of i8 (SSE on x86_64, NEON on
//!   aarch64). Always compiled.
//! - `SimdEngine256`: 256‑bit vectors, 32 lanes of i8 (AVX2). Compiled only
//!   when the build enables the `avx2` target feature, e.g. with
//!   `RUSTFLAGS="-C target-cpu=native"`.
//!
//! ## Variant selection
//!
//! Unlike a runtime-dispatched kernel, the score vector is selected when the
//! crate is compiled: an engine type only exists if the instructions it
//! issues are guaranteed by the build's target features. Code generic over
//! `E: SimdEngine` is monomorphized per width, so the DP recurrence above is
//! written once. `simd::detect_optimal_simd_engine()` reports what the host
//! could run so a narrow build on a wide host can be flagged.
//!
//! ## Safety model
//!
//! All trait functions are `unsafe` because they dereference raw pointers for
//! loads and stores and, for aligned loads, assume the pointer alignment of
//! the backend vector type. Because engine implementations are gated on
//! compile-time target features, executing any of them never requires a
//! runtime CPU check.

pub mod engine128;
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub mod engine256;
pub mod portable_intrinsics;
pub mod simd;
pub mod types;

use crate::compute::matrix::RowLookupTable;
use crate::compute::score_vector::trace::TraceWord;

/// Trait for a byte-lane SIMD engine.
///
/// One implementation exists per vector width; all share the same semantics
/// (the x86 SSE/AVX2 definitions) so that generic code produces identical
/// per-lane results on every width.
pub trait SimdEngine: Sized + Copy + 'static {
    /// Number of 8‑bit lanes in the engine's native vector type.
    const WIDTH_8: usize;

    /// Architecture‑specific 8‑bit vector type used by this engine.
    type Vec8: Copy + Clone;

    /// Packed trace word holding two bits per lane (vertical plane in the
    /// high half, horizontal plane in the low half).
    type TraceWord: TraceWord;

    // ===== Creation =====
    /// Broadcast a scalar i8 into all lanes.
    unsafe fn set1_epi8(a: i8) -> Self::Vec8;

    // ===== 8-bit Integer Arithmetic =====
    /// Per‑lane saturated add of signed i8 lanes.
    unsafe fn adds_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑lane saturated subtract of signed i8 lanes.
    unsafe fn subs_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑lane max of signed i8 lanes.
    unsafe fn max_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑lane min of signed i8 lanes.
    unsafe fn min_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;

    // ===== Comparison and Movemask =====
    /// Compare equal on i8 lanes; result is an all‑ones/-zeros mask vector.
    unsafe fn cmpeq_epi8(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Return a bitmask with the sign bit of each i8 lane; lane 0 is bit 0.
    unsafe fn movemask_epi8(a: Self::Vec8) -> i32;

    // ===== Blend/Select =====
    /// Select per‑byte from `a` or `b` using the high bit of `mask` bytes.
    unsafe fn blendv_epi8(a: Self::Vec8, b: Self::Vec8, mask: Self::Vec8) -> Self::Vec8;

    // ===== Bitwise Operations =====
    /// Per‑byte bitwise AND.
    unsafe fn and_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑byte bitwise OR.
    unsafe fn or_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Per‑byte bitwise XOR.
    unsafe fn xor_si128(a: Self::Vec8, b: Self::Vec8) -> Self::Vec8;
    /// Shift each 16‑bit lane left by the immediate `IMM8`.
    unsafe fn slli_epi16<const IMM8: i32>(a: Self::Vec8) -> Self::Vec8;

    // ===== Shuffle =====
    /// Shuffle bytes of `table` using indices in `idx`, `pshufb` semantics:
    /// an index with bit 7 set produces 0, otherwise its low four bits pick
    /// one of 16 table bytes. On 256‑bit engines the lookup happens
    /// independently within each 128‑bit half.
    unsafe fn shuffle_epi8(table: Self::Vec8, idx: Self::Vec8) -> Self::Vec8;

    // ===== Memory Operations =====
    /// Load a vector from an unaligned pointer.
    unsafe fn loadu_si128(p: *const Self::Vec8) -> Self::Vec8;
    /// Store a vector to an unaligned pointer.
    unsafe fn storeu_si128(p: *mut Self::Vec8, a: Self::Vec8);
    /// Load the two shuffle tables the row lookup uses for row `row`:
    /// entries 0..16 and entries 16..32, laid out for this engine's width.
    unsafe fn load_row_blocks(table: &RowLookupTable, row: usize) -> (Self::Vec8, Self::Vec8);
}

pub use engine128::SimdEngine128;
#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub use engine256::SimdEngine256;
