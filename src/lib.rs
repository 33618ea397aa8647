//! Lane-packed int8 saturating score vectors for SIMD dynamic programming.
//!
//! The crate provides the vector value type a banded Smith-Waterman kernel
//! runs on (`ScoreVector`), the two-shuffle row lookup that fills it with
//! substitution scores (`RowLookupTable`, `ScoreVector::from_row`), the
//! per-representation constants (`ScoreTraits`) and the packed backtrace
//! bits (`TraceMask`). The DP recurrence itself lives in the caller.

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
compile_error!("ferrous-score requires an x86_64 (SSE2) or aarch64 (NEON) target");

pub mod compute;
pub mod defaults;
pub mod error;

pub use compute::matrix::{RowLookupConfig, RowLookupTable};
pub use compute::score_vector::dispatch::{
    DispatchEngine, DispatchResidueVector, DispatchScoreVector, DispatchTraceMask, load_sv, load_sv_u8,
};
pub use compute::score_vector::{ResidueVector, ScoreTraits, ScoreVector, TraceMask, blend, cmp_mask};
pub use error::{Result, ScoreError};
