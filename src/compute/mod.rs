//! # Score-lane compute layer
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DP RECURRENCE (external caller)                    │
//! │                                                                         │
//! │   score_vector   ScoreVector<E>, ResidueVector<E>, ScoreTraits,         │
//! │                  TraceMask<E>, dispatch aliases + load_sv               │
//! │        │                                                                │
//! │        ├── matrix            RowLookupTable (shuffle-ready score rows)  │
//! │        │                                                                │
//! │   simd_abstraction   SimdEngine trait, SimdEngine128 / SimdEngine256    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The recurrence is written once against `ScoreVector<E>` and instantiated
//! for each compiled engine.

pub mod matrix;
pub mod score_vector;
pub mod simd_abstraction;
