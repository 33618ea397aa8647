//! Module for SIMD engine selection reporting.
//!
//! The score vector width is fixed when the crate is compiled (see
//! `score_vector::dispatch`). This module reports which engine was compiled
//! in, which engine the host CPU could run, and logs a hint when the two
//! differ so that a narrow build on a wide host does not go unnoticed.

use crate::defaults::FORCE_SSE_ENV;

/// Available SIMD engine types based on CPU capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdEngineType {
    /// 128-bit SIMD (SSE/NEON) - always available
    Engine128,
    /// 256-bit SIMD (AVX2) - x86_64 only
    #[cfg(target_arch = "x86_64")]
    Engine256,
}

/// Returns the engine backing `DispatchScoreVector` in this build.
pub const fn compiled_engine() -> SimdEngineType {
    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    {
        SimdEngineType::Engine256
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
    {
        SimdEngineType::Engine128
    }
}

/// Detects the optimal SIMD engine based on CPU features
///
/// Environment variable override for testing/debugging (x86_64 only):
/// - `FERROUS_SCORE_FORCE_SSE=1`: report the SSE/128-bit engine even on AVX2 hosts
pub fn detect_optimal_simd_engine() -> SimdEngineType {
    #[cfg(target_arch = "x86_64")]
    {
        if std::env::var(FORCE_SSE_ENV).map(|v| v == "1").unwrap_or(false) {
            log::info!("{}=1: Using SSE (128-bit) engine", FORCE_SSE_ENV);
            return SimdEngineType::Engine128;
        }

        if is_x86_feature_detected!("avx2") {
            return SimdEngineType::Engine256;
        }

        SimdEngineType::Engine128
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        // ARM/aarch64 always uses 128-bit NEON
        SimdEngineType::Engine128
    }
}

/// Returns a human-readable description of the SIMD engine
pub fn simd_engine_description(engine: SimdEngineType) -> &'static str {
    match engine {
        SimdEngineType::Engine128 => {
            #[cfg(target_arch = "x86_64")]
            {
                "SSE (128-bit, 16-way parallelism)"
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                "NEON (128-bit, 16-way parallelism)"
            }
        }
        #[cfg(target_arch = "x86_64")]
        SimdEngineType::Engine256 => "AVX2 (256-bit, 32-way parallelism)",
    }
}

/// Number of int8 score lanes per vector for an engine.
pub fn engine_channels(engine: SimdEngineType) -> usize {
    match engine {
        #[cfg(target_arch = "x86_64")]
        SimdEngineType::Engine256 => 32,
        SimdEngineType::Engine128 => 16,
    }
}

/// Logs the compiled engine and warns when the host could run a wider one.
///
/// Returns the compiled engine for convenience.
pub fn log_engine_selection() -> SimdEngineType {
    let compiled = compiled_engine();
    let host = detect_optimal_simd_engine();

    log::info!(
        "Score vector engine: {} ({} lanes)",
        simd_engine_description(compiled),
        engine_channels(compiled)
    );

    if host > compiled {
        log::warn!(
            "Host supports {} but this build uses {}; rebuild with RUSTFLAGS=\"-C target-cpu=native\" for wider score vectors",
            simd_engine_description(host),
            simd_engine_description(compiled)
        );
    } else {
        log::debug!("Host engine: {}", simd_engine_description(host));
    }

    compiled
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simd_engine_detection() {
        let engine = detect_optimal_simd_engine();
        let description = simd_engine_description(engine);

        println!("Detected SIMD engine: {:?}", engine);
        println!("Description: {}", description);

        #[cfg(target_arch = "x86_64")]
        {
            let forced = std::env::var(FORCE_SSE_ENV).map(|v| v == "1").unwrap_or(false);
            if !forced && is_x86_feature_detected!("avx2") {
                assert_eq!(engine, SimdEngineType::Engine256);
            } else {
                assert_eq!(engine, SimdEngineType::Engine128);
            }
        }

        #[cfg(not(target_arch = "x86_64"))]
        {
            assert_eq!(engine, SimdEngineType::Engine128);
        }
    }

    #[test]
    fn test_compiled_engine_matches_dispatch_width() {
        use crate::compute::score_vector::dispatch::DispatchScoreVector;

        assert_eq!(engine_channels(compiled_engine()), DispatchScoreVector::CHANNELS);
    }

    #[test]
    fn test_compiled_engine_runs_on_host() {
        // A build can never select an engine the running CPU lacks.
        let forced = std::env::var(FORCE_SSE_ENV).map(|v| v == "1").unwrap_or(false);
        if !forced {
            assert!(compiled_engine() <= detect_optimal_simd_engine());
        }
    }
}
