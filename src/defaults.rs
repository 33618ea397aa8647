// src/defaults.rs

// Row lookup layout
/// Number of residue codes addressable by one lookup row.
pub const LOOKUP_ALPHABET: usize = 32;
/// Bytes per lookup row (one register-width block on the wide engine).
pub const LOOKUP_ROW_BYTES: usize = 32;
/// Residue code bit selecting the upper 16-entry half of a row.
pub const RESIDUE_HIGH_BIT: u8 = 0x10;
/// Score stored for codes outside the source matrix's alphabet.
pub const LOOKUP_PAD_SCORE: i8 = i8::MIN;

// Lane layout
/// Widest lane count of any compiled engine.
pub const MAX_CHANNELS: usize = 32;

// Environment
pub const FORCE_SSE_ENV: &str = "FERROUS_SCORE_FORCE_SSE";

// Diagnostics CLI
pub const VERBOSITY: u8 = 3;
