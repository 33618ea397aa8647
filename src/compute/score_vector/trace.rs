//! Packed backtrace bits for one DP step.
//!
//! A trace word holds two bit planes of `CHANNELS` bits each. The high half
//! records, per lane, that the vertical predecessor was a gap open; the low
//! half records the same for the horizontal predecessor:
//!
//! ```text
//!   bit  2*CHANNELS-1 ... CHANNELS | CHANNELS-1 ... 0
//!        vertical (lane n-1 .. 0)  | horizontal (lane n-1 .. 0)
//! ```
//!
//! 16 lanes pack into a `u32`, 32 lanes into a `u64`.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::compute::simd_abstraction::SimdEngine;

/// Integer type holding both bit planes of a trace mask.
pub trait TraceWord:
    Copy
    + Default
    + Eq
    + fmt::Debug
    + fmt::Binary
    + BitOr<Output = Self>
    + BitOrAssign
    + BitAnd<Output = Self>
    + Send
    + Sync
    + 'static
{
    const BITS: u32;

    /// `v << channels | h`.
    fn from_planes(v: u32, h: u32, channels: usize) -> Self;

    /// Single bit at `pos`.
    fn bit(pos: usize) -> Self;

    fn is_zero(self) -> bool;
}

impl TraceWord for u32 {
    const BITS: u32 = u32::BITS;

    #[inline]
    fn from_planes(v: u32, h: u32, channels: usize) -> Self {
        debug_assert!(channels * 2 <= Self::BITS as usize);
        (v << channels) | h
    }

    #[inline]
    fn bit(pos: usize) -> Self {
        debug_assert!(pos < Self::BITS as usize);
        1u32 << pos
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }
}

impl TraceWord for u64 {
    const BITS: u32 = u64::BITS;

    #[inline]
    fn from_planes(v: u32, h: u32, channels: usize) -> Self {
        debug_assert!(channels * 2 <= Self::BITS as usize);
        ((v as u64) << channels) | h as u64
    }

    #[inline]
    fn bit(pos: usize) -> Self {
        debug_assert!(pos < Self::BITS as usize);
        1u64 << pos
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == 0
    }
}

/// Gap and gap-open trace words threaded through one DP row.
///
/// The DP engine ORs new bits in once per step; the backtracer only reads.
pub struct TraceMask<E: SimdEngine> {
    pub gap: E::TraceWord,
    pub open: E::TraceWord,
}

impl<E: SimdEngine> TraceMask<E> {
    pub const CHANNELS: usize = E::WIDTH_8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Pack a vertical and a horizontal lane bitmask into one trace word.
    ///
    /// `vmask` and `hmask` carry one bit per lane, lane 0 in bit 0, as
    /// produced by `cmp_mask`.
    #[inline]
    pub fn make(vmask: u32, hmask: u32) -> E::TraceWord {
        E::TraceWord::from_planes(vmask, hmask, E::WIDTH_8)
    }

    /// Bit marking a vertical gap open in lane `channel`.
    #[inline]
    pub fn vmask(channel: usize) -> E::TraceWord {
        debug_assert!(channel < E::WIDTH_8);
        E::TraceWord::bit(channel + E::WIDTH_8)
    }

    /// Bit marking a horizontal gap open in lane `channel`.
    #[inline]
    pub fn hmask(channel: usize) -> E::TraceWord {
        debug_assert!(channel < E::WIDTH_8);
        E::TraceWord::bit(channel)
    }

    /// OR-accumulate one step's bits.
    #[inline]
    pub fn record(&mut self, gap: E::TraceWord, open: E::TraceWord) {
        self.gap |= gap;
        self.open |= open;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.gap.is_zero() && self.open.is_zero()
    }

    #[inline]
    pub fn is_vertical_gap(&self, channel: usize) -> bool {
        !(self.gap & Self::vmask(channel)).is_zero()
    }

    #[inline]
    pub fn is_vertical_open(&self, channel: usize) -> bool {
        !(self.open & Self::vmask(channel)).is_zero()
    }

    #[inline]
    pub fn is_horizontal_gap(&self, channel: usize) -> bool {
        !(self.gap & Self::hmask(channel)).is_zero()
    }

    #[inline]
    pub fn is_horizontal_open(&self, channel: usize) -> bool {
        !(self.open & Self::hmask(channel)).is_zero()
    }
}

// Manual impls: derives would require `E: Clone` etc. rather than bounds on
// the trace word.
impl<E: SimdEngine> Clone for TraceMask<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: SimdEngine> Copy for TraceMask<E> {}

impl<E: SimdEngine> Default for TraceMask<E> {
    fn default() -> Self {
        Self {
            gap: E::TraceWord::default(),
            open: E::TraceWord::default(),
        }
    }
}

impl<E: SimdEngine> PartialEq for TraceMask<E> {
    fn eq(&self, other: &Self) -> bool {
        self.gap == other.gap && self.open == other.open
    }
}

impl<E: SimdEngine> Eq for TraceMask<E> {}

impl<E: SimdEngine> fmt::Debug for TraceMask<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 2 * E::WIDTH_8;
        write!(
            f,
            "TraceMask {{ gap: {:0width$b}, open: {:0width$b} }}",
            self.gap,
            self.open,
            width = width
        )
    }
}
