//! Cell key codec.
//!
//! A cell coordinate `(cx, cy)` is packed into one `u64`: each axis is biased
//! by 2^31 so that `i32::MIN` maps to 0, then `cx` goes into the high 32 bits
//! and `cy` into the low 32 bits. Keys therefore sort by `cx` first, then `cy`,
//! and decode back to the exact coordinate.

use std::fmt;

/// Integer coordinate of one grid cell.
pub type CellCoord = (i32, i32);

const BIAS: u32 = 1 << 31;

/// Packed, totally ordered identifier of one grid cell.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CellKey(u64);

impl CellKey {
    /// Packs a cell coordinate into a key.
    #[inline]
    pub const fn encode(cx: i32, cy: i32) -> Self {
        // Flipping the sign bit is the same as adding 2^31 modulo 2^32.
        let hi = (cx as u32 ^ BIAS) as u64;
        let lo = (cy as u32 ^ BIAS) as u64;
        Self((hi << 32) | lo)
    }

    /// Recovers the cell coordinate this key was encoded from.
    #[inline]
    pub const fn decode(self) -> CellCoord {
        let cx = ((self.0 >> 32) as u32 ^ BIAS) as i32;
        let cy = (self.0 as u32 ^ BIAS) as i32;
        (cx, cy)
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<CellCoord> for CellKey {
    fn from((cx, cy): CellCoord) -> Self {
        Self::encode(cx, cy)
    }
}

impl From<CellKey> for CellCoord {
    fn from(key: CellKey) -> Self {
        key.decode()
    }
}

impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cx, cy) = self.decode();
        write!(f, "CellKey({cx}, {cy})")
    }
}
