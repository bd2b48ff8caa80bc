use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one tessellation cell.
///
/// The value is opaque to the engine: only equality and hashing are
/// meaningful, and no ordering between cells carries any semantics.
///
/// # Examples
///
/// ```
/// use hexsieve_types::CellId;
///
/// let cell = CellId::new(0x8928308280fffff);
/// assert_eq!(cell.get(), 0x8928308280fffff);
/// assert_eq!(cell, CellId::from(0x8928308280fffff_u64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(u64);

impl CellId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw 64-bit value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CellId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<CellId> for u64 {
    fn from(cell: CellId) -> Self {
        cell.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::LowerHex for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
