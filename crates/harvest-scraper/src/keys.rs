//! Query key sequences driving each pipeline.
//!
//! The store source is queried once per region code, `01` through `17`.
//! The catalog source is queried by page number starting at 1 with no upper
//! bound; the pagination controller decides where the crawl ends.

use std::fmt;
use std::ops::{RangeFrom, RangeInclusive};

/// Number of region subdivisions served by the store-search endpoint.
pub const REGION_COUNT: u8 = 17;

/// Two-digit region code sent as the `p_sido_cd` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionCode(u8);

impl RegionCode {
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Ascending iterator over every region code, each yielded exactly once.
#[derive(Debug, Clone)]
pub struct RegionCodes(RangeInclusive<u8>);

impl RegionCodes {
    #[must_use]
    pub fn new() -> Self {
        Self(1..=REGION_COUNT)
    }
}

impl Default for RegionCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for RegionCodes {
    type Item = RegionCode;

    fn next(&mut self) -> Option<RegionCode> {
        self.0.next().map(RegionCode)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for RegionCodes {}

/// Unbounded ascending page numbers starting at 1.
#[derive(Debug, Clone)]
pub struct PageNumbers(RangeFrom<u32>);

impl PageNumbers {
    #[must_use]
    pub fn new() -> Self {
        Self(1..)
    }
}

impl Default for PageNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PageNumbers {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.0.next()
    }
}
