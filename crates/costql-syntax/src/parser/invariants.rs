//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;

impl Parser<'_> {
    #[inline]
    pub(super) fn ensure_not_eof(&self) {
        assert!(
            !self.eof(),
            "broken parser invariant: bump at end of input (caller must check the current token)"
        );
    }
}
