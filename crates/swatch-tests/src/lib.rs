//! Integration tests for swatch crates.
//!
//! End-to-end checks across `swatch-core`, `swatch-ops` and `swatch-io`:
//! decode, recolor, encode, and the ordering and boundary rules of the
//! recolor transform.

#[cfg(test)]
mod golden;
