//! Constant-time comparison
//!
//! The only equality checks used on secrets anywhere in the crate.

use subtle::ConstantTimeEq;

/// Compare two byte strings without an early exit on the first mismatch.
///
/// A length mismatch returns `false` up front; lengths here are public
/// (fixed hash / digest sizes), so only the content comparison must be
/// constant-time.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Fixed-width digest comparison, no length check needed
pub fn constant_time_digest_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a[..].ct_eq(&b[..]).into()
}
