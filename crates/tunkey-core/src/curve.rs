// ============================================
// File: crates/tunkey-core/src/curve.rs
// ============================================
//! # Curve25519 Parameters
//!
//! ## Creation Reason
//! Holds the fixed domain parameters of the Montgomery curve used for
//! WireGuard keys, and the scalar operations built on them.
//!
//! ## Main Functionality
//! - `CurveParameters`: Immutable parameter table
//! - `CURVE25519`: Process-wide instance
//! - `clamp` / `is_clamped`: Scalar clamping
//! - `mul_base`: Montgomery ladder against the base point
//!
//! ## Curve Definition
//! ```text
//! B·v² = u³ + A·u² + u   over GF(p)
//!
//! p        = 2^255 - 19
//! A        = 486662,  B = 1
//! G        = u(9)
//! l        = 2^252 + 27742317777372353535851937790883648493
//! cofactor = 8
//! ```
//!
//! All multi-byte values are stored little-endian, the same order
//! used by the 32-byte key encoding.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field arithmetic comes from curve25519-dalek, do not hand-roll it
//! - `mul_base` does NOT clamp; callers decide whether to clamp
//!
//! ## Last Modified
//! v0.1.0 - Initial parameter table

use curve25519_dalek::montgomery::MontgomeryPoint;

use crate::keys::KEY_SIZE;

// ============================================
// CurveParameters
// ============================================

/// Domain parameters of a Montgomery-form curve.
///
/// Pure data. The only instance in use is [`CURVE25519`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParameters {
    /// Curve name
    pub name: &'static str,
    /// Field prime `p`, little-endian
    pub prime: [u8; KEY_SIZE],
    /// Montgomery coefficient `A`
    pub a: u32,
    /// Montgomery coefficient `B`
    pub b: u32,
    /// u-coordinate of the base point `G`, little-endian
    pub base_point: [u8; KEY_SIZE],
    /// Order `l` of the prime subgroup generated by `G`, little-endian
    pub order: [u8; KEY_SIZE],
    /// Curve cofactor
    pub cofactor: u8,
}

/// Curve25519 parameters (RFC 7748 §4.1).
pub static CURVE25519: CurveParameters = CurveParameters {
    name: "Curve25519",
    prime: [
        0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
    ],
    a: 486_662,
    b: 1,
    base_point: [
        9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ],
    order: [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
        0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    ],
    cofactor: 8,
};

// ============================================
// Scalar Operations
// ============================================

/// Applies X25519 scalar clamping in place.
///
/// Clears the three lowest bits (multiple of the cofactor), clears
/// bit 255 and sets bit 254.
pub fn clamp(scalar: &mut [u8; KEY_SIZE]) {
    scalar[0] &= 0xf8;
    scalar[31] &= 0x7f;
    scalar[31] |= 0x40;
}

/// Returns `true` if `clamp` would leave `scalar` unchanged.
#[must_use]
pub fn is_clamped(scalar: &[u8; KEY_SIZE]) -> bool {
    scalar[0] & 0x07 == 0 && scalar[31] & 0xc0 == 0x40
}

/// Computes `scalar * G` with the Montgomery ladder.
///
/// The scalar is used exactly as given, all 256 bits, most significant
/// first. Returns the u-coordinate of the result, little-endian.
#[must_use]
pub fn mul_base(scalar: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let base = MontgomeryPoint(CURVE25519.base_point);
    let bits = (0..KEY_SIZE * 8)
        .rev()
        .map(|i| (scalar[i >> 3] >> (i & 7)) & 1 == 1);
    base.mul_bits_be(bits).to_bytes()
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_point_matches_dalek() {
        assert_eq!(
            CURVE25519.base_point,
            curve25519_dalek::constants::X25519_BASEPOINT.to_bytes()
        );
    }

    #[test]
    fn test_prime_shape() {
        // 2^255 - 19: top bit clear, low byte 0xed, everything else set
        assert_eq!(CURVE25519.prime[0], 0xed);
        assert_eq!(CURVE25519.prime[31], 0x7f);
        assert!(CURVE25519.prime[1..31].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn test_base_point_has_prime_order() {
        // [l]G is the identity, whose u-coordinate encodes as zero
        assert_eq!(mul_base(&CURVE25519.order), [0u8; KEY_SIZE]);
    }

    #[test]
    fn test_clamp() {
        let mut scalar = [0xffu8; KEY_SIZE];
        clamp(&mut scalar);
        assert_eq!(scalar[0], 0xf8);
        assert_eq!(scalar[31], 0x7f);
        assert!(is_clamped(&scalar));

        let mut scalar = [0u8; KEY_SIZE];
        clamp(&mut scalar);
        assert_eq!(scalar[31], 0x40);
        assert!(is_clamped(&scalar));
    }

    #[test]
    fn test_clamp_idempotent() {
        let mut once = [0x5au8; KEY_SIZE];
        clamp(&mut once);
        let mut twice = once;
        clamp(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_is_clamped_rejects() {
        assert!(!is_clamped(&[0u8; KEY_SIZE]));
        assert!(!is_clamped(&[0xffu8; KEY_SIZE]));
    }

    #[test]
    fn test_mul_base_matches_clamped_dalek() {
        let mut scalar = [0x17u8; KEY_SIZE];
        clamp(&mut scalar);
        assert_eq!(
            mul_base(&scalar),
            MontgomeryPoint::mul_base_clamped(scalar).to_bytes()
        );
    }
}
