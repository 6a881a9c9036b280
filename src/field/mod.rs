//! Canonical byte encodings and sign conventions for the BLS12-381 fields.
//!
//! Every external boundary of this crate speaks fixed-width big-endian bytes,
//! independent of the little-endian limb representation Arkworks uses
//! internally. Decoding is strict: a value `>=` its modulus is rejected rather
//! than reduced.

use ark_bls12_381::{Fq, Fq2, Fr};
use ark_ff::{BigInteger, PrimeField};
use core::cmp::Ordering;

use crate::utils::errors::KzgError;

/// Canonical width of a base-field element on the wire.
pub const BASE_FIELD_BYTES: usize = 48;
/// Canonical width of a scalar-field element on the wire.
pub const SCALAR_FIELD_BYTES: usize = 32;

/// Strict big-endian decode: fails with `FieldElementOutOfRange` if the
/// encoded integer is not strictly below the modulus.
pub(crate) fn from_be_bytes_checked<F: PrimeField>(bytes: &[u8]) -> Result<F, KzgError> {
    let modulus = F::MODULUS.to_bytes_be();
    debug_assert_eq!(bytes.len(), modulus.len());
    // Equal widths make lexicographic comparison numeric comparison.
    if bytes >= modulus.as_slice() {
        return Err(KzgError::FieldElementOutOfRange);
    }
    Ok(F::from_be_bytes_mod_order(bytes))
}

pub fn fq_to_be_bytes(x: &Fq) -> [u8; BASE_FIELD_BYTES] {
    let mut out = [0u8; BASE_FIELD_BYTES];
    out.copy_from_slice(&x.into_bigint().to_bytes_be());
    out
}

pub fn fq_from_be_bytes(bytes: &[u8; BASE_FIELD_BYTES]) -> Result<Fq, KzgError> {
    from_be_bytes_checked(bytes)
}

pub fn fr_to_be_bytes(s: &Fr) -> [u8; SCALAR_FIELD_BYTES] {
    let mut out = [0u8; SCALAR_FIELD_BYTES];
    out.copy_from_slice(&s.into_bigint().to_bytes_be());
    out
}

pub fn fr_from_be_bytes(bytes: &[u8; SCALAR_FIELD_BYTES]) -> Result<Fr, KzgError> {
    from_be_bytes_checked(bytes)
}

/// Whether `y` is the lexicographically larger of `{y, -y}`.
///
/// This is the sign convention of the compressed point format: the flag bit
/// records which of the two square roots the encoder saw.
pub fn fq_is_lex_largest(y: &Fq) -> bool {
    y.into_bigint() > (-*y).into_bigint()
}

/// Fq2 ordering is lexicographic on `(c1, c0)`, matching the convention used
/// by the downstream verifier for G2 points.
pub fn fq2_is_lex_largest(y: &Fq2) -> bool {
    let neg = -*y;
    match y.c1.into_bigint().cmp(&neg.c1.into_bigint()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => y.c0.into_bigint() > neg.c0.into_bigint(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{Field, One, Zero};

    #[test]
    fn scalar_round_trip_is_big_endian() {
        let one = Fr::one();
        let bytes = fr_to_be_bytes(&one);
        let mut expected = [0u8; SCALAR_FIELD_BYTES];
        expected[SCALAR_FIELD_BYTES - 1] = 1;
        assert_eq!(bytes, expected);
        assert_eq!(fr_from_be_bytes(&bytes).unwrap(), one);
    }

    #[test]
    fn decode_rejects_modulus() {
        let mut modulus_be = [0u8; SCALAR_FIELD_BYTES];
        modulus_be.copy_from_slice(&Fr::MODULUS.to_bytes_be());
        assert_eq!(
            fr_from_be_bytes(&modulus_be),
            Err(KzgError::FieldElementOutOfRange)
        );

        let mut fq_modulus_be = [0u8; BASE_FIELD_BYTES];
        fq_modulus_be.copy_from_slice(&Fq::MODULUS.to_bytes_be());
        assert_eq!(
            fq_from_be_bytes(&fq_modulus_be),
            Err(KzgError::FieldElementOutOfRange)
        );
    }

    #[test]
    fn decode_accepts_modulus_minus_one() {
        let top = -Fq::one();
        let bytes = fq_to_be_bytes(&top);
        assert_eq!(fq_from_be_bytes(&bytes).unwrap(), top);
    }

    #[test]
    fn lex_sign_flips_with_negation() {
        let y = Fq::from(7u64);
        assert_ne!(fq_is_lex_largest(&y), fq_is_lex_largest(&(-y)));

        let y2 = Fq2::new(Fq::from(3u64), Fq::from(11u64));
        assert_ne!(fq2_is_lex_largest(&y2), fq2_is_lex_largest(&(-y2)));

        // With c1 = 0 the tie-break falls through to c0.
        let real_only = Fq2::new(Fq::from(5u64), Fq::zero());
        assert_ne!(
            fq2_is_lex_largest(&real_only),
            fq2_is_lex_largest(&(-real_only))
        );
    }
}
