//! Big-endian wire encodings for BLS12-381 group elements and scalars.
//!
//! Compressed points carry three header bits in the top byte: 0x80 marks the
//! compressed format, 0x40 the point at infinity, 0x20 the sign of `y`
//! (set when `y` is the lexicographically larger root). A compressed G2
//! point is two 48-byte blocks, `flags|x_c1 || x_c0`. Uncompressed points are
//! plain coordinate dumps with no header bits: `x || y` for G1 and
//! `x_c0 || x_c1 || y_c0 || y_c1` for G2; the identity is all zero bytes,
//! which cannot collide with a real point since (0, 0) is not on either
//! curve.
//!
//! All of this is independent of the little-endian formats Arkworks uses
//! internally; the byte order here is part of the external contract and is
//! pinned by tests against known vectors.

use ark_bls12_381::{Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::Field;
use ark_std::Zero;

use crate::field::{
    fq2_is_lex_largest, fq_from_be_bytes, fq_is_lex_largest, fq_to_be_bytes, fr_from_be_bytes,
    fr_to_be_bytes, BASE_FIELD_BYTES, SCALAR_FIELD_BYTES,
};
use crate::utils::errors::KzgError;

pub const G1_COMPRESSED_BYTES: usize = BASE_FIELD_BYTES;
pub const G1_UNCOMPRESSED_BYTES: usize = 2 * BASE_FIELD_BYTES;
pub const G2_COMPRESSED_BYTES: usize = 2 * BASE_FIELD_BYTES;
pub const G2_UNCOMPRESSED_BYTES: usize = 4 * BASE_FIELD_BYTES;

const COMPRESSION_FLAG: u8 = 0x80;
const INFINITY_FLAG: u8 = 0x40;
const SIGN_FLAG: u8 = 0x20;
const FLAG_MASK: u8 = 0xe0;

fn g1_curve_b() -> Fq {
    Fq::from(4u64)
}

fn g2_curve_b() -> Fq2 {
    Fq2::new(Fq::from(4u64), Fq::from(4u64))
}

/// Reads a 48-byte coordinate block, stripping any header bits from the
/// first byte before the range check.
fn read_coordinate(block: &[u8], strip_flags: bool) -> Result<Fq, KzgError> {
    let mut bytes = [0u8; BASE_FIELD_BYTES];
    bytes.copy_from_slice(block);
    if strip_flags {
        bytes[0] &= !FLAG_MASK;
    }
    fq_from_be_bytes(&bytes)
}

fn check_subgroup_g1(point: G1Affine) -> Result<G1Affine, KzgError> {
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::PointNotOnCurve);
    }
    Ok(point)
}

fn check_subgroup_g2(point: G2Affine) -> Result<G2Affine, KzgError> {
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::PointNotOnCurve);
    }
    Ok(point)
}

pub fn compress_g1(point: &G1Affine) -> [u8; G1_COMPRESSED_BYTES] {
    let mut out = [0u8; G1_COMPRESSED_BYTES];
    if point.infinity {
        out[0] = COMPRESSION_FLAG | INFINITY_FLAG;
        return out;
    }
    out.copy_from_slice(&fq_to_be_bytes(&point.x));
    out[0] |= COMPRESSION_FLAG;
    if fq_is_lex_largest(&point.y) {
        out[0] |= SIGN_FLAG;
    }
    out
}

pub fn decompress_g1(bytes: &[u8]) -> Result<G1Affine, KzgError> {
    if bytes.len() != G1_COMPRESSED_BYTES {
        return Err(KzgError::InvalidEncoding("bad G1 compressed length"));
    }
    let flags = bytes[0] & FLAG_MASK;
    if flags & COMPRESSION_FLAG == 0 {
        return Err(KzgError::InvalidEncoding("compression flag not set"));
    }
    if flags & INFINITY_FLAG != 0 {
        if flags & SIGN_FLAG != 0
            || bytes[0] & !FLAG_MASK != 0
            || bytes[1..].iter().any(|b| *b != 0)
        {
            return Err(KzgError::InvalidEncoding("malformed infinity encoding"));
        }
        return Ok(G1Affine::zero());
    }

    let x = read_coordinate(bytes, true)?;
    let mut y = (x.square() * x + g1_curve_b())
        .sqrt()
        .ok_or(KzgError::InvalidEncoding("x is not on the curve"))?;
    if fq_is_lex_largest(&y) != (flags & SIGN_FLAG != 0) {
        y = -y;
    }
    check_subgroup_g1(G1Affine::new_unchecked(x, y))
}

pub fn compress_g2(point: &G2Affine) -> [u8; G2_COMPRESSED_BYTES] {
    let mut out = [0u8; G2_COMPRESSED_BYTES];
    if point.infinity {
        out[0] = COMPRESSION_FLAG | INFINITY_FLAG;
        return out;
    }
    out[..BASE_FIELD_BYTES].copy_from_slice(&fq_to_be_bytes(&point.x.c1));
    out[BASE_FIELD_BYTES..].copy_from_slice(&fq_to_be_bytes(&point.x.c0));
    out[0] |= COMPRESSION_FLAG;
    if fq2_is_lex_largest(&point.y) {
        out[0] |= SIGN_FLAG;
    }
    out
}

pub fn decompress_g2(bytes: &[u8]) -> Result<G2Affine, KzgError> {
    if bytes.len() != G2_COMPRESSED_BYTES {
        return Err(KzgError::InvalidEncoding("bad G2 compressed length"));
    }
    let flags = bytes[0] & FLAG_MASK;
    if flags & COMPRESSION_FLAG == 0 {
        return Err(KzgError::InvalidEncoding("compression flag not set"));
    }
    if flags & INFINITY_FLAG != 0 {
        if flags & SIGN_FLAG != 0
            || bytes[0] & !FLAG_MASK != 0
            || bytes[1..].iter().any(|b| *b != 0)
        {
            return Err(KzgError::InvalidEncoding("malformed infinity encoding"));
        }
        return Ok(G2Affine::zero());
    }

    let x_c1 = read_coordinate(&bytes[..BASE_FIELD_BYTES], true)?;
    let x_c0 = read_coordinate(&bytes[BASE_FIELD_BYTES..], false)?;
    let x = Fq2::new(x_c0, x_c1);
    let mut y = (x.square() * x + g2_curve_b())
        .sqrt()
        .ok_or(KzgError::InvalidEncoding("x is not on the curve"))?;
    if fq2_is_lex_largest(&y) != (flags & SIGN_FLAG != 0) {
        y = -y;
    }
    check_subgroup_g2(G2Affine::new_unchecked(x, y))
}

pub fn serialize_g1_uncompressed(point: &G1Affine) -> [u8; G1_UNCOMPRESSED_BYTES] {
    let mut out = [0u8; G1_UNCOMPRESSED_BYTES];
    if point.infinity {
        return out;
    }
    out[..BASE_FIELD_BYTES].copy_from_slice(&fq_to_be_bytes(&point.x));
    out[BASE_FIELD_BYTES..].copy_from_slice(&fq_to_be_bytes(&point.y));
    out
}

pub fn deserialize_g1_uncompressed(bytes: &[u8]) -> Result<G1Affine, KzgError> {
    if bytes.len() != G1_UNCOMPRESSED_BYTES {
        return Err(KzgError::InvalidEncoding("bad G1 uncompressed length"));
    }
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G1Affine::zero());
    }
    let x = read_coordinate(&bytes[..BASE_FIELD_BYTES], false)?;
    let y = read_coordinate(&bytes[BASE_FIELD_BYTES..], false)?;
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(KzgError::PointNotOnCurve);
    }
    check_subgroup_g1(point)
}

pub fn serialize_g2_uncompressed(point: &G2Affine) -> [u8; G2_UNCOMPRESSED_BYTES] {
    let mut out = [0u8; G2_UNCOMPRESSED_BYTES];
    if point.infinity {
        return out;
    }
    let blocks = [&point.x.c0, &point.x.c1, &point.y.c0, &point.y.c1];
    for (i, block) in blocks.iter().enumerate() {
        out[i * BASE_FIELD_BYTES..(i + 1) * BASE_FIELD_BYTES]
            .copy_from_slice(&fq_to_be_bytes(block));
    }
    out
}

pub fn deserialize_g2_uncompressed(bytes: &[u8]) -> Result<G2Affine, KzgError> {
    if bytes.len() != G2_UNCOMPRESSED_BYTES {
        return Err(KzgError::InvalidEncoding("bad G2 uncompressed length"));
    }
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G2Affine::zero());
    }
    let mut coords = [Fq::zero(); 4];
    for (i, coord) in coords.iter_mut().enumerate() {
        *coord = read_coordinate(
            &bytes[i * BASE_FIELD_BYTES..(i + 1) * BASE_FIELD_BYTES],
            false,
        )?;
    }
    let point = G2Affine::new_unchecked(Fq2::new(coords[0], coords[1]), Fq2::new(coords[2], coords[3]));
    if !point.is_on_curve() {
        return Err(KzgError::PointNotOnCurve);
    }
    check_subgroup_g2(point)
}

pub fn scalar_to_be_bytes(scalar: &Fr) -> [u8; SCALAR_FIELD_BYTES] {
    fr_to_be_bytes(scalar)
}

pub fn scalar_from_be_bytes(bytes: &[u8]) -> Result<Fr, KzgError> {
    if bytes.len() != SCALAR_FIELD_BYTES {
        return Err(KzgError::InvalidEncoding("bad scalar length"));
    }
    let mut fixed = [0u8; SCALAR_FIELD_BYTES];
    fixed.copy_from_slice(bytes);
    fr_from_be_bytes(&fixed)
}
