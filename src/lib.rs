//! Pairing-based polynomial commitment engine (KZG) with multi-point opening
//! proofs over BLS12-381.
//!
//! A prover commits to a polynomial with one G1 element and later proves its
//! values at several chosen points with a single compact proof; the verifier
//! checks one pairing equation and never sees the polynomial. Field, curve,
//! and pairing primitives come from `ark-bls12-381`; this crate supplies the
//! structured reference string, the polynomial ring, commitment and
//! multiproof construction, pairing verification, and the big-endian wire
//! codec for points and scalars.
//!
//! The engine core in [`poly::commitment::kzg`] is generic over
//! [`ark_ec::pairing::Pairing`]; the convenience functions below and the wire
//! codec in [`codec`] are concrete to BLS12-381.

pub mod codec;
pub mod field;
pub mod msm;
pub mod poly;
pub mod utils;

use ark_ec::AffineRepr;
use rand_core::{CryptoRng, RngCore};

pub use crate::poly::commitment::kzg::{MultiKZG, MultiProof, SRS, MAX_SRS_DEGREE};
pub use crate::poly::unipoly::UniPoly;
pub use crate::utils::errors::KzgError;

pub use ark_bls12_381::{Bls12_381, Fq, Fq2, Fr, G1Affine, G2Affine};

/// A G1 commitment to a polynomial over the scalar field.
pub type Commitment = G1Affine;
/// A dense polynomial over the BLS12-381 scalar field.
pub type Polynomial = UniPoly<Fr>;
/// A multi-point opening proof over BLS12-381.
pub type Proof = MultiProof<Bls12_381>;
/// A BLS12-381 structured reference string.
pub type Srs = SRS<Bls12_381>;

/// Generates an SRS supporting degrees up to `max_degree`, sampling the
/// secret scalar from `rng` and discarding it.
pub fn setup<R: RngCore + CryptoRng>(rng: &mut R, max_degree: usize) -> Result<Srs, KzgError> {
    SRS::setup(rng, max_degree)
}

/// Deterministic setup from an explicit secret scalar; see
/// [`SRS::setup_with_tau`] for the caveats.
pub fn setup_with_tau(max_degree: usize, tau: Fr) -> Result<Srs, KzgError> {
    SRS::setup_with_tau(max_degree, tau)
}

/// Commits `poly` against the G1 side of the SRS.
pub fn commit(srs: &Srs, poly: &Polynomial) -> Result<Commitment, KzgError> {
    MultiKZG::commit(srs, poly)
}

/// Opens `poly` at every point in `zs` with a single proof.
pub fn open_multi(srs: &Srs, poly: &Polynomial, zs: &[Fr]) -> Result<Proof, KzgError> {
    MultiKZG::open_multi(srs, poly, zs)
}

/// Verifies a multiproof against a commitment using the canonical G2
/// generator. `Err(KzgError::PairingCheckFailed)` is the reject outcome.
pub fn verify(commitment: &Commitment, proof: &Proof) -> Result<(), KzgError> {
    MultiKZG::verify(commitment, proof, &G2Affine::generator())
}
