//! KZG commitments and multi-point opening proofs.
//!
//! A commitment is a single group element; a multiproof attests to the
//! polynomial's values at several points at once. The opening relation
//! `p(X) - I(X) = q(X) * Z(X)` (with `I` the interpolant through the opened
//! points and `Z` the vanishing polynomial of the point set) is checked in the
//! exponent via one multi-pairing, without recovering the secret `tau` or the
//! polynomial.

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup, PrimeGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{One, UniformRand, Zero};
use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;
use std::marker::PhantomData;

use crate::msm::msm;
use crate::poly::unipoly::UniPoly;
use crate::utils::errors::KzgError;

/// Resource bound on setup: SRS generation refuses degree bounds above this.
pub const MAX_SRS_DEGREE: usize = 1 << 20;

/// Powers of a secret scalar in both groups:
/// `g1_powers[i] = tau^i * G1`, `g2_powers[i] = tau^i * G2`, `i` in `0..=t`.
///
/// Produced once by setup and immutable afterwards; sharing it read-only
/// across threads is safe, no operation here mutates it.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct SRS<P: Pairing> {
    pub g1_powers: Vec<P::G1Affine>,
    pub g2_powers: Vec<P::G2Affine>,
}

impl<P: Pairing> SRS<P> {
    /// Samples a fresh secret scalar from `rng` and discards it once the
    /// powers are computed. This is the production-representative path: the
    /// toxic waste never escapes this function.
    pub fn setup<R: RngCore + CryptoRng>(rng: &mut R, max_degree: usize) -> Result<Self, KzgError> {
        let tau = P::ScalarField::rand(rng);
        Self::setup_with_tau(max_degree, tau)
    }

    /// Deterministic setup from an explicit secret scalar, for reproducible
    /// test vectors. Callers outside tests are responsible for never
    /// persisting `tau`.
    #[tracing::instrument(skip_all, name = "SRS::setup_with_tau")]
    pub fn setup_with_tau(max_degree: usize, tau: P::ScalarField) -> Result<Self, KzgError> {
        if max_degree > MAX_SRS_DEGREE {
            return Err(KzgError::DegreeExceeded(max_degree, MAX_SRS_DEGREE));
        }
        if tau.is_zero() {
            // Well-defined mathematically, but binding is lost for degree >= 1.
            tracing::warn!("SRS generated with tau = 0; commitments above degree 0 are not binding");
        }

        let powers: Vec<P::ScalarField> = (0..=max_degree)
            .scan(P::ScalarField::one(), |acc, _| {
                let power = *acc;
                *acc *= tau;
                Some(power)
            })
            .collect();

        let (g1_powers, g2_powers) = rayon::join(
            || {
                let g1 = P::G1::generator();
                let projective: Vec<P::G1> = powers.par_iter().map(|power| g1 * *power).collect();
                P::G1::normalize_batch(&projective)
            },
            || {
                let g2 = P::G2::generator();
                let projective: Vec<P::G2> = powers.par_iter().map(|power| g2 * *power).collect();
                P::G2::normalize_batch(&projective)
            },
        );

        Ok(Self {
            g1_powers,
            g2_powers,
        })
    }

    /// The largest polynomial degree this SRS can commit to.
    pub fn max_degree(&self) -> usize {
        self.g1_powers.len() - 1
    }

    /// The G2 generator baked into this SRS (`tau^0 * G2`).
    pub fn g2_generator(&self) -> &P::G2Affine {
        &self.g2_powers[0]
    }
}

/// A multi-point opening proof.
///
/// `points` are the claimed `(z, y)` evaluation pairs; the three commitments
/// bind the quotient polynomial (in G2), the interpolant through `points`,
/// and the vanishing polynomial of the z-values (both in G1).
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct MultiProof<P: Pairing> {
    pub points: Vec<(P::ScalarField, P::ScalarField)>,
    pub quotient: P::G2Affine,
    pub interpolation: P::G1Affine,
    pub vanishing: P::G1Affine,
}

impl<P: Pairing> PartialEq for MultiProof<P> {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
            && self.quotient == other.quotient
            && self.interpolation == other.interpolation
            && self.vanishing == other.vanishing
    }
}

impl<P: Pairing> Eq for MultiProof<P> {}

#[derive(Debug, Clone, Default)]
pub struct MultiKZG<P: Pairing> {
    _phantom: PhantomData<P>,
}

impl<P: Pairing> MultiKZG<P>
where
    P::G1: VariableBaseMSM<MulBase = P::G1Affine>,
    P::G2: VariableBaseMSM<MulBase = P::G2Affine>,
{
    fn check_degree(srs: &SRS<P>, poly: &UniPoly<P::ScalarField>) -> Result<(), KzgError> {
        if poly.degree() > srs.max_degree() {
            return Err(KzgError::DegreeExceeded(poly.degree(), srs.max_degree()));
        }
        Ok(())
    }

    /// Commits a polynomial against the G1 side of the SRS. The zero
    /// polynomial commits to the identity element.
    #[tracing::instrument(skip_all, name = "MultiKZG::commit")]
    pub fn commit(
        srs: &SRS<P>,
        poly: &UniPoly<P::ScalarField>,
    ) -> Result<P::G1Affine, KzgError> {
        Self::check_degree(srs, poly)?;
        if poly.is_zero() {
            return Ok(P::G1Affine::zero());
        }
        Ok(msm::<P::G1>(&srs.g1_powers[..poly.coeffs.len()], &poly.coeffs).into_affine())
    }

    /// Commits against the G2 side; used for the quotient polynomial.
    #[tracing::instrument(skip_all, name = "MultiKZG::commit_g2")]
    pub fn commit_g2(
        srs: &SRS<P>,
        poly: &UniPoly<P::ScalarField>,
    ) -> Result<P::G2Affine, KzgError> {
        Self::check_degree(srs, poly)?;
        if poly.is_zero() {
            return Ok(P::G2Affine::zero());
        }
        Ok(msm::<P::G2>(&srs.g2_powers[..poly.coeffs.len()], &poly.coeffs).into_affine())
    }

    /// Produces a proof for the polynomial's values at every `z` in `zs`.
    ///
    /// The z-values must be pairwise distinct. A quotient with nonzero
    /// remainder cannot arise from well-formed inputs; it is surfaced as
    /// `DivisionRemainderNonzero` rather than swallowed. A zero quotient
    /// (the interpolant already equals the polynomial) yields `ZeroQuotient`
    /// since such a proof would carry no information.
    #[tracing::instrument(skip_all, name = "MultiKZG::open_multi")]
    pub fn open_multi(
        srs: &SRS<P>,
        poly: &UniPoly<P::ScalarField>,
        zs: &[P::ScalarField],
    ) -> Result<MultiProof<P>, KzgError> {
        Self::check_degree(srs, poly)?;
        for (i, zi) in zs.iter().enumerate() {
            if zs[i + 1..].contains(zi) {
                return Err(KzgError::DuplicateEvaluationPoint);
            }
        }

        let points: Vec<(P::ScalarField, P::ScalarField)> =
            zs.iter().map(|z| (*z, poly.evaluate(z))).collect();

        let i_poly = UniPoly::interpolate(&points)?;
        let z_poly = UniPoly::vanishing(zs);

        let (q_poly, remainder) = (poly - &i_poly).divide_with_remainder(&z_poly)?;
        if !remainder.is_zero() {
            return Err(KzgError::DivisionRemainderNonzero);
        }
        if q_poly.is_zero() {
            return Err(KzgError::ZeroQuotient);
        }

        let quotient = Self::commit_g2(srs, &q_poly)?;
        let interpolation = Self::commit(srs, &i_poly)?;
        let vanishing = Self::commit(srs, &z_poly)?;

        Ok(MultiProof {
            points,
            quotient,
            interpolation,
            vanishing,
        })
    }

    /// Checks the opening relation in the exponent:
    /// `e(Z_commit, Q) * e(-(C - I_commit), G2) == 1` in the target group.
    ///
    /// A failed check returns `Err(PairingCheckFailed)`; every other error
    /// kind signals malformed input rather than an invalid proof.
    #[tracing::instrument(skip_all, name = "MultiKZG::verify")]
    pub fn verify(
        commitment: &P::G1Affine,
        proof: &MultiProof<P>,
        g2_generator: &P::G2Affine,
    ) -> Result<(), KzgError> {
        let d = commitment.into_group() - proof.interpolation.into_group();
        let result = P::multi_pairing(
            [proof.vanishing.into_group(), -d],
            [proof.quotient, *g2_generator],
        );
        if result.is_zero() {
            Ok(())
        } else {
            Err(KzgError::PairingCheckFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{Bls12_381, Fr, G2Affine};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    type Kzg = MultiKZG<Bls12_381>;

    fn test_srs(max_degree: usize, seed: u64) -> SRS<Bls12_381> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        SRS::setup(&mut rng, max_degree).unwrap()
    }

    #[test]
    fn srs_has_expected_shape() {
        let srs = test_srs(8, 0);
        assert_eq!(srs.g1_powers.len(), 9);
        assert_eq!(srs.g2_powers.len(), 9);
        assert_eq!(srs.max_degree(), 8);
        assert_eq!(srs.g1_powers[0], ark_bls12_381::G1Affine::generator());
        assert_eq!(*srs.g2_generator(), G2Affine::generator());
    }

    #[test]
    fn setup_rejects_oversized_degree() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            SRS::<Bls12_381>::setup(&mut rng, MAX_SRS_DEGREE + 1).unwrap_err(),
            KzgError::DegreeExceeded(MAX_SRS_DEGREE + 1, MAX_SRS_DEGREE)
        );
    }

    #[test]
    fn commit_prove_verify_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let srs = test_srs(32, 3);
        for _ in 0..5 {
            let poly = UniPoly::<Fr>::random(20, &mut rng);
            let zs: Vec<Fr> = (1u64..=4).map(Fr::from).collect();

            let commitment = Kzg::commit(&srs, &poly).unwrap();
            let proof = Kzg::open_multi(&srs, &poly, &zs).unwrap();
            for (z, y) in &proof.points {
                assert_eq!(poly.evaluate(z), *y);
            }
            Kzg::verify(&commitment, &proof, srs.g2_generator()).unwrap();
        }
    }

    #[test]
    fn commitment_is_homomorphic() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let srs = test_srs(16, 4);
        let p1 = UniPoly::<Fr>::random(10, &mut rng);
        let p2 = UniPoly::<Fr>::random(14, &mut rng);

        let lhs = Kzg::commit(&srs, &(&p1 + &p2)).unwrap();
        let rhs = (Kzg::commit(&srs, &p1).unwrap().into_group()
            + Kzg::commit(&srs, &p2).unwrap().into_group())
        .into_affine();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn zero_polynomial_commits_to_identity() {
        let srs = test_srs(4, 5);
        let commitment = Kzg::commit(&srs, &UniPoly::zero()).unwrap();
        assert!(commitment.is_zero());
    }

    #[test]
    fn degree_bound_is_exact() {
        let srs = test_srs(8, 6);
        let mut coeffs = vec![Fr::zero(); 9];
        coeffs[8] = Fr::one();
        assert!(Kzg::commit(&srs, &UniPoly::from_coeff(coeffs)).is_ok());

        let mut coeffs = vec![Fr::zero(); 10];
        coeffs[9] = Fr::one();
        assert_eq!(
            Kzg::commit(&srs, &UniPoly::from_coeff(coeffs)).unwrap_err(),
            KzgError::DegreeExceeded(9, 8)
        );
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let srs = test_srs(8, 7);
        let poly = UniPoly::<Fr>::random(5, &mut rng);
        let zs = [Fr::from(1u64), Fr::from(1u64), Fr::from(3u64)];
        assert_eq!(
            Kzg::open_multi(&srs, &poly, &zs).unwrap_err(),
            KzgError::DuplicateEvaluationPoint
        );
    }

    #[test]
    fn low_degree_polynomial_yields_zero_quotient() {
        let srs = test_srs(8, 8);
        // Degree 1 opened at 3 points: the interpolant is the polynomial
        // itself, so the quotient vanishes.
        let poly = UniPoly::from_coeff(vec![Fr::from(5u64), Fr::from(2u64)]);
        let zs: Vec<Fr> = (1u64..=3).map(Fr::from).collect();
        assert_eq!(
            Kzg::open_multi(&srs, &poly, &zs).unwrap_err(),
            KzgError::ZeroQuotient
        );
    }

    #[test]
    fn wrong_commitment_fails_verification() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let srs = test_srs(16, 9);
        let poly = UniPoly::<Fr>::random(10, &mut rng);
        let other = UniPoly::<Fr>::random(10, &mut rng);
        let zs: Vec<Fr> = (1u64..=3).map(Fr::from).collect();

        let proof = Kzg::open_multi(&srs, &poly, &zs).unwrap();
        let wrong_commitment = Kzg::commit(&srs, &other).unwrap();
        assert_eq!(
            Kzg::verify(&wrong_commitment, &proof, srs.g2_generator()).unwrap_err(),
            KzgError::PairingCheckFailed
        );
    }

    #[test]
    fn tampered_proof_fails_verification() {
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        let srs = test_srs(16, 10);
        let poly = UniPoly::<Fr>::random(12, &mut rng);
        let zs: Vec<Fr> = (1u64..=3).map(Fr::from).collect();

        let commitment = Kzg::commit(&srs, &poly).unwrap();
        let mut proof = Kzg::open_multi(&srs, &poly, &zs).unwrap();
        proof.interpolation = (proof.interpolation.into_group()
            + ark_bls12_381::G1Affine::generator().into_group())
        .into_affine();
        assert_eq!(
            Kzg::verify(&commitment, &proof, srs.g2_generator()).unwrap_err(),
            KzgError::PairingCheckFailed
        );
    }

    #[test]
    fn zero_tau_srs_is_degenerate_but_well_defined() {
        let srs = SRS::<Bls12_381>::setup_with_tau(4, Fr::zero()).unwrap();
        // Every power beyond tau^0 is the identity.
        assert!(srs.g1_powers[1].is_zero());
        let constant = UniPoly::from_coeff(vec![Fr::from(9u64)]);
        assert!(Kzg::commit(&srs, &constant).is_ok());
    }
}
