//! Multi-scalar multiplication over affine bases.

use ark_ec::VariableBaseMSM;

/// Computes `sum_i scalars[i] * bases[i]`.
///
/// Zero scalars are fine; the backend skips them. Callers guarantee the two
/// slices have equal length.
pub fn msm<G>(bases: &[G::MulBase], scalars: &[G::ScalarField]) -> G
where
    G: VariableBaseMSM,
{
    debug_assert_eq!(bases.len(), scalars.len());
    G::msm_unchecked(bases, scalars)
}
