use core::fmt::Debug;
use thiserror::Error;

/// Every failure mode of the commitment engine.
///
/// `PairingCheckFailed` is a legitimate negative verification result, not a
/// malformed-input error; callers that need to distinguish "proof is
/// cryptographically invalid" from "input was garbage" can match on it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KzgError {
    #[error("polynomial degree {0} exceeds the supported bound {1}")]
    DegreeExceeded(usize, usize),
    #[error("field element is not in canonical range")]
    FieldElementOutOfRange,
    #[error("invalid point encoding: {0}")]
    InvalidEncoding(&'static str),
    #[error("point is not in the prime-order group")]
    PointNotOnCurve,
    #[error("evaluation points must be pairwise distinct")]
    DuplicateEvaluationPoint,
    #[error("division by the zero polynomial")]
    DivisionByZero,
    /// Internal-consistency guard: `p(X) - I(X)` always vanishes on the
    /// opened points when `I` interpolates `p`'s own evaluations, so seeing
    /// this means the opening state was corrupted mid-flight.
    #[error("vanishing polynomial does not divide p(X) - I(X)")]
    DivisionRemainderNonzero,
    #[error("quotient polynomial is zero: all requested openings are implied by the interpolant")]
    ZeroQuotient,
    #[error("pairing check failed: proof does not verify")]
    PairingCheckFailed,
}
