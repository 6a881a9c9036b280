use ark_ff::PrimeField;
use ark_std::rand::Rng;
use std::ops::{Add, Mul, Sub};

use crate::utils::errors::KzgError;

/// Dense univariate polynomial over a prime field.
///
/// `coeffs[i]` is the coefficient of `x^i`. The representation is normalized:
/// no trailing zero coefficients, so the zero polynomial is the empty vector.
// ax^2 + bx + c stored as vec![c, b, a]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniPoly<F: PrimeField> {
    pub coeffs: Vec<F>,
}

impl<F: PrimeField> UniPoly<F> {
    pub fn from_coeff(mut coeffs: Vec<F>) -> Self {
        while let Some(true) = coeffs.last().map(|c| c.is_zero()) {
            coeffs.pop();
        }
        UniPoly { coeffs }
    }

    pub fn zero() -> Self {
        Self::from_coeff(Vec::new())
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial. The zero polynomial reports 0; use
    /// [`Self::is_zero`] to tell it apart from a nonzero constant.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn leading_coefficient(&self) -> Option<&F> {
        self.coeffs.last()
    }

    pub fn random<R: Rng>(degree: usize, rng: &mut R) -> Self {
        Self::from_coeff((0..=degree).map(|_| F::rand(rng)).collect())
    }

    /// Horner evaluation, O(degree).
    pub fn evaluate(&self, z: &F) -> F {
        let mut eval = F::zero();
        for coeff in self.coeffs.iter().rev() {
            eval = eval * z + coeff;
        }
        eval
    }

    /// Lagrange interpolation: the unique polynomial of degree < `points.len()`
    /// passing through every `(z, y)` pair. The z-values must be pairwise
    /// distinct.
    pub fn interpolate(points: &[(F, F)]) -> Result<Self, KzgError> {
        for (i, (zi, _)) in points.iter().enumerate() {
            if points[i + 1..].iter().any(|(zj, _)| zj == zi) {
                return Err(KzgError::DuplicateEvaluationPoint);
            }
        }

        let mut acc = Self::zero();
        for (i, (zi, yi)) in points.iter().enumerate() {
            let mut numerator = Self::from_coeff(vec![F::one()]);
            let mut denominator = F::one();
            for (j, (zj, _)) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                numerator = &numerator * &Self::from_coeff(vec![-*zj, F::one()]);
                denominator *= *zi - *zj;
            }
            let scale = *yi * denominator.inverse().ok_or(KzgError::DivisionByZero)?;
            let scaled = Self::from_coeff(numerator.coeffs.iter().map(|c| *c * scale).collect());
            acc = &acc + &scaled;
        }
        Ok(acc)
    }

    /// The monic polynomial whose roots are exactly the given z-values:
    /// `prod_i (x - z_i)`.
    pub fn vanishing(zs: &[F]) -> Self {
        let mut acc = Self::from_coeff(vec![F::one()]);
        for z in zs {
            acc = &acc * &Self::from_coeff(vec![-*z, F::one()]);
        }
        acc
    }

    /// Schoolbook division: returns `(quotient, remainder)` with
    /// `self = quotient * divisor + remainder` and
    /// `degree(remainder) < degree(divisor)`.
    pub fn divide_with_remainder(&self, divisor: &Self) -> Result<(Self, Self), KzgError> {
        if divisor.is_zero() {
            return Err(KzgError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok((Self::zero(), Self::zero()));
        }
        if self.degree() < divisor.degree() {
            return Ok((Self::zero(), self.clone()));
        }

        let mut quotient = vec![F::zero(); self.degree() - divisor.degree() + 1];
        let mut remainder = self.clone();
        // Leading coefficient is nonzero by normalization.
        let divisor_leading_inv = divisor
            .leading_coefficient()
            .and_then(|c| c.inverse())
            .ok_or(KzgError::DivisionByZero)?;

        while !remainder.is_zero() && remainder.degree() >= divisor.degree() {
            let cur_coeff = remainder.coeffs[remainder.coeffs.len() - 1] * divisor_leading_inv;
            let cur_degree = remainder.degree() - divisor.degree();
            quotient[cur_degree] = cur_coeff;

            for (i, div_coeff) in divisor.coeffs.iter().enumerate() {
                remainder.coeffs[cur_degree + i] -= cur_coeff * div_coeff;
            }
            while let Some(true) = remainder.coeffs.last().map(|c| c.is_zero()) {
                remainder.coeffs.pop();
            }
        }
        Ok((Self::from_coeff(quotient), remainder))
    }
}

impl<F: PrimeField> Add for &UniPoly<F> {
    type Output = UniPoly<F>;

    fn add(self, rhs: Self) -> UniPoly<F> {
        let (longer, shorter) = if self.coeffs.len() >= rhs.coeffs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut coeffs = longer.coeffs.clone();
        for (c, s) in coeffs.iter_mut().zip(&shorter.coeffs) {
            *c += s;
        }
        UniPoly::from_coeff(coeffs)
    }
}

impl<F: PrimeField> Sub for &UniPoly<F> {
    type Output = UniPoly<F>;

    fn sub(self, rhs: Self) -> UniPoly<F> {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = self.coeffs.clone();
        coeffs.resize(len, F::zero());
        for (c, r) in coeffs.iter_mut().zip(&rhs.coeffs) {
            *c -= r;
        }
        UniPoly::from_coeff(coeffs)
    }
}

impl<F: PrimeField> Mul for &UniPoly<F> {
    type Output = UniPoly<F>;

    /// Full convolution, O(n * m). Degrees here are bounded by the SRS size,
    /// so the quadratic product is acceptable.
    fn mul(self, rhs: Self) -> UniPoly<F> {
        if self.is_zero() || rhs.is_zero() {
            return UniPoly::zero();
        }
        let mut coeffs = vec![F::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += *a * b;
            }
        }
        UniPoly::from_coeff(coeffs)
    }
}
