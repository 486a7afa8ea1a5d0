use crate::basis::BasisFamily;
use crate::coefficients::CoefficientGenerator;
use crate::error::{Error, Result};
use crate::nr::Func;
use num::complex::Complex64;

/// The truncated series `f(z) = sum_{n=0}^{N} c_n phi_n(z)`.
///
/// Immutable once built, so it can be shared across solver threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    basis: BasisFamily,
    coefficients: Vec<Complex64>,
    // c_n * w_n, the coefficients of the plain polynomial
    weighted: Vec<Complex64>,
}

impl Series {
    pub fn new(basis: BasisFamily, coefficients: Vec<Complex64>) -> Result<Self> {
        if coefficients.len() < 2 {
            return Err(Error::InvalidOrder(coefficients.len().saturating_sub(1)));
        }
        let weighted = coefficients
            .iter()
            .zip(basis.weights(coefficients.len() - 1))
            .map(|(c, w)| *c * w)
            .collect();
        Ok(Self {
            basis,
            coefficients,
            weighted,
        })
    }

    /// Draws fresh coefficients. Returns the seed used alongside the series.
    pub fn random(
        basis: BasisFamily,
        order: usize,
        generator: &CoefficientGenerator,
    ) -> Result<(Self, u64)> {
        if order < 1 {
            return Err(Error::InvalidOrder(order));
        }
        let (coefficients, seed) = generator.generate(order);
        Ok((Self::new(basis, coefficients)?, seed))
    }

    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn basis(&self) -> BasisFamily {
        self.basis
    }

    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    pub fn f(&self, z: Complex64) -> Complex64 {
        let mut terms = self.weighted.iter().rev();
        let Some(&last) = terms.next() else {
            return Complex64::default();
        };
        terms.fold(last, |acc, &a| acc * z + a)
    }

    pub fn df(&self, z: Complex64) -> Complex64 {
        let mut terms = self.weighted.iter().enumerate().skip(1).rev();
        let Some((n, &last)) = terms.next() else {
            return Complex64::default();
        };
        terms.fold(last * n as f64, |acc, (n, &a)| acc * z + a * n as f64)
    }
}

impl Func for Series {
    fn f(&self, z: Complex64) -> Complex64 {
        Series::f(self, z)
    }

    fn df(&self, z: Complex64) -> Complex64 {
        Series::df(self, z)
    }
}
