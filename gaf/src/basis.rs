use num::complex::Complex64;

/// Weighting applied to `z^n` before it is multiplied by its coefficient.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BasisFamily {
    /// `z^n / sqrt(n!)`, the planar Gaussian analytic function.
    #[default]
    Normalized,
    /// `z^n`, a plain random power series.
    Plain,
}

impl std::fmt::Display for BasisFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Normalized => "normalized",
            Self::Plain => "plain",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for BasisFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normalized" | "gaf" => Ok(Self::Normalized),
            "plain" | "power" => Ok(Self::Plain),
            _ => Err(format!("unknown basis family '{s}'")),
        }
    }
}

/// `ln(n!)` as a sum of logarithms. Stays finite far past the point where
/// `n!` itself overflows an `f64` (n > 170).
pub fn ln_factorial(n: usize) -> f64 {
    (2..=n).map(|k| (k as f64).ln()).sum()
}

impl BasisFamily {
    pub fn weight(&self, n: usize) -> f64 {
        match self {
            Self::Normalized => (-0.5 * ln_factorial(n)).exp(),
            Self::Plain => 1.0,
        }
    }

    /// Weights for the indices `0..=order`.
    ///
    /// The normalized weights are built incrementally, `w_n = w_{n-1} / sqrt(n)`,
    /// which agrees with [`Self::weight`] to rounding.
    pub fn weights(&self, order: usize) -> Vec<f64> {
        match self {
            Self::Normalized => {
                let mut w = 1.0;
                (0..=order)
                    .map(|n| {
                        if n > 0 {
                            w /= (n as f64).sqrt();
                        }
                        w
                    })
                    .collect()
            }
            Self::Plain => vec![1.0; order + 1],
        }
    }

    /// The `n`-th basis function at `z`.
    ///
    /// `z^n` overflows for large `|z|` and `n`; the result is then non-finite
    /// and the caller is expected to treat it as a failed evaluation.
    pub fn evaluate(&self, n: usize, z: Complex64) -> Complex64 {
        z.powu(n as u32) * self.weight(n)
    }
}
