use num::complex::Complex;
use thiserror::Error;

type C = Complex<f64>;

pub trait Func {
    fn f(&self, z: C) -> C;
    fn df(&self, z: C) -> C;
}

/// A [`Func`] assembled from a pair of closures.
pub struct FnFunc<F, DF> {
    pub f: F,
    pub df: DF,
}

impl<F, DF> Func for FnFunc<F, DF>
where
    F: Fn(C) -> C,
    DF: Fn(C) -> C,
{
    fn f(&self, z: C) -> C {
        (self.f)(z)
    }

    fn df(&self, z: C) -> C {
        (self.df)(z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolverSettings {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-8,
            max_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NoConvergence {
    #[error("no convergence within the iteration limit")]
    MaxIterations,
    #[error("singular jacobian")]
    SingularJacobian,
    #[error("non-finite value during iteration")]
    NonFinite,
    #[error("step converged but the residual is above tolerance")]
    Residual,
    #[error("evaluation panicked")]
    Panicked,
}

/// Determinants below this fraction of the squared Jacobian scale are
/// treated as singular.
const SINGULAR_THRESHOLD: f64 = 1.0e-28;

fn is_finite(z: C) -> bool {
    z.re.is_finite() && z.im.is_finite()
}

/// Solves `J (dx, dy)^T = -(u, v)^T` for the real 2x2 Jacobian
/// `[[j11, j12], [j21, j22]]` by Cramer's rule.
fn newton_step(
    u: f64,
    v: f64,
    j11: f64,
    j12: f64,
    j21: f64,
    j22: f64,
) -> Result<C, NoConvergence> {
    let det = j11 * j22 - j12 * j21;
    let scale = j11 * j11 + j12 * j12 + j21 * j21 + j22 * j22;
    if !det.is_finite() || !scale.is_finite() {
        return Err(NoConvergence::NonFinite);
    }
    if scale == 0.0 || det.abs() <= SINGULAR_THRESHOLD * scale {
        return Err(NoConvergence::SingularJacobian);
    }
    let dx = (-u * j22 + v * j12) / det;
    let dy = (-v * j11 + u * j21) / det;
    Ok(C::new(dx, dy))
}

fn iterate(
    f: impl Fn(C) -> C,
    jacobian: impl Fn(C, C) -> Result<[f64; 4], NoConvergence>,
    guess: C,
    settings: &SolverSettings,
) -> Result<C, NoConvergence> {
    let tolerance = settings.tolerance;
    let mut z = guess;
    let mut fz = f(z);
    for _ in 0..settings.max_iterations {
        if !is_finite(fz) {
            return Err(NoConvergence::NonFinite);
        }
        if fz.norm() < tolerance {
            return Ok(z);
        }

        let [j11, j12, j21, j22] = jacobian(z, fz)?;
        let step = newton_step(fz.re, fz.im, j11, j12, j21, j22)?;
        z += step;
        if !is_finite(z) {
            return Err(NoConvergence::NonFinite);
        }
        fz = f(z);

        if step.norm() < tolerance * z.norm().max(1.0) {
            if !is_finite(fz) {
                return Err(NoConvergence::NonFinite);
            }
            return if fz.norm_sqr() <= tolerance {
                Ok(z)
            } else {
                Err(NoConvergence::Residual)
            };
        }
    }
    if is_finite(fz) && fz.norm() < tolerance {
        Ok(z)
    } else {
        Err(NoConvergence::MaxIterations)
    }
}

/// Newton's method for `f(x + iy) = 0` viewed as the real system
/// `Re f = 0, Im f = 0`.
///
/// For analytic `f` with `f' = a + ib` the Jacobian is `[[a, -b], [b, a]]`.
///
/// A point is accepted when `|f| < tolerance`, or when the Newton step drops
/// below `tolerance * max(1, |z|)` and `|f|^2 <= tolerance`. In the second case
/// the residual can be as large as `sqrt(tolerance)`.
pub fn find_root(
    func: &impl Func,
    guess: C,
    settings: &SolverSettings,
) -> Result<C, NoConvergence> {
    iterate(
        |z| func.f(z),
        |z, _| {
            let d = func.df(z);
            if !is_finite(d) {
                return Err(NoConvergence::NonFinite);
            }
            Ok([d.re, -d.im, d.im, d.re])
        },
        guess,
        settings,
    )
}

/// Like [`find_root`] but with a forward-difference Jacobian, so only `f` is
/// needed.
pub fn find_root_numeric(
    f: impl Fn(C) -> C,
    guess: C,
    settings: &SolverSettings,
) -> Result<C, NoConvergence> {
    iterate(
        &f,
        |z, fz| {
            let h = f64::EPSILON.sqrt() * z.norm().max(1.0);
            let dfdx = (f(z + C::new(h, 0.0)) - fz) / h;
            let dfdy = (f(z + C::new(0.0, h)) - fz) / h;
            if !is_finite(dfdx) || !is_finite(dfdy) {
                return Err(NoConvergence::NonFinite);
            }
            Ok([dfdx.re, dfdy.re, dfdx.im, dfdy.im])
        },
        guess,
        settings,
    )
}
