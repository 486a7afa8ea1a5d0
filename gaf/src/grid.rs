use crate::error::{Error, Result};
use itertools::Itertools;
use num::complex::Complex64;

/// Closed rectangle `[x_min, x_max] x [y_min, y_max]` in the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            x_min: -5.0,
            x_max: 5.0,
            y_min: -5.0,
            y_max: 5.0,
        }
    }
}

impl Region {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let region = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        region.validate()?;
        Ok(region)
    }

    /// Rejects empty, inverted or non-finite rectangles.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.x_min < self.x_max && self.y_min < self.y_max {
            Ok(())
        } else {
            Err(Error::InvalidRegion {
                x_min: self.x_min,
                x_max: self.x_max,
                y_min: self.y_min,
                y_max: self.y_max,
            })
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, z: Complex64) -> bool {
        (self.x_min..=self.x_max).contains(&z.re) && (self.y_min..=self.y_max).contains(&z.im)
    }
}

/// `count` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

/// Upper bound on the number of seeds in one lattice.
pub const MAX_SEEDS: usize = 1 << 24;

fn samples(extent: f64, density: f64) -> Option<usize> {
    let n = (extent * density).floor();
    (n.is_finite() && n <= MAX_SEEDS as f64).then_some(n as usize)
}

/// Lattice dimensions `(nx, ny)` for the region at the given density.
///
/// Fails with [`Error::GridTooLarge`] when an extent overflows or the lattice
/// would exceed [`MAX_SEEDS`] points.
pub fn grid_size(region: &Region, density: f64) -> Result<(usize, usize)> {
    region.validate()?;
    if !(density.is_finite() && density > 0.0) {
        return Err(Error::InvalidDensity(density));
    }
    let too_large = Error::GridTooLarge {
        width: region.width(),
        height: region.height(),
        density,
    };
    let (Some(nx), Some(ny)) = (
        samples(region.width(), density),
        samples(region.height(), density),
    ) else {
        return Err(too_large);
    };
    match nx.checked_mul(ny) {
        Some(n) if n <= MAX_SEEDS => Ok((nx, ny)),
        _ => Err(too_large),
    }
}

/// Seeds on the lattice spanned by `floor(width * density)` x-values and
/// `floor(height * density)` y-values. Ordered by x, then y.
///
/// A density that yields fewer than two samples per axis gives a single row or
/// column, or no seeds at all; both are valid.
pub fn seed_grid(region: &Region, density: f64) -> Result<Vec<Complex64>> {
    let (nx, ny) = grid_size(region, density)?;
    let xs = linspace(region.x_min, region.x_max, nx);
    let ys = linspace(region.y_min, region.y_max, ny);
    Ok(xs
        .into_iter()
        .cartesian_product(ys)
        .map(|(x, y)| Complex64::new(x, y))
        .collect())
}
