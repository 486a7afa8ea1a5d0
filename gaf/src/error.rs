use thiserror::Error;

/// Configuration errors. These are reported before any seed is solved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid region: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidRegion {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },
    #[error("truncation order must be at least 1 (got {0})")]
    InvalidOrder(usize),
    #[error("sampling density must be positive and finite (got {0})")]
    InvalidDensity(f64),
    #[error("seed lattice too large: {width} x {height} at density {density}")]
    GridTooLarge {
        width: f64,
        height: f64,
        density: f64,
    },
    #[error("solver tolerance must be positive and finite (got {0})")]
    InvalidTolerance(f64),
    #[error("maximum iteration count must be at least 1")]
    InvalidIterations,
    #[error("dedup epsilon must be positive and finite (got {0})")]
    InvalidEpsilon(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
