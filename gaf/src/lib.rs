#![warn(clippy::all, rust_2018_idioms)]

//! Zeros of random analytic functions.
//!
//! A truncated power series with independent standard complex Gaussian
//! coefficients is evaluated in one of two bases, Newton's method is started
//! from every point of a rectangular lattice, and the converged points inside
//! the region are merged into a set of distinct zeros.
//!
//! The lattice search is a heuristic: zeros whose basin of attraction contains
//! no seed are missed.

pub mod basis;
pub mod coefficients;
mod error;
pub mod grid;
pub mod nr;
pub mod roots;
pub mod scan;
pub mod series;

pub use basis::BasisFamily;
pub use coefficients::CoefficientGenerator;
pub use error::{Error, Result};
pub use grid::{grid_size, seed_grid, Region};
pub use nr::{find_root, Func, NoConvergence, SolverSettings};
pub use scan::{solve_seeds, Scan, ScanSettings, ScanStats, Zeros};
pub use series::Series;
