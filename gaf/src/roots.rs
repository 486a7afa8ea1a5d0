//! Post-processing of solver output: restriction to the region and greedy
//! merging of roots that several seeds converged to.

use crate::grid::Region;
use num::complex::Complex64;

pub fn filter(roots: &[Complex64], region: &Region) -> Vec<Complex64> {
    roots.iter().copied().filter(|z| region.contains(*z)).collect()
}

/// Keeps a root only if it is farther than `epsilon` from every root kept
/// before it.
///
/// The result depends on the input order; it is not a clustering.
pub fn dedup(roots: &[Complex64], epsilon: f64) -> Vec<Complex64> {
    let mut unique: Vec<Complex64> = Vec::new();
    for &z in roots {
        if unique.iter().all(|w| (z - *w).norm() > epsilon) {
            unique.push(z);
        }
    }
    unique
}

pub fn filter_and_dedup(roots: &[Complex64], region: &Region, epsilon: f64) -> Vec<Complex64> {
    dedup(&filter(roots, region), epsilon)
}
