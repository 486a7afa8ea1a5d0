use crate::basis::BasisFamily;
use crate::coefficients::CoefficientGenerator;
use crate::error::{Error, Result};
use crate::grid::{grid_size, seed_grid, Region};
use crate::nr::{find_root, Func, NoConvergence, SolverSettings};
use crate::roots;
use crate::series::Series;

use itertools::{Either, Itertools};
use num::complex::Complex64;

/// Everything a scan needs besides the random draw itself.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub basis: BasisFamily,
    pub order: usize,
    pub region: Region,
    pub density: f64,
    pub solver: SolverSettings,
    pub dedup_epsilon: f64,
    pub seed: Option<u64>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            basis: BasisFamily::Normalized,
            order: 50,
            region: Region::default(),
            density: 4.0,
            solver: SolverSettings::default(),
            dedup_epsilon: 1.0e-3,
            seed: None,
        }
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl ScanSettings {
    pub fn validate(&self) -> Result<()> {
        if self.order < 1 {
            return Err(Error::InvalidOrder(self.order));
        }
        grid_size(&self.region, self.density)?;
        if !positive(self.solver.tolerance) {
            return Err(Error::InvalidTolerance(self.solver.tolerance));
        }
        if self.solver.max_iterations < 1 {
            return Err(Error::InvalidIterations);
        }
        if !positive(self.dedup_epsilon) {
            return Err(Error::InvalidEpsilon(self.dedup_epsilon));
        }
        Ok(())
    }
}

/// Bookkeeping for one run. `seeds == converged + failed` and
/// `converged == outside + duplicates + roots`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanStats {
    pub seeds: usize,
    pub converged: usize,
    pub failed: usize,
    pub outside: usize,
    pub duplicates: usize,
}

/// Result of a scan. Carries the region so the points can be drawn to scale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Zeros {
    pub basis: BasisFamily,
    pub order: usize,
    pub region: Region,
    pub roots: Vec<Complex64>,
    pub stats: ScanStats,
    /// Seed of the coefficient draw, absent when the coefficients were given.
    pub coefficient_seed: Option<u64>,
}

/// Solves every seed independently. One entry per seed, in seed order.
pub fn solve_seeds(
    func: &impl Func,
    seeds: &[Complex64],
    solver: &SolverSettings,
) -> Vec<std::result::Result<Complex64, NoConvergence>> {
    seeds.iter().map(|&z0| find_root(func, z0, solver)).collect()
}

pub struct Scan {
    settings: ScanSettings,
    series: Series,
    seeds: Vec<Complex64>,
    coefficient_seed: Option<u64>,
}

impl Scan {
    /// Validates the settings, draws the coefficients and lays out the seeds.
    pub fn new(settings: ScanSettings) -> Result<Self> {
        settings.validate()?;
        let generator = CoefficientGenerator::new(settings.seed);
        let (series, seed) = Series::random(settings.basis, settings.order, &generator)?;
        log::debug!(
            "drew {} coefficients for the {} basis (seed {seed})",
            settings.order + 1,
            settings.basis
        );
        let seeds = seed_grid(&settings.region, settings.density)?;
        Ok(Self {
            settings,
            series,
            seeds,
            coefficient_seed: Some(seed),
        })
    }

    /// Uses the given series instead of a random draw. Its basis and order
    /// replace the ones in `settings`.
    pub fn from_series(series: Series, mut settings: ScanSettings) -> Result<Self> {
        settings.basis = series.basis();
        settings.order = series.order();
        settings.validate()?;
        let seeds = seed_grid(&settings.region, settings.density)?;
        Ok(Self {
            settings,
            series,
            seeds,
            coefficient_seed: None,
        })
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn seeds(&self) -> &[Complex64] {
        &self.seeds
    }

    pub fn run(&self) -> Zeros {
        let raw = solve_seeds(&self.series, &self.seeds, &self.settings.solver);
        self.collect(raw)
    }

    /// Filters and deduplicates per-seed results. `raw` must be in seed
    /// order for the output to match [`Scan::run`].
    pub fn collect(&self, raw: Vec<std::result::Result<Complex64, NoConvergence>>) -> Zeros {
        let seeds = raw.len();
        let (converged, failures): (Vec<_>, Vec<_>) =
            raw.into_iter().partition_map(|result| match result {
                Ok(z) => Either::Left(z),
                Err(reason) => Either::Right(reason),
            });

        if !failures.is_empty() {
            for (reason, count) in failures.iter().counts() {
                log::debug!("{count} seeds failed: {reason}");
            }
        }

        let inside = roots::filter(&converged, &self.settings.region);
        let unique = roots::dedup(&inside, self.settings.dedup_epsilon);

        let stats = ScanStats {
            seeds,
            converged: converged.len(),
            failed: failures.len(),
            outside: converged.len() - inside.len(),
            duplicates: inside.len() - unique.len(),
        };
        log::info!(
            "{} zeros from {} seeds ({} failed, {} outside, {} duplicates)",
            unique.len(),
            stats.seeds,
            stats.failed,
            stats.outside,
            stats.duplicates
        );

        Zeros {
            basis: self.settings.basis,
            order: self.settings.order,
            region: self.settings.region,
            roots: unique,
            stats,
            coefficient_seed: self.coefficient_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(ScanSettings::default().validate(), Ok(()));
    }

    #[test]
    fn configuration_errors_are_surfaced() {
        let base = ScanSettings::default();

        let settings = ScanSettings { order: 0, ..base.clone() };
        assert_eq!(settings.validate(), Err(Error::InvalidOrder(0)));

        let settings = ScanSettings {
            region: Region {
                x_min: 5.0,
                x_max: -5.0,
                y_min: -5.0,
                y_max: 5.0,
            },
            ..base.clone()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidRegion { .. })));
        assert!(Scan::new(settings).is_err());

        let settings = ScanSettings { density: 0.0, ..base.clone() };
        assert_eq!(settings.validate(), Err(Error::InvalidDensity(0.0)));

        let mut settings = base.clone();
        settings.solver.max_iterations = 0;
        assert_eq!(settings.validate(), Err(Error::InvalidIterations));

        let settings = ScanSettings {
            region: Region {
                x_min: -1e308,
                x_max: 1e308,
                y_min: -1.0,
                y_max: 1.0,
            },
            density: 1.0,
            ..base.clone()
        };
        assert!(matches!(settings.validate(), Err(Error::GridTooLarge { .. })));
        assert!(Scan::new(settings).is_err());

        let settings = ScanSettings {
            dedup_epsilon: -1.0,
            ..base
        };
        assert_eq!(settings.validate(), Err(Error::InvalidEpsilon(-1.0)));
    }

    #[test]
    fn collect_counts_every_seed() {
        let series = Series::new(
            BasisFamily::Plain,
            vec![Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)],
        )
        .unwrap();
        let scan = Scan::from_series(series, ScanSettings::default()).unwrap();
        let raw = vec![
            Ok(Complex64::new(1.0, 0.0)),
            Err(NoConvergence::MaxIterations),
            Ok(Complex64::new(1.0 + 1e-6, 0.0)),
            Ok(Complex64::new(9.0, 0.0)),
            Err(NoConvergence::NonFinite),
        ];
        let zeros = scan.collect(raw);
        assert_eq!(zeros.roots, vec![Complex64::new(1.0, 0.0)]);
        assert_eq!(
            zeros.stats,
            ScanStats {
                seeds: 5,
                converged: 3,
                failed: 2,
                outside: 1,
                duplicates: 1,
            }
        );
        assert_eq!(zeros.coefficient_seed, None);
        assert_eq!(zeros.order, 1);
    }

    #[test]
    fn degenerate_grid_gives_empty_result() {
        let settings = ScanSettings {
            order: 5,
            density: 0.05,
            seed: Some(9),
            ..Default::default()
        };
        let scan = Scan::new(settings).unwrap();
        assert!(scan.seeds().is_empty());
        let zeros = scan.run();
        assert!(zeros.roots.is_empty());
        assert_eq!(zeros.stats, ScanStats::default());
    }
}
