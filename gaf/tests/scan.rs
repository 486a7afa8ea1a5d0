use gaf::{solve_seeds, BasisFamily, NoConvergence, Region, Scan, ScanSettings, Series};
use num::complex::Complex64;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

#[test]
fn linear_series_has_single_zero() {
    let series = Series::new(BasisFamily::Plain, vec![c(1.0, 0.0), c(-1.0, 0.0)]).unwrap();
    let settings = ScanSettings {
        region: Region::new(-5.0, 5.0, -5.0, 5.0).unwrap(),
        density: 4.0,
        ..Default::default()
    };
    let scan = Scan::from_series(series, settings).unwrap();
    let zeros = scan.run();

    assert_eq!(zeros.roots.len(), 1);
    assert!((zeros.roots[0] - c(1.0, 0.0)).norm() < 1e-6);
    assert_eq!(zeros.stats.seeds, 1600);
    assert_eq!(zeros.stats.failed, 0);
    assert_eq!(zeros.stats.duplicates, 1599);
}

#[test]
fn cubic_with_known_zeros() {
    // (z - 1)(z + 1)(z - i)
    let coefficients = vec![c(0.0, 1.0), c(-1.0, 0.0), c(0.0, -1.0), c(1.0, 0.0)];
    let series = Series::new(BasisFamily::Plain, coefficients).unwrap();
    let settings = ScanSettings {
        region: Region::new(-2.0, 2.0, -2.0, 2.0).unwrap(),
        density: 2.0,
        ..Default::default()
    };
    let zeros = Scan::from_series(series, settings).unwrap().run();

    assert_eq!(zeros.roots.len(), 3);
    for expected in [c(1.0, 0.0), c(-1.0, 0.0), c(0.0, 1.0)] {
        assert!(
            zeros
                .roots
                .iter()
                .any(|z| (*z - expected).norm() < 1e-6),
            "missing {expected}"
        );
    }
}

#[test]
fn random_gaf_zeros_are_distinct_zeros_in_region() {
    let settings = ScanSettings {
        basis: BasisFamily::Normalized,
        order: 40,
        density: 3.0,
        seed: Some(2024),
        ..Default::default()
    };
    let scan = Scan::new(settings.clone()).unwrap();
    let zeros = scan.run();

    assert!(!zeros.roots.is_empty());
    assert!(zeros.roots.len() <= settings.order);
    assert_eq!(zeros.coefficient_seed, Some(2024));
    for (i, z) in zeros.roots.iter().enumerate() {
        assert!(settings.region.contains(*z));
        assert!(scan.series().f(*z).norm() <= 1e-4, "f({z}) too large");
        for w in &zeros.roots[i + 1..] {
            assert!((*z - *w).norm() > settings.dedup_epsilon);
        }
    }
    let stats = zeros.stats;
    assert_eq!(stats.seeds, stats.converged + stats.failed);
    assert_eq!(
        stats.converged,
        stats.outside + stats.duplicates + zeros.roots.len()
    );
}

#[test]
fn seeded_scans_are_reproducible() {
    let settings = ScanSettings {
        basis: BasisFamily::Plain,
        order: 20,
        density: 2.0,
        region: Region::new(-1.5, 1.5, -1.5, 1.5).unwrap(),
        seed: Some(11),
        ..Default::default()
    };
    let a = Scan::new(settings.clone()).unwrap().run();
    let b = Scan::new(settings).unwrap().run();
    assert_eq!(a, b);
}

#[test]
fn settings_from_ron() {
    let settings: ScanSettings = ron::from_str(
        "(basis: plain, order: 30, density: 6.0, region: (x_min: -2.0, x_max: 2.0, y_min: -1.0, y_max: 1.0))",
    )
    .unwrap();
    assert_eq!(settings.basis, BasisFamily::Plain);
    assert_eq!(settings.order, 30);
    assert_eq!(settings.region.height(), 2.0);
    assert_eq!(settings.solver.tolerance, 1e-8);
    assert_eq!(settings.solver.max_iterations, 50);
    assert_eq!(settings.dedup_epsilon, 1e-3);
    assert_eq!(settings.seed, None);
}

#[test]
fn zeros_serialize_with_region() {
    let series = Series::new(BasisFamily::Plain, vec![c(1.0, 0.0), c(-1.0, 0.0)]).unwrap();
    let settings = ScanSettings {
        density: 1.0,
        ..Default::default()
    };
    let zeros = Scan::from_series(series, settings).unwrap().run();
    let json = serde_json::to_value(&zeros).unwrap();
    assert_eq!(json["basis"], "plain");
    assert_eq!(json["region"]["x_min"], -5.0);
    assert_eq!(json["roots"].as_array().unwrap().len(), 1);
}

#[test]
fn overflow_far_from_origin_only_drops_seeds() {
    let settings = ScanSettings {
        basis: BasisFamily::Normalized,
        order: 100,
        region: Region::new(-1e3, 1e3, -1e3, 1e3).unwrap(),
        density: 0.05,
        seed: Some(42),
        ..Default::default()
    };
    let scan = Scan::new(settings.clone()).unwrap();
    assert_eq!(scan.seeds().len(), 10_000);

    let raw = solve_seeds(scan.series(), scan.seeds(), &settings.solver);
    let non_finite = raw
        .iter()
        .filter(|r| **r == Err(NoConvergence::NonFinite))
        .count();
    assert!(non_finite > 0);

    let zeros = scan.collect(raw);
    assert_eq!(zeros.stats.seeds, 10_000);
    assert!(zeros.stats.failed >= non_finite);
    assert!(zeros
        .roots
        .iter()
        .all(|z| settings.region.contains(*z) && z.re.is_finite() && z.im.is_finite()));
}
