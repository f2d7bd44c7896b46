//! Repeated wall-clock timing of the pairwise distance variants.

use anyhow::{anyhow, bail, Result};
use dao::{csv_point_set, point_set_from_dir, RunConfig};
use pdist::{compute_with, PointSet, Variant};
use serde::Serialize;
use std::hint::black_box;
use std::time::Instant;
use utils::{matrices_agree, max_abs_diff, random_point_set, Summary};

/// Per-run wall-clock seconds for one variant.
#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub variant: Variant,
    pub samples: Vec<f64>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub num_points: usize,
    pub dim: usize,
    pub runs: usize,
    pub timings: Vec<Timing>,
}

/// The configured data directory or CSV file, or uniform random points from the
/// configured seed.
pub fn load_points(config: &RunConfig) -> Result<PointSet> {
    match (&config.data_dir, &config.input) {
        (Some(dir), _) => {
            let (meta, points) = point_set_from_dir(dir)?;
            log::info!("Loaded {}: {}", meta.name, meta.description);
            Ok(points)
        }
        (None, Some(path)) => csv_point_set(path),
        (None, None) => Ok(random_point_set(config.num_points, config.dim, config.seed)?),
    }
}

/// One untimed warm-up call, then `runs` timed calls.
pub fn time_variant(points: &PointSet, variant: Variant, runs: usize) -> Result<Timing> {
    if runs == 0 {
        bail!("runs must be at least 1");
    }

    black_box(compute_with(black_box(points), variant));

    let samples: Vec<f64> = (0..runs)
        .map(|_| {
            let start = Instant::now();
            black_box(compute_with(black_box(points), variant));
            start.elapsed().as_secs_f64()
        })
        .collect();

    let summary =
        Summary::from_samples(&samples).ok_or_else(|| anyhow!("no usable samples for {variant}"))?;

    Ok(Timing {
        variant,
        samples,
        summary,
    })
}

pub fn time_all(points: &PointSet, variants: &[Variant], runs: usize) -> Result<Report> {
    let timings = variants
        .iter()
        .map(|&variant| {
            let timing = time_variant(points, variant, runs)?;
            log::info!("{}", format_timing(&timing));
            Ok(timing)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Report {
        num_points: points.len(),
        dim: points.dim(),
        runs,
        timings,
    })
}

/// Fails unless every variant matches the naive loop within `tol`.
pub fn check_agreement(points: &PointSet, variants: &[Variant], tol: f64) -> Result<()> {
    let reference = compute_with(points, Variant::Naive);

    for &variant in variants {
        let dists = compute_with(points, variant);
        if !matrices_agree(&reference, &dists, tol) {
            bail!(
                "{variant} disagrees with naive (max abs diff {:?})",
                max_abs_diff(&reference, &dists)
            );
        }
        if !dists.is_symmetric() {
            bail!("{variant} is not symmetric");
        }
        log::debug!("{variant} agrees with naive");
    }

    Ok(())
}

/// Seconds in the largest unit that keeps the value at or above one.
pub fn format_seconds(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{seconds:.3} s")
    } else if seconds >= 1e-3 {
        format!("{:.3} ms", seconds * 1e3)
    } else if seconds >= 1e-6 {
        format!("{:.3} µs", seconds * 1e6)
    } else {
        format!("{:.1} ns", seconds * 1e9)
    }
}

pub fn format_timing(timing: &Timing) -> String {
    let s = &timing.summary;
    format!(
        "{:<10} {} ± {} per loop (min {}, max {}) over {} runs",
        timing.variant.name(),
        format_seconds(s.mean),
        format_seconds(s.std_dev),
        format_seconds(s.min),
        format_seconds(s.max),
        s.count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_units() {
        assert_eq!(format_seconds(2.5), "2.500 s");
        assert_eq!(format_seconds(0.0125), "12.500 ms");
        assert_eq!(format_seconds(4.2e-5), "42.000 µs");
        assert_eq!(format_seconds(3e-8), "30.0 ns");
    }

    #[test]
    fn times_each_run() {
        let points = random_point_set(20, 3, 1).unwrap();
        let timing = time_variant(&points, Variant::Symmetric, 4).unwrap();
        assert_eq!(timing.samples.len(), 4);
        assert_eq!(timing.summary.count, 4);
        assert!(timing.samples.iter().all(|&s| s >= 0.0));
        assert!(format_timing(&timing).starts_with("symmetric"));
    }

    #[test]
    fn zero_runs_rejected() {
        let points = random_point_set(5, 2, 1).unwrap();
        assert!(time_variant(&points, Variant::Naive, 0).is_err());
    }

    #[test]
    fn report_covers_requested_variants() {
        let points = random_point_set(30, 3, 2).unwrap();
        let report = time_all(&points, &[Variant::Naive, Variant::Gram], 2).unwrap();
        assert_eq!((report.num_points, report.dim, report.runs), (30, 3, 2));
        let names: Vec<_> = report.timings.iter().map(|t| t.variant).collect();
        assert_eq!(names, vec![Variant::Naive, Variant::Gram]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["timings"][1]["variant"], "gram");
    }

    #[test]
    fn all_variants_pass_the_check() {
        let points = random_point_set(200, 3, 42).unwrap();
        check_agreement(&points, &Variant::ALL, 1e-9).unwrap();
    }

    #[test]
    fn generated_or_loaded_points() {
        let config = RunConfig {
            num_points: 10,
            dim: 4,
            ..RunConfig::default()
        };
        let points = load_points(&config).unwrap();
        assert_eq!((points.len(), points.dim()), (10, 4));

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "1,2\n3,4\n5,6\n").unwrap();
        let config = RunConfig {
            input: Some(file.path().to_path_buf()),
            ..RunConfig::default()
        };
        let points = load_points(&config).unwrap();
        assert_eq!((points.len(), points.dim()), (3, 2));
    }

    #[test]
    fn points_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("meta_data.txt"),
            r#"
            name = "triangle"
            description = "three points in the plane"
            data_disk_format = "csv_f64"
            path_to_data = "points.csv"
            num_records = 3
            dim = 2
            "#,
        )
        .unwrap();
        std::fs::write(dir.path().join("points.csv"), "0,0\n3,4\n6,8\n").unwrap();

        let config = RunConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..RunConfig::default()
        };
        let points = load_points(&config).unwrap();
        assert_eq!((points.len(), points.dim()), (3, 2));
        check_agreement(&points, &Variant::ALL, 1e-9).unwrap();
    }
}
