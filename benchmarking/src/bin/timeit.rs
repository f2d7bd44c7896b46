use anyhow::{Context, Result};
use benchmarking::{check_agreement, format_timing, load_points, time_all};
use clap::Parser;
use dao::{run_config_from_file, RunConfig};
use pdist::Variant;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const AGREEMENT_TOLERANCE: f64 = 1e-9;

/// clap parser
#[derive(Parser, Debug)]
#[command(version, about = "Times pairwise Euclidean distance variants on one point set", long_about = None)]
struct Args {
    /// TOML run description; the flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random points
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Coordinates per random point
    #[arg(short, long)]
    dim: Option<usize>,

    /// Seed for the random points
    #[arg(short, long)]
    seed: Option<u64>,

    /// Timed runs per variant
    #[arg(short, long)]
    runs: Option<usize>,

    /// Comma separated variants, e.g. naive,simd,gram
    #[arg(long, value_delimiter = ',')]
    variants: Option<Vec<Variant>>,

    /// Header-less CSV of points, used instead of random points
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory with a meta_data.txt describing the points to load
    #[arg(long, conflicts_with = "input")]
    data_dir: Option<PathBuf>,

    /// Also write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Check every variant against the naive loop before timing
    #[arg(long)]
    check: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => run_config_from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(points) = self.points {
            config.num_points = points;
        }
        if let Some(dim) = self.dim {
            config.dim = dim;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(variants) = &self.variants {
            config.variants = variants.clone();
        }
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
            config.data_dir = None;
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = Some(data_dir.clone());
            config.input = None;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = args.run_config()?;
    let points = load_points(&config)?;

    log::info!(
        "Timing {} variants on {} points in {} dimensions, {} runs each",
        config.variants.len(),
        points.len(),
        points.dim(),
        config.runs
    );

    if args.check {
        check_agreement(&points, &config.variants, AGREEMENT_TOLERANCE)?;
        log::info!("All variants agree within {AGREEMENT_TOLERANCE:e}");
    }

    let report = time_all(&points, &config.variants, config.runs)?;

    for timing in &report.timings {
        println!("{}", format_timing(timing));
    }

    if let Some(path) = &args.json {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["timeit", "-n", "64", "--variants", "naive,gram", "-r", "3"]);
        let config = args.run_config().unwrap();
        assert_eq!(config.num_points, 64);
        assert_eq!(config.dim, 3);
        assert_eq!(config.runs, 3);
        assert_eq!(config.variants, vec![Variant::Naive, Variant::Gram]);
    }

    #[test]
    fn bad_variant_rejected() {
        assert!(Args::try_parse_from(["timeit", "--variants", "numexpr"]).is_err());
    }

    #[test]
    fn data_dir_flag() {
        let args = Args::parse_from(["timeit", "--data-dir", "data/tiny"]);
        let config = args.run_config().unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("data/tiny")));
        assert_eq!(config.input, None);

        assert!(Args::try_parse_from(["timeit", "--data-dir", "d", "--input", "p.csv"]).is_err());
    }

    #[test]
    fn zero_runs_rejected() {
        let args = Args::parse_from(["timeit", "--runs", "0"]);
        assert!(args.run_config().is_err());
    }
}
