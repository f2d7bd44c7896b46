use crate::non_nan::NonNan;
use serde::Serialize;

/// Summary statistics over a set of samples, e.g. run times in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for fewer than two samples.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Summary {
    /// `None` for an empty slice or if any sample is NaN.
    pub fn from_samples(samples: &[f64]) -> Option<Summary> {
        let mut sorted = samples
            .iter()
            .map(|&s| NonNan::new(s))
            .collect::<Option<Vec<_>>>()?;
        if sorted.is_empty() {
            return None;
        }
        sorted.sort();

        let count = sorted.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let ss: f64 = samples.iter().map(|s| (s - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        let median = if count % 2 == 1 {
            sorted[count / 2].as_f64()
        } else {
            (sorted[count / 2 - 1].as_f64() + sorted[count / 2].as_f64()) / 2.0
        };

        Some(Summary {
            count,
            mean,
            std_dev,
            min: sorted[0].as_f64(),
            max: sorted[count - 1].as_f64(),
            median,
        })
    }
}
