mod compare;
mod generate;
pub mod non_nan;
mod stats;

pub use compare::{approx_eq, matrices_agree, max_abs_diff};
pub use generate::{gaussian_point_set, random_point_set};
pub use stats::Summary;
