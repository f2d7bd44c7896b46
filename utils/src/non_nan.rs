use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// An f64 that is never NaN, so it can be totally ordered.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct NonNan(f64);

impl NonNan {
    pub fn new(val: f64) -> Option<NonNan> {
        if val.is_nan() {
            None
        } else {
            Some(NonNan(val))
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Eq for NonNan {}

impl PartialOrd for NonNan {
    fn partial_cmp(&self, other: &NonNan) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NonNan {
    fn cmp(&self, other: &NonNan) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Display for NonNan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonNan> for f64 {
    fn from(value: NonNan) -> Self {
        value.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::NonNan;

    #[test]
    fn rejects_nan() {
        assert!(NonNan::new(f64::NAN).is_none());
        assert_eq!(NonNan::new(2.5).map(f64::from), Some(2.5));
    }

    #[test]
    fn sorts() {
        let mut vals: Vec<NonNan> = [3.0, -1.0, 2.0]
            .into_iter()
            .filter_map(NonNan::new)
            .collect();
        vals.sort();
        assert_eq!(vals.iter().map(NonNan::as_f64).collect::<Vec<_>>(), vec![-1.0, 2.0, 3.0]);
    }
}
