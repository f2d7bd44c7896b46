pub(crate) mod array;
pub(crate) mod parallel;
pub(crate) mod scalar;
pub(crate) mod simd;
