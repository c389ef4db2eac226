pub mod calculators;
pub mod models;
pub mod placement;
pub mod rules;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
