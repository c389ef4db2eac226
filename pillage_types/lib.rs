pub mod buildings;
pub mod common;
pub mod errors;
pub mod map;
pub mod research;
pub mod units;

pub use errors::Result;
