pub mod buildings;
pub mod research;
pub mod units;
pub mod village;
