pub mod marker;
pub mod sample;
pub mod series;
pub mod session;
pub mod units;
pub mod usage;
