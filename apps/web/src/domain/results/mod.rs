// Results domain module
// Race time parsing and ordering of published results and awards

pub mod awards;
pub mod race_time;
pub mod standings;

pub use awards::{Podium, Prize};
pub use standings::Standing;
