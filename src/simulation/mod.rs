pub mod garrison;

pub use garrison::{Garrison, GarrisonSummary};
