//! Combination enumeration and output size arithmetic.

mod estimate;
mod generate;
mod lengths;

pub use estimate::SizeEstimate;
pub use generate::Combinations;
pub use lengths::LengthSet;
