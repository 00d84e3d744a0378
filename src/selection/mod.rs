pub mod truncation;

pub use truncation::TruncationSelection;
