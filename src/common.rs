pub mod error;
pub mod patch;
