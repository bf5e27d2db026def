pub mod error;
pub mod labels;
