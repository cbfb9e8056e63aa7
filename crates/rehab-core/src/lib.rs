pub mod classification;
pub mod config;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod motivation;
pub mod sampler;
pub mod session;
pub mod summary;

// Re-export common error type
pub use error::{RehabError, Result};
