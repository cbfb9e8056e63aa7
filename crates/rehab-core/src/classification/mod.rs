//! Classification domain module.
//!
//! # Module Structure
//!
//! - `model`: Hand poses and per-frame classification results
//! - `classifier`: Trait for the external classification collaborator

pub mod classifier;
mod model;

pub use classifier::ExerciseClassifier;
pub use model::{ClassificationResult, HAND_LANDMARK_COUNT, HandPose, Landmark};
