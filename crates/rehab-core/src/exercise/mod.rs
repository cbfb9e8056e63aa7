//! Exercise domain module.
//!
//! Contains the exercise catalogue, the discrete pose labels reported by the
//! classifier, and their presentation color hints.

mod model;

pub use model::{ColorHint, DiscreteState, ExerciseType, Finger};
