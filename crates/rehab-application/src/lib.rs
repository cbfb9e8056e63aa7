pub mod presenter;
pub mod session_service;

pub use presenter::{ProgressView, SessionPresenter};
pub use session_service::{ExerciseSessionService, FrameOutcome, SessionOptions};
