//! Session domain module.
//!
//! # Module Structure
//!
//! - `plan`: The confirmed sets/reps plan (`SessionPlan`)
//! - `state`: Per-session progress (`SessionState`) and lifecycle phase
//! - `effect`: Effects emitted for the presentation layer
//! - `machine`: The progression state machine (`SessionMachine`)

mod effect;
mod machine;
mod plan;
mod state;

pub use effect::{Effect, Effects};
pub use machine::SessionMachine;
pub use plan::SessionPlan;
pub use state::{SessionPhase, SessionState};
