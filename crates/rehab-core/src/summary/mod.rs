//! Session summary module.
//!
//! # Module Structure
//!
//! - `model`: `SessionSummary` and the editable `SummaryDraft`
//! - `builder`: `build_summary` from final session state
//! - `repository`: Trait for the persistence collaborator

mod builder;
mod model;
pub mod repository;

pub use builder::build_summary;
pub use model::{SessionSummary, SummaryDraft};
pub use repository::SummaryRepository;
