//! Network clients for the Rehability backend collaborators.

pub mod client;
pub mod http_classifier;
pub mod http_progress_repository;

pub use client::BackendClient;
pub use http_classifier::HttpClassifier;
pub use http_progress_repository::HttpProgressRepository;
