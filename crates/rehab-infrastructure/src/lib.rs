pub mod config_service;
pub mod memory_summary_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::memory_summary_repository::InMemorySummaryRepository;
