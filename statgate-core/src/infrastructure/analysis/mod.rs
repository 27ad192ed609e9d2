//! Run ledger persistence

pub mod run_repository;

pub use run_repository::SqlxAnalysisRunRepository;
